#![no_main]
use libfuzzer_sys::fuzz_target;
use vier::game::state::GameState;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = GameState::from_moves(input);
    }
});
