#![no_main]
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use vier::game::core::{InvalidMove, COLUMNS, MAX_PIECES, ROWS};
use vier::game::state::GameState;

fuzz_target!(|data: &[u8]| {
    let mut state = GameState::new();
    for &byte in data {
        // Leave some room past the last column to exercise the range check.
        let column = usize::from(byte % (COLUMNS as u8 + 2));
        let before = state.clone();
        match state.apply_move(column) {
            Ok(ended) => {
                assert_eq!(ended, state.is_over());
                assert_eq!(state.pieces(), before.pieces() + 1);
                assert_eq!(state.side_to_move(), !before.side_to_move());
            },
            Err(InvalidMove::ColumnOutOfRange { .. }) => {
                assert!(column >= COLUMNS);
                assert_eq!(state, before);
            },
            Err(InvalidMove::ColumnFull { .. }) => {
                assert!(state.is_full(column));
                assert_eq!(state, before);
            },
            Err(InvalidMove::GameOver) => {
                assert!(before.is_over());
                assert_eq!(state, before);
            },
        }
        let occupied = (0..ROWS)
            .flat_map(|row| (0..COLUMNS).map(move |column| (row, column)))
            .filter(|&(row, column)| state.cell(row, column).is_some())
            .count();
        assert_eq!(occupied, usize::from(state.pieces()));
        assert!(state.pieces() <= MAX_PIECES);
    }
});
