use pretty_assertions::assert_eq;
use vier::game::core::{InvalidMove, Outcome, Player, COLUMNS, MAX_PIECES, ROWS};
use vier::game::state::GameState;

/// Checkerboard-like fill of the whole board in which no line of four ever
/// appears.
const DRAW: &str = "111222333111222333444555666444555666777777";

fn setup(moves: &str) -> GameState {
    GameState::from_moves(moves).unwrap_or_else(|e| panic!("we are setting up legal games: {e}"))
}

/// Plays all `columns` (0-indexed) and checks that only the last one ends the
/// game with a win of `winner`.
fn wins_on_last_move(columns: &[usize], winner: Player) {
    let mut state = GameState::new();
    let (last, rest) = columns.split_last().expect("at least one move");
    for &column in rest {
        assert_eq!(state.apply_move(column), Ok(false), "{state:?}");
        assert_eq!(state.winner(), None);
    }
    assert_eq!(state.apply_move(*last), Ok(true));
    assert_eq!(state.winner(), Some(winner));
    assert_eq!(state.outcome(), Some(Outcome::Win(winner)));
}

#[test]
fn vertical() {
    // Player One plays column 3 four times, Player Two answers in column 0.
    wins_on_last_move(&[3, 0, 3, 0, 3, 0, 3], Player::One);
}

#[test]
fn horizontal() {
    // Player One fills row 0, columns 0 to 3, Player Two stacks on top.
    wins_on_last_move(&[0, 0, 1, 1, 2, 2, 3], Player::One);
}

#[test]
fn diagonal() {
    wins_on_last_move(&[0, 1, 1, 2, 3, 2, 2, 3, 4, 3, 3], Player::One);
}

#[test]
fn anti_diagonal() {
    wins_on_last_move(&[6, 5, 5, 4, 3, 4, 4, 3, 2, 3, 3], Player::One);
}

#[test]
fn second_player_wins() {
    wins_on_last_move(&[0, 1, 0, 1, 0, 1, 2, 1], Player::Two);
}

#[test]
fn line_longer_than_four() {
    // Player One has columns 0, 1 and 3, 4 in row 0 and fills the gap.
    wins_on_last_move(&[0, 0, 1, 1, 3, 3, 4, 6, 2], Player::One);
}

#[test]
fn no_false_positives() {
    // Gap in the middle: X X - X X.
    let state = setup("1727475");
    assert_eq!(state.winner(), None);
    // Three in a row followed by an opponent's piece: X X X O.
    let state = setup("14273");
    assert_eq!(state.cell(0, 3), Some(Player::Two));
    assert_eq!(state.winner(), None);
    // Three vertically.
    let state = setup("121212");
    assert_eq!(state.winner(), None);
}

#[test]
fn draw() {
    let mut state = GameState::new();
    let columns: Vec<usize> = DRAW
        .chars()
        .map(|c| c.to_digit(10).unwrap() as usize - 1)
        .collect();
    assert_eq!(columns.len(), usize::from(MAX_PIECES));
    for (ply, &column) in columns.iter().enumerate() {
        let ended = state.apply_move(column).unwrap();
        assert_eq!(ended, ply + 1 == columns.len(), "ply {ply}");
        assert_eq!(state.winner(), None);
    }
    assert!(state.is_over());
    assert_eq!(state.outcome(), Some(Outcome::Draw));
    assert_eq!(state.pieces(), MAX_PIECES);
    assert!(state.legal_moves().is_empty());
    assert_eq!(
        state.to_string(),
        "OXOOXOO\n\
         XOXXOXX\n\
         OXOOXOO\n\
         XOXXOXX\n\
         OXOOXOO\n\
         XOXXOXX\n"
    );
    assert_eq!(state.apply_move(0), Err(InvalidMove::GameOver));
}

#[test]
fn line_on_the_last_cell_is_a_win() {
    // O completes the top row line with the 42nd piece.
    let moves = "317133624532157157254277765514231366462644";
    let mut state = setup(&moves[..moves.len() - 1]);
    assert_eq!(state.pieces(), MAX_PIECES - 1);
    assert_eq!(state.winner(), None);
    assert_eq!(state.legal_moves().as_slice(), &[3]);
    assert_eq!(state.apply_move(3), Ok(true));
    assert_eq!(state.pieces(), MAX_PIECES);
    assert_eq!(state.winner(), Some(Player::Two));
    assert_eq!(state.outcome(), Some(Outcome::Win(Player::Two)));
    assert_eq!(
        state.to_string(),
        "XXOOOOX\n\
         XXOXXOO\n\
         OOXXOOX\n\
         XXOOXXO\n\
         OOXXOOX\n\
         OOXXOXX\n"
    );
    assert_eq!(setup(moves), state);
}

#[test]
fn pieces_match_occupied_cells() {
    let state = setup(&DRAW[..30]);
    let occupied = (0..ROWS)
        .flat_map(|row| (0..COLUMNS).map(move |column| (row, column)))
        .filter(|&(row, column)| state.cell(row, column).is_some())
        .count();
    assert_eq!(occupied, usize::from(state.pieces()));
    let levels: usize = (0..COLUMNS).map(|column| state.level(column)).sum();
    assert_eq!(levels, occupied);
}

#[test]
fn full_column_is_rejected_atomically() {
    let mut state = setup("444444");
    assert!(state.is_full(3));
    let before = state.clone();
    assert_eq!(
        state.apply_move(3),
        Err(InvalidMove::ColumnFull { column: 3 })
    );
    assert_eq!(state, before);
    assert_eq!(state.side_to_move(), Player::One);
    assert_eq!(state.pieces(), 6);
}

#[test]
fn out_of_range_is_rejected_atomically() {
    let mut state = setup("4");
    let before = state.clone();
    assert_eq!(
        state.apply_move(7),
        Err(InvalidMove::ColumnOutOfRange { column: 7 })
    );
    assert_eq!(
        state.apply_move(usize::MAX),
        Err(InvalidMove::ColumnOutOfRange { column: usize::MAX })
    );
    assert_eq!(state, before);
}

#[test]
fn alternating_players() {
    let mut state = GameState::new();
    for (ply, column) in [3, 3, 2, 4, 5].into_iter().enumerate() {
        let expected = if ply % 2 == 0 { Player::One } else { Player::Two };
        assert_eq!(state.side_to_move(), expected);
        let _ = state.apply_move(column).unwrap();
    }
}
