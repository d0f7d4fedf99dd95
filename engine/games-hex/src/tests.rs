use super::*;
use engine_core::{DefaultPolicy, RandomPolicy};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn board(rows: &[&str]) -> HexBoard {
    let codes: Vec<u8> = rows
        .iter()
        .flat_map(|r| r.chars())
        .map(|ch| match ch {
            'X' => 1,
            'O' => 2,
            _ => 0,
        })
        .collect();
    HexBoard::from_codes(&codes).unwrap()
}

#[test]
fn test_initial_state() {
    let game = HexGame::new(4);
    let state = game.initial_state();

    assert_eq!(state.size(), 4);
    assert_eq!(state.empty_count(), 16);
    assert!(!game.is_terminal(&state));
    assert_eq!(game.legal_actions(&state, Player::One).len(), 16);
}

#[test]
fn test_neighbors_follow_diamond() {
    let game = HexGame::new(3);

    // Corner (0,0): right and down only
    let mut corner = game.neighbors(0).to_vec();
    corner.sort();
    assert_eq!(corner, vec![1, 3]);

    // Centre touches six cells, not (0,0) or (2,2)
    let mut centre = game.neighbors(4).to_vec();
    centre.sort();
    assert_eq!(centre, vec![1, 2, 3, 5, 6, 7]);

    // (0,2) connects to its down-left diagonal (1,1)
    assert!(game.neighbors(2).contains(&4));
}

#[test]
fn test_next_state_claims_cell() {
    let game = HexGame::new(3);
    let state = game.initial_state();
    let next = game
        .next_state(&state, &HexMove::new(5, Player::Two))
        .unwrap();

    assert_eq!(next.get(1, 2), Some(Cell::Owner(Player::Two)));
    assert_eq!(next.empty_count(), 8);
    // Original snapshot untouched
    assert_eq!(state.empty_count(), 9);
}

#[test]
fn test_next_state_rejects_bad_moves() {
    let game = HexGame::new(3);
    let state = game
        .next_state(&game.initial_state(), &HexMove::new(0, Player::One))
        .unwrap();

    assert!(matches!(
        game.next_state(&state, &HexMove::new(0, Player::Two)),
        Err(OracleError::IllegalAction(_))
    ));
    assert_eq!(
        game.next_state(&state, &HexMove::new(9, Player::Two)),
        Err(OracleError::OutOfBounds { index: 9, size: 9 })
    );
}

#[test]
fn test_player_one_connects_rows() {
    let game = HexGame::new(3);
    // Column 1 straight down
    let state = board(&[".X.", ".X.", ".X."]);

    assert!(game.has_connection(&state, Player::One));
    assert!(!game.has_connection(&state, Player::Two));
    assert!(game.is_terminal(&state));
    assert_eq!(game.winner(&state, Player::Two), Some(Player::One));
}

#[test]
fn test_player_two_connects_columns() {
    let game = HexGame::new(3);
    // Row 2 straight across
    let state = board(&["...", "...", "OOO"]);

    assert!(game.has_connection(&state, Player::Two));
    assert_eq!(game.connected_player(&state), Some(Player::Two));
}

#[test]
fn test_diagonal_link_counts() {
    let game = HexGame::new(3);
    // (0,2) -> (1,1) -> (2,0) uses the up-right/down-left diagonal
    let state = board(&["..X", ".X.", "X.."]);
    assert!(game.has_connection(&state, Player::One));
}

#[test]
fn test_other_diagonal_is_not_adjacent() {
    let game = HexGame::new(3);
    // (0,0) -> (1,1) -> (2,2) is not a chain on the diamond
    let state = board(&["X..", ".X.", "..X"]);
    assert!(!game.has_connection(&state, Player::One));
    assert!(!game.is_terminal(&state));
}

#[test]
fn test_terminal_board_has_no_moves() {
    let game = HexGame::new(2);
    let state = board(&["X.", "X."]);

    assert!(game.is_terminal(&state));
    assert!(game.legal_actions(&state, Player::Two).is_empty());
    assert_eq!(
        game.next_state(&state, &HexMove::new(1, Player::Two)),
        Err(OracleError::GameOver)
    );
}

#[test]
fn test_random_games_always_have_a_winner() {
    let game = HexGame::new(5);
    let policy = RandomPolicy::new();
    let mut rng = ChaCha20Rng::seed_from_u64(2024);

    for _ in 0..50 {
        let mut state = game.initial_state();
        let mut mover = Player::One;
        while !game.is_terminal(&state) {
            let action = policy
                .choose_action(&game, &state, mover, &mut rng)
                .expect("non-terminal Hex board has an empty cell");
            state = game.next_state(&state, &action).unwrap();
            mover = mover.opponent();
        }
        let winner = game.winner(&state, mover.opponent());
        assert_eq!(winner, Some(mover.opponent()), "the last mover completes the chain");
    }
}

#[test]
fn test_encode_state() {
    let game = HexGame::new(2);
    let state = board(&["XO", ".."]);
    assert_eq!(game.encode_state(&state), vec![1.0, 2.0, 0.0, 0.0]);
}

#[test]
fn test_from_codes_validation() {
    assert!(HexBoard::from_codes(&[0, 0, 0]).is_none());
    assert!(HexBoard::from_codes(&[0, 3, 0, 0]).is_none());
    assert_eq!(HexBoard::from_codes(&[0; 9]).map(|b| b.size()), Some(3));
}

#[test]
fn test_display() {
    let state = board(&["X.", ".O"]);
    assert_eq!(state.to_string(), "X .\n . O\n");
}

#[test]
fn test_metadata() {
    let meta = HexGame::new(4).metadata();
    assert_eq!(meta.env_id, "hex");
    assert_eq!(meta.display_name, "Hex 4x4");
    assert_eq!(meta.num_actions, 16);
    assert_eq!(meta.case_input_size(), 17);
}

#[test]
fn test_action_index_is_row_major() {
    let game = HexGame::new(4);
    let action = HexMove::new(2 * 4 + 3, Player::One);
    assert_eq!(game.action_index(&action), 11);
    assert_eq!(action.row_col(4), (2, 3));
}
