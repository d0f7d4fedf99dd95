use super::*;

#[test]
fn test_initial_state() {
    let game = NimGame::new(12, 3);
    let state = game.initial_state();
    assert_eq!(state.remaining(), 12);
    assert!(!game.is_terminal(&state));
}

#[test]
fn test_legal_actions_bounded_by_heap() {
    let game = NimGame::new(12, 3);

    let counts: Vec<u32> = game
        .legal_actions(&NimState::new(12), Player::One)
        .iter()
        .map(|t| t.count)
        .collect();
    assert_eq!(counts, vec![1, 2, 3]);

    let near_end = game.legal_actions(&NimState::new(2), Player::Two);
    assert_eq!(near_end, vec![Take::new(1, Player::Two), Take::new(2, Player::Two)]);

    assert!(game.legal_actions(&NimState::new(0), Player::One).is_empty());
}

#[test]
fn test_next_state() {
    let game = NimGame::new(5, 2);
    let next = game
        .next_state(&NimState::new(5), &Take::new(2, Player::One))
        .unwrap();
    assert_eq!(next.remaining(), 3);
}

#[test]
fn test_next_state_rejects_bad_takes() {
    let game = NimGame::new(5, 2);

    assert!(matches!(
        game.next_state(&NimState::new(5), &Take::new(3, Player::One)),
        Err(OracleError::IllegalAction(_))
    ));
    assert!(matches!(
        game.next_state(&NimState::new(1), &Take::new(2, Player::One)),
        Err(OracleError::IllegalAction(_))
    ));
    assert!(matches!(
        game.next_state(&NimState::new(5), &Take::new(0, Player::One)),
        Err(OracleError::IllegalAction(_))
    ));
    assert_eq!(
        game.next_state(&NimState::new(0), &Take::new(1, Player::One)),
        Err(OracleError::GameOver)
    );
}

#[test]
fn test_last_taker_wins() {
    let game = NimGame::new(3, 3);
    let end = game
        .next_state(&game.initial_state(), &Take::new(3, Player::Two))
        .unwrap();

    assert!(game.is_terminal(&end));
    assert_eq!(game.winner(&end, Player::Two), Some(Player::Two));
}

#[test]
fn test_action_index() {
    let game = NimGame::new(10, 4);
    assert_eq!(game.num_actions(), 4);
    for count in 1..=4 {
        assert_eq!(game.action_index(&Take::new(count, Player::One)), count as usize - 1);
    }
}

#[test]
fn test_losing_positions() {
    let game = NimGame::new(12, 3);
    assert!(game.is_losing_position(&NimState::new(0)));
    assert!(game.is_losing_position(&NimState::new(8)));
    assert!(!game.is_losing_position(&NimState::new(9)));
}

#[test]
fn test_encode_and_metadata() {
    let game = NimGame::new(12, 3);
    assert_eq!(game.encode_state(&NimState::new(7)), vec![7.0]);

    let meta = game.metadata();
    assert_eq!(meta.env_id, "nim");
    assert_eq!(meta.num_actions, 3);
    assert_eq!(meta.case_input_size(), 2);
}
