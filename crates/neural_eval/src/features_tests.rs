use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stratego_core::{
    generate_setup, GameState, GameStatus, Piece, Rank, SetupMode, TeamColor, BOARD_SIZE,
};

/// A fully mirrored position: blue's generated setup reflected onto red's
/// home rows. Every difference feature must vanish.
fn mirrored_state() -> GameState {
    let blue = generate_setup(TeamColor::Blue, SetupMode::Random, &mut StdRng::seed_from_u64(5));
    let red: Vec<Piece> = blue
        .iter()
        .map(|p| Piece {
            row: BOARD_SIZE - 1 - p.row,
            ..*p
        })
        .collect();

    GameState {
        status: GameStatus::Playing,
        current_turn: TeamColor::Red,
        turn_number: 1,
        red_pieces: red,
        blue_pieces: blue,
        red_captured: Vec::new(),
        blue_captured: Vec::new(),
        move_history: Vec::new(),
        winner: None,
        win_reason: None,
    }
}

#[test]
fn test_feature_vector_has_canonical_length_and_names() {
    let state = mirrored_state();
    let features = extract_features(&state, TeamColor::Red);
    assert_eq!(features.len(), NUM_FEATURES);
    assert_eq!(FEATURE_NAMES.len(), NUM_FEATURES);
    assert_eq!(FEATURE_NAMES[0], "rank_balance_0");
    assert_eq!(FEATURE_NAMES[25], "turn_advantage");
    assert_eq!(FEATURE_NAMES[26], "game_phase");
}

#[test]
fn test_mirrored_position_has_zero_difference_features() {
    let state = mirrored_state();
    let features = extract_features(&state, TeamColor::Red);

    for (index, value) in features.iter().enumerate().take(25) {
        assert!(
            value.abs() < 1e-9,
            "feature {} ({}) should vanish on a mirrored position, got {}",
            index,
            FEATURE_NAMES[index],
            value
        );
    }
    assert_eq!(features[25], 1.0, "red is to move");
}

#[test]
fn test_features_are_antisymmetric_in_perspective() {
    let state = mirrored_state();
    let red = extract_features(&state, TeamColor::Red);
    let blue = extract_features(&state, TeamColor::Blue);

    // All difference features flip sign; the shared game-phase feature does not.
    for index in 0..26 {
        assert!(
            (red[index] + blue[index]).abs() < 1e-9,
            "feature {} ({}) is not antisymmetric",
            index,
            FEATURE_NAMES[index]
        );
    }
    assert_eq!(red[26], blue[26]);
}

#[test]
fn test_captures_move_the_rank_balance() {
    let mut state = mirrored_state();
    // Remove one blue scout as if captured.
    let scout = state
        .blue_pieces
        .iter()
        .position(|p| p.rank == Rank::Scout)
        .unwrap();
    let captured = state.blue_pieces.remove(scout);
    state.blue_captured.push(captured);

    let features = extract_features(&state, TeamColor::Red);
    assert!(
        features[Rank::Scout.strength() as usize] > 0.0,
        "red should be up a scout"
    );
    assert!(features[12] > 0.0, "material balance should favor red");
    assert!(features[14] > 0.0, "scout balance should favor red");
}

#[test]
fn test_game_phase_saturates() {
    assert!(game_phase(1) < -0.7, "opening phase is strongly negative");
    assert!(game_phase(42).abs() < 1e-9, "midpoint is zero");
    assert!(game_phase(200) > 0.99, "long games saturate toward 1");
    assert!(game_phase(200) <= 1.0);
}

#[test]
fn test_hidden_high_ranks_count_toward_material() {
    let mut state = mirrored_state();
    let features_hidden = extract_features(&state, TeamColor::Red);

    // Revealing red's marshal forfeits its concealment bonus.
    for piece in &mut state.red_pieces {
        if piece.rank == Rank::Marshal {
            piece.revealed = true;
        }
    }
    let features_revealed = extract_features(&state, TeamColor::Red);

    assert!(
        features_revealed[12] < features_hidden[12],
        "revealing a high rank must lower the material balance"
    );
    assert!(
        features_revealed[19] < features_hidden[19],
        "hidden high-rank balance must drop"
    );
    assert!(
        features_revealed[18] > features_hidden[18],
        "revealed ratio balance must rise"
    );
}
