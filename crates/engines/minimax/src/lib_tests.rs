use super::*;
use neural_eval::ModelHandle;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stratego_core::{
    generate_setup, Difficulty, Engine, GameState, GameStatus, SetupMode, TeamColor,
};

fn started_game(seed: u64) -> GameState {
    let mut rng = StdRng::seed_from_u64(seed);
    let player = generate_setup(TeamColor::Red, SetupMode::Random, &mut rng);
    GameState::start(player, Difficulty::Medium, &mut rng).unwrap()
}

#[test]
fn test_choose_move_returns_a_legal_move_from_the_start() {
    let state = started_game(1);
    let model = ModelHandle::zeroed();
    let mut rng = StdRng::seed_from_u64(2);

    let mv = choose_move(&state, TeamColor::Red, Difficulty::Medium, &model, &mut rng)
        .expect("red has moves at the start");
    let request = stratego_core::MoveRequest {
        piece_id: mv.piece,
        to_row: mv.to_row,
        to_col: mv.to_col,
    };
    assert!(state.apply_move(TeamColor::Red, &request).is_ok());
}

#[test]
fn test_choose_move_is_none_when_game_is_over() {
    let mut state = started_game(3);
    state.status = GameStatus::Finished;
    let model = ModelHandle::zeroed();
    let mut rng = StdRng::seed_from_u64(4);
    assert!(choose_move(&state, TeamColor::Red, Difficulty::Hard, &model, &mut rng).is_none());
}

#[test]
fn test_choose_move_is_none_out_of_turn() {
    let state = started_game(5);
    let model = ModelHandle::zeroed();
    let mut rng = StdRng::seed_from_u64(6);
    assert!(choose_move(&state, TeamColor::Blue, Difficulty::Hard, &model, &mut rng).is_none());
}

#[test]
fn test_identical_seeds_give_identical_decisions() {
    let state = started_game(7);
    let model = ModelHandle::zeroed();

    for difficulty in [Difficulty::Medium, Difficulty::Hard, Difficulty::Extreme] {
        let first = choose_move(
            &state,
            TeamColor::Red,
            difficulty,
            &model,
            &mut StdRng::seed_from_u64(99),
        );
        let second = choose_move(
            &state,
            TeamColor::Red,
            difficulty,
            &model,
            &mut StdRng::seed_from_u64(99),
        );
        assert_eq!(first, second, "{:?} decision must be seed-deterministic", difficulty);
    }
}

#[test]
fn test_engine_trait_reports_stats() {
    let state = started_game(8);
    let mut engine = MinimaxEngine::seeded(Difficulty::Medium, ModelHandle::zeroed(), 11);

    let result = engine.choose_move(&state, TeamColor::Red);
    assert!(result.best_move.is_some());
    assert!(result.nodes > 0);
    assert!(engine.name().starts_with("Minimax"));
}
