use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combat::resolve_combat;
use crate::movegen::{generate_moves, has_any_moves};
use crate::setup::{generate_setup, validate_setup, SetupMode};
use crate::types::{
    CombatResult, Difficulty, GameStatus, HistoryEntry, Move, Piece, PieceId, Rank, TeamColor,
    WinReason,
};

/// Errors returned when a caller misuses the game API. Gameplay outcomes
/// (no legal moves, flag capture) are never errors.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("illegal move: piece {piece:?} to ({to_row}, {to_col}) is not currently legal")]
    IllegalMove {
        piece: PieceId,
        to_row: u8,
        to_col: u8,
    },
    #[error("game is not in the playing phase")]
    NotPlaying,
    #[error("{0:?} attempted to move out of turn")]
    OutOfTurn(TeamColor),
    #[error("invalid setup: {0}")]
    InvalidSetup(String),
}

/// The move a client asks to apply. Resolved against the current legal move
/// list before anything is mutated.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MoveRequest {
    pub piece_id: PieceId,
    pub to_row: u8,
    pub to_col: u8,
}

/// Outcome of a successful move application. `state` is a fresh value; the
/// state the move was applied to is left untouched.
#[derive(Clone, Debug)]
pub struct AppliedMove {
    pub state: GameState,
    pub combat_result: Option<CombatResult>,
    pub attacker_rank: Rank,
    pub defender_rank: Option<Rank>,
    pub game_over: bool,
    pub winner: Option<TeamColor>,
    pub win_reason: Option<WinReason>,
}

/// Full game state. Each side's captured list holds that side's own fallen
/// pieces, so `red_pieces.len() + red_captured.len() == 40` at all times
/// once the game has started (and likewise for blue).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    pub current_turn: TeamColor,
    pub turn_number: u32,
    pub red_pieces: Vec<Piece>,
    pub blue_pieces: Vec<Piece>,
    pub red_captured: Vec<Piece>,
    pub blue_captured: Vec<Piece>,
    pub move_history: Vec<HistoryEntry>,
    pub winner: Option<TeamColor>,
    pub win_reason: Option<WinReason>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// An empty game awaiting both placements.
    pub fn new() -> Self {
        GameState {
            status: GameStatus::Setup,
            current_turn: TeamColor::Red,
            turn_number: 0,
            red_pieces: Vec::new(),
            blue_pieces: Vec::new(),
            red_captured: Vec::new(),
            blue_captured: Vec::new(),
            move_history: Vec::new(),
            winner: None,
            win_reason: None,
        }
    }

    /// Starts a game against the engine: validates the player's 40-piece
    /// placement (red side), generates the opponent setup for the difficulty
    /// tier, and enters the playing phase on red's turn.
    pub fn start(
        player_setup: Vec<Piece>,
        difficulty: Difficulty,
        rng: &mut impl Rng,
    ) -> Result<GameState, RulesError> {
        validate_setup(&player_setup, TeamColor::Red).map_err(RulesError::InvalidSetup)?;

        let mode = SetupMode::for_difficulty(difficulty, rng);
        let blue_pieces = generate_setup(TeamColor::Blue, mode, rng);

        Ok(GameState {
            status: GameStatus::Playing,
            current_turn: TeamColor::Red,
            turn_number: 1,
            red_pieces: player_setup,
            blue_pieces,
            red_captured: Vec::new(),
            blue_captured: Vec::new(),
            move_history: Vec::new(),
            winner: None,
            win_reason: None,
        })
    }

    pub fn pieces(&self, color: TeamColor) -> &[Piece] {
        match color {
            TeamColor::Red => &self.red_pieces,
            TeamColor::Blue => &self.blue_pieces,
        }
    }

    pub fn captured(&self, color: TeamColor) -> &[Piece] {
        match color {
            TeamColor::Red => &self.red_captured,
            TeamColor::Blue => &self.blue_captured,
        }
    }

    pub fn flag(&self, color: TeamColor) -> Option<&Piece> {
        self.pieces(color).iter().find(|p| p.rank == Rank::Flag)
    }

    /// Applies a client-requested move. The request is re-validated against
    /// the current legal move list, which defends against stale or forged
    /// input; a request that no longer matches fails with `IllegalMove` and
    /// leaves the state untouched.
    pub fn apply_move(
        &self,
        color: TeamColor,
        request: &MoveRequest,
    ) -> Result<AppliedMove, RulesError> {
        if self.status != GameStatus::Playing {
            return Err(RulesError::NotPlaying);
        }
        if self.current_turn != color {
            return Err(RulesError::OutOfTurn(color));
        }

        let selected = generate_moves(self, color)
            .into_iter()
            .find(|candidate| {
                candidate.piece == request.piece_id
                    && candidate.to_row == request.to_row
                    && candidate.to_col == request.to_col
            })
            .ok_or(RulesError::IllegalMove {
                piece: request.piece_id,
                to_row: request.to_row,
                to_col: request.to_col,
            })?;

        Ok(self.apply_move_unchecked(color, &selected))
    }

    /// Applies a move known to be legal (drawn from `generate_moves` on this
    /// exact state). Used by the search on its own candidate moves, skipping
    /// re-validation. Passing anything else is a programming error.
    pub fn apply_move_unchecked(&self, color: TeamColor, mv: &Move) -> AppliedMove {
        let mut mine: Vec<Piece> = self.pieces(color).to_vec();
        let mut theirs: Vec<Piece> = self.pieces(color.other()).to_vec();

        let attacker_index = mine
            .iter()
            .position(|p| p.id == mv.piece)
            .expect("moving piece not found in its side's piece list");
        let defender_index = theirs
            .iter()
            .position(|p| p.row == mv.to_row && p.col == mv.to_col);

        let mut red_captured = self.red_captured.clone();
        let mut blue_captured = self.blue_captured.clone();

        let mut combat_result = None;
        let mut defender_rank = None;
        let mut game_over = false;
        let mut winner = None;
        let mut win_reason = None;

        if let Some(defender_index) = defender_index {
            let attacker = mine[attacker_index];
            let defender = theirs[defender_index];
            defender_rank = Some(defender.rank);

            let result = resolve_combat(attacker.rank, defender.rank);
            combat_result = Some(result);

            if defender.rank == Rank::Flag && result == CombatResult::AttackerWins {
                game_over = true;
                winner = Some(color);
                win_reason = Some(WinReason::FlagCaptured);
            }

            match result {
                CombatResult::AttackerWins => {
                    mine[attacker_index] = Piece {
                        row: mv.to_row,
                        col: mv.to_col,
                        revealed: true,
                        ..attacker
                    };
                    theirs.remove(defender_index);
                    match color.other() {
                        TeamColor::Red => red_captured.push(defender),
                        TeamColor::Blue => blue_captured.push(defender),
                    }
                }
                CombatResult::DefenderWins => {
                    mine.remove(attacker_index);
                    theirs[defender_index] = Piece {
                        revealed: true,
                        ..defender
                    };
                    match color {
                        TeamColor::Red => red_captured.push(attacker),
                        TeamColor::Blue => blue_captured.push(attacker),
                    }
                }
                CombatResult::BothDie => {
                    mine.remove(attacker_index);
                    theirs.remove(defender_index);
                    match color {
                        TeamColor::Red => {
                            red_captured.push(attacker);
                            blue_captured.push(defender);
                        }
                        TeamColor::Blue => {
                            blue_captured.push(attacker);
                            red_captured.push(defender);
                        }
                    }
                }
            }
        } else {
            let attacker = mine[attacker_index];
            mine[attacker_index] = Piece {
                row: mv.to_row,
                col: mv.to_col,
                ..attacker
            };
        }

        let (red_pieces, blue_pieces) = match color {
            TeamColor::Red => (mine, theirs),
            TeamColor::Blue => (theirs, mine),
        };

        let mut move_history = self.move_history.clone();
        move_history.push(HistoryEntry {
            turn: self.turn_number,
            color,
            piece: mv.piece,
            from_row: mv.from_row,
            from_col: mv.from_col,
            to_row: mv.to_row,
            to_col: mv.to_col,
            combat_result,
            attacker_rank: mv.attacker_rank,
            defender_rank,
        });

        let mut next = GameState {
            status: GameStatus::Playing,
            current_turn: self.current_turn,
            turn_number: self.turn_number,
            red_pieces,
            blue_pieces,
            red_captured,
            blue_captured,
            move_history,
            winner: None,
            win_reason: None,
        };

        // A side left without any legal move loses on the spot.
        if !game_over && !has_any_moves(&next, color.other()) {
            game_over = true;
            winner = Some(color);
            win_reason = Some(WinReason::NoMoves);
        }

        if game_over {
            next.status = GameStatus::Finished;
            next.current_turn = color;
            next.winner = winner;
            next.win_reason = win_reason;
        } else {
            next.current_turn = color.other();
            next.turn_number = self.turn_number + 1;
        }

        AppliedMove {
            state: next,
            combat_result,
            attacker_rank: mv.attacker_rank,
            defender_rank,
            game_over,
            winner,
            win_reason,
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
