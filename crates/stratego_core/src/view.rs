//! Client-facing projection of a game state.
//!
//! This is the hidden-information boundary: any serialization sent to a
//! client must pass through here so unrevealed opponent ranks leave the
//! process as `-1`, never as real values.

use serde::{Deserialize, Serialize};

use crate::state::GameState;
use crate::types::{
    CombatResult, GameStatus, HistoryEntry, Piece, PieceId, TeamColor, WinReason,
};

pub const UNKNOWN_RANK: i8 = -1;

/// An opponent piece as the viewer may see it: the rank is `-1` until the
/// piece is revealed or the game ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicPiece {
    pub id: PieceId,
    pub rank: i8,
    pub row: u8,
    pub col: u8,
    pub revealed: bool,
}

/// A history entry with opponent ranks redacted for quiet moves. Combat
/// reveals both ranks, so combat entries keep them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHistoryEntry {
    pub turn: u32,
    pub color: TeamColor,
    pub piece: PieceId,
    pub from_row: u8,
    pub from_col: u8,
    pub to_row: u8,
    pub to_col: u8,
    pub combat_result: Option<CombatResult>,
    pub attacker_rank: i8,
    pub defender_rank: Option<i8>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublicGameState {
    pub status: GameStatus,
    pub viewer: TeamColor,
    pub current_turn: TeamColor,
    pub turn_number: u32,
    pub my_pieces: Vec<Piece>,
    pub opponent_pieces: Vec<PublicPiece>,
    pub my_captured: Vec<Piece>,
    pub opponent_captured: Vec<Piece>,
    pub move_history: Vec<PublicHistoryEntry>,
    pub winner: Option<TeamColor>,
    pub win_reason: Option<WinReason>,
}

/// Projects the state for one side. Opponent ranks are exposed only when the
/// piece has been revealed by combat or the game is finished; captured
/// pieces are public knowledge on both sides.
pub fn to_public_view(state: &GameState, viewer: TeamColor) -> PublicGameState {
    let finished = state.status == GameStatus::Finished;
    let opponent = viewer.other();

    let opponent_pieces = state
        .pieces(opponent)
        .iter()
        .map(|piece| PublicPiece {
            id: piece.id,
            rank: if finished || piece.revealed {
                piece.rank.strength() as i8
            } else {
                UNKNOWN_RANK
            },
            row: piece.row,
            col: piece.col,
            revealed: finished || piece.revealed,
        })
        .collect();

    let move_history = state
        .move_history
        .iter()
        .map(|entry| redact_history_entry(entry, viewer, finished))
        .collect();

    PublicGameState {
        status: state.status,
        viewer,
        current_turn: state.current_turn,
        turn_number: state.turn_number,
        my_pieces: state.pieces(viewer).to_vec(),
        opponent_pieces,
        my_captured: state.captured(viewer).to_vec(),
        opponent_captured: state.captured(opponent).to_vec(),
        move_history,
        winner: state.winner,
        win_reason: state.win_reason,
    }
}

fn redact_history_entry(
    entry: &HistoryEntry,
    viewer: TeamColor,
    finished: bool,
) -> PublicHistoryEntry {
    // Combat exposes both ranks by rule; a quiet move by the opponent must
    // not leak the mover's rank.
    let attacker_visible = finished || entry.color == viewer || entry.combat_result.is_some();

    PublicHistoryEntry {
        turn: entry.turn,
        color: entry.color,
        piece: entry.piece,
        from_row: entry.from_row,
        from_col: entry.from_col,
        to_row: entry.to_row,
        to_col: entry.to_col,
        combat_result: entry.combat_result,
        attacker_rank: if attacker_visible {
            entry.attacker_rank.strength() as i8
        } else {
            UNKNOWN_RANK
        },
        defender_rank: entry
            .defender_rank
            .map(|rank| rank.strength() as i8),
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod view_tests;
