use crate::board::{BoardIndex, Probe, BOARD_SIZE, DIRECTIONS};
use crate::state::GameState;
use crate::types::{Move, Piece, Rank, TeamColor};

/// Generate every legal move for `color`, in no particular order.
///
/// An empty result means the side has no legal move, which is a terminal
/// condition handled by move application.
pub fn generate_moves(state: &GameState, color: TeamColor) -> Vec<Move> {
    let mine = state.pieces(color);
    let theirs = state.pieces(color.other());
    let index = BoardIndex::from_sides(state.pieces(TeamColor::Red), state.pieces(TeamColor::Blue));

    let mut out = Vec::with_capacity(64);
    for piece in mine {
        if !piece.rank.is_movable() {
            continue;
        }
        if piece.rank == Rank::Scout {
            gen_scout(piece, color, theirs, &index, &mut out);
        } else {
            gen_step(piece, color, theirs, &index, &mut out);
        }
    }
    out
}

/// True when `color` has at least one legal move.
pub fn has_any_moves(state: &GameState, color: TeamColor) -> bool {
    !generate_moves(state, color).is_empty()
}

/// Scout: slides any distance along a rank or file until blocked by the
/// board edge, a lake, or a piece. An opposing piece yields one attacking
/// move onto its cell and ends that direction's scan.
fn gen_scout(
    piece: &Piece,
    color: TeamColor,
    theirs: &[Piece],
    index: &BoardIndex,
    out: &mut Vec<Move>,
) {
    for (dr, dc) in DIRECTIONS {
        for distance in 1..BOARD_SIZE as i8 {
            let row = piece.row as i8 + dr * distance;
            let col = piece.col as i8 + dc * distance;
            match index.probe(row, col) {
                Probe::OffBoard | Probe::Lake => break,
                Probe::Occupied { color: occupant, .. } if occupant == color => break,
                Probe::Occupied { index: defender, .. } => {
                    out.push(make_move(piece, row as u8, col as u8, Some(theirs[defender].rank)));
                    break;
                }
                Probe::Empty => {
                    out.push(make_move(piece, row as u8, col as u8, None));
                }
            }
        }
    }
}

/// All other movable ranks: one orthogonal step onto an empty cell or an
/// adjacent opposing piece.
fn gen_step(
    piece: &Piece,
    color: TeamColor,
    theirs: &[Piece],
    index: &BoardIndex,
    out: &mut Vec<Move>,
) {
    for (dr, dc) in DIRECTIONS {
        let row = piece.row as i8 + dr;
        let col = piece.col as i8 + dc;
        match index.probe(row, col) {
            Probe::OffBoard | Probe::Lake => {}
            Probe::Occupied { color: occupant, .. } if occupant == color => {}
            Probe::Occupied { index: defender, .. } => {
                out.push(make_move(piece, row as u8, col as u8, Some(theirs[defender].rank)));
            }
            Probe::Empty => {
                out.push(make_move(piece, row as u8, col as u8, None));
            }
        }
    }
}

fn make_move(piece: &Piece, to_row: u8, to_col: u8, defender_rank: Option<Rank>) -> Move {
    Move {
        piece: piece.id,
        from_row: piece.row,
        from_col: piece.col,
        to_row,
        to_col,
        attacker_rank: piece.rank,
        defender_rank,
        is_attack: defender_rank.is_some(),
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
