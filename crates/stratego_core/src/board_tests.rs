use super::*;
use crate::types::{Piece, PieceId, Rank, TeamColor};

fn piece(id: u16, rank: Rank, row: u8, col: u8) -> Piece {
    Piece {
        id: PieceId(id),
        rank,
        row,
        col,
        revealed: false,
    }
}

#[test]
fn test_lake_cells_form_two_blocks() {
    assert_eq!(LAKE_CELLS.len(), 8);
    for &(row, col) in &LAKE_CELLS {
        assert!(is_lake(row, col));
    }
    assert!(!is_lake(4, 4));
    assert!(!is_lake(0, 0));
}

#[test]
fn test_probe_distinguishes_all_cell_kinds() {
    let red = vec![piece(0, Rank::Scout, 6, 0)];
    let blue = vec![piece(0, Rank::Miner, 3, 0)];
    let index = BoardIndex::from_sides(&red, &blue);

    assert_eq!(index.probe(-1, 0), Probe::OffBoard);
    assert_eq!(index.probe(0, 10), Probe::OffBoard);
    assert_eq!(index.probe(4, 2), Probe::Lake);
    assert_eq!(index.probe(5, 5), Probe::Empty);
    assert_eq!(
        index.probe(6, 0),
        Probe::Occupied {
            color: TeamColor::Red,
            index: 0
        }
    );
    assert_eq!(
        index.probe(3, 0),
        Probe::Occupied {
            color: TeamColor::Blue,
            index: 0
        }
    );
}

#[test]
fn test_forward_progress_is_mirrored() {
    assert_eq!(forward_progress(TeamColor::Red, 9), 0);
    assert_eq!(forward_progress(TeamColor::Red, 0), 9);
    assert_eq!(forward_progress(TeamColor::Blue, 0), 0);
    assert_eq!(forward_progress(TeamColor::Blue, 9), 9);
}

#[test]
fn test_home_rows_cover_forty_cells_each() {
    for color in [TeamColor::Red, TeamColor::Blue] {
        let (min, max) = home_rows(color);
        assert_eq!((max - min + 1) as usize * BOARD_SIZE as usize, 40);
    }
}
