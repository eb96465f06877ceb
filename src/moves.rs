//! Move legality and push execution.
//!
//! A piece on the border can only move straight into the interior, along the
//! row or column perpendicular to its edge. That line of 6 interior cells is
//! a [`Lane`], indexed by distance from the piece (1 = the cell next to it,
//! 6 = the cell next to the opposite border).
//!
//! Moving to distance `d` pushes every piece on the lane ahead of the mover:
//! walking the lane from the source side, each piece lands at the larger of
//! its own distance and one past the previous piece. The move is legal only
//! if every pushed piece stays in the interior, which is exactly
//! `occupied <= LANE_LEN - d`.

use thiserror::Error;

use crate::board::{Board, PieceId, Point, is_interior, is_on_border};
use crate::constants::{LANE_LEN, LAST};

/// Why a move request was rejected. The board is never modified on error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no such piece")]
    UnknownPiece,
    #[error("piece is not on the border")]
    NotOnBorder,
    #[error("destination ({0}, {1}) is not in the interior on the piece's line")]
    OffLane(usize, usize),
    #[error("lane holds {occupied} pieces but only {capacity} fit ahead of the destination")]
    Blocked { occupied: usize, capacity: usize },
}

/// The interior cells in front of a border cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Lane {
    source: Point,
}

impl Lane {
    /// The lane entered from `source`, if it is a border cell.
    pub fn from_border(source: Point) -> Option<Lane> {
        is_on_border(source.0, source.1).then_some(Lane { source })
    }

    pub fn source(&self) -> Point {
        self.source
    }

    /// The cell at distance `d` (1..=6) from the source.
    pub fn cell(&self, d: usize) -> Point {
        debug_assert!((1..=LANE_LEN).contains(&d));
        let (x, y) = self.source;
        match (x, y) {
            (0, _) => (d, y),
            (LAST, _) => (LAST - d, y),
            (_, 0) => (x, d),
            _ => (x, LAST - d),
        }
    }

    /// Distance of an interior cell from the source, if it lies on this lane.
    pub fn distance_to(&self, target: Point) -> Option<usize> {
        let (tx, ty) = target;
        if !is_interior(tx, ty) {
            return None;
        }
        let (x, y) = self.source;
        match (x, y) {
            (0, _) if ty == y => Some(tx),
            (LAST, _) if ty == y => Some(LAST - tx),
            (_, 0) if tx == x => Some(ty),
            (_, LAST) if tx == x => Some(LAST - ty),
            _ => None,
        }
    }

    /// Pieces on the lane, nearest to the source first, with their distance.
    pub fn occupants(&self, board: &Board) -> Vec<(PieceId, usize)> {
        (1..=LANE_LEN)
            .filter_map(|d| {
                let (x, y) = self.cell(d);
                board.at(x, y).map(|id| (id, d))
            })
            .collect()
    }

    /// Number of occupied interior cells.
    pub fn occupied(&self, board: &Board) -> usize {
        self.occupants(board).len()
    }
}

/// A validated move: the mover and where every moved piece lands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Push {
    pub lane: Lane,
    /// `(piece, destination)` pairs, mover first, then the pushed pieces
    /// in lane order.
    pub landings: Vec<(PieceId, Point)>,
}

fn lane_of(board: &Board, id: PieceId) -> Result<Lane, MoveError> {
    let piece = board.piece(id).ok_or(MoveError::UnknownPiece)?;
    Lane::from_border(piece.position()).ok_or(MoveError::NotOnBorder)
}

/// Whether the piece is on the border with at least one free cell in its lane.
pub fn can_piece_move(board: &Board, id: PieceId) -> bool {
    match lane_of(board, id) {
        Ok(lane) => lane.occupied(board) < LANE_LEN,
        Err(_) => false,
    }
}

/// Whether any piece of the given ids can move.
pub fn can_any_move(board: &Board, ids: &[PieceId]) -> bool {
    ids.iter().any(|&id| can_piece_move(board, id))
}

/// Validate a move and compute where every piece ends up.
pub fn plan_move(board: &Board, id: PieceId, target: Point) -> Result<Push, MoveError> {
    let lane = lane_of(board, id)?;
    let dest = lane
        .distance_to(target)
        .ok_or(MoveError::OffLane(target.0, target.1))?;

    let occupants = lane.occupants(board);
    let capacity = LANE_LEN - dest;
    if occupants.len() > capacity {
        return Err(MoveError::Blocked {
            occupied: occupants.len(),
            capacity,
        });
    }

    let mut landings = Vec::with_capacity(occupants.len() + 1);
    landings.push((id, lane.cell(dest)));
    let mut frontier = dest;
    for (other, d) in occupants {
        frontier = d.max(frontier + 1);
        landings.push((other, lane.cell(frontier)));
    }
    Ok(Push { lane, landings })
}

pub fn can_piece_move_to(board: &Board, id: PieceId, target: Point) -> bool {
    plan_move(board, id, target).is_ok()
}

/// Slide a border piece to `target`, pushing the lane ahead of it.
///
/// Leaves the board untouched when the move is illegal.
pub fn move_piece_to(board: &mut Board, id: PieceId, target: Point) -> Result<(), MoveError> {
    let push = plan_move(board, id, target)?;
    // Farthest first: each landing cell is vacated before it is written.
    for &(piece, to) in push.landings.iter().rev() {
        board.relocate(piece, to);
    }
    Ok(())
}
