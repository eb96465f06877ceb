//! Connected groups and end-of-game scoring.
//!
//! A group is a maximal set of same-colored pieces linked by orthogonal
//! adjacency anywhere on the board. Both scoring methods share one visited
//! set per call, so each group is measured once no matter how many of its
//! members are iterated.

use std::cmp::Ordering;
use std::fmt;

use crate::board::{Board, Color, PieceId};

/// How final scores are computed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Scoring {
    /// Size of the largest group.
    #[default]
    Largest,
    /// Product of all group sizes.
    Product,
}

impl fmt::Display for Scoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scoring::Largest => write!(f, "largest group"),
            Scoring::Product => write!(f, "product of groups"),
        }
    }
}

/// Result of comparing the two final scores.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(Color),
    Draw,
}

impl Outcome {
    pub fn from_scores(first: usize, second: usize) -> Outcome {
        match first.cmp(&second) {
            Ordering::Greater => Outcome::Winner(Color::First),
            Ordering::Less => Outcome::Winner(Color::Second),
            Ordering::Equal => Outcome::Draw,
        }
    }
}

/// Size of the group containing `start`, marking its members in `visited`.
///
/// `visited` is indexed by piece handle and must cover every piece on the
/// board. Returns 0 if `start` was already visited.
pub fn group(board: &Board, start: PieceId, visited: &mut [bool]) -> usize {
    let Some(color) = board.piece(start).map(|p| p.color()) else {
        return 0;
    };
    let mut stack = vec![start];
    let mut count = 0;

    while let Some(id) = stack.pop() {
        if visited[id.index()] {
            continue;
        }
        visited[id.index()] = true;
        count += 1;

        let Some((x, y)) = board.piece(id).map(|p| p.position()) else {
            continue;
        };
        for (nx, ny) in Board::neighbors(x, y) {
            if let Some(n) = board.at(nx, ny) {
                if !visited[n.index()] && board.color_at(nx, ny) == Some(color) {
                    stack.push(n);
                }
            }
        }
    }
    count
}

/// Sizes of every group formed by `pieces`, in discovery order.
pub fn group_sizes(board: &Board, pieces: &[PieceId]) -> Vec<usize> {
    let mut visited = vec![false; board.piece_count()];
    pieces
        .iter()
        .filter_map(|&id| match group(board, id, &mut visited) {
            0 => None,
            size => Some(size),
        })
        .collect()
}

/// Size of the largest group, 0 when there are no pieces.
pub fn biggest_group(board: &Board, pieces: &[PieceId]) -> usize {
    group_sizes(board, pieces).into_iter().max().unwrap_or(0)
}

/// Product of the group sizes, 0 when there are no pieces.
pub fn mult_group(board: &Board, pieces: &[PieceId]) -> usize {
    let sizes = group_sizes(board, pieces);
    if sizes.is_empty() {
        return 0;
    }
    sizes.into_iter().product()
}

pub fn score(board: &Board, pieces: &[PieceId], scoring: Scoring) -> usize {
    match scoring {
        Scoring::Largest => biggest_group(board, pieces),
        Scoring::Product => mult_group(board, pieces),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, color: Color, cells: &[(usize, usize)]) -> Vec<PieceId> {
        cells
            .iter()
            .map(|&(x, y)| board.add_piece(color, x, y).unwrap())
            .collect()
    }

    #[test]
    fn test_single_piece_group() {
        let mut board = Board::new();
        let ids = place(&mut board, Color::First, &[(3, 3)]);
        let mut visited = vec![false; board.piece_count()];
        assert_eq!(group(&board, ids[0], &mut visited), 1);
        assert_eq!(group(&board, ids[0], &mut visited), 0);
    }

    #[test]
    fn test_group_stops_at_other_color() {
        let mut board = Board::new();
        let first = place(&mut board, Color::First, &[(2, 2), (4, 2)]);
        place(&mut board, Color::Second, &[(3, 2)]);
        assert_eq!(group_sizes(&board, &first), vec![1, 1]);
    }

    #[test]
    fn test_eye_terminates() {
        let mut board = Board::new();
        let ids = place(&mut board, Color::Second, &[(2, 2), (3, 2), (3, 3), (2, 3)]);
        let mut visited = vec![false; board.piece_count()];
        assert_eq!(group(&board, ids[2], &mut visited), 4);
    }

    #[test]
    fn test_border_pieces_join_groups() {
        let mut board = Board::new();
        let ids = place(&mut board, Color::First, &[(0, 3), (1, 3), (0, 4)]);
        assert_eq!(biggest_group(&board, &ids), 3);
    }

    #[test]
    fn test_empty_color_scores_zero() {
        let board = Board::new();
        assert_eq!(biggest_group(&board, &[]), 0);
        assert_eq!(mult_group(&board, &[]), 0);
    }

    #[test]
    fn test_product_counts_each_group_once() {
        let mut board = Board::new();
        let ids = place(
            &mut board,
            Color::First,
            &[(1, 1), (1, 2), (4, 4), (5, 4), (4, 5), (6, 1)],
        );
        assert_eq!(mult_group(&board, &ids), 2 * 3);
        assert_eq!(score(&board, &ids, Scoring::Largest), 3);
        assert_eq!(score(&board, &ids, Scoring::Product), 6);
    }

    #[test]
    fn test_outcome_from_scores() {
        assert_eq!(Outcome::from_scores(5, 3), Outcome::Winner(Color::First));
        assert_eq!(Outcome::from_scores(2, 3), Outcome::Winner(Color::Second));
        assert_eq!(Outcome::from_scores(4, 4), Outcome::Draw);
    }
}
