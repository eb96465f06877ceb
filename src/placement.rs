//! Random initial placement along the border ring.
//!
//! The ring is filled cell by cell in clockwise order. At each cell a random
//! color is tried first and the other color second; a cell where neither
//! color fits sends the search back to the previous cell. The search state
//! is an explicit stack of placed colors, so there is no recursion.
//!
//! A color fits when:
//! - its player still has pieces left to place, and
//! - it does not complete a run of more than [`MAX_RUN`] same-colored
//!   pieces along the ring, including across the wraparound on the last cell.

use thiserror::Error;

use crate::board::{Board, BoardError, Color, border_ring};
use crate::constants::{MAX_RUN, PIECES_PER_COLOR, RING_LEN};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Every branch of the search was rejected.
    #[error("no border arrangement satisfies the placement rules ({backtracks} backtracks)")]
    Exhausted { backtracks: usize },
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// One placed cell of the search stack.
#[derive(Copy, Clone, Debug)]
struct Choice {
    color: Color,
    /// Whether `color` is already the second color tried at this cell.
    retried: bool,
}

/// Build a board with the full border filled and the interior empty.
pub fn place_border(rng: &mut fastrand::Rng) -> Result<Board, PlacementError> {
    let colors = search_ring(rng, RING_LEN, PIECES_PER_COLOR)?;
    debug_assert!(max_cyclic_run(&colors) <= MAX_RUN);

    let mut board = Board::new();
    for (&(x, y), &color) in border_ring().iter().zip(&colors) {
        board.add_piece(color, x, y)?;
    }
    Ok(board)
}

/// Find a cyclic color sequence of length `len` with at most `per_color`
/// of each color and no run longer than [`MAX_RUN`].
pub fn search_ring(
    rng: &mut fastrand::Rng,
    len: usize,
    per_color: usize,
) -> Result<Vec<Color>, PlacementError> {
    let mut placed: Vec<Choice> = Vec::with_capacity(len);
    let mut counts = [0usize; 2];
    let mut candidate = Some(Choice {
        color: Color::random(rng),
        retried: false,
    });
    let mut backtracks = 0;

    while placed.len() < len {
        match candidate {
            Some(choice) => {
                if counts[choice.color.index()] < per_color && aligns(&placed, len, choice.color) {
                    counts[choice.color.index()] += 1;
                    placed.push(choice);
                    candidate = Some(Choice {
                        color: Color::random(rng),
                        retried: false,
                    });
                } else if !choice.retried {
                    candidate = Some(Choice {
                        color: choice.color.next(),
                        retried: true,
                    });
                } else {
                    candidate = None;
                }
            }
            None => {
                // Both colors failed at this cell: undo the previous one.
                backtracks += 1;
                let Some(prev) = placed.pop() else {
                    return Err(PlacementError::Exhausted { backtracks });
                };
                counts[prev.color.index()] -= 1;
                candidate = if prev.retried {
                    None
                } else {
                    Some(Choice {
                        color: prev.color.next(),
                        retried: true,
                    })
                };
            }
        }
    }

    Ok(placed.into_iter().map(|c| c.color).collect())
}

/// Whether `color` can go in the next cell without breaking the run limit.
fn aligns(placed: &[Choice], len: usize, color: Color) -> bool {
    let i = placed.len();
    let same = |k: usize| placed[k].color == color;

    if i >= MAX_RUN && (i - MAX_RUN..i).all(same) {
        return false;
    }
    // Closing the ring: the new cell neighbors the first cells too.
    if i + 1 == len && len > MAX_RUN {
        let mut run = 1;
        let mut k = i;
        while k > 0 && same(k - 1) {
            run += 1;
            k -= 1;
        }
        let mut k = 0;
        while k < i && same(k) {
            run += 1;
            k += 1;
        }
        if run > MAX_RUN {
            return false;
        }
    }
    true
}

/// Longest run of one color in a cyclic sequence.
pub fn max_cyclic_run(colors: &[Color]) -> usize {
    let n = colors.len();
    if n == 0 {
        return 0;
    }
    if colors.iter().all(|&c| c == colors[0]) {
        return n;
    }
    // Start right after a color change so no run is split by the wrap.
    let start = (0..n)
        .find(|&i| colors[i] != colors[(i + n - 1) % n])
        .unwrap_or(0);
    let mut best = 0;
    let mut run = 0;
    for k in 0..n {
        let i = (start + k) % n;
        if k > 0 && colors[i] == colors[(i + n - 1) % n] {
            run += 1;
        } else {
            run = 1;
        }
        best = best.max(run);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::is_on_border;
    use crate::constants::N;

    #[test]
    fn test_place_border_fills_ring() {
        let mut rng = fastrand::Rng::with_seed(7);
        let board = place_border(&mut rng).unwrap();
        assert_eq!(board.piece_count(), RING_LEN);
        for y in 0..N {
            for x in 0..N {
                assert_eq!(board.at(x, y).is_some(), is_on_border(x, y), "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_search_ring_respects_rules_for_many_seeds() {
        for seed in 0..200 {
            let mut rng = fastrand::Rng::with_seed(seed);
            let colors = search_ring(&mut rng, RING_LEN, PIECES_PER_COLOR).unwrap();
            assert_eq!(colors.len(), RING_LEN);
            let first = colors.iter().filter(|&&c| c == Color::First).count();
            assert_eq!(first, PIECES_PER_COLOR, "seed {seed}");
            assert!(max_cyclic_run(&colors) <= MAX_RUN, "seed {seed}: {colors:?}");
        }
    }

    #[test]
    fn test_search_ring_exhausts_when_counts_cannot_fit() {
        let mut rng = fastrand::Rng::with_seed(1);
        let err = search_ring(&mut rng, 5, 2).unwrap_err();
        assert!(matches!(err, PlacementError::Exhausted { .. }));
    }

    #[test]
    fn test_aligns_checks_wraparound() {
        use Color::{First as F, Second as S};
        let placed: Vec<Choice> = [F, S, S, F, S, F]
            .iter()
            .map(|&color| Choice {
                color,
                retried: false,
            })
            .collect();
        // Last of 7: F would join the trailing F and the leading F.
        assert!(!aligns(&placed, 7, F));
        assert!(aligns(&placed, 8, F));
        assert!(aligns(&placed, 7, S));
    }

    #[test]
    fn test_max_cyclic_run() {
        use Color::{First as F, Second as S};
        assert_eq!(max_cyclic_run(&[]), 0);
        assert_eq!(max_cyclic_run(&[F, F, F]), 3);
        assert_eq!(max_cyclic_run(&[F, S, S, F]), 2);
        assert_eq!(max_cyclic_run(&[F, S, F, F]), 3);
        assert_eq!(max_cyclic_run(&[F, F, S, S, S, F]), 3);
    }
}
