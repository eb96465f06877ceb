//! Board geometry and rule constants.
//!
//! The board is a fixed 8x8 grid addressed as `(x, y)` with `x` the column
//! and `y` the row. Row/column 0 and 7 form the border; the 4 corners are
//! never occupied. Cells 1..=6 on both axes form the 6x6 interior.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 8;

/// Index of the last row/column.
pub const LAST: usize = N - 1;

/// Total number of cells.
pub const BOARDSIZE: usize = N * N;

/// First interior row/column.
pub const INTERIOR_MIN: usize = 1;

/// Last interior row/column.
pub const INTERIOR_MAX: usize = N - 2;

/// Number of interior cells along one lane.
pub const LANE_LEN: usize = INTERIOR_MAX - INTERIOR_MIN + 1;

/// Number of non-corner border cells.
pub const RING_LEN: usize = 4 * (N - 2);

// =============================================================================
// Rules
// =============================================================================

/// Pieces each player starts with.
pub const PIECES_PER_COLOR: usize = RING_LEN / 2;

/// Longest allowed run of one color along the border ring at setup.
pub const MAX_RUN: usize = 2;

// =============================================================================
// Display
// =============================================================================

/// Symbol for the first player's pieces.
pub const SYMBOL_FIRST: char = 'X';

/// Symbol for the second player's pieces.
pub const SYMBOL_SECOND: char = 'O';

/// Symbol for an empty cell.
pub const SYMBOL_EMPTY: char = '.';

// =============================================================================
// Front End
// =============================================================================

/// How many times the binary reruns the placement search before giving up.
pub const PLACEMENT_ATTEMPTS: usize = 8;
