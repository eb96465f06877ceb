//! Mabula: rule engine for a two-player border-push board game.
//!
//! Each player starts with 12 pieces on the 24 non-corner border cells of an
//! 8x8 board, arranged at random so that no three of one color sit next to
//! each other around the ring. Players take turns sliding one of their border
//! pieces into the 6x6 interior, pushing the pieces ahead of it, until
//! neither can move. The score is the size of a player's biggest connected
//! group, or the product of all their group sizes.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and rule constants
//! - [`board`] - Cells, pieces and the border ring
//! - [`placement`] - Random initial border placement
//! - [`moves`] - Move legality and push execution
//! - [`score`] - Connected groups and scoring
//! - [`game`] - The game facade used by front ends
//! - [`session`] - Console game loop
//!
//! ## Example
//!
//! ```
//! use mabula::game::Game;
//!
//! let mut rng = fastrand::Rng::with_seed(1);
//! let mut game = Game::new_game(&mut rng).unwrap();
//!
//! // Slide the piece right of the top-left corner three cells down.
//! let piece = game.piece_at(1, 0).unwrap();
//! game.move_piece_to(piece, 1, 3).unwrap();
//! assert_eq!(game.piece_at(1, 3), Some(piece));
//!
//! let color = game.piece(piece).unwrap().color();
//! assert!(game.biggest_group(color) >= 1);
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod moves;
pub mod placement;
pub mod score;
pub mod session;
