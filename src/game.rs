//! The game state and the calls a front end makes into the engine.

use crate::board::{Board, Color, Piece, PieceId, Point, is_on_border};
use crate::constants::LANE_LEN;
use crate::moves::{self, Lane, MoveError};
use crate::placement::{PlacementError, place_border};
use crate::score::{self, Outcome, Scoring};

/// A board plus the fixed set of pieces owned by each player.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    by_color: [Vec<PieceId>; 2],
}

impl Game {
    /// Start a game with a random legal border arrangement.
    pub fn new_game(rng: &mut fastrand::Rng) -> Result<Self, PlacementError> {
        Ok(Self::from_board(place_border(rng)?))
    }

    /// Wrap an existing board. Ownership follows each piece's color.
    pub fn from_board(board: Board) -> Self {
        let mut by_color: [Vec<PieceId>; 2] = Default::default();
        for (id, piece) in board.pieces() {
            by_color[piece.color().index()].push(id);
        }
        Self { board, by_color }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_on_border(&self, x: usize, y: usize) -> bool {
        is_on_border(x, y)
    }

    pub fn piece_at(&self, x: usize, y: usize) -> Option<PieceId> {
        self.board.at(x, y)
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.board.piece(id)
    }

    pub fn pieces_of(&self, color: Color) -> &[PieceId] {
        &self.by_color[color.index()]
    }

    pub fn can_player_move(&self, color: Color) -> bool {
        moves::can_any_move(&self.board, self.pieces_of(color))
    }

    /// The game ends when neither player has a legal move.
    pub fn is_over(&self) -> bool {
        Color::ALL.iter().all(|&c| !self.can_player_move(c))
    }

    pub fn can_piece_move(&self, id: PieceId) -> bool {
        moves::can_piece_move(&self.board, id)
    }

    pub fn can_piece_move_to(&self, id: PieceId, x: usize, y: usize) -> bool {
        moves::can_piece_move_to(&self.board, id, (x, y))
    }

    pub fn move_piece_to(&mut self, id: PieceId, x: usize, y: usize) -> Result<(), MoveError> {
        moves::move_piece_to(&mut self.board, id, (x, y))
    }

    /// Every legal `(piece, target)` pair for a player.
    pub fn legal_moves(&self, color: Color) -> Vec<(PieceId, Point)> {
        let mut out = Vec::new();
        for &id in self.pieces_of(color) {
            let Some(lane) = self.piece(id).and_then(|p| Lane::from_border(p.position())) else {
                continue;
            };
            for d in 1..=LANE_LEN {
                let target = lane.cell(d);
                if moves::can_piece_move_to(&self.board, id, target) {
                    out.push((id, target));
                }
            }
        }
        out
    }

    pub fn biggest_group(&self, color: Color) -> usize {
        score::biggest_group(&self.board, self.pieces_of(color))
    }

    pub fn mult_group(&self, color: Color) -> usize {
        score::mult_group(&self.board, self.pieces_of(color))
    }

    pub fn score(&self, color: Color, scoring: Scoring) -> usize {
        score::score(&self.board, self.pieces_of(color), scoring)
    }

    pub fn outcome(&self, scoring: Scoring) -> Outcome {
        Outcome::from_scores(
            self.score(Color::First, scoring),
            self.score(Color::Second, scoring),
        )
    }
}
