//! Console game loop.
//!
//! The session owns one [`Game`] and talks to the players through any
//! `BufRead`/`Write` pair, so it runs the same on a terminal or on scripted
//! input in tests. It only ever calls into the engine through `Game`.
//!
//! ## Turn flow
//!
//! 1. Ask for the scoring method and the player names (unless preset).
//! 2. Pick the starting player at random (unless preset).
//! 3. Until neither player can move: the current player picks one of their
//!    border pieces (`x y`, both in 0..=7), then a destination in the
//!    interior (both in 1..=6). A player without a legal move is skipped.
//! 4. Print both scores and the winner.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::board::{Color, PieceId, is_on_border};
use crate::constants::{INTERIOR_MAX, INTERIOR_MIN, LAST};
use crate::game::Game;
use crate::moves::{MoveError, plan_move};
use crate::score::{Outcome, Scoring};

/// Why a typed coordinate was refused. The player is asked again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("Enter two numbers separated by a space.")]
    Unparsable,
    #[error("Coordinates must be between 0 and 7.")]
    OutOfBounds,
    #[error("This position is not on the border of the board.")]
    NotOnBorder,
    #[error("There is no piece at this position.")]
    EmptyCell,
    #[error("This piece does not belong to you.")]
    NotYours,
    #[error("This piece cannot be moved.")]
    Stuck,
    #[error("Pick a destination in the center of the board (1 to 6).")]
    OutsideInterior,
    #[error("The piece cannot be moved there: {0}.")]
    Move(#[from] MoveError),
}

/// Final scores of a finished session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub scoring: Scoring,
    /// Indexed by [`Color::index`].
    pub scores: [usize; 2],
    pub outcome: Outcome,
}

/// Parse `"x y"` (or `"x,y"`) into signed coordinates.
pub fn parse_point(line: &str) -> Result<(i64, i64), SelectError> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let x = parts.next().and_then(|s| s.parse().ok());
    let y = parts.next().and_then(|s| s.parse().ok());
    match (x, y, parts.next()) {
        (Some(x), Some(y), None) => Ok((x, y)),
        _ => Err(SelectError::Unparsable),
    }
}

fn in_range(v: i64, lo: usize, hi: usize) -> Option<usize> {
    usize::try_from(v).ok().filter(|v| (lo..=hi).contains(v))
}

/// Check that `(x, y)` holds a movable border piece of `color`.
pub fn select_piece(game: &Game, color: Color, x: i64, y: i64) -> Result<PieceId, SelectError> {
    let (Some(x), Some(y)) = (in_range(x, 0, LAST), in_range(y, 0, LAST)) else {
        return Err(SelectError::OutOfBounds);
    };
    if !is_on_border(x, y) {
        return Err(SelectError::NotOnBorder);
    }
    let id = game.piece_at(x, y).ok_or(SelectError::EmptyCell)?;
    if game.piece(id).map(|p| p.color()) != Some(color) {
        return Err(SelectError::NotYours);
    }
    if !game.can_piece_move(id) {
        return Err(SelectError::Stuck);
    }
    Ok(id)
}

/// Check that `(x, y)` is an interior cell the piece can be pushed to.
pub fn select_target(game: &Game, id: PieceId, x: i64, y: i64) -> Result<(usize, usize), SelectError> {
    let (Some(x), Some(y)) = (
        in_range(x, INTERIOR_MIN, INTERIOR_MAX),
        in_range(y, INTERIOR_MIN, INTERIOR_MAX),
    ) else {
        return Err(SelectError::OutsideInterior);
    };
    plan_move(game.board(), id, (x, y))?;
    Ok((x, y))
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> io::Result<String> {
    write!(out, "{text}")?;
    out.flush()?;
    read_line(input)
}

/// One interactive game.
pub struct Session {
    game: Game,
    rng: fastrand::Rng,
    scoring: Option<Scoring>,
    names: [Option<String>; 2],
    starting: Option<Color>,
}

impl Session {
    pub fn new(game: Game, rng: fastrand::Rng) -> Self {
        Self {
            game,
            rng,
            scoring: None,
            names: [None, None],
            starting: None,
        }
    }

    /// Skip the scoring prompt.
    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = Some(scoring);
        self
    }

    /// Skip the name prompt for one player.
    pub fn with_name(mut self, color: Color, name: impl Into<String>) -> Self {
        self.names[color.index()] = Some(name.into());
        self
    }

    /// Skip the random draw for who plays first.
    pub fn with_starting(mut self, color: Color) -> Self {
        self.starting = Some(color);
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Play the game to the end.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> io::Result<Report> {
        let scoring = match self.scoring {
            Some(s) => s,
            None => Self::ask_scoring(input, out)?,
        };
        let mut names: [String; 2] = Default::default();
        for color in Color::ALL {
            names[color.index()] = match &self.names[color.index()] {
                Some(name) => name.clone(),
                None => Self::ask_name(input, out, color)?,
            };
        }

        let mut current = match self.starting {
            Some(c) => c,
            None => Color::random(&mut self.rng),
        };

        write!(out, "{}", self.game.board())?;
        while !self.game.is_over() {
            let name = &names[current.index()];
            writeln!(out, "{name}'s turn ({})", current.symbol())?;

            if self.game.can_player_move(current) {
                let id = self.ask_piece(input, out, current)?;
                self.ask_target_and_move(input, out, id)?;
                write!(out, "{}", self.game.board())?;
            } else {
                writeln!(out, "{name} cannot move")?;
            }
            current = current.next();
        }

        let scores = Color::ALL.map(|c| self.game.score(c, scoring));
        let outcome = Outcome::from_scores(scores[0], scores[1]);
        writeln!(
            out,
            "{}: {} points / {}: {} points",
            names[0], scores[0], names[1], scores[1]
        )?;
        match outcome {
            Outcome::Winner(c) => writeln!(out, "{} wins", names[c.index()])?,
            Outcome::Draw => writeln!(out, "Draw!")?,
        }

        Ok(Report {
            scoring,
            scores,
            outcome,
        })
    }

    fn ask_scoring<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Scoring> {
        loop {
            writeln!(out, "Choose the scoring method:")?;
            writeln!(out, "0: size of the biggest group")?;
            writeln!(out, "1: product of the group sizes")?;
            match prompt(input, out, "> ")?.to_ascii_lowercase().as_str() {
                "" | "0" | "largest" => return Ok(Scoring::Largest),
                "1" | "product" => return Ok(Scoring::Product),
                _ => {}
            }
        }
    }

    fn ask_name<R: BufRead, W: Write>(input: &mut R, out: &mut W, color: Color) -> io::Result<String> {
        let line = prompt(input, out, &format!("Name of the {color} player ({}): ", color.symbol()))?;
        Ok(if line.is_empty() { color.to_string() } else { line })
    }

    fn ask_piece<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
        color: Color,
    ) -> io::Result<PieceId> {
        loop {
            let line = prompt(input, out, "Piece to move (x y): ")?;
            match parse_point(&line).and_then(|(x, y)| select_piece(&self.game, color, x, y)) {
                Ok(id) => return Ok(id),
                Err(e) => writeln!(out, "{e}")?,
            }
        }
    }

    fn ask_target_and_move<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
        id: PieceId,
    ) -> io::Result<()> {
        loop {
            let line = prompt(input, out, "Destination (x y): ")?;
            let checked = parse_point(&line).and_then(|(x, y)| select_target(&self.game, id, x, y));
            match checked.and_then(|(x, y)| Ok(self.game.move_piece_to(id, x, y)?)) {
                Ok(()) => return Ok(()),
                Err(e) => writeln!(out, "{e}")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn small_game() -> Game {
        let mut board = Board::new();
        board.add_piece(Color::First, 0, 3).unwrap();
        board.add_piece(Color::Second, 3, 0).unwrap();
        board.add_piece(Color::Second, 5, 5).unwrap();
        Game::from_board(board)
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("3 4"), Ok((3, 4)));
        assert_eq!(parse_point(" 3,4 "), Ok((3, 4)));
        assert_eq!(parse_point("-1 2"), Ok((-1, 2)));
        assert_eq!(parse_point("3"), Err(SelectError::Unparsable));
        assert_eq!(parse_point("a b"), Err(SelectError::Unparsable));
        assert_eq!(parse_point("1 2 3"), Err(SelectError::Unparsable));
    }

    #[test]
    fn test_select_piece_reasons() {
        let game = small_game();
        assert_eq!(select_piece(&game, Color::First, -1, 3), Err(SelectError::OutOfBounds));
        assert_eq!(select_piece(&game, Color::First, 8, 3), Err(SelectError::OutOfBounds));
        assert_eq!(select_piece(&game, Color::First, 5, 5), Err(SelectError::NotOnBorder));
        assert_eq!(select_piece(&game, Color::First, 0, 0), Err(SelectError::NotOnBorder));
        assert_eq!(select_piece(&game, Color::First, 0, 4), Err(SelectError::EmptyCell));
        assert_eq!(select_piece(&game, Color::First, 3, 0), Err(SelectError::NotYours));
        assert_eq!(select_piece(&game, Color::First, 0, 3), Ok(game.piece_at(0, 3).unwrap()));
    }

    #[test]
    fn test_select_piece_stuck() {
        let mut board = Board::new();
        board.add_piece(Color::First, 0, 2).unwrap();
        for x in 1..=6 {
            board.add_piece(Color::Second, x, 2).unwrap();
        }
        let game = Game::from_board(board);
        assert_eq!(select_piece(&game, Color::First, 0, 2), Err(SelectError::Stuck));
    }

    #[test]
    fn test_select_target_reasons() {
        let game = small_game();
        let id = game.piece_at(0, 3).unwrap();
        assert_eq!(select_target(&game, id, 7, 3), Err(SelectError::OutsideInterior));
        assert_eq!(
            select_target(&game, id, 3, 4),
            Err(SelectError::Move(MoveError::OffLane(3, 4)))
        );
        assert_eq!(select_target(&game, id, 6, 3), Ok((6, 3)));
    }
}
