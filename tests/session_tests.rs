//! Scripted console sessions.

use std::io::{Cursor, ErrorKind};

use mabula::board::{Board, Color};
use mabula::game::Game;
use mabula::score::{Outcome, Scoring};
use mabula::session::Session;

fn session(first: &[(usize, usize)], second: &[(usize, usize)]) -> Session {
    let mut board = Board::new();
    for &(x, y) in first {
        board.add_piece(Color::First, x, y).unwrap();
    }
    for &(x, y) in second {
        board.add_piece(Color::Second, x, y).unwrap();
    }
    Session::new(Game::from_board(board), fastrand::Rng::with_seed(0))
}

fn play(session: &mut Session, script: &str) -> (std::io::Result<mabula::session::Report>, String) {
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut output = Vec::new();
    let result = session.run(&mut input, &mut output);
    (result, String::from_utf8(output).unwrap())
}

#[test]
fn test_full_game_with_prompts() {
    let mut s = session(&[(0, 3)], &[(3, 0), (4, 2)]).with_starting(Color::First);
    let script = "0\nAnn\nBob\n0 3\n3 3\n3 0\n3 2\n";
    let (result, out) = play(&mut s, script);
    let report = result.unwrap();

    assert_eq!(report.scoring, Scoring::Largest);
    assert_eq!(report.scores, [1, 2]);
    assert_eq!(report.outcome, Outcome::Winner(Color::Second));
    assert!(out.contains("Ann's turn (X)"));
    assert!(out.contains("Bob's turn (O)"));
    assert!(out.contains("Ann: 1 points / Bob: 2 points"));
    assert!(out.contains("Bob wins"));
    assert_eq!(s.game().piece_at(3, 2).map(|id| s.game().piece(id).unwrap().color()), Some(Color::Second));
}

#[test]
fn test_invalid_inputs_are_reprompted() {
    let mut s = session(&[(0, 3)], &[(3, 0)])
        .with_scoring(Scoring::Product)
        .with_name(Color::First, "Ann")
        .with_name(Color::Second, "Bob")
        .with_starting(Color::First);
    let script = "\
hello
9 9
3 0
2 2
0 5
0 3
0 3
3 4
3 3
3 0
3 1
";
    let (result, out) = play(&mut s, script);
    let report = result.unwrap();

    assert!(out.contains("Enter two numbers separated by a space."));
    assert!(out.contains("Coordinates must be between 0 and 7."));
    assert!(out.contains("This piece does not belong to you."));
    assert!(out.contains("This position is not on the border of the board."));
    assert!(out.contains("There is no piece at this position."));
    assert!(out.contains("Pick a destination in the center of the board (1 to 6)."));
    assert!(out.contains("The piece cannot be moved there"));
    assert!(!out.contains("Choose the scoring method"));
    assert_eq!(report.outcome, Outcome::Draw);
    assert!(out.contains("Draw!"));
}

#[test]
fn test_blocked_player_is_skipped() {
    let mut first = vec![(0, 2)];
    let second: Vec<(usize, usize)> = (1..=6).map(|x| (x, 2)).chain([(3, 7)]).collect();
    first.push((6, 6));
    let mut s = session(&first, &second)
        .with_scoring(Scoring::Largest)
        .with_name(Color::First, "Ann")
        .with_name(Color::Second, "Bob")
        .with_starting(Color::First);
    let (result, out) = play(&mut s, "3 7\n3 6\n");
    result.unwrap();

    assert!(out.contains("Ann cannot move"));
    assert!(out.contains("Bob wins"));
}

#[test]
fn test_default_names_and_scoring() {
    let mut s = session(&[(1, 1)], &[(5, 5)]).with_starting(Color::Second);
    let (result, out) = play(&mut s, "\n\n\n");
    let report = result.unwrap();
    assert_eq!(report.scoring, Scoring::Largest);
    assert!(out.contains("first: 1 points / second: 1 points"));
}

#[test]
fn test_closed_input_is_an_error() {
    let mut s = session(&[(0, 3)], &[(3, 0)]).with_scoring(Scoring::Largest);
    let (result, _) = play(&mut s, "Ann\n");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::UnexpectedEof);
}
