//! Mabula: play the border-push board game in a terminal.
//!
//! ## Usage
//!
//! - `mabula` - Play a game (same as `mabula play`)
//! - `mabula play --scoring product --seed 7` - Play with preset options
//! - `mabula demo` - Show a random starting board and its scores

use std::io;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};

use mabula::board::Color;
use mabula::constants::PLACEMENT_ATTEMPTS;
use mabula::game::Game;
use mabula::placement::PlacementError;
use mabula::score::Scoring;
use mabula::session::Session;

/// Mabula: a two-player border-push board game
#[derive(Parser)]
#[command(name = "mabula")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game on this terminal
    Play(PlayArgs),
    /// Show a random starting board and the scores it would give
    Demo {
        /// Seed for the random placement
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args, Default)]
struct PlayArgs {
    /// Scoring method (asked interactively when omitted)
    #[arg(long, value_enum)]
    scoring: Option<ScoringArg>,
    /// Seed for the placement and the starting player
    #[arg(long)]
    seed: Option<u64>,
    /// Name of the first player (X)
    #[arg(long)]
    first: Option<String>,
    /// Name of the second player (O)
    #[arg(long)]
    second: Option<String>,
}

#[derive(Copy, Clone, ValueEnum)]
enum ScoringArg {
    Largest,
    Product,
}

impl From<ScoringArg> for Scoring {
    fn from(arg: ScoringArg) -> Self {
        match arg {
            ScoringArg::Largest => Scoring::Largest,
            ScoringArg::Product => Scoring::Product,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(args)) => run_play(args, cli.verbose),
        Some(Commands::Demo { seed }) => run_demo(seed, cli.verbose),
        None => run_play(PlayArgs::default(), cli.verbose),
    }
}

fn make_rng(seed: Option<u64>, verbose: bool) -> fastrand::Rng {
    let seed = seed.unwrap_or_else(|| fastrand::u64(..));
    if verbose {
        eprintln!("seed: {seed}");
    }
    fastrand::Rng::with_seed(seed)
}

/// Run the placement search, retrying a bounded number of times.
fn new_game(rng: &mut fastrand::Rng, verbose: bool) -> Result<Game> {
    let mut last: Option<PlacementError> = None;
    for attempt in 1..=PLACEMENT_ATTEMPTS {
        match Game::new_game(rng) {
            Ok(game) => return Ok(game),
            Err(e) => {
                if verbose {
                    eprintln!("placement attempt {attempt} failed: {e}");
                }
                last = Some(e);
            }
        }
    }
    match last {
        Some(e) => Err(e).context(format!("no starting board after {PLACEMENT_ATTEMPTS} attempts")),
        None => bail!("no placement attempts configured"),
    }
}

fn run_play(args: PlayArgs, verbose: bool) -> Result<()> {
    let mut rng = make_rng(args.seed, verbose);
    let game = new_game(&mut rng, verbose)?;

    let mut session = Session::new(game, rng);
    if let Some(scoring) = args.scoring {
        session = session.with_scoring(scoring.into());
    }
    if let Some(name) = args.first {
        session = session.with_name(Color::First, name);
    }
    if let Some(name) = args.second {
        session = session.with_name(Color::Second, name);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let report = session
        .run(&mut stdin.lock(), &mut stdout)
        .context("game interrupted")?;
    if verbose {
        eprintln!("final: {report:?}");
    }
    Ok(())
}

fn run_demo(seed: Option<u64>, verbose: bool) -> Result<()> {
    println!("Mabula: border-push board game\n");

    let mut rng = make_rng(seed, verbose);
    let game = new_game(&mut rng, verbose)?;
    println!("{}", game.board());

    for color in Color::ALL {
        println!(
            "{color} ({}): {} legal moves, biggest group {}, product of groups {}",
            color.symbol(),
            game.legal_moves(color).len(),
            game.biggest_group(color),
            game.mult_group(color),
        );
    }
    Ok(())
}
