//! hatetris - best-first solver and trace tools for the adversarial well.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use hatetris_core::{trace, Board, Move, WellConfig};
use hatetris_engine::{Replay, Step};
use hatetris_search::{LogReporter, Progress, Reporter, Solution, Solver, SolverConfig};
use log::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "hatetris", version, about = "Best-first solver for the adversarial well")]
struct Cli {
    /// Well width in columns
    #[arg(long, global = true, default_value_t = 10)]
    width: u8,

    /// Well depth in rows, buffer zone included
    #[arg(long, global = true, default_value_t = 20)]
    depth: u8,

    /// Buffer rows at the top of the well
    #[arg(long, global = true, default_value_t = 4)]
    bar: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search for the highest-scoring trace
    Solve(SolveArgs),
    /// Play a trace and print every lock
    Replay(ReplayArgs),
    /// Pack a letter trace (L R D U) into hex
    Encode {
        /// Moves as letters; whitespace is ignored
        letters: String,
    },
    /// Unpack a hex trace into letters
    Decode {
        /// Hex trace; whitespace is ignored
        hex: String,
    },
}

#[derive(Debug, Args)]
struct SolveArgs {
    /// Hex trace to replay before searching
    #[arg(long, conflicts_with = "seed_file")]
    seed: Option<String>,

    /// File holding a hex seed trace
    #[arg(long, value_name = "FILE")]
    seed_file: Option<PathBuf>,

    /// Start from this board instead of an empty well
    #[arg(long, value_name = "FILE")]
    board_file: Option<PathBuf>,

    /// Expansion threads; 0 expands on the main thread
    #[arg(long, default_value_t = 0)]
    workers: usize,

    /// Stop once a board with this score is popped
    #[arg(long)]
    stop_score: Option<u32>,

    /// Stop after this many boards are popped
    #[arg(long)]
    max_expansions: Option<u64>,

    /// Pops between progress lines; 0 disables them
    #[arg(long, default_value_t = 1000)]
    progress_every: u64,

    /// Print each new best as one JSON object per line
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ReplayArgs {
    /// Trace to play
    #[arg(conflicts_with = "trace_file")]
    trace: Option<String>,

    /// File holding the trace
    #[arg(long, value_name = "FILE")]
    trace_file: Option<PathBuf>,

    /// The trace is written as letters rather than hex
    #[arg(long)]
    letters: bool,

    /// Start from this board instead of an empty well
    #[arg(long, value_name = "FILE")]
    board_file: Option<PathBuf>,

    /// Print the board after every lock
    #[arg(long)]
    boards: bool,
}

/// Prints solutions to stdout. Progress goes to the log.
struct StdoutReporter {
    json: bool,
}

impl Reporter for StdoutReporter {
    fn on_new_best(&mut self, solution: &Solution) {
        if self.json {
            match serde_json::to_string(solution) {
                Ok(line) => println!("{line}"),
                Err(err) => warn!("failed to serialize solution: {err}"),
            }
            return;
        }
        println!(
            "score {} after {} pops ({:.2}s), {} pieces",
            solution.score,
            solution.expansions,
            solution.elapsed.as_secs_f64(),
            solution.trace.pieces()
        );
        println!("{}", solution.trace);
        println!("{}", solution.encoded);
        println!("{}", solution.board);
    }

    fn on_progress(&mut self, progress: &Progress) {
        LogReporter.on_progress(progress);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let well = WellConfig {
        width: cli.width,
        depth: cli.depth,
        bar: cli.bar,
    };
    well.validate().context("invalid well dimensions")?;

    match cli.cmd {
        Command::Solve(args) => solve(&well, args),
        Command::Replay(args) => replay(&well, args),
        Command::Encode { letters } => {
            let moves = trace::parse_letters(&letters).context("invalid letter trace")?;
            println!("{}", trace::encode(&moves));
            Ok(())
        }
        Command::Decode { hex } => {
            let moves = trace::decode(&hex).context("invalid hex trace")?;
            println!("{}", letters(&moves));
            Ok(())
        }
    }
}

fn solve(well: &WellConfig, args: SolveArgs) -> Result<()> {
    let board = start_board(well, args.board_file.as_deref())?;
    let seed = read_text(args.seed, args.seed_file.as_deref())?
        .map(|text| trace::decode(&text).context("invalid seed trace"))
        .transpose()?;

    let config = SolverConfig {
        workers: args.workers,
        stop_score: args.stop_score,
        max_expansions: args.max_expansions,
        progress_interval: args.progress_every,
    };
    let mut solver = Solver::with_board(config, board)?;
    if let Some(moves) = seed {
        let log = solver.seed(&moves);
        if log.game_over_at.is_some() {
            bail!("seed trace ends in game over");
        }
    }

    let mut reporter = StdoutReporter { json: args.json };
    let outcome = solver.solve(&mut reporter)?;
    info!(
        "{:?}: {} pops, {} boards, best score {}",
        outcome.reason,
        outcome.expansions,
        outcome.seen,
        outcome.best_score().unwrap_or(0)
    );
    Ok(())
}

fn replay(well: &WellConfig, args: ReplayArgs) -> Result<()> {
    let board = start_board(well, args.board_file.as_deref())?;
    let text = read_text(args.trace, args.trace_file.as_deref())?.unwrap_or_default();
    let moves = if args.letters {
        trace::parse_letters(&text).context("invalid letter trace")?
    } else {
        trace::decode(&text).context("invalid hex trace")?
    };

    let mut game = Replay::new(board);
    for &mv in &moves {
        match game.step(mv) {
            Step::Locked(lock) => {
                println!(
                    "move {:>5}: {} locked, {} lines, score {}, piece {}",
                    lock.move_index,
                    lock.piece,
                    lock.lines,
                    lock.score,
                    game.pieces() - 1
                );
                if args.boards {
                    println!("{}", lock.board);
                }
            }
            Step::GameOver => {
                println!("game over after {} pieces, score {}", game.pieces(), game.score());
                println!("{}", game.board());
                return Ok(());
            }
            Step::Moved | Step::Rejected => {}
        }
    }

    println!(
        "{} moves, score {}, {} pieces",
        moves.len(),
        game.score(),
        game.pieces()
    );
    print!("{}", game.board().render_with_piece(game.state()));
    Ok(())
}

fn start_board(well: &WellConfig, path: Option<&Path>) -> Result<Board> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read board file {}", path.display()))?;
            Board::parse(well, &text).with_context(|| format!("bad board in {}", path.display()))
        }
        None => Ok(Board::empty(well)),
    }
}

fn read_text(inline: Option<String>, path: Option<&Path>) -> Result<Option<String>> {
    match (inline, path) {
        (Some(text), _) => Ok(Some(text)),
        (None, Some(path)) => fs::read_to_string(path)
            .map(Some)
            .with_context(|| format!("failed to read {}", path.display())),
        (None, None) => Ok(None),
    }
}

fn letters(moves: &[Move]) -> String {
    moves.iter().map(|mv| mv.letter()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_solve_flags() {
        let cli = Cli::parse_from([
            "hatetris",
            "solve",
            "--workers",
            "4",
            "--stop-score",
            "31",
            "--json",
        ]);
        match cli.cmd {
            Command::Solve(args) => {
                assert_eq!(args.workers, 4);
                assert_eq!(args.stop_score, Some(31));
                assert_eq!(args.progress_every, 1000);
                assert!(args.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!((cli.width, cli.depth, cli.bar), (10, 20, 4));
    }

    #[test]
    fn test_seed_sources_conflict() {
        let result = Cli::try_parse_from([
            "hatetris",
            "solve",
            "--seed",
            "AAAA",
            "--seed-file",
            "seed.hex",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_replay_flags() {
        let cli = Cli::parse_from(["hatetris", "replay", "--letters", "--boards", "DDDD"]);
        match cli.cmd {
            Command::Replay(args) => {
                assert!(args.letters);
                assert!(args.boards);
                assert_eq!(args.trace.as_deref(), Some("DDDD"));
            }
            other => panic!("unexpected command {other:?}"),
        }
        let cli = Cli::parse_from(["hatetris", "replay", "A"]);
        match cli.cmd {
            Command::Replay(args) => assert!(!args.boards),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_letters_follow_decode() {
        let moves = trace::decode("C02A").unwrap();
        assert_eq!(letters(&moves), "ULLLLDDD");
    }
}
