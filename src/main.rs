//! Ninego command-line front end.
//!
//! ## Usage
//!
//! - `ninego` / `ninego play` - Play against the AI in the terminal
//! - `ninego selfplay` - Watch the AI play itself
//! - `ninego gtp` - Start a GTP server for GUI integration

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ninego::board::{parse_vertex, vertex, Color, Move};
use ninego::constants::{MAX_GAME_LEN, THINK_DELAY_MS};
use ninego::game::{EndReason, Game, GameEvent, GameResult};
use ninego::gtp::GtpEngine;

/// Ninego: 9x9 Go with a heuristic AI opponent
#[derive(Parser)]
#[command(name = "ninego")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play(PlayArgs),
    /// Let the AI play both sides
    Selfplay {
        /// Seed for the AI's random choices
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp {
        /// Seed for the AI's random choices
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct PlayArgs {
    /// Color played by the human
    #[arg(long, default_value = "black", value_parser = parse_color)]
    color: Color,
    /// Two humans share the terminal; the AI stays off
    #[arg(long)]
    two_player: bool,
    /// Pause before the AI commits its move, in milliseconds
    #[arg(long, default_value_t = THINK_DELAY_MS)]
    think_ms: u64,
    /// Seed for the AI's random choices
    #[arg(long)]
    seed: Option<u64>,
}

fn parse_color(s: &str) -> Result<Color, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Gtp { seed }) => GtpEngine::with_game(new_game(seed)).run(),
        Some(Commands::Selfplay { seed }) => run_selfplay(seed),
        Some(Commands::Play(args)) => run_play(&args),
        None => run_play(&PlayArgs {
            color: Color::Black,
            two_player: false,
            think_ms: THINK_DELAY_MS,
            seed: None,
        }),
    }
}

/// Logs go to stderr so they never mix with GTP responses on stdout.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn new_game(seed: Option<u64>) -> Game {
    match seed {
        Some(s) => Game::with_seed(s),
        None => Game::new(),
    }
}

fn run_play(args: &PlayArgs) -> anyhow::Result<()> {
    let human = args.color;
    let mut game = new_game(args.seed);
    game.set_ai_color((!args.two_player).then_some(human.opponent()));

    println!("Ninego - enter a vertex (e.g. E5), 'pass' or 'resign'.\n");
    println!("{}", game.board());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(color) = game.to_move() {
        if game.is_ai_turn() {
            thread::sleep(Duration::from_millis(args.think_ms));
            let (mv, report) = game.play_ai().context("AI produced an illegal move")?;
            println!("{color} plays {}", vertex(mv));
            show_events(&report.events);
            println!("{}", game.board());
            continue;
        }

        print!("{color}> ");
        io::stdout().flush().context("flushing prompt")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("reading move")?;
        let input = line.trim();

        let report = if input.eq_ignore_ascii_case("resign") {
            game.resign(color)
        } else {
            let Some(mv) = parse_vertex(input) else {
                println!("Cannot read '{input}' as a vertex.");
                continue;
            };
            game.play(mv, color)
        };
        match report {
            Ok(report) => {
                show_events(&report.events);
                println!("{}", game.board());
            }
            Err(e) => println!("{e}"),
        }
    }
    Ok(())
}

fn run_selfplay(seed: Option<u64>) -> anyhow::Result<()> {
    let mut game = new_game(seed);
    while let Some(color) = game.to_move() {
        if game.history().len() >= MAX_GAME_LEN {
            tracing::warn!(plies = MAX_GAME_LEN, "move limit reached, scoring the board");
            show_result(&game.end_game());
            break;
        }
        let (mv, report) = game.play_ai().context("AI produced an illegal move")?;
        if mv != Move::Pass {
            println!("{color} plays {}", vertex(mv));
        }
        show_events(&report.events);
    }
    println!("{}", game.board());
    Ok(())
}

fn show_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::StonesCaptured { color, points } => {
                let stones: Vec<String> = points.iter().map(|&p| vertex(Move::Place(p))).collect();
                println!("Captured {color}: {}", stones.join(" "));
            }
            GameEvent::Passed(color) => println!("{color} passes"),
            GameEvent::Resigned(color) => println!("{color} resigns"),
            GameEvent::GameEnded(result) => show_result(result),
            GameEvent::StonePlaced { .. } => {}
        }
    }
}

fn show_result(result: &GameResult) {
    match result.reason {
        EndReason::Score => println!(
            "Final count: black {} vs white {} - {} wins",
            result.black_score, result.white_score, result.winner
        ),
        EndReason::Resignation(_) => println!("{} wins by resignation", result.winner),
    }
}
