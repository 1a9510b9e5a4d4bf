//! Go Text Protocol (GTP) front end.
//!
//! Lets a GUI such as Sabaki or GoGui drive the game controller over
//! stdin/stdout. Diagnostics go to stderr through `tracing`.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - only the compiled size is accepted
//! - `clear_board`
//! - `komi <value>` - accepted; the win threshold is a fixed rule
//! - `play <color> <vertex>`
//! - `genmove <color>` - out of turn, the side to move passes first
//! - `showboard`
//! - `final_score`

use std::io::{self, BufRead, Write};

use anyhow::Context;

use crate::board::{parse_vertex, vertex, Color};
use crate::constants::N;
use crate::game::{EndReason, Game, GameResult};
use crate::scoring::{final_score, FinalScore};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "final_score",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    game: Game,
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GtpEngine {
    pub fn new() -> Self {
        Self::with_game(Game::new())
    }

    /// Wrap an existing controller (e.g. one built with a fixed seed).
    pub fn with_game(mut game: Game) -> Self {
        // Colors are chosen by the GTP controller, not by the engine.
        game.set_ai_color(None);
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over arbitrary streams until `quit` or EOF.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("reading GTP command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            if !success {
                tracing::warn!(%command, %message, "command failed");
            }
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n").context("writing GTP response")?;
            output.flush().context("flushing GTP response")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => match args.first().map(|a| a.parse::<usize>()) {
                None => (false, "missing argument".to_string()),
                Some(Ok(size)) if size == N => (true, String::new()),
                Some(Ok(size)) => (
                    false,
                    format!("unacceptable size, only {N} is supported (got {size})"),
                ),
                Some(Err(_)) => (false, "invalid size".to_string()),
            },

            "clear_board" => {
                self.game.reset();
                (true, String::new())
            }

            "komi" => match args.first().map(|a| a.parse::<f32>()) {
                None => (false, "missing argument".to_string()),
                Some(Ok(komi)) => {
                    tracing::debug!(komi, "komi ignored, win threshold is fixed");
                    (true, String::new())
                }
                Some(Err(_)) => (false, "invalid komi".to_string()),
            },

            "play" => {
                let [color, vtx, ..] = args else {
                    return (false, "missing arguments".to_string());
                };
                let Ok(color) = color.parse::<Color>() else {
                    return (false, "invalid color".to_string());
                };
                let Some(mv) = parse_vertex(vtx) else {
                    return (false, "invalid vertex".to_string());
                };
                match self.game.play(mv, color) {
                    Ok(_) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let Some(Ok(color)) = args.first().map(|a| a.parse::<Color>()) else {
                    return (false, "invalid color".to_string());
                };
                let Some(to_move) = self.game.to_move() else {
                    return (false, "game is over".to_string());
                };
                // Out-of-turn requests keep alternation by passing for the other side.
                if to_move != color
                    && let Err(e) = self.game.pass(to_move)
                {
                    return (false, e.to_string());
                }
                if self.game.is_over() {
                    return (true, "pass".to_string());
                }
                match self.game.play_ai() {
                    Ok((mv, _)) => (true, vertex(mv)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "showboard" => (true, format!("\n{}", self.game.board().to_string().trim_end())),

            "final_score" => match self.game.result() {
                Some(GameResult {
                    winner,
                    reason: EndReason::Resignation(_),
                    ..
                }) => {
                    let letter = match winner {
                        Color::Black => 'B',
                        Color::White => 'W',
                    };
                    (true, format!("{letter}+R"))
                }
                Some(r) => {
                    let score = FinalScore {
                        black: r.black_score,
                        white: r.white_score,
                        winner: r.winner,
                    };
                    (true, score.result_string())
                }
                None => (true, final_score(self.game.board()).result_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Move;
    use crate::constants::WIN_THRESHOLD;

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_and_version() {
        let mut engine = GtpEngine::new();
        assert_eq!(engine.execute("name", &[]), (true, "ninego".to_string()));
        assert_eq!(engine.execute("protocol_version", &[]), (true, "2".to_string()));
    }

    #[test]
    fn test_known_command() {
        let mut engine = GtpEngine::new();
        assert_eq!(engine.execute("known_command", &["showboard"]).1, "true");
        assert_eq!(engine.execute("known_command", &["undo"]).1, "false");
    }

    #[test]
    fn test_boardsize() {
        let mut engine = GtpEngine::new();
        assert!(engine.execute("boardsize", &[&N.to_string()]).0);
        assert!(!engine.execute("boardsize", &["19"]).0);
    }

    #[test]
    fn test_play_rejections() {
        let mut engine = GtpEngine::new();
        assert!(engine.execute("play", &["black", "D4"]).0);
        let (ok, msg) = engine.execute("play", &["white", "D4"]);
        assert!(!ok);
        assert_eq!(msg, "illegal move: point not empty");
        let (ok, msg) = engine.execute("play", &["black", "E5"]);
        assert!(!ok);
        assert_eq!(msg, "not black's turn");
        assert!(!engine.execute("play", &["white", "I3"]).0);
    }

    #[test]
    fn test_genmove_and_clear() {
        let mut engine = GtpEngine::with_game(Game::with_seed(3));
        assert!(engine.execute("play", &["black", "E5"]).0);
        let (ok, vtx) = engine.execute("genmove", &["white"]);
        assert!(ok);
        assert!(matches!(parse_vertex(&vtx), Some(Move::Place(_))), "got {vtx}");
        assert_eq!(engine.game().board().stone_count(), 2);

        assert!(engine.execute("clear_board", &[]).0);
        assert_eq!(engine.game().board().stone_count(), 0);
    }

    #[test]
    fn test_serve_session() {
        let mut engine = GtpEngine::with_game(Game::with_seed(3));
        let input = "1 play black E5\n# comment\n2 play white pass\n3 play black pass\n4 final_score\nquit\n";
        let mut out = Vec::new();
        engine.serve(input.as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("=1 \n\n=2 \n\n=3 \n\n"), "{out}");
        assert!(
            out.contains(&format!("=4 B+{}", (N * N) as f64 - WIN_THRESHOLD)),
            "{out}"
        );
        assert!(engine.game().is_over());
    }

    #[test]
    fn test_genmove_out_of_turn_passes_for_other_side() {
        let mut engine = GtpEngine::with_game(Game::with_seed(5));
        assert!(engine.execute("play", &["black", "E5"]).0);
        let (ok, vtx) = engine.execute("genmove", &["black"]);
        assert!(ok);
        assert!(matches!(parse_vertex(&vtx), Some(Move::Place(_))), "got {vtx}");
        assert_eq!(engine.game().board().count(Color::Black), 2);
        assert_eq!(engine.game().board().count(Color::White), 0);
        assert_eq!(engine.game().to_move(), Some(Color::White));
    }

    #[test]
    fn test_genmove_out_of_turn_after_pass_ends_game() {
        let mut engine = GtpEngine::with_game(Game::with_seed(5));
        assert!(engine.execute("play", &["black", "pass"]).0);
        assert_eq!(engine.execute("genmove", &["black"]), (true, "pass".to_string()));
        assert!(engine.game().is_over());
    }

    #[test]
    fn test_showboard_reply_ends_with_one_blank_line() {
        let mut engine = GtpEngine::with_game(Game::with_seed(3));
        let mut out = Vec::new();
        engine.serve("1 showboard\n2 name\n".as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(!out.contains("\n\n\n"), "{out:?}");
        assert!(out.ends_with("\n\n=2 ninego\n\n"), "{out:?}");
        assert_eq!(out.lines().filter(|l| l.contains('.')).count(), N);
    }

    #[test]
    fn test_final_score_after_resignation() {
        let mut game = Game::with_seed(3);
        game.resign(Color::Black).unwrap();
        let mut engine = GtpEngine::with_game(game);
        assert_eq!(engine.execute("final_score", &[]), (true, "W+R".to_string()));
    }
}
