//! Ninego: a 9x9 Go rule engine with a one-ply heuristic opponent.
//!
//! The crate enforces captures, suicide and ko, scores finished games by
//! area, and picks AI moves from a weighted positional heuristic. Rendering
//! and input handling are left to callers, who drive [`game::Game`] and
//! replay the [`game::GameEvent`]s it returns.
//!
//! ## Modules
//!
//! - [`constants`] - Board size, scoring threshold and AI weights
//! - [`board`] - Grid, colors, coordinates and the text diagram
//! - [`group`] - Flood-fill groups, liberties and atari detection
//! - [`rules`] - Move legality (captures, suicide, ko)
//! - [`history`] - Board snapshots for the ko rule
//! - [`scoring`] - Territory regions and final area score
//! - [`ai`] - Move evaluation and selection
//! - [`game`] - Turn order, passes, resignation and game end
//! - [`gtp`] - Go Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use ninego::board::{Color, Move};
//! use ninego::game::Game;
//!
//! let mut game = Game::with_seed(7);
//! game.apply_move((4, 4), Color::Black).unwrap();
//!
//! // The AI answers for White.
//! let (reply, _) = game.play_ai().unwrap();
//! assert_ne!(reply, Move::Pass);
//! println!("{}", game.board());
//! ```

pub mod ai;
pub mod board;
pub mod constants;
pub mod game;
pub mod group;
pub mod gtp;
pub mod history;
pub mod rules;
pub mod scoring;
