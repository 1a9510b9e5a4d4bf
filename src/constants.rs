//! Board dimensions, rule parameters and AI weights.
//!
//! # Board Size Configuration
//!
//! The board size is controlled by Cargo features:
//! - `board9x9` (default): 9x9 board
//! - `board13x13`: 13x13 board
//!
//! ```sh
//! cargo build                                              # 9x9 (default)
//! cargo build --no-default-features --features board13x13  # 13x13
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
#[cfg(feature = "board9x9")]
pub const N: usize = 9;

#[cfg(feature = "board13x13")]
pub const N: usize = 13;

#[cfg(all(feature = "board9x9", feature = "board13x13"))]
compile_error!("Cannot enable both 'board9x9' and 'board13x13' features at the same time");

#[cfg(not(any(feature = "board9x9", feature = "board13x13")))]
compile_error!("Must enable exactly one board size feature: 'board9x9' or 'board13x13'");

/// Number of intersections on the board.
pub const BOARD_POINTS: usize = N * N;

/// Distance of the corner star points from the edge (3-3 on 9x9, 4-4 on 13x13).
pub const STAR_OFFSET: usize = if N >= 13 { 3 } else { 2 };

/// Orthogonal neighbor offsets as (row, col) deltas: North, South, West, East.
pub const DELTA: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

// =============================================================================
// Scoring
// =============================================================================

/// Black wins when its area score is strictly above this value.
///
/// Half the board plus the half point, so Black takes every exact tie on an
/// odd board (40.5 on 9x9).
pub const WIN_THRESHOLD: f64 = BOARD_POINTS as f64 / 2.0;

/// Number of consecutive passes that ends the game.
pub const PASSES_TO_END: u32 = 2;

/// Ply limit for unattended AI-vs-AI games (3 times board area to allow for captures and replays).
pub const MAX_GAME_LEN: usize = N * N * 3;

// =============================================================================
// AI Heuristic Weights
// =============================================================================

/// Bonus for playing on a star point or tengen.
pub const WEIGHT_STAR: f64 = 10.0;

/// Bonus for the open middle area (everything at least `STAR_OFFSET` from the edge).
pub const WEIGHT_MIDDLE: f64 = 4.0;

/// Penalty for first-line moves.
pub const WEIGHT_EDGE: f64 = 2.0;

/// Multiplier applied to the liberties of the placed stone's group.
pub const WEIGHT_LIBERTY: f64 = 2.0;

/// Bonus for contact plays (adjacent to an opponent stone).
pub const WEIGHT_CONTACT: f64 = 5.0;

/// Upper bound (exclusive) of the random perturbation added to every score.
pub const WEIGHT_JITTER: f64 = 2.0;

// =============================================================================
// Presentation
// =============================================================================

/// Default pause before the AI commits its move, in milliseconds.
pub const THINK_DELAY_MS: u64 = 500;

/// Check whether (row, col) is one of the star points (four corners plus tengen).
pub const fn is_star_point(row: usize, col: usize) -> bool {
    let far = N - 1 - STAR_OFFSET;
    let center = N / 2;
    (row == center && col == center)
        || ((row == STAR_OFFSET || row == far) && (col == STAR_OFFSET || col == far))
}

/// Check whether (row, col) lies in the open middle area.
pub const fn is_middle(row: usize, col: usize) -> bool {
    let far = N - 1 - STAR_OFFSET;
    row >= STAR_OFFSET && row <= far && col >= STAR_OFFSET && col <= far
}

/// Check whether (row, col) lies on the first line.
pub const fn is_edge(row: usize, col: usize) -> bool {
    row == 0 || col == 0 || row == N - 1 || col == N - 1
}
