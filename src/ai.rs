//! One-ply heuristic move selection.
//!
//! Every empty point is tried on a private copy of the board. Legal,
//! non-ko results are scored by a weighted sum of:
//! - star point / tengen bonus
//! - open-middle bonus and first-line penalty
//! - liberties of the placed stone's group after captures
//! - contact with an opponent stone
//! - a small random perturbation
//!
//! The move is drawn uniformly from the candidates sharing the top score.
//! Exact ties are rare because of the perturbation; that is expected.

use crate::board::{Board, Color, Move, Point};
use crate::constants::{
    is_edge, is_middle, is_star_point, WEIGHT_CONTACT, WEIGHT_EDGE, WEIGHT_JITTER, WEIGHT_LIBERTY,
    WEIGHT_MIDDLE, WEIGHT_STAR,
};
use crate::group::count_liberties;
use crate::history::History;
use crate::rules::{attempt_move, Placement};

/// A legal move with its heuristic score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub point: Point,
    pub score: f64,
}

/// Score `color` playing `pt`, given the board before the move and the
/// board after captures were resolved.
pub fn evaluate_move(before: &Board, after: &Board, pt: Point, color: Color, rng: &mut fastrand::Rng) -> f64 {
    let (row, col) = pt;
    let mut score = 0.0;

    if is_star_point(row, col) {
        score += WEIGHT_STAR;
    }
    if is_middle(row, col) {
        score += WEIGHT_MIDDLE;
    }
    if is_edge(row, col) {
        score -= WEIGHT_EDGE;
    }

    score += count_liberties(after, pt) as f64 * WEIGHT_LIBERTY;

    let opponent = color.opponent();
    if Board::neighbors(pt).any(|n| before.get(n) == Some(opponent)) {
        score += WEIGHT_CONTACT;
    }

    score + rng.f64() * WEIGHT_JITTER
}

/// Every legal, non-ko move for `color` with its score, in row-major order.
pub fn candidates(board: &Board, color: Color, history: &History, rng: &mut fastrand::Rng) -> Vec<Candidate> {
    let mut out = Vec::new();
    for pt in board.empty_points() {
        let Placement::Legal { board: after, .. } = attempt_move(board, pt, color, None) else {
            continue;
        };
        if history.is_ko_violation(&after) {
            continue;
        }
        out.push(Candidate {
            point: pt,
            score: evaluate_move(board, &after, pt, color, rng),
        });
    }
    out
}

/// Choose a move for `color`, or pass when nothing legal remains.
///
/// Works only on copies; `board` and `history` are not modified.
pub fn select_move(board: &Board, color: Color, history: &History, rng: &mut fastrand::Rng) -> Move {
    let mut best_score = f64::NEG_INFINITY;
    let mut best: Vec<Point> = Vec::new();

    for c in candidates(board, color, history, rng) {
        if c.score > best_score {
            best_score = c.score;
            best.clear();
            best.push(c.point);
        } else if c.score == best_score {
            best.push(c.point);
        }
    }

    if best.is_empty() {
        tracing::debug!(%color, "no legal move, passing");
        return Move::Pass;
    }
    let pt = best[rng.usize(..best.len())];
    tracing::debug!(%color, ?pt, score = best_score, ties = best.len(), "ai selected move");
    Move::Place(pt)
}
