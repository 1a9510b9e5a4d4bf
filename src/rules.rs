//! Move legality: placement, capture resolution, suicide and ko.
//!
//! Moves are always tried on a copy of the board. Captures are resolved
//! before the suicide test, so a stone that lands with no liberties is still
//! legal when it takes an adjacent group and gains that group's points.

use thiserror::Error;

use crate::board::{Board, Color, Point};
use crate::group::{collect_group, has_liberty};
use crate::history::History;

/// Why a move was rejected. The live board is never modified on rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move: point not empty")]
    Occupied,
    #[error("illegal move: suicide")]
    Suicide,
    #[error("illegal move: retakes ko")]
    Ko,
    #[error("game is over")]
    GameOver,
    #[error("not {0}'s turn")]
    WrongTurn(Color),
}

/// Outcome of trying a stone on an empty point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The resulting board and every stone removed by the move.
    Legal { board: Board, captured: Vec<Point> },
    Suicide,
    KoViolation,
}

impl Placement {
    pub fn is_legal(&self) -> bool {
        matches!(self, Placement::Legal { .. })
    }
}

/// Try `color` at `pt` on a copy of `board`.
///
/// `pt` must be empty; callers check occupancy first. When `history` is
/// `None` the ko test is skipped, which is how the AI simulates moves before
/// running its own ko comparison.
pub fn attempt_move(board: &Board, pt: Point, color: Color, history: Option<&History>) -> Placement {
    debug_assert!(board.is_empty_at(pt), "attempt_move on occupied point {pt:?}");

    let mut next = board.clone();
    next.set(pt, Some(color));

    let opponent = color.opponent();
    let mut captured = Vec::new();
    for n in Board::neighbors(pt) {
        // A group touching the new stone twice is already gone on the second visit.
        if next.get(n) == Some(opponent) && !has_liberty(&next, n) {
            let start = captured.len();
            collect_group(&next, n, &mut captured);
            for &s in &captured[start..] {
                next.set(s, None);
            }
        }
    }

    if captured.is_empty() && !has_liberty(&next, pt) {
        tracing::debug!(?pt, %color, "rejected suicide");
        return Placement::Suicide;
    }

    if let Some(history) = history
        && history.is_ko_violation(&next)
    {
        tracing::debug!(?pt, %color, "rejected ko recapture");
        return Placement::KoViolation;
    }

    if !captured.is_empty() {
        tracing::debug!(?pt, %color, stones = captured.len(), "captured");
    }
    Placement::Legal {
        board: next,
        captured,
    }
}

/// Full legality check including occupancy, for committing moves.
pub fn check_move(
    board: &Board,
    pt: Point,
    color: Color,
    history: &History,
) -> Result<(Board, Vec<Point>), MoveError> {
    if !board.is_empty_at(pt) {
        return Err(MoveError::Occupied);
    }
    match attempt_move(board, pt, color, Some(history)) {
        Placement::Legal { board, captured } => Ok((board, captured)),
        Placement::Suicide => Err(MoveError::Suicide),
        Placement::KoViolation => Err(MoveError::Ko),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::N;
    use crate::group::count_liberties;

    fn board_with(black: &[Point], white: &[Point]) -> Board {
        let mut board = Board::new();
        for &pt in black {
            board.set(pt, Some(Color::Black));
        }
        for &pt in white {
            board.set(pt, Some(Color::White));
        }
        board
    }

    #[test]
    fn test_tengen_on_empty_board() {
        let board = Board::new();
        let center = (N / 2, N / 2);
        let Placement::Legal { board: next, captured } =
            attempt_move(&board, center, Color::Black, Some(&History::new()))
        else {
            panic!("tengen must be legal");
        };
        assert!(captured.is_empty());
        assert_eq!(next.stone_count(), 1);
        assert_eq!(count_liberties(&next, center), 4);
        assert!(board.is_empty_at(center), "input board must not change");
    }

    #[test]
    fn test_capture_in_corner() {
        let board = board_with(&[(0, 1)], &[(0, 0)]);
        let Placement::Legal { board: next, captured } =
            attempt_move(&board, (1, 0), Color::Black, None)
        else {
            panic!("capture must be legal");
        };
        assert_eq!(captured, vec![(0, 0)]);
        assert!(next.is_empty_at((0, 0)));
        assert_eq!(next.count(Color::White), 0);
    }

    #[test]
    fn test_suicide_rejected() {
        let board = board_with(&[], &[(0, 1), (1, 0)]);
        let result = attempt_move(&board, (0, 0), Color::Black, None);
        assert_eq!(result, Placement::Suicide);
        assert_eq!(
            check_move(&board, (0, 0), Color::Black, &History::new()),
            Err(MoveError::Suicide)
        );
    }

    #[test]
    fn test_filling_own_last_liberty_is_suicide() {
        // Black pair at (0,0)-(0,1) whose last liberty is (1,0).
        let board = board_with(&[(0, 0), (0, 1)], &[(0, 2), (1, 1), (2, 0)]);
        assert_eq!(attempt_move(&board, (1, 0), Color::Black, None), Placement::Suicide);
    }

    #[test]
    fn test_capture_beats_suicide() {
        // Black at (0,0) has no liberties before resolving the capture of (0,1).
        //   . O X
        //   O X .
        //   X . .
        let board = board_with(&[(0, 2), (1, 1), (2, 0)], &[(0, 1), (1, 0)]);
        let placement = attempt_move(&board, (0, 0), Color::Black, None);
        let Placement::Legal { board: next, mut captured } = placement else {
            panic!("capturing move must not be suicide");
        };
        captured.sort_unstable();
        assert_eq!(captured, vec![(0, 1), (1, 0)]);
        assert_eq!(count_liberties(&next, (0, 0)), 2);
    }

    #[test]
    fn test_multi_stone_group_captured_once() {
        // White pair on the top edge; black fills the last liberty at (0,1).
        let board = board_with(&[(0, 4), (1, 2), (1, 3)], &[(0, 2), (0, 3)]);
        let Placement::Legal { board: next, captured } =
            attempt_move(&board, (0, 1), Color::Black, None)
        else {
            panic!("capture must be legal");
        };
        assert_eq!(captured.len(), 2);
        assert_eq!(next.count(Color::White), 0);
        assert_eq!(next.count(Color::Black), 4);
    }

    #[test]
    fn test_ko_recapture_rejected() {
        //  . X O .
        //  X O . O
        //  . X O .
        let before = board_with(&[(0, 1), (1, 0), (2, 1)], &[(0, 2), (1, 1), (1, 3), (2, 2)]);
        let mut history = History::new();
        history.push(before.clone());

        // Black takes the ko at (1,2).
        let Placement::Legal { board: after_take, captured } =
            attempt_move(&before, (1, 2), Color::Black, Some(&history))
        else {
            panic!("taking the ko must be legal");
        };
        assert_eq!(captured, vec![(1, 1)]);
        history.push(after_take.clone());

        // White may not retake immediately.
        assert_eq!(
            attempt_move(&after_take, (1, 1), Color::White, Some(&history)),
            Placement::KoViolation
        );
        assert_eq!(
            check_move(&after_take, (1, 1), Color::White, &history),
            Err(MoveError::Ko)
        );
        // Without ko checking the recapture simulates as legal.
        assert!(attempt_move(&after_take, (1, 1), Color::White, None).is_legal());
    }

    #[test]
    fn test_occupied() {
        let board = board_with(&[(3, 3)], &[]);
        assert_eq!(
            check_move(&board, (3, 3), Color::White, &History::new()),
            Err(MoveError::Occupied)
        );
    }
}
