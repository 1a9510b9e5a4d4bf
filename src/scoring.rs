//! End-of-game area scoring.
//!
//! Each maximal empty region is flood-filled once, recording which colors
//! touch it. A region bordered by a single color belongs to that color;
//! regions touching both colors (dame) or none stay neutral. A player's
//! score is stones on the board plus owned territory.

use crate::board::{Board, Color, Point};
use crate::constants::{BOARD_POINTS, N, WIN_THRESHOLD};

/// A maximal connected set of empty points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub points: Vec<Point>,
    /// The single bordering color, or `None` for neutral points.
    pub owner: Option<Color>,
}

/// Final area count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    pub black: usize,
    pub white: usize,
    pub winner: Color,
}

impl FinalScore {
    /// GTP-style result string, e.g. `B+3.5` or `W+10.5`.
    ///
    /// The margin is measured against the win threshold, since that decides
    /// the winner; a decided game never reports a zero margin.
    pub fn result_string(&self) -> String {
        let black = self.black as f64;
        match self.winner {
            Color::Black => format!("B+{}", black - WIN_THRESHOLD),
            Color::White => format!("W+{}", WIN_THRESHOLD - black),
        }
    }
}

/// Partition the empty points of `board` into regions, in row-major order
/// of each region's first point.
pub fn territory_regions(board: &Board) -> Vec<Region> {
    let mut visited = [false; BOARD_POINTS];
    let mut regions = Vec::new();
    for pt in Board::points() {
        if visited[pt.0 * N + pt.1] || !board.is_empty_at(pt) {
            continue;
        }
        regions.push(flood_region(board, pt, &mut visited));
    }
    regions
}

/// Flood-fill the empty region at `start`, marking points in the shared
/// `visited` map so no point is claimed by two regions.
fn flood_region(board: &Board, start: Point, visited: &mut [bool; BOARD_POINTS]) -> Region {
    let mut stack = vec![start];
    let mut points = Vec::new();
    let mut touches_black = false;
    let mut touches_white = false;

    while let Some(pt) = stack.pop() {
        let i = pt.0 * N + pt.1;
        if visited[i] {
            continue;
        }
        visited[i] = true;
        points.push(pt);

        for n in Board::neighbors(pt) {
            match board.get(n) {
                Some(Color::Black) => touches_black = true,
                Some(Color::White) => touches_white = true,
                None if !visited[n.0 * N + n.1] => stack.push(n),
                None => {}
            }
        }
    }

    let owner = match (touches_black, touches_white) {
        (true, false) => Some(Color::Black),
        (false, true) => Some(Color::White),
        _ => None,
    };
    Region { points, owner }
}

/// Score a finished position.
pub fn final_score(board: &Board) -> FinalScore {
    let mut black = board.count(Color::Black);
    let mut white = board.count(Color::White);
    for region in territory_regions(board) {
        match region.owner {
            Some(Color::Black) => black += region.points.len(),
            Some(Color::White) => white += region.points.len(),
            None => {}
        }
    }
    let winner = if black as f64 > WIN_THRESHOLD {
        Color::Black
    } else {
        Color::White
    };
    FinalScore {
        black,
        white,
        winner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_is_one_neutral_region() {
        let regions = territory_regions(&Board::new());
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].points.len(), N * N);
        assert_eq!(regions[0].owner, None);

        let score = final_score(&Board::new());
        assert_eq!((score.black, score.white), (0, 0));
        assert_eq!(score.winner, Color::White);
    }

    #[test]
    fn test_single_black_stone_owns_everything() {
        let mut board = Board::new();
        board.set((N / 2, N / 2), Some(Color::Black));
        let score = final_score(&board);
        assert_eq!(score.black, N * N);
        assert_eq!(score.white, 0);
        assert_eq!(score.winner, Color::Black);
        assert_eq!(score.result_string(), format!("B+{}", (N * N) as f64 - WIN_THRESHOLD));
    }

    #[test]
    fn test_enclosed_region_and_dame() {
        // Black wall on column 1 encloses column 0; white wall on column 3.
        // Column 2 touches both walls and is dame.
        let mut board = Board::new();
        for row in 0..N {
            board.set((row, 1), Some(Color::Black));
            board.set((row, 3), Some(Color::White));
        }
        let regions = territory_regions(&board);
        assert_eq!(regions.len(), 3);

        let owned_by = |owner: Option<Color>| -> usize {
            regions
                .iter()
                .filter(|r| r.owner == owner)
                .map(|r| r.points.len())
                .sum()
        };
        assert_eq!(owned_by(Some(Color::Black)), N);
        assert_eq!(owned_by(None), N);
        assert_eq!(owned_by(Some(Color::White)), N * (N - 4));

        let score = final_score(&board);
        assert_eq!(score.black, 2 * N);
        assert_eq!(score.white, N + N * (N - 4));
        assert_eq!(score.winner, Color::White);
    }

    #[test]
    fn test_result_margin_from_threshold() {
        // Black leads on the board but stays under the threshold because of dame.
        let score = FinalScore {
            black: 38,
            white: 30,
            winner: Color::White,
        };
        assert_eq!(score.result_string(), format!("W+{}", WIN_THRESHOLD - 38.0));
        assert_ne!(score.result_string(), "W+0");

        let score = FinalScore {
            black: 41,
            white: 40,
            winner: Color::Black,
        };
        assert_eq!(score.result_string(), format!("B+{}", 41.0 - WIN_THRESHOLD));
    }

    #[test]
    fn test_every_empty_point_counted_once() {
        let mut board = Board::new();
        for (r, c) in [(0, 3), (1, 3), (2, 2), (3, 1), (4, 0), (6, 6), (7, 5)] {
            board.set((r, c), Some(Color::Black));
        }
        board.set((5, 5), Some(Color::White));
        let total: usize = territory_regions(&board).iter().map(|r| r.points.len()).sum();
        assert_eq!(total, N * N - board.stone_count());
    }
}
