//! Group and liberty analysis by flood fill.
//!
//! Groups and liberties are never cached: every query walks the board
//! snapshot it is handed. Each traversal marks visited points so a stone is
//! expanded at most once, which keeps ring-shaped groups from looping.

use crate::board::{Board, Point};
use crate::constants::{BOARD_POINTS, N};

#[inline]
fn idx((row, col): Point) -> usize {
    row * N + col
}

/// Collect all stones in the group containing `start`.
///
/// Appends the stones to `out` and returns how many were added. An empty
/// start point yields an empty group.
pub fn collect_group(board: &Board, start: Point, out: &mut Vec<Point>) -> usize {
    let Some(color) = board.get(start) else {
        return 0;
    };
    let mut stack = vec![start];
    let mut visited = [false; BOARD_POINTS];
    let mut count = 0;

    while let Some(pt) = stack.pop() {
        if visited[idx(pt)] {
            continue;
        }
        visited[idx(pt)] = true;
        out.push(pt);
        count += 1;
        for n in Board::neighbors(pt) {
            if !visited[idx(n)] && board.get(n) == Some(color) {
                stack.push(n);
            }
        }
    }
    count
}

/// The group containing `start`, in traversal order.
pub fn group_at(board: &Board, start: Point) -> Vec<Point> {
    let mut group = Vec::new();
    collect_group(board, start, &mut group);
    group
}

/// Check whether the group through `start` has at least one liberty.
///
/// Stops at the first empty neighbor found anywhere in the group.
pub fn has_liberty(board: &Board, start: Point) -> bool {
    let Some(color) = board.get(start) else {
        return false;
    };
    let mut stack = vec![start];
    let mut visited = [false; BOARD_POINTS];

    while let Some(pt) = stack.pop() {
        if visited[idx(pt)] {
            continue;
        }
        visited[idx(pt)] = true;
        for n in Board::neighbors(pt) {
            match board.get(n) {
                None => return true,
                Some(c) if c == color && !visited[idx(n)] => stack.push(n),
                _ => {}
            }
        }
    }
    false
}

/// The distinct liberties of the group through `start`.
///
/// A point adjacent to several stones of the group appears once.
pub fn liberties(board: &Board, start: Point) -> Vec<Point> {
    let Some(color) = board.get(start) else {
        return Vec::new();
    };
    let mut stack = vec![start];
    let mut visited = [false; BOARD_POINTS];
    let mut liberty_visited = [false; BOARD_POINTS];
    let mut libs = Vec::new();

    while let Some(pt) = stack.pop() {
        if visited[idx(pt)] {
            continue;
        }
        visited[idx(pt)] = true;
        for n in Board::neighbors(pt) {
            match board.get(n) {
                None => {
                    if !liberty_visited[idx(n)] {
                        liberty_visited[idx(n)] = true;
                        libs.push(n);
                    }
                }
                Some(c) if c == color && !visited[idx(n)] => stack.push(n),
                _ => {}
            }
        }
    }
    libs
}

/// Number of distinct liberties of the group through `start` (0 for an empty point).
pub fn count_liberties(board: &Board, start: Point) -> usize {
    liberties(board, start).len()
}

/// Every stone whose group has exactly one liberty, in row-major order.
pub fn stones_in_atari(board: &Board) -> Vec<Point> {
    let mut seen = [false; BOARD_POINTS];
    let mut stones = Vec::new();
    for pt in Board::points() {
        if seen[idx(pt)] || board.is_empty_at(pt) {
            continue;
        }
        let group = group_at(board, pt);
        for &s in &group {
            seen[idx(s)] = true;
        }
        if count_liberties(board, pt) == 1 {
            stones.extend(group);
        }
    }
    stones.sort_unstable();
    stones
}
