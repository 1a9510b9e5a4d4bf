//! Append-only record of board snapshots for ko detection.

use crate::board::Board;

/// Snapshots taken after every committed move or pass.
///
/// The last entry is the live position once at least one ply has been played,
/// so the entry before it is the position the opponent just moved from.
#[derive(Clone, Debug, Default)]
pub struct History {
    snapshots: Vec<Board>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the position reached by a committed move or pass.
    pub fn push(&mut self, board: Board) {
        self.snapshots.push(board);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn last(&self) -> Option<&Board> {
        self.snapshots.last()
    }

    /// Check whether `candidate` recreates the position from two plies ago.
    ///
    /// Only that single position is compared; earlier repetitions are allowed.
    pub fn is_ko_violation(&self, candidate: &Board) -> bool {
        let len = self.snapshots.len();
        len >= 2 && self.snapshots[len - 2] == *candidate
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
