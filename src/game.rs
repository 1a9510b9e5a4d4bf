//! Game controller: turn order, passes, resignation and game end.
//!
//! The controller owns the live board and its history. Every operation is a
//! synchronous call that either commits a ply and returns the events a
//! presentation layer should replay, or returns a [`MoveError`] and leaves
//! the state untouched. The AI only ever sees copies.

use crate::ai::select_move;
use crate::board::{Board, Color, Move, Point};
use crate::constants::PASSES_TO_END;
use crate::group::{count_liberties, stones_in_atari};
use crate::history::History;
use crate::rules::{check_move, MoveError};
use crate::scoring::final_score;

/// How the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Two consecutive passes followed by area scoring.
    Score,
    /// The given side resigned.
    Resignation(Color),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub black_score: usize,
    pub white_score: usize,
    pub winner: Color,
    pub reason: EndReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    AwaitingMove(Color),
    GameOver(GameResult),
}

/// State transitions produced by a committed ply, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    StonePlaced { point: Point, color: Color },
    /// Stones of `color` removed from the board.
    StonesCaptured { color: Color, points: Vec<Point> },
    Passed(Color),
    Resigned(Color),
    GameEnded(GameResult),
}

/// The position after a committed ply plus what changed to get there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub board: Board,
    pub events: Vec<GameEvent>,
}

/// Stones currently on the board, for in-progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveScore {
    pub black: usize,
    pub white: usize,
}

pub struct Game {
    board: Board,
    history: History,
    state: GameState,
    consecutive_passes: u32,
    ai_color: Option<Color>,
    rng: fastrand::Rng,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A new game, Black to move, AI playing White.
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    /// A new game whose AI draws from a seeded random source.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            board: Board::new(),
            history: History::new(),
            state: GameState::AwaitingMove(Color::Black),
            consecutive_passes: 0,
            ai_color: Some(Color::White),
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// The side to move, or `None` once the game is over.
    pub fn to_move(&self) -> Option<Color> {
        match self.state {
            GameState::AwaitingMove(c) => Some(c),
            GameState::GameOver(_) => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, GameState::GameOver(_))
    }

    pub fn result(&self) -> Option<GameResult> {
        match self.state {
            GameState::GameOver(r) => Some(r),
            GameState::AwaitingMove(_) => None,
        }
    }

    /// Which side the AI plays, if any.
    pub fn ai_color(&self) -> Option<Color> {
        self.ai_color
    }

    pub fn set_ai_color(&mut self, color: Option<Color>) {
        self.ai_color = color;
    }

    /// Whether the side to move is played by the AI.
    pub fn is_ai_turn(&self) -> bool {
        self.ai_color.is_some() && self.to_move() == self.ai_color
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    fn expect_turn(&self, color: Color) -> Result<(), MoveError> {
        match self.state {
            GameState::GameOver(_) => Err(MoveError::GameOver),
            GameState::AwaitingMove(c) if c != color => Err(MoveError::WrongTurn(color)),
            GameState::AwaitingMove(_) => Ok(()),
        }
    }

    /// Place a stone for `color` at `pt`.
    pub fn apply_move(&mut self, pt: Point, color: Color) -> Result<MoveReport, MoveError> {
        self.expect_turn(color)?;
        let (next, captured) = check_move(&self.board, pt, color, &self.history)?;

        let mut events = vec![GameEvent::StonePlaced { point: pt, color }];
        if !captured.is_empty() {
            events.push(GameEvent::StonesCaptured {
                color: color.opponent(),
                points: captured,
            });
        }

        self.history.push(next.clone());
        self.board = next;
        self.consecutive_passes = 0;
        self.state = GameState::AwaitingMove(color.opponent());
        Ok(MoveReport {
            board: self.board.clone(),
            events,
        })
    }

    /// Pass for `color`. The second consecutive pass ends and scores the game.
    pub fn pass(&mut self, color: Color) -> Result<MoveReport, MoveError> {
        self.expect_turn(color)?;
        self.history.push(self.board.clone());
        self.consecutive_passes += 1;

        let mut events = vec![GameEvent::Passed(color)];
        if self.consecutive_passes >= PASSES_TO_END {
            events.push(GameEvent::GameEnded(self.end_game()));
        } else {
            self.state = GameState::AwaitingMove(color.opponent());
        }
        Ok(MoveReport {
            board: self.board.clone(),
            events,
        })
    }

    /// Play a move or a pass for `color`.
    pub fn play(&mut self, mv: Move, color: Color) -> Result<MoveReport, MoveError> {
        match mv {
            Move::Place(pt) => self.apply_move(pt, color),
            Move::Pass => self.pass(color),
        }
    }

    /// `color` concedes; the opponent wins regardless of the count.
    pub fn resign(&mut self, color: Color) -> Result<MoveReport, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let score = final_score(&self.board);
        let result = GameResult {
            black_score: score.black,
            white_score: score.white,
            winner: color.opponent(),
            reason: EndReason::Resignation(color),
        };
        tracing::info!(%color, "resigned");
        self.state = GameState::GameOver(result);
        Ok(MoveReport {
            board: self.board.clone(),
            events: vec![GameEvent::Resigned(color), GameEvent::GameEnded(result)],
        })
    }

    /// The AI's choice for the side to move. Nothing is committed.
    ///
    /// Returns `Pass` once the game is over.
    pub fn request_ai_move(&mut self) -> Move {
        match self.to_move() {
            Some(color) => select_move(&self.board, color, &self.history, &mut self.rng),
            None => Move::Pass,
        }
    }

    /// Let the AI choose and commit a move for the side to move.
    pub fn play_ai(&mut self) -> Result<(Move, MoveReport), MoveError> {
        let color = self.to_move().ok_or(MoveError::GameOver)?;
        let mv = self.request_ai_move();
        let report = self.play(mv, color)?;
        Ok((mv, report))
    }

    /// Stones on the board per color (not the final area count).
    pub fn score(&self) -> LiveScore {
        LiveScore {
            black: self.board.count(Color::Black),
            white: self.board.count(Color::White),
        }
    }

    /// Score the board and finish the game. Once over, returns the stored result.
    pub fn end_game(&mut self) -> GameResult {
        if let GameState::GameOver(result) = self.state {
            return result;
        }
        let score = final_score(&self.board);
        let result = GameResult {
            black_score: score.black,
            white_score: score.white,
            winner: score.winner,
            reason: EndReason::Score,
        };
        tracing::info!(
            black = result.black_score,
            white = result.white_score,
            winner = %result.winner,
            "game over"
        );
        self.state = GameState::GameOver(result);
        result
    }

    /// Liberties of the group through `pt`, or `None` for an empty point.
    pub fn liberties_at(&self, pt: Point) -> Option<usize> {
        self.board.get(pt).map(|_| count_liberties(&self.board, pt))
    }

    /// Stones whose group is down to one liberty.
    pub fn stones_in_atari(&self) -> Vec<Point> {
        stones_in_atari(&self.board)
    }

    /// Start over: empty board, Black to move, history cleared.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.history.clear();
        self.state = GameState::AwaitingMove(Color::Black);
        self.consecutive_passes = 0;
    }
}
