//! Core game state and logic

use crate::board::{Board, DEFAULT_COLUMNS, DEFAULT_ROWS};
use crate::piece::Piece;
use crate::score::{Score, ScoringRules};
use crate::spawner::Spawner;
use crate::ticker::Ticker;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Default gravity interval
pub const DEFAULT_SPEED: Duration = Duration::from_millis(1000);

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameState {
    Running,
    GameOver,
}

/// Player commands the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Drop,
    Rotate,
}

/// Notifications for the app loop, drained with `take_events`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece settled; `points` is what it earned
    Merged { rows_cleared: usize, points: u64 },
    GameOver { final_score: u64 },
}

/// Construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    /// Gravity interval
    pub speed: Duration,
    pub scoring: ScoringRules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            speed: DEFAULT_SPEED,
            scoring: ScoringRules::default(),
        }
    }
}

/// Read-only view handed to renderers
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub board: &'a Board,
    pub piece: &'a Piece,
    pub score: &'a Score,
    pub state: GameState,
}

/// The main game struct
pub struct Game {
    board: Board,
    /// Current falling piece
    piece: Piece,
    spawner: Spawner,
    score: Score,
    state: GameState,
    /// Gravity timer
    ticker: Ticker,
    events: Vec<GameEvent>,
}

impl Game {
    /// Create a new running game with a randomly seeded spawner
    pub fn new(config: GameConfig) -> Self {
        Self::with_spawner(config, Spawner::new())
    }

    /// Create a new running game dealing shapes from `spawner`
    pub fn with_spawner(config: GameConfig, mut spawner: Spawner) -> Self {
        let first = Piece::spawn(spawner.next(), config.columns);
        let mut game = Self {
            board: Board::new(config.rows, config.columns),
            piece: first,
            spawner,
            score: Score::new(config.scoring),
            state: GameState::Running,
            ticker: Ticker::new(config.speed),
            events: Vec::new(),
        };
        game.check_spawn();
        game
    }

    /// Reset everything and begin ticking. Safe to call at any time.
    pub fn start(&mut self) {
        self.board.reset();
        self.score.reset();
        self.events.clear();
        self.state = GameState::Running;
        self.ticker.restart();
        self.piece = Piece::spawn(self.spawner.next(), self.board.columns());
        info!(
            "Game started on {}x{} board, speed={:?}",
            self.board.rows(),
            self.board.columns(),
            self.ticker.interval()
        );
        self.check_spawn();
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> &Piece {
        &self.piece
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            board: &self.board,
            piece: &self.piece,
            score: &self.score,
            state: self.state,
        }
    }

    /// Drain pending notifications
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Feed elapsed time to the gravity timer (call every frame)
    pub fn update(&mut self, elapsed: Duration) {
        if self.state != GameState::Running {
            return;
        }
        if self.ticker.advance(elapsed) {
            self.tick();
        }
    }

    /// Process a player command. Ignored once the game is over
    pub fn process_command(&mut self, command: Command) {
        if self.state != GameState::Running {
            return;
        }
        match command {
            Command::MoveLeft => {
                self.translate(-1);
            }
            Command::MoveRight => {
                self.translate(1);
            }
            Command::Rotate => {
                self.piece.rotate(&self.board);
            }
            Command::Drop => {
                self.tick();
                self.ticker.reset();
            }
        }
    }

    /// Shift the piece sideways; a blocked move leaves it where it was
    pub fn translate(&mut self, dx: i32) -> bool {
        self.state == GameState::Running && self.piece.translate(dx, &self.board)
    }

    /// One gravity step: move down, or settle the piece and bring in the next
    pub fn tick(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        if self.piece.step_down(&self.board) {
            return;
        }

        // Blocked: the piece is still at its last legal position
        self.board
            .merge(&self.piece.shape, self.piece.color, self.piece.position);
        let rows_cleared = self.board.clear_full_rows();
        let points = self.score.record_merge(rows_cleared);
        debug!(
            "Merged {:?} at ({}, {}), cleared {} rows, +{} points",
            self.piece.kind, self.piece.position.x, self.piece.position.y, rows_cleared, points
        );
        self.events.push(GameEvent::Merged {
            rows_cleared,
            points,
        });

        self.piece = Piece::spawn(self.spawner.next(), self.board.columns());
        self.check_spawn();
    }

    /// Top out if the freshly spawned piece overlaps the stack
    fn check_spawn(&mut self) {
        if !self.piece.collides(&self.board) {
            return;
        }
        self.state = GameState::GameOver;
        self.ticker.cancel();
        info!(
            "Game over: score={}, lines={}, pieces={}",
            self.score.points, self.score.lines, self.score.pieces
        );
        self.events.push(GameEvent::GameOver {
            final_score: self.score.points,
        });
    }
}
