//! Game state module - manages the complete game session
//!
//! This module ties together the grid, the active piece, the randomizer and the
//! scoring rules. It owns the tick counter that turns the fixed ~60 Hz timestep
//! into gravity steps, dispatches player actions, and resets the session.

use log::{debug, info};

use crate::piece::{ActivePiece, FallOutcome};
use crate::scoring::{faster_ticks_per_fall, is_level_boundary, lock_points};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;
use crate::{Grid, Randomizer};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Gravity runs and input is accepted.
    Playing,
    /// Gravity is frozen; only `Pause` and `Reset` are accepted.
    Paused,
    /// The last spawn was blocked. Only `Reset` leaves this state.
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    piece: ActivePiece,
    randomizer: Randomizer,
    /// Seed the session was created with.
    seed: u32,
    /// Last lock outcome (consumed by observers).
    last_event: Option<LockEvent>,
    score: u32,
    level: u32,
    lines: u32,
    /// Ticks since the last gravity step.
    ticks: u32,
    /// Gravity interval for the current level.
    level_ticks_per_fall: u32,
    soft_drop: bool,
    phase: Phase,
}

impl GameState {
    /// Create a new game with the given RNG seed and spawn the first piece
    pub fn new(seed: u32) -> Self {
        let mut randomizer = Randomizer::new(seed);
        let piece = ActivePiece::spawn(&mut randomizer);

        Self {
            grid: Grid::new(),
            piece,
            randomizer,
            seed,
            last_event: None,
            score: 0,
            level: FIRST_LEVEL,
            lines: 0,
            ticks: 0,
            level_ticks_per_fall: BASE_TICKS_PER_FALL,
            soft_drop: false,
            phase: Phase::Playing,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    pub fn piece(&self) -> &ActivePiece {
        &self.piece
    }

    pub fn next_kind(&self) -> PieceKind {
        self.piece.next_kind()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for building board fixtures.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Replace the active piece (board fixtures, replays).
    pub fn set_piece(&mut self, piece: ActivePiece) {
        self.piece = piece;
    }

    /// Gravity interval for the current level, ignoring soft drop
    pub fn level_ticks_per_fall(&self) -> u32 {
        self.level_ticks_per_fall
    }

    /// Effective gravity interval: soft drop overrides the level speed while held
    pub fn ticks_per_fall(&self) -> u32 {
        if self.soft_drop {
            SOFT_DROP_TICKS_PER_FALL
        } else {
            self.level_ticks_per_fall
        }
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_visible_rows(&mut out.board);

        out.active = ActiveSnapshot::from(self.piece);
        out.next = self.piece.next_kind();
        out.paused = self.paused();
        out.game_over = self.game_over();
        out.seed = self.seed;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance one fixed timestep.
    ///
    /// Returns true when this tick ran a gravity step.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }

        self.ticks += 1;
        if self.ticks < self.ticks_per_fall() {
            return false;
        }
        self.ticks = 0;

        match self.piece.fall(&self.grid, FALL_STEP) {
            FallOutcome::Fell => {}
            FallOutcome::Landed => self.lock_piece(),
            FallOutcome::Blocked => {
                self.phase = Phase::GameOver;
                self.soft_drop = false;
                info!(
                    "game over: score={} level={} lines={}",
                    self.score, self.level, self.lines
                );
            }
        }
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.phase == Phase::Playing && self.piece.move_left(&self.grid)
    }

    pub fn move_right(&mut self) -> bool {
        self.phase == Phase::Playing && self.piece.move_right(&self.grid)
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.phase == Phase::Playing && self.piece.rotate_cw(&self.grid)
    }

    /// Hold or release the soft-drop key.
    ///
    /// Pressing is only accepted while playing; releasing always restores the
    /// level speed. Returns true if the state changed.
    pub fn set_soft_drop(&mut self, held: bool) -> bool {
        if held && self.phase != Phase::Playing {
            return false;
        }
        let changed = self.soft_drop != held;
        self.soft_drop = held;
        changed
    }

    /// Pause or resume. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            Phase::GameOver => return false,
        };
        debug!("pause toggled: {:?}", self.phase);
        true
    }

    /// Start over with an empty grid and a fresh piece.
    ///
    /// The randomizer keeps running, so a reset does not replay the previous
    /// piece sequence.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.piece = ActivePiece::spawn(&mut self.randomizer);
        self.last_event = None;
        self.score = 0;
        self.level = FIRST_LEVEL;
        self.lines = 0;
        self.ticks = 0;
        self.level_ticks_per_fall = BASE_TICKS_PER_FALL;
        self.soft_drop = false;
        self.phase = Phase::Playing;
        info!("reset: seed={}", self.seed);
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::SoftDropPressed => self.set_soft_drop(true),
            GameAction::SoftDropReleased => self.set_soft_drop(false),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Commit the landed piece, respawn, then clear lines and score.
    fn lock_piece(&mut self) {
        let kind = self.piece.kind();
        let committed = self.grid.commit(self.piece.cells(), kind);
        debug_assert!(committed, "landed piece overlaps settled cells: {:?}", self.piece.cells());
        self.soft_drop = false;
        self.piece.reset_piece(&mut self.randomizer);

        let event = self.analyze_grid();
        debug!(
            "locked {}: cleared={} points={}",
            kind.as_str(),
            event.lines_cleared,
            event.points
        );
        self.last_event = Some(event);
    }

    fn analyze_grid(&mut self) -> LockEvent {
        let mut cleared = 0;
        let mut leveled_up = false;

        while let Some(y) = self.grid.clear_next_full_row() {
            cleared += 1;
            self.lines += 1;
            debug!("cleared row y={}", y);

            if is_level_boundary(self.lines) {
                self.level += 1;
                self.level_ticks_per_fall = faster_ticks_per_fall(self.level_ticks_per_fall);
                leveled_up = true;
                info!(
                    "level up: level={} ticks_per_fall={}",
                    self.level, self.level_ticks_per_fall
                );
            }
        }

        let points = lock_points(cleared);
        self.score += points;

        LockEvent {
            lines_cleared: cleared,
            points,
            leveled_up,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
