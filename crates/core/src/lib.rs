//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on the terminal, input devices, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces the identical piece sequence
//! - **Testable**: Board fixtures can be built directly on a [`GameState`]
//! - **Portable**: Can run headless (benches, tests) or behind any renderer
//!
//! # Module Structure
//!
//! - [`geometry`]: Cell offsets for every piece kind and rotation
//! - [`grid`]: Settled cells, row completion and row clearing
//! - [`collision`]: Wall, floor and overlap checks in pixel-equivalent space
//! - [`piece`]: The active piece: spawn, move, rotate, fall
//! - [`rng`]: Next-piece randomizer with the anti-repeat reroll
//! - [`scoring`]: Points per lock and the gravity speed-up per level
//! - [`game_state`]: Complete session: tick loop, locking, pause, reset
//! - [`snapshot`]: Copyable read-only view for renderers
//!
//! # Game Rules
//!
//! - **No wall kicks**: a rotation either fits in place or is refused
//! - **No lock delay**: a piece locks on the first gravity step it cannot take
//! - **No hard drop or hold**: soft drop is the only way to speed a piece up
//! - **Scoring**: 100 per line, doubled when one lock clears two or more rows
//! - **Levels**: every 10 lines; gravity goes 15 → 5 → 2 ticks per half-unit step
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::SoftDropPressed);
//!
//! for _ in 0..10 {
//!     game.tick();
//! }
//!
//! assert_eq!(game.score(), 0);
//! assert!(!game.game_over());
//! ```
//!
//! # Timing
//!
//! The game uses a fixed timestep: call [`GameState::tick`] once every
//! [`types::TICK_MS`] milliseconds. Gravity moves the piece half a grid unit
//! every [`GameState::ticks_per_fall`] ticks.

pub mod collision;
pub mod game_state;
pub mod geometry;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use collision::{placement_collides, would_collide};
pub use game_state::{GameState, Phase};
pub use geometry::{shape, spawn_shape};
pub use grid::{Grid, SettledCell};
pub use piece::{ActivePiece, FallOutcome};
pub use rng::{RandomSource, Randomizer, SimpleRng};
pub use scoring::{faster_ticks_per_fall, is_level_boundary, lock_points};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
