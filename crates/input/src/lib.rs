//! Terminal input module.
//!
//! This module is independent of the renderer. It maps `crossterm` key events
//! into [`crate::types::GameAction`] and provides a DAS/ARR input handler
//! suitable for terminal environments (including terminals without
//! key-release events).

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::{HorizontalDirection, InputHandler};
pub use map::{handle_key_event, handle_key_release, should_quit};
