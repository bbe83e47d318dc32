//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout libraries and instead renders a [`GameSnapshot`](core::GameSnapshot)
//! into a framebuffer that is then flushed to the terminal.
//!
//! - [`fb`]: framebuffer of styled cells
//! - [`game_view`]: snapshot to framebuffer, no I/O
//! - [`renderer`]: framebuffer to terminal, with diffing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, visible_cell, AnchorY, GameView, Layout, Viewport, PALETTE};
pub use renderer::{encode_diff_into, encode_full_into, restore_terminal, TerminalRenderer};
