//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, input mapping, terminal rendering).
//!
//! # Playfield Geometry
//!
//! Positions are expressed in pixel-equivalent units. One grid unit is
//! [`GRID_UNIT`] units wide and tall, and a cell's position is its top-left corner.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRID_UNIT` | 30 | Width/height of one cell |
//! | `PLAYFIELD_LEFT` | 150 | Left edge of column 0 |
//! | `PLAYFIELD_RIGHT` | 450 | Right edge of column 9 |
//! | `PLAYFIELD_BOTTOM` | 540 | Bottom edge of the lowest row |
//! | `SPAWN_POINT` | (330, -60) | Anchor of a freshly spawned piece |
//!
//! The visible field therefore has 10 columns and 18 rows. Nothing bounds the
//! field from above: a piece spawns partly above row 0 and may lock there.
//!
//! # Gravity
//!
//! The simulation advances in fixed ticks of [`TICK_MS`]. Gravity moves the active
//! piece down by [`FALL_STEP`] (half a grid unit) once every N ticks:
//!
//! | Situation | Ticks per fall step |
//! |-----------|---------------------|
//! | Level 1 | 15 |
//! | Level 2 | 5 |
//! | Level 3+ | 2 (floor) |
//! | Soft drop held | 2 |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, Rotation, COLUMNS, VISIBLE_ROWS};
//!
//! assert_eq!(PieceKind::from_index(5), Some(PieceKind::T));
//!
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//!
//! assert_eq!(GameAction::SoftDropPressed.as_str(), "soft_drop_pressed");
//!
//! assert_eq!(COLUMNS, 10);
//! assert_eq!(VISIBLE_ROWS, 18);
//! ```

/// Width and height of one grid cell in pixel-equivalent units
pub const GRID_UNIT: i32 = 30;

/// Left boundary of the playfield
pub const PLAYFIELD_LEFT: i32 = 150;

/// Right boundary of the playfield
pub const PLAYFIELD_RIGHT: i32 = 450;

/// Bottom boundary of the playfield
pub const PLAYFIELD_BOTTOM: i32 = 540;

/// Number of columns; a row holding this many settled cells is full
pub const COLUMNS: usize = ((PLAYFIELD_RIGHT - PLAYFIELD_LEFT) / GRID_UNIT) as usize;

/// Number of rows between y = 0 and the bottom boundary
pub const VISIBLE_ROWS: usize = (PLAYFIELD_BOTTOM / GRID_UNIT) as usize;

/// Anchor position of a freshly spawned piece (above the field, centred)
pub const SPAWN_POINT: Point = Point::new(330, -60);

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Distance covered by one gravity step (half a grid unit)
pub const FALL_STEP: f32 = GRID_UNIT as f32 * 0.5;

/// Ticks between gravity steps at level 1
pub const BASE_TICKS_PER_FALL: u32 = 15;

/// Ticks between gravity steps while soft drop is held
pub const SOFT_DROP_TICKS_PER_FALL: u32 = 2;

/// Level-up never pushes the gravity interval below this
pub const MIN_TICKS_PER_FALL: u32 = 2;

/// Gravity interval reduction applied on each level-up
pub const TICKS_PER_FALL_STEP: u32 = 10;

/// Cleared lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points awarded per cleared row (before the multi-row bonus)
pub const POINTS_PER_LINE: u32 = 100;

/// Starting level
pub const FIRST_LEVEL: u32 = 1;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Idle time after which a held key is considered released on terminals
/// that never report key releases.
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// The seven piece kinds, in the order of the classic playfield palette.
///
/// - **I**: straight bar
/// - **J**: corner on the upper left
/// - **L**: corner on the upper right
/// - **O**: 2x2 square (the symmetric piece)
/// - **S**: S-shaped
/// - **T**: T-shaped
/// - **Z**: Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, indexed by [`PieceKind::index`].
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Position of this kind in [`PieceKind::ALL`] (0..=6).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`PieceKind::index`]; `None` outside 0..=6.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Single-letter name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Rotation states, cycling North → East → South → West → North.
///
/// North is the spawn orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }
}

/// A position in pixel-equivalent units (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by a raw pixel delta.
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Translate by whole grid cells.
    pub const fn offset_cells(self, dx: i8, dy: i8) -> Self {
        self.translate(dx as i32 * GRID_UNIT, dy as i32 * GRID_UNIT)
    }
}

/// Game actions that can be applied to the session
///
/// Every keyboard input ends up as one of these; each maps 1:1 to a session
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Soft-drop key went down: gravity speeds up while held
    SoftDropPressed,
    /// Soft-drop key went up: gravity returns to the level speed
    SoftDropReleased,
    /// Toggle pause state
    Pause,
    /// Start over (accepted in every state)
    Reset,
}

impl GameAction {
    /// Name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "move_left",
            GameAction::MoveRight => "move_right",
            GameAction::RotateCw => "rotate_cw",
            GameAction::SoftDropPressed => "soft_drop_pressed",
            GameAction::SoftDropReleased => "soft_drop_released",
            GameAction::Pause => "pause",
            GameAction::Reset => "reset",
        }
    }
}

/// Outcome of the most recent piece lock.
///
/// Kept on the session until an observer takes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// Points added to the score by this lock (multi-row bonus included).
    pub points: u32,
    /// Whether this lock crossed into a new level.
    pub leveled_up: bool,
}
