use crate::piece::ActivePiece;
use crate::types::{PieceKind, Point, COLUMNS, FIRST_LEVEL, SPAWN_POINT, VISIBLE_ROWS};

/// The falling piece as drawn: its kind and four cell positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub cells: [Point; 4],
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind(),
            cells: *value.cells(),
        }
    }
}

impl Default for ActiveSnapshot {
    fn default() -> Self {
        Self {
            kind: PieceKind::I,
            cells: [SPAWN_POINT; 4],
        }
    }
}

/// Read-only view of a session, cheap to copy into a renderer each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Visible rows; 0 = empty, otherwise piece kind index + 1.
    pub board: [[u8; COLUMNS]; VISIBLE_ROWS],
    pub active: ActiveSnapshot,
    pub next: PieceKind,
    pub paused: bool,
    pub game_over: bool,
    /// Seed the session was created with (shown so a game can be replayed).
    pub seed: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; COLUMNS]; VISIBLE_ROWS];
        self.active = ActiveSnapshot::default();
        self.next = PieceKind::I;
        self.paused = false;
        self.game_over = false;
        self.seed = 0;
        self.score = 0;
        self.level = FIRST_LEVEL;
        self.lines = 0;
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; COLUMNS]; VISIBLE_ROWS],
            active: ActiveSnapshot::default(),
            next: PieceKind::I,
            paused: false,
            game_over: false,
            seed: 0,
            score: 0,
            level: 0,
            lines: 0,
        };
        s.clear();
        s
    }
}
