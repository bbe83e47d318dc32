//! Grid module - the settled cells
//!
//! The grid is the set of cells left behind by locked pieces. Each cell keeps
//! its pixel-equivalent position and the kind of the piece that produced it.
//! Cells are independent once committed: clearing a row never looks back at
//! the piece they came from.
//!
//! Cells may sit above row 0 (a piece can lock while still partly above the
//! field). Only rows 0..VISIBLE_ROWS are ever checked for completion, so such
//! cells stay until a clear below them shifts them into view.

use crate::types::{
    PieceKind, Point, COLUMNS, GRID_UNIT, PLAYFIELD_BOTTOM, PLAYFIELD_LEFT, VISIBLE_ROWS,
};

/// A cell left behind by a locked piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettledCell {
    pub pos: Point,
    pub kind: PieceKind,
}

/// All settled cells. No two cells share a position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    cells: Vec<SettledCell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: Vec::with_capacity(COLUMNS * VISIBLE_ROWS),
        }
    }

    pub fn cells(&self) -> &[SettledCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Kind of the settled cell at exactly `pos`, if any
    pub fn occupant(&self, pos: Point) -> Option<PieceKind> {
        self.cells.iter().find(|c| c.pos == pos).map(|c| c.kind)
    }

    /// Add a single cell. Returns false if the position is already taken.
    pub fn insert(&mut self, pos: Point, kind: PieceKind) -> bool {
        if self.occupant(pos).is_some() {
            return false;
        }
        self.cells.push(SettledCell { pos, kind });
        true
    }

    /// Commit a locked piece's cells
    /// Returns false (and commits nothing) if any position is already taken
    pub fn commit(&mut self, cells: &[Point], kind: PieceKind) -> bool {
        // First check that all positions are free
        for (i, pos) in cells.iter().enumerate() {
            if self.occupant(*pos).is_some() || cells[..i].contains(pos) {
                return false;
            }
        }

        self.cells
            .extend(cells.iter().map(|&pos| SettledCell { pos, kind }));
        true
    }

    /// Number of settled cells whose top edge is exactly `y`
    pub fn row_count(&self, y: i32) -> usize {
        self.cells.iter().filter(|c| c.pos.y == y).count()
    }

    /// Check if the row at `y` holds a cell in every column
    pub fn is_row_full(&self, y: i32) -> bool {
        self.row_count(y) == COLUMNS
    }

    /// Remove every cell on row `y` and pull the cells above it down one unit.
    ///
    /// Cells below the row stay where they are. Returns the number of cells removed.
    pub fn clear_row(&mut self, y: i32) -> usize {
        let before = self.cells.len();
        self.cells.retain(|c| c.pos.y != y);
        let removed = before - self.cells.len();

        for cell in &mut self.cells {
            if cell.pos.y < y {
                cell.pos.y += GRID_UNIT;
            }
        }

        removed
    }

    /// Scan visible rows top to bottom and clear the first full one.
    ///
    /// Returns the cleared row's y. Shifting can complete another row, so
    /// callers repeat until this returns `None`.
    pub fn clear_next_full_row(&mut self) -> Option<i32> {
        let y = (0..PLAYFIELD_BOTTOM)
            .step_by(GRID_UNIT as usize)
            .find(|&y| self.is_row_full(y))?;
        self.clear_row(y);
        Some(y)
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Write the visible rows as a u8 board: 0 = empty, 1..=7 = piece kind index + 1.
    ///
    /// Cells above the field or off the column lattice are skipped.
    pub fn write_visible_rows(&self, out: &mut [[u8; COLUMNS]; VISIBLE_ROWS]) {
        for row in out.iter_mut() {
            row.fill(0);
        }

        for cell in &self.cells {
            let (Some(col), Some(row)) = (column_of(cell.pos.x), row_of(cell.pos.y)) else {
                continue;
            };
            out[row][col] = cell.kind.index() as u8 + 1;
        }
    }
}

/// Column index of a cell whose left edge is at `x`
pub fn column_of(x: i32) -> Option<usize> {
    let dx = x - PLAYFIELD_LEFT;
    if dx < 0 || dx % GRID_UNIT != 0 {
        return None;
    }
    let col = (dx / GRID_UNIT) as usize;
    (col < COLUMNS).then_some(col)
}

/// Visible row index of a cell whose top edge is at `y`
pub fn row_of(y: i32) -> Option<usize> {
    if y < 0 || y % GRID_UNIT != 0 {
        return None;
    }
    let row = (y / GRID_UNIT) as usize;
    (row < VISIBLE_ROWS).then_some(row)
}

/// Top edge of visible row `row`
pub fn row_y(row: usize) -> i32 {
    row as i32 * GRID_UNIT
}

/// Left edge of column `col`
pub fn column_x(col: usize) -> i32 {
    PLAYFIELD_LEFT + col as i32 * GRID_UNIT
}
