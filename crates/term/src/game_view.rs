//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! One grid unit is drawn as `cell_w` x `cell_h` terminal cells. Piece
//! positions are pixel-equivalent, so the active piece's rows are found with a
//! floor division by [`GRID_UNIT`]: a piece half a unit into a row is drawn in
//! that row, and anything above row 0 is clipped.

use crate::core::grid::column_of;
use crate::core::{spawn_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Point, COLUMNS, GRID_UNIT, VISIBLE_ROWS};

/// Piece colours, indexed by [`PieceKind::index`].
pub const PALETTE: [Rgb; 7] = [
    Rgb::new(0xdc, 0xa3, 0xff),
    Rgb::new(0xff, 0x90, 0xa0),
    Rgb::new(0x80, 0xff, 0xb4),
    Rgb::new(0xff, 0x76, 0x66),
    Rgb::new(0x70, 0xb3, 0xf5),
    Rgb::new(0xb2, 0xe7, 0x7d),
    Rgb::new(0xff, 0xd7, 0x00),
];

const FIELD_BG: Rgb = Rgb::new(0xe1, 0xee, 0xb0);
const FRAME: Rgb = Rgb::new(0x30, 0x45, 0x50);
const DARK: Rgb = Rgb::new(0x0d, 0x0d, 0x0d);
const SIDE_BG: Rgb = Rgb::new(25, 25, 25);

const LEGEND: [&str; 6] = [
    "← →  move",
    "↑    rotate",
    "↓    fall faster",
    "P    pause",
    "R    reset game",
    "Q    quit",
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen position of the playfield frame for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Grid unit width in terminal columns.
    cell_w: u16,
    /// Grid unit height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per unit keeps cells roughly square.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = COLUMNS as u16 * self.cell_w + 2;
        let frame_h = VISIBLE_ROWS as u16 * self.cell_h + 2;
        let frame_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            frame_x: viewport.width.saturating_sub(frame_w) / 2,
            frame_y,
            frame_w,
            frame_h,
        }
    }

    /// Terminal position of the top-left corner of grid cell (`col`, `row`).
    pub fn cell_origin(&self, layout: Layout, col: u16, row: u16) -> (u16, u16) {
        (
            layout.frame_x + 1 + col * self.cell_w,
            layout.frame_y + 1 + row * self.cell_h,
        )
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized when
    /// the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(FIELD_BG, SIDE_BG).cell(' '));

        let layout = self.layout(viewport);
        let field = CellStyle::new(FRAME, FIELD_BG);

        fb.fill_rect(
            layout.frame_x + 1,
            layout.frame_y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            field,
        );
        self.draw_border(fb, layout, CellStyle::new(FRAME, SIDE_BG).bold());

        // Settled cells.
        for (row, cells) in snap.board.iter().enumerate() {
            for (col, &v) in cells.iter().enumerate() {
                match piece_from_cell(v) {
                    Some(kind) => self.draw_piece_cell(fb, layout, col as u16, row as u16, kind),
                    None => self.draw_empty_cell(fb, layout, col as u16, row as u16),
                }
            }
        }

        // Active piece.
        for &cell in snap.active.cells.iter() {
            if let Some((col, row)) = visible_cell(cell) {
                self.draw_piece_cell(fb, layout, col, row, snap.active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        // Overlays.
        if snap.paused {
            self.draw_overlay_text(fb, layout, "PAUSED");
        } else if snap.game_over {
            self.draw_overlay_text(fb, layout, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: Layout, style: CellStyle) {
        let Layout {
            frame_x: x,
            frame_y: y,
            frame_w: w,
            frame_h: h,
        } = layout;

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, layout: Layout, col: u16, row: u16) {
        let style = CellStyle::new(FRAME, FIELD_BG).dim();
        let (px, py) = self.cell_origin(layout, col, row);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px, py, '·', style);
    }

    fn draw_piece_cell(&self, fb: &mut FrameBuffer, layout: Layout, col: u16, row: u16, kind: PieceKind) {
        let (px, py) = self.cell_origin(layout, col, row);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', piece_style(kind));
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, layout: Layout) {
        let panel_x = layout.frame_x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(FIELD_BG, SIDE_BG).bold();
        let value = CellStyle::new(Rgb::new(255, 255, 255), SIDE_BG);

        let mut y = layout.frame_y;
        let counters = [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("SEED", snap.seed),
        ];
        for (name, n) in counters {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        // Spawn shapes span rows -1..=0 and columns -2..=1 around the anchor.
        for (dx, dy) in spawn_shape(snap.next) {
            let px = panel_x + (dx + 2) as u16 * self.cell_w;
            let py = y + (dy + 1) as u16;
            fb.fill_rect(px, py, self.cell_w, 1, '█', CellStyle::new(piece_color(snap.next), SIDE_BG));
        }
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "CONTROLS", label);
        y = y.saturating_add(1);
        let legend = CellStyle::new(Rgb::new(200, 200, 200), SIDE_BG);
        for line in LEGEND {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, legend);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: Layout, text: &str) {
        let mid_y = layout.frame_y.saturating_add(layout.frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = layout
            .frame_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(FIELD_BG, DARK).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

/// Grid cell of a pixel-equivalent position, or `None` if it is off screen.
pub fn visible_cell(pos: Point) -> Option<(u16, u16)> {
    let col = column_of(pos.x)?;
    let row = pos.y.div_euclid(GRID_UNIT);
    if row < 0 || row as usize >= VISIBLE_ROWS {
        return None;
    }
    Some((col as u16, row as u16))
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    PALETTE[kind.index()]
}

fn piece_style(kind: PieceKind) -> CellStyle {
    CellStyle::new(piece_color(kind), FIELD_BG)
}

fn piece_from_cell(v: u8) -> Option<PieceKind> {
    PieceKind::from_index((v as usize).checked_sub(1)?)
}
