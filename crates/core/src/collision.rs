//! Collision module - placement legality
//!
//! Every move the active piece attempts is checked here first. The test is
//! done in pixel-equivalent space: a cell collides with a settled cell only
//! when both share the exact same x and their vertical spans intersect.
//! Vertical deltas may be fractional; they are rounded (ties to even) before
//! the overlap test, so legality is judged at the rounded landing spot.

use crate::geometry::shape;
use crate::grid::Grid;
use crate::piece::ActivePiece;
use crate::types::{
    PieceKind, Point, Rotation, GRID_UNIT, PLAYFIELD_BOTTOM, PLAYFIELD_LEFT, PLAYFIELD_RIGHT,
};

/// Would `piece` collide after moving by (`dx`, `dy`) and taking `rotation`?
///
/// Pass the piece's current rotation for a plain translation, or the candidate
/// rotation with a zero delta to test a rotation in place.
pub fn would_collide(grid: &Grid, piece: &ActivePiece, dx: i32, dy: f32, rotation: Rotation) -> bool {
    placement_collides(grid, piece.kind(), piece.anchor(), rotation, dx, dy)
}

/// Same test as [`would_collide`] for an arbitrary placement.
pub fn placement_collides(
    grid: &Grid,
    kind: PieceKind,
    anchor: Point,
    rotation: Rotation,
    dx: i32,
    dy: f32,
) -> bool {
    shape(kind, rotation).iter().any(|&(ox, oy)| {
        let origin = anchor.offset_cells(ox, oy);
        let x = origin.x + dx;
        let y = (origin.y as f32 + dy).round_ties_even() as i32;
        cell_collides(grid, x, y)
    })
}

/// Does a cell with its top-left corner at (`x`, `y`) leave the field or overlap the grid?
pub fn cell_collides(grid: &Grid, x: i32, y: i32) -> bool {
    if x < PLAYFIELD_LEFT || x + GRID_UNIT > PLAYFIELD_RIGHT || y + GRID_UNIT > PLAYFIELD_BOTTOM {
        return true;
    }

    grid.cells().iter().any(|settled| {
        if settled.pos.x != x {
            return false;
        }
        let top = settled.pos.y;
        let bottom = top + GRID_UNIT;
        let top_inside = y >= top && y < bottom;
        let bottom_inside = y + GRID_UNIT > top && y + GRID_UNIT <= bottom;
        top_inside || bottom_inside
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walls_and_floor() {
        let grid = Grid::new();
        assert!(!cell_collides(&grid, 150, 0));
        assert!(!cell_collides(&grid, 420, 510));
        assert!(cell_collides(&grid, 120, 0), "left of the field");
        assert!(cell_collides(&grid, 450, 0), "right edge past the field");
        assert!(cell_collides(&grid, 150, 511), "bottom edge below the floor");
    }

    #[test]
    fn test_nothing_bounds_the_top() {
        let grid = Grid::new();
        assert!(!cell_collides(&grid, 300, -90));
    }

    #[test]
    fn test_overlap_needs_same_column() {
        let mut grid = Grid::new();
        grid.insert(Point::new(240, 300), PieceKind::T);

        assert!(cell_collides(&grid, 240, 300));
        assert!(cell_collides(&grid, 240, 285), "bottom edge inside the span");
        assert!(cell_collides(&grid, 240, 315), "top edge inside the span");
        assert!(!cell_collides(&grid, 240, 270), "touching from above");
        assert!(!cell_collides(&grid, 240, 330), "touching from below");
        assert!(!cell_collides(&grid, 270, 300), "neighbouring column");
    }

    #[test]
    fn test_fractional_delta_is_rounded_ties_to_even() {
        // O piece anchored so its lowest cells sit at y = 480.
        let grid = Grid::new();
        let anchor = Point::new(300, 480);

        // 30.5 rounds to 30 (even), landing exactly on the floor.
        assert!(!placement_collides(&grid, PieceKind::O, anchor, Rotation::North, 0, 30.5));
        // 31.5 rounds to 32 (even), past the floor.
        assert!(placement_collides(&grid, PieceKind::O, anchor, Rotation::North, 0, 31.5));
        // 30.4 rounds down.
        assert!(!placement_collides(&grid, PieceKind::O, anchor, Rotation::North, 0, 30.4));
    }

    #[test]
    fn test_rotation_override_is_checked() {
        let grid = Grid::new();
        // Vertical I at the right wall: rotating to flat pokes past the wall.
        let anchor = Point::new(420, 300);
        assert!(!placement_collides(&grid, PieceKind::I, anchor, Rotation::East, 0, 0.0));
        assert!(placement_collides(&grid, PieceKind::I, anchor, Rotation::North, 0, 0.0));
    }
}
