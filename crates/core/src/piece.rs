//! Piece module - the active (falling) piece
//!
//! The anchor and rotation are the only state that moves; the four occupied
//! cells are always recomputed from them through [`ActivePiece::recompute_cells`].
//! The piece never owns the grid. Every operation borrows it (and the
//! randomizer, for a reset) from the caller.

use crate::collision::would_collide;
use crate::geometry::shape;
use crate::grid::Grid;
use crate::rng::{RandomSource, Randomizer};
use crate::types::{PieceKind, Point, Rotation, GRID_UNIT, SPAWN_POINT};

/// Result of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallOutcome {
    /// The piece moved down.
    Fell,
    /// The piece could not move and has fallen before: it should lock.
    Landed,
    /// The piece could not move on its first attempt after spawning.
    Blocked,
}

/// The piece under player control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    anchor: Point,
    kind: PieceKind,
    rotation: Rotation,
    next_kind: PieceKind,
    cells: [Point; 4],
    has_fallen: bool,
}

impl ActivePiece {
    /// Create the first piece of a game.
    ///
    /// A queued kind is drawn uniformly, then adopted by an immediate reset,
    /// which also queues the kind after it.
    pub fn spawn<R: RandomSource>(randomizer: &mut Randomizer<R>) -> Self {
        let mut piece = Self::at(PieceKind::I, randomizer.first(), SPAWN_POINT, Rotation::North);
        piece.reset_piece(randomizer);
        piece
    }

    /// Build a piece at an explicit placement (fixtures, previews).
    pub fn at(kind: PieceKind, next_kind: PieceKind, anchor: Point, rotation: Rotation) -> Self {
        let mut piece = Self {
            anchor,
            kind,
            rotation,
            next_kind,
            cells: [anchor; 4],
            has_fallen: false,
        };
        piece.recompute_cells();
        piece
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Kind that the next reset will adopt
    pub fn next_kind(&self) -> PieceKind {
        self.next_kind
    }

    /// Top-left corners of the four occupied cells
    pub fn cells(&self) -> &[Point; 4] {
        &self.cells
    }

    /// Whether at least one gravity step has succeeded since spawn
    pub fn has_fallen(&self) -> bool {
        self.has_fallen
    }

    /// Respawn at the spawn point as the queued kind and queue a new one.
    pub fn reset_piece<R: RandomSource>(&mut self, randomizer: &mut Randomizer<R>) {
        self.anchor = SPAWN_POINT;
        self.rotation = Rotation::North;
        self.has_fallen = false;
        self.kind = self.next_kind;
        self.next_kind = randomizer.next(self.kind);
        self.recompute_cells();
    }

    /// Shift one column left if the spot is free.
    pub fn move_left(&mut self, grid: &Grid) -> bool {
        self.shift(-GRID_UNIT, grid)
    }

    /// Shift one column right if the spot is free.
    pub fn move_right(&mut self, grid: &Grid) -> bool {
        self.shift(GRID_UNIT, grid)
    }

    /// Rotate clockwise in place if the rotated shape fits.
    pub fn rotate_cw(&mut self, grid: &Grid) -> bool {
        let candidate = self.rotation.rotate_cw();
        if would_collide(grid, self, 0, 0.0, candidate) {
            return false;
        }
        self.rotation = candidate;
        self.recompute_cells();
        true
    }

    /// One gravity step of `amount` (a fraction of a grid unit).
    pub fn fall(&mut self, grid: &Grid, amount: f32) -> FallOutcome {
        if would_collide(grid, self, 0, amount, self.rotation) {
            return if self.has_fallen {
                FallOutcome::Landed
            } else {
                FallOutcome::Blocked
            };
        }

        self.anchor = self.anchor.translate(0, amount.round_ties_even() as i32);
        self.has_fallen = true;
        self.recompute_cells();
        FallOutcome::Fell
    }

    fn shift(&mut self, dx: i32, grid: &Grid) -> bool {
        if would_collide(grid, self, dx, 0.0, self.rotation) {
            return false;
        }
        self.anchor = self.anchor.translate(dx, 0);
        self.recompute_cells();
        true
    }

    /// Derive the occupied cells from anchor + rotation.
    fn recompute_cells(&mut self) {
        let offsets = shape(self.kind, self.rotation);
        for (cell, &(ox, oy)) in self.cells.iter_mut().zip(offsets.iter()) {
            *cell = self.anchor.offset_cells(ox, oy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FALL_STEP;

    fn derived(piece: &ActivePiece) -> [Point; 4] {
        shape(piece.kind(), piece.rotation()).map(|(ox, oy)| piece.anchor().offset_cells(ox, oy))
    }

    #[test]
    fn test_spawn_adopts_queued_kind() {
        let mut rng = Randomizer::new(5);
        let piece = ActivePiece::spawn(&mut rng);

        assert_eq!(piece.anchor(), SPAWN_POINT);
        assert_eq!(piece.rotation(), Rotation::North);
        assert!(!piece.has_fallen());
        assert_eq!(*piece.cells(), derived(&piece));
    }

    #[test]
    fn test_reset_promotes_next_kind() {
        let mut rng = Randomizer::new(5);
        let mut piece = ActivePiece::spawn(&mut rng);
        let queued = piece.next_kind();

        let grid = Grid::new();
        piece.fall(&grid, FALL_STEP);
        piece.rotate_cw(&grid);
        piece.reset_piece(&mut rng);

        assert_eq!(piece.kind(), queued);
        assert_eq!(piece.anchor(), SPAWN_POINT);
        assert_eq!(piece.rotation(), Rotation::North);
        assert!(!piece.has_fallen());
        assert_eq!(*piece.cells(), derived(&piece));
    }

    #[test]
    fn test_moves_keep_cells_derived() {
        let grid = Grid::new();
        let mut piece = ActivePiece::at(PieceKind::T, PieceKind::S, Point::new(300, 300), Rotation::North);

        assert!(piece.move_left(&grid));
        assert_eq!(piece.anchor(), Point::new(270, 300));
        assert_eq!(*piece.cells(), derived(&piece));

        assert!(piece.move_right(&grid));
        assert!(piece.move_right(&grid));
        assert_eq!(piece.anchor(), Point::new(330, 300));
        assert_eq!(*piece.cells(), derived(&piece));

        assert!(piece.rotate_cw(&grid));
        assert_eq!(piece.rotation(), Rotation::East);
        assert_eq!(*piece.cells(), derived(&piece));
    }

    #[test]
    fn test_blocked_move_is_a_no_op() {
        let grid = Grid::new();
        // T North spans x-30..x+30; anchor 180 puts its left cell on column 0.
        let mut piece = ActivePiece::at(PieceKind::T, PieceKind::S, Point::new(180, 300), Rotation::North);
        let before = piece;

        assert!(!piece.move_left(&grid));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_four_rotations_return_to_start() {
        let grid = Grid::new();
        for kind in PieceKind::ALL {
            let mut piece = ActivePiece::at(kind, PieceKind::O, Point::new(300, 300), Rotation::North);
            let start = *piece.cells();
            for _ in 0..4 {
                assert!(piece.rotate_cw(&grid), "{:?} failed to rotate", kind);
            }
            assert_eq!(*piece.cells(), start);
            assert_eq!(piece.rotation(), Rotation::North);
        }
    }

    #[test]
    fn test_blocked_rotation_is_a_no_op() {
        let grid = Grid::new();
        // Vertical I flush against the right wall.
        let mut piece = ActivePiece::at(PieceKind::I, PieceKind::O, Point::new(420, 300), Rotation::East);
        let before = piece;

        assert!(!piece.rotate_cw(&grid));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_fall_moves_half_a_unit() {
        let grid = Grid::new();
        let mut piece = ActivePiece::at(PieceKind::O, PieceKind::T, Point::new(300, 0), Rotation::North);

        assert_eq!(piece.fall(&grid, FALL_STEP), FallOutcome::Fell);
        assert_eq!(piece.anchor(), Point::new(300, 15));
        assert!(piece.has_fallen());
        assert_eq!(*piece.cells(), derived(&piece));
    }

    #[test]
    fn test_fall_lands_after_falling() {
        let grid = Grid::new();
        // O piece with its bottom row at y = 480 (bottom edge 510), one unit above the floor.
        let mut piece = ActivePiece::at(PieceKind::O, PieceKind::T, Point::new(300, 480), Rotation::North);

        assert_eq!(piece.fall(&grid, FALL_STEP), FallOutcome::Fell);
        assert_eq!(piece.fall(&grid, FALL_STEP), FallOutcome::Fell);
        assert_eq!(piece.anchor().y, 510);
        assert_eq!(piece.fall(&grid, FALL_STEP), FallOutcome::Landed);
        assert_eq!(piece.anchor().y, 510);
    }

    #[test]
    fn test_fall_blocked_before_first_step() {
        let mut grid = Grid::new();
        grid.insert(Point::new(300, 30), PieceKind::Z);
        let mut piece = ActivePiece::at(PieceKind::O, PieceKind::T, Point::new(300, 0), Rotation::North);

        assert_eq!(piece.fall(&grid, FALL_STEP), FallOutcome::Blocked);
        assert!(!piece.has_fallen());
    }
}
