//! Geometry module - piece shapes for every rotation state
//!
//! Offsets are in grid units relative to the piece anchor, with y growing
//! downward. There are no wall kicks: a rotation either fits in place or is
//! refused by the collision check.

use crate::types::{PieceKind, Rotation};

/// Offset of a single cell relative to the piece anchor
pub type CellOffset = (i8, i8);

/// Shape of a piece - 4 cell offsets from the anchor
pub type PieceShape = [CellOffset; 4];

/// Get the shape (cell offsets) for a piece kind and rotation
pub fn shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => i_shape(rotation),
        PieceKind::J => j_shape(rotation),
        PieceKind::L => l_shape(rotation),
        PieceKind::O => o_shape(rotation),
        PieceKind::S => s_shape(rotation),
        PieceKind::T => t_shape(rotation),
        PieceKind::Z => z_shape(rotation),
    }
}

/// Shape shown in the next-piece preview
pub fn spawn_shape(kind: PieceKind) -> PieceShape {
    shape(kind, Rotation::North)
}

fn i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(-2, 0), (-1, 0), (0, 0), (1, 0)],
        Rotation::East => [(0, -1), (0, 0), (0, 1), (0, 2)],
        Rotation::South => [(-2, 1), (-1, 1), (0, 1), (1, 1)],
        Rotation::West => [(-1, -1), (-1, 0), (-1, 1), (-1, 2)],
    }
}

fn j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(-2, -1), (-2, 0), (-1, 0), (0, 0)],
        Rotation::East => [(-1, -1), (-1, 0), (-1, 1), (0, -1)],
        Rotation::South => [(-2, 0), (-1, 0), (0, 0), (0, 1)],
        Rotation::West => [(-1, -1), (-1, 0), (-1, 1), (-2, 1)],
    }
}

fn l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(-2, 0), (-1, 0), (0, 0), (0, -1)],
        Rotation::East => [(-1, -1), (-1, 0), (-1, 1), (0, 1)],
        Rotation::South => [(-2, 0), (-2, 1), (-1, 0), (0, 0)],
        Rotation::West => [(-2, -1), (-1, -1), (-1, 0), (-1, 1)],
    }
}

/// O piece shapes (same for all rotations)
fn o_shape(_rotation: Rotation) -> PieceShape {
    [(-1, -1), (0, -1), (-1, 0), (0, 0)]
}

fn s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(-1, -1), (-2, 0), (-1, 0), (0, -1)],
        Rotation::East => [(-1, -1), (-1, 0), (0, 0), (0, 1)],
        Rotation::South => [(-1, 0), (-2, 1), (-1, 1), (0, 0)],
        Rotation::West => [(-2, -1), (-2, 0), (-1, 0), (-1, 1)],
    }
}

fn t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(-1, 0), (0, 0), (1, 0), (0, -1)],
        Rotation::East => [(0, -1), (0, 0), (0, 1), (1, 0)],
        Rotation::South => [(-1, 0), (0, 0), (1, 0), (0, 1)],
        Rotation::West => [(0, -1), (0, 0), (0, 1), (-1, 0)],
    }
}

fn z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(-2, -1), (-1, -1), (-1, 0), (0, 0)],
        Rotation::East => [(-1, 0), (-1, 1), (0, 0), (0, -1)],
        Rotation::South => [(-2, 0), (-1, 0), (-1, 1), (0, 1)],
        Rotation::West => [(-2, 0), (-2, 1), (-1, 0), (-1, -1)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTATIONS: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    #[test]
    fn every_shape_has_four_distinct_cells() {
        for kind in PieceKind::ALL {
            for rotation in ROTATIONS {
                let cells = shape(kind, rotation);
                for (i, a) in cells.iter().enumerate() {
                    for b in &cells[i + 1..] {
                        assert_ne!(a, b, "{:?} {:?} repeats a cell", kind, rotation);
                    }
                }
            }
        }
    }

    #[test]
    fn o_piece_is_rotation_invariant() {
        let north = shape(PieceKind::O, Rotation::North);
        for rotation in ROTATIONS {
            assert_eq!(shape(PieceKind::O, rotation), north);
        }
    }

    #[test]
    fn asymmetric_pieces_change_with_rotation() {
        for kind in PieceKind::ALL {
            if kind == PieceKind::O {
                continue;
            }
            assert_ne!(shape(kind, Rotation::North), shape(kind, Rotation::East));
        }
    }

    #[test]
    fn i_piece_lies_flat_on_spawn() {
        assert_eq!(spawn_shape(PieceKind::I), [(-2, 0), (-1, 0), (0, 0), (1, 0)]);
    }
}
