//! Scoring module - points and gravity speed-up
//!
//! Each cleared row is worth a flat [`POINTS_PER_LINE`]. A lock that clears
//! more than one row has its total doubled. Every [`LINES_PER_LEVEL`] lines the
//! level goes up and gravity speeds up by [`TICKS_PER_FALL_STEP`] ticks,
//! never below [`MIN_TICKS_PER_FALL`].

use crate::types::{LINES_PER_LEVEL, MIN_TICKS_PER_FALL, POINTS_PER_LINE, TICKS_PER_FALL_STEP};

/// Points earned by a single lock that cleared `lines` rows
pub fn lock_points(lines: u32) -> u32 {
    let points = lines.saturating_mul(POINTS_PER_LINE);
    if points > POINTS_PER_LINE {
        points.saturating_mul(2)
    } else {
        points
    }
}

/// Does reaching `total_lines` cleared lines start a new level?
pub fn is_level_boundary(total_lines: u32) -> bool {
    total_lines > 0 && total_lines % LINES_PER_LEVEL == 0
}

/// Gravity interval (in ticks) after one level-up
pub fn faster_ticks_per_fall(current: u32) -> u32 {
    if current > MIN_TICKS_PER_FALL {
        current
            .saturating_sub(TICKS_PER_FALL_STEP)
            .max(MIN_TICKS_PER_FALL)
    } else {
        current
    }
}
