//! Active block motion
//!
//! The active block sweeps back and forth across the play area, bouncing at
//! both edges. Callers gate on the session phase; this module has no notion
//! of pause or game over.

use super::state::{Block, Direction};

/// Advance the active block by one tick inside `[0, bounds_width]`
pub fn advance(active: &Block, bounds_width: f32) -> Block {
    let mut next = *active;
    let tentative = active.x + active.direction.sign() * active.speed;

    if tentative <= 0.0 {
        next.x = 0.0;
        next.direction = Direction::Increasing;
    } else if tentative + active.width >= bounds_width {
        next.x = bounds_width - active.width;
        next.direction = Direction::Decreasing;
    } else {
        next.x = tentative;
    }

    next
}
