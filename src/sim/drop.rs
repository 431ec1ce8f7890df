//! Drop resolution
//!
//! The one place where the game can be lost: the dropped block is clipped to
//! the part that rests on the block beneath it, and a clean miss ends the run.

use super::state::{Block, Direction};
use crate::skins::Color;
use crate::tuning::Tuning;

/// What happened to a dropped block
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropOutcome {
    /// Nothing of the block rests on the previous one
    GameOver,
    /// The overlapping part of the block was placed
    Placed { placed: Block, perfect_hit: bool },
}

/// Horizontal overlap of two blocks, never negative
pub fn overlap(a: &Block, b: &Block) -> f32 {
    let left = a.x.max(b.x);
    let right = a.right().min(b.right());
    (right - left).max(0.0)
}

/// Resolve a drop of `active` onto `previous` (None for the first drop)
///
/// A zero-width previous block always yields `GameOver`.
pub fn resolve_drop(active: &Block, previous: Option<&Block>, perfect_threshold: f32) -> DropOutcome {
    let Some(previous) = previous else {
        return DropOutcome::Placed {
            placed: *active,
            perfect_hit: false,
        };
    };

    let overlap = overlap(active, previous);
    if overlap <= 0.0 {
        return DropOutcome::GameOver;
    }

    let placed = Block {
        x: active.x.max(previous.x),
        width: overlap,
        ..*active
    };
    let perfect_hit = (active.x - previous.x).abs() <= perfect_threshold;

    DropOutcome::Placed {
        placed,
        perfect_hit,
    }
}

/// Width of the block spawned after placing one `placed_width` wide
pub fn next_width(placed_width: f32, tuning: &Tuning) -> f32 {
    (placed_width * tuning.width_decrease_factor).max(tuning.min_width)
}

/// Speed of the block spawned after one moving at `current_speed`
pub fn next_speed(current_speed: f32, tuning: &Tuning) -> f32 {
    (current_speed + tuning.speed_increment).min(tuning.max_speed)
}

/// The active block that follows a successful placement: narrower, faster,
/// centred, one block height above `placed`, moving right
pub fn next_block(placed: &Block, tuning: &Tuning, id: u64, color: Color) -> Block {
    let width = next_width(placed.width, tuning);
    Block {
        id,
        x: tuning.centered_x(width),
        y: placed.y - tuning.block_height,
        width,
        height: tuning.block_height,
        color,
        speed: next_speed(placed.speed, tuning),
        direction: Direction::Increasing,
    }
}
