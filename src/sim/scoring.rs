//! Scoring and progression
//!
//! Score for a placement:
//! `base + incoming_combo * combo_bonus + (perfect ? perfect_bonus : 0)`.
//! The combo bonus uses the streak *before* this placement updates it.

use crate::tuning::Tuning;

/// Score and combo after one successful placement
pub fn apply_placement(score: u64, combo: u32, perfect_hit: bool, tuning: &Tuning) -> (u64, u32) {
    let combo_bonus = u64::from(combo) * tuning.combo_bonus;
    let perfect_bonus = if perfect_hit { tuning.perfect_bonus } else { 0 };
    let new_score = score
        .saturating_add(tuning.base_score)
        .saturating_add(combo_bonus)
        .saturating_add(perfect_bonus);
    let new_combo = if perfect_hit { combo + 1 } else { 0 };
    (new_score, new_combo)
}

/// Level reached once `placed_count` blocks have been placed
pub fn level_for(placed_count: usize, blocks_per_level: u32) -> u32 {
    let per_level = blocks_per_level.max(1) as usize;
    (placed_count / per_level) as u32 + 1
}

/// Level after a placement; never lower than `current`
pub fn next_level(current: u32, placed_count: usize, blocks_per_level: u32) -> u32 {
    current.max(level_for(placed_count, blocks_per_level))
}
