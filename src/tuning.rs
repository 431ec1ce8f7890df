//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. A tuning file only needs the
//! fields it overrides; everything else falls back to the defaults below.

use serde::{Deserialize, Serialize};

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Play area width (horizontal motion bound)
    pub play_width: f32,
    /// Play area height
    pub play_height: f32,
    /// Distance of the first active block above the bottom of the play area
    pub spawn_offset: f32,

    /// Width of the session's first block
    pub initial_block_width: f32,
    /// Height of every block
    pub block_height: f32,
    /// Horizontal speed of the first block (px per tick)
    pub initial_speed: f32,
    /// Speed added after each successful placement
    pub speed_increment: f32,
    /// Speed ceiling
    pub max_speed: f32,
    /// Multiplier applied to the placed width to size the next block
    pub width_decrease_factor: f32,
    /// Width floor for spawned blocks
    pub min_width: f32,
    /// Max horizontal offset (px) that still counts as a perfect hit
    pub perfect_threshold: f32,

    /// Placements needed per level
    pub blocks_per_level: u32,
    /// Points for any successful placement
    pub base_score: u64,
    /// Points per step of the incoming combo streak
    pub combo_bonus: u64,
    /// Extra points for a perfect hit
    pub perfect_bonus: u64,

    /// Particles spawned by a perfect hit
    pub perfect_burst: usize,
    /// Particle lifetime in ticks
    pub particle_life: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            play_width: 390.0,
            play_height: 640.0,
            spawn_offset: 100.0,

            initial_block_width: 100.0,
            block_height: 20.0,
            initial_speed: 2.0,
            speed_increment: 0.3,
            max_speed: 8.0,
            width_decrease_factor: 0.8,
            min_width: 20.0,
            perfect_threshold: 5.0,

            blocks_per_level: 10,
            base_score: 10,
            combo_bonus: 5,
            perfect_bonus: 50,

            perfect_burst: 20,
            particle_life: 60.0,
        }
    }
}

/// Reasons a tuning file is rejected
#[derive(Debug)]
pub enum TuningError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {e}"),
            TuningError::Invalid(why) => write!(f, "invalid tuning: {why}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.play_width <= 0.0 || self.play_height <= 0.0 {
            return Err(TuningError::Invalid("play area must have positive size"));
        }
        if self.min_width <= 0.0 {
            return Err(TuningError::Invalid("min_width must be positive"));
        }
        if self.initial_block_width < self.min_width {
            return Err(TuningError::Invalid("initial_block_width is below min_width"));
        }
        if self.initial_block_width > self.play_width {
            return Err(TuningError::Invalid("initial block does not fit the play area"));
        }
        if self.block_height <= 0.0 {
            return Err(TuningError::Invalid("block_height must be positive"));
        }
        if self.initial_speed < 0.0 || self.speed_increment < 0.0 {
            return Err(TuningError::Invalid("speeds must be non-negative"));
        }
        if self.max_speed < self.initial_speed {
            return Err(TuningError::Invalid("max_speed is below initial_speed"));
        }
        if !(0.0..=1.0).contains(&self.width_decrease_factor) {
            return Err(TuningError::Invalid("width_decrease_factor must be in [0, 1]"));
        }
        if self.blocks_per_level == 0 {
            return Err(TuningError::Invalid("blocks_per_level must be at least 1"));
        }
        Ok(())
    }

    /// Vertical position of the session's first active block
    pub fn spawn_y(&self) -> f32 {
        self.play_height - self.spawn_offset
    }

    /// Left edge that centres a block of `width` in the play area
    pub fn centered_x(&self, width: f32) -> f32 {
        self.play_width / 2.0 - width / 2.0
    }
}
