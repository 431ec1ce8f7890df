//! Stack Builder - A block stacking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, drop resolution, scoring, session state)
//! - `tuning`: Data-driven game balance
//! - `skins`: Cosmetic palettes and the skin catalog
//! - `persistence`: Save/load of settings, stats and unlocked skins
//! - `settings` / `stats`: Player preferences and lifetime statistics
//! - `profile`: Player profile glue between the store and the session
//! - `monetization`: Rewarded continues and interstitial pacing
//! - `audio`: Sound, music and haptic cues from session events
//! - `platform`: Frame clock / tick source

pub mod audio;
pub mod monetization;
pub mod persistence;
pub mod platform;
pub mod profile;
pub mod settings;
pub mod sim;
pub mod skins;
pub mod stats;
pub mod tuning;

pub use profile::Profile;
pub use settings::UserSettings;
pub use stats::GameStats;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one logical tick per display frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Simulation ticks per second, used to turn tick counts into durations
    pub const TICKS_PER_SECOND: u64 = 60;

    /// Maximum live particles
    pub const MAX_PARTICLES: usize = 256;
}
