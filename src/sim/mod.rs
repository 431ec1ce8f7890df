//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per frame
//! - Injected RNG only (colours and particles)
//! - Append-only block order within a session
//! - No rendering, storage or platform dependencies

pub mod drop;
pub mod motion;
pub mod particles;
pub mod scoring;
pub mod state;
pub mod tick;
pub mod view;

pub use drop::{DropOutcome, next_block, overlap, resolve_drop};
pub use motion::advance;
pub use scoring::{apply_placement, level_for};
pub use state::{Block, Direction, Particle, Phase, SessionState};
pub use tick::{Command, Session, SessionEvent, TransitionError, step, transition};
pub use view::SessionView;
