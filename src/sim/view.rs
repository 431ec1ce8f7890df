//! Read-only projection of a session for the presentation layer
//!
//! The view borrows the authoritative state; nothing on the rendering side
//! keeps its own copy of the active block position.

use serde::Serialize;

use super::state::{Block, Particle, Phase, SessionState};

/// What a renderer needs for one frame
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SessionView<'a> {
    pub blocks: &'a [Block],
    pub active: &'a Block,
    pub particles: &'a [Particle],
    pub score: u64,
    pub level: u32,
    pub combo: u32,
    pub high_score: u64,
    pub phase: Phase,
    pub is_paused: bool,
    pub is_game_over: bool,
}

impl<'a> SessionView<'a> {
    pub fn of(state: &'a SessionState) -> Self {
        Self {
            blocks: &state.blocks,
            active: &state.active,
            particles: &state.particles,
            score: state.score,
            level: state.level,
            combo: state.combo,
            high_score: state.high_score,
            phase: state.phase,
            is_paused: state.is_paused(),
            is_game_over: state.is_game_over(),
        }
    }

    /// Particle opacity in `[0, 1]`, fading out over the particle's life
    pub fn particle_alpha(particle: &Particle, full_life: f32) -> f32 {
        if full_life <= 0.0 {
            return 0.0;
        }
        (particle.life / full_life).clamp(0.0, 1.0)
    }
}
