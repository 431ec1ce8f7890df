//! Perfect-hit particle bursts
//!
//! Purely cosmetic. Particles drift by their velocity once per tick, lose one
//! tick of life and are dropped when it runs out.

use glam::Vec2;
use rand::Rng;

use super::state::Particle;
use crate::consts::MAX_PARTICLES;
use crate::skins::Palette;
use crate::tuning::Tuning;

/// Spawn a burst centred on `origin`, respecting the global particle cap
pub fn spawn_burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    origin: Vec2,
    palette: &Palette,
    tuning: &Tuning,
    rng: &mut R,
) {
    let room = MAX_PARTICLES.saturating_sub(particles.len());
    for _ in 0..tuning.perfect_burst.min(room) {
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 15.0,
                -rng.random::<f32>() * 10.0,
            ),
            color: palette.pick(rng),
            life: tuning.particle_life,
            size: rng.random::<f32>() * 10.0 + 8.0,
        });
    }
}

/// Advance every particle by one tick and discard the expired ones
pub fn update(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life -= 1.0;
    }
    particles.retain(|p| p.life > 0.0);
}
