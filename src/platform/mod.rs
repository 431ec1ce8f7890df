//! Frame-driven tick source
//!
//! The host calls [`FrameClock::run_frame`] once per display frame with the
//! elapsed wall time. The clock turns that into whole simulation ticks at
//! [`SIM_DT`], so motion speed does not depend on the refresh rate. Drops are
//! applied between frames, never in the middle of one.

use rand::Rng;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{Command, Phase, Session};

/// Longest frame the clock will catch up on
const MAX_FRAME_DT: f32 = 0.1;

/// Fixed-timestep accumulator with an on/off switch
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    accumulator: f32,
    active: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        if !self.active {
            self.active = true;
            self.accumulator = 0.0;
        }
    }

    /// Stop ticking. Safe to call any number of times.
    pub fn stop(&mut self) {
        self.active = false;
        self.accumulator = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Follow the session phase: only a running session is ticked
    pub fn sync(&mut self, phase: Phase) {
        if phase == Phase::Running {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Add `dt` seconds and return how many ticks are due now
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.active {
            return 0;
        }
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Run the ticks due for one frame on `session`. Returns the number of
    /// ticks applied.
    pub fn run_frame<R: Rng>(&mut self, session: &mut Session<R>, dt: f32) -> u32 {
        self.sync(session.phase());
        let due = self.advance(dt);

        let mut ran = 0;
        for _ in 0..due {
            if let Err(e) = session.apply(Command::Tick) {
                log::debug!("Clock stopped: {e}");
                self.stop();
                break;
            }
            ran += 1;
        }
        ran
    }
}
