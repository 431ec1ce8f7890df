//! Session state machine
//!
//! Every change to a [`SessionState`] goes through [`step`]. A command that
//! the current phase does not accept is rejected before anything is touched,
//! so a failed step never leaves a half-applied state behind.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::drop::{DropOutcome, next_block, resolve_drop};
use super::motion::advance;
use super::particles;
use super::scoring::{apply_placement, next_level};
use super::state::{Block, Phase, SessionState};
use super::view::SessionView;
use crate::skins::Palette;
use crate::tuning::Tuning;

/// Input to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave `Ready` and start moving
    Start,
    /// One simulation frame
    Tick,
    /// Player released the block
    Drop,
    Pause,
    Resume,
    /// Start over from any phase, keeping the high score
    Reset,
    /// Leave `GameOver` after a rewarded ad; `granted` is the ad's verdict
    ContinueWithReward { granted: bool },
    /// Raise the high score (never lowers it)
    SetHighScore(u64),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "Start",
            Command::Tick => "Tick",
            Command::Drop => "Drop",
            Command::Pause => "Pause",
            Command::Resume => "Resume",
            Command::Reset => "Reset",
            Command::ContinueWithReward { .. } => "ContinueWithReward",
            Command::SetHighScore(_) => "SetHighScore",
        }
    }

    /// Whether `phase` accepts this command
    pub fn allowed_in(&self, phase: Phase) -> bool {
        match self {
            Command::Start => phase == Phase::Ready,
            Command::Tick | Command::Drop | Command::Pause => phase == Phase::Running,
            Command::Resume => phase == Phase::Paused,
            Command::ContinueWithReward { .. } => phase == Phase::GameOver,
            Command::Reset | Command::SetHighScore(_) => true,
        }
    }
}

/// Things that happened during a step, for sound, effects and bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started,
    Placed {
        block: Block,
        perfect_hit: bool,
        score: u64,
        combo: u32,
    },
    LevelUp {
        level: u32,
    },
    GameOver {
        score: u64,
        position: Vec2,
    },
    Paused,
    Resumed,
    Reset,
    Continued {
        position: Vec2,
    },
    HighScore {
        high_score: u64,
    },
}

/// A rejected command. The state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// The command is not valid in the current phase
    InvalidTransition { command: &'static str, phase: Phase },
    /// A continue was requested but the reward was not granted
    RewardNotGranted,
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionError::InvalidTransition { command, phase } => {
                write!(f, "{command} is not allowed while {phase:?}")
            }
            TransitionError::RewardNotGranted => write!(f, "continue requires a granted reward"),
        }
    }
}

impl std::error::Error for TransitionError {}

/// Apply one command to `state` in place
pub fn step<R: Rng + ?Sized>(
    state: &mut SessionState,
    command: Command,
    tuning: &Tuning,
    palette: &Palette,
    rng: &mut R,
) -> Result<Vec<SessionEvent>, TransitionError> {
    if !command.allowed_in(state.phase) {
        log::debug!("Rejected {} in {:?}", command.name(), state.phase);
        return Err(TransitionError::InvalidTransition {
            command: command.name(),
            phase: state.phase,
        });
    }

    let mut events = Vec::new();

    match command {
        Command::Start => {
            state.phase = Phase::Running;
            events.push(SessionEvent::Started);
        }

        Command::Tick => {
            state.active = advance(&state.active, tuning.play_width);
            particles::update(&mut state.particles);
            state.time_ticks += 1;
        }

        Command::Drop => drop_active(state, tuning, palette, rng, &mut events),

        Command::Pause => {
            state.phase = Phase::Paused;
            events.push(SessionEvent::Paused);
        }

        Command::Resume => {
            state.phase = Phase::Running;
            events.push(SessionEvent::Resumed);
        }

        Command::Reset => {
            *state = SessionState::new(tuning, state.high_score, palette.pick(rng));
            log::debug!("Session reset (high score {})", state.high_score);
            events.push(SessionEvent::Reset);
        }

        Command::ContinueWithReward { granted } => {
            if !granted {
                return Err(TransitionError::RewardNotGranted);
            }
            let position = state
                .game_over_at
                .take()
                .unwrap_or(Vec2::new(state.active.x, state.active.y));
            state.active.x = position.x;
            state.active.y = position.y;
            state.phase = Phase::Running;
            log::info!("Continued at score {}", state.score);
            events.push(SessionEvent::Continued { position });
        }

        Command::SetHighScore(candidate) => {
            if candidate > state.high_score {
                state.high_score = candidate;
                events.push(SessionEvent::HighScore {
                    high_score: candidate,
                });
            }
        }
    }

    Ok(events)
}

/// Resolve a drop against a single snapshot of the active block
fn drop_active<R: Rng + ?Sized>(
    state: &mut SessionState,
    tuning: &Tuning,
    palette: &Palette,
    rng: &mut R,
    events: &mut Vec<SessionEvent>,
) {
    let active = state.active;

    match resolve_drop(&active, state.top_block(), tuning.perfect_threshold) {
        DropOutcome::GameOver => {
            let position = Vec2::new(active.x, active.y);
            state.phase = Phase::GameOver;
            state.game_over_at = Some(position);
            log::info!(
                "Game over: score={}, level={}, blocks={}",
                state.score,
                state.level,
                state.blocks.len()
            );
            events.push(SessionEvent::GameOver {
                score: state.score,
                position,
            });
        }

        DropOutcome::Placed {
            placed,
            perfect_hit,
        } => {
            state.blocks.push(placed);

            if perfect_hit {
                state.perfect_hits += 1;
                particles::spawn_burst(
                    &mut state.particles,
                    Vec2::new(placed.center_x(), placed.y),
                    palette,
                    tuning,
                    rng,
                );
            }

            let (score, combo) = apply_placement(state.score, state.combo, perfect_hit, tuning);
            state.score = score;
            state.combo = combo;
            state.best_combo = state.best_combo.max(combo);

            let id = state.next_block_id();
            state.active = next_block(&placed, tuning, id, palette.pick(rng));

            events.push(SessionEvent::Placed {
                block: placed,
                perfect_hit,
                score,
                combo,
            });

            let level = next_level(state.level, state.blocks.len(), tuning.blocks_per_level);
            if level > state.level {
                state.level = level;
                log::info!("Level {} reached at {} blocks", level, state.blocks.len());
                events.push(SessionEvent::LevelUp { level });
            }
        }
    }
}

/// Snapshot-in, snapshot-out form of [`step`]
pub fn transition<R: Rng + ?Sized>(
    state: &SessionState,
    command: Command,
    tuning: &Tuning,
    palette: &Palette,
    rng: &mut R,
) -> Result<(SessionState, Vec<SessionEvent>), TransitionError> {
    let mut next = state.clone();
    let events = step(&mut next, command, tuning, palette, rng)?;
    Ok((next, events))
}

/// A play session: state plus the tuning, palette and RNG it runs with
#[derive(Debug, Clone)]
pub struct Session<R = Pcg32> {
    state: SessionState,
    tuning: Tuning,
    palette: Palette,
    rng: R,
}

impl Session<Pcg32> {
    /// New session seeded for reproducible colours
    pub fn new(tuning: Tuning, palette: Palette, seed: u64, high_score: u64) -> Self {
        Self::with_rng(tuning, palette, Pcg32::seed_from_u64(seed), high_score)
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(tuning: Tuning, palette: Palette, mut rng: R, high_score: u64) -> Self {
        let state = SessionState::new(&tuning, high_score, palette.pick(&mut rng));
        Self {
            state,
            tuning,
            palette,
            rng,
        }
    }

    pub fn apply(&mut self, command: Command) -> Result<Vec<SessionEvent>, TransitionError> {
        step(
            &mut self.state,
            command,
            &self.tuning,
            &self.palette,
            &mut self.rng,
        )
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Read-only projection for the presentation layer
    pub fn view(&self) -> SessionView<'_> {
        SessionView::of(&self.state)
    }

    /// Swap the palette used for blocks spawned from now on
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Start over in `Ready` with `high_score`, which may be lower than the
    /// current one. Used when all player data is wiped.
    pub fn restart(&mut self, high_score: u64) {
        self.state = SessionState::new(&self.tuning, high_score, self.palette.pick(&mut self.rng));
        log::debug!("Session restarted (high score {high_score})");
    }
}
