//! Session state and core simulation types
//!
//! Everything a running session needs to continue, reset or be reported
//! lives in [`SessionState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::skins::Color;
use crate::tuning::Tuning;

/// Lifecycle phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Active block centred, nothing placed yet, waiting for `Start`
    Ready,
    /// Active block sweeping, drops accepted
    Running,
    /// Motion suspended
    Paused,
    /// Last drop missed. Only `Reset` or a granted continue leave this phase.
    GameOver,
}

/// Horizontal travel direction of the active block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Toward increasing x
    #[default]
    Increasing,
    /// Toward decreasing x
    Decreasing,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Increasing => 1.0,
            Direction::Decreasing => -1.0,
        }
    }
}

/// A stack segment, either placed or the one currently moving
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: u64,
    /// Left edge
    pub x: f32,
    /// Top edge (screen space, grows downward)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    /// Horizontal speed in px per tick
    pub speed: f32,
    pub direction: Direction,
}

impl Block {
    /// The block every session starts with: full width, centred, moving right
    pub fn initial(tuning: &Tuning, id: u64, color: Color) -> Self {
        Self {
            id,
            x: tuning.centered_x(tuning.initial_block_width),
            y: tuning.spawn_y(),
            width: tuning.initial_block_width,
            height: tuning.block_height,
            color,
            speed: tuning.initial_speed,
            direction: Direction::Increasing,
        }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Horizontal centre
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// A cosmetic particle. Never affects gameplay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub color: Color,
    /// Remaining lifetime in ticks
    pub life: f32,
    pub size: f32,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Current phase
    pub phase: Phase,
    /// Score
    pub score: u64,
    /// Level, starts at 1
    pub level: u32,
    /// Consecutive perfect hits
    pub combo: u32,
    /// Longest perfect streak this session
    pub best_combo: u32,
    /// Perfect hits this session
    pub perfect_hits: u32,
    /// Best score across sessions
    pub high_score: u64,
    /// Placed blocks, bottom first
    pub blocks: Vec<Block>,
    /// The moving block
    pub active: Block,
    /// Where the active block was when the session ended
    pub game_over_at: Option<Vec2>,
    /// Ticks simulated while running
    pub time_ticks: u64,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Next block id
    next_id: u64,
}

impl SessionState {
    /// Fresh session in the `Ready` phase
    pub fn new(tuning: &Tuning, high_score: u64, color: Color) -> Self {
        Self {
            phase: Phase::Ready,
            score: 0,
            level: 1,
            combo: 0,
            best_combo: 0,
            perfect_hits: 0,
            high_score,
            blocks: Vec::new(),
            active: Block::initial(tuning, 1, color),
            game_over_at: None,
            time_ticks: 0,
            particles: Vec::new(),
            next_id: 2,
        }
    }

    /// Allocate a new block id
    pub fn next_block_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Motion only runs while running; game over halts it regardless of pause
    pub fn is_moving(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Topmost placed block
    pub fn top_block(&self) -> Option<&Block> {
        self.blocks.last()
    }
}
