//! Lifetime statistics and the finished-session log
//!
//! Stats double as the points wallet: skins are bought out of `total_score`.

use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_SECOND;
use crate::sim::SessionState;

/// Maximum number of finished sessions kept in the log
pub const MAX_SESSION_RECORDS: usize = 100;

/// One finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub score: u64,
    pub level: u32,
    pub perfect_hits: u32,
    /// Best perfect streak reached during the session
    pub combo: u32,
    pub duration_seconds: u64,
    /// Skin in use while playing
    pub skin_id: String,
}

impl SessionRecord {
    /// Summarise a finished session
    pub fn from_state(state: &SessionState, skin_id: &str) -> Self {
        Self {
            score: state.score,
            level: state.level,
            perfect_hits: state.perfect_hits,
            combo: state.best_combo,
            duration_seconds: state.time_ticks / TICKS_PER_SECOND,
            skin_id: skin_id.to_string(),
        }
    }
}

/// Lifetime statistics
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStats {
    pub games_played: u32,
    /// Points earned minus points spent on skins
    pub total_score: u64,
    pub high_score: u64,
    pub perfect_hits: u64,
    pub average_score: f64,
    pub best_combo: u32,
}

/// A partial stats change; `None` fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsUpdate {
    pub games_played: Option<u32>,
    pub total_score: Option<u64>,
    pub high_score: Option<u64>,
    pub perfect_hits: Option<u64>,
    pub average_score: Option<f64>,
    pub best_combo: Option<u32>,
}

impl GameStats {
    /// Apply a partial update
    pub fn apply(&mut self, update: &StatsUpdate) {
        if let Some(v) = update.games_played {
            self.games_played = v;
        }
        if let Some(v) = update.total_score {
            self.total_score = v;
        }
        if let Some(v) = update.high_score {
            self.high_score = v;
        }
        if let Some(v) = update.perfect_hits {
            self.perfect_hits = v;
        }
        if let Some(v) = update.average_score {
            self.average_score = v;
        }
        if let Some(v) = update.best_combo {
            self.best_combo = v;
        }
    }

    /// The full update that folds a finished session into these stats
    pub fn fold_session(&self, record: &SessionRecord) -> StatsUpdate {
        let games_played = self.games_played + 1;
        let total_score = self.total_score.saturating_add(record.score);
        StatsUpdate {
            games_played: Some(games_played),
            total_score: Some(total_score),
            high_score: Some(self.high_score.max(record.score)),
            perfect_hits: Some(self.perfect_hits + u64::from(record.perfect_hits)),
            average_score: Some(total_score as f64 / f64::from(games_played)),
            best_combo: Some(self.best_combo.max(record.combo)),
        }
    }

    /// Check if a score beats the stored high score
    pub fn is_new_high_score(&self, score: u64) -> bool {
        score > 0 && score > self.high_score
    }

    /// Points still missing to afford `price`
    pub fn shortfall(&self, price: u64) -> u64 {
        price.saturating_sub(self.total_score)
    }
}
