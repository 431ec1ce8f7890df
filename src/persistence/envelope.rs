//! Versioned save envelope

use serde::{Deserialize, Serialize};

use super::PersistenceError;
use crate::settings::{SettingsUpdate, UserSettings};
use crate::skins::{self, DEFAULT_SKIN_ID, Skin};
use crate::stats::{GameStats, MAX_SESSION_RECORDS, SessionRecord, StatsUpdate};

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

/// Everything a store keeps
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub settings: UserSettings,
    pub stats: GameStats,
    /// Ids of purchased skins (the default skin is implied)
    pub unlocked_skins: Vec<String>,
    /// Finished sessions, oldest first
    pub sessions: Vec<SessionRecord>,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    data: &'a SaveData,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    data: SaveData,
}

/// Serialize `data` inside a versioned envelope
pub fn encode(data: &SaveData) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(&EnvelopeRef {
        version: SAVE_VERSION,
        data,
    })?)
}

/// Parse an envelope, rejecting saves from newer builds
pub fn decode(json: &str) -> Result<SaveData, PersistenceError> {
    let envelope: Envelope = serde_json::from_str(json)?;
    if envelope.version > SAVE_VERSION {
        return Err(PersistenceError::UnsupportedVersion(envelope.version));
    }
    Ok(envelope.data)
}

impl SaveData {
    pub fn update_settings(&mut self, update: &SettingsUpdate) {
        self.settings.apply(update);
    }

    pub fn update_stats(&mut self, update: &StatsUpdate) {
        self.stats.apply(update);
    }

    pub fn skins(&self) -> Vec<Skin> {
        skins::catalog_with_unlocked(self.unlocked_skins.iter().map(String::as_str))
    }

    pub fn unlock_skin(&mut self, id: &str) -> Result<(), PersistenceError> {
        if !skins::catalog().iter().any(|s| s.id == id) {
            return Err(PersistenceError::UnknownSkin(id.to_string()));
        }
        if id != DEFAULT_SKIN_ID && !self.unlocked_skins.iter().any(|s| s == id) {
            self.unlocked_skins.push(id.to_string());
        }
        Ok(())
    }

    pub fn save_session(&mut self, record: &SessionRecord) {
        self.sessions.push(record.clone());
        if self.sessions.len() > MAX_SESSION_RECORDS {
            let excess = self.sessions.len() - MAX_SESSION_RECORDS;
            self.sessions.drain(..excess);
        }
    }

    pub fn reset_all(&mut self) {
        self.sessions.clear();
        self.stats = GameStats::default();
        self.unlocked_skins.clear();
        self.settings.selected_skin = DEFAULT_SKIN_ID.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: u64) -> SessionRecord {
        SessionRecord {
            score,
            level: 1,
            perfect_hits: 0,
            combo: 0,
            duration_seconds: 10,
            skin_id: DEFAULT_SKIN_ID.to_string(),
        }
    }

    #[test]
    fn test_envelope_carries_version() {
        let json = encode(&SaveData::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], SAVE_VERSION);
        assert_eq!(decode(&json).unwrap(), SaveData::default());
    }

    #[test]
    fn test_rejects_newer_version() {
        let json = r#"{ "version": 99, "data": {} }"#;
        assert!(matches!(decode(json), Err(PersistenceError::UnsupportedVersion(99))));
    }

    #[test]
    fn test_rejects_corrupt_json() {
        assert!(matches!(decode("{ \"version\": 1, "), Err(PersistenceError::Json(_))));
    }

    #[test]
    fn test_unlock_skin() {
        let mut data = SaveData::default();
        data.unlock_skin("neon").unwrap();
        data.unlock_skin("neon").unwrap();
        data.unlock_skin(DEFAULT_SKIN_ID).unwrap();
        assert_eq!(data.unlocked_skins, vec!["neon".to_string()]);
        assert!(matches!(
            data.unlock_skin("plaid"),
            Err(PersistenceError::UnknownSkin(_))
        ));
        assert!(data.skins().iter().find(|s| s.id == "neon").unwrap().unlocked);
    }

    #[test]
    fn test_session_log_is_bounded() {
        let mut data = SaveData::default();
        for score in 0..(MAX_SESSION_RECORDS as u64 + 5) {
            data.save_session(&record(score));
        }
        assert_eq!(data.sessions.len(), MAX_SESSION_RECORDS);
        assert_eq!(data.sessions[0].score, 5);
    }

    #[test]
    fn test_reset_all() {
        let mut data = SaveData::default();
        data.settings.sound_enabled = false;
        data.settings.selected_skin = "neon".to_string();
        data.unlock_skin("neon").unwrap();
        data.stats.total_score = 999;
        data.save_session(&record(10));

        data.reset_all();
        assert!(data.sessions.is_empty());
        assert!(data.unlocked_skins.is_empty());
        assert_eq!(data.stats, GameStats::default());
        assert_eq!(data.settings.selected_skin, DEFAULT_SKIN_ID);
        assert!(!data.settings.sound_enabled);
    }
}
