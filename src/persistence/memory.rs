//! In-memory store, used when no save file is wanted and in tests

use super::{PersistenceError, SaveData, Store};
use crate::settings::{SettingsUpdate, UserSettings};
use crate::skins::Skin;
use crate::stats::{GameStats, SessionRecord, StatsUpdate};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: SaveData,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: SaveData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &SaveData {
        &self.data
    }
}

impl Store for MemoryStore {
    fn load_settings(&self) -> Result<UserSettings, PersistenceError> {
        Ok(self.data.settings.clone())
    }

    fn update_settings(&mut self, update: &SettingsUpdate) -> Result<(), PersistenceError> {
        self.data.update_settings(update);
        Ok(())
    }

    fn load_stats(&self) -> Result<GameStats, PersistenceError> {
        Ok(self.data.stats.clone())
    }

    fn update_stats(&mut self, update: &StatsUpdate) -> Result<(), PersistenceError> {
        self.data.update_stats(update);
        Ok(())
    }

    fn load_skins(&self) -> Result<Vec<Skin>, PersistenceError> {
        Ok(self.data.skins())
    }

    fn unlock_skin(&mut self, id: &str) -> Result<(), PersistenceError> {
        self.data.unlock_skin(id)
    }

    fn save_session(&mut self, record: &SessionRecord) -> Result<(), PersistenceError> {
        self.data.save_session(record);
        Ok(())
    }

    fn load_sessions(&self) -> Result<Vec<SessionRecord>, PersistenceError> {
        Ok(self.data.sessions.clone())
    }

    fn reset_all(&mut self) -> Result<(), PersistenceError> {
        self.data.reset_all();
        Ok(())
    }
}
