//! Save/load persistence
//!
//! Features:
//! - [`Store`]: the narrow interface gameplay code talks to
//! - Versioned JSON envelope
//! - Backup rotation (tmp → save, old save → backup)
//! - Corruption detection and recovery from the backup

pub mod envelope;
pub mod file;
pub mod memory;

pub use envelope::{SAVE_VERSION, SaveData};
pub use file::JsonStore;
pub use memory::MemoryStore;

use crate::settings::{SettingsUpdate, UserSettings};
use crate::skins::Skin;
use crate::stats::{GameStats, SessionRecord, StatsUpdate};

/// Persistence failures
#[derive(Debug)]
pub enum PersistenceError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Save written by a newer build
    UnsupportedVersion(u32),
    UnknownSkin(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::Io(e) => write!(f, "storage I/O error: {e}"),
            PersistenceError::Json(e) => write!(f, "corrupt save data: {e}"),
            PersistenceError::UnsupportedVersion(v) => {
                write!(f, "save version {v} is newer than {SAVE_VERSION}")
            }
            PersistenceError::UnknownSkin(id) => write!(f, "no skin with id {id:?}"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io(e) => Some(e),
            PersistenceError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(e: std::io::Error) -> Self {
        PersistenceError::Io(e)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        PersistenceError::Json(e)
    }
}

/// Where settings, stats, skins and finished sessions live
///
/// Gameplay never depends on a store succeeding; see [`crate::Profile`].
pub trait Store {
    fn load_settings(&self) -> Result<UserSettings, PersistenceError>;
    fn update_settings(&mut self, update: &SettingsUpdate) -> Result<(), PersistenceError>;

    fn load_stats(&self) -> Result<GameStats, PersistenceError>;
    fn update_stats(&mut self, update: &StatsUpdate) -> Result<(), PersistenceError>;

    /// Full catalog, cheapest first, with unlock flags applied
    fn load_skins(&self) -> Result<Vec<Skin>, PersistenceError>;
    fn unlock_skin(&mut self, id: &str) -> Result<(), PersistenceError>;

    fn save_session(&mut self, record: &SessionRecord) -> Result<(), PersistenceError>;
    /// Finished sessions, oldest first
    fn load_sessions(&self) -> Result<Vec<SessionRecord>, PersistenceError>;

    /// Wipe stats and sessions, relock skins, reselect the default skin
    fn reset_all(&mut self) -> Result<(), PersistenceError>;
}
