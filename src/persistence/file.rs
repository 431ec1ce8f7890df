//! JSON file store with backup rotation
//!
//! Writes go to `<path>.tmp` first, the previous save is copied to
//! `<path>.bak`, then the tmp file is renamed over the save. A save that
//! fails to parse is replaced by its backup, or by defaults.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::envelope::{self, SaveData};
use super::{PersistenceError, Store};
use crate::settings::{SettingsUpdate, UserSettings};
use crate::skins::Skin;
use crate::stats::{GameStats, SessionRecord, StatsUpdate};

#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    data: SaveData,
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Read and decode one file; `Ok(None)` when it does not exist
fn read_save(path: &Path) -> Result<Option<SaveData>, PersistenceError> {
    match fs::read_to_string(path) {
        Ok(json) => envelope::decode(&json).map(Some),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl JsonStore {
    /// Open (or start) the save at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let data = match read_save(&path) {
            Ok(Some(data)) => {
                log::info!("Loaded save from {}", path.display());
                data
            }
            Ok(None) => {
                log::info!("No save at {}, starting fresh", path.display());
                SaveData::default()
            }
            Err(PersistenceError::Io(e)) => return Err(PersistenceError::Io(e)),
            Err(e) => {
                log::warn!("Save at {} is unusable ({e}), trying backup", path.display());
                Self::recover(&path)
            }
        };
        Ok(Self { path, data })
    }

    fn recover(path: &Path) -> SaveData {
        let backup = Self::backup_path_for(path);
        match read_save(&backup) {
            Ok(Some(data)) => {
                log::info!("Recovered save from {}", backup.display());
                data
            }
            Ok(None) => {
                log::warn!("No backup available, using defaults");
                SaveData::default()
            }
            Err(e) => {
                log::warn!("Backup is unusable too ({e}), using defaults");
                SaveData::default()
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path_for(path: &Path) -> PathBuf {
        sibling(path, ".bak")
    }

    pub fn data(&self) -> &SaveData {
        &self.data
    }

    /// Write the in-memory data to disk
    pub fn flush(&self) -> Result<(), PersistenceError> {
        self.save(&self.data)
    }

    fn save(&self, data: &SaveData) -> Result<(), PersistenceError> {
        let json = envelope::encode(data)?;
        let tmp = sibling(&self.path, ".tmp");
        fs::write(&tmp, json)?;
        if self.path.exists() {
            fs::copy(&self.path, Self::backup_path_for(&self.path))?;
        }
        fs::rename(&tmp, &self.path)?;
        log::debug!("Saved to {}", self.path.display());
        Ok(())
    }

    /// Mutate a copy and persist it; memory only changes once the disk has
    fn write(
        &mut self,
        f: impl FnOnce(&mut SaveData) -> Result<(), PersistenceError>,
    ) -> Result<(), PersistenceError> {
        let mut next = self.data.clone();
        f(&mut next)?;
        self.save(&next)?;
        self.data = next;
        Ok(())
    }
}

impl Store for JsonStore {
    fn load_settings(&self) -> Result<UserSettings, PersistenceError> {
        Ok(self.data.settings.clone())
    }

    fn update_settings(&mut self, update: &SettingsUpdate) -> Result<(), PersistenceError> {
        self.write(|d| {
            d.update_settings(update);
            Ok(())
        })
    }

    fn load_stats(&self) -> Result<GameStats, PersistenceError> {
        Ok(self.data.stats.clone())
    }

    fn update_stats(&mut self, update: &StatsUpdate) -> Result<(), PersistenceError> {
        self.write(|d| {
            d.update_stats(update);
            Ok(())
        })
    }

    fn load_skins(&self) -> Result<Vec<Skin>, PersistenceError> {
        Ok(self.data.skins())
    }

    fn unlock_skin(&mut self, id: &str) -> Result<(), PersistenceError> {
        self.write(|d| d.unlock_skin(id))
    }

    fn save_session(&mut self, record: &SessionRecord) -> Result<(), PersistenceError> {
        self.write(|d| {
            d.save_session(record);
            Ok(())
        })
    }

    fn load_sessions(&self) -> Result<Vec<SessionRecord>, PersistenceError> {
        Ok(self.data.sessions.clone())
    }

    fn reset_all(&mut self) -> Result<(), PersistenceError> {
        self.write(|d| {
            d.reset_all();
            Ok(())
        })
    }
}
