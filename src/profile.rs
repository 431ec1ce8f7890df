//! Player profile
//!
//! Caches settings, stats and skins loaded from a [`Store`] and keeps them in
//! sync with it. Store failures are logged and the in-memory copy carries on,
//! so a broken or missing store never stops a game from being played.

use rand::Rng;

use crate::persistence::{PersistenceError, Store};
use crate::settings::{SettingsUpdate, UserSettings};
use crate::sim::{Session, SessionState};
use crate::skins::{self, Palette, Skin};
use crate::stats::{GameStats, SessionRecord, StatsUpdate};
use crate::tuning::Tuning;

/// Why a skin could not be bought or selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopError {
    UnknownSkin(String),
    Locked(String),
    InsufficientPoints { price: u64, shortfall: u64 },
}

impl std::fmt::Display for ShopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShopError::UnknownSkin(id) => write!(f, "no skin with id {id:?}"),
            ShopError::Locked(id) => write!(f, "skin {id:?} is still locked"),
            ShopError::InsufficientPoints { price, shortfall } => {
                write!(f, "skin costs {price} points, {shortfall} more needed")
            }
        }
    }
}

impl std::error::Error for ShopError {}

/// Result of a successful purchase request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purchase {
    /// Points were spent and the skin unlocked
    Bought { price: u64 },
    /// Already owned; just selected
    AlreadyOwned,
}

/// What the end of a session changed
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverReport {
    pub record: SessionRecord,
    pub new_high_score: bool,
    /// High score after folding this session in
    pub high_score: u64,
}

pub struct Profile<S: Store> {
    store: S,
    settings: UserSettings,
    stats: GameStats,
    skins: Vec<Skin>,
}

fn or_default<T>(what: &str, result: Result<T, PersistenceError>, default: impl FnOnce() -> T) -> T {
    result.unwrap_or_else(|e| {
        log::warn!("Failed to load {what}: {e}; using defaults");
        default()
    })
}

fn log_write_failure(what: &str, result: Result<(), PersistenceError>) {
    if let Err(e) = result {
        log::warn!("Failed to persist {what}: {e}; keeping in-memory copy");
    }
}

impl<S: Store> Profile<S> {
    /// Load everything the store has, falling back to defaults per item
    pub fn load(store: S) -> Self {
        let settings = or_default("settings", store.load_settings(), UserSettings::default);
        let stats = or_default("stats", store.load_stats(), GameStats::default);
        let skins = or_default("skins", store.load_skins(), skins::catalog);
        log::info!(
            "Profile loaded: {} games, high score {}, skin {:?}",
            stats.games_played,
            stats.high_score,
            settings.selected_skin
        );
        Self {
            store,
            settings,
            stats,
            skins,
        }
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn skins(&self) -> &[Skin] {
        &self.skins
    }

    /// Logged finished sessions, oldest first; empty when the store fails
    pub fn session_history(&self) -> Vec<SessionRecord> {
        or_default("session history", self.store.load_sessions(), Vec::new)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn skin(&self, id: &str) -> Option<&Skin> {
        self.skins.iter().find(|s| s.id == id)
    }

    /// Palette of the selected skin, or the fallback colours
    pub fn active_palette(&self) -> Palette {
        match self.skin(&self.settings.selected_skin) {
            Some(skin) if skin.unlocked => skin.palette(),
            _ => Palette::fallback(),
        }
    }

    /// Start a session using the active palette and stored high score
    pub fn new_session(&self, tuning: Tuning, seed: u64) -> Session {
        Session::new(tuning, self.active_palette(), seed, self.stats.high_score)
    }

    pub fn update_settings(&mut self, update: &SettingsUpdate) {
        if update.is_empty() {
            return;
        }
        self.settings.apply(update);
        log_write_failure("settings", self.store.update_settings(update));
    }

    fn update_stats(&mut self, update: &StatsUpdate) {
        self.stats.apply(update);
        log_write_failure("stats", self.store.update_stats(update));
    }

    /// Log a finished session and fold it into the lifetime stats
    pub fn record_game_over(&mut self, state: &SessionState) -> GameOverReport {
        let record = SessionRecord::from_state(state, &self.settings.selected_skin);
        let new_high_score = self.stats.is_new_high_score(record.score);

        log_write_failure("session", self.store.save_session(&record));
        let update = self.stats.fold_session(&record);
        self.update_stats(&update);

        log::info!(
            "Session recorded: score={} level={} perfect={} ({} games, avg {:.1})",
            record.score,
            record.level,
            record.perfect_hits,
            self.stats.games_played,
            self.stats.average_score
        );
        if new_high_score {
            log::info!("New high score: {}", record.score);
        }

        GameOverReport {
            record,
            new_high_score,
            high_score: self.stats.high_score,
        }
    }

    /// Select an owned skin
    pub fn select_skin(&mut self, id: &str) -> Result<(), ShopError> {
        let skin = self
            .skin(id)
            .ok_or_else(|| ShopError::UnknownSkin(id.to_string()))?;
        if !skin.unlocked {
            return Err(ShopError::Locked(id.to_string()));
        }
        self.update_settings(&SettingsUpdate::select_skin(id));
        Ok(())
    }

    /// Buy a skin with accumulated points and select it
    pub fn purchase_skin(&mut self, id: &str) -> Result<Purchase, ShopError> {
        let (unlocked, price) = self
            .skin(id)
            .map(|s| (s.unlocked, s.price))
            .ok_or_else(|| ShopError::UnknownSkin(id.to_string()))?;
        if unlocked {
            self.select_skin(id)?;
            return Ok(Purchase::AlreadyOwned);
        }

        if self.stats.total_score < price {
            return Err(ShopError::InsufficientPoints {
                price,
                shortfall: self.stats.shortfall(price),
            });
        }

        self.update_stats(&StatsUpdate {
            total_score: Some(self.stats.total_score - price),
            ..Default::default()
        });
        log_write_failure("skin unlock", self.store.unlock_skin(id));
        if let Some(skin) = self.skins.iter_mut().find(|s| s.id == id) {
            skin.unlocked = true;
        }
        self.select_skin(id)?;

        log::info!("Bought skin {id:?} for {price} points");
        Ok(Purchase::Bought { price })
    }

    /// Wipe stats, sessions and purchases, and restart `session` with a zero
    /// high score and the default palette
    pub fn reset_all<R: Rng>(&mut self, session: &mut Session<R>) {
        match self.store.reset_all() {
            Ok(()) => {
                self.settings = or_default("settings", self.store.load_settings(), UserSettings::default);
                self.stats = or_default("stats", self.store.load_stats(), GameStats::default);
                self.skins = or_default("skins", self.store.load_skins(), skins::catalog);
            }
            Err(e) => {
                log::warn!("Failed to reset store: {e}; resetting in memory only");
                self.stats = GameStats::default();
                self.skins = skins::catalog();
                self.settings.selected_skin = skins::DEFAULT_SKIN_ID.to_string();
            }
        }
        session.set_palette(self.active_palette());
        session.restart(self.stats.high_score);
        log::info!("All player data reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, SaveData};
    use crate::sim::Command;
    use crate::skins::DEFAULT_SKIN_ID;

    /// A store whose every operation fails
    struct BrokenStore;

    fn broken() -> PersistenceError {
        PersistenceError::Io(std::io::Error::other("disk on fire"))
    }

    impl Store for BrokenStore {
        fn load_settings(&self) -> Result<UserSettings, PersistenceError> {
            Err(broken())
        }
        fn update_settings(&mut self, _: &SettingsUpdate) -> Result<(), PersistenceError> {
            Err(broken())
        }
        fn load_stats(&self) -> Result<GameStats, PersistenceError> {
            Err(broken())
        }
        fn update_stats(&mut self, _: &StatsUpdate) -> Result<(), PersistenceError> {
            Err(broken())
        }
        fn load_skins(&self) -> Result<Vec<Skin>, PersistenceError> {
            Err(broken())
        }
        fn unlock_skin(&mut self, _: &str) -> Result<(), PersistenceError> {
            Err(broken())
        }
        fn save_session(&mut self, _: &SessionRecord) -> Result<(), PersistenceError> {
            Err(broken())
        }
        fn load_sessions(&self) -> Result<Vec<SessionRecord>, PersistenceError> {
            Err(broken())
        }
        fn reset_all(&mut self) -> Result<(), PersistenceError> {
            Err(broken())
        }
    }

    fn rich_profile(total_score: u64) -> Profile<MemoryStore> {
        let mut data = SaveData::default();
        data.stats.total_score = total_score;
        Profile::load(MemoryStore::with_data(data))
    }

    /// Play a short session that ends in a miss on the second drop
    fn finished_session(profile: &Profile<impl Store>) -> Session {
        let mut session = profile.new_session(Tuning::default(), 5);
        session.apply(Command::Start).unwrap();
        session.apply(Command::Drop).unwrap();
        // 40 ticks at 2.3px carry the 80px block clear of the 100px base
        for _ in 0..40 {
            session.apply(Command::Tick).unwrap();
        }
        session.apply(Command::Drop).unwrap();
        assert!(session.state().is_game_over());
        session
    }

    #[test]
    fn test_defaults_from_empty_store() {
        let profile = Profile::load(MemoryStore::new());
        assert_eq!(profile.settings().selected_skin, DEFAULT_SKIN_ID);
        assert_eq!(profile.skins().len(), 5);
        assert_eq!(profile.active_palette(), skins::catalog()[0].palette());
    }

    #[test]
    fn test_broken_store_still_plays() {
        let mut profile = Profile::load(BrokenStore);
        assert_eq!(profile.stats(), &GameStats::default());

        let session = finished_session(&profile);
        let report = profile.record_game_over(session.state());
        assert_eq!(profile.stats().games_played, 1);
        assert_eq!(report.high_score, session.state().score);
        assert!(profile.session_history().is_empty());

        profile.update_settings(&SettingsUpdate {
            sound_enabled: Some(false),
            ..Default::default()
        });
        assert!(!profile.settings().sound_enabled);
    }

    #[test]
    fn test_record_game_over_updates_store() {
        let mut profile = Profile::load(MemoryStore::new());
        let session = finished_session(&profile);
        let score = session.state().score;
        assert!(score > 0);

        let report = profile.record_game_over(session.state());
        assert!(report.new_high_score);
        assert_eq!(report.high_score, score);
        assert_eq!(report.record.score, score);

        let data = profile.store().data();
        assert_eq!(data.sessions.len(), 1);
        assert_eq!(data.stats.games_played, 1);
        assert_eq!(data.stats.total_score, score);

        // Same score again is not a new record
        let report = profile.record_game_over(session.state());
        assert!(!report.new_high_score);
        assert_eq!(profile.stats().total_score, score * 2);

        let history = profile.session_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1], report.record);
    }

    #[test]
    fn test_new_session_carries_high_score() {
        let mut data = SaveData::default();
        data.stats.high_score = 1234;
        let profile = Profile::load(MemoryStore::with_data(data));
        let session = profile.new_session(Tuning::default(), 1);
        assert_eq!(session.state().high_score, 1234);
    }

    #[test]
    fn test_purchase_deducts_points_and_selects() {
        let mut profile = rich_profile(250);
        let outcome = profile.purchase_skin("ocean").unwrap();
        assert_eq!(outcome, Purchase::Bought { price: 150 });
        assert_eq!(profile.stats().total_score, 100);
        assert_eq!(profile.settings().selected_skin, "ocean");
        assert!(profile.store().data().unlocked_skins.contains(&"ocean".to_string()));
        assert_eq!(profile.store().data().stats.total_score, 100);

        let ocean = profile.skins().iter().find(|s| s.id == "ocean").unwrap().palette();
        assert_eq!(profile.active_palette(), ocean);

        // Buying again costs nothing
        assert_eq!(profile.purchase_skin("ocean").unwrap(), Purchase::AlreadyOwned);
        assert_eq!(profile.stats().total_score, 100);
    }

    #[test]
    fn test_purchase_needs_points() {
        let mut profile = rich_profile(120);
        assert_eq!(
            profile.purchase_skin("sunset"),
            Err(ShopError::InsufficientPoints {
                price: 200,
                shortfall: 80
            })
        );
        assert_eq!(profile.stats().total_score, 120);
        assert_eq!(profile.settings().selected_skin, DEFAULT_SKIN_ID);
    }

    #[test]
    fn test_select_locked_or_unknown_skin() {
        let mut profile = rich_profile(0);
        assert_eq!(
            profile.select_skin("galaxy"),
            Err(ShopError::Locked("galaxy".to_string()))
        );
        assert_eq!(
            profile.purchase_skin("plaid"),
            Err(ShopError::UnknownSkin("plaid".to_string()))
        );
        assert!(profile.select_skin(DEFAULT_SKIN_ID).is_ok());
    }

    #[test]
    fn test_reset_all() {
        let mut profile = rich_profile(500);
        profile.purchase_skin("neon").unwrap();
        let mut session = profile.new_session(Tuning::default(), 2);
        profile.reset_all(&mut session);

        assert_eq!(profile.stats(), &GameStats::default());
        assert_eq!(profile.settings().selected_skin, DEFAULT_SKIN_ID);
        assert!(!profile.skins().iter().find(|s| s.id == "neon").unwrap().unlocked);
    }

    #[test]
    fn test_reset_all_zeroes_session_high_score() {
        let mut profile = Profile::load(MemoryStore::new());
        let mut session = finished_session(&profile);
        let report = profile.record_game_over(session.state());
        session.apply(Command::Reset).unwrap();
        session.apply(Command::SetHighScore(report.high_score)).unwrap();
        assert!(session.state().high_score > 0);

        profile.reset_all(&mut session);
        assert_eq!(profile.stats().high_score, 0);
        assert_eq!(session.state().high_score, 0);
        assert_eq!(session.phase(), crate::sim::Phase::Ready);
        assert_eq!(session.state().score, 0);
    }

    #[test]
    fn test_reset_all_with_broken_store() {
        let mut profile = Profile::load(BrokenStore);
        let mut session = profile.new_session(Tuning::default(), 2);
        profile.reset_all(&mut session);
        assert_eq!(profile.settings().selected_skin, DEFAULT_SKIN_ID);
        assert_eq!(profile.stats().games_played, 0);
    }
}
