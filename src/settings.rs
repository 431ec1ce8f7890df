//! User settings and preferences
//!
//! Persisted alongside stats by the store. Every field has a default so an
//! older or partial save still loads.

use serde::{Deserialize, Serialize};

use crate::skins::DEFAULT_SKIN_ID;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    // === Audio ===
    /// Sound effects on drops, perfect hits and game over
    pub sound_enabled: bool,
    /// Background music
    pub music_enabled: bool,

    // === Feedback ===
    /// Haptic feedback on drops
    pub vibration_enabled: bool,

    // === Cosmetics ===
    /// Id of the skin whose palette colours new blocks
    pub selected_skin: String,

    // === Monetization ===
    /// Interstitial ads between games
    pub ads_enabled: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            vibration_enabled: true,
            selected_skin: DEFAULT_SKIN_ID.to_string(),
            ads_enabled: true,
        }
    }
}

/// A partial settings change; `None` fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub sound_enabled: Option<bool>,
    pub music_enabled: Option<bool>,
    pub vibration_enabled: Option<bool>,
    pub selected_skin: Option<String>,
    pub ads_enabled: Option<bool>,
}

impl SettingsUpdate {
    pub fn select_skin(id: &str) -> Self {
        Self {
            selected_skin: Some(id.to_string()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl UserSettings {
    /// Apply a partial update
    pub fn apply(&mut self, update: &SettingsUpdate) {
        if let Some(v) = update.sound_enabled {
            self.sound_enabled = v;
        }
        if let Some(v) = update.music_enabled {
            self.music_enabled = v;
        }
        if let Some(v) = update.vibration_enabled {
            self.vibration_enabled = v;
        }
        if let Some(v) = &update.selected_skin {
            self.selected_skin = v.clone();
        }
        if let Some(v) = update.ads_enabled {
            self.ads_enabled = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = UserSettings::default();
        assert!(settings.sound_enabled);
        assert!(settings.music_enabled);
        assert!(settings.ads_enabled);
        assert_eq!(settings.selected_skin, "default");
    }

    #[test]
    fn test_partial_update() {
        let mut settings = UserSettings::default();
        settings.apply(&SettingsUpdate {
            music_enabled: Some(false),
            ..Default::default()
        });
        assert!(!settings.music_enabled);
        assert!(settings.sound_enabled);

        settings.apply(&SettingsUpdate::select_skin("neon"));
        assert_eq!(settings.selected_skin, "neon");
        assert!(!settings.music_enabled);
    }

    #[test]
    fn test_empty_update() {
        assert!(SettingsUpdate::default().is_empty());
        assert!(!SettingsUpdate::select_skin("ocean").is_empty());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: UserSettings = serde_json::from_str(r#"{ "sound_enabled": false }"#).unwrap();
        assert!(!settings.sound_enabled);
        assert!(settings.vibration_enabled);
        assert_eq!(settings.selected_skin, "default");
    }
}
