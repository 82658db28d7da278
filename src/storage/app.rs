// Typed accessors over the key-value store

use super::KeyValueStore;
use crate::coach::GeneratedPhrase;
use crate::progression::UserProgress;
use crate::settings::AppSettings;
use std::sync::Arc;

pub const PROGRESS_KEY: &str = "pronounce-app-progress";
pub const SETTINGS_KEY: &str = "pronounce-app-settings";
pub const PHRASE_KEY: &str = "pronounce-app-current-phrase";

/// Typed application storage: progress, settings and the in-progress
/// phrase snapshot (kept so a reload resumes mid-exercise).
///
/// All reads degrade to defaults on missing or malformed data.
#[derive(Clone)]
pub struct AppStorage {
    store: Arc<dyn KeyValueStore>,
}

impl AppStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load progress, applying the XP backfill for records that predate
    /// XP tracking.
    pub fn progress(&self) -> UserProgress {
        let mut progress = self
            .store
            .get(PROGRESS_KEY)
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_else(UserProgress::new);
        progress.repair();
        progress
    }

    pub fn save_progress(&self, progress: &UserProgress) {
        match serde_json::to_value(progress) {
            Ok(value) => self.store.set(PROGRESS_KEY, value),
            Err(err) => crate::warn!("failed to serialize progress: {}", err),
        }
    }

    pub fn clear_progress(&self) {
        self.store.remove(PROGRESS_KEY);
    }

    pub fn settings(&self) -> Option<AppSettings> {
        self.store
            .get(SETTINGS_KEY)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    pub fn save_settings(&self, settings: &AppSettings) {
        match serde_json::to_value(settings) {
            Ok(value) => self.store.set(SETTINGS_KEY, value),
            Err(err) => crate::warn!("failed to serialize settings: {}", err),
        }
    }

    pub fn clear_settings(&self) {
        self.store.remove(SETTINGS_KEY);
    }

    /// Onboarding is complete once settings have been saved.
    pub fn has_completed_onboarding(&self) -> bool {
        self.settings().is_some()
    }

    pub fn current_phrase(&self) -> Option<GeneratedPhrase> {
        self.store
            .get(PHRASE_KEY)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    pub fn save_current_phrase(&self, phrase: &GeneratedPhrase) {
        match serde_json::to_value(phrase) {
            Ok(value) => self.store.set(PHRASE_KEY, value),
            Err(err) => crate::warn!("failed to serialize phrase snapshot: {}", err),
        }
    }

    pub fn clear_current_phrase(&self) {
        self.store.remove(PHRASE_KEY);
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
