/// Persistence gateway between the engine state and a key-value store
///
/// Each field of the state lives under its own key. Loading and saving are
/// best-effort per key: a missing or undecodable value falls back to its
/// default, and a failed write of one key doesn't stop the others.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::Streak;
use crate::engine::AppState;
use crate::storage::{keys, KeyValueStore, StorageError};

/// Outcome of a full-state save
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub written: usize,
    /// Keys whose write failed
    pub failed: Vec<&'static str>,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct PersistenceGateway<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Read the state, using defaults for anything missing or unreadable
    ///
    /// `now` is the join date recorded in a freshly created profile. Catalogs
    /// are not seeded here.
    pub fn load(&self, now: DateTime<Utc>) -> AppState {
        let mut state = AppState::empty(now);

        if let Some(done) = self.read(keys::HAS_COMPLETED_ONBOARDING) {
            state.has_completed_onboarding = done;
        }
        if let Some(xp) = self.read(keys::CURRENT_XP) {
            state.current_xp = xp;
        }

        state.streak = Streak::from_existing(
            self.read(keys::CURRENT_STREAK).unwrap_or(0),
            self.read(keys::BEST_STREAK).unwrap_or(0),
            self.read(keys::LAST_MOOD_LOG_DATE),
        );

        if let Some(profile) = self.read(keys::USER_PROFILE) {
            state.user_profile = profile;
        }
        if let Some(moods) = self.read(keys::MOOD_ENTRIES) {
            state.mood_entries = moods;
        }
        if let Some(journals) = self.read(keys::JOURNAL_ENTRIES) {
            state.journal_entries = journals;
        }
        if let Some(rituals) = self.read(keys::COMPLETED_RITUALS) {
            state.completed_rituals = rituals;
        }
        if let Some(plants) = self.read(keys::UNLOCKED_PLANTS) {
            state.plants = plants;
        }
        if let Some(achievements) = self.read(keys::ACHIEVEMENTS) {
            state.achievements = achievements;
        }
        if let Some(theme) = self.read(keys::CURRENT_GARDEN_THEME) {
            state.garden_theme = theme;
        }

        debug!(
            "Loaded state: {} XP, streak {}/{}, {} moods, {} journal entries, {} rituals",
            state.current_xp,
            state.streak.current_streak,
            state.streak.best_streak,
            state.mood_entries.len(),
            state.journal_entries.len(),
            state.completed_rituals.len()
        );

        state
    }

    /// Write every key of the state
    ///
    /// Never fails as a whole; failures are logged and listed in the report.
    /// The last mood log date is only written when there is one.
    pub fn save(&self, state: &AppState) -> SaveReport {
        let mut report = SaveReport::default();

        self.write(&mut report, keys::HAS_COMPLETED_ONBOARDING, &state.has_completed_onboarding);
        self.write(&mut report, keys::CURRENT_XP, &state.current_xp);
        self.write(&mut report, keys::CURRENT_STREAK, &state.streak.current_streak);
        self.write(&mut report, keys::BEST_STREAK, &state.streak.best_streak);
        if let Some(last_log) = &state.streak.last_mood_log_date {
            self.write(&mut report, keys::LAST_MOOD_LOG_DATE, last_log);
        }
        self.write(&mut report, keys::USER_PROFILE, &state.user_profile);
        self.write(&mut report, keys::MOOD_ENTRIES, &state.mood_entries);
        self.write(&mut report, keys::JOURNAL_ENTRIES, &state.journal_entries);
        self.write(&mut report, keys::COMPLETED_RITUALS, &state.completed_rituals);
        self.write(&mut report, keys::UNLOCKED_PLANTS, &state.plants);
        self.write(&mut report, keys::ACHIEVEMENTS, &state.achievements);
        self.write(&mut report, keys::CURRENT_GARDEN_THEME, &state.garden_theme);

        if report.is_complete() {
            debug!("Saved {} keys", report.written);
        } else {
            warn!("Saved {} keys, {} failed: {:?}", report.written, report.failed.len(), report.failed);
        }

        report
    }

    fn read<T: DeserializeOwned>(&self, key: &'static str) -> Option<T> {
        match self.store.get(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Ignoring undecodable value for {}: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read {}: {}", key, e);
                None
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&self, report: &mut SaveReport, key: &'static str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set(key, &json));

        match result {
            Ok(()) => report.written += 1,
            Err(e) => {
                warn!("Failed to save {}: {}", key, e);
                report.failed.push(key);
            }
        }
    }
}
