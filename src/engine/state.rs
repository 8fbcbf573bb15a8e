/// The full in-memory application state owned by the engine

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    default_achievements, default_plants, Achievement, CompletedRitual, GardenTheme,
    JournalEntry, MoodEntry, Plant, Streak, UserProfile,
};

/// Everything the engine tracks and persists
///
/// Presentation code gets read access through the engine; every mutation
/// goes through an engine method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppState {
    pub has_completed_onboarding: bool,
    pub user_profile: UserProfile,
    /// Never decreases
    pub current_xp: u32,
    pub streak: Streak,
    /// Append-only, insertion order preserved
    pub mood_entries: Vec<MoodEntry>,
    pub journal_entries: Vec<JournalEntry>,
    pub completed_rituals: Vec<CompletedRitual>,
    /// Full plant catalog with unlock status
    pub plants: Vec<Plant>,
    pub achievements: Vec<Achievement>,
    pub garden_theme: GardenTheme,
}

impl AppState {
    /// Empty state with no catalogs; `created_at` becomes the profile join date
    pub fn empty(created_at: DateTime<Utc>) -> Self {
        Self {
            has_completed_onboarding: false,
            user_profile: UserProfile::new(created_at),
            current_xp: 0,
            streak: Streak::default(),
            mood_entries: Vec::new(),
            journal_entries: Vec::new(),
            completed_rituals: Vec::new(),
            plants: Vec::new(),
            achievements: Vec::new(),
            garden_theme: GardenTheme::default(),
        }
    }

    /// Fresh first-run state with the default catalogs
    pub fn new(created_at: DateTime<Utc>) -> Self {
        let mut state = Self::empty(created_at);
        state.seed_catalogs();
        state
    }

    /// Fill in the plant and achievement catalogs if they are empty
    ///
    /// Catalogs are only created once; existing lists are never regenerated.
    /// Returns true if anything was seeded.
    pub fn seed_catalogs(&mut self) -> bool {
        let mut seeded = false;
        if self.plants.is_empty() {
            self.plants = default_plants();
            seeded = true;
        }
        if self.achievements.is_empty() {
            self.achievements = default_achievements();
            seeded = true;
        }
        seeded
    }

    pub fn current_streak(&self) -> u32 {
        self.streak.current_streak
    }

    pub fn best_streak(&self) -> u32 {
        self.streak.best_streak
    }

    pub fn last_mood_log_date(&self) -> Option<DateTime<Utc>> {
        self.streak.last_mood_log_date
    }
}
