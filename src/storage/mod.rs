/// Storage layer for persisting progress
///
/// The engine persists its state as a set of string keys mapped to JSON
/// values. This module defines that key-value interface, the SQLite and
/// in-memory implementations, and the gateway that maps the engine state onto
/// individual keys.

pub mod sqlite;
pub mod migrations;
pub mod memory;
pub mod gateway;

// Re-export the main storage types
pub use sqlite::*;
pub use memory::*;
pub use gateway::*;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Persisted key names
pub mod keys {
    pub const HAS_COMPLETED_ONBOARDING: &str = "hasCompletedOnboarding";
    pub const CURRENT_XP: &str = "currentXP";
    pub const CURRENT_STREAK: &str = "currentStreak";
    pub const BEST_STREAK: &str = "bestStreak";
    pub const LAST_MOOD_LOG_DATE: &str = "lastMoodLogDate";
    pub const USER_PROFILE: &str = "userProfile";
    pub const MOOD_ENTRIES: &str = "moodEntries";
    pub const JOURNAL_ENTRIES: &str = "journalEntries";
    pub const COMPLETED_RITUALS: &str = "completedRituals";
    pub const UNLOCKED_PLANTS: &str = "unlockedPlants";
    pub const ACHIEVEMENTS: &str = "achievements";
    pub const CURRENT_GARDEN_THEME: &str = "currentGardenTheme";

    pub const ALL: [&str; 12] = [
        HAS_COMPLETED_ONBOARDING,
        CURRENT_XP,
        CURRENT_STREAK,
        BEST_STREAK,
        LAST_MOOD_LOG_DATE,
        USER_PROFILE,
        MOOD_ENTRIES,
        JOURNAL_ENTRIES,
        COMPLETED_RITUALS,
        UNLOCKED_PLANTS,
        ACHIEVEMENTS,
        CURRENT_GARDEN_THEME,
    ];
}

/// Trait defining the durable key-value interface
///
/// This trait allows the SQLite store to be swapped for another backend (or
/// an in-memory map in tests) while keeping the same gateway.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key` if present
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
