/// Core types and enums used throughout the domain layer
///
/// This module defines the identifier types and the small enums (mood levels,
/// achievement categories, ritual categories) shared by entries, plants,
/// achievements and the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a logged record (mood, journal entry, ritual completion)
///
/// This is a wrapper around UUID so a record id can't be confused with a
/// catalog slug like a ritual or plant id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Generate a new random entry ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier of a ritual in the fixed ritual catalog
///
/// Rituals are never stored as entities, so completions reference them by slug
/// (e.g. "deep-breathing").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RitualId(pub String);

impl RitualId {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RitualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the user felt when logging a mood, from 1 (very sad) to 5 (very happy)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodLevel {
    VerySad = 1,
    Sad = 2,
    Neutral = 3,
    Happy = 4,
    VeryHappy = 5,
}

impl MoodLevel {
    pub const ALL: [MoodLevel; 5] = [
        MoodLevel::VerySad,
        MoodLevel::Sad,
        MoodLevel::Neutral,
        MoodLevel::Happy,
        MoodLevel::VeryHappy,
    ];

    /// Ordinal value 1-5
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Build a mood level from its 1-5 ordinal
    pub fn from_value(value: u8) -> Result<Self, DomainError> {
        match value {
            1 => Ok(MoodLevel::VerySad),
            2 => Ok(MoodLevel::Sad),
            3 => Ok(MoodLevel::Neutral),
            4 => Ok(MoodLevel::Happy),
            5 => Ok(MoodLevel::VeryHappy),
            other => Err(DomainError::InvalidMood(format!(
                "Mood level must be between 1 and 5, got {}",
                other
            ))),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoodLevel::VerySad => "Very Sad",
            MoodLevel::Sad => "Sad",
            MoodLevel::Neutral => "Neutral",
            MoodLevel::Happy => "Happy",
            MoodLevel::VeryHappy => "Very Happy",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            MoodLevel::VerySad => "😢",
            MoodLevel::Sad => "😔",
            MoodLevel::Neutral => "😐",
            MoodLevel::Happy => "😊",
            MoodLevel::VeryHappy => "😄",
        }
    }
}

impl FromStr for MoodLevel {
    type Err = DomainError;

    /// Accepts the ordinal ("4") or the label in any case, with spaces,
    /// underscores or dashes ("very happy", "very_happy", "Very-Happy")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u8>() {
            return Self::from_value(value);
        }

        let normalized = trimmed.to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "very_sad" => Ok(MoodLevel::VerySad),
            "sad" => Ok(MoodLevel::Sad),
            "neutral" => Ok(MoodLevel::Neutral),
            "happy" => Ok(MoodLevel::Happy),
            "very_happy" => Ok(MoodLevel::VeryHappy),
            _ => Err(DomainError::InvalidMood(format!(
                "Unknown mood '{}'. Valid options: very_sad, sad, neutral, happy, very_happy or 1-5",
                s
            ))),
        }
    }
}

/// Which progress metric an achievement threshold is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    /// Longest of the current and best mood streaks
    Streaks,
    /// Current XP total
    Xp,
    /// Number of mood entries
    Moods,
    /// Number of journal entries
    Journal,
    /// Number of completed rituals
    Rituals,
}

impl AchievementCategory {
    /// Get the display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            AchievementCategory::Streaks => "Streaks",
            AchievementCategory::Xp => "XP",
            AchievementCategory::Moods => "Moods",
            AchievementCategory::Journal => "Journal",
            AchievementCategory::Rituals => "Rituals",
        }
    }
}

/// Life area a daily ritual belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RitualCategory {
    Breathing,
    Gratitude,
    Movement,
    Mindfulness,
    Affirmation,
}

impl RitualCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            RitualCategory::Breathing => "Breathing",
            RitualCategory::Gratitude => "Gratitude",
            RitualCategory::Movement => "Movement",
            RitualCategory::Mindfulness => "Mindfulness",
            RitualCategory::Affirmation => "Affirmation",
        }
    }
}
