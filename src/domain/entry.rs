/// Logged records: moods, journal entries and ritual completions
///
/// Each mutating action in the app appends exactly one of these records.
/// They are immutable once created and carry the fixed amount of XP they
/// earned at the time.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{EntryId, MoodLevel, RitualId};

/// XP earned for every mood log
pub const MOOD_ENTRY_XP: u32 = 10;
/// XP earned for every journal entry
pub const JOURNAL_ENTRY_XP: u32 = 5;
/// XP earned for every ritual completion
pub const RITUAL_COMPLETION_XP: u32 = 15;

/// A single mood check-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Unique identifier for this entry
    pub id: EntryId,
    /// When the mood was logged
    pub logged_at: DateTime<Utc>,
    /// How the user felt
    pub mood: MoodLevel,
    /// Free-form note, may be empty
    pub note: String,
    /// XP awarded for this entry
    pub xp_earned: u32,
}

impl MoodEntry {
    /// Create a new mood entry stamped at `logged_at`
    pub fn new(mood: MoodLevel, note: String, logged_at: DateTime<Utc>) -> Self {
        Self {
            id: EntryId::new(),
            logged_at,
            mood,
            note,
            xp_earned: MOOD_ENTRY_XP,
        }
    }

    /// Check if this entry has a non-blank note
    pub fn has_note(&self) -> bool {
        !self.note.trim().is_empty()
    }
}

/// A free-text reflection with optional tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    pub written_at: DateTime<Utc>,
    pub content: String,
    /// Tags in any order; duplicates are not meaningful
    pub tags: Vec<String>,
    pub xp_earned: u32,
}

impl JournalEntry {
    /// Create a new journal entry
    ///
    /// Content is not validated here: rejecting blank text is the caller's
    /// precondition.
    pub fn new(content: String, tags: Vec<String>, written_at: DateTime<Utc>) -> Self {
        Self {
            id: EntryId::new(),
            written_at,
            content,
            tags,
            xp_earned: JOURNAL_ENTRY_XP,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// A record of completing one of the daily rituals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedRitual {
    pub id: EntryId,
    /// Which catalog ritual was completed
    pub ritual_id: RitualId,
    pub completed_at: DateTime<Utc>,
    pub xp_earned: u32,
}

impl CompletedRitual {
    pub fn new(ritual_id: RitualId, completed_at: DateTime<Utc>) -> Self {
        Self {
            id: EntryId::new(),
            ritual_id,
            completed_at,
            xp_earned: RITUAL_COMPLETION_XP,
        }
    }
}
