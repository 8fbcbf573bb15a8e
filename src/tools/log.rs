/// Tool for logging the day's mood
///
/// This module implements the mood_log MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::MoodLevel;
use crate::engine::{Clock, ProgressionEngine};
use crate::storage::KeyValueStore;
use crate::tools::{with_unlocks, ToolError};

/// A mood given either as its 1-5 value or as a label
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum MoodInput {
    Value(u8),
    Label(String),
}

impl MoodInput {
    fn resolve(&self) -> Result<MoodLevel, ToolError> {
        let mood = match self {
            MoodInput::Value(value) => MoodLevel::from_value(*value)?,
            MoodInput::Label(label) => label.parse()?,
        };
        Ok(mood)
    }
}

/// Parameters for logging a mood
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogMoodParams {
    /// Mood as 1-5 or a label: very_sad, sad, neutral, happy, very_happy
    pub mood: MoodInput,
    /// Optional note about how the day went
    #[serde(default)]
    pub note: Option<String>,
}

/// Response from logging a mood
#[derive(Debug, Serialize)]
pub struct LogMoodResponse {
    pub success: bool,
    pub message: String,
    pub current_xp: u32,
    pub current_streak: u32,
}

/// Log a mood, once per calendar day
pub fn log_mood<S: KeyValueStore, C: Clock>(
    engine: &mut ProgressionEngine<S, C>,
    params: LogMoodParams,
) -> Result<LogMoodResponse, ToolError> {
    let mood = params.mood.resolve()?;

    let note = params.note.unwrap_or_default();
    if note.chars().count() > 500 {
        return Err(ToolError::Validation(
            "Note too long (max 500 characters)".to_string(),
        ));
    }

    if engine.has_logged_mood_today() {
        return Err(ToolError::AlreadyDoneToday(
            "You've already logged your mood today. Come back tomorrow!".to_string(),
        ));
    }

    let entry = engine.log_mood(mood, note);
    let unlocks = engine.take_new_unlocks();
    let streak = engine.streak().current_streak;

    let message = format!(
        "{} Logged '{}' (+{} XP). Current streak: {} day{}",
        mood.emoji(),
        mood.label(),
        entry.xp_earned,
        streak,
        if streak == 1 { "" } else { "s" }
    );

    Ok(LogMoodResponse {
        success: true,
        message: with_unlocks(message, &unlocks),
        current_xp: engine.current_xp(),
        current_streak: streak,
    })
}
