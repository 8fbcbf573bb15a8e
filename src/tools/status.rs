/// Tool for checking XP, streaks and today's progress
///
/// This module implements the progress_status MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine::{Clock, ProgressionEngine};
use crate::storage::KeyValueStore;
use crate::summary::{daily_summary, DailySummary};
use crate::tools::ToolError;

/// Parameters for checking progress status
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct StatusParams {
    /// Include the newest few mood entries in the message
    #[serde(default)]
    pub include_recent: Option<bool>,
}

/// A mood entry as listed in the status message
#[derive(Debug, Serialize)]
pub struct RecentMood {
    pub logged_at: String,
    pub mood: String,
    pub note: String,
}

/// Response from checking progress status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub summary: DailySummary,
    pub recent_moods: Vec<RecentMood>,
    pub message: String,
}

const RECENT_LIMIT: usize = 5;

pub fn get_progress_status<S: KeyValueStore, C: Clock>(
    engine: &ProgressionEngine<S, C>,
    params: StatusParams,
) -> Result<StatusResponse, ToolError> {
    let summary = daily_summary(engine);

    let recent_moods: Vec<RecentMood> = if params.include_recent.unwrap_or(false) {
        engine
            .state()
            .mood_entries
            .iter()
            .rev()
            .take(RECENT_LIMIT)
            .map(|entry| RecentMood {
                logged_at: entry.logged_at.format("%Y-%m-%d %H:%M").to_string(),
                mood: format!("{} {}", entry.mood.emoji(), entry.mood.label()),
                note: entry.note.clone(),
            })
            .collect()
    } else {
        Vec::new()
    };

    let mut message = format!(
        "📊 {} XP | 🔥 Streak: {} (best {})\n{}\nToday: {}/3 tasks done",
        summary.current_xp,
        summary.current_streak,
        summary.best_streak,
        summary.streak_message,
        summary.tasks_completed
    );

    if let Some(next) = &summary.next_plant {
        message.push_str(&format!(
            "\n🌱 Next plant: {} ({} XP to go{})",
            next.name,
            next.xp_remaining,
            if next.is_premium { ", premium" } else { "" }
        ));
    } else {
        message.push_str("\n🌳 Every plant in your garden is unlocked!");
    }

    if !recent_moods.is_empty() {
        message.push_str("\n\nRecent moods:");
        for mood in &recent_moods {
            message.push_str(&format!("\n  {} {}", mood.logged_at, mood.mood));
            if !mood.note.is_empty() {
                message.push_str(&format!(" - {}", mood.note));
            }
        }
    }

    Ok(StatusResponse {
        summary,
        recent_moods,
        message,
    })
}
