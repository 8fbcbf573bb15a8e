/// Tool for the "today" screen
///
/// This module implements the today_overview MCP tool: greeting, the ritual
/// and affirmation of the day, and which daily tasks remain.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DailyRitual, Entitlement, PremiumFeature};
use crate::engine::{Clock, ProgressionEngine};
use crate::storage::KeyValueStore;
use crate::summary::{daily_summary, DailySummary};
use crate::tools::ToolError;

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct TodayParams {}

#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub greeting: String,
    pub ritual: DailyRitual,
    pub ritual_completed: bool,
    /// False when today's ritual is premium and the user is on the free tier
    pub ritual_available: bool,
    pub affirmation: &'static str,
    pub summary: DailySummary,
    pub message: String,
}

pub fn today_overview<S: KeyValueStore, C: Clock>(
    engine: &ProgressionEngine<S, C>,
    entitlement: Entitlement,
    _params: TodayParams,
) -> Result<TodayResponse, ToolError> {
    let state = engine.state();
    let greeting = if state.has_completed_onboarding {
        format!("Hello, {}!", state.user_profile.display_name())
    } else {
        "Welcome to MoodBloom! Finish onboarding to personalise your garden.".to_string()
    };

    let ritual = engine.todays_ritual();
    let ritual_completed = engine.is_ritual_completed_today(&ritual.id);
    let ritual_available =
        !(ritual.is_premium && entitlement.requires_upgrade(PremiumFeature::PremiumRituals));
    let affirmation = engine.daily_affirmation();
    let summary = daily_summary(engine);

    let check = |done: bool| if done { "✅" } else { "⬜" };
    let message = format!(
        "{}\n\n💬 \"{}\"\n\n{} Log your mood\n{} {}{}\n{} Write in your journal\n\n{}",
        greeting,
        affirmation,
        check(summary.has_logged_mood),
        check(ritual_completed),
        ritual.title,
        if ritual_available { "" } else { " (premium)" },
        check(summary.has_journaled),
        summary.streak_message
    );

    Ok(TodayResponse {
        greeting,
        ritual,
        ritual_completed,
        ritual_available,
        affirmation,
        summary,
        message,
    })
}
