/// Tool for completing the daily ritual
///
/// This module implements the ritual_complete MCP tool. The engine itself
/// accepts repeated completions; this tool allows each ritual once per day.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{find_ritual, Entitlement};
use crate::engine::{Clock, ProgressionEngine};
use crate::storage::KeyValueStore;
use crate::tools::{with_unlocks, ToolError};

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct CompleteRitualParams {
    /// Ritual slug (optional - defaults to today's ritual)
    #[serde(default)]
    pub ritual_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompleteRitualResponse {
    pub success: bool,
    pub ritual_id: String,
    pub message: String,
}

pub fn complete_ritual<S: KeyValueStore, C: Clock>(
    engine: &mut ProgressionEngine<S, C>,
    entitlement: Entitlement,
    params: CompleteRitualParams,
) -> Result<CompleteRitualResponse, ToolError> {
    let ritual = match params.ritual_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => find_ritual(id)?,
        _ => engine.todays_ritual(),
    };

    if engine.is_ritual_completed_today(&ritual.id) {
        return Err(ToolError::AlreadyDoneToday(format!(
            "'{}' is already completed today",
            ritual.title
        )));
    }

    let completion = engine.complete_daily_ritual(&ritual, entitlement)?;
    let unlocks = engine.take_new_unlocks();

    let message = format!(
        "✨ Completed '{}' (+{} XP)",
        ritual.title, completion.xp_earned
    );

    Ok(CompleteRitualResponse {
        success: true,
        ritual_id: ritual.id.to_string(),
        message: with_unlocks(message, &unlocks),
    })
}
