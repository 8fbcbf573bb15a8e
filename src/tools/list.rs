/// Tools for listing the garden and achievements
///
/// This module implements the garden_view and achievements_list MCP tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Entitlement, GardenTheme};
use crate::engine::{Clock, ProgressionEngine};
use crate::storage::KeyValueStore;
use crate::summary::{achievement_progress, garden, next_plant, AchievementProgress, GardenPlot, NextPlant};
use crate::tools::ToolError;

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct GardenParams {
    /// Show only plants that are already growing
    #[serde(default)]
    pub unlocked_only: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct GardenResponse {
    pub theme: GardenTheme,
    pub plots: Vec<GardenPlot>,
    pub next_plant: Option<NextPlant>,
    pub message: String,
}

pub fn view_garden<S: KeyValueStore, C: Clock>(
    engine: &ProgressionEngine<S, C>,
    entitlement: Entitlement,
    params: GardenParams,
) -> Result<GardenResponse, ToolError> {
    let mut plots = garden(engine, entitlement);
    if params.unlocked_only.unwrap_or(false) {
        plots.retain(|plot| plot.plant.is_unlocked);
    }

    let grown = engine.available_plants().len();
    let total = engine.state().plants.len();
    let theme = engine.state().garden_theme;

    let lines: Vec<String> = plots
        .iter()
        .map(|plot| {
            let plant = &plot.plant;
            if plant.is_unlocked {
                format!("🌸 {} (planted)", plant.name)
            } else if !plot.viewable {
                format!("🔒 {} (premium, {} XP)", plant.name, plant.required_xp)
            } else {
                format!(
                    "🌰 {} ({} XP to go)",
                    plant.name,
                    plant.xp_remaining(engine.current_xp())
                )
            }
        })
        .collect();

    let message = format!(
        "🪴 {} garden: {} of {} plants growing\n\n{}",
        theme.display_name(),
        grown,
        total,
        lines.join("\n")
    );

    Ok(GardenResponse {
        theme,
        plots,
        next_plant: next_plant(&engine.state().plants, engine.current_xp()),
        message,
    })
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct AchievementsParams {
    /// Filter by category: streaks, xp, moods, journal or rituals
    #[serde(default)]
    pub category: Option<String>,
    /// Include achievements that are still locked (default true)
    #[serde(default)]
    pub include_locked: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct AchievementsResponse {
    pub achievements: Vec<AchievementProgress>,
    pub unlocked_count: usize,
    pub total_count: usize,
    pub message: String,
}

pub fn list_achievements<S: KeyValueStore, C: Clock>(
    engine: &ProgressionEngine<S, C>,
    params: AchievementsParams,
) -> Result<AchievementsResponse, ToolError> {
    let all = achievement_progress(engine);
    let total_count = all.len();
    let unlocked_count = all.iter().filter(|a| a.is_unlocked).count();

    let category = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    if let Some(name) = category {
        if !all.iter().any(|a| a.category.eq_ignore_ascii_case(name)) {
            return Err(ToolError::InvalidArguments(format!(
                "Unknown achievement category '{}'",
                name
            )));
        }
    }

    let include_locked = params.include_locked.unwrap_or(true);
    let achievements: Vec<AchievementProgress> = all
        .into_iter()
        .filter(|a| category.map_or(true, |name| a.category.eq_ignore_ascii_case(name)))
        .filter(|a| include_locked || a.is_unlocked)
        .collect();

    let message = if achievements.is_empty() {
        "No achievements to show yet. Keep logging!".to_string()
    } else {
        let lines: Vec<String> = achievements
            .iter()
            .map(|a| {
                if a.is_unlocked {
                    format!("🏆 {} - {}", a.title, a.description)
                } else {
                    format!(
                        "⬜ {} - {} ({}/{})",
                        a.title, a.description, a.current, a.required
                    )
                }
            })
            .collect();
        format!(
            "Achievements: {} of {} unlocked\n\n{}",
            unlocked_count,
            total_count,
            lines.join("\n")
        )
    };

    Ok(AchievementsResponse {
        achievements,
        unlocked_count,
        total_count,
        message,
    })
}
