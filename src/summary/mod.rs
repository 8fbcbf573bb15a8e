/// Read-only views computed from engine state
///
/// This module gathers the numbers the presentation layer shows on the
/// "today" and garden screens: which daily tasks are done, how far the next
/// plant is, and progress toward each achievement.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Entitlement, Plant, PremiumFeature};
use crate::engine::{current_progress, progress_fraction, Clock, ProgressionEngine};
use crate::storage::KeyValueStore;

/// Snapshot of today's activity and overall progress
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub has_logged_mood: bool,
    pub rituals_completed: usize,
    pub has_journaled: bool,
    /// Mood, ritual and journal tasks done today (0-3)
    pub tasks_completed: u8,
    pub current_xp: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub streak_message: String,
    pub next_plant: Option<NextPlant>,
}

/// The cheapest plant still locked
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextPlant {
    pub name: String,
    pub required_xp: u32,
    pub xp_remaining: u32,
    /// Progress toward the plant as 0.0..=1.0
    pub progress: f64,
    pub is_premium: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementProgress {
    pub title: String,
    pub description: String,
    pub category: &'static str,
    pub current: u32,
    pub required: u32,
    pub fraction: f64,
    pub is_unlocked: bool,
}

/// A plant as the garden shows it to a particular user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GardenPlot {
    pub plant: Plant,
    /// False for premium plants when the user has no premium
    pub viewable: bool,
}

pub fn daily_summary<S: KeyValueStore, C: Clock>(engine: &ProgressionEngine<S, C>) -> DailySummary {
    let has_logged_mood = engine.has_logged_mood_today();
    let rituals_completed = engine.rituals_completed_today();
    let has_journaled = engine.has_journaled_today();

    let tasks_completed = [has_logged_mood, rituals_completed > 0, has_journaled]
        .iter()
        .filter(|done| **done)
        .count() as u8;

    let streak = engine.streak();
    DailySummary {
        date: engine.today(),
        has_logged_mood,
        rituals_completed,
        has_journaled,
        tasks_completed,
        current_xp: engine.current_xp(),
        current_streak: streak.current_streak,
        best_streak: streak.best_streak,
        streak_message: streak.motivational_message(),
        next_plant: next_plant(&engine.state().plants, engine.current_xp()),
    }
}

/// The locked plant with the lowest XP requirement
pub fn next_plant(plants: &[Plant], current_xp: u32) -> Option<NextPlant> {
    plants
        .iter()
        .filter(|plant| !plant.is_unlocked)
        .min_by_key(|plant| plant.required_xp)
        .map(|plant| NextPlant {
            name: plant.name.clone(),
            required_xp: plant.required_xp,
            xp_remaining: plant.xp_remaining(current_xp),
            progress: if plant.required_xp == 0 {
                1.0
            } else {
                (current_xp as f64 / plant.required_xp as f64).min(1.0)
            },
            is_premium: plant.is_premium,
        })
}

pub fn achievement_progress<S: KeyValueStore, C: Clock>(
    engine: &ProgressionEngine<S, C>,
) -> Vec<AchievementProgress> {
    let state = engine.state();
    state
        .achievements
        .iter()
        .map(|achievement| AchievementProgress {
            title: achievement.title.clone(),
            description: achievement.description.clone(),
            category: achievement.category.display_name(),
            current: current_progress(achievement, state),
            required: achievement.required_value,
            fraction: if achievement.is_unlocked {
                1.0
            } else {
                progress_fraction(achievement, state)
            },
            is_unlocked: achievement.is_unlocked,
        })
        .collect()
}

pub fn garden<S: KeyValueStore, C: Clock>(
    engine: &ProgressionEngine<S, C>,
    entitlement: Entitlement,
) -> Vec<GardenPlot> {
    engine
        .state()
        .plants
        .iter()
        .map(|plant| GardenPlot {
            plant: plant.clone(),
            viewable: !(plant.is_premium && entitlement.requires_upgrade(PremiumFeature::PremiumPlants)),
        })
        .collect()
}
