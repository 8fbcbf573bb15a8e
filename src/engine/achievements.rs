/// Achievement evaluation
///
/// Scans the achievement catalog against the current state and unlocks every
/// achievement whose category metric has reached its threshold, adding each
/// bonus to the XP total exactly once.

use chrono::{DateTime, Utc};

use crate::domain::{Achievement, AchievementCategory};
use crate::engine::AppState;

/// Current value of the metric an achievement is measured against
pub fn current_progress(achievement: &Achievement, state: &AppState) -> u32 {
    match achievement.category {
        AchievementCategory::Moods => count(state.mood_entries.len()),
        AchievementCategory::Streaks => state.current_streak().max(state.best_streak()),
        AchievementCategory::Xp => state.current_xp,
        AchievementCategory::Journal => count(state.journal_entries.len()),
        AchievementCategory::Rituals => count(state.completed_rituals.len()),
    }
}

/// Progress toward the threshold as 0.0..=1.0
pub fn progress_fraction(achievement: &Achievement, state: &AppState) -> f64 {
    if achievement.required_value == 0 {
        return 1.0;
    }
    let current = current_progress(achievement, state) as f64;
    (current / achievement.required_value as f64).min(1.0)
}

/// Unlock every eligible achievement in one pass over the catalog
///
/// Each unlock adds its reward to `current_xp` immediately, so achievements
/// later in the catalog see XP granted by earlier ones. Nothing is re-scanned:
/// an XP achievement made eligible by an earlier entry's reward only unlocks
/// on the next evaluation. Returns the achievements unlocked by this call.
pub fn check_for_new_achievements(state: &mut AppState, now: DateTime<Utc>) -> Vec<Achievement> {
    let mut newly_unlocked = Vec::new();

    for index in 0..state.achievements.len() {
        if state.achievements[index].is_unlocked {
            continue;
        }

        let progress = current_progress(&state.achievements[index], state);
        let achievement = &mut state.achievements[index];
        if progress < achievement.required_value {
            continue;
        }

        if achievement.unlock(now) {
            let reward = achievement.xp_reward;
            newly_unlocked.push(achievement.clone());
            state.current_xp = state.current_xp.saturating_add(reward);
        }
    }

    newly_unlocked
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
