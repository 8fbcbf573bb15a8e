/// Achievement definitions
///
/// Achievements are named milestones with a category, a numeric threshold and
/// a one-time XP bonus. The catalog order matters: the evaluator scans it in
/// order during a single pass.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::AchievementCategory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    /// Stable catalog slug (e.g. "first-steps")
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon_name: String,
    pub category: AchievementCategory,
    /// Threshold the category metric must reach
    pub required_value: u32,
    /// Bonus XP awarded once on unlock
    pub xp_reward: u32,
    pub is_unlocked: bool,
    /// Set exactly once, when the achievement unlocks
    pub unlocked_date: Option<DateTime<Utc>>,
}

impl Achievement {
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        icon_name: &str,
        category: AchievementCategory,
        required_value: u32,
        xp_reward: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon_name: icon_name.to_string(),
            category,
            required_value,
            xp_reward,
            is_unlocked: false,
            unlocked_date: None,
        }
    }

    /// Mark as unlocked at `now`
    ///
    /// Returns false (and leaves the record untouched) if already unlocked.
    pub fn unlock(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_unlocked {
            return false;
        }
        self.is_unlocked = true;
        self.unlocked_date = Some(now);
        true
    }
}

/// The fixed achievement catalog in evaluation order
pub fn default_achievements() -> Vec<Achievement> {
    use AchievementCategory::*;

    vec![
        Achievement::new("first-steps", "First Steps", "Log your first mood", "star.fill", Moods, 1, 10),
        Achievement::new("consistency", "Consistency", "5-day mood logging streak", "flame.fill", Streaks, 5, 25),
        Achievement::new("dedication", "Dedication", "10-day mood logging streak", "flame.fill", Streaks, 10, 50),
        Achievement::new("champion", "Champion", "30-day mood logging streak", "crown.fill", Streaks, 30, 100),
        Achievement::new("xp-novice", "XP Novice", "Earn 100 XP", "bolt.fill", Xp, 100, 20),
        Achievement::new("xp-expert", "XP Expert", "Earn 500 XP", "bolt.fill", Xp, 500, 50),
        Achievement::new("xp-master", "XP Master", "Earn 1000 XP", "bolt.fill", Xp, 1000, 100),
        Achievement::new("reflective-soul", "Reflective Soul", "Write 10 journal entries", "book.fill", Journal, 10, 30),
        Achievement::new("ritual-beginner", "Ritual Beginner", "Complete 5 daily rituals", "sparkles", Rituals, 5, 25),
    ]
}
