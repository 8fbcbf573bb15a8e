/// Daily rituals and affirmations
///
/// Neither is persisted. Both are chosen by cycling through a fixed ordered
/// catalog using the day of the year, so the same date always yields the
/// same ritual and affirmation.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use crate::domain::{DomainError, RitualCategory, RitualId};

/// A short wellness exercise offered for the day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRitual {
    pub id: RitualId,
    pub title: &'static str,
    pub description: &'static str,
    pub category: RitualCategory,
    pub is_premium: bool,
}

impl DailyRitual {
    fn new(
        slug: &str,
        title: &'static str,
        description: &'static str,
        category: RitualCategory,
        is_premium: bool,
    ) -> Self {
        Self {
            id: RitualId::new(slug),
            title,
            description,
            category,
            is_premium,
        }
    }
}

/// The fixed ritual rotation, in cycle order
pub fn ritual_catalog() -> Vec<DailyRitual> {
    vec![
        DailyRitual::new(
            "deep-breathing",
            "Deep Breathing",
            "Take 5 deep breaths to center yourself",
            RitualCategory::Breathing,
            false,
        ),
        DailyRitual::new(
            "gratitude-moment",
            "Gratitude Moment",
            "Think of three things you're grateful for",
            RitualCategory::Gratitude,
            false,
        ),
        DailyRitual::new(
            "body-stretch",
            "Body Stretch",
            "Do gentle stretches to release tension",
            RitualCategory::Movement,
            false,
        ),
        DailyRitual::new(
            "mindful-walking",
            "Mindful Walking",
            "Take a 5-minute mindful walk",
            RitualCategory::Mindfulness,
            true,
        ),
        DailyRitual::new(
            "positive-affirmation",
            "Positive Affirmation",
            "Repeat: 'I am worthy of happiness and peace'",
            RitualCategory::Affirmation,
            false,
        ),
    ]
}

pub const AFFIRMATIONS: [&str; 10] = [
    "Today I choose peace over worry.",
    "I am capable of amazing things.",
    "My mental health matters and I prioritize it.",
    "I am growing stronger every day.",
    "I deserve love, especially from myself.",
    "Today is full of possibilities.",
    "I am exactly where I need to be.",
    "My feelings are valid and temporary.",
    "I choose progress over perfection.",
    "I am worthy of happiness and joy.",
];

/// Index into a catalog of `len` items for `date` (day of year is 1-based)
fn rotation_index(date: NaiveDate, len: usize) -> usize {
    date.ordinal() as usize % len
}

/// The ritual offered on `date`
pub fn ritual_for_date(date: NaiveDate) -> DailyRitual {
    let mut catalog = ritual_catalog();
    let index = rotation_index(date, catalog.len());
    catalog.swap_remove(index)
}

/// The affirmation shown on `date`
pub fn affirmation_for_date(date: NaiveDate) -> &'static str {
    AFFIRMATIONS[rotation_index(date, AFFIRMATIONS.len())]
}

/// Look up a catalog ritual by slug
pub fn find_ritual(id: &str) -> Result<DailyRitual, DomainError> {
    ritual_catalog()
        .into_iter()
        .find(|ritual| ritual.id.as_str() == id)
        .ok_or_else(|| DomainError::UnknownRitual(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rotation_uses_day_of_year() {
        // Jan 1 is day 1 -> index 1
        assert_eq!(ritual_for_date(date(2025, 1, 1)).title, "Gratitude Moment");
        // Jan 4 is day 4 -> index 4
        assert_eq!(ritual_for_date(date(2025, 1, 4)).title, "Positive Affirmation");
        // Jan 5 is day 5 -> wraps to index 0
        assert_eq!(ritual_for_date(date(2025, 1, 5)).title, "Deep Breathing");
        // Day 3 -> premium ritual
        assert!(ritual_for_date(date(2025, 1, 3)).is_premium);
    }

    #[test]
    fn test_same_date_same_choice() {
        let d = date(2025, 6, 14);
        assert_eq!(ritual_for_date(d), ritual_for_date(d));
        assert_eq!(affirmation_for_date(d), affirmation_for_date(d));
    }

    #[test]
    fn test_affirmation_rotation() {
        assert_eq!(affirmation_for_date(date(2025, 1, 1)), AFFIRMATIONS[1]);
        assert_eq!(affirmation_for_date(date(2025, 1, 10)), AFFIRMATIONS[0]);
    }

    #[test]
    fn test_find_ritual() {
        assert!(find_ritual("mindful-walking").unwrap().is_premium);
        assert!(find_ritual("cold-shower").is_err());
    }
}
