/// Mood logging streak tracking
///
/// This module defines the Streak struct that holds the user's current and
/// best mood streaks, and the calendar-day rules for extending, resetting and
/// decaying them. Day boundaries come from a `Calendar`, which maps each
/// instant to its own local date, so a daylight-saving change between two
/// logs does not shift either of them.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};

/// Current and best streak of consecutive days with a mood log
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Streak {
    /// Consecutive calendar days ending at the last log
    pub current_streak: u32,
    /// Best streak ever achieved
    pub best_streak: u32,
    /// When a mood was last logged (None if never)
    pub last_mood_log_date: Option<DateTime<Utc>>,
}

/// What a mood log did to the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// First ever log
    Started,
    /// Logged the day after the previous log
    Extended,
    /// Logged again on the same day (or the clock moved backwards)
    Unchanged,
    /// More than one day since the previous log
    Reset,
}

/// Maps instants to dates in the user's calendar
pub trait Calendar {
    /// Local calendar date of `at`
    fn local_date(&self, at: DateTime<Utc>) -> NaiveDate;

    /// Whole calendar days from `earlier` to `later`
    fn days_between(&self, earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
        (self.local_date(later) - self.local_date(earlier)).num_days()
    }
}

/// A zone without daylight saving
impl Calendar for FixedOffset {
    fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(self).date_naive()
    }
}

/// The machine's zone, with the offset in force at each instant
impl Calendar for Local {
    fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(self).date_naive()
    }
}

impl Streak {
    /// Create a streak from existing data (used when loading persisted state)
    pub fn from_existing(
        current_streak: u32,
        best_streak: u32,
        last_mood_log_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            current_streak,
            best_streak,
            last_mood_log_date,
        }
    }

    /// Apply a mood log made at `now`
    ///
    /// Afterwards `best_streak >= current_streak` always holds.
    pub fn record_log(&mut self, now: DateTime<Utc>, calendar: &impl Calendar) -> StreakChange {
        let change = match self.last_mood_log_date {
            None => {
                self.current_streak = 1;
                StreakChange::Started
            }
            Some(last_log) => match calendar.days_between(last_log, now) {
                1 => {
                    self.current_streak += 1;
                    StreakChange::Extended
                }
                days if days > 1 => {
                    self.current_streak = 1;
                    StreakChange::Reset
                }
                _ => StreakChange::Unchanged,
            },
        };

        if self.current_streak > self.best_streak {
            self.best_streak = self.current_streak;
        }
        self.last_mood_log_date = Some(now);

        change
    }

    /// Zero the current streak if more than a day passed since the last log
    ///
    /// Run when the app loads; there is no background decay. The best streak
    /// is left alone. Returns true if the streak was cleared.
    pub fn decay_if_idle(&mut self, now: DateTime<Utc>, calendar: &impl Calendar) -> bool {
        let Some(last_log) = self.last_mood_log_date else {
            return false;
        };

        if calendar.days_between(last_log, now) > 1 && self.current_streak != 0 {
            self.current_streak = 0;
            return true;
        }
        false
    }

    /// Whether a mood has already been logged on the calendar day of `now`
    pub fn has_logged_on(&self, now: DateTime<Utc>, calendar: &impl Calendar) -> bool {
        self.last_mood_log_date
            .map(|last| calendar.local_date(last) == calendar.local_date(now))
            .unwrap_or(false)
    }

    /// On track if the last log was today or yesterday
    pub fn is_on_track(&self, now: DateTime<Utc>, calendar: &impl Calendar) -> bool {
        match self.last_mood_log_date {
            None => false,
            Some(last) => calendar.days_between(last, now) <= 1,
        }
    }

    /// Get a motivational message based on current streak status
    pub fn motivational_message(&self) -> String {
        match self.current_streak {
            0 => "Ready to start your streak! Log today's mood to plant the first seed.".to_string(),
            1 => "Great start! One day down, keep the momentum going.".to_string(),
            2..=6 => format!("Nice work! {} days in a row. Your garden is taking root.", self.current_streak),
            7..=13 => format!("Excellent! {} days strong. You're in the groove now!", self.current_streak),
            14..=29 => format!("Amazing! {} days straight. Checking in is becoming second nature.", self.current_streak),
            30..=99 => format!("Incredible! {} days of consistency. Your garden is in full bloom!", self.current_streak),
            _ => format!("Legendary! {} days of unwavering care. You're an inspiration!", self.current_streak),
        }
    }
}
