/// User profile stored alongside progress
///
/// The engine never interprets these fields; it only persists them and hands
/// them back to the presentation layer.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveTime, Utc};

/// Color stored as sRGB channels in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbaColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl RgbaColor {
    pub const BLUE: RgbaColor = RgbaColor { red: 0.0, green: 0.478, blue: 1.0, alpha: 1.0 };

    /// Build a color, clamping each channel into range
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red: red.clamp(0.0, 1.0),
            green: green.clamp(0.0, 1.0),
            blue: blue.clamp(0.0, 1.0),
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    /// Icon name of the chosen avatar
    pub avatar: String,
    pub join_date: DateTime<Utc>,
    pub favorite_color: RgbaColor,
    pub notifications_enabled: bool,
    /// Time of day for the daily reminder
    pub reminder_time: NaiveTime,
}

impl UserProfile {
    pub fn new(join_date: DateTime<Utc>) -> Self {
        Self {
            name: String::new(),
            avatar: "person.circle.fill".to_string(),
            join_date,
            favorite_color: RgbaColor::BLUE,
            notifications_enabled: true,
            reminder_time: default_reminder_time(),
        }
    }

    /// Name to greet the user with
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Friend"
        } else {
            &self.name
        }
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

fn default_reminder_time() -> NaiveTime {
    NaiveTime::from_hms_opt(19, 0, 0).unwrap_or(NaiveTime::MIN)
}
