/// Tools for updating the profile and garden settings
///
/// This module implements the profile_update, onboarding_complete and
/// theme_set MCP tools. Profile fields left out of the request keep their
/// current values.

use chrono::NaiveTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Entitlement, GardenTheme, RgbaColor};
use crate::engine::{Clock, ProgressionEngine};
use crate::storage::KeyValueStore;
use crate::tools::ToolError;

/// Parameters for updating the profile
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct UpdateProfileParams {
    pub name: Option<String>,
    /// Icon name of the avatar
    pub avatar: Option<String>,
    /// Favorite color as [red, green, blue] or [red, green, blue, alpha], each 0.0-1.0
    pub favorite_color: Option<Vec<f64>>,
    pub notifications_enabled: Option<bool>,
    /// Reminder time as HH:MM (24h)
    pub reminder_time: Option<String>,
}

/// Response from a settings update
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub success: bool,
    pub message: String,
}

pub fn update_profile<S: KeyValueStore, C: Clock>(
    engine: &mut ProgressionEngine<S, C>,
    params: UpdateProfileParams,
) -> Result<UpdateResponse, ToolError> {
    let mut profile = engine.state().user_profile.clone();
    let mut changed = Vec::new();

    if let Some(name) = params.name {
        let name = name.trim();
        if name.chars().count() > 50 {
            return Err(ToolError::Validation(
                "Name too long (max 50 characters)".to_string(),
            ));
        }
        profile.name = name.to_string();
        changed.push("name");
    }

    if let Some(avatar) = params.avatar {
        let avatar = avatar.trim();
        if avatar.is_empty() {
            return Err(ToolError::Validation("Avatar cannot be empty".to_string()));
        }
        profile.avatar = avatar.to_string();
        changed.push("avatar");
    }

    if let Some(channels) = params.favorite_color {
        profile.favorite_color = parse_color(&channels)?;
        changed.push("favorite color");
    }

    if let Some(enabled) = params.notifications_enabled {
        profile.notifications_enabled = enabled;
        changed.push("notifications");
    }

    if let Some(time) = params.reminder_time {
        profile.reminder_time = parse_reminder_time(&time)?;
        changed.push("reminder time");
    }

    if changed.is_empty() {
        return Ok(UpdateResponse {
            success: true,
            message: "Nothing to update".to_string(),
        });
    }

    engine.update_profile(profile);

    Ok(UpdateResponse {
        success: true,
        message: format!("✅ Updated {}", changed.join(", ")),
    })
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct OnboardingParams {
    /// Name to greet the user with (blank means "Friend")
    #[serde(default)]
    pub name: String,
}

pub fn complete_onboarding<S: KeyValueStore, C: Clock>(
    engine: &mut ProgressionEngine<S, C>,
    params: OnboardingParams,
) -> Result<UpdateResponse, ToolError> {
    engine.complete_onboarding(&params.name);

    Ok(UpdateResponse {
        success: true,
        message: format!(
            "🌱 Welcome, {}! Your garden is ready.",
            engine.state().user_profile.display_name()
        ),
    })
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ThemeParams {
    /// One of: spring, summer, autumn, winter, tropical, zen
    pub theme: String,
}

pub fn set_theme<S: KeyValueStore, C: Clock>(
    engine: &mut ProgressionEngine<S, C>,
    entitlement: Entitlement,
    params: ThemeParams,
) -> Result<UpdateResponse, ToolError> {
    let theme: GardenTheme = params.theme.parse()?;
    engine.set_garden_theme(theme, entitlement)?;

    Ok(UpdateResponse {
        success: true,
        message: format!("🎨 Garden theme set to {}", theme.display_name()),
    })
}

fn parse_color(channels: &[f64]) -> Result<RgbaColor, ToolError> {
    match channels {
        [r, g, b] => Ok(RgbaColor::new(*r, *g, *b, 1.0)),
        [r, g, b, a] => Ok(RgbaColor::new(*r, *g, *b, *a)),
        _ => Err(ToolError::InvalidArguments(
            "favorite_color needs 3 or 4 channels".to_string(),
        )),
    }
}

fn parse_reminder_time(time: &str) -> Result<NaiveTime, ToolError> {
    NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|_| {
        ToolError::InvalidArguments(format!(
            "Invalid reminder time '{}'. Use HH:MM",
            time
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineError, ManualClock};
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn engine() -> ProgressionEngine<MemoryStore, ManualClock> {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 4, 2, 12, 0, 0).unwrap());
        ProgressionEngine::load(MemoryStore::new(), clock)
    }

    #[test]
    fn test_partial_profile_update() {
        let mut engine = engine();
        let before = engine.state().user_profile.clone();

        let params = UpdateProfileParams {
            name: Some("  Alex ".to_string()),
            reminder_time: Some("07:30".to_string()),
            favorite_color: Some(vec![1.5, 0.2, 0.3]),
            ..Default::default()
        };
        let response = update_profile(&mut engine, params).unwrap();
        assert!(response.message.contains("name"));

        let profile = &engine.state().user_profile;
        assert_eq!(profile.name, "Alex");
        assert_eq!(profile.reminder_time, NaiveTime::from_hms_opt(7, 30, 0).unwrap());
        assert_eq!(profile.favorite_color.red, 1.0);
        assert_eq!(profile.avatar, before.avatar);
        assert_eq!(profile.notifications_enabled, before.notifications_enabled);
    }

    #[test]
    fn test_bad_reminder_time_leaves_profile_alone() {
        let mut engine = engine();
        let params = UpdateProfileParams {
            name: Some("Alex".to_string()),
            reminder_time: Some("7pm".to_string()),
            ..Default::default()
        };

        assert!(matches!(update_profile(&mut engine, params), Err(ToolError::InvalidArguments(_))));
        assert_eq!(engine.state().user_profile.name, "");
    }

    #[test]
    fn test_name_limit_counts_characters() {
        let mut engine = engine();

        let fits = UpdateProfileParams { name: Some("ä".repeat(50)), ..Default::default() };
        update_profile(&mut engine, fits).unwrap();
        assert_eq!(engine.state().user_profile.name, "ä".repeat(50));

        let too_long = UpdateProfileParams { name: Some("ä".repeat(51)), ..Default::default() };
        assert!(matches!(update_profile(&mut engine, too_long), Err(ToolError::Validation(_))));
        assert_eq!(engine.state().user_profile.name, "ä".repeat(50));
    }

    #[test]
    fn test_onboarding_defaults_name() {
        let mut engine = engine();
        let response = complete_onboarding(&mut engine, OnboardingParams::default()).unwrap();

        assert!(engine.state().has_completed_onboarding);
        assert!(response.message.contains("Friend"));
    }

    #[test]
    fn test_theme_gating() {
        let mut engine = engine();

        let zen = || ThemeParams { theme: "zen".to_string() };
        assert!(matches!(
            set_theme(&mut engine, Entitlement::FREE, zen()),
            Err(ToolError::Engine(EngineError::PremiumRequired(_)))
        ));
        assert_eq!(engine.state().garden_theme, GardenTheme::Spring);

        set_theme(&mut engine, Entitlement::PREMIUM, zen()).unwrap();
        assert_eq!(engine.state().garden_theme, GardenTheme::Zen);

        let unknown = ThemeParams { theme: "neon".to_string() };
        assert!(matches!(set_theme(&mut engine, Entitlement::PREMIUM, unknown), Err(ToolError::Domain(_))));
    }
}
