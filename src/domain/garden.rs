/// Garden plants and themes
///
/// Plants are the cosmetic rewards unlocked by XP. The catalog is fixed and
/// seeded once on first run; after that the only mutation a plant ever sees is
/// the single locked -> unlocked transition.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::DomainError;

/// A plant that can grow in the user's garden
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    /// Stable catalog slug (e.g. "sunflower")
    pub id: String,
    /// Display name
    pub name: String,
    /// Asset name used by the presentation layer
    pub image_name: String,
    /// XP needed before the plant unlocks
    pub required_xp: u32,
    /// Premium plants still unlock by XP but are only viewable with premium
    pub is_premium: bool,
    /// Whether the plant has been unlocked (never reverts)
    pub is_unlocked: bool,
    /// When the plant unlocked; None for plants unlocked at creation
    pub planted_date: Option<DateTime<Utc>>,
}

impl Plant {
    /// Create a catalog plant
    ///
    /// A plant with no XP requirement starts unlocked.
    pub fn new(id: &str, name: &str, image_name: &str, required_xp: u32, is_premium: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            image_name: image_name.to_string(),
            required_xp,
            is_premium,
            is_unlocked: required_xp == 0,
            planted_date: None,
        }
    }

    /// Unlock the plant if `current_xp` meets its requirement
    ///
    /// Returns true only on the call that performs the transition.
    pub fn try_unlock(&mut self, current_xp: u32, now: DateTime<Utc>) -> bool {
        if self.is_unlocked || current_xp < self.required_xp {
            return false;
        }
        self.is_unlocked = true;
        self.planted_date = Some(now);
        true
    }

    /// XP still missing before this plant unlocks
    pub fn xp_remaining(&self, current_xp: u32) -> u32 {
        self.required_xp.saturating_sub(current_xp)
    }
}

/// The fixed plant catalog, ordered by XP requirement
pub fn default_plants() -> Vec<Plant> {
    vec![
        Plant::new("seedling", "Seedling", "plant.seedling", 0, false),
        Plant::new("daisy", "Daisy", "plant.daisy", 50, false),
        Plant::new("sunflower", "Sunflower", "plant.sunflower", 100, false),
        Plant::new("rose", "Rose", "plant.rose", 200, false),
        Plant::new("tree", "Tree", "plant.tree", 300, false),
        Plant::new("cherry-blossom", "Cherry Blossom", "plant.cherry", 500, true),
        Plant::new("lotus", "Lotus", "plant.lotus", 750, true),
    ]
}

/// Visual theme of the garden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GardenTheme {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
    Tropical,
    Zen,
}

impl GardenTheme {
    pub const ALL: [GardenTheme; 6] = [
        GardenTheme::Spring,
        GardenTheme::Summer,
        GardenTheme::Autumn,
        GardenTheme::Winter,
        GardenTheme::Tropical,
        GardenTheme::Zen,
    ];

    /// Only the spring theme is free
    pub fn is_premium(&self) -> bool {
        !matches!(self, GardenTheme::Spring)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GardenTheme::Spring => "Spring",
            GardenTheme::Summer => "Summer",
            GardenTheme::Autumn => "Autumn",
            GardenTheme::Winter => "Winter",
            GardenTheme::Tropical => "Tropical",
            GardenTheme::Zen => "Zen",
        }
    }
}

impl FromStr for GardenTheme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GardenTheme::ALL
            .iter()
            .copied()
            .find(|theme| theme.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownTheme(s.to_string()))
    }
}
