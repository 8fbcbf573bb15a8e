/// Premium entitlement boundary
///
/// Subscription status is owned by an external collaborator. The core only
/// reads a boolean at decision points and never mutates it.

use async_trait::async_trait;
use serde::Serialize;

/// Snapshot of the user's subscription status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Entitlement {
    pub is_premium: bool,
}

impl Entitlement {
    pub const FREE: Entitlement = Entitlement { is_premium: false };
    pub const PREMIUM: Entitlement = Entitlement { is_premium: true };

    /// True when the user would have to upgrade to use `feature`
    pub fn requires_upgrade(&self, _feature: PremiumFeature) -> bool {
        !self.is_premium
    }
}

/// Content and features that sit behind the subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumFeature {
    JournalTags,
    PremiumRituals,
    PremiumPlants,
    PremiumThemes,
}

impl PremiumFeature {
    pub fn title(&self) -> &'static str {
        match self {
            PremiumFeature::JournalTags => "Journal Tags",
            PremiumFeature::PremiumRituals => "Premium Rituals",
            PremiumFeature::PremiumPlants => "Rare Plants",
            PremiumFeature::PremiumThemes => "Garden Themes",
        }
    }
}

/// Where the current entitlement comes from
///
/// Implementations may refresh from a storefront; callers read the result at
/// decision points and never block engine mutations on it.
#[async_trait]
pub trait EntitlementSource: Send + Sync {
    async fn current(&self) -> Entitlement;
}

/// Entitlement fixed at startup (e.g. from a command line flag)
#[derive(Debug, Clone, Copy)]
pub struct StaticEntitlement(pub Entitlement);

#[async_trait]
impl EntitlementSource for StaticEntitlement {
    async fn current(&self) -> Entitlement {
        self.0
    }
}
