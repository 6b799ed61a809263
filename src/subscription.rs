//! Subscription tiers and feature gating.
//!
//! Centralizes tier comparison so UI code never hardcodes thresholds. The
//! gate is stateless: tier changes arrive from the billing provider as a new
//! raw string and every call re-evaluates from scratch.
//!
//! Policy is fail-open: a feature key nobody registered is unrestricted by
//! design, and an unrecognized provider string resolves to the most
//! restrictive tier rather than accidentally granting access.

use serde::{Deserialize, Serialize};

/// Subscription level, ordered from least to most privileged.
///
/// The derived `Ord` is the access order: a tier grants everything every
/// lower tier grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    None,
    Basic,
    Standard,
    Premium,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::None => "none",
            SubscriptionTier::Basic => "basic",
            SubscriptionTier::Standard => "standard",
            SubscriptionTier::Premium => "premium",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "none" => Some(SubscriptionTier::None),
            "basic" => Some(SubscriptionTier::Basic),
            "standard" => Some(SubscriptionTier::Standard),
            "premium" => Some(SubscriptionTier::Premium),
            _ => None,
        }
    }

    /// Resolve a raw subscription string from the billing provider.
    ///
    /// Anything unrecognized (or absent) maps to [`SubscriptionTier::None`],
    /// never upward: an unexpected provider string must not grant access.
    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.and_then(|s| Self::from_str(s.trim().to_lowercase().as_str()))
            .unwrap_or(SubscriptionTier::None)
    }
}

/// A gated product feature and the tier it requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub key: &'static str,
    pub name: &'static str,
    pub required_tier: SubscriptionTier,
}

/// Every tier-gated feature in the product. Features absent from this table
/// are unrestricted.
pub const FEATURES: &[Feature] = &[
    Feature {
        key: "document_export",
        name: "Document export",
        required_tier: SubscriptionTier::Basic,
    },
    Feature {
        key: "bulk_upload",
        name: "Bulk photo upload",
        required_tier: SubscriptionTier::Standard,
    },
    Feature {
        key: "shared_vaults",
        name: "Shared vaults",
        required_tier: SubscriptionTier::Standard,
    },
    Feature {
        key: "ai_analysis",
        name: "AI damage analysis",
        required_tier: SubscriptionTier::Premium,
    },
    Feature {
        key: "advanced_reports",
        name: "Advanced reports",
        required_tier: SubscriptionTier::Premium,
    },
    Feature {
        key: "priority_support",
        name: "Priority support",
        required_tier: SubscriptionTier::Premium,
    },
];

/// Look up a feature in the registry.
pub fn find_feature(key: &str) -> Option<&'static Feature> {
    FEATURES.iter().find(|f| f.key == key)
}

/// True iff `current` ranks at or above `required`.
pub fn has_feature_access(current: SubscriptionTier, required: SubscriptionTier) -> bool {
    current >= required
}

/// Outcome of a feature-gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureAccess {
    pub has_access: bool,
    /// The registry entry, or `None` for an unregistered (unrestricted) key.
    pub feature: Option<&'static Feature>,
}

/// Decide access to a feature for the given tier.
pub fn check_feature_access(feature_key: &str, current: SubscriptionTier) -> FeatureAccess {
    match find_feature(feature_key) {
        Some(feature) => FeatureAccess {
            has_access: has_feature_access(current, feature.required_tier),
            feature: Some(feature),
        },
        None => FeatureAccess {
            has_access: true,
            feature: None,
        },
    }
}
