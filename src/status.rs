//! Devotion score classification.
//!
//! Scores map onto four status tiers through an ordered threshold table.
//! The first tier whose upper bound is strictly greater than the score wins;
//! anything past the last bound (or NaN) lands in the last tier.

use serde::{Deserialize, Serialize};

/// Colour family used to style a status badge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StyleTier {
    Emerald,
    Purple,
    Rose,
    Amber,
}

impl StyleTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emerald => "emerald",
            Self::Purple => "purple",
            Self::Rose => "rose",
            Self::Amber => "amber",
        }
    }
}

/// The label and style a score classifies into.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DevotionStatus {
    /// Exclusive upper bound of this tier.
    pub threshold: i64,
    pub label: &'static str,
    pub tier: StyleTier,
}

/// Tier table, ordered by ascending threshold.
pub const DEVOTION_STATUSES: [DevotionStatus; 4] = [
    DevotionStatus {
        threshold: 30,
        label: "Casual admirer",
        tier: StyleTier::Emerald,
    },
    DevotionStatus {
        threshold: 60,
        label: "Certified simp",
        tier: StyleTier::Purple,
    },
    DevotionStatus {
        threshold: 85,
        label: "S-tier stan",
        tier: StyleTier::Rose,
    },
    DevotionStatus {
        threshold: 101,
        label: "Cosmic devotion",
        tier: StyleTier::Amber,
    },
];

/// Classify a score. Total over every `f64`, NaN included.
pub fn classify(score: f64) -> DevotionStatus {
    DEVOTION_STATUSES
        .iter()
        .find(|status| score < status.threshold as f64)
        .copied()
        .unwrap_or(DEVOTION_STATUSES[DEVOTION_STATUSES.len() - 1])
}
