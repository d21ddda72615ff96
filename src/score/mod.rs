//! Score classification.
//!
//! Maps a 0–100 healthiness score to one of three tiers and the presentation
//! tokens every view uses to render it. The same thresholds apply to product
//! scores and ingredient scores.

use serde::{Deserialize, Serialize};

/// Lowest score in the healthy tier.
pub const HEALTHY_THRESHOLD: u8 = 70;
/// Lowest score in the neutral tier.
pub const NEUTRAL_THRESHOLD: u8 = 40;

/// Health tier of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTier {
    /// 70..=100
    Healthy,
    /// 40..=69
    Neutral,
    /// 0..=39
    Harmful,
}

impl HealthTier {
    /// Tier of a score. Values above 100 land in `Healthy`.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= HEALTHY_THRESHOLD {
            Self::Healthy
        } else if score >= NEUTRAL_THRESHOLD {
            Self::Neutral
        } else {
            Self::Harmful
        }
    }

    /// One-line verdict shown under a product score.
    #[must_use]
    pub const fn verdict(self) -> &'static str {
        match self {
            Self::Healthy => "✅ Полезный продукт",
            Self::Neutral => "⚠️ Умеренно вредный",
            Self::Harmful => "❌ Вредный продукт",
        }
    }

    /// Short tier name, matching the ingredient category vocabulary.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Neutral => "neutral",
            Self::Harmful => "harmful",
        }
    }

    /// Presentation tokens for this tier.
    #[must_use]
    pub const fn class(self) -> ScoreClass {
        match self {
            Self::Healthy => ScoreClass {
                tier: self,
                foreground: "text-green-500",
                background: "from-green-500/20 to-green-500/5",
                border: "border-green-500/50",
            },
            Self::Neutral => ScoreClass {
                tier: self,
                foreground: "text-orange-500",
                background: "from-orange-500/20 to-orange-500/5",
                border: "border-orange-500/50",
            },
            Self::Harmful => ScoreClass {
                tier: self,
                foreground: "text-red-500",
                background: "from-red-500/20 to-red-500/5",
                border: "border-red-500/50",
            },
        }
    }
}

/// A classified score: its tier plus color tokens consistent with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreClass {
    pub tier: HealthTier,
    /// Text color token
    pub foreground: &'static str,
    /// Background gradient token
    pub background: &'static str,
    /// Border color token
    pub border: &'static str,
}

/// Classify a score.
#[must_use]
pub const fn classify(score: u8) -> ScoreClass {
    HealthTier::from_score(score).class()
}

/// Fraction of the score ring to fill, in `[0, 1]`.
#[must_use]
pub fn progress_ratio(score: u8) -> f64 {
    f64::from(score.min(100)) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(0).tier, HealthTier::Harmful);
        assert_eq!(classify(39).tier, HealthTier::Harmful);
        assert_eq!(classify(40).tier, HealthTier::Neutral);
        assert_eq!(classify(69).tier, HealthTier::Neutral);
        assert_eq!(classify(70).tier, HealthTier::Healthy);
        assert_eq!(classify(100).tier, HealthTier::Healthy);
        assert_eq!(classify(u8::MAX).tier, HealthTier::Healthy);
    }

    #[test]
    fn test_tokens_follow_tier() {
        let healthy = classify(87);
        assert_eq!(healthy.foreground, "text-green-500");
        assert_eq!(healthy.border, "border-green-500/50");

        let neutral = classify(42);
        assert_eq!(neutral.background, "from-orange-500/20 to-orange-500/5");

        let harmful = classify(15);
        assert_eq!(harmful.foreground, "text-red-500");
    }

    #[test]
    fn test_verdicts() {
        assert_eq!(HealthTier::from_score(75).verdict(), "✅ Полезный продукт");
        assert_eq!(HealthTier::from_score(50).verdict(), "⚠️ Умеренно вредный");
        assert_eq!(HealthTier::from_score(10).verdict(), "❌ Вредный продукт");
    }

    #[test]
    fn test_progress_ratio() {
        assert!((progress_ratio(100) - 1.0).abs() < f64::EPSILON);
        assert!((progress_ratio(50) - 0.5).abs() < 1e-9);
        assert!((progress_ratio(200) - 1.0).abs() < f64::EPSILON);
    }
}
