use crate::consts::MICRO_LEVEL_SPAN;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub name: &'static str,
    pub min: f64,
}

/// Progression tiers, ascending. Minimums step by the micro-level span.
pub const TIERS: [Tier; 12] = [
    Tier { name: "Explorer", min: 0.0 },
    Tier { name: "Rally Starter", min: 3.0 },
    Tier { name: "Court Builder", min: 6.0 },
    Tier { name: "Baseline Cadet", min: 9.0 },
    Tier { name: "Club Challenger", min: 12.0 },
    Tier { name: "Match Player", min: 15.0 },
    Tier { name: "Tournament Ready", min: 18.0 },
    Tier { name: "Regional Contender", min: 21.0 },
    Tier { name: "State Competitor", min: 24.0 },
    Tier { name: "National Prospect", min: 27.0 },
    Tier { name: "Elite Junior", min: 30.0 },
    Tier { name: "Professional Track", min: 33.0 },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPlacement {
    pub name: String,
    pub min: f64,
    pub index: usize,
}

impl TierPlacement {
    fn at(index: usize) -> Self {
        let tier = TIERS[index];
        Self {
            name: tier.name.to_string(),
            min: tier.min,
            index,
        }
    }
}

/// Highest tier whose minimum the rating reaches. Ratings below every
/// minimum (and NaN) get the first tier; the top tier saturates.
pub fn tier_for(rating: f64) -> TierPlacement {
    let index = TIERS
        .iter()
        .rposition(|t| t.min <= rating)
        .unwrap_or(0);
    TierPlacement::at(index)
}

/// The tier after `index`, clamped to the last entry.
pub fn next_tier(index: usize) -> TierPlacement {
    TierPlacement::at(index.saturating_add(1).min(TIERS.len() - 1))
}

/// Position inside the current micro level, as a percentage.
pub fn level_progress(rating: f64) -> f64 {
    level_progress_with(rating, MICRO_LEVEL_SPAN)
}

/// Sawtooth progress for an arbitrary span. Independent of tier boundaries.
pub fn level_progress_with(rating: f64, micro: f64) -> f64 {
    if !rating.is_finite() || !(micro.is_finite() && micro > 0.0) {
        return 0.0;
    }
    let level_start = (rating / micro).floor() * micro;
    ((rating - level_start) / micro * 100.0).clamp(0.0, 100.0)
}

/// Micro level number (`floor(rating / span)`), used alongside the progress bar.
pub fn micro_level(rating: f64, micro: f64) -> i64 {
    if !rating.is_finite() || !(micro.is_finite() && micro > 0.0) {
        return 0;
    }
    (rating / micro).floor() as i64
}
