use crate::aggregator::{
    by_date, player_composite_rating, session_delta, session_scores, skill_averages, Session,
    Trend,
};
use crate::classifier::{classify_typed, next_band_typed, BandDescriptor};
use crate::keys::{Metric, Skill};
use crate::reference::ReferenceTable;
use crate::store::Player;
use crate::tiers::{level_progress_with, micro_level, next_tier, tier_for, TierPlacement};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillLine {
    pub skill: Skill,
    pub latest: Option<f64>,
    pub previous: Option<f64>,
    pub trend: Trend,
    pub average: Option<f64>,
    pub band: BandDescriptor,
    pub next_band: Option<BandDescriptor>,
}

/// Everything a player card shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player: Player,
    pub sessions: usize,
    pub latest_date: Option<NaiveDate>,
    pub skills: Vec<SkillLine>,
    pub composite: f64,
    pub tier: TierPlacement,
    pub next_tier: TierPlacement,
    pub micro_level: i64,
    pub level_progress: f64,
    pub averages: BTreeMap<Skill, f64>,
}

impl PlayerSummary {
    pub fn skill(&self, skill: Skill) -> Option<&SkillLine> {
        self.skills.iter().find(|l| l.skill == skill)
    }
}

/// Builds the card from a player's full history. The composite rating uses
/// the latest session only; averages span every session. Skills missing
/// from the latest session count as zero (no data) in the composite.
pub fn summarize_player(
    table: &ReferenceTable,
    player: &Player,
    sessions: &[Session],
    micro: f64,
) -> PlayerSummary {
    let ordered = by_date(sessions);
    let latest = ordered
        .last()
        .map(|s| session_scores(&s.rows))
        .unwrap_or_default();
    let previous = ordered
        .len()
        .checked_sub(2)
        .map(|i| session_scores(&ordered[i].rows))
        .unwrap_or_default();
    let averages = skill_averages(sessions);

    let skills: Vec<SkillLine> = Skill::all()
        .into_iter()
        .map(|skill| {
            let cur = latest.get(&skill).copied();
            let prev = previous.get(&skill).copied();
            let band = classify_typed(table, skill, Metric::Overall, cur.unwrap_or(0.0));
            let next_band = band
                .index
                .and_then(|idx| next_band_typed(table, skill, Metric::Overall, idx));
            SkillLine {
                skill,
                latest: cur,
                previous: prev,
                trend: session_delta(cur, prev),
                average: averages.get(&skill).copied(),
                band,
                next_band,
            }
        })
        .collect();

    let scores: Vec<f64> = skills.iter().map(|l| l.latest.unwrap_or(0.0)).collect();
    let composite = player_composite_rating(&scores);
    let tier = tier_for(composite);
    let next = next_tier(tier.index);

    PlayerSummary {
        player: player.clone(),
        sessions: sessions.len(),
        latest_date: ordered.last().map(|s| s.date),
        skills,
        composite,
        tier,
        next_tier: next,
        micro_level: micro_level(composite, micro),
        level_progress: level_progress_with(composite, micro),
        averages,
    }
}
