use crate::aggregator::{normalize_to_max, skill_maxima, Session};
use crate::keys::Skill;
use crate::reference::ReferenceTable;
use crate::store::Player;
use crate::summary::{summarize_player, PlayerSummary};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A player and every session they have, in any order.
#[derive(Debug, Clone)]
pub struct PlayerHistory {
    pub player: Player,
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub summary: PlayerSummary,
    /// Historical average per skill as a percentage of the best player's.
    pub bars: BTreeMap<Skill, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    pub maxima: BTreeMap<Skill, f64>,
}

impl Leaderboard {
    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }
}

/// Ranks players by composite rating, highest first; ties break on name then
/// id. Summaries are independent, so they are computed in parallel.
pub fn build_leaderboard(
    table: &ReferenceTable,
    histories: &[PlayerHistory],
    micro: f64,
) -> Leaderboard {
    let mut summaries: Vec<PlayerSummary> = histories
        .par_iter()
        .map(|h| summarize_player(table, &h.player, &h.sessions, micro))
        .collect();

    summaries.sort_by(|a, b| {
        b.composite
            .partial_cmp(&a.composite)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.player.name.cmp(&b.player.name))
            .then_with(|| a.player.id.cmp(&b.player.id))
    });

    let maxima = skill_maxima(summaries.iter().map(|s| &s.averages));

    let entries = summaries
        .into_iter()
        .enumerate()
        .map(|(i, summary)| {
            let bars = Skill::all()
                .into_iter()
                .map(|skill| {
                    let value = summary.averages.get(&skill).copied().unwrap_or(0.0);
                    let max = maxima.get(&skill).copied().unwrap_or(0.0);
                    (skill, normalize_to_max(value, max))
                })
                .collect();
            LeaderboardEntry {
                rank: i + 1,
                summary,
                bars,
            }
        })
        .collect();

    Leaderboard { entries, maxima }
}
