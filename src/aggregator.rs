use crate::consts::NON_SCORE_FIELDS;
use crate::keys::{Metric, Skill};
use crate::util::{de_tolerant_number, mean, parse_optional_number, round2};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One skill's raw inputs for one session, as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub skill_type: String,
    #[serde(default, deserialize_with = "de_tolerant_number")]
    pub c: Option<f64>,
    #[serde(default, deserialize_with = "de_tolerant_number")]
    pub p: Option<f64>,
    #[serde(default, deserialize_with = "de_tolerant_number")]
    pub a: Option<f64>,
    #[serde(default, deserialize_with = "de_tolerant_number")]
    pub s: Option<f64>,
    #[serde(default, deserialize_with = "de_tolerant_number")]
    pub t: Option<f64>,
    /// Any other columns found on the stored row (legacy score fields).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl StatRow {
    pub fn new(skill_type: &str) -> Self {
        Self {
            skill_type: skill_type.to_string(),
            ..Default::default()
        }
    }

    pub fn with_components(
        skill_type: &str,
        c: Option<f64>,
        p: Option<f64>,
        a: Option<f64>,
        s: Option<f64>,
        t: Option<f64>,
    ) -> Self {
        Self {
            skill_type: skill_type.to_string(),
            c,
            p,
            a,
            s,
            t,
            ..Default::default()
        }
    }

    pub fn skill(&self) -> Option<Skill> {
        Skill::from_key(&self.skill_type)
    }

    pub fn is_movement(&self) -> bool {
        self.skill() == Some(Skill::Movement)
    }

    pub fn component(&self, metric: Metric) -> Option<f64> {
        let raw = match metric {
            Metric::Consistency => self.c,
            Metric::Power => self.p,
            Metric::Accuracy => self.a,
            Metric::Spin => self.s,
            Metric::Technique => self.t,
            Metric::Overall => None,
        };
        raw.filter(|v| v.is_finite())
    }

    /// Present components in `c, p, a, s, t` order.
    pub fn present_components(&self) -> Vec<(Metric, f64)> {
        Metric::COMPONENTS
            .iter()
            .filter_map(|&m| self.component(m).map(|v| (m, v)))
            .collect()
    }

    /// Numeric values of non-component columns, for rows written before the
    /// five-component schema existed.
    pub fn legacy_values(&self) -> Vec<f64> {
        self.extra
            .iter()
            .filter(|(k, _)| !NON_SCORE_FIELDS.contains(&k.as_str()))
            .filter_map(|(_, v)| parse_optional_number(v))
            .collect()
    }
}

/// Per-skill score for one session row, rounded to two decimals.
/// Movement is scored by technique alone. `None` when nothing numeric exists.
pub fn session_skill_score(row: &StatRow) -> Option<f64> {
    if row.is_movement() {
        return row.component(Metric::Technique).map(round2);
    }

    let present: Vec<f64> = row.present_components().into_iter().map(|(_, v)| v).collect();
    let values = if present.is_empty() {
        row.legacy_values()
    } else {
        present
    };

    mean(&values).map(round2)
}

/// Average of the nonzero per-skill scores, rounded to two decimals.
/// A score of exactly zero counts as "no data yet", not as a zero rating.
pub fn player_composite_rating(skill_scores: &[f64]) -> f64 {
    let rated: Vec<f64> = skill_scores
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v != 0.0)
        .collect();
    mean(&rated).map(round2).unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Down,
    Flat,
    Up,
}

impl Trend {
    pub fn sign(&self) -> i8 {
        match self {
            Self::Down => -1,
            Self::Flat => 0,
            Self::Up => 1,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Down => "▼",
            Self::Flat => "–",
            Self::Up => "▲",
        }
    }
}

impl From<Trend> for i8 {
    fn from(t: Trend) -> i8 {
        t.sign()
    }
}

pub fn session_delta(current: Option<f64>, previous: Option<f64>) -> Trend {
    match (current, previous) {
        (Some(cur), Some(prev)) if cur > prev => Trend::Up,
        (Some(cur), Some(prev)) if cur < prev => Trend::Down,
        _ => Trend::Flat,
    }
}

/// A dated set of stat rows for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub player_id: String,
    pub date: NaiveDate,
    pub rows: Vec<StatRow>,
}

/// Per-skill scores for one session. Rows with unknown skills are skipped;
/// duplicate skills are averaged.
pub fn session_scores(rows: &[StatRow]) -> BTreeMap<Skill, f64> {
    let mut buckets: BTreeMap<Skill, Vec<f64>> = BTreeMap::new();
    for row in rows {
        if let (Some(skill), Some(score)) = (row.skill(), session_skill_score(row)) {
            buckets.entry(skill).or_default().push(score);
        }
    }
    average_buckets(buckets)
}

/// Sessions sorted oldest first. Ties keep their input order.
pub fn by_date(sessions: &[Session]) -> Vec<&Session> {
    let mut ordered: Vec<&Session> = sessions.iter().collect();
    ordered.sort_by_key(|s| s.date);
    ordered
}

/// Direction of change between the two most recent sessions, per skill.
pub fn skill_deltas(sessions: &[Session]) -> BTreeMap<Skill, Trend> {
    let ordered = by_date(sessions);
    let latest = ordered.last().map(|s| session_scores(&s.rows));
    let previous = ordered
        .len()
        .checked_sub(2)
        .map(|i| session_scores(&ordered[i].rows));

    Skill::all()
        .into_iter()
        .map(|skill| {
            let cur = latest.as_ref().and_then(|m| m.get(&skill).copied());
            let prev = previous.as_ref().and_then(|m| m.get(&skill).copied());
            (skill, session_delta(cur, prev))
        })
        .collect()
}

/// Historical per-skill average: every session's score for a skill goes into
/// one bucket and the bucket is averaged.
pub fn skill_averages(sessions: &[Session]) -> BTreeMap<Skill, f64> {
    let mut buckets: BTreeMap<Skill, Vec<f64>> = BTreeMap::new();
    for session in sessions {
        for (skill, score) in session_scores(&session.rows) {
            buckets.entry(skill).or_default().push(score);
        }
    }
    average_buckets(buckets)
}

/// Highest per-skill value across players; the denominator for bar displays.
pub fn skill_maxima<'a, I>(players: I) -> BTreeMap<Skill, f64>
where
    I: IntoIterator<Item = &'a BTreeMap<Skill, f64>>,
{
    let mut maxima: BTreeMap<Skill, f64> = BTreeMap::new();
    for averages in players {
        for (&skill, &value) in averages {
            let slot = maxima.entry(skill).or_insert(value);
            if value > *slot {
                *slot = value;
            }
        }
    }
    maxima
}

/// `value` as a percentage of `max`, clamped to [0, 100]. Zero when there is
/// no positive maximum.
pub fn normalize_to_max(value: f64, max: f64) -> f64 {
    if max.is_nan() || max <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    round2((value / max * 100.0).clamp(0.0, 100.0))
}

fn average_buckets(buckets: BTreeMap<Skill, Vec<f64>>) -> BTreeMap<Skill, f64> {
    buckets
        .into_iter()
        .filter_map(|(skill, values)| mean(&values).map(|m| (skill, round2(m))))
        .collect()
}
