use crate::consts::UNKNOWN_BAND;
use crate::keys::{Metric, Skill};
use crate::reference::{Band, ReferenceTable};
use serde::{Deserialize, Serialize};

/// What a score resolves to on a ladder. `index` is `None` only for the
/// `Unknown` sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandDescriptor {
    pub name: String,
    pub description: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub anchors: Vec<String>,
    pub index: Option<usize>,
}

impl BandDescriptor {
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN_BAND.to_string(),
            description: String::new(),
            min: None,
            max: None,
            anchors: Vec::new(),
            index: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.index.is_none()
    }

    fn from_band(table: &ReferenceTable, skill: Skill, metric: Metric, bands: &[Band], idx: usize) -> Self {
        let band = &bands[idx];
        let anchors = if band.anchors.is_empty() {
            table.anchors_for(skill, metric, &band.name).to_vec()
        } else {
            band.anchors.clone()
        };
        Self {
            name: band.name.clone(),
            description: band.description.clone(),
            min: Some(band.min),
            max: Some(band.max),
            anchors,
            index: Some(idx),
        }
    }
}

/// Finds the ladder position for `value`. The value is floored first, so
/// 13.9 and 13 always share a band. Values that fall into a gap resolve to
/// the band below the gap; values under the first band resolve to band 0.
/// `bands` must be non-empty.
pub fn locate(bands: &[Band], value: f64) -> usize {
    let last = bands.len() - 1;
    let v = value.floor();

    if v.is_nan() || v < bands[0].min {
        return 0;
    }

    if let Some(idx) = bands.iter().enumerate().position(|(i, b)| {
        v >= b.min && (v <= b.max || (i == last && b.is_open_ended()))
    }) {
        return idx;
    }

    match bands.iter().position(|b| b.min > v) {
        Some(idx) => idx.saturating_sub(1),
        None => last,
    }
}

pub fn classify_with(table: &ReferenceTable, skill: &str, metric: &str, value: f64) -> BandDescriptor {
    match (Skill::from_key(skill), Metric::from_key(metric)) {
        (Some(s), Some(m)) => classify_typed(table, s, m, value),
        _ => BandDescriptor::unknown(),
    }
}

pub fn classify_typed(table: &ReferenceTable, skill: Skill, metric: Metric, value: f64) -> BandDescriptor {
    match table.bands(skill, metric) {
        Some(bands) if !bands.is_empty() => {
            let idx = locate(bands, value);
            BandDescriptor::from_band(table, skill, metric, bands, idx)
        }
        _ => BandDescriptor::unknown(),
    }
}

/// Band after `index` on the ladder, or `None` at the top (or for an
/// unknown pair).
pub fn next_band_with(
    table: &ReferenceTable,
    skill: &str,
    metric: &str,
    index: usize,
) -> Option<BandDescriptor> {
    next_band_typed(table, Skill::from_key(skill)?, Metric::from_key(metric)?, index)
}

pub fn next_band_typed(
    table: &ReferenceTable,
    skill: Skill,
    metric: Metric,
    index: usize,
) -> Option<BandDescriptor> {
    let bands = table.bands(skill, metric)?;
    let next = index.checked_add(1)?;
    (next < bands.len()).then(|| BandDescriptor::from_band(table, skill, metric, bands, next))
}

/// [`classify_with`] against the built-in table.
pub fn classify(skill: &str, metric: &str, value: f64) -> BandDescriptor {
    classify_with(ReferenceTable::builtin(), skill, metric, value)
}

/// [`next_band_with`] against the built-in table.
pub fn next_band(skill: &str, metric: &str, index: usize) -> Option<BandDescriptor> {
    next_band_with(ReferenceTable::builtin(), skill, metric, index)
}
