use crate::aggregator::{session_skill_score, StatRow};
use crate::classifier::classify_typed;
use crate::consts::{DEFAULT_TRIGGERED_BY, UNKNOWN_BAND};
use crate::error::{SfResult, SkillForgeError};
use crate::keys::{Metric, Skill};
use crate::reference::ReferenceTable;
use crate::store::{
    Mode, RatingStore, RecalibrationDetails, RecalibrationRecord, StoredStatRow,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct RecalibrationRequest {
    pub player_id: String,
    /// Raw mode string; validated by the job.
    pub mode: String,
    pub triggered_by: Option<String>,
    pub notes: Option<String>,
}

impl RecalibrationRequest {
    pub fn new(player_id: &str, mode: &str) -> Self {
        Self {
            player_id: player_id.to_string(),
            mode: mode.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecalibrationOutcome {
    pub player_id: String,
    pub mode: Mode,
    pub created: usize,
    pub details: Option<RecalibrationDetails>,
}

/// Column that drives the band label for a row: `t` for movement; otherwise
/// `c` if present, else the first present of `p, a, s, t`. Rows with no
/// components fall back to the overall ladder.
pub fn primary_metric(row: &StatRow) -> Metric {
    if row.is_movement() {
        return Metric::Technique;
    }
    row.present_components()
        .first()
        .map(|&(metric, _)| metric)
        .unwrap_or(Metric::Overall)
}

/// Derived copy of one raw row.
pub fn derive_row(
    table: &ReferenceTable,
    row: &StatRow,
    mode: Mode,
    now: DateTime<Utc>,
) -> StoredStatRow {
    let normalized = session_skill_score(row);
    let band = match row.skill() {
        Some(skill) => label_for(table, skill, primary_metric(row), normalized),
        None => UNKNOWN_BAND.to_string(),
    };

    StoredStatRow {
        row: StatRow {
            id: None,
            ..row.clone()
        },
        normalized_value: normalized,
        normalized_band: Some(band),
        is_test: mode.is_test(),
        created_at: Some(now),
    }
}

fn label_for(table: &ReferenceTable, skill: Skill, metric: Metric, normalized: Option<f64>) -> String {
    let value = normalized.map(f64::round).unwrap_or(0.0);
    classify_typed(table, skill, metric, value).name
}

/// Recomputes normalized values and band labels for the player's earliest
/// session in the selected namespace. Inserts one derived row per raw row,
/// then one audit record. Storage errors abort the job as-is; rows already
/// inserted are left in place.
pub fn recalibrate<S: RatingStore + ?Sized>(
    store: &S,
    table: &ReferenceTable,
    request: &RecalibrationRequest,
) -> SfResult<RecalibrationOutcome> {
    let mode = Mode::parse(&request.mode)?;
    let player_id = request.player_id.trim();
    if player_id.is_empty() {
        return Err(SkillForgeError::Validation(
            "player_id is required for recalibration".to_string(),
        ));
    }

    info!("🔁 Recalibrating player '{}' ({})", player_id, mode);

    let Some(session) = store.earliest_session(player_id, mode)? else {
        info!("   -> No session found. Nothing to do.");
        return Ok(RecalibrationOutcome {
            player_id: player_id.to_string(),
            mode,
            created: 0,
            details: None,
        });
    };

    let before = store.session_stats(&session.id, mode)?;
    debug!(
        "   -> Session {} ({}) has {} stat rows",
        session.id,
        session.date,
        before.len()
    );

    let now = Utc::now();
    let after: Vec<StoredStatRow> = before
        .iter()
        .map(|row| derive_row(table, row, mode, now))
        .collect();

    store.insert_stat_rows(mode, &after)?;

    let details = RecalibrationDetails {
        before,
        after,
    };
    let record = RecalibrationRecord {
        id: Uuid::new_v4(),
        player_id: player_id.to_string(),
        mode,
        triggered_by: request
            .triggered_by
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TRIGGERED_BY.to_string()),
        notes: request.notes.clone(),
        details: details.clone(),
        created_at: now,
    };
    store.insert_recalibration_record(mode, &record)?;

    let created = details.after.len();
    info!("   -> Inserted {} derived rows and 1 audit record", created);

    Ok(RecalibrationOutcome {
        player_id: player_id.to_string(),
        mode,
        created,
        details: Some(details),
    })
}
