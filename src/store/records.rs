use crate::aggregator::StatRow;
use crate::error::{SfResult, SkillForgeError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use uuid::Uuid;

/// Which of the two parallel table namespaces a job works against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Test,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TableKind {
    Sessions,
    PlayerStats,
    RecalibrationLog,
}

impl Mode {
    /// Accepts exactly `test` or `production` (surrounding whitespace
    /// ignored). Anything else is a caller error.
    pub fn parse(raw: &str) -> SfResult<Self> {
        match raw.trim() {
            "test" => Ok(Mode::Test),
            "production" => Ok(Mode::Production),
            other => Err(SkillForgeError::InvalidMode(other.to_string())),
        }
    }

    pub fn is_test(&self) -> bool {
        matches!(self, Mode::Test)
    }

    pub fn table_name(&self, kind: TableKind) -> String {
        match self {
            Mode::Production => kind.to_string(),
            Mode::Test => format!("{}_test", kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub player_id: String,
    pub date: NaiveDate,
}

const DERIVED_FIELDS: [&str; 4] = ["normalized_value", "normalized_band", "is_test", "created_at"];

/// A row of the stats table. Raw session input leaves the derived columns
/// empty; recalibration inserts rows with them filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredStatRow {
    #[serde(flatten)]
    pub row: StatRow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_band: Option<String>,
    #[serde(default)]
    pub is_test: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl StoredStatRow {
    /// Wraps an input row. Extra columns that would shadow the derived
    /// fields are dropped.
    pub fn raw(mut row: StatRow) -> Self {
        row.extra.retain(|k, _| !DERIVED_FIELDS.contains(&k.as_str()));
        Self {
            row,
            normalized_value: None,
            normalized_band: None,
            is_test: false,
            created_at: None,
        }
    }

    pub fn is_derived(&self) -> bool {
        self.normalized_band.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecalibrationDetails {
    pub before: Vec<StatRow>,
    pub after: Vec<StoredStatRow>,
}

/// Audit row written once per recalibration that found a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecalibrationRecord {
    pub id: Uuid,
    pub player_id: String,
    pub mode: Mode,
    pub triggered_by: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub details: RecalibrationDetails,
    pub created_at: DateTime<Utc>,
}
