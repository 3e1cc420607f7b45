/// Width of one micro level on the progress bar. Tier minimums are spaced by
/// the same step, but the two scales are computed independently.
pub const MICRO_LEVEL_SPAN: f64 = 3.0;

/// A band whose `max` reaches this value is open-ended.
pub const OPEN_BAND_SENTINEL: f64 = 100.0;

/// Name returned when no band list exists for a (skill, metric) pair.
pub const UNKNOWN_BAND: &str = "Unknown";

/// Row fields that never count as legacy score columns.
pub const NON_SCORE_FIELDS: &[&str] = &[
    "id",
    "session_id",
    "player_id",
    "skill_type",
    "created_at",
    "updated_at",
    "date",
    "is_test",
    "normalized_value",
    "normalized_band",
];

/// Fallback author recorded on audit rows when the caller gives none.
pub const DEFAULT_TRIGGERED_BY: &str = "system";
