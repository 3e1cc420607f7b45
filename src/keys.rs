use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Lowercases and drops every whitespace character, so "Fore Hand ",
/// "forehand" and "FOREHAND" all land on the same key.
pub fn canonical_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Serve,
    Return,
    Forehand,
    Backhand,
    Volley,
    Overhead,
    Movement,
}

impl Skill {
    pub fn from_key(raw: &str) -> Option<Self> {
        canonical_key(raw).parse().ok()
    }

    /// Human label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Serve => "Serve",
            Self::Return => "Return",
            Self::Forehand => "Forehand",
            Self::Backhand => "Backhand",
            Self::Volley => "Volley",
            Self::Overhead => "Overhead",
            Self::Movement => "Movement",
        }
    }

    pub fn all() -> Vec<Skill> {
        Skill::iter().collect()
    }
}

/// The five per-session components plus the per-skill overall score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Consistency,
    Power,
    Accuracy,
    Spin,
    Technique,
    Overall,
}

impl Metric {
    /// The five rated components, in storage column order.
    pub const COMPONENTS: [Metric; 5] = [
        Metric::Consistency,
        Metric::Power,
        Metric::Accuracy,
        Metric::Spin,
        Metric::Technique,
    ];

    /// Accepts the short column codes, `overall`, or the long-form names.
    pub fn from_key(raw: &str) -> Option<Self> {
        let key = canonical_key(raw);
        Metric::iter().find(|m| m.short_code() == key || m.long_name() == key)
    }

    /// Key used by the band table.
    pub fn short_code(&self) -> &'static str {
        match self {
            Self::Consistency => "c",
            Self::Power => "p",
            Self::Accuracy => "a",
            Self::Spin => "s",
            Self::Technique => "t",
            Self::Overall => "overall",
        }
    }

    /// Key used by the anchor book.
    pub fn long_name(&self) -> &'static str {
        match self {
            Self::Consistency => "consistency",
            Self::Power => "power",
            Self::Accuracy => "accuracy",
            Self::Spin => "spin",
            Self::Technique => "technique",
            Self::Overall => "overall",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_strips_whitespace_and_case() {
        assert_eq!(canonical_key("  Fore Hand\t"), "forehand");
        assert_eq!(Skill::from_key(" MOVEMENT "), Some(Skill::Movement));
        assert_eq!(Skill::from_key("lob"), None);
    }

    #[test]
    fn metric_accepts_short_and_long_forms() {
        assert_eq!(Metric::from_key("C"), Some(Metric::Consistency));
        assert_eq!(Metric::from_key("technique"), Some(Metric::Technique));
        assert_eq!(Metric::from_key(" Overall "), Some(Metric::Overall));
        assert_eq!(Metric::from_key("x"), None);
    }
}
