pub mod builtin;

use crate::consts::OPEN_BAND_SENTINEL;
use crate::error::{SfResult, SkillForgeError};
use crate::keys::{Metric, Skill};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::{debug, info};

/// One named range of a (skill, metric) ladder. Bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anchors: Vec<String>,
}

impl Band {
    pub fn new(min: f64, max: f64, name: &str, description: &str) -> Self {
        Self {
            min,
            max,
            name: name.to_string(),
            description: description.to_string(),
            anchors: Vec::new(),
        }
    }

    pub fn is_open_ended(&self) -> bool {
        self.max >= OPEN_BAND_SENTINEL
    }
}

/// Anchor observations per band name.
pub type AnchorBook = BTreeMap<String, Vec<String>>;

static BUILTIN: Lazy<ReferenceTable> = Lazy::new(builtin::build);

/// Immutable band ladders for every (skill, metric) pair. The built-in table
/// is constructed once per process; alternates are loaded from JSON.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    bands: HashMap<(Skill, Metric), Vec<Band>>,
    anchors: HashMap<(Skill, Metric), AnchorBook>,
}

// On-disk layout. Skill and metric keys are canonicalized on the way in;
// anchors are keyed by the long-form metric name, bands by the short code.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawTable {
    skills: BTreeMap<String, RawSkill>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawSkill {
    #[serde(default)]
    bands: BTreeMap<String, Vec<Band>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    anchors: BTreeMap<String, AnchorBook>,
}

impl ReferenceTable {
    pub fn builtin() -> &'static ReferenceTable {
        &BUILTIN
    }

    pub(crate) fn from_parts(
        bands: HashMap<(Skill, Metric), Vec<Band>>,
        anchors: HashMap<(Skill, Metric), AnchorBook>,
    ) -> Self {
        Self { bands, anchors }
    }

    pub fn bands(&self, skill: Skill, metric: Metric) -> Option<&[Band]> {
        self.bands.get(&(skill, metric)).map(Vec::as_slice)
    }

    pub fn anchors_for(&self, skill: Skill, metric: Metric, band_name: &str) -> &[String] {
        self.anchors
            .get(&(skill, metric))
            .and_then(|book| book.get(band_name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of populated (skill, metric) ladders.
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let path = path.as_ref();
        info!("📚 Loading reference table: {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> SfResult<Self> {
        let raw: RawTable = serde_json::from_str(content)?;
        let mut bands = HashMap::new();
        let mut anchors = HashMap::new();

        for (skill_key, raw_skill) in raw.skills {
            let skill = Skill::from_key(&skill_key).ok_or_else(|| {
                SkillForgeError::Config(format!("Unknown skill '{}' in reference table", skill_key))
            })?;

            for (metric_key, list) in raw_skill.bands {
                let metric = Metric::from_key(&metric_key).ok_or_else(|| {
                    SkillForgeError::Config(format!(
                        "Unknown metric '{}' under skill '{}'",
                        metric_key, skill_key
                    ))
                })?;
                bands.insert((skill, metric), list);
            }

            for (metric_key, book) in raw_skill.anchors {
                let metric = Metric::from_key(&metric_key).ok_or_else(|| {
                    SkillForgeError::Config(format!(
                        "Unknown anchor metric '{}' under skill '{}'",
                        metric_key, skill_key
                    ))
                })?;
                anchors.insert((skill, metric), book);
            }
        }

        let table = Self { bands, anchors };
        table.validate()?;
        debug!("   -> Loaded {} band ladders.", table.len());
        Ok(table)
    }

    pub fn to_json_string(&self) -> SfResult<String> {
        let mut raw = RawTable::default();
        for skill in Skill::iter() {
            let mut raw_skill = RawSkill::default();
            for metric in Metric::iter() {
                if let Some(list) = self.bands.get(&(skill, metric)) {
                    raw_skill
                        .bands
                        .insert(metric.short_code().to_string(), list.clone());
                }
                if let Some(book) = self.anchors.get(&(skill, metric)) {
                    raw_skill
                        .anchors
                        .insert(metric.long_name().to_string(), book.clone());
                }
            }
            if !raw_skill.bands.is_empty() || !raw_skill.anchors.is_empty() {
                raw.skills.insert(skill.to_string(), raw_skill);
            }
        }
        Ok(serde_json::to_string_pretty(&raw)?)
    }

    /// Checks every ladder is non-empty, well-formed, sorted by `min` and
    /// free of overlaps. All violations are reported together.
    pub fn validate(&self) -> SfResult<()> {
        let mut problems = Vec::new();

        for skill in Skill::iter() {
            for metric in Metric::iter() {
                let Some(list) = self.bands.get(&(skill, metric)) else {
                    continue;
                };
                let label = format!("{}/{}", skill, metric.short_code());

                if list.is_empty() {
                    problems.push(format!("{}: empty band list", label));
                    continue;
                }

                for band in list {
                    if !(band.min.is_finite() && band.max.is_finite()) || band.min > band.max {
                        problems.push(format!(
                            "{}: band '{}' has invalid range [{}, {}]",
                            label, band.name, band.min, band.max
                        ));
                    }
                }

                for pair in list.windows(2) {
                    let (lo, hi) = (&pair[0], &pair[1]);
                    if hi.min < lo.min {
                        problems.push(format!(
                            "{}: '{}' is not sorted after '{}'",
                            label, hi.name, lo.name
                        ));
                    } else if hi.min <= lo.max {
                        problems.push(format!(
                            "{}: '{}' overlaps '{}'",
                            label, hi.name, lo.name
                        ));
                    }
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(SkillForgeError::Validation(problems.join("; ")))
        }
    }
}
