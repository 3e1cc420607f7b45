use crate::consts::{DEFAULT_TRIGGERED_BY, MICRO_LEVEL_SPAN};
use crate::error::{SfResult, SkillForgeError};
use crate::store::Mode;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

macro_rules! update_if_present {
    ($target:expr, $cli:expr, $matches:expr, $field:ident) => {
        if $matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
            $target.$field = $cli.$field.clone();
        }
    };
}

/// Engine settings: a JSON file provides the base, explicit CLI flags win.
#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    #[serde(default)]
    pub engine: EngineParams,
    #[command(flatten)]
    #[serde(default)]
    pub recalibration: RecalibrationParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    /// Width of one micro level on the progress bar
    #[arg(long, default_value_t = MICRO_LEVEL_SPAN)]
    pub micro_level_span: f64,

    /// Namespace read by summary and leaderboard (test | production)
    #[arg(long, default_value = "production")]
    pub mode: String,

    /// Rows shown by the leaderboard report
    #[arg(long, default_value_t = 20)]
    pub leaderboard_limit: usize,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            micro_level_span: MICRO_LEVEL_SPAN,
            mode: "production".to_string(),
            leaderboard_limit: 20,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecalibrationParams {
    /// Recorded on the audit row
    #[arg(long, default_value = DEFAULT_TRIGGERED_BY)]
    pub triggered_by: String,

    #[arg(long)]
    pub notes: Option<String>,
}

impl EngineParams {
    /// Applies only the flags the user actually typed, so file values are not
    /// clobbered by clap defaults.
    pub fn merge_from_cli(&mut self, cli: &EngineParams, matches: &ArgMatches) {
        update_if_present!(self, cli, matches, micro_level_span);
        update_if_present!(self, cli, matches, mode);
        update_if_present!(self, cli, matches, leaderboard_limit);
    }
}

impl RecalibrationParams {
    pub fn merge_from_cli(&mut self, cli: &RecalibrationParams, matches: &ArgMatches) {
        update_if_present!(self, cli, matches, triggered_by);
        update_if_present!(self, cli, matches, notes);
    }
}

impl Default for RecalibrationParams {
    fn default() -> Self {
        Self {
            triggered_by: DEFAULT_TRIGGERED_BY.to_string(),
            notes: None,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SkillForgeError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SfResult<()> {
        if !(self.engine.micro_level_span.is_finite() && self.engine.micro_level_span > 0.0) {
            return Err(SkillForgeError::Config(format!(
                "micro_level_span must be a positive number, got {}",
                self.engine.micro_level_span
            )));
        }
        Mode::parse(&self.engine.mode)?;
        Ok(())
    }

    pub fn mode(&self) -> SfResult<Mode> {
        Mode::parse(&self.engine.mode)
    }
}
