pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod consts;
pub mod error;
pub mod keys;
pub mod leaderboard;
pub mod loader;
pub mod recalibrate;
pub mod reference;
pub mod store;
pub mod summary;
pub mod tiers;
pub mod util;

pub use aggregator::{player_composite_rating, session_skill_score, StatRow};
pub use classifier::{classify, next_band, BandDescriptor};
pub use error::{SfResult, SkillForgeError};
pub use recalibrate::recalibrate;
pub use tiers::{level_progress, tier_for};
// cmd and reports are binary modules (see main.rs).
