use crate::reports;
use clap::Args;
use skillforge::config::{Config, EngineParams};
use skillforge::error::{SfResult, SkillForgeError};
use skillforge::reference::ReferenceTable;
use skillforge::store::{load_sessions, JsonFileStore, RatingStore};
use skillforge::summary::summarize_player;
use tracing::debug;

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub engine: EngineParams,

    /// Dataset JSON file
    #[arg(short, long)]
    pub dataset: String,

    #[arg(short, long)]
    pub player: String,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: SummaryArgs, config: &Config, table: &ReferenceTable) -> SfResult<()> {
    let mode = config.mode()?;
    let store = JsonFileStore::open(&args.dataset)?;

    let player = store
        .players()?
        .into_iter()
        .find(|p| p.id == args.player)
        .ok_or_else(|| {
            SkillForgeError::Validation(format!("Unknown player id '{}'", args.player))
        })?;

    let sessions = load_sessions(&store, &player.id, mode)?;
    debug!("   -> {} sessions for {} ({})", sessions.len(), player.name, mode);

    let summary = summarize_player(table, &player, &sessions, config.engine.micro_level_span);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        reports::print_player_summary(&summary);
    }
    Ok(())
}
