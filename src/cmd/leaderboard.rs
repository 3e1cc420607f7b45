use crate::reports;
use clap::Args;
use skillforge::config::{Config, EngineParams};
use skillforge::error::SfResult;
use skillforge::leaderboard::{build_leaderboard, PlayerHistory};
use skillforge::reference::ReferenceTable;
use skillforge::store::{load_sessions, JsonFileStore, RatingStore};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct LeaderboardArgs {
    #[command(flatten)]
    pub engine: EngineParams,

    #[arg(short, long)]
    pub dataset: String,
}

pub fn run(args: LeaderboardArgs, config: &Config, table: &ReferenceTable) -> SfResult<()> {
    let mode = config.mode()?;
    let store = JsonFileStore::open(&args.dataset)?;

    let histories = store
        .players()?
        .into_iter()
        .map(|player| {
            let sessions = load_sessions(&store, &player.id, mode)?;
            Ok(PlayerHistory { player, sessions })
        })
        .collect::<SfResult<Vec<_>>>()?;

    info!("🏆 Ranking {} players ({})", histories.len(), mode);
    let board = build_leaderboard(table, &histories, config.engine.micro_level_span);

    reports::print_leaderboard(&board, config.engine.leaderboard_limit);
    Ok(())
}
