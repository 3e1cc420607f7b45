use crate::reports;
use clap::Args;
use skillforge::config::{Config, RecalibrationParams};
use skillforge::error::SfResult;
use skillforge::recalibrate::{recalibrate, RecalibrationRequest};
use skillforge::reference::ReferenceTable;
use skillforge::store::JsonFileStore;

#[derive(Args, Debug, Clone)]
pub struct RecalibrateArgs {
    #[arg(short, long)]
    pub dataset: String,

    #[arg(short, long)]
    pub player: String,

    /// test | production
    #[arg(short, long)]
    pub mode: String,

    #[command(flatten)]
    pub recalibration: RecalibrationParams,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: RecalibrateArgs, config: &Config, table: &ReferenceTable) -> SfResult<()> {
    let store = JsonFileStore::open(&args.dataset)?;

    let request = RecalibrationRequest {
        player_id: args.player,
        mode: args.mode,
        triggered_by: Some(config.recalibration.triggered_by.clone()),
        notes: config.recalibration.notes.clone(),
    };
    let outcome = recalibrate(&store, table, &request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        reports::print_recalibration(&outcome);
    }
    Ok(())
}
