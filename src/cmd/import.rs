use chrono::{NaiveDate, Utc};
use clap::Args;
use skillforge::error::SfResult;
use skillforge::loader::load_stat_rows_from_path;
use skillforge::store::{
    JsonFileStore, Mode, Player, RatingStore, SessionRecord, StoredStatRow, TableKind,
};
use std::path::Path;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    #[arg(short, long)]
    pub dataset: String,

    /// CSV with a skill_type column and any of c, p, a, s, t
    #[arg(long)]
    pub csv: String,

    #[arg(short, long)]
    pub session: String,

    /// Registers the session (and player) when given
    #[arg(short, long)]
    pub player: Option<String>,

    #[arg(long)]
    pub player_name: Option<String>,

    /// Session date (YYYY-MM-DD); today when omitted
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(short, long, default_value = "production")]
    pub mode: String,

    /// Create the dataset file with empty tables if it does not exist
    #[arg(long, default_value_t = false)]
    pub create: bool,
}

pub fn run(args: ImportArgs) -> SfResult<()> {
    let mode = Mode::parse(&args.mode)?;

    let store = if args.create && !Path::new(&args.dataset).exists() {
        info!("🆕 Creating dataset: {}", args.dataset);
        JsonFileStore::create(&args.dataset)?
    } else {
        JsonFileStore::open(&args.dataset)?
    };

    let import = load_stat_rows_from_path(&args.csv, Some(&args.session))?;
    if import.skipped > 0 {
        warn!("⚠️  {} CSV rows skipped", import.skipped);
    }

    if let Some(player_id) = &args.player {
        store.ensure_player(Player {
            id: player_id.clone(),
            name: args.player_name.clone().unwrap_or_else(|| player_id.clone()),
        })?;
        store.ensure_session(
            mode,
            SessionRecord {
                id: args.session.clone(),
                player_id: player_id.clone(),
                date: args.date.unwrap_or_else(|| Utc::now().date_naive()),
            },
        )?;
    }

    let rows: Vec<StoredStatRow> = import
        .rows
        .into_iter()
        .map(|row| StoredStatRow {
            is_test: mode.is_test(),
            ..StoredStatRow::raw(row)
        })
        .collect();
    store.insert_stat_rows(mode, &rows)?;

    println!(
        "📥 Imported {} stat rows into session '{}' ({})",
        rows.len(),
        args.session,
        mode.table_name(TableKind::PlayerStats)
    );
    Ok(())
}
