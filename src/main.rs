use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use skillforge::config::Config;
use skillforge::error::SkillForgeError;
use skillforge::reference::ReferenceTable;
use std::process;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON engine config; explicit flags override its values
    #[arg(global = true, long)]
    config: Option<String>,

    /// Alternate reference table (JSON); the built-in table is used otherwise
    #[arg(global = true, long)]
    reference: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Classify(cmd::classify::ClassifyArgs),
    Summary(cmd::summary::SummaryArgs),
    Leaderboard(cmd::leaderboard::LeaderboardArgs),
    Recalibrate(cmd::recalibrate::RecalibrateArgs),
    Import(cmd::import::ImportArgs),
    CheckTable(cmd::check_table::CheckTableArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing SkillForge...");

    // Config file is the base; flags typed on the command line win.
    let mut config = match &cli.config {
        Some(path) => {
            info!("⚖️  Loading config from: {}", path);
            Config::load_from_file(path).unwrap_or_else(|e| fail(e))
        }
        None => Config::default(),
    };

    if let Some((name, sub_matches)) = matches.subcommand() {
        match &cli.command {
            Commands::Summary(args) => config.engine.merge_from_cli(&args.engine, sub_matches),
            Commands::Leaderboard(args) => config.engine.merge_from_cli(&args.engine, sub_matches),
            Commands::Recalibrate(args) => config
                .recalibration
                .merge_from_cli(&args.recalibration, sub_matches),
            _ => {}
        }
        info!("▶️  Command: {}", name);
    }

    let loaded;
    let table: &ReferenceTable = match &cli.reference {
        Some(path) => {
            loaded = ReferenceTable::load_from_file(path).unwrap_or_else(|e| fail(e));
            &loaded
        }
        None => {
            if cli.config.is_none() {
                warn!("⚠️  No external config loaded. Using embedded defaults.");
            }
            ReferenceTable::builtin()
        }
    };

    let result = match cli.command {
        Commands::Classify(args) => cmd::classify::run(args, table),
        Commands::Summary(args) => cmd::summary::run(args, &config, table),
        Commands::Leaderboard(args) => cmd::leaderboard::run(args, &config, table),
        Commands::Recalibrate(args) => cmd::recalibrate::run(args, &config, table),
        Commands::Import(args) => cmd::import::run(args),
        Commands::CheckTable(args) => cmd::check_table::run(args, table),
    };

    if let Err(e) = result {
        fail(e);
    }
}

fn fail(e: SkillForgeError) -> ! {
    error!("❌ {}", e);
    if let Some(hint) = e.setup_hint() {
        error!("   {}", hint);
    }
    process::exit(1);
}
