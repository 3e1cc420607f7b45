use crate::reports;
use clap::Args;
use skillforge::classifier::{classify_with, next_band_with};
use skillforge::error::SfResult;
use skillforge::reference::ReferenceTable;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    #[arg(short, long)]
    pub skill: String,

    /// Short code (c, p, a, s, t), long name, or "overall"
    #[arg(short, long, default_value = "overall")]
    pub metric: String,

    #[arg(short, long, allow_negative_numbers = true)]
    pub value: f64,

    /// Print the band descriptor as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: ClassifyArgs, table: &ReferenceTable) -> SfResult<()> {
    let band = classify_with(table, &args.skill, &args.metric, args.value);
    if band.is_unknown() {
        warn!(
            "⚠️  No ladder for skill '{}' / metric '{}'",
            args.skill, args.metric
        );
    }
    let next = band
        .index
        .and_then(|idx| next_band_with(table, &args.skill, &args.metric, idx));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&band)?);
        return Ok(());
    }

    reports::print_band_report(&args.skill, &args.metric, args.value, &band, next.as_ref());
    Ok(())
}
