use clap::Args;
use skillforge::error::SfResult;
use skillforge::keys::{Metric, Skill};
use skillforge::reference::ReferenceTable;
use std::fs;
use strum::IntoEnumIterator;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CheckTableArgs {
    /// Write the checked table as JSON (a starting point for custom tables)
    #[arg(long)]
    pub export: Option<String>,
}

pub fn run(args: CheckTableArgs, table: &ReferenceTable) -> SfResult<()> {
    info!("🔎 Checking {} band ladders...", table.len());
    table.validate()?;

    let mut missing = Vec::new();
    for skill in Skill::iter() {
        for metric in Metric::iter() {
            if table.bands(skill, metric).is_none() {
                missing.push(format!("{}/{}", skill, metric.short_code()));
            }
        }
    }

    println!("✅ Reference table OK ({} ladders)", table.len());
    if !missing.is_empty() {
        println!(
            "   {} pairs have no ladder and classify as Unknown: {}",
            missing.len(),
            missing.join(", ")
        );
    }

    if let Some(path) = args.export {
        fs::write(&path, table.to_json_string()?)?;
        info!("💾 Table written to {}", path);
    }
    Ok(())
}
