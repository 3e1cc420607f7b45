use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use skillforge::aggregator::Trend;
use skillforge::classifier::BandDescriptor;
use skillforge::keys::Skill;
use skillforge::leaderboard::Leaderboard;
use skillforge::recalibrate::RecalibrationOutcome;
use skillforge::summary::PlayerSummary;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn fmt_score(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

fn fmt_range(band: &BandDescriptor) -> String {
    match (band.min, band.max) {
        (Some(min), Some(max)) if max >= 100.0 => format!("{}+", min),
        (Some(min), Some(max)) => format!("{}-{}", min, max),
        _ => "-".to_string(),
    }
}

fn trend_cell(trend: Trend) -> Cell {
    let cell = Cell::new(trend.arrow()).set_alignment(CellAlignment::Center);
    match trend {
        Trend::Up => cell.fg(Color::Green),
        Trend::Down => cell.fg(Color::Red),
        Trend::Flat => cell,
    }
}

/// Fixed-width text bar for a 0..=100 percentage.
fn bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn print_band_report(
    skill: &str,
    metric: &str,
    value: f64,
    band: &BandDescriptor,
    next: Option<&BandDescriptor>,
) {
    println!("\n🎾 {} / {} = {}", skill, metric, value);
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("").add_attribute(Attribute::Bold),
        Cell::new("Band").add_attribute(Attribute::Bold),
        Cell::new("Range"),
        Cell::new("Description"),
    ]);

    table.add_row(vec![
        Cell::new("Current"),
        Cell::new(&band.name).fg(Color::Cyan),
        Cell::new(fmt_range(band)),
        Cell::new(&band.description),
    ]);
    if let Some(next) = next {
        table.add_row(vec![
            Cell::new("Next"),
            Cell::new(&next.name),
            Cell::new(fmt_range(next)),
            Cell::new(&next.description),
        ]);
    }
    println!("{}", table);

    if !band.anchors.is_empty() {
        println!("Anchors:");
        for anchor in &band.anchors {
            println!("  • {}", anchor);
        }
    }
}

pub fn print_player_summary(summary: &PlayerSummary) {
    println!(
        "\n👤 {} ({}): {} sessions, latest {}",
        summary.player.name,
        summary.player.id,
        summary.sessions,
        summary
            .latest_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "never".to_string())
    );

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Skill").add_attribute(Attribute::Bold),
        Cell::new("Latest").fg(Color::Cyan),
        Cell::new("Prev"),
        Cell::new("Δ"),
        Cell::new("Avg"),
        Cell::new("Band").add_attribute(Attribute::Bold),
        Cell::new("Next Band"),
    ]);
    for i in [1, 2, 4] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for line in &summary.skills {
        table.add_row(vec![
            Cell::new(line.skill.label()).add_attribute(Attribute::Bold),
            Cell::new(fmt_score(line.latest)).fg(Color::Cyan),
            Cell::new(fmt_score(line.previous)),
            trend_cell(line.trend),
            Cell::new(fmt_score(line.average)),
            Cell::new(&line.band.name),
            Cell::new(
                line.next_band
                    .as_ref()
                    .map(|b| b.name.as_str())
                    .unwrap_or("(top)"),
            ),
        ]);
    }
    println!("{}", table);

    let mut tier = new_table();
    tier.add_row(vec![
        Cell::new("Composite").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}", summary.composite)).fg(Color::Cyan),
    ]);
    tier.add_row(vec![
        Cell::new("Tier").add_attribute(Attribute::Bold),
        Cell::new(&summary.tier.name).fg(Color::Green),
    ]);
    tier.add_row(vec![
        Cell::new("Next Tier"),
        Cell::new(format!("{} (from {})", summary.next_tier.name, summary.next_tier.min)),
    ]);
    tier.add_row(vec![
        Cell::new(format!("Level {}", summary.micro_level)),
        Cell::new(format!(
            "{} {:.1}%",
            bar(summary.level_progress, 20),
            summary.level_progress
        )),
    ]);
    println!("{}", tier);
}

pub fn print_leaderboard(board: &Leaderboard, limit: usize) {
    println!("\n🏆 === LEADERBOARD === 🏆");
    let mut table = new_table();

    let mut header = vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Player").add_attribute(Attribute::Bold),
        Cell::new("Rating").fg(Color::Cyan),
        Cell::new("Tier"),
    ];
    header.extend(Skill::all().into_iter().map(|s| Cell::new(s.label())));
    table.set_header(header);

    for i in std::iter::once(2).chain(4..4 + Skill::all().len()) {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for entry in board.top(limit) {
        let s = &entry.summary;
        let mut row = vec![
            Cell::new(entry.rank),
            Cell::new(&s.player.name).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", s.composite)).fg(Color::Cyan),
            Cell::new(&s.tier.name),
        ];
        row.extend(Skill::all().into_iter().map(|skill| {
            let pct = entry.bars.get(&skill).copied().unwrap_or(0.0);
            let cell = Cell::new(format!("{:.0}%", pct));
            if pct >= 100.0 {
                cell.fg(Color::Green)
            } else {
                cell
            }
        }));
        table.add_row(row);
    }
    println!("{}", table);

    if board.entries.len() > limit {
        println!("  ... {} more players", board.entries.len() - limit);
    }
}

pub fn print_recalibration(outcome: &RecalibrationOutcome) {
    println!(
        "\n🔁 Recalibration for '{}' ({}): {} derived rows",
        outcome.player_id, outcome.mode, outcome.created
    );

    let Some(details) = &outcome.details else {
        println!("   No session found; nothing written.");
        return;
    };

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Skill").add_attribute(Attribute::Bold),
        Cell::new("c"),
        Cell::new("p"),
        Cell::new("a"),
        Cell::new("s"),
        Cell::new("t"),
        Cell::new("Normalized").fg(Color::Cyan),
        Cell::new("Band").add_attribute(Attribute::Bold),
    ]);
    for i in 1..=6 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for derived in &details.after {
        let r = &derived.row;
        table.add_row(vec![
            Cell::new(&r.skill_type),
            Cell::new(fmt_score(r.c)),
            Cell::new(fmt_score(r.p)),
            Cell::new(fmt_score(r.a)),
            Cell::new(fmt_score(r.s)),
            Cell::new(fmt_score(r.t)),
            Cell::new(fmt_score(derived.normalized_value)).fg(Color::Cyan),
            Cell::new(derived.normalized_band.as_deref().unwrap_or("-")),
        ]);
    }
    println!("{}", table);
}
