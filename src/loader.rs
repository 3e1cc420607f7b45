use crate::aggregator::StatRow;
use crate::consts::NON_SCORE_FIELDS;
use crate::error::{SfResult, SkillForgeError};
use crate::util::parse_optional_str;
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

pub struct RawStatImport {
    pub rows: Vec<StatRow>,
    pub skipped: usize,
}

pub fn load_stat_rows_from_path<P: AsRef<Path>>(
    path: P,
    session_id: Option<&str>,
) -> SfResult<RawStatImport> {
    let file = File::open(path.as_ref())?;
    load_stat_rows(file, session_id)
}

/// Reads session stat rows from CSV. A `skill_type` header column is
/// required; `c,p,a,s,t` cells are parsed tolerantly (blank or garbage means
/// absent) and any other columns are kept as extra fields. Rows without a
/// skill are skipped.
pub fn load_stat_rows<R: Read>(reader: R, session_id: Option<&str>) -> SfResult<RawStatImport> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();

    if !headers.iter().any(|h| h == "skill_type") {
        return Err(SkillForgeError::Validation(
            "CSV is missing the 'skill_type' column".to_string(),
        ));
    }

    // Bookkeeping columns belong to the stored row, not to the raw input.
    for header in headers.iter().filter(|h| is_reserved(h.as_str())) {
        warn!("   ⚠️  Column '{}' is reserved and will be ignored.", header);
    }

    let mut rows = Vec::new();
    let mut skipped = 0;

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                warn!("   ⚠️  [Row {}] CSV Parse Error: {}", row_idx + 1, e);
                skipped += 1;
                continue;
            }
        };

        let mut row = StatRow {
            session_id: session_id.map(str::to_string),
            ..Default::default()
        };

        for (header, cell) in headers.iter().zip(rec.iter()) {
            match header.as_str() {
                "skill_type" => row.skill_type = cell.to_string(),
                "id" => row.id = Some(cell.to_string()).filter(|s| !s.is_empty()),
                "session_id" => {
                    if row.session_id.is_none() && !cell.is_empty() {
                        row.session_id = Some(cell.to_string());
                    }
                }
                "c" => row.c = parse_optional_str(cell),
                "p" => row.p = parse_optional_str(cell),
                "a" => row.a = parse_optional_str(cell),
                "s" => row.s = parse_optional_str(cell),
                "t" => row.t = parse_optional_str(cell),
                other if is_reserved(other) => {}
                other => {
                    row.extra
                        .insert(other.to_string(), Value::String(cell.to_string()));
                }
            }
        }

        if row.skill_type.trim().is_empty() {
            skipped += 1;
            continue;
        }
        rows.push(row);
    }

    if skipped > 0 {
        debug!("   ⚠️  Skipped {} invalid rows in stat import.", skipped);
    }

    Ok(RawStatImport { rows, skipped })
}

fn is_reserved(header: &str) -> bool {
    !matches!(header, "id" | "session_id" | "skill_type") && NON_SCORE_FIELDS.contains(&header)
}
