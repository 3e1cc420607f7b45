use skillforge::aggregator::session_skill_score;
use skillforge::error::SkillForgeError;
use skillforge::loader::{load_stat_rows, load_stat_rows_from_path};
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

#[test]
fn test_loader_parses_component_columns() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "skill_type,c,p,a,s,t").unwrap();
    writeln!(file, "serve,10,20,30,40,50").unwrap();
    writeln!(file, "movement,,,,,22").unwrap();

    let import = load_stat_rows_from_path(file.path(), Some("s1")).unwrap();
    assert_eq!(import.rows.len(), 2);
    assert_eq!(import.skipped, 0);
    assert_eq!(import.rows[0].session_id.as_deref(), Some("s1"));
    assert_eq!(session_skill_score(&import.rows[0]), Some(30.0));
    assert_eq!(import.rows[1].c, None);
    assert_eq!(session_skill_score(&import.rows[1]), Some(22.0));
}

#[test]
fn test_loader_tolerates_garbage_cells() {
    let data = "Skill_Type, C , P\nforehand, abc ,12\nbackhand,NaN,\n";
    let import = load_stat_rows(Cursor::new(data), None).unwrap();
    assert_eq!(import.rows.len(), 2);
    assert_eq!(import.rows[0].c, None);
    assert_eq!(import.rows[0].p, Some(12.0));
    assert_eq!(import.rows[1].c, None);
    assert_eq!(session_skill_score(&import.rows[1]), None);
}

#[test]
fn test_loader_skips_rows_without_skill() {
    let data = "skill_type,c\n,10\nvolley,8\n";
    let import = load_stat_rows(Cursor::new(data), None).unwrap();
    assert_eq!(import.rows.len(), 1);
    assert_eq!(import.skipped, 1);
    assert_eq!(import.rows[0].skill_type, "volley");
}

#[test]
fn test_loader_keeps_unknown_columns_as_extras() {
    let data = "skill_type,session_id,rating,coach\nreturn,s9,14,Kim\n";
    let import = load_stat_rows(Cursor::new(data), None).unwrap();
    let row = &import.rows[0];
    assert_eq!(row.session_id.as_deref(), Some("s9"));
    assert_eq!(row.extra["rating"], "14");
    // No components, so the legacy numeric column drives the score.
    assert_eq!(session_skill_score(row), Some(14.0));
}

#[test]
fn test_loader_requires_skill_column() {
    let data = "name,c\nserve,10\n";
    let err = load_stat_rows(Cursor::new(data), None).err().unwrap();
    assert!(matches!(err, SkillForgeError::Validation(_)));
}

#[test]
fn test_loader_ignores_reserved_columns() {
    let data = "skill_type,c,is_test,normalized_band,normalized_value,created_at,rating\n\
                serve,10,yes,foo,99,yesterday,7\n";
    let import = load_stat_rows(Cursor::new(data), None).unwrap();
    let row = &import.rows[0];
    assert_eq!(row.c, Some(10.0));
    for reserved in ["is_test", "normalized_band", "normalized_value", "created_at"] {
        assert!(!row.extra.contains_key(reserved), "{} leaked into extras", reserved);
    }
    assert_eq!(row.extra["rating"], "7");
}
