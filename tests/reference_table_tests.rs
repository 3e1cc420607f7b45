use skillforge::classifier::classify_with;
use skillforge::error::SkillForgeError;
use skillforge::keys::{Metric, Skill};
use skillforge::reference::ReferenceTable;
use std::collections::HashSet;
use std::io::Write;
use strum::IntoEnumIterator;
use tempfile::NamedTempFile;

const OVERLAPPING: &str = r#"{
  "skills": {
    "serve": {
      "bands": {
        "c": [
          {"min": 0, "max": 10, "name": "Low", "description": ""},
          {"min": 8, "max": 100, "name": "High", "description": ""}
        ]
      }
    }
  }
}"#;

#[test]
fn test_builtin_table_passes_validation() {
    ReferenceTable::builtin().validate().unwrap();
}

#[test]
fn test_builtin_covers_every_skill_and_metric() {
    let table = ReferenceTable::builtin();
    for skill in Skill::iter() {
        for metric in Metric::iter() {
            let bands = table.bands(skill, metric);
            assert!(
                bands.is_some_and(|b| !b.is_empty()),
                "missing ladder for {}/{}",
                skill,
                metric.short_code()
            );
        }
    }
    assert_eq!(table.len(), 7 * 6);
}

#[test]
fn test_every_overall_ladder_is_skill_specific() {
    let table = ReferenceTable::builtin();
    let top_names: HashSet<String> = Skill::iter()
        .map(|s| {
            let bands = table.bands(s, Metric::Overall).unwrap();
            bands.last().unwrap().name.clone()
        })
        .collect();
    assert_eq!(top_names.len(), 7);
}

#[test]
fn test_last_band_is_open_ended() {
    let table = ReferenceTable::builtin();
    for skill in Skill::iter() {
        for metric in Metric::iter() {
            let bands = table.bands(skill, metric).unwrap();
            assert!(bands.last().unwrap().is_open_ended());
        }
    }
}

#[test]
fn test_overlapping_table_is_rejected_on_load() {
    match ReferenceTable::from_json_str(OVERLAPPING) {
        Err(SkillForgeError::Validation(msg)) => assert!(msg.contains("overlaps"), "{}", msg),
        other => panic!("expected a validation error, got {:?}", other.map(|t| t.len())),
    }
}

#[test]
fn test_nested_band_file_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"skills": {{"serve": {{"bands": {{"c": [
            {{"min": 0, "max": 20, "name": "Wide", "description": ""}},
            {{"min": 10, "max": 15, "name": "Narrow", "description": ""}}
        ]}}}}}}}}"#
    )
    .unwrap();
    assert!(matches!(
        ReferenceTable::load_from_file(file.path()),
        Err(SkillForgeError::Validation(_))
    ));
}

#[test]
fn test_unsorted_table_is_rejected() {
    let json = r#"{"skills": {"serve": {"bands": {"c": [
        {"min": 10, "max": 100, "name": "High", "description": ""},
        {"min": 0, "max": 9, "name": "Low", "description": ""}
    ]}}}}"#;
    assert!(matches!(
        ReferenceTable::from_json_str(json),
        Err(SkillForgeError::Validation(_))
    ));
}

#[test]
fn test_unknown_skill_key_is_config_error() {
    let json = r#"{"skills": {"lob": {"bands": {"c": []}}}}"#;
    assert!(matches!(
        ReferenceTable::from_json_str(json),
        Err(SkillForgeError::Config(_))
    ));
}

#[test]
fn test_unknown_metric_key_is_config_error() {
    let json = r#"{"skills": {"serve": {"bands": {"grit": []}}}}"#;
    assert!(matches!(
        ReferenceTable::from_json_str(json),
        Err(SkillForgeError::Config(_))
    ));
}

#[test]
fn test_json_table_from_file_classifies_like_builtin() {
    let builtin = ReferenceTable::builtin();
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", builtin.to_json_string().unwrap()).unwrap();

    let loaded = ReferenceTable::load_from_file(file.path()).unwrap();
    loaded.validate().unwrap();
    assert_eq!(loaded.len(), builtin.len());

    for (skill, metric, value) in [
        ("serve", "c", 13.0),
        ("forehand", "spin", 27.4),
        ("movement", "t", 40.0),
        ("volley", "overall", 7.0),
    ] {
        assert_eq!(
            classify_with(&loaded, skill, metric, value),
            classify_with(builtin, skill, metric, value)
        );
    }
}

#[test]
fn test_missing_file_is_io_error() {
    assert!(matches!(
        ReferenceTable::load_from_file("does/not/exist.json"),
        Err(SkillForgeError::Io(_))
    ));
}
