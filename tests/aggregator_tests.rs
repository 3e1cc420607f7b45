use chrono::NaiveDate;
use rstest::rstest;
use serde_json::json;
use skillforge::aggregator::{
    normalize_to_max, player_composite_rating, session_delta, session_scores,
    session_skill_score, skill_averages, skill_deltas, skill_maxima, Session, StatRow, Trend,
};
use skillforge::keys::Skill;
use std::collections::BTreeMap;

fn row(skill: &str, c: f64, p: f64, a: f64, s: f64, t: f64) -> StatRow {
    StatRow::with_components(skill, Some(c), Some(p), Some(a), Some(s), Some(t))
}

fn session(id: &str, date: (i32, u32, u32), rows: Vec<StatRow>) -> Session {
    Session {
        id: id.to_string(),
        player_id: "p1".to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        rows,
    }
}

// --- SESSION SCORE ---

#[test]
fn test_mean_of_present_components() {
    let r = row("forehand", 10.0, 20.0, 30.0, 40.0, 50.0);
    assert_eq!(session_skill_score(&r), Some(30.0));
}

#[test]
fn test_movement_uses_technique_only() {
    let r = row("movement", 1.0, 2.0, 3.0, 4.0, 22.0);
    assert_eq!(session_skill_score(&r), Some(22.0));

    let no_t = StatRow::with_components("Movement", Some(30.0), None, None, None, None);
    assert_eq!(session_skill_score(&no_t), None);
}

#[test]
fn test_missing_components_are_skipped() {
    let r = StatRow::with_components("serve", Some(10.0), None, Some(13.0), None, None);
    assert_eq!(session_skill_score(&r), Some(11.5));
}

#[test]
fn test_all_absent_is_none() {
    assert_eq!(session_skill_score(&StatRow::new("serve")), None);
}

#[test]
fn test_score_rounds_to_two_decimals() {
    let r = StatRow::with_components("serve", Some(10.0), Some(10.0), Some(11.0), None, None);
    assert_eq!(session_skill_score(&r), Some(10.33));
}

#[test]
fn test_legacy_columns_used_when_no_components() {
    let r: StatRow = serde_json::from_value(json!({
        "id": "row-1",
        "session_id": "s1",
        "skill_type": "backhand",
        "rating": 12,
        "footwork": "18",
        "comment": "tired",
        "created_at": "2024-03-01"
    }))
    .unwrap();
    assert_eq!(session_skill_score(&r), Some(15.0));
}

#[test]
fn test_legacy_ignores_bookkeeping_fields() {
    let r: StatRow = serde_json::from_value(json!({
        "skill_type": "serve",
        "player_id": 42,
        "normalized_value": 99,
        "legacy": 6
    }))
    .unwrap();
    assert_eq!(session_skill_score(&r), Some(6.0));
}

#[test]
fn test_components_win_over_legacy_columns() {
    let r: StatRow = serde_json::from_value(json!({
        "skill_type": "serve",
        "c": 10,
        "rating": 90
    }))
    .unwrap();
    assert_eq!(session_skill_score(&r), Some(10.0));
}

#[rstest]
#[case(json!("12.5"), Some(12.5))]
#[case(json!(12), Some(12.0))]
#[case(json!("abc"), None)]
#[case(json!(true), None)]
#[case(json!(null), None)]
#[case(json!({"v": 3}), None)]
fn test_tolerant_component_deserialization(
    #[case] raw: serde_json::Value,
    #[case] expected: Option<f64>,
) {
    let r: StatRow = serde_json::from_value(json!({"skill_type": "serve", "c": raw})).unwrap();
    assert_eq!(r.c, expected);
}

// --- COMPOSITE ---

#[rstest]
#[case(&[18.0, 0.0, 24.0, 0.0, 12.0], 18.0)]
#[case(&[0.0, 0.0], 0.0)]
#[case(&[], 0.0)]
#[case(&[10.0, 11.0, 11.0], 10.67)]
#[case(&[5.0, f64::NAN, 7.0], 6.0)]
fn test_composite_rating(#[case] scores: &[f64], #[case] expected: f64) {
    assert_eq!(player_composite_rating(scores), expected);
}

// --- DELTAS ---

#[rstest]
#[case(Some(12.0), Some(10.0), Trend::Up)]
#[case(Some(8.0), Some(10.0), Trend::Down)]
#[case(Some(10.0), Some(10.0), Trend::Flat)]
#[case(None, Some(10.0), Trend::Flat)]
#[case(Some(10.0), None, Trend::Flat)]
fn test_session_delta(
    #[case] cur: Option<f64>,
    #[case] prev: Option<f64>,
    #[case] expected: Trend,
) {
    assert_eq!(session_delta(cur, prev), expected);
}

#[test]
fn test_trend_sign() {
    assert_eq!(i8::from(Trend::Up), 1);
    assert_eq!(i8::from(Trend::Down), -1);
    assert_eq!(Trend::Flat.sign(), 0);
}

#[test]
fn test_skill_deltas_follow_date_not_input_order() {
    // Newest session listed first on purpose.
    let sessions = vec![
        session("late", (2024, 5, 1), vec![row("serve", 20.0, 20.0, 20.0, 20.0, 20.0)]),
        session("early", (2024, 1, 1), vec![row("serve", 10.0, 10.0, 10.0, 10.0, 10.0)]),
    ];
    let deltas = skill_deltas(&sessions);
    assert_eq!(deltas[&Skill::Serve], Trend::Up);
    assert_eq!(deltas[&Skill::Volley], Trend::Flat);
    assert_eq!(deltas.len(), 7);
}

// --- SESSION BUCKETS & AVERAGES ---

#[test]
fn test_duplicate_skills_in_a_session_are_averaged() {
    let scores = session_scores(&[
        row("serve", 10.0, 10.0, 10.0, 10.0, 10.0),
        row(" SERVE ", 20.0, 20.0, 20.0, 20.0, 20.0),
        row("lob", 30.0, 30.0, 30.0, 30.0, 30.0),
    ]);
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[&Skill::Serve], 15.0);
}

#[test]
fn test_historical_averages_span_sessions() {
    let sessions = vec![
        session("a", (2024, 1, 1), vec![row("volley", 10.0, 10.0, 10.0, 10.0, 10.0)]),
        session("b", (2024, 2, 1), vec![row("volley", 13.0, 13.0, 13.0, 13.0, 13.0)]),
        session("c", (2024, 3, 1), vec![StatRow::new("volley")]),
    ];
    let avg = skill_averages(&sessions);
    assert_eq!(avg[&Skill::Volley], 11.5);
    assert!(!avg.contains_key(&Skill::Serve));
}

#[test]
fn test_maxima_and_bars() {
    let a: BTreeMap<Skill, f64> = [(Skill::Serve, 10.0), (Skill::Return, 4.0)].into();
    let b: BTreeMap<Skill, f64> = [(Skill::Serve, 20.0)].into();
    let maxima = skill_maxima([&a, &b]);
    assert_eq!(maxima[&Skill::Serve], 20.0);
    assert_eq!(maxima[&Skill::Return], 4.0);

    assert_eq!(normalize_to_max(10.0, 20.0), 50.0);
    assert_eq!(normalize_to_max(20.0, 20.0), 100.0);
    assert_eq!(normalize_to_max(5.0, 0.0), 0.0);
    assert_eq!(normalize_to_max(5.0, f64::NAN), 0.0);
}
