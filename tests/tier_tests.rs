use rstest::rstest;
use skillforge::tiers::{level_progress, level_progress_with, micro_level, next_tier, tier_for, TIERS};

#[rstest]
#[case(0.0, "Explorer")]
#[case(2.99, "Explorer")]
#[case(3.0, "Rally Starter")]
#[case(17.5, "Match Player")]
#[case(33.0, "Professional Track")]
#[case(34.0, "Professional Track")]
#[case(250.0, "Professional Track")]
#[case(-5.0, "Explorer")]
#[case(f64::NAN, "Explorer")]
fn test_tier_for(#[case] rating: f64, #[case] expected: &str) {
    assert_eq!(tier_for(rating).name, expected);
}

#[test]
fn test_tier_table_shape() {
    assert_eq!(TIERS.len(), 12);
    for (i, tier) in TIERS.iter().enumerate() {
        assert_eq!(tier.min, i as f64 * 3.0);
    }
}

#[test]
fn test_next_tier_clamps_at_top() {
    assert_eq!(next_tier(0).name, "Rally Starter");
    assert_eq!(next_tier(10).name, "Professional Track");
    assert_eq!(next_tier(11).name, "Professional Track");
    assert_eq!(next_tier(11).index, 11);
    assert_eq!(next_tier(usize::MAX).index, 11);
}

#[rstest]
#[case(7.0, 33.33)]
#[case(6.0, 0.0)]
#[case(8.5, 83.33)]
#[case(0.0, 0.0)]
fn test_level_progress(#[case] rating: f64, #[case] expected: f64) {
    assert!((level_progress(rating) - expected).abs() < 0.01);
}

#[test]
fn test_level_progress_with_custom_span() {
    assert!((level_progress_with(7.0, 5.0) - 40.0).abs() < 1e-9);
    assert_eq!(level_progress_with(7.0, 0.0), 0.0);
    assert_eq!(level_progress_with(7.0, -3.0), 0.0);
    assert_eq!(level_progress_with(f64::NAN, 3.0), 0.0);
}

#[test]
fn test_micro_level_and_tier_are_separate_scales() {
    // 7.0 sits in tier "Court Builder" (min 6) and micro level 2 (6..9).
    assert_eq!(micro_level(7.0, 3.0), 2);
    assert_eq!(tier_for(7.0).name, "Court Builder");
    assert_eq!(micro_level(7.0, 5.0), 1);
}
