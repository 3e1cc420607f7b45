use proptest::prelude::*;
use skillforge::aggregator::{player_composite_rating, session_skill_score, StatRow};
use skillforge::classifier::classify;
use skillforge::keys::{Metric, Skill};
use skillforge::tiers::{level_progress, tier_for, TIERS};
use strum::IntoEnumIterator;

// --- STRATEGIES ---

prop_compose! {
    fn arb_pair()(
        s in 0..7usize,
        m in 0..6usize
    ) -> (Skill, Metric) {
        (Skill::all()[s], Metric::iter().nth(m).unwrap())
    }
}

prop_compose! {
    fn arb_component()(present in any::<bool>(), v in 0.0..60.0f64) -> Option<f64> {
        present.then_some(v)
    }
}

prop_compose! {
    fn arb_row()(
        s in 0..7usize,
        c in arb_component(),
        p in arb_component(),
        a in arb_component(),
        sp in arb_component(),
        t in arb_component()
    ) -> StatRow {
        StatRow::with_components(Skill::all()[s].as_ref(), c, p, a, sp, t)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_classify_is_total_for_known_pairs(
        (skill, metric) in arb_pair(),
        value in -50.0..500.0f64
    ) {
        let band = classify(skill.as_ref(), metric.short_code(), value);
        prop_assert!(band.index.is_some());
        prop_assert_ne!(band.name, "Unknown");
    }

    #[test]
    fn test_classify_depends_only_on_floor(
        (skill, metric) in arb_pair(),
        whole in 0u32..120,
        frac in 0.0..0.999f64
    ) {
        let base = whole as f64;
        prop_assert_eq!(
            classify(skill.as_ref(), metric.long_name(), base + frac),
            classify(skill.as_ref(), metric.long_name(), base)
        );
    }

    #[test]
    fn test_classify_is_monotonic(
        (skill, metric) in arb_pair(),
        a in 0.0..150.0f64,
        b in 0.0..150.0f64
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo_idx = classify(skill.as_ref(), metric.short_code(), lo).index.unwrap();
        let hi_idx = classify(skill.as_ref(), metric.short_code(), hi).index.unwrap();
        prop_assert!(lo_idx <= hi_idx);
    }

    #[test]
    fn test_session_score_within_component_range(row in arb_row()) {
        if let Some(score) = session_skill_score(&row) {
            let values: Vec<f64> = if row.is_movement() {
                row.t.into_iter().collect()
            } else {
                [row.c, row.p, row.a, row.s, row.t].into_iter().flatten().collect()
            };
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(score >= min - 0.005 && score <= max + 0.005);
        }
    }

    #[test]
    fn test_composite_ignores_zeros(
        scores in proptest::collection::vec(0.0..40.0f64, 0..7),
        zeros in 0usize..5
    ) {
        let mut padded = scores.clone();
        padded.extend(std::iter::repeat(0.0).take(zeros));
        prop_assert_eq!(player_composite_rating(&padded), player_composite_rating(&scores));
    }

    #[test]
    fn test_tier_and_progress_bounds(rating in -10.0..200.0f64) {
        let tier = tier_for(rating);
        prop_assert!(tier.index < TIERS.len());
        prop_assert!(tier.min <= rating.max(0.0));

        let progress = level_progress(rating);
        prop_assert!((0.0..=100.0).contains(&progress));
    }
}
