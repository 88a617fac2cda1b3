use intuition_core::features::normalize;
use intuition_core::generation::GenerationKind;
use intuition_core::pipeline::Engine;
use intuition_core::profile::{InputProfile, Interaction};
use intuition_core::scoring::{apply_patterns, to_score, PatternRule, MAX_FIRED_PATTERNS};
use proptest::prelude::*;

fn magnitudes() -> impl Strategy<Value = [f64; 5]> {
    prop::array::uniform5(0.0f64..10.0)
}

fn profile() -> impl Strategy<Value = InputProfile> {
    (
        magnitudes(),
        magnitudes(),
        1.0f64..100.0,
        prop::array::uniform5(0u8..6),
    )
        .prop_map(|(a, b, strength, counts)| {
            let mut p = InputProfile::new()
                .with_ten_gods(a)
                .with_elements(b)
                .with_strength(strength);
            for kind in Interaction::ALL {
                p = p.with_interaction(kind, f64::from(counts[kind.index()]));
            }
            p
        })
}

proptest! {
    #[test]
    fn normalize_is_idempotent(v in magnitudes()) {
        let once = normalize(&v);
        let twice = normalize(once.values());
        for (a, b) in once.values().iter().zip(twice.values()) {
            prop_assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn normalized_sum_is_zero_or_one(v in prop::array::uniform5(prop_oneof![
        8 => 0.0f64..1e6,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
    ])) {
        let sum = normalize(&v).sum();
        let raw_sum: f64 = v.iter().map(|x| if x.is_finite() { *x } else { 0.0 }).sum();
        // Near-unit inputs pass through unchanged.
        if raw_sum > 0.95 && raw_sum < 1.05 {
            return Ok(());
        }
        prop_assert!(sum == 0.0 || (sum - 1.0).abs() < 1e-6, "sum {sum}");
    }

    #[test]
    fn transformed_scores_are_bounded(raw in -1e6f64..1e6, gain in 1.0f64..49.0) {
        for scale in [0.45, 0.50, 0.55] {
            let s = to_score(raw, scale, gain);
            prop_assert!((1.0..=99.0).contains(&s));
        }
    }

    #[test]
    fn at_most_two_patterns_apply(
        base in 1.0f64..99.0,
        rules in prop::collection::vec((any::<bool>(), -9i8..=9), 0..6),
    ) {
        let rules: Vec<PatternRule> = rules
            .into_iter()
            .map(|(condition, adj)| PatternRule { condition, adjustment: f64::from(adj), label: "r" })
            .collect();
        let out = apply_patterns(base, &rules);
        prop_assert!(out.fired.len() <= MAX_FIRED_PATTERNS);
        prop_assert!((1.0..=99.0).contains(&out.final_score));

        let mut firing: Vec<f64> = rules.iter().filter(|r| r.condition).map(|r| r.adjustment.abs()).collect();
        firing.sort_by(|a, b| b.total_cmp(a));
        let top: f64 = firing.iter().take(MAX_FIRED_PATTERNS).sum();
        prop_assert!(out.bonus.abs() <= top + 1e-12);
    }

    #[test]
    fn reports_are_bounded_and_deterministic(p in profile()) {
        for kind in [GenerationKind::Classic, GenerationKind::Revised] {
            let engine = Engine::with_generation(kind.build());
            let a = engine.run(&p);
            let b = engine.run(&p);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.subs.len(), 20);
            for s in &a.subs {
                prop_assert!((1..=99).contains(&s.final_score));
                prop_assert!(s.fired_patterns.len() <= MAX_FIRED_PATTERNS);
            }
            prop_assert_eq!(a.overload_risk, a.sub(15).map(|s| s.final_score).unwrap_or(0));
        }
    }
}
