//! Per-metric scoring: style blending, the saturating score transform and
//! pattern bonuses.

use std::cmp::Ordering;

use crate::catalogue::MetricSpec;
use crate::features::Features;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 99.0;

/// At most this many pattern adjustments contribute to one metric.
pub const MAX_FIRED_PATTERNS: usize = 2;

/// Map a blended raw value to a bounded score.
///
/// Near zero the map is close to linear around 50; large magnitudes saturate
/// smoothly toward the bounds.
pub fn to_score(raw: f64, scale: f64, gain: f64) -> f64 {
    (50.0 + gain * (raw / scale).tanh()).clamp(MIN_SCORE, MAX_SCORE)
}

/// Round half up, the way scores are reported.
pub fn round_score(score: f64) -> u8 {
    (score + 0.5).floor().clamp(0.0, 100.0) as u8
}

// ---------------------------------------------------------------------------
// Style blending
// ---------------------------------------------------------------------------

/// One style's raw signal for the current profile.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleCandidate {
    pub name: &'static str,
    pub raw: f64,
}

/// Result of folding a metric's candidates into one raw value.
#[derive(Debug, Clone, PartialEq)]
pub struct Blend {
    pub raw: f64,
    /// Name of the strongest style; `None` for unstyled metrics.
    pub dominant: Option<&'static str>,
}

/// Evaluate every style of `metric`, adding `spike_weight · spike` when the
/// generation lets dispersion into the formulas.
pub fn compose(metric: &MetricSpec, features: &Features, spike_weight: f64) -> Vec<StyleCandidate> {
    metric
        .styles
        .iter()
        .map(|style| {
            let mut raw = style.raw(features);
            if spike_weight != 0.0 {
                raw += spike_weight * features.spike;
            }
            StyleCandidate { name: style.name, raw }
        })
        .collect()
}

/// `0.7 · max + 0.3 · mean` over the candidates.  The first candidate with
/// the maximal raw value names the dominant style.
pub fn blend(candidates: &[StyleCandidate]) -> Blend {
    match candidates {
        [] => Blend { raw: 0.0, dominant: None },
        [only] => Blend { raw: only.raw, dominant: None },
        _ => {
            let mut best = &candidates[0];
            for c in &candidates[1..] {
                if c.raw > best.raw {
                    best = c;
                }
            }
            let mean = candidates.iter().fold(0.0, |acc, c| acc + c.raw) / candidates.len() as f64;
            Blend {
                raw: 0.7 * best.raw + 0.3 * mean,
                dominant: Some(best.name),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Pattern bonuses
// ---------------------------------------------------------------------------

/// A pattern rule evaluated against the current feature state.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternRule {
    pub condition: bool,
    pub adjustment: f64,
    pub label: &'static str,
}

/// Evaluate every pattern of `metric` now.
pub fn evaluate_patterns(metric: &MetricSpec, features: &Features) -> Vec<PatternRule> {
    metric
        .patterns
        .iter()
        .map(|p| PatternRule {
            condition: p.holds(features),
            adjustment: p.adjustment,
            label: p.label,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternOutcome {
    pub bonus: f64,
    /// Labels of the applied rules, largest magnitude first.
    pub fired: Vec<&'static str>,
    /// `base + bonus`, clamped to the score range.
    pub final_score: f64,
}

/// Apply at most [`MAX_FIRED_PATTERNS`] firing rules, largest absolute
/// adjustment first.  Ties keep declaration order.
pub fn apply_patterns(base: f64, rules: &[PatternRule]) -> PatternOutcome {
    let mut firing: Vec<&PatternRule> = rules.iter().filter(|r| r.condition).collect();
    firing.sort_by(|a, b| {
        b.adjustment
            .abs()
            .partial_cmp(&a.adjustment.abs())
            .unwrap_or(Ordering::Equal)
    });
    firing.truncate(MAX_FIRED_PATTERNS);

    let bonus = firing.iter().fold(0.0, |acc, r| acc + r.adjustment);
    PatternOutcome {
        bonus,
        fired: firing.iter().map(|r| r.label).collect(),
        final_score: (base + bonus).clamp(MIN_SCORE, MAX_SCORE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::metric;
    use crate::profile::InputProfile;

    fn rule(condition: bool, adjustment: f64, label: &'static str) -> PatternRule {
        PatternRule { condition, adjustment, label }
    }

    #[test]
    fn zero_raw_scores_fifty() {
        assert_eq!(to_score(0.0, 0.45, 38.0), 50.0);
        assert_eq!(to_score(0.0, 0.55, 42.0), 50.0);
    }

    #[test]
    fn score_saturates_inside_bounds() {
        let hi = to_score(100.0, 0.5, 38.0);
        let lo = to_score(-100.0, 0.5, 38.0);
        assert!((hi - 88.0).abs() < 1e-9);
        assert!((lo - 12.0).abs() < 1e-9);
        // A gain above 49 would overshoot; the clamp holds the range.
        assert_eq!(to_score(100.0, 0.5, 60.0), MAX_SCORE);
        assert_eq!(to_score(-100.0, 0.5, 60.0), MIN_SCORE);
    }

    #[test]
    fn score_is_monotone() {
        let mut last = 0.0;
        for i in -20..=20 {
            let s = to_score(i as f64 * 0.1, 0.5, 38.0);
            assert!(s >= last);
            last = s;
        }
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_score(71.5), 72);
        assert_eq!(round_score(71.49), 71);
        assert_eq!(round_score(99.0), 99);
    }

    #[test]
    fn blend_weights_max_and_mean() {
        let c = [
            StyleCandidate { name: "a", raw: 0.2 },
            StyleCandidate { name: "b", raw: 0.8 },
            StyleCandidate { name: "c", raw: 0.5 },
        ];
        let b = blend(&c);
        assert_eq!(b.dominant, Some("b"));
        assert!((b.raw - (0.7 * 0.8 + 0.3 * 0.5)).abs() < 1e-12);
    }

    #[test]
    fn blend_tie_picks_first() {
        let c = [
            StyleCandidate { name: "first", raw: 0.0 },
            StyleCandidate { name: "second", raw: 0.0 },
        ];
        assert_eq!(blend(&c).dominant, Some("first"));
    }

    #[test]
    fn unstyled_metric_passes_raw_through() {
        let b = blend(&[StyleCandidate { name: "only", raw: 0.37 }]);
        assert_eq!(b.raw, 0.37);
        assert_eq!(b.dominant, None);
    }

    #[test]
    fn patterns_take_two_largest() {
        let rules = [
            rule(true, 3.0, "small"),
            rule(true, -7.0, "big negative"),
            rule(false, 9.0, "not firing"),
            rule(true, 5.0, "medium"),
        ];
        let out = apply_patterns(60.0, &rules);
        assert_eq!(out.fired, vec!["big negative", "medium"]);
        assert_eq!(out.bonus, -2.0);
        assert_eq!(out.final_score, 58.0);
    }

    #[test]
    fn pattern_ties_keep_declaration_order() {
        let rules = [rule(true, 6.0, "first"), rule(true, -6.0, "second"), rule(true, 6.0, "third")];
        let out = apply_patterns(50.0, &rules);
        assert_eq!(out.fired, vec!["first", "second"]);
        assert_eq!(out.bonus, 0.0);
    }

    #[test]
    fn bonus_is_clamped_into_range() {
        let out = apply_patterns(97.0, &[rule(true, 8.0, "up")]);
        assert_eq!(out.final_score, MAX_SCORE);
        assert_eq!(out.bonus, 8.0);
        let none = apply_patterns(50.0, &[]);
        assert!(none.fired.is_empty());
        assert_eq!(none.bonus, 0.0);
    }

    #[test]
    fn spike_weight_shifts_every_style() {
        let features = crate::features::Features::derive(
            &InputProfile::new()
                .with_ten_gods([1.0, 0.0, 0.0, 0.0, 0.0])
                .with_elements([1.0, 1.0, 1.0, 1.0, 1.0]),
        );
        let m = metric(1).unwrap();
        let plain = compose(m, &features, 0.0);
        let spiked = compose(m, &features, 0.5);
        for (p, s) in plain.iter().zip(&spiked) {
            assert!((s.raw - p.raw - 0.5 * features.spike).abs() < 1e-12);
        }
    }
}
