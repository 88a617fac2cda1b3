//! Category averages and composite ("overall") scores.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalogue::Category;

/// How a category reduces its member scores to one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Arithmetic mean.
    Mean,
    /// `0.6 · mean(top two) + 0.4 · mean(all)`, so one or two standout
    /// metrics are not flattened by the rest of the group.
    StrengthPreserving,
}

impl AggregationPolicy {
    pub fn reduce(self, scores: &[f64]) -> f64 {
        match self {
            AggregationPolicy::Mean => mean(scores),
            AggregationPolicy::StrengthPreserving => {
                let mut sorted = scores.to_vec();
                sorted.sort_by(|a, b| b.total_cmp(a));
                sorted.truncate(2);
                0.6 * mean(&sorted) + 0.4 * mean(scores)
            }
        }
    }
}

impl fmt::Display for AggregationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AggregationPolicy::Mean               => "mean",
            AggregationPolicy::StrengthPreserving => "strength_preserving",
        })
    }
}

fn mean(scores: &[f64]) -> f64 {
    scores.iter().fold(0.0, |acc, s| acc + s) / scores.len().max(1) as f64
}

/// The four composite indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Composite {
    /// 비즈니스촉
    Business,
    /// 연애호감촉
    Affinity,
    /// 예지몽
    PremonitionDream,
    /// 위기회피
    RiskAvoidance,
}

impl Composite {
    pub const ALL: [Composite; 4] = [
        Composite::Business,
        Composite::Affinity,
        Composite::PremonitionDream,
        Composite::RiskAvoidance,
    ];

    /// Display label used by the rendering layer.
    pub fn label(self) -> &'static str {
        match self {
            Composite::Business         => "비즈니스촉",
            Composite::Affinity         => "연애호감촉",
            Composite::PremonitionDream => "예지몽",
            Composite::RiskAvoidance    => "위기회피",
        }
    }
}

impl fmt::Display for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Something a composite formula can weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    /// Unrounded category average.
    Category(Category),
    /// Rounded final score of a sub-metric, by id.
    Metric(u8),
    /// `100 − overload risk`.
    InverseRisk,
}

/// A composite as a weighted sum, accumulated in declaration order.
#[derive(Debug, Clone)]
pub struct CompositeSpec {
    pub kind: Composite,
    pub terms: &'static [(Operand, f64)],
}

/// Canonical composite weights.
pub static CANONICAL_COMPOSITES: &[CompositeSpec] = &[
    CompositeSpec {
        kind: Composite::Business,
        terms: &[
            (Operand::Category(Category::Timing), 0.45),
            (Operand::Category(Category::Insight), 0.35),
            (Operand::InverseRisk, 0.20),
        ],
    },
    CompositeSpec {
        kind: Composite::Affinity,
        terms: &[
            (Operand::Metric(11), 0.55),
            (Operand::Metric(12), 0.25),
            (Operand::Metric(13), 0.20),
        ],
    },
    CompositeSpec {
        kind: Composite::PremonitionDream,
        terms: &[
            (Operand::Metric(19), 0.55),
            (Operand::Metric(16), 0.25),
            (Operand::Metric(20), 0.20),
        ],
    },
    CompositeSpec {
        kind: Composite::RiskAvoidance,
        terms: &[
            (Operand::Metric(3), 0.50),
            (Operand::Metric(7), 0.20),
            (Operand::InverseRisk, 0.30),
        ],
    },
];

/// Values a composite formula reads.
pub trait OperandSource {
    fn category_average(&self, category: Category) -> f64;
    fn metric_score(&self, id: u8) -> f64;
    fn overload_risk(&self) -> f64;
}

impl CompositeSpec {
    /// Weighted sum before rounding.
    pub fn evaluate(&self, source: &dyn OperandSource) -> f64 {
        self.terms.iter().fold(0.0, |acc, (operand, weight)| {
            let v = match operand {
                Operand::Category(c) => source.category_average(*c),
                Operand::Metric(id) => source.metric_score(*id),
                Operand::InverseRisk => 100.0 - source.overload_risk(),
            };
            acc + weight * v
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl OperandSource for Fixed {
        fn category_average(&self, category: Category) -> f64 {
            match category {
                Category::Insight => 80.0,
                Category::Timing => 70.0,
                _ => 50.0,
            }
        }
        fn metric_score(&self, id: u8) -> f64 {
            id as f64 * 4.0
        }
        fn overload_risk(&self) -> f64 {
            60.0
        }
    }

    #[test]
    fn mean_policy() {
        assert_eq!(AggregationPolicy::Mean.reduce(&[70.0, 80.0, 90.0]), 80.0);
        assert_eq!(AggregationPolicy::Mean.reduce(&[]), 0.0);
    }

    #[test]
    fn strength_preserving_policy_favours_the_top_two() {
        let scores = [90.0, 80.0, 50.0, 50.0, 50.0];
        let v = AggregationPolicy::StrengthPreserving.reduce(&scores);
        // 0.6·85 + 0.4·64
        assert!((v - 76.6).abs() < 1e-9, "{v}");
        assert!(v > AggregationPolicy::Mean.reduce(&scores));
    }

    #[test]
    fn strength_preserving_with_one_score() {
        let v = AggregationPolicy::StrengthPreserving.reduce(&[60.0]);
        assert!((v - 60.0).abs() < 1e-9);
    }

    #[test]
    fn business_composite_uses_inverse_risk() {
        let business = &CANONICAL_COMPOSITES[0];
        assert_eq!(business.kind, Composite::Business);
        // 0.45·70 + 0.35·80 + 0.20·40
        assert!((business.evaluate(&Fixed) - 67.5).abs() < 1e-9);
    }

    #[test]
    fn metric_composites_read_sub_scores() {
        let affinity = &CANONICAL_COMPOSITES[1];
        // 0.55·44 + 0.25·48 + 0.20·52
        assert!((affinity.evaluate(&Fixed) - 46.6).abs() < 1e-9);
    }

    #[test]
    fn canonical_weights_sum_to_one() {
        for spec in CANONICAL_COMPOSITES {
            let total: f64 = spec.terms.iter().map(|(_, w)| w).sum();
            assert!((total - 1.0).abs() < 1e-9, "{:?}", spec.kind);
        }
        assert_eq!(CANONICAL_COMPOSITES.len(), Composite::ALL.len());
    }
}
