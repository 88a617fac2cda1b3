//! Static catalogue of the 20 sub-metrics.
//!
//! Each [`MetricSpec`] carries its display name, its group (which fixes the
//! score scale), the per-style linear formulas and the two labelled pattern
//! rules.  The coefficients are data, not derivable from any rule, and are
//! kept in exactly the order the terms are accumulated.
//!
//! Use [`ALL_METRICS`] to render documentation or look up a metric by id.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::features::{Feature, Features};
use crate::profile::{Element, Interaction, TenGod};

// ---------------------------------------------------------------------------
// Groups and categories
// ---------------------------------------------------------------------------

/// Reporting category.  Each category owns a fixed set of metrics and yields
/// one average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Insight,
    Timing,
    Sensitivity,
    Premonition,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Insight,
        Category::Timing,
        Category::Sensitivity,
        Category::Premonition,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Insight     => "Insight",
            Category::Timing      => "Timing",
            Category::Sensitivity => "Sensitivity",
            Category::Premonition => "Premonition",
        })
    }
}

/// Formula group of a metric.  The group fixes the tanh scale and the
/// category the metric averages into.
///
/// [`MetricGroup::OverloadRisk`] sits with the sensitivity metrics in the
/// catalogue but is read as a risk indicator and never averaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricGroup {
    Insight,
    Timing,
    Sensitivity,
    OverloadRisk,
    Premonition,
}

impl MetricGroup {
    pub const ALL: [MetricGroup; 5] = [
        MetricGroup::Insight,
        MetricGroup::Timing,
        MetricGroup::Sensitivity,
        MetricGroup::OverloadRisk,
        MetricGroup::Premonition,
    ];

    /// Divisor applied to the blended raw value before `tanh`.
    pub fn scale(self) -> f64 {
        match self {
            MetricGroup::Insight | MetricGroup::Sensitivity => 0.45,
            MetricGroup::Timing | MetricGroup::Premonition  => 0.50,
            MetricGroup::OverloadRisk                       => 0.55,
        }
    }

    pub fn category(self) -> Option<Category> {
        match self {
            MetricGroup::Insight      => Some(Category::Insight),
            MetricGroup::Timing       => Some(Category::Timing),
            MetricGroup::Sensitivity  => Some(Category::Sensitivity),
            MetricGroup::Premonition  => Some(Category::Premonition),
            MetricGroup::OverloadRisk => None,
        }
    }
}

impl fmt::Display for MetricGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MetricGroup::Insight      => "insight",
            MetricGroup::Timing       => "timing",
            MetricGroup::Sensitivity  => "sensitivity",
            MetricGroup::OverloadRisk => "overload_risk",
            MetricGroup::Premonition  => "premonition",
        })
    }
}

// ---------------------------------------------------------------------------
// Specs
// ---------------------------------------------------------------------------

/// One named style: a linear combination of features.
#[derive(Debug, Clone)]
pub struct StyleSpec {
    pub name: &'static str,
    /// `(feature, coefficient)` pairs, accumulated left to right.
    pub terms: &'static [(Feature, f64)],
}

impl StyleSpec {
    pub fn raw(&self, features: &Features) -> f64 {
        self.terms
            .iter()
            .fold(0.0, |acc, (f, c)| acc + c * features.value(*f))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `lhs >= threshold`
    AtLeast,
    /// `lhs < threshold`
    Below,
}

/// One clause of a pattern condition: the sum of `features` compared against
/// `threshold`.
#[derive(Debug, Clone)]
pub struct Clause {
    pub features: &'static [Feature],
    pub comparison: Comparison,
    pub threshold: f64,
}

impl Clause {
    pub fn holds(&self, features: &Features) -> bool {
        let lhs = features.sum(self.features);
        match self.comparison {
            Comparison::AtLeast => lhs >= self.threshold,
            Comparison::Below   => lhs < self.threshold,
        }
    }
}

/// A labelled conditional score adjustment.  The condition is the conjunction
/// of all clauses.
#[derive(Debug, Clone)]
pub struct PatternSpec {
    pub label: &'static str,
    pub adjustment: f64,
    pub clauses: &'static [Clause],
}

impl PatternSpec {
    pub fn holds(&self, features: &Features) -> bool {
        self.clauses.iter().all(|c| c.holds(features))
    }
}

/// A sub-metric definition.
#[derive(Debug, Clone)]
pub struct MetricSpec {
    /// 1-based position in the report.
    pub id: u8,
    pub name: &'static str,
    pub group: MetricGroup,
    /// One style means the metric is unstyled.
    pub styles: &'static [StyleSpec],
    pub patterns: &'static [PatternSpec],
}

impl MetricSpec {
    pub fn is_styled(&self) -> bool {
        self.styles.len() > 1
    }
}

/// Look up a metric by its 1-based id.
pub fn metric(id: u8) -> Option<&'static MetricSpec> {
    ALL_METRICS.iter().find(|m| m.id == id)
}

/// Every metric, in report order.
pub fn all_metrics() -> &'static [MetricSpec] {
    ALL_METRICS
}

/// Id of the metric read as the overload-risk indicator.
pub const OVERLOAD_RISK_METRIC: u8 = 15;

// ---------------------------------------------------------------------------
// Table shorthands
// ---------------------------------------------------------------------------

const PEER: Feature = Feature::TenGod(TenGod::Peer);
const OUTPUT: Feature = Feature::TenGod(TenGod::Output);
const WEALTH: Feature = Feature::TenGod(TenGod::Wealth);
const AUTHORITY: Feature = Feature::TenGod(TenGod::Authority);
const RESOURCE: Feature = Feature::TenGod(TenGod::Resource);

const WOOD: Feature = Feature::Element(Element::Wood);
const FIRE: Feature = Feature::Element(Element::Fire);
const EARTH: Feature = Feature::Element(Element::Earth);
const METAL: Feature = Feature::Element(Element::Metal);
const WATER: Feature = Feature::Element(Element::Water);

const NOISE: Feature = Feature::Noise;
const CONNECT: Feature = Feature::Connect;
const STRENGTH: Feature = Feature::Strength;
const CLASH: Feature = Feature::Interaction(Interaction::Clash);
const PUNISHMENT: Feature = Feature::Interaction(Interaction::Punishment);

macro_rules! style {
    ($name:literal: $($coef:literal * $f:ident),+ $(,)?) => {
        StyleSpec {
            name: $name,
            terms: &[$(($f, $coef)),+],
        }
    };
}

macro_rules! when {
    (sum($($f:ident),+) >= $t:literal) => {
        Clause { features: &[$($f),+], comparison: Comparison::AtLeast, threshold: $t }
    };
    ($f:ident >= $t:literal) => {
        Clause { features: &[$f], comparison: Comparison::AtLeast, threshold: $t }
    };
    ($f:ident < $t:literal) => {
        Clause { features: &[$f], comparison: Comparison::Below, threshold: $t }
    };
}

macro_rules! rule {
    ($label:literal, $adj:literal, [$($clause:expr),+ $(,)?]) => {
        PatternSpec {
            label: $label,
            adjustment: $adj,
            clauses: &[$($clause),+],
        }
    };
}

// ---------------------------------------------------------------------------
// ALL_METRICS
// ---------------------------------------------------------------------------

pub static ALL_METRICS: &[MetricSpec] = &[
    // ── insight ──────────────────────────────────────────────────────────
    MetricSpec {
        id: 1,
        name: "구조 파악력",
        group: MetricGroup::Insight,
        styles: &[
            style!("개념형": 1.55 * RESOURCE, 0.95 * OUTPUT, -0.10 * NOISE),
            style!("판읽기형": 1.35 * AUTHORITY, 0.70 * EARTH, 0.12 * CONNECT, -0.16 * NOISE),
            style!("직감형": 1.05 * WATER, 0.70 * RESOURCE, 0.05 * CONNECT, -0.20 * NOISE),
        ],
        patterns: &[
            rule!("인성+관성 강함", 6.0, [when!(RESOURCE >= 0.22), when!(AUTHORITY >= 0.18)]),
            rule!("소음 과다+인성 부족", -6.0, [when!(NOISE >= 2.0), when!(RESOURCE < 0.14)]),
        ],
    },
    MetricSpec {
        id: 2,
        name: "미세신호 감지",
        group: MetricGroup::Insight,
        styles: &[
            style!("감각형": 1.15 * WATER, 0.80 * RESOURCE, 0.05 * CONNECT, -0.14 * NOISE),
            style!("관찰·표현형": 1.10 * OUTPUT, 0.85 * RESOURCE, -0.10 * NOISE),
            style!("교류형": 0.95 * WOOD, 0.75 * WATER, 0.40 * AUTHORITY, -0.12 * NOISE),
        ],
        patterns: &[
            rule!("수+인성 조화", 5.0, [when!(WATER >= 0.22), when!(RESOURCE >= 0.18)]),
            rule!("화 과다+식상 부족", -4.0, [when!(FIRE >= 0.24), when!(OUTPUT < 0.12)]),
        ],
    },
    MetricSpec {
        id: 3,
        name: "리스크 레이더",
        group: MetricGroup::Insight,
        styles: &[
            style!("구조·리스크형": 1.45 * AUTHORITY, 0.75 * METAL, 0.10 * CONNECT, -0.15 * NOISE),
            style!("감지형": 1.10 * WATER, 1.05 * AUTHORITY, 0.05 * CONNECT, -0.18 * NOISE),
            style!("신중형": 1.05 * EARTH, 1.10 * AUTHORITY, 0.30 * RESOURCE, -0.12 * NOISE),
        ],
        patterns: &[
            rule!("관성+충형 경계", 6.0, [when!(AUTHORITY >= 0.20), when!(sum(CLASH, PUNISHMENT) >= 2.0)]),
            rule!("재성 과다+관성 부족", -6.0, [when!(WEALTH >= 0.25), when!(AUTHORITY < 0.12)]),
        ],
    },
    MetricSpec {
        id: 4,
        name: "판단 정밀도",
        group: MetricGroup::Insight,
        styles: &[
            style!("정밀·분석형": 1.25 * OUTPUT, 0.95 * RESOURCE, -0.10 * NOISE),
            style!("규칙·판단형": 1.20 * AUTHORITY, 0.70 * EARTH, 0.06 * CONNECT, -0.12 * NOISE),
            style!("통합형": 1.00 * RESOURCE, 0.85 * AUTHORITY, 0.65 * OUTPUT, 0.03 * CONNECT, -0.10 * NOISE),
        ],
        patterns: &[
            rule!("금+관성 정밀", 5.0, [when!(METAL >= 0.20), when!(AUTHORITY >= 0.18)]),
            rule!("소음 과다", -5.0, [when!(NOISE >= 2.2)]),
        ],
    },
    MetricSpec {
        id: 5,
        name: "전략 설계력",
        group: MetricGroup::Insight,
        styles: &[
            style!("설계·개념형": 1.20 * RESOURCE, 0.85 * AUTHORITY, 0.55 * OUTPUT, 0.06 * CONNECT, -0.10 * NOISE),
            style!("판짜기형": 1.30 * AUTHORITY, 0.85 * WOOD, 0.10 * CONNECT, -0.14 * NOISE),
            style!("자원배치형": 1.15 * WEALTH, 0.95 * AUTHORITY, 0.45 * OUTPUT, -0.10 * NOISE),
        ],
        patterns: &[
            rule!("인성+식상+관성 균형", 7.0, [when!(RESOURCE >= 0.22), when!(OUTPUT >= 0.16), when!(AUTHORITY >= 0.16)]),
            rule!("비겁 과다+인성 부족", -6.0, [when!(PEER >= 0.28), when!(RESOURCE < 0.14)]),
        ],
    },
    // ── timing ───────────────────────────────────────────────────────────
    MetricSpec {
        id: 6,
        name: "진입 타이밍",
        group: MetricGroup::Timing,
        styles: &[
            style!("실험·돌파형": 1.25 * OUTPUT, 1.05 * PEER, 0.05 * CONNECT, -0.14 * NOISE),
            style!("기회·보상형": 1.20 * WEALTH, 0.75 * OUTPUT, 0.10 * CONNECT, -0.10 * NOISE),
            style!("신중·확신형": 1.10 * AUTHORITY, 0.75 * RESOURCE, 0.05 * CONNECT, -0.16 * NOISE),
        ],
        patterns: &[
            rule!("재성+식상 조화", 6.0, [when!(WEALTH >= 0.22), when!(OUTPUT >= 0.16)]),
            rule!("신강+비겁 과다", -6.0, [when!(STRENGTH >= 70.0), when!(PEER >= 0.26)]),
        ],
    },
    MetricSpec {
        id: 7,
        name: "회수/정리 타이밍",
        group: MetricGroup::Timing,
        styles: &[
            style!("규칙·정리형": 1.55 * AUTHORITY, 0.75 * METAL, 0.06 * CONNECT, -0.14 * NOISE),
            style!("수익·회수형": 1.20 * WEALTH, 0.85 * METAL, 0.45 * OUTPUT, -0.10 * NOISE),
            style!("촉·회피형": 1.05 * WATER, 1.10 * AUTHORITY, -0.18 * NOISE),
        ],
        patterns: &[
            rule!("금+토 안정", 5.0, [when!(METAL >= 0.22), when!(EARTH >= 0.20)]),
            rule!("화 과다+관성 부족", -5.0, [when!(FIRE >= 0.24), when!(AUTHORITY < 0.14)]),
        ],
    },
    MetricSpec {
        id: 8,
        name: "기회 포착력",
        group: MetricGroup::Timing,
        styles: &[
            style!("돈·리워드형": 1.35 * WEALTH, 0.75 * OUTPUT, 0.06 * CONNECT, -0.10 * NOISE),
            style!("네트워크형": 1.10 * PEER, 0.85 * WOOD, 0.10 * CONNECT, -0.12 * NOISE),
            style!("패턴형": 1.05 * RESOURCE, 0.95 * WEALTH, -0.10 * NOISE),
        ],
        patterns: &[
            rule!("재성 강함", 6.0, [when!(WEALTH >= 0.26)]),
            rule!("소음 과다+재성 부족", -4.0, [when!(NOISE >= 2.2), when!(WEALTH < 0.16)]),
        ],
    },
    MetricSpec {
        id: 9,
        name: "운 수용력",
        group: MetricGroup::Timing,
        styles: &[
            style!("흐름·수용형": 1.25 * WOOD, 0.90 * WATER, 0.12 * CONNECT, -0.12 * NOISE),
            style!("추진·승차형": 1.15 * PEER, 0.75 * OUTPUT, 0.05 * CONNECT, -0.14 * NOISE),
            style!("신념·정렬형": 1.15 * RESOURCE, 0.75 * FIRE, 0.05 * CONNECT, -0.10 * NOISE),
        ],
        patterns: &[
            rule!("식상+비겁 균형", 6.0, [when!(OUTPUT >= 0.18), when!(PEER >= 0.18)]),
            rule!("인성 과다+식상 부족", -6.0, [when!(RESOURCE >= 0.30), when!(OUTPUT < 0.12)]),
        ],
    },
    MetricSpec {
        id: 10,
        name: "성과 전환",
        group: MetricGroup::Timing,
        styles: &[
            style!("실행·전환형": 1.20 * AUTHORITY, 1.00 * WEALTH, 0.05 * CONNECT, -0.12 * NOISE),
            style!("제작·성과형": 1.25 * OUTPUT, 0.95 * WEALTH, 0.05 * CONNECT, -0.10 * NOISE),
            style!("시스템형": 1.10 * RESOURCE, 1.00 * AUTHORITY, 0.05 * CONNECT, -0.12 * NOISE),
        ],
        patterns: &[
            rule!("식상+관성 조화", 7.0, [when!(OUTPUT >= 0.20), when!(AUTHORITY >= 0.16)]),
            rule!("수 과다+토 부족", -5.0, [when!(WATER >= 0.26), when!(EARTH < 0.14)]),
        ],
    },
    // ── sensitivity ──────────────────────────────────────────────────────
    MetricSpec {
        id: 11,
        name: "호감/거리감 감지",
        group: MetricGroup::Sensitivity,
        styles: &[
            style!("분위기·거리형": 1.25 * WATER, 1.05 * WOOD, 0.05 * CONNECT, -0.10 * NOISE),
            style!("공감·배려형": 1.20 * RESOURCE, 0.85 * WATER, 0.08 * CONNECT, -0.12 * NOISE),
            style!("관계·레이더형": 1.05 * AUTHORITY, 0.85 * WOOD, 0.04 * CONNECT, -0.12 * NOISE),
        ],
        patterns: &[
            rule!("수+목 조화", 6.0, [when!(WATER >= 0.22), when!(WOOD >= 0.20)]),
            rule!("금 과다+수 부족", -4.0, [when!(METAL >= 0.26), when!(WATER < 0.14)]),
        ],
    },
    MetricSpec {
        id: 12,
        name: "분위기 흡수력",
        group: MetricGroup::Sensitivity,
        styles: &[
            style!("흡수형": 1.35 * WATER, 0.65 * RESOURCE, 0.05 * CONNECT, -0.12 * NOISE),
            style!("동조형": 1.15 * RESOURCE, 0.85 * WOOD, 0.05 * CONNECT, -0.10 * NOISE),
            style!("공간·기류형": 1.10 * WATER, 0.75 * WOOD, 0.10 * CONNECT, -0.14 * NOISE),
        ],
        patterns: &[
            rule!("수 강함", 6.0, [when!(WATER >= 0.26)]),
            rule!("토 과다+수 부족", -5.0, [when!(EARTH >= 0.30), when!(WATER < 0.14)]),
        ],
    },
    MetricSpec {
        id: 13,
        name: "공감/정서 동조",
        group: MetricGroup::Sensitivity,
        styles: &[
            style!("정서 공감형": 1.45 * RESOURCE, 0.65 * WATER, 0.05 * CONNECT, -0.12 * NOISE),
            style!("따뜻함·치유형": 1.15 * FIRE, 1.05 * RESOURCE, 0.05 * CONNECT, -0.10 * NOISE),
            style!("미러링형": 1.10 * WATER, 0.80 * WOOD, 0.40 * RESOURCE, -0.12 * NOISE),
        ],
        patterns: &[
            rule!("인성+수목 조화", 6.0, [when!(RESOURCE >= 0.24), when!(sum(WOOD, WATER) >= 0.40)]),
            rule!("비겁 과다+인성 부족", -6.0, [when!(PEER >= 0.30), when!(RESOURCE < 0.14)]),
        ],
    },
    MetricSpec {
        id: 14,
        name: "관계 유지력",
        group: MetricGroup::Sensitivity,
        styles: &[
            style!("책임·유지형": 1.25 * AUTHORITY, 0.90 * RESOURCE, 0.05 * CONNECT, -0.14 * NOISE),
            style!("유대·연결형": 1.15 * PEER, 0.80 * WOOD, 0.12 * CONNECT, -0.12 * NOISE),
            style!("이해·조율형": 1.25 * RESOURCE, 0.60 * OUTPUT, 0.05 * CONNECT, -0.10 * NOISE),
        ],
        patterns: &[
            rule!("토+관성 안정", 6.0, [when!(EARTH >= 0.22), when!(AUTHORITY >= 0.18)]),
            rule!("소음 과다", -6.0, [when!(NOISE >= 2.3)]),
        ],
    },
    MetricSpec {
        id: 15,
        name: "감응 과부하 위험",
        group: MetricGroup::OverloadRisk,
        styles: &[
            style!("수·인성 과민": 1.25 * WATER, 0.85 * RESOURCE, 0.60 * NOISE, -0.60 * EARTH),
            style!("변동성 과민": 1.10 * WATER, 0.95 * NOISE, -0.70 * EARTH, -0.25 * METAL),
        ],
        patterns: &[
            rule!("수 과다+토 부족", 8.0, [when!(WATER >= 0.26), when!(EARTH < 0.14)]),
            rule!("토 안정", -6.0, [when!(EARTH >= 0.26)]),
        ],
    },
    // ── premonition ──────────────────────────────────────────────────────
    MetricSpec {
        id: 16,
        name: "예감 적중률",
        group: MetricGroup::Premonition,
        styles: &[
            style!("상징·패턴형": 1.30 * WATER, 1.00 * RESOURCE, 0.10 * CONNECT, -0.14 * NOISE),
            style!("레이다형": 1.25 * AUTHORITY, 0.85 * WATER, 0.05 * CONNECT, -0.16 * NOISE),
            style!("스파크형": 1.05 * WATER, 0.55 * NOISE, 0.20 * CONNECT, -0.18 * NOISE),
        ],
        patterns: &[
            rule!("수+인성 조화", 7.0, [when!(WATER >= 0.24), when!(RESOURCE >= 0.20)]),
            rule!("소음 과다", -6.0, [when!(NOISE >= 2.4)]),
        ],
    },
    MetricSpec {
        id: 17,
        name: "직감 스파크",
        group: MetricGroup::Premonition,
        styles: &[
            style!("창발·제작형": 1.25 * OUTPUT, 0.70 * FIRE, 0.05 * CONNECT, -0.12 * NOISE),
            style!("수감응 스파크": 1.05 * WATER, 1.05 * OUTPUT, -0.14 * NOISE),
            style!("몽환형": 1.15 * WATER, 0.45 * NOISE, -0.55 * EARTH, -0.20 * METAL),
        ],
        patterns: &[
            rule!("식상+수 조화", 6.0, [when!(OUTPUT >= 0.20), when!(WATER >= 0.18)]),
            rule!("토 과다+식상 부족", -4.0, [when!(EARTH >= 0.30), when!(OUTPUT < 0.12)]),
        ],
    },
    MetricSpec {
        id: 18,
        name: "상징 해석력",
        group: MetricGroup::Premonition,
        styles: &[
            style!("해석·개념형": 1.35 * RESOURCE, 0.55 * METAL, 0.05 * CONNECT, -0.12 * NOISE),
            style!("자연·연상형": 1.10 * WOOD, 1.00 * WATER, 0.05 * CONNECT, -0.14 * NOISE),
            style!("규칙·맥락형": 1.05 * AUTHORITY, 0.85 * RESOURCE, 0.05 * CONNECT, -0.12 * NOISE),
        ],
        patterns: &[
            rule!("인성+금 조화", 6.0, [when!(RESOURCE >= 0.24), when!(METAL >= 0.18)]),
            rule!("화 과다+인성 부족", -5.0, [when!(FIRE >= 0.28), when!(RESOURCE < 0.14)]),
        ],
    },
    MetricSpec {
        id: 19,
        name: "예지몽 체질",
        group: MetricGroup::Premonition,
        styles: &[
            style!("예지몽형": 1.45 * WATER, 0.95 * RESOURCE, 0.30 * NOISE, -0.35 * METAL, -0.35 * EARTH),
            style!("상징몽형": 1.25 * RESOURCE, 0.95 * WATER, 0.20 * NOISE, -0.30 * EARTH, -0.30 * METAL),
            style!("정화몽형": 1.20 * WATER, 0.60 * RESOURCE, 0.15 * CONNECT, -0.45 * EARTH),
        ],
        patterns: &[
            rule!("수+인성 강함", 8.0, [when!(WATER >= 0.26), when!(RESOURCE >= 0.22), when!(EARTH < 0.18)]),
            rule!("토 과다", -6.0, [when!(EARTH >= 0.26)]),
        ],
    },
    MetricSpec {
        id: 20,
        name: "신비 체감 민감도",
        group: MetricGroup::Premonition,
        styles: &[
            style!("신비감각형": 1.20 * WATER, 0.90 * RESOURCE, 0.55 * NOISE, 0.20 * CONNECT, -0.50 * EARTH),
            style!("변동·촉형": 1.10 * WATER, 0.95 * NOISE, 0.10 * CONNECT, -0.55 * EARTH),
            style!("상징·몰입형": 1.25 * RESOURCE, 0.85 * WATER, 0.15 * CONNECT, -0.50 * EARTH),
        ],
        patterns: &[
            rule!("소음+수 조화", 7.0, [when!(NOISE >= 2.2), when!(WATER >= 0.22)]),
            rule!("토 과다+수 부족", -6.0, [when!(EARTH >= 0.28), when!(WATER < 0.14)]),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::InputProfile;

    #[test]
    fn ids_are_sequential_and_unique() {
        for (i, m) in ALL_METRICS.iter().enumerate() {
            assert_eq!(m.id as usize, i + 1, "metric {} out of order", m.name);
        }
        assert_eq!(ALL_METRICS.len(), 20);
    }

    #[test]
    fn every_metric_has_two_patterns_and_a_style() {
        for m in ALL_METRICS {
            assert_eq!(m.patterns.len(), 2, "metric {}", m.id);
            assert!(!m.styles.is_empty() && m.styles.len() <= 3, "metric {}", m.id);
        }
    }

    #[test]
    fn group_sizes() {
        let count = |g: MetricGroup| ALL_METRICS.iter().filter(|m| m.group == g).count();
        assert_eq!(count(MetricGroup::Insight), 5);
        assert_eq!(count(MetricGroup::Timing), 5);
        assert_eq!(count(MetricGroup::Sensitivity), 4);
        assert_eq!(count(MetricGroup::OverloadRisk), 1);
        assert_eq!(count(MetricGroup::Premonition), 5);
        assert_eq!(metric(OVERLOAD_RISK_METRIC).map(|m| m.group), Some(MetricGroup::OverloadRisk));
    }

    #[test]
    fn scales_per_group() {
        assert_eq!(MetricGroup::Insight.scale(), 0.45);
        assert_eq!(MetricGroup::Sensitivity.scale(), 0.45);
        assert_eq!(MetricGroup::Timing.scale(), 0.50);
        assert_eq!(MetricGroup::Premonition.scale(), 0.50);
        assert_eq!(MetricGroup::OverloadRisk.scale(), 0.55);
        assert_eq!(MetricGroup::OverloadRisk.category(), None);
    }

    #[test]
    fn style_raw_accumulates_terms() {
        let f = Features::derive(
            &InputProfile::new()
                .with_ten_gods([0.2, 0.2, 0.2, 0.2, 0.2])
                .with_elements([0.2, 0.2, 0.2, 0.2, 0.2]),
        );
        // 1.55·0.2 + 0.95·0.2 − 0.10·0
        let raw = ALL_METRICS[0].styles[0].raw(&f);
        assert!((raw - 0.5).abs() < 1e-12, "{raw}");
    }

    #[test]
    fn summed_clause() {
        let clash_heavy = Features::derive(
            &InputProfile::new()
                .with_interaction(Interaction::Clash, 1.0)
                .with_interaction(Interaction::Punishment, 1.0),
        );
        let c = when!(sum(CLASH, PUNISHMENT) >= 2.0);
        assert!(c.holds(&clash_heavy));
        assert!(!when!(CLASH >= 2.0).holds(&clash_heavy));
        assert!(when!(CLASH < 2.0).holds(&clash_heavy));
    }
}
