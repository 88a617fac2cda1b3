use serde::{Deserialize, Serialize};

use crate::aggregate::Composite;
use crate::catalogue::{Category, MetricGroup};

/// Score plus its grade and percentile-band labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub score: u8,
    pub grade: String,
    pub percentile_band: String,
}

/// The scored result of one sub-metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubMetricResult {
    /// 1-based metric id.
    pub id: u8,
    pub name: String,
    pub group: MetricGroup,
    /// Strongest style for styled metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_style: Option<String>,
    /// Score before pattern bonuses, rounded.
    pub base_score: u8,
    /// Sum of the applied pattern adjustments.
    pub bonus: f64,
    /// Labels of the applied patterns, at most two.
    pub fired_patterns: Vec<String>,
    pub final_score: u8,
    pub grade: String,
    pub percentile_band: String,
}

impl SubMetricResult {
    pub fn rating(&self) -> Rating {
        Rating {
            score: self.final_score,
            grade: self.grade.clone(),
            percentile_band: self.percentile_band.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAverages {
    pub insight: Rating,
    pub timing: Rating,
    pub sensitivity: Rating,
    pub premonition: Rating,
}

impl CategoryAverages {
    pub fn get(&self, category: Category) -> &Rating {
        match category {
            Category::Insight     => &self.insight,
            Category::Timing      => &self.timing,
            Category::Sensitivity => &self.sensitivity,
            Category::Premonition => &self.premonition,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallResults {
    pub business: Rating,
    pub affinity: Rating,
    pub premonition_dream: Rating,
    pub risk_avoidance: Rating,
}

impl OverallResults {
    pub fn get(&self, composite: Composite) -> &Rating {
        match composite {
            Composite::Business         => &self.business,
            Composite::Affinity         => &self.affinity,
            Composite::PremonitionDream => &self.premonition_dream,
            Composite::RiskAvoidance    => &self.risk_avoidance,
        }
    }
}

/// Intermediate state exposed for inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSummary {
    pub noise: f64,
    pub connect: f64,
    pub spike: f64,
    pub ten_god_dominance: f64,
    pub element_dominance: f64,
    pub ten_god_entropy: f64,
    pub element_entropy: f64,
    /// Strength after defaulting.
    pub strength: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingTenGods,
    MissingElements,
    StrengthDefaulted,
}

/// A non-fatal problem found in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Diagnostic {
            kind,
            message: message.into(),
        }
    }
}

/// The full report for one profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Name of the generation that produced the scores.
    pub generation: String,
    /// All 20 sub-metrics in id order.
    pub subs: Vec<SubMetricResult>,
    pub categories: CategoryAverages,
    pub overall: OverallResults,
    /// Final score of the overload-risk sub-metric.
    pub overload_risk: u8,
    pub derived: DerivedSummary,
    #[serde(default)]
    pub warnings: Vec<Diagnostic>,
}

impl Report {
    /// Sub-metric by 1-based id.
    pub fn sub(&self, id: u8) -> Option<&SubMetricResult> {
        self.subs.iter().find(|s| s.id == id)
    }

    pub fn has_warning(&self, kind: DiagnosticKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }
}
