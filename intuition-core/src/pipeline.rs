use serde_json::Value;

use crate::aggregate::{Composite, OperandSource};
use crate::catalogue::{all_metrics, Category, MetricSpec, OVERLOAD_RISK_METRIC};
use crate::classify::Ladder;
use crate::features::Features;
use crate::generation::{ClassicGeneration, Generation};
use crate::profile::InputProfile;
use crate::report::{
    CategoryAverages, DerivedSummary, Diagnostic, DiagnosticKind, OverallResults, Rating, Report,
    SubMetricResult,
};
use crate::scoring::{apply_patterns, blend, compose, evaluate_patterns, round_score, to_score};

/// Runs the full scoring pipeline for one generation.
pub struct Engine {
    generation: Box<dyn Generation>,
}

impl Engine {
    /// Construct with an explicit generation.
    ///
    /// Production code that loads a generation config (via
    /// [`crate::generation::ConfiguredGeneration`]) and tests that need
    /// specific constants go through here.
    pub fn with_generation(generation: Box<dyn Generation>) -> Self {
        Self { generation }
    }

    /// Construct with the canonical generation.
    pub fn with_defaults() -> Self {
        Self::with_generation(Box::new(ClassicGeneration))
    }

    pub fn generation(&self) -> &dyn Generation {
        self.generation.as_ref()
    }

    /// Parse a loosely typed JSON profile and score it.
    pub fn run_value(&self, value: &Value) -> anyhow::Result<Report> {
        let profile = InputProfile::from_value(value)?;
        Ok(self.run(&profile))
    }

    pub fn run(&self, profile: &InputProfile) -> Report {
        let warnings = diagnose(profile);
        for w in &warnings {
            log::warn!("{}", w.message);
        }

        let features = Features::derive(profile);
        let ladder = self.generation.ladder();

        let subs: Vec<SubMetricResult> = all_metrics()
            .iter()
            .map(|m| self.score_metric(m, &features, ladder))
            .collect();

        let sheet = ScoreSheet::new(self.generation.as_ref(), &subs);
        let rate = |v: f64| rating(ladder, v);

        let categories = CategoryAverages {
            insight: rate(sheet.category_average(Category::Insight)),
            timing: rate(sheet.category_average(Category::Timing)),
            sensitivity: rate(sheet.category_average(Category::Sensitivity)),
            premonition: rate(sheet.category_average(Category::Premonition)),
        };

        // Composites are reported and graded on the rounded value.
        let composite = |kind: Composite| {
            let value = self
                .generation
                .composites()
                .iter()
                .find(|c| c.kind == kind)
                .map(|c| c.evaluate(&sheet))
                .unwrap_or(0.0);
            rate(f64::from(round_score(value)))
        };
        let overall = OverallResults {
            business: composite(Composite::Business),
            affinity: composite(Composite::Affinity),
            premonition_dream: composite(Composite::PremonitionDream),
            risk_avoidance: composite(Composite::RiskAvoidance),
        };

        log::debug!(
            "scored profile with {}: overload risk {}, business {}",
            self.generation.name(),
            sheet.overload_risk,
            overall.business.score,
        );

        Report {
            generation: self.generation.name().to_string(),
            overload_risk: round_score(sheet.overload_risk),
            subs,
            categories,
            overall,
            derived: DerivedSummary {
                noise: features.noise,
                connect: features.connect,
                spike: features.spike,
                ten_god_dominance: features.ten_gods.dominance(),
                element_dominance: features.elements.dominance(),
                ten_god_entropy: features.ten_gods.entropy(),
                element_entropy: features.elements.entropy(),
                strength: features.strength,
            },
            warnings,
        }
    }

    fn score_metric(&self, metric: &MetricSpec, features: &Features, ladder: Ladder) -> SubMetricResult {
        let spike_weight = self.generation.spike_weight(metric.group);
        let candidates = compose(metric, features, spike_weight);
        let blended = blend(&candidates);

        let base = to_score(blended.raw, metric.group.scale(), self.generation.gain());
        let outcome = apply_patterns(base, &evaluate_patterns(metric, features));

        if !outcome.fired.is_empty() {
            log::trace!("metric {} fired {:?} ({:+})", metric.id, outcome.fired, outcome.bonus);
        }

        let band = ladder.classify(outcome.final_score);
        SubMetricResult {
            id: metric.id,
            name: metric.name.to_string(),
            group: metric.group,
            dominant_style: blended.dominant.map(str::to_string),
            base_score: round_score(base),
            bonus: outcome.bonus,
            fired_patterns: outcome.fired.iter().map(|s| s.to_string()).collect(),
            final_score: round_score(outcome.final_score),
            grade: band.grade.to_string(),
            percentile_band: band.percentile.to_string(),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn rating(ladder: Ladder, value: f64) -> Rating {
    let band = ladder.classify(value);
    Rating {
        score: round_score(value),
        grade: band.grade.to_string(),
        percentile_band: band.percentile.to_string(),
    }
}

fn diagnose(profile: &InputProfile) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    if profile.ten_gods.is_none() {
        out.push(Diagnostic::new(
            DiagnosticKind::MissingTenGods,
            "ten-god vector missing; using zeros",
        ));
    }
    if profile.elements.is_none() {
        out.push(Diagnostic::new(
            DiagnosticKind::MissingElements,
            "element vector missing; using zeros",
        ));
    }
    if profile.strength_was_defaulted() {
        out.push(Diagnostic::new(
            DiagnosticKind::StrengthDefaulted,
            format!("strength unusable; using {}", profile.effective_strength()),
        ));
    }
    out
}

/// Rounded sub scores as read by the aggregation formulas.
struct ScoreSheet {
    scores: [f64; 20],
    averages: [f64; 4],
    overload_risk: f64,
}

impl ScoreSheet {
    fn new(generation: &dyn Generation, subs: &[SubMetricResult]) -> Self {
        let mut scores = [0.0; 20];
        for s in subs {
            if let Some(slot) = scores.get_mut(usize::from(s.id).wrapping_sub(1)) {
                *slot = f64::from(s.final_score);
            }
        }

        let policy = generation.aggregation();
        let averages = Category::ALL.map(|category| {
            let members: Vec<f64> = subs
                .iter()
                .filter(|s| s.group.category() == Some(category))
                .map(|s| f64::from(s.final_score))
                .collect();
            policy.reduce(&members)
        });

        let overload_risk = scores[usize::from(OVERLOAD_RISK_METRIC) - 1];
        Self {
            scores,
            averages,
            overload_risk,
        }
    }
}

impl OperandSource for ScoreSheet {
    fn category_average(&self, category: Category) -> f64 {
        let idx = Category::ALL.iter().position(|c| *c == category).unwrap_or(0);
        self.averages[idx]
    }

    fn metric_score(&self, id: u8) -> f64 {
        self.scores
            .get(usize::from(id).wrapping_sub(1))
            .copied()
            .unwrap_or(0.0)
    }

    fn overload_risk(&self) -> f64 {
        self.overload_risk
    }
}
