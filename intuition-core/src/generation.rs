//! Formula generations: the versioned constants the engine runs with.
//!
//! The central abstraction is the [`Generation`] trait.  The engine depends
//! only on the trait, so callers choose the constants at construction time and
//! tests can inject their own.
//!
//! # Built-in generations
//! [`ClassicGeneration`] is canonical: gain 38, no spike terms, plain-mean
//! category averages and the five-band ladder.  [`RevisedGeneration`] raises
//! the gain to 42, lets the spike scalar into every formula, keeps the top two
//! scores of a category prominent and labels on the seven-band ladder.
//!
//! # Configuration
//! [`ConfiguredGeneration`] reads a `[generation]` TOML table and falls back to
//! a base generation for anything not overridden.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregationPolicy, CompositeSpec, CANONICAL_COMPOSITES};
use crate::catalogue::MetricGroup;
use crate::classify::Ladder;

// ---------------------------------------------------------------------------
// Generation trait
// ---------------------------------------------------------------------------

/// Seam for the per-generation constants.
pub trait Generation: Send + Sync {
    /// Short name recorded in every report.
    fn name(&self) -> &str;

    /// Amplitude of the `tanh` around 50.
    fn gain(&self) -> f64;

    /// Coefficient of the spike scalar added to every style of a metric in
    /// `group`.  `0.0` keeps spike out of the formulas.
    fn spike_weight(&self, _group: MetricGroup) -> f64 {
        0.0
    }

    fn aggregation(&self) -> AggregationPolicy {
        AggregationPolicy::Mean
    }

    fn ladder(&self) -> Ladder {
        Ladder::FiveBand
    }

    fn composites(&self) -> &'static [CompositeSpec] {
        CANONICAL_COMPOSITES
    }
}

// ---------------------------------------------------------------------------
// Built-ins
// ---------------------------------------------------------------------------

/// The canonical generation.  Reports from it match the reference engine.
pub struct ClassicGeneration;

impl Generation for ClassicGeneration {
    fn name(&self) -> &str {
        "classic"
    }

    fn gain(&self) -> f64 {
        38.0
    }
}

/// The later generation with dispersion terms and the wider ladder.
pub struct RevisedGeneration;

impl RevisedGeneration {
    const SPIKE_WEIGHTS: [(MetricGroup, f64); 5] = [
        (MetricGroup::Insight, 0.10),
        (MetricGroup::Timing, 0.12),
        (MetricGroup::Sensitivity, -0.08),
        (MetricGroup::OverloadRisk, 0.20),
        (MetricGroup::Premonition, 0.15),
    ];
}

impl Generation for RevisedGeneration {
    fn name(&self) -> &str {
        "revised"
    }

    fn gain(&self) -> f64 {
        42.0
    }

    fn spike_weight(&self, group: MetricGroup) -> f64 {
        Self::SPIKE_WEIGHTS
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }

    fn aggregation(&self) -> AggregationPolicy {
        AggregationPolicy::StrengthPreserving
    }

    fn ladder(&self) -> Ladder {
        Ladder::SevenBand
    }
}

/// Named built-in generation, as selected on the command line or in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationKind {
    #[default]
    Classic,
    Revised,
}

impl GenerationKind {
    pub fn build(self) -> Box<dyn Generation> {
        match self {
            GenerationKind::Classic => Box::new(ClassicGeneration),
            GenerationKind::Revised => Box::new(RevisedGeneration),
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GenerationKind::Classic => "classic",
            GenerationKind::Revised => "revised",
        })
    }
}

impl FromStr for GenerationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(GenerationKind::Classic),
            "revised" => Ok(GenerationKind::Revised),
            other => bail!("unknown generation: {other} (expected classic or revised)"),
        }
    }
}

// ---------------------------------------------------------------------------
// TOML config types (private)
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    generation: GenerationSection,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct GenerationSection {
    /// Built-in generation supplying every value not overridden here.
    #[serde(default)]
    base: GenerationKind,
    gain: Option<f64>,
    aggregation: Option<AggregationPolicy>,
    ladder: Option<Ladder>,
    #[serde(default)]
    spike: SpikeSection,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SpikeSection {
    insight: Option<f64>,
    timing: Option<f64>,
    sensitivity: Option<f64>,
    overload_risk: Option<f64>,
    premonition: Option<f64>,
}

impl SpikeSection {
    fn get(&self, group: MetricGroup) -> Option<f64> {
        match group {
            MetricGroup::Insight      => self.insight,
            MetricGroup::Timing       => self.timing,
            MetricGroup::Sensitivity  => self.sensitivity,
            MetricGroup::OverloadRisk => self.overload_risk,
            MetricGroup::Premonition  => self.premonition,
        }
    }
}

// ---------------------------------------------------------------------------
// ConfiguredGeneration
// ---------------------------------------------------------------------------

/// Generation loaded from a `[generation]` TOML table.
///
/// # Config format
///
/// ```toml
/// [generation]
/// base = "classic"                 # or "revised"
/// gain = 40.0
/// aggregation = "strength_preserving"
/// ladder = "seven_band"
///
/// [generation.spike]
/// premonition = 0.15
/// ```
///
/// ```
/// use intuition_core::generation::{ConfiguredGeneration, Generation};
///
/// let g = ConfiguredGeneration::from_toml_str("[generation]\ngain = 40.0\n").unwrap();
/// assert_eq!(g.gain(), 40.0);
/// assert_eq!(g.name(), "configured(classic)");
/// ```
pub struct ConfiguredGeneration {
    base: Box<dyn Generation>,
    name: String,
    section: GenerationSection,
}

impl std::fmt::Debug for ConfiguredGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguredGeneration")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ConfiguredGeneration {
    /// Parse a TOML document.  A document without a `[generation]` table
    /// yields the classic generation unchanged.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let file: ConfigFile = toml::from_str(src).context("invalid generation config")?;
        Self::from_section(file.generation)
    }

    /// Load from an explicit config file path.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Self::from_toml_str(&src).with_context(|| format!("failed to parse {}", path.display()))
    }

    fn from_section(section: GenerationSection) -> anyhow::Result<Self> {
        if let Some(gain) = section.gain {
            if !gain.is_finite() || gain <= 0.0 || gain > 49.0 {
                bail!("gain must be in (0, 49], got {gain}");
            }
        }
        for group in MetricGroup::ALL {
            if let Some(w) = section.spike.get(group) {
                if !w.is_finite() {
                    bail!("spike weight for {group} must be finite");
                }
            }
        }

        let base = section.base.build();
        let name = format!("configured({})", base.name());
        log::debug!("loaded generation config on top of {}", base.name());
        Ok(Self { base, name, section })
    }

    /// Returns `true` if nothing overrides the base generation.
    pub fn is_empty(&self) -> bool {
        self.section.gain.is_none()
            && self.section.aggregation.is_none()
            && self.section.ladder.is_none()
            && MetricGroup::ALL.iter().all(|g| self.section.spike.get(*g).is_none())
    }
}

impl Generation for ConfiguredGeneration {
    fn name(&self) -> &str {
        &self.name
    }

    fn gain(&self) -> f64 {
        self.section.gain.unwrap_or_else(|| self.base.gain())
    }

    fn spike_weight(&self, group: MetricGroup) -> f64 {
        self.section
            .spike
            .get(group)
            .unwrap_or_else(|| self.base.spike_weight(group))
    }

    fn aggregation(&self) -> AggregationPolicy {
        self.section.aggregation.unwrap_or_else(|| self.base.aggregation())
    }

    fn ladder(&self) -> Ladder {
        self.section.ladder.unwrap_or_else(|| self.base.ladder())
    }

    fn composites(&self) -> &'static [CompositeSpec] {
        self.base.composites()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn classic_defaults() {
        let g = ClassicGeneration;
        assert_eq!(g.gain(), 38.0);
        assert_eq!(g.aggregation(), AggregationPolicy::Mean);
        assert_eq!(g.ladder(), Ladder::FiveBand);
        for group in MetricGroup::ALL {
            assert_eq!(g.spike_weight(group), 0.0);
        }
    }

    #[test]
    fn revised_turns_on_dispersion() {
        let g = RevisedGeneration;
        assert_eq!(g.gain(), 42.0);
        assert_eq!(g.aggregation(), AggregationPolicy::StrengthPreserving);
        assert_eq!(g.ladder(), Ladder::SevenBand);
        assert!(MetricGroup::ALL.iter().all(|grp| g.spike_weight(*grp) != 0.0));
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Revised".parse::<GenerationKind>().unwrap(), GenerationKind::Revised);
        assert!("v3".parse::<GenerationKind>().is_err());
        assert_eq!(GenerationKind::Classic.build().name(), "classic");
    }

    #[test]
    fn overrides_fall_back_to_base() {
        let g = ConfiguredGeneration::from_toml_str(
            "[generation]\nbase = \"revised\"\nladder = \"five_band\"\n\n[generation.spike]\ntiming = 0.0\n",
        )
        .unwrap();
        assert_eq!(g.name(), "configured(revised)");
        assert_eq!(g.gain(), 42.0);
        assert_eq!(g.ladder(), Ladder::FiveBand);
        assert_eq!(g.aggregation(), AggregationPolicy::StrengthPreserving);
        assert_eq!(g.spike_weight(MetricGroup::Timing), 0.0);
        assert_eq!(g.spike_weight(MetricGroup::Premonition), 0.15);
        assert!(!g.is_empty());
    }

    #[test]
    fn empty_document_is_classic() {
        let g = ConfiguredGeneration::from_toml_str("").unwrap();
        assert!(g.is_empty());
        assert_eq!(g.gain(), 38.0);
        assert_eq!(g.name(), "configured(classic)");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(ConfiguredGeneration::from_toml_str("[generation]\ngain = -1.0\n").is_err());
        assert!(ConfiguredGeneration::from_toml_str("[generation]\ngain = 80.0\n").is_err());
        assert!(ConfiguredGeneration::from_toml_str("[generation]\nladder = \"ten_band\"\n").is_err());
        assert!(ConfiguredGeneration::from_toml_str("[generation]\nscale = 0.5\n").is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generation.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "[generation]\naggregation = \"strength_preserving\"").unwrap();
        drop(f);

        let g = ConfiguredGeneration::from_file(&path).unwrap();
        assert_eq!(g.aggregation(), AggregationPolicy::StrengthPreserving);
        assert_eq!(g.ladder(), Ladder::FiveBand);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfiguredGeneration::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("cannot read"), "{err}");
    }
}
