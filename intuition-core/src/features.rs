//! Derived feature state: normalized proportions, interaction scalars and
//! dispersion measures.
//!
//! Everything a metric formula or a pattern condition may read is exposed
//! through [`Features::value`], keyed by [`Feature`].

use serde::{Deserialize, Serialize};

use crate::profile::{Element, InputProfile, Interaction, TenGod};

/// Floor applied inside `ln` so zero proportions contribute nothing.
const ENTROPY_EPSILON: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// A five-way proportion vector.
///
/// Either every entry is `0` (degenerate input) or the entries are
/// non-negative and sum to `1` within floating tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Proportions([f64; 5]);

impl Proportions {
    pub fn values(&self) -> &[f64; 5] {
        &self.0
    }

    pub fn get(&self, index: usize) -> f64 {
        self.0[index]
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().fold(0.0, |acc, v| acc + v)
    }

    pub fn is_degenerate(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }

    /// Concentration index: `max − mean`.
    pub fn dominance(&self) -> f64 {
        let max = self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        max - self.sum() / self.0.len() as f64
    }

    /// Shannon entropy in nats.
    pub fn entropy(&self) -> f64 {
        -self
            .0
            .iter()
            .fold(0.0, |acc, p| acc + p * p.max(ENTROPY_EPSILON).ln())
    }
}

/// Turn raw magnitudes into proportions.
///
/// Non-finite entries count as `0`.  A vector that already looks like a
/// proportion vector (sum in `(0.95, 1.05)` and no entry above `1.01`) is
/// returned as-is so repeated normalization does not drift.
pub fn normalize(raw: &[f64; 5]) -> Proportions {
    let coerced = raw.map(|v| if v.is_finite() { v } else { 0.0 });
    let sum = coerced.iter().fold(0.0, |acc, v| acc + v);

    if !sum.is_finite() || sum <= 0.0 {
        return Proportions([0.0; 5]);
    }

    let max = coerced.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if sum > 0.95 && sum < 1.05 && max <= 1.01 {
        return Proportions(coerced);
    }

    Proportions(coerced.map(|v| v / sum))
}

// ---------------------------------------------------------------------------
// Interaction reducer
// ---------------------------------------------------------------------------

/// Destabilizing interaction load.
pub fn noise(clash: f64, punishment: f64, brk: f64, harm: f64) -> f64 {
    0.50 * clash + 0.35 * punishment + 0.20 * brk + 0.20 * harm
}

/// Stabilizing interaction load.
pub fn connect(combine: f64) -> f64 {
    0.60 * combine
}

/// Blend of the two dominance values, weighted toward category set A.
pub fn spike(dominance_a: f64, dominance_b: f64) -> f64 {
    0.6 * dominance_a + 0.4 * dominance_b
}

// ---------------------------------------------------------------------------
// Feature / Features
// ---------------------------------------------------------------------------

/// A single readable dimension of the derived state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    TenGod(TenGod),
    Element(Element),
    Noise,
    Connect,
    Spike,
    Strength,
    /// Raw interaction count, before weighting.
    Interaction(Interaction),
}

/// Derived state for one profile.  Built once per computation and read by
/// every metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    pub ten_gods: Proportions,
    pub elements: Proportions,
    pub strength: f64,
    pub interactions: [f64; 5],
    pub noise: f64,
    pub connect: f64,
    pub spike: f64,
}

impl Features {
    /// Derive the feature state.  Missing vector groups are zero-filled.
    pub fn derive(profile: &InputProfile) -> Self {
        let ten_gods = normalize(&profile.ten_gods.unwrap_or([0.0; 5]));
        let elements = normalize(&profile.elements.unwrap_or([0.0; 5]));
        let interactions = Interaction::ALL.map(|k| profile.count(k));

        let noise = noise(
            interactions[Interaction::Clash.index()],
            interactions[Interaction::Punishment.index()],
            interactions[Interaction::Break.index()],
            interactions[Interaction::Harm.index()],
        );
        let connect = connect(interactions[Interaction::Combine.index()]);
        let spike = spike(ten_gods.dominance(), elements.dominance());

        Self {
            ten_gods,
            elements,
            strength: profile.effective_strength(),
            interactions,
            noise,
            connect,
            spike,
        }
    }

    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::TenGod(t) => self.ten_gods.get(t.index()),
            Feature::Element(e) => self.elements.get(e.index()),
            Feature::Noise => self.noise,
            Feature::Connect => self.connect,
            Feature::Spike => self.spike,
            Feature::Strength => self.strength,
            Feature::Interaction(i) => self.interactions[i.index()],
        }
    }

    /// Left-to-right sum of several features.
    pub fn sum(&self, features: &[Feature]) -> f64 {
        features.iter().fold(0.0, |acc, f| acc + self.value(*f))
    }
}
