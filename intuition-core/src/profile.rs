//! Input profile: two five-way magnitude groups, a strength scalar and five
//! interaction counts.
//!
//! The profile-construction layer emits loosely typed JSON (Korean keys,
//! strings where numbers are expected, arrays standing in for counts).  The
//! loader here is deliberately lenient: anything that is not usable as a
//! number becomes `0` downstream.  The only hard failure is a document that is
//! not an object at all.

use std::fmt;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Key vocabularies
// ---------------------------------------------------------------------------

/// The five "ten-god" groups (category set A).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenGod {
    /// 비겁
    Peer,
    /// 식상
    Output,
    /// 재성
    Wealth,
    /// 관성
    Authority,
    /// 인성
    Resource,
}

impl TenGod {
    pub const ALL: [TenGod; 5] = [
        TenGod::Peer,
        TenGod::Output,
        TenGod::Wealth,
        TenGod::Authority,
        TenGod::Resource,
    ];

    /// Position of this key inside a five-slot vector.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical key as emitted by the profile-construction layer.
    pub fn label(self) -> &'static str {
        match self {
            TenGod::Peer      => "비겁",
            TenGod::Output    => "식상",
            TenGod::Wealth    => "재성",
            TenGod::Authority => "관성",
            TenGod::Resource  => "인성",
        }
    }

    fn aliases(self) -> [&'static str; 2] {
        match self {
            TenGod::Peer      => ["비겁", "peer"],
            TenGod::Output    => ["식상", "output"],
            TenGod::Wealth    => ["재성", "wealth"],
            TenGod::Authority => ["관성", "authority"],
            TenGod::Resource  => ["인성", "resource"],
        }
    }
}

impl fmt::Display for TenGod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The five elements (category set B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Element::Wood  => "wood",
            Element::Fire  => "fire",
            Element::Earth => "earth",
            Element::Metal => "metal",
            Element::Water => "water",
        }
    }

    fn aliases(self) -> [&'static str; 2] {
        match self {
            Element::Wood  => ["wood", "목"],
            Element::Fire  => ["fire", "화"],
            Element::Earth => ["earth", "토"],
            Element::Metal => ["metal", "금"],
            Element::Water => ["water", "수"],
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The five named pairwise interaction kinds.
///
/// [`Interaction::Combine`] is the only stabilizing kind; the other four feed
/// the noise scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interaction {
    /// 합
    Combine,
    /// 충
    Clash,
    /// 형
    Punishment,
    /// 파
    Break,
    /// 해
    Harm,
}

impl Interaction {
    pub const ALL: [Interaction; 5] = [
        Interaction::Combine,
        Interaction::Clash,
        Interaction::Punishment,
        Interaction::Break,
        Interaction::Harm,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Interaction::Combine    => "합",
            Interaction::Clash      => "충",
            Interaction::Punishment => "형",
            Interaction::Break      => "파",
            Interaction::Harm       => "해",
        }
    }

    fn aliases(self) -> [&'static str; 2] {
        match self {
            Interaction::Combine    => ["합", "he"],
            Interaction::Clash      => ["충", "chung"],
            Interaction::Punishment => ["형", "hyung"],
            Interaction::Break      => ["파", "pa"],
            Interaction::Harm       => ["해", "hae"],
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// InputProfile
// ---------------------------------------------------------------------------

/// Raw profile as handed over by the profile-construction layer.
///
/// Magnitudes may be any `f64`, including NaN or infinities; the normalizer
/// coerces those to `0`.  A `None` vector group means the group was absent
/// from the input and is zero-filled with a diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct InputProfile {
    /// Category set A, indexed by [`TenGod::index`].
    pub ten_gods: Option<[f64; 5]>,
    /// Category set B, indexed by [`Element::index`].
    pub elements: Option<[f64; 5]>,
    /// Strength as supplied.  `None` when absent; NaN when present but not
    /// numeric.
    pub strength: Option<f64>,
    /// Interaction counts, indexed by [`Interaction::index`].
    pub interactions: [f64; 5],
}

/// Strength used whenever the supplied value is missing or unusable.
pub const DEFAULT_STRENGTH: f64 = 50.0;

impl InputProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ten_gods(mut self, magnitudes: [f64; 5]) -> Self {
        self.ten_gods = Some(magnitudes);
        self
    }

    pub fn with_elements(mut self, magnitudes: [f64; 5]) -> Self {
        self.elements = Some(magnitudes);
        self
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = Some(strength);
        self
    }

    pub fn with_interaction(mut self, kind: Interaction, count: f64) -> Self {
        self.interactions[kind.index()] = count;
        self
    }

    /// Strength after defaulting.
    ///
    /// Missing, non-finite and zero values all resolve to
    /// [`DEFAULT_STRENGTH`]; the upstream layer uses `0` for "not computed".
    pub fn effective_strength(&self) -> f64 {
        match self.strength {
            Some(s) if s.is_finite() && s != 0.0 => s,
            _ => DEFAULT_STRENGTH,
        }
    }

    /// `true` when a strength value was supplied but could not be used.
    pub fn strength_was_defaulted(&self) -> bool {
        matches!(self.strength, Some(s) if !s.is_finite() || s == 0.0)
    }

    /// Interaction count for `kind`, with non-finite values read as `0`.
    pub fn count(&self, kind: Interaction) -> f64 {
        let c = self.interactions[kind.index()];
        if c.is_finite() { c } else { 0.0 }
    }

    /// Parse a loosely typed JSON document.
    ///
    /// Accepts both the nested upstream shape
    /// (`{"vectors": {"tenGods": .., "elements": ..}, "strength": {"score": n}, ..}`)
    /// and a flat shape with `tenGods` / `elements` at the top level.
    ///
    /// Returns an error only when `value` is not a JSON object.
    pub fn from_value(value: &Value) -> anyhow::Result<Self> {
        let root = value
            .as_object()
            .ok_or_else(|| anyhow!("profile must be a JSON object, got {}", value_kind(value)))?;

        let vectors = root
            .get("vectors")
            .and_then(Value::as_object)
            .unwrap_or(root);

        let ten_gods = group(vectors, &["tenGods", "ten_gods"])
            .map(|m| read_keyed(m, &TenGod::ALL.map(TenGod::aliases)));
        let elements = group(vectors, &["elements"])
            .map(|m| read_keyed(m, &Element::ALL.map(Element::aliases)));

        let strength = match root.get("strength") {
            None | Some(Value::Null) => None,
            Some(Value::Object(s)) => s.get("score").map(coerce_number),
            Some(other) => Some(coerce_number(other)),
        };

        let interactions = match root.get("interactions").and_then(Value::as_object) {
            Some(m) => {
                let mut counts = [0.0; 5];
                for kind in Interaction::ALL {
                    counts[kind.index()] = lookup(m, &kind.aliases()).map(as_count).unwrap_or(0.0);
                }
                counts
            }
            None => [0.0; 5],
        };

        Ok(Self {
            ten_gods,
            elements,
            strength,
            interactions,
        })
    }
}

impl TryFrom<Value> for InputProfile {
    type Error = anyhow::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

// ---------------------------------------------------------------------------
// Coercion helpers
// ---------------------------------------------------------------------------

fn group<'a>(m: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Map<String, Value>> {
    keys.iter().find_map(|k| m.get(*k)).and_then(Value::as_object)
}

fn lookup<'a>(m: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases.iter().find_map(|k| m.get(*k))
}

fn read_keyed(m: &Map<String, Value>, aliases: &[[&'static str; 2]; 5]) -> [f64; 5] {
    let mut out = [0.0; 5];
    for (slot, keys) in out.iter_mut().zip(aliases.iter()) {
        *slot = lookup(m, keys).map(coerce_number).unwrap_or(0.0);
    }
    out
}

/// Numeric coercion with JavaScript `Number(..)` semantics.
///
/// Returns NaN for values that have no numeric reading; callers decide how to
/// treat that.
pub fn coerce_number(v: &Value) -> f64 {
    match v {
        Value::Null => 0.0,
        Value::Bool(b) => if *b { 1.0 } else { 0.0 },
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() { 0.0 } else { t.parse::<f64>().unwrap_or(f64::NAN) }
        }
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [only] => coerce_number(only),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

/// Interaction count: a sequence counts by its length, anything else by
/// numeric coercion, with unusable values read as `0`.
pub fn as_count(v: &Value) -> f64 {
    match v {
        Value::Array(items) => items.len() as f64,
        other => {
            let n = coerce_number(other);
            if n.is_finite() { n } else { 0.0 }
        }
    }
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_upstream_shape_is_read() {
        let v = json!({
            "vectors": {
                "tenGods": {"비겁": 1, "식상": 2, "재성": 3, "관성": 4, "인성": 5},
                "elements": {"wood": 0.1, "fire": 0.2, "earth": 0.3, "metal": 0.2, "water": 0.2}
            },
            "strength": {"score": 64},
            "interactions": {"합": 2, "충": 1}
        });
        let p = InputProfile::from_value(&v).unwrap();
        assert_eq!(p.ten_gods, Some([1.0, 2.0, 3.0, 4.0, 5.0]));
        assert_eq!(p.elements, Some([0.1, 0.2, 0.3, 0.2, 0.2]));
        assert_eq!(p.effective_strength(), 64.0);
        assert_eq!(p.count(Interaction::Combine), 2.0);
        assert_eq!(p.count(Interaction::Clash), 1.0);
        assert_eq!(p.count(Interaction::Harm), 0.0);
    }

    #[test]
    fn flat_shape_and_english_aliases() {
        let v = json!({
            "tenGods": {"peer": 1, "output": 1, "wealth": 1, "authority": 1, "resource": 1},
            "elements": {"목": 1, "화": 1, "토": 1, "금": 1, "수": 1},
            "strength": 70,
            "interactions": {"chung": 3, "hae": 1}
        });
        let p = InputProfile::from_value(&v).unwrap();
        assert_eq!(p.ten_gods, Some([1.0; 5]));
        assert_eq!(p.elements, Some([1.0; 5]));
        assert_eq!(p.effective_strength(), 70.0);
        assert_eq!(p.count(Interaction::Clash), 3.0);
        assert_eq!(p.count(Interaction::Harm), 1.0);
    }

    #[test]
    fn missing_groups_stay_none() {
        let p = InputProfile::from_value(&json!({"strength": 50})).unwrap();
        assert!(p.ten_gods.is_none());
        assert!(p.elements.is_none());
    }

    #[test]
    fn non_object_is_rejected() {
        let err = InputProfile::from_value(&json!([1, 2, 3])).unwrap_err();
        assert!(err.to_string().contains("an array"), "{err}");
        assert!(InputProfile::from_value(&Value::Null).is_err());
    }

    #[test]
    fn sequences_count_by_length() {
        let v = json!({"interactions": {"충": ["a", "b"], "형": "2", "파": "x"}});
        let p = InputProfile::from_value(&v).unwrap();
        assert_eq!(p.count(Interaction::Clash), 2.0);
        assert_eq!(p.count(Interaction::Punishment), 2.0);
        assert_eq!(p.count(Interaction::Break), 0.0);
    }

    #[test]
    fn strength_defaulting() {
        assert_eq!(InputProfile::new().effective_strength(), DEFAULT_STRENGTH);
        assert!(!InputProfile::new().strength_was_defaulted());

        let zero = InputProfile::new().with_strength(0.0);
        assert_eq!(zero.effective_strength(), DEFAULT_STRENGTH);
        assert!(zero.strength_was_defaulted());

        let junk = InputProfile::from_value(&json!({"strength": {"score": "strong"}})).unwrap();
        assert_eq!(junk.effective_strength(), DEFAULT_STRENGTH);
        assert!(junk.strength_was_defaulted());
    }

    #[test]
    fn coercion_follows_number_semantics() {
        assert_eq!(coerce_number(&json!(null)), 0.0);
        assert_eq!(coerce_number(&json!(true)), 1.0);
        assert_eq!(coerce_number(&json!(" 2.5 ")), 2.5);
        assert_eq!(coerce_number(&json!("")), 0.0);
        assert_eq!(coerce_number(&json!([7])), 7.0);
        assert!(coerce_number(&json!("abc")).is_nan());
        assert!(coerce_number(&json!({})).is_nan());
    }

    #[test]
    fn deserializes_through_serde() {
        let p: InputProfile = serde_json::from_str(r#"{"elements": {"water": 1}}"#).unwrap();
        assert_eq!(p.elements, Some([0.0, 0.0, 0.0, 0.0, 1.0]));
        assert!(serde_json::from_str::<InputProfile>("42").is_err());
    }
}
