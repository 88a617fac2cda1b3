#![deny(dead_code)]

pub mod aggregate;
pub mod catalogue;
pub mod classify;
pub mod features;
pub mod generation;
pub mod output;
pub mod pipeline;
pub mod profile;
pub mod report;
pub mod scoring;

use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use pipeline::Engine;
use profile::InputProfile;
use report::Report;

/// Score a profile with the canonical generation.
pub fn compute(profile: &InputProfile) -> Report {
    Engine::with_defaults().run(profile)
}

/// Score a loosely typed JSON profile.  Fails only when `value` is not an
/// object.
pub fn compute_value(value: &Value) -> anyhow::Result<Report> {
    Engine::with_defaults().run_value(value)
}

/// Parse and score a JSON document.
pub fn compute_json(src: &str) -> anyhow::Result<Report> {
    let value: Value = serde_json::from_str(src).context("profile is not valid JSON")?;
    compute_value(&value)
}

/// Read a JSON profile from disk and score it.
pub fn compute_file(path: &Path) -> anyhow::Result<Report> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    compute_json(&src).with_context(|| format!("failed to score {}", path.display()))
}
