use std::path::Path;

use anyhow::{Context, Result};

use intuition_core::generation::{ConfiguredGeneration, Generation, GenerationKind};
use intuition_core::output::OutputFormat;
use intuition_core::pipeline::Engine;
use intuition_core::report::Report;

use crate::output;

pub fn parse_format(s: &str) -> Result<OutputFormat> {
    match s {
        "pretty" => Ok(OutputFormat::Pretty),
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => anyhow::bail!("unknown format: {other} (expected pretty, text, or json)"),
    }
}

/// Pick the generation: an explicit config file wins over a built-in name.
pub fn select_generation(name: &str, config: Option<&Path>) -> Result<Box<dyn Generation>> {
    match config {
        Some(path) => {
            let configured = ConfiguredGeneration::from_file(path)?;
            if configured.is_empty() {
                log::info!("{} overrides nothing; using its base generation", path.display());
            }
            Ok(Box::new(configured))
        }
        None => Ok(name.parse::<GenerationKind>()?.build()),
    }
}

pub fn format_report(report: &Report, fmt: OutputFormat) -> Result<String> {
    Ok(match fmt {
        OutputFormat::Json => output::format_json(report)?,
        OutputFormat::Text => output::format_text(report),
        OutputFormat::Pretty => output::format_pretty(report),
    })
}

pub fn run(path: &Path, format: &str, generation: &str, config: Option<&Path>) -> Result<()> {
    let fmt = parse_format(format)?;
    let engine = Engine::with_generation(select_generation(generation, config)?);

    let src = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&src)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let report = engine
        .run_value(&value)
        .with_context(|| format!("failed to score {}", path.display()))?;

    log::debug!("{} warning(s) for {}", report.warnings.len(), path.display());
    println!("{}", format_report(&report, fmt)?);
    Ok(())
}
