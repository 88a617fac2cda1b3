use std::fmt::Write;

use crate::aggregate::Composite;
use crate::catalogue::Category;
use crate::report::Report;

/// Output format for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Text,
    Json,
}

/// Format a report as JSON.
pub fn format_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Format a report as plain text (no colors).
pub fn format_text(report: &Report) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Generation: {}", report.generation);
    let _ = writeln!(out, "Overload risk: {}", report.overload_risk);

    out.push_str("\nOverall:\n");
    for kind in Composite::ALL {
        let r = report.overall.get(kind);
        let _ = writeln!(out, "  {:<10} {:>3}  {} / {}", kind.label(), r.score, r.grade, r.percentile_band);
    }

    out.push_str("\nCategories:\n");
    for category in Category::ALL {
        let r = report.categories.get(category);
        let _ = writeln!(
            out,
            "  {:<12} {:>3}  {} / {}",
            category.to_string(),
            r.score,
            r.grade,
            r.percentile_band
        );
    }

    out.push_str("\nSub-metrics:\n");
    for s in &report.subs {
        let style = s.dominant_style.as_deref().unwrap_or("-");
        let _ = write!(
            out,
            "  {:>2}. {} [{}] {:>3} (base {}",
            s.id, s.name, style, s.final_score, s.base_score
        );
        if !s.fired_patterns.is_empty() {
            let _ = write!(out, ", {:+} {}", s.bonus, s.fired_patterns.join(", "));
        }
        let _ = writeln!(out, ")  {} / {}", s.grade, s.percentile_band);
    }

    if !report.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for w in &report.warnings {
            let _ = writeln!(out, "  {}", w.message);
        }
    }

    out
}
