use colored::{Color, Colorize};
use intuition_core::aggregate::Composite;
use intuition_core::catalogue::Category;
use intuition_core::report::{Rating, Report};

/// Terminal color for a score, by distance from the midpoint.
fn score_color(score: u8) -> Color {
    match score {
        82.. => Color::BrightGreen,
        72..=81 => Color::Green,
        62..=71 => Color::Yellow,
        52..=61 => Color::White,
        _ => Color::Red,
    }
}

fn bar(score: u8) -> String {
    "█".repeat(usize::from(score) * 30 / 100)
}

fn rating_line(label: &str, r: &Rating) -> String {
    format!(
        "  {:<14} {} {:>3}  {}\n",
        label,
        bar(r.score).color(score_color(r.score)),
        r.score.to_string().bold(),
        format!("{} / {}", r.grade, r.percentile_band).dimmed(),
    )
}

/// Format a report with terminal colors.
pub fn format_pretty(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}  {} {}\n",
        "Generation:".bold(),
        report.generation,
        "Overload risk:".bold(),
        report.overload_risk.to_string().color(score_color(100 - report.overload_risk.min(100))),
    ));

    out.push_str(&format!("\n{}\n", "Overall:".bold()));
    for kind in Composite::ALL {
        out.push_str(&rating_line(kind.label(), report.overall.get(kind)));
    }

    out.push_str(&format!("\n{}\n", "Categories:".bold()));
    for category in Category::ALL {
        out.push_str(&rating_line(&category.to_string(), report.categories.get(category)));
    }

    out.push_str(&format!("\n{}\n", "Sub-metrics:".bold()));
    for s in &report.subs {
        let style = s.dominant_style.as_deref().unwrap_or("");
        out.push_str(&format!(
            "  {:>2}. {} {} {}",
            s.id,
            s.name,
            format!("[{style}]").dimmed(),
            s.final_score.to_string().color(score_color(s.final_score)).bold(),
        ));
        if !s.fired_patterns.is_empty() {
            let bonus = format!("{:+}", s.bonus);
            let colored_bonus = if s.bonus >= 0.0 { bonus.green() } else { bonus.red() };
            out.push_str(&format!(" {} {}", colored_bonus, s.fired_patterns.join(", ").dimmed()));
        }
        out.push('\n');
    }

    if !report.warnings.is_empty() {
        out.push_str(&format!("\n{}\n", "Warnings:".yellow().bold()));
        for w in &report.warnings {
            out.push_str(&format!("  {}\n", w.message));
        }
    }

    out
}

pub use intuition_core::output::{format_json, format_text};

#[cfg(test)]
mod tests {
    use super::*;
    use intuition_core::profile::InputProfile;

    fn sample() -> Report {
        intuition_core::compute(
            &InputProfile::new()
                .with_ten_gods([1.0; 5])
                .with_elements([1.0; 5])
                .with_strength(50.0),
        )
    }

    #[test]
    fn format_pretty_shows_sections() {
        colored::control::set_override(false);
        let output = format_pretty(&sample());
        assert!(output.contains("Overall:"));
        assert!(output.contains("Categories:"));
        assert!(output.contains("Sub-metrics:"));
        assert!(output.contains("비즈니스촉"));
    }

    #[test]
    fn format_pretty_shows_fired_patterns() {
        colored::control::set_override(false);
        let output = format_pretty(&sample());
        assert!(output.contains("+5 금+관성 정밀"), "{output}");
    }

    #[test]
    fn format_pretty_shows_warnings() {
        let output = format_pretty(&intuition_core::compute(&InputProfile::new()));
        assert!(output.contains("Warnings:"));
        assert!(output.contains("element vector missing"));
    }

    #[test]
    fn colors_follow_the_score() {
        assert_eq!(score_color(90), Color::BrightGreen);
        assert_eq!(score_color(50), Color::Red);
        assert_eq!(bar(100).chars().count(), 30);
    }
}
