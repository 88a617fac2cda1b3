use anyhow::Result;
use intuition_core::catalogue::{all_metrics, MetricGroup};
use intuition_core::generation::{ClassicGeneration, Generation};

pub fn run(format: &str) -> Result<()> {
    match format {
        "table" => print!("{}", render_table()),
        "toml" => print!("{}", render_toml()),
        other => anyhow::bail!("unknown format: {other} (expected table or toml)"),
    }
    Ok(())
}

fn render_table() -> String {
    let col_widths = (3usize, 14usize, 6usize, 22usize);

    let mut out = format!(
        "{:<id$}  {:<grp$}  {:<sc$}  {:<name$}  Styles / patterns\n",
        "Id",
        "Group",
        "Scale",
        "Name",
        id = col_widths.0,
        grp = col_widths.1,
        sc = col_widths.2,
        name = col_widths.3,
    );
    out.push_str(&"\u{2500}".repeat(col_widths.0 + col_widths.1 + col_widths.2 + col_widths.3 + 48));
    out.push('\n');

    for m in all_metrics() {
        let styles: Vec<&str> = m.styles.iter().map(|s| s.name).collect();
        let patterns: Vec<String> = m
            .patterns
            .iter()
            .map(|p| format!("{} ({:+})", p.label, p.adjustment))
            .collect();
        out.push_str(&format!(
            "{:<id$}  {:<grp$}  {:<sc$.2}  {:<name$}  {}\n{:indent$}  {}\n",
            m.id,
            m.group.to_string(),
            m.group.scale(),
            m.name,
            styles.join(" | "),
            "",
            patterns.join(", "),
            id = col_widths.0,
            grp = col_widths.1,
            sc = col_widths.2,
            name = col_widths.3,
            indent = col_widths.0 + col_widths.1 + col_widths.2 + col_widths.3 + 6,
        ));
    }
    out
}

fn render_toml() -> String {
    let classic = ClassicGeneration;
    let mut out = String::new();
    out.push_str("[generation]\n");
    out.push_str("# Values not set here come from the base generation.\n");
    out.push_str("base = \"classic\"            # or \"revised\"\n");
    out.push_str(&format!("# gain = {:.1}\n", classic.gain()));
    out.push_str(&format!("# aggregation = \"{}\"       # or \"strength_preserving\"\n", classic.aggregation()));
    out.push_str(&format!("# ladder = \"{}\"       # or \"seven_band\"\n", classic.ladder()));
    out.push('\n');
    out.push_str("[generation.spike]\n");
    out.push_str("# Coefficient of the spike scalar added to every style in a group.\n");
    for group in MetricGroup::ALL {
        out.push_str(&format!("# {} = {:.2}\n", group, classic.spike_weight(group)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use intuition_core::generation::ConfiguredGeneration;

    #[test]
    fn table_lists_every_metric() {
        let table = render_table();
        for m in all_metrics() {
            assert!(table.contains(m.name), "missing {}", m.name);
        }
        assert!(table.contains("overload_risk"));
    }

    #[test]
    fn toml_template_parses_as_config() {
        let template = render_toml();
        let g = ConfiguredGeneration::from_toml_str(&template).unwrap();
        assert!(g.is_empty());
        assert_eq!(g.name(), "configured(classic)");
    }

    #[test]
    fn unknown_format_is_an_error() {
        assert!(run("yaml").is_err());
    }
}
