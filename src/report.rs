use std::fmt::Write;

use chrono::Utc;

use crate::models::{Metrics, ThemeEntry};

const TOP_ENTRIES: usize = 10;
const TOP_THEMES: usize = 5;
const EXCERPTS_PER_THEME: usize = 3;

pub fn build_report(metrics: &Metrics, coach: &str, site: &str) -> String {
    let mut output = String::new();

    let scope = match (coach, site) {
        ("all", "all") => "all coaches and sites".to_string(),
        (coach, "all") => format!("coach {coach}"),
        ("all", site) => format!("site {site}"),
        (coach, site) => format!("coach {coach} at {site}"),
    };

    let _ = writeln!(output, "# Coaching Visit Report");
    let _ = writeln!(
        output,
        "Generated for {} on {}",
        scope,
        Utc::now().date_naive()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "Total visits: {}", metrics.total_visits);
    let _ = writeln!(output, "Active coaches: {}", metrics.coaches.len());
    let _ = writeln!(output, "Sites visited: {}", metrics.sites.len());

    let _ = writeln!(output);
    let _ = writeln!(output, "## Visits by Coach");
    if metrics.coaches.is_empty() {
        let _ = writeln!(output, "No visits recorded for this selection.");
    } else {
        for coach in metrics.coaches.iter().take(TOP_ENTRIES) {
            let _ = writeln!(output, "- {}: {} visits", coach.name, coach.visits);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Visits by Site");
    if metrics.sites.is_empty() {
        let _ = writeln!(output, "No visits recorded for this selection.");
    } else {
        for site in metrics.sites.iter().take(TOP_ENTRIES) {
            let _ = writeln!(output, "- {}: {} visits", site.name, site.visits);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Implementation Progress");
    for bucket in metrics.progress.iter() {
        let _ = writeln!(output, "- {}: {}", bucket.name, bucket.value);
    }

    write_theme_section(&mut output, "Strength Themes", &metrics.strength_themes);
    write_theme_section(
        &mut output,
        "Improvement Themes",
        &metrics.improvement_themes,
    );

    output
}

fn write_theme_section(output: &mut String, title: &str, themes: &[ThemeEntry]) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {title}");

    if themes.is_empty() {
        let _ = writeln!(output, "No themes detected for this selection.");
        return;
    }

    for theme in themes.iter().take(TOP_THEMES) {
        let _ = writeln!(output, "- {} ({} mentions)", theme.theme, theme.count);
        for source in theme.sources.iter().take(EXCERPTS_PER_THEME) {
            let _ = writeln!(
                output,
                "  - {} ({}, {}): {}",
                source.site, source.coach, source.date, source.text
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_metrics;
    use crate::models::VisitRecord;

    fn records() -> Vec<VisitRecord> {
        vec![VisitRecord {
            timestamp: "2026/01/15 10:30:00".to_string(),
            email: "dana.reyes@district.org".to_string(),
            location: "Orchard Elementary".to_string(),
            coachee: "Ms. Alvarez".to_string(),
            progress: "Fully implemented".to_string(),
            strengths: "Great rapport with the team".to_string(),
            improvements: "Need more staff at arrival".to_string(),
            recommendations: String::new(),
        }]
    }

    #[test]
    fn report_covers_all_sections() {
        let report = build_report(&compute_metrics(records()), "all", "all");

        assert!(report.contains("# Coaching Visit Report"));
        assert!(report.contains("Total visits: 1"));
        assert!(report.contains("## Visits by Coach"));
        assert!(report.contains("- dana reyes: 1 visits"));
        assert!(report.contains("## Implementation Progress"));
        assert!(report.contains("- Fully Implemented: 1"));
        assert!(report.contains("- Not implemented: 0"));
        assert!(report.contains("## Strength Themes"));
        assert!(report.contains("- Strong Relationships (1 mentions)"));
        assert!(report.contains("## Improvement Themes"));
        assert!(report.contains("- Staffing Issues (1 mentions)"));
    }

    #[test]
    fn empty_metrics_still_render() {
        let report = build_report(&compute_metrics(Vec::new()), "dana reyes", "all");

        assert!(report.contains("Generated for coach dana reyes"));
        assert!(report.contains("No visits recorded for this selection."));
        assert!(report.contains("No themes detected for this selection."));
        // All five buckets render even at zero.
        assert!(report.contains("- First meeting: 0"));
    }
}
