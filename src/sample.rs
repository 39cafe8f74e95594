use crate::models::{Metrics, ProgressCount, ThemeEntry, VisitCount};

/// Canned metrics substituted when the live sheet export cannot be reached.
/// Shaped exactly like an engine-computed snapshot so consumers never branch
/// on data provenance. `raw_data` is empty, so filtering a sample snapshot
/// yields an empty (but well-formed) result.
pub fn sample_metrics() -> Metrics {
    Metrics {
        total_visits: 100,
        coaches: visit_counts(&[
            ("Jafahri Oler", 15),
            ("Joe Howard", 14),
            ("Demarcus Wooten", 13),
            ("Kevin Hendricks", 12),
            ("Sendy Sanchez", 11),
        ]),
        sites: visit_counts(&[
            ("Foothill High School", 8),
            ("Foothill Ranch Middle", 7),
            ("Orchard Elementary", 6),
            ("Madison Elementary", 5),
            ("Westside Elementary", 5),
        ]),
        progress: vec![
            progress("Fully Implemented", 15),
            progress("Partially implemented", 35),
            progress("Not implemented", 20),
            progress("First time", 30),
            progress("First meeting", 30),
        ],
        strength_themes: vec![ThemeEntry {
            theme: "Strong Relationships".to_string(),
            count: 28,
            sources: Vec::new(),
        }],
        improvement_themes: vec![ThemeEntry {
            theme: "Staffing Issues".to_string(),
            count: 18,
            sources: Vec::new(),
        }],
        raw_data: Vec::new(),
    }
}

fn visit_counts(entries: &[(&str, usize)]) -> Vec<VisitCount> {
    entries
        .iter()
        .map(|(name, visits)| VisitCount {
            name: (*name).to_string(),
            visits: *visits,
        })
        .collect()
}

fn progress(name: &str, value: usize) -> ProgressCount {
    ProgressCount {
        name: name.to_string(),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_shape_matches_engine_output() {
        let sample = sample_metrics();
        assert_eq!(sample.progress.len(), 5);
        assert!(sample
            .coaches
            .windows(2)
            .all(|pair| pair[0].visits >= pair[1].visits));
        assert!(sample
            .sites
            .windows(2)
            .all(|pair| pair[0].visits >= pair[1].visits));
    }
}
