use crate::models::{Metrics, ProgressCount, VisitCount, VisitRecord};
use crate::themes;

/// The five implementation-progress buckets, always emitted in this order
/// even when a bucket stays at zero.
const PROGRESS_BUCKETS: [&str; 5] = [
    "Fully Implemented",
    "Partially implemented",
    "Not implemented",
    "First time",
    "First meeting",
];

/// Reduce a visit log into the full metrics snapshot: counts by coach, site
/// and progress bucket plus the classified narrative themes. Pure and
/// synchronous; every call builds a fresh result.
pub fn compute_metrics(records: Vec<VisitRecord>) -> Metrics {
    let mut coaches: Vec<VisitCount> = Vec::new();
    let mut sites: Vec<VisitCount> = Vec::new();
    let mut progress = [0usize; 5];

    for record in &records {
        bump(&mut coaches, &record.coach_key());
        bump(&mut sites, &record.location);

        let text = record.progress.to_lowercase();
        if text.contains("fully") {
            progress[0] += 1;
        } else if text.contains("partially") {
            progress[1] += 1;
        } else if text.contains("not") {
            progress[2] += 1;
        } else if text.contains("first") {
            // A first visit lands in both buckets. Inherited behavior the
            // dashboard consumers count on; summing the progress column
            // therefore double-counts these records.
            progress[3] += 1;
            progress[4] += 1;
        }
    }

    // Descending by visits; sort_by is stable, so ties keep first-seen order.
    coaches.sort_by(|a, b| b.visits.cmp(&a.visits));
    sites.sort_by(|a, b| b.visits.cmp(&a.visits));

    let (strength_themes, improvement_themes) = themes::classify(&records);

    Metrics {
        total_visits: records.len(),
        coaches,
        sites,
        progress: PROGRESS_BUCKETS
            .iter()
            .zip(progress)
            .map(|(name, value)| ProgressCount {
                name: (*name).to_string(),
                value,
            })
            .collect(),
        strength_themes,
        improvement_themes,
        raw_data: records,
    }
}

/// Narrow to the visits matching the coach/site selection and recompute the
/// whole snapshot from scratch. `"all"` disables a dimension; both filters
/// apply conjunctively against the original unfiltered universe, never
/// against a previously filtered result.
pub fn filter_and_recompute(metrics: &Metrics, coach: &str, site: &str) -> Metrics {
    let filtered: Vec<VisitRecord> = metrics
        .raw_data
        .iter()
        .filter(|record| coach == "all" || record.coach_key() == coach)
        .filter(|record| site == "all" || record.location == site)
        .cloned()
        .collect();

    compute_metrics(filtered)
}

fn bump(counts: &mut Vec<VisitCount>, name: &str) {
    match counts.iter_mut().find(|entry| entry.name == name) {
        Some(entry) => entry.visits += 1,
        None => counts.push(VisitCount {
            name: name.to_string(),
            visits: 1,
        }),
    }
}
