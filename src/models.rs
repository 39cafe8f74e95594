use serde::Serialize;

/// One row of the coaching visit log. Every field is carried as opaque text;
/// `timestamp` in particular is a display value and is never parsed as a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitRecord {
    pub timestamp: String,
    pub email: String,
    pub location: String,
    pub coachee: String,
    pub progress: String,
    pub strengths: String,
    pub improvements: String,
    pub recommendations: String,
}

impl VisitRecord {
    /// Aggregation key for the coach: the email local part with dots turned
    /// into spaces. Distinct emails that normalize to the same key merge into
    /// a single coach entry; this is a grouping key, not a unique ID.
    pub fn coach_key(&self) -> String {
        self.email.split('@').next().unwrap_or("").replace('.', " ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitCount {
    pub name: String,
    pub visits: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressCount {
    pub name: String,
    pub value: usize,
}

/// Back-reference from a matched theme to the visit it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceExcerpt {
    pub site: String,
    pub coach: String,
    pub date: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeEntry {
    pub theme: String,
    pub count: usize,
    pub sources: Vec<SourceExcerpt>,
}

/// Snapshot produced by [`crate::metrics::compute_metrics`]. Never mutated
/// after construction. The serialized field names are fixed by existing
/// consumers of the JSON shape, hence the camelCase renames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_visits: usize,
    pub coaches: Vec<VisitCount>,
    pub sites: Vec<VisitCount>,
    pub progress: Vec<ProgressCount>,
    pub strength_themes: Vec<ThemeEntry>,
    pub improvement_themes: Vec<ThemeEntry>,
    /// The unfiltered input universe. Filters always re-derive from this set
    /// so successive filter changes never compound.
    pub raw_data: Vec<VisitRecord>,
}
