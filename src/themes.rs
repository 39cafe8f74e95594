use crate::models::{SourceExcerpt, ThemeEntry, VisitRecord};

/// Fixed taxonomy mapping a theme name to its lower-case trigger substrings.
/// Matching is plain substring containment, not word-boundary aware ("room"
/// inside "bedroom" matches); downstream counts depend on that behavior.
pub const TAXONOMY: &[(&str, &[&str])] = &[
    (
        "Strong Relationships",
        &["relationship", "rapport", "connection", "communication with"],
    ),
    ("Good Structure", &["structure", "organized", "routine", "system"]),
    (
        "Student Engagement",
        &["engaged", "participating", "active", "involvement"],
    ),
    ("Effective Transitions", &["transition", "smooth", "flow"]),
    (
        "Staff Collaboration",
        &["collaboration", "teamwork", "working together"],
    ),
    (
        "Staffing Issues",
        &["need staff", "down staff", "lack of staff", "more staff"],
    ),
    (
        "Supervision Concerns",
        &["supervision", "line of sight", "monitoring"],
    ),
    ("Space/Classroom Needs", &["space", "classroom", "room"]),
    (
        "Communication Needs",
        &["communication need", "need to communicate", "improve communication"],
    ),
    (
        "Admin/Procare Support",
        &["procare", "admin", "paperwork", "documentation"],
    ),
];

const EXCERPT_LIMIT: usize = 150;

/// Scan the strengths and improvements narratives of each record against the
/// taxonomy. Returns (strength themes, improvement themes), each covering
/// only themes with at least one match, sorted by count descending with
/// first-seen order as the stable tiebreak.
pub fn classify(records: &[VisitRecord]) -> (Vec<ThemeEntry>, Vec<ThemeEntry>) {
    let mut strengths: Vec<ThemeEntry> = Vec::new();
    let mut improvements: Vec<ThemeEntry> = Vec::new();

    for record in records {
        extract_themes(&record.strengths, record, &mut strengths);
        extract_themes(&record.improvements, record, &mut improvements);
    }

    strengths.sort_by(|a, b| b.count.cmp(&a.count));
    improvements.sort_by(|a, b| b.count.cmp(&a.count));
    (strengths, improvements)
}

/// A theme counts once per record no matter how many of its triggers hit;
/// a single text may still feed several different themes.
fn extract_themes(text: &str, record: &VisitRecord, entries: &mut Vec<ThemeEntry>) {
    if text.is_empty() {
        return;
    }
    let lower = text.to_lowercase();

    for (theme, triggers) in TAXONOMY {
        if !triggers.iter().any(|trigger| lower.contains(trigger)) {
            continue;
        }

        let idx = match entries.iter().position(|entry| entry.theme == *theme) {
            Some(idx) => idx,
            None => {
                entries.push(ThemeEntry {
                    theme: (*theme).to_string(),
                    count: 0,
                    sources: Vec::new(),
                });
                entries.len() - 1
            }
        };

        entries[idx].count += 1;
        entries[idx].sources.push(SourceExcerpt {
            site: record.location.clone(),
            coach: record.coach_key(),
            date: record.timestamp.clone(),
            text: excerpt_text(text),
        });
    }
}

fn excerpt_text(text: &str) -> String {
    if text.chars().count() > EXCERPT_LIMIT {
        let mut truncated: String = text.chars().take(EXCERPT_LIMIT).collect();
        truncated.push_str("...");
        truncated
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit(strengths: &str, improvements: &str) -> VisitRecord {
        VisitRecord {
            timestamp: "2026/02/10 9:15:00".to_string(),
            email: "dana.reyes@district.org".to_string(),
            location: "Orchard Elementary".to_string(),
            coachee: "Room 12".to_string(),
            progress: "Partially implemented".to_string(),
            strengths: strengths.to_string(),
            improvements: improvements.to_string(),
            recommendations: String::new(),
        }
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let records = vec![visit("", "The classroom needs more SPACE")];
        let (strengths, improvements) = classify(&records);

        assert!(strengths.is_empty());
        assert_eq!(improvements.len(), 1);
        assert_eq!(improvements[0].theme, "Space/Classroom Needs");
        // Two triggers from the same theme hit, still one count.
        assert_eq!(improvements[0].count, 1);
    }

    #[test]
    fn one_text_can_feed_multiple_themes() {
        let records = vec![visit("Great rapport and a very organized routine", "")];
        let (strengths, _) = classify(&records);

        let names: Vec<&str> = strengths.iter().map(|t| t.theme.as_str()).collect();
        assert!(names.contains(&"Strong Relationships"));
        assert!(names.contains(&"Good Structure"));
    }

    #[test]
    fn themes_sort_by_count_with_taxonomy_order_tiebreak() {
        let records = vec![
            visit("strong rapport", ""),
            visit("strong rapport", ""),
            visit("smooth transitions", ""),
            visit("well organized", ""),
        ];
        let (strengths, _) = classify(&records);

        assert_eq!(strengths[0].theme, "Strong Relationships");
        assert_eq!(strengths[0].count, 2);
        // Tied at 1: Effective Transitions was seen first, so it stays ahead.
        assert_eq!(strengths[1].theme, "Effective Transitions");
        assert_eq!(strengths[2].theme, "Good Structure");
    }

    #[test]
    fn excerpts_capture_site_coach_and_date() {
        let records = vec![visit("Good rapport with the team", "")];
        let (strengths, _) = classify(&records);

        let source = &strengths[0].sources[0];
        assert_eq!(source.site, "Orchard Elementary");
        assert_eq!(source.coach, "dana reyes");
        assert_eq!(source.date, "2026/02/10 9:15:00");
        assert_eq!(source.text, "Good rapport with the team");
    }

    #[test]
    fn long_excerpts_truncate_at_150_chars() {
        let long_text = format!("rapport {}", "x".repeat(192));
        assert_eq!(long_text.chars().count(), 200);
        let records = vec![visit(&long_text, "")];
        let (strengths, _) = classify(&records);

        let text = &strengths[0].sources[0].text;
        assert!(text.ends_with("..."));
        assert_eq!(text.chars().count(), 153);
        assert_eq!(&text[..150], &long_text[..150]);
    }

    #[test]
    fn short_excerpts_copy_verbatim() {
        let text = "a".repeat(100);
        let records = vec![visit(&format!("rapport {}", &text[8..]), "")];
        let (strengths, _) = classify(&records);

        let excerpt = &strengths[0].sources[0].text;
        assert_eq!(excerpt.chars().count(), 100);
        assert!(!excerpt.ends_with("..."));
    }

    #[test]
    fn empty_narratives_produce_no_themes() {
        let records = vec![visit("", "")];
        let (strengths, improvements) = classify(&records);
        assert!(strengths.is_empty());
        assert!(improvements.is_empty());
    }
}
