use crate::models::experience::ExperienceRecord;

/// Case-insensitive substring search over title, summary and activity name.
///
/// A blank query returns the input unchanged. No match yields an empty vec,
/// which callers render as "no results" rather than "no stories".
pub fn filter_by_query<'a>(records: &[&'a ExperienceRecord], query: &str) -> Vec<&'a ExperienceRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .copied()
        .filter(|r| {
            [&r.story_title, &r.story_summary, &r.activity_name]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(title: &str, summary: &str, activity: &str) -> ExperienceRecord {
        ExperienceRecord {
            story_title: title.to_string(),
            story_summary: summary.to_string(),
            activity_name: activity.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_query_is_identity() {
        let a = story("b", "", "");
        let b = story("a", "", "");
        let out = filter_by_query(&[&a, &b], "");
        assert_eq!(out.len(), 2);
        assert!(std::ptr::eq(out[0], &a));
        assert!(std::ptr::eq(out[1], &b));
    }

    #[test]
    fn test_matches_any_field_case_insensitively() {
        let a = story("Hackathon Win", "", "");
        let b = story("", "led the RUST rewrite", "");
        let c = story("", "", "학생회 활동");
        let d = story("nothing", "here", "");
        let records = [&a, &b, &c, &d];

        assert_eq!(filter_by_query(&records, "hackathon").len(), 1);
        assert_eq!(filter_by_query(&records, "rust").len(), 1);
        assert_eq!(filter_by_query(&records, " 학생회 ").len(), 1);
    }

    #[test]
    fn test_no_match_is_empty() {
        let a = story("title", "summary", "activity");
        assert!(filter_by_query(&[&a], "zzz").is_empty());
    }

    #[test]
    fn test_detailed_content_is_not_searched() {
        let mut a = story("", "", "");
        a.detailed_content = "secret keyword".to_string();
        assert!(filter_by_query(&[&a], "keyword").is_empty());
    }
}
