//! Grouping strategies for the story views.
//!
//! Groups hold references into the caller's record slice. A record with several
//! competency tags is referenced from several groups, never copied.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::models::experience::ExperienceRecord;

pub const UNKNOWN_YEAR: &str = "연도 미상";
pub const OTHER_CATEGORY: &str = "기타";
pub const UNCATEGORIZED: &str = "미분류";

/// Activity types that collapse onto a canonical category name.
const CATEGORY_ALIASES: &[(&str, &str)] = &[("인턴십", "인턴"), ("봉사활동", "봉사")];

#[derive(Debug, Clone, Serialize)]
pub struct CategoryBucket<'a> {
    pub category: String,
    pub records: Vec<&'a ExperienceRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearBucket<'a> {
    pub year: String,
    pub categories: Vec<CategoryBucket<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagBucket<'a> {
    pub tag: String,
    pub records: Vec<&'a ExperienceRecord>,
}

impl TagBucket<'_> {
    pub fn is_uncategorized(&self) -> bool {
        self.tag == UNCATEGORIZED
    }
}

/// Returns the first run of four ASCII digits in `date`, if any.
pub fn extract_year(date: &str) -> Option<&str> {
    let bytes = date.as_bytes();
    // ASCII digits are single-byte, so any window start on a digit is a char boundary.
    (0..bytes.len().saturating_sub(3))
        .find(|&i| bytes[i..i + 4].iter().all(u8::is_ascii_digit))
        .map(|i| &date[i..i + 4])
}

pub fn normalize_category(activity_type: &str) -> String {
    let trimmed = activity_type.trim();
    if trimmed.is_empty() {
        return OTHER_CATEGORY.to_string();
    }
    CATEGORY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == trimmed)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Groups records by year, then by normalized category.
///
/// Years run newest first with [`UNKNOWN_YEAR`] last. Categories run in lexical
/// order with [`OTHER_CATEGORY`] last. Each bucket is ordered by the raw date
/// string, descending, keeping input order on ties.
pub fn group_by_year_and_category<'a>(records: &[&'a ExperienceRecord]) -> Vec<YearBucket<'a>> {
    let mut by_year: BTreeMap<String, BTreeMap<String, Vec<&'a ExperienceRecord>>> =
        BTreeMap::new();
    let mut unknown: BTreeMap<String, Vec<&'a ExperienceRecord>> = BTreeMap::new();

    for &record in records {
        let category = normalize_category(&record.activity_type);
        let target = match extract_year(&record.activity_date) {
            Some(year) => by_year.entry(year.to_string()).or_default(),
            None => &mut unknown,
        };
        target.entry(category).or_default().push(record);
    }

    let mut years: Vec<YearBucket<'a>> = by_year
        .into_iter()
        .rev()
        .map(|(year, categories)| YearBucket {
            year,
            categories: order_categories(categories),
        })
        .collect();

    if !unknown.is_empty() {
        years.push(YearBucket {
            year: UNKNOWN_YEAR.to_string(),
            categories: order_categories(unknown),
        });
    }
    years
}

fn order_categories<'a>(
    categories: BTreeMap<String, Vec<&'a ExperienceRecord>>,
) -> Vec<CategoryBucket<'a>> {
    let (mut named, other): (Vec<_>, Vec<_>) = categories
        .into_iter()
        .map(|(category, mut records)| {
            // Lexical on purpose: dates are free text, not calendar values.
            records.sort_by(|a, b| b.activity_date.cmp(&a.activity_date));
            CategoryBucket { category, records }
        })
        .partition(|bucket| bucket.category != OTHER_CATEGORY);
    named.extend(other);
    named
}

/// Groups records under every competency tag they carry.
///
/// Untagged records go to [`UNCATEGORIZED`]. Groups are ordered by member count,
/// largest first, ties in first-seen order, with [`UNCATEGORIZED`] always last.
pub fn group_by_competency<'a>(records: &[&'a ExperienceRecord]) -> Vec<TagBucket<'a>> {
    let mut buckets: Vec<TagBucket<'a>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for &record in records {
        let mut tags = record.competency_tags();
        if tags.is_empty() {
            tags.push(UNCATEGORIZED);
        }
        let mut seen: Vec<&str> = Vec::with_capacity(tags.len());
        for tag in tags {
            if seen.contains(&tag) {
                continue;
            }
            seen.push(tag);
            let slot = *index.entry(tag.to_string()).or_insert_with(|| {
                buckets.push(TagBucket {
                    tag: tag.to_string(),
                    records: Vec::new(),
                });
                buckets.len() - 1
            });
            buckets[slot].records.push(record);
        }
    }

    buckets.sort_by_key(|bucket| {
        (
            bucket.is_uncategorized(),
            std::cmp::Reverse(bucket.records.len()),
        )
    });
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(date: &str, kind: &str, tags: &str) -> ExperienceRecord {
        ExperienceRecord {
            activity_date: date.to_string(),
            activity_type: kind.to_string(),
            core_competency: tags.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("2023.05"), Some("2023"));
        assert_eq!(extract_year("약 2021년 여름"), Some("2021"));
        assert_eq!(extract_year("05/2019"), Some("2019"));
        assert_eq!(extract_year("123"), None);
        assert_eq!(extract_year(""), None);
        assert_eq!(extract_year("20a23"), None);
    }

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category("인턴십"), "인턴");
        assert_eq!(normalize_category(" 봉사활동 "), "봉사");
        assert_eq!(normalize_category("동아리"), "동아리");
        assert_eq!(normalize_category("   "), OTHER_CATEGORY);
    }

    #[test]
    fn test_year_grouping_orders_years_and_buckets() {
        let a = story("2022.03", "동아리", "");
        let b = story("2023.01", "인턴십", "");
        let c = story("2023.07", "인턴", "");
        let d = story("모름", "", "");
        let e = story("2023.02", "", "");
        let records = [&a, &b, &c, &d, &e];

        let years = group_by_year_and_category(&records);
        let labels: Vec<_> = years.iter().map(|y| y.year.as_str()).collect();
        assert_eq!(labels, vec!["2023", "2022", UNKNOWN_YEAR]);

        let y2023 = &years[0];
        let cats: Vec<_> = y2023.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(cats, vec!["인턴", OTHER_CATEGORY]);
        let intern_dates: Vec<_> = y2023.categories[0]
            .records
            .iter()
            .map(|r| r.activity_date.as_str())
            .collect();
        assert_eq!(intern_dates, vec!["2023.07", "2023.01"]);

        assert_eq!(years[2].categories[0].category, OTHER_CATEGORY);
    }

    #[test]
    fn test_year_grouping_tolerates_garbage_dates() {
        let a = story("", "", "");
        let b = story("??", "", "");
        let c = ExperienceRecord::default();
        let years = group_by_year_and_category(&[&a, &b, &c]);
        assert_eq!(years.len(), 1);
        assert_eq!(years[0].year, UNKNOWN_YEAR);
        assert_eq!(years[0].categories[0].category, OTHER_CATEGORY);
        assert_eq!(years[0].categories[0].records.len(), 3);
    }

    #[test]
    fn test_year_bucket_sort_is_lexical_and_stable() {
        let a = story("2023.9", "", "");
        let b = story("2023.10", "", "");
        let c = story("2023.9", "", "");
        let years = group_by_year_and_category(&[&a, &b, &c]);
        let bucket = &years[0].categories[0].records;
        // "2023.9" > "2023.10" lexically.
        assert!(std::ptr::eq(bucket[0], &a));
        assert!(std::ptr::eq(bucket[1], &c));
        assert!(std::ptr::eq(bucket[2], &b));
    }

    #[test]
    fn test_competency_fan_out() {
        let a = story("", "", "리더십, 소통");
        let b = story("", "", "소통");
        let c = story("", "", "");
        let records = [&a, &b, &c];

        let groups = group_by_competency(&records);
        let tags: Vec<_> = groups.iter().map(|g| g.tag.as_str()).collect();
        assert_eq!(tags, vec!["소통", "리더십", UNCATEGORIZED]);

        let membership: usize = groups.iter().map(|g| g.records.len()).sum();
        assert!(membership > records.len());
        assert!(std::ptr::eq(groups[0].records[0], &a));
        assert!(std::ptr::eq(groups[1].records[0], &a));
    }

    #[test]
    fn test_competency_single_tags_membership_equals_count() {
        let a = story("", "", "협업");
        let b = story("", "", " , ");
        let c = story("", "", "분석");
        let records = [&a, &b, &c];
        let groups = group_by_competency(&records);
        let membership: usize = groups.iter().map(|g| g.records.len()).sum();
        assert_eq!(membership, records.len());
        assert!(groups.last().unwrap().is_uncategorized());
    }

    #[test]
    fn test_uncategorized_last_even_when_largest() {
        let a = story("", "", "");
        let b = story("", "", "");
        let c = story("", "", "문제해결");
        let groups = group_by_competency(&[&a, &b, &c]);
        assert_eq!(groups[0].tag, "문제해결");
        assert_eq!(groups[1].tag, UNCATEGORIZED);
        assert_eq!(groups[1].records.len(), 2);
    }

    #[test]
    fn test_duplicate_tag_in_one_record_counts_once() {
        let a = story("", "", "소통, 소통");
        let groups = group_by_competency(&[&a]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].records.len(), 1);
    }
}
