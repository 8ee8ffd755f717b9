//! Flat-mode ordering of story records.
//!
//! Date comparators fall back to `sequence_number` (newest first) for any single
//! pair where either date fails to parse. The fallback is pairwise, so the
//! resulting relation is not guaranteed to be a total order. `slice::sort_by`
//! may panic on such comparators, so all ordering here goes through
//! [`stable_sort_by`], a merge sort that accepts any comparator.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::experience::ExperienceRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    DateAsc,
    #[default]
    DateDesc,
    CreatedAsc,
    CreatedDesc,
    TitleAsc,
    TitleDesc,
}

/// Returns the records in `order`. Equal elements keep their input order.
pub fn sort_flat<'a>(records: &[&'a ExperienceRecord], order: SortOrder) -> Vec<&'a ExperienceRecord> {
    let mut sorted = records.to_vec();
    stable_sort_by(&mut sorted, |a, b| compare(a, b, order));
    sorted
}

fn compare(a: &ExperienceRecord, b: &ExperienceRecord, order: SortOrder) -> Ordering {
    match order {
        SortOrder::DateAsc => compare_dates(a, b, false),
        SortOrder::DateDesc => compare_dates(a, b, true),
        SortOrder::CreatedAsc => a.created_at.cmp(&b.created_at),
        SortOrder::CreatedDesc => b.created_at.cmp(&a.created_at),
        SortOrder::TitleAsc => a.story_title.cmp(&b.story_title),
        SortOrder::TitleDesc => b.story_title.cmp(&a.story_title),
    }
}

fn compare_dates(a: &ExperienceRecord, b: &ExperienceRecord, descending: bool) -> Ordering {
    match (
        parse_activity_date(&a.activity_date),
        parse_activity_date(&b.activity_date),
    ) {
        (Some(da), Some(db)) if descending => db.cmp(&da),
        (Some(da), Some(db)) => da.cmp(&db),
        // Either side unparseable: newest insertion first, for this pair only.
        _ => b.sequence_number.cmp(&a.sequence_number),
    }
}

/// Parses a free-text activity date into a calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM` and `YYYY` with `-`, `.` or `/` separators,
/// ignoring whitespace and a trailing separator (`2023. 05. 01.`). Partial dates
/// anchor to the first day of the period.
pub fn parse_activity_date(raw: &str) -> Option<NaiveDate> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '.' || c == '/' { '-' } else { c })
        .collect();
    let normalized = compact.trim_end_matches('-');
    if normalized.is_empty() {
        return None;
    }

    match normalized.matches('-').count() {
        0 if normalized.len() == 4 => {
            NaiveDate::parse_from_str(&format!("{normalized}-01-01"), "%Y-%m-%d").ok()
        }
        1 => NaiveDate::parse_from_str(&format!("{normalized}-01"), "%Y-%m-%d").ok(),
        2 => NaiveDate::parse_from_str(normalized, "%Y-%m-%d").ok(),
        _ => None,
    }
}

/// Stable top-down merge sort. Never panics, whatever `compare` returns.
pub fn stable_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }
    let mut buffer = items.to_vec();
    merge_sort(items, &mut buffer, &mut compare);
}

fn merge_sort<T, F>(items: &mut [T], buffer: &mut [T], compare: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }
    let mid = len / 2;
    merge_sort(&mut items[..mid], &mut buffer[..mid], compare);
    merge_sort(&mut items[mid..], &mut buffer[mid..], compare);

    buffer.copy_from_slice(items);
    let (left, right) = buffer.split_at(mid);
    let (mut i, mut j) = (0, 0);
    for slot in items.iter_mut() {
        // Right side wins only when strictly less, which keeps the sort stable.
        let take_right =
            i >= left.len() || (j < right.len() && compare(&right[j], &left[i]) == Ordering::Less);
        if take_right {
            *slot = right[j];
            j += 1;
        } else {
            *slot = left[i];
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn story(date: &str, title: &str, seq: i64) -> ExperienceRecord {
        ExperienceRecord {
            story_title: title.to_string(),
            activity_date: date.to_string(),
            sequence_number: seq,
            created_at: Utc.timestamp_opt(1_700_000_000 + seq, 0).unwrap(),
            ..Default::default()
        }
    }

    fn dates(records: &[&ExperienceRecord]) -> Vec<String> {
        records.iter().map(|r| r.activity_date.clone()).collect()
    }

    #[test]
    fn test_date_desc_with_unparseable_date_falls_back_to_sequence() {
        let a = story("2022.11", "a", 2);
        let b = story("2023.05", "b", 3);
        let c = story("", "c", 1);
        let sorted = sort_flat(&[&a, &b, &c], SortOrder::DateDesc);
        assert_eq!(dates(&sorted), vec!["2023.05", "2022.11", ""]);
    }

    #[test]
    fn test_date_asc() {
        let a = story("2023-05-02", "a", 1);
        let b = story("2021", "b", 2);
        let c = story("2023.01", "c", 3);
        let sorted = sort_flat(&[&a, &b, &c], SortOrder::DateAsc);
        assert_eq!(dates(&sorted), vec!["2021", "2023.01", "2023-05-02"]);
    }

    #[test]
    fn test_created_orders() {
        let a = story("", "a", 5);
        let b = story("", "b", 1);
        let c = story("", "c", 3);
        let asc = sort_flat(&[&a, &b, &c], SortOrder::CreatedAsc);
        let titles: Vec<_> = asc.iter().map(|r| r.story_title.as_str()).collect();
        assert_eq!(titles, vec!["b", "c", "a"]);

        let desc = sort_flat(&[&a, &b, &c], SortOrder::CreatedDesc);
        let titles: Vec<_> = desc.iter().map(|r| r.story_title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_title_orders_are_stable() {
        let a = story("1", "same", 1);
        let b = story("2", "alpha", 2);
        let c = story("3", "same", 3);
        let asc = sort_flat(&[&a, &b, &c], SortOrder::TitleAsc);
        assert_eq!(dates(&asc), vec!["2", "1", "3"]);

        let desc = sort_flat(&[&a, &b, &c], SortOrder::TitleDesc);
        assert_eq!(dates(&desc), vec!["1", "3", "2"]);
    }

    #[test]
    fn test_inconsistent_comparator_does_not_panic() {
        // Valid dates order a before b, but the sequence fallback forms a cycle via c.
        let a = story("2023-01-01", "a", 1);
        let b = story("2022-01-01", "b", 3);
        let c = story("garbage", "c", 2);
        let records = [&a, &b, &c, &a, &c, &b];
        let sorted = sort_flat(&records, SortOrder::DateDesc);
        assert_eq!(sorted.len(), records.len());
    }

    #[test]
    fn test_parse_activity_date_formats() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day);
        assert_eq!(parse_activity_date("2023-05-17"), d(2023, 5, 17));
        assert_eq!(parse_activity_date("2023.05"), d(2023, 5, 1));
        assert_eq!(parse_activity_date("2023. 05. 17."), d(2023, 5, 17));
        assert_eq!(parse_activity_date("2023/5/7"), d(2023, 5, 7));
        assert_eq!(parse_activity_date("2021"), d(2021, 1, 1));
        assert_eq!(parse_activity_date(""), None);
        assert_eq!(parse_activity_date("지난 여름"), None);
        assert_eq!(parse_activity_date("2023-13"), None);
        assert_eq!(parse_activity_date("123"), None);
    }

    #[test]
    fn test_stable_sort_by_keeps_equal_order() {
        let mut items = [(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        stable_sort_by(&mut items, |x, y| x.0.cmp(&y.0));
        assert_eq!(items, [(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }
}
