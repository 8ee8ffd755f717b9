// Story Organizer: search filter -> grouping strategy -> stable sort -> view.
// Pure and synchronous. Views are rebuilt from scratch on every input change.

pub mod filter;
pub mod grouping;
pub mod handlers;
pub mod session;
pub mod sort;

use serde::Serialize;

use crate::models::experience::ExperienceRecord;
use crate::organizer::filter::filter_by_query;
use crate::organizer::grouping::{
    group_by_competency, group_by_year_and_category, CategoryBucket,
};
use crate::organizer::session::{ExpandState, GroupKey, ViewMode, ViewState};
use crate::organizer::sort::sort_flat;

#[derive(Debug, Clone, Serialize)]
pub struct YearGroup<'a> {
    pub key: GroupKey,
    pub year: String,
    pub expanded: bool,
    pub categories: Vec<CategoryBucket<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompetencyGroup<'a> {
    pub key: GroupKey,
    pub tag: String,
    pub expanded: bool,
    pub records: Vec<&'a ExperienceRecord>,
}

/// Display-ready arrangement of story records.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum StoryView<'a> {
    /// The user has no story records at all.
    Empty,
    /// Stories exist but none match the query.
    NoResults { query: String },
    ByYear { groups: Vec<YearGroup<'a>> },
    ByCompetency { groups: Vec<CompetencyGroup<'a>> },
    Flat { records: Vec<&'a ExperienceRecord> },
}

impl StoryView<'_> {
    pub fn group_keys(&self) -> Vec<&GroupKey> {
        match self {
            StoryView::ByYear { groups } => groups.iter().map(|g| &g.key).collect(),
            StoryView::ByCompetency { groups } => groups.iter().map(|g| &g.key).collect(),
            _ => Vec::new(),
        }
    }

    pub fn record_count(&self) -> usize {
        match self {
            StoryView::Empty | StoryView::NoResults { .. } => 0,
            StoryView::ByYear { groups } => groups
                .iter()
                .flat_map(|g| &g.categories)
                .map(|c| c.records.len())
                .sum(),
            StoryView::ByCompetency { groups } => groups.iter().map(|g| g.records.len()).sum(),
            StoryView::Flat { records } => records.len(),
        }
    }
}

/// Builds the story view for `records` under `state`.
///
/// Only story-kind records are shown. A non-blank query overrides the grouping
/// mode: matches come back flat, in the current sort order.
pub fn organize<'a>(records: &'a [ExperienceRecord], state: &ViewState) -> StoryView<'a> {
    let stories: Vec<&ExperienceRecord> = records.iter().filter(|r| r.is_story()).collect();
    if stories.is_empty() {
        return StoryView::Empty;
    }

    let query = state.query.trim();
    let matched = filter_by_query(&stories, query);
    if matched.is_empty() {
        return StoryView::NoResults {
            query: query.to_string(),
        };
    }
    if !query.is_empty() {
        return StoryView::Flat {
            records: sort_flat(&matched, state.sort),
        };
    }

    match state.mode {
        ViewMode::ByYear => StoryView::ByYear {
            groups: group_by_year_and_category(&matched)
                .into_iter()
                .map(|bucket| {
                    let key = GroupKey::Year(bucket.year.clone());
                    YearGroup {
                        expanded: state.expand.is_expanded(&key),
                        key,
                        year: bucket.year,
                        categories: bucket.categories,
                    }
                })
                .collect(),
        },
        ViewMode::ByCompetency => StoryView::ByCompetency {
            groups: group_by_competency(&matched)
                .into_iter()
                .map(|bucket| {
                    let key = GroupKey::Competency(bucket.tag.clone());
                    CompetencyGroup {
                        expanded: state.expand.is_expanded(&key),
                        key,
                        tag: bucket.tag,
                        records: bucket.records,
                    }
                })
                .collect(),
        },
        ViewMode::Flat => StoryView::Flat {
            records: sort_flat(&matched, state.sort),
        },
    }
}

/// Rebuilds the view and merges its group keys into `expand`.
pub fn refresh<'a>(records: &'a [ExperienceRecord], state: &mut ViewState) -> StoryView<'a> {
    let view = organize(records, state);
    sync_expand(&mut state.expand, &view);
    view
}

fn sync_expand(expand: &mut ExpandState, view: &StoryView<'_>) {
    expand.sync(view.group_keys());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::experience::ExperienceKind;
    use crate::organizer::grouping::{UNCATEGORIZED, UNKNOWN_YEAR};
    use crate::organizer::sort::SortOrder;

    fn story(title: &str, date: &str, tags: &str, seq: i64) -> ExperienceRecord {
        ExperienceRecord {
            kind: ExperienceKind::Story,
            story_title: title.to_string(),
            activity_date: date.to_string(),
            core_competency: tags.to_string(),
            sequence_number: seq,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_stories_is_empty_not_no_results() {
        let basic = ExperienceRecord {
            story_title: "basic entry".to_string(),
            ..Default::default()
        };
        let records = [basic];
        let view = organize(&records, &ViewState::default());
        assert!(matches!(view, StoryView::Empty));
    }

    #[test]
    fn test_no_match_is_no_results() {
        let records = vec![story("해커톤", "2023", "", 1)];
        let state = ViewState {
            query: "zzz".to_string(),
            ..Default::default()
        };
        match organize(&records, &state) {
            StoryView::NoResults { query } => assert_eq!(query, "zzz"),
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn test_query_overrides_grouping() {
        let records = vec![
            story("Rust 세미나", "2022.11", "학습", 1),
            story("Rust 스터디", "2023.05", "학습", 2),
            story("봉사", "2021", "", 3),
        ];
        let state = ViewState {
            query: "rust".to_string(),
            mode: ViewMode::ByCompetency,
            sort: SortOrder::DateDesc,
            ..Default::default()
        };
        match organize(&records, &state) {
            StoryView::Flat { records } => {
                let titles: Vec<_> = records.iter().map(|r| r.story_title.as_str()).collect();
                assert_eq!(titles, vec!["Rust 스터디", "Rust 세미나"]);
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn test_year_mode_skips_basic_records() {
        let mut basic = story("basic", "2020", "", 0);
        basic.kind = ExperienceKind::Basic;
        let records = vec![basic, story("a", "2023", "", 1), story("b", "", "", 2)];
        let view = organize(&records, &ViewState::default());
        assert_eq!(view.record_count(), 2);
        let keys = view.group_keys();
        assert_eq!(
            keys,
            vec![
                &GroupKey::Year("2023".to_string()),
                &GroupKey::Year(UNKNOWN_YEAR.to_string())
            ]
        );
    }

    #[test]
    fn test_toggled_group_survives_new_group() {
        let mut records = vec![story("a", "2023", "리더십", 1)];
        let mut state = ViewState {
            mode: ViewMode::ByCompetency,
            ..Default::default()
        };
        refresh(&records, &mut state);
        let leadership = GroupKey::Competency("리더십".to_string());
        state.expand.toggle(&leadership);

        records.push(story("b", "2024", "", 2));
        let view = refresh(&records, &mut state);
        let StoryView::ByCompetency { groups } = view else {
            panic!("expected competency view");
        };
        let flags: Vec<_> = groups.iter().map(|g| (g.tag.as_str(), g.expanded)).collect();
        assert_eq!(flags, vec![("리더십", false), (UNCATEGORIZED, true)]);
    }

    #[test]
    fn test_flat_mode_uses_sort_order() {
        let records = vec![story("b", "", "", 1), story("a", "", "", 2)];
        let state = ViewState {
            mode: ViewMode::Flat,
            sort: SortOrder::TitleAsc,
            ..Default::default()
        };
        let StoryView::Flat { records: sorted } = organize(&records, &state) else {
            panic!("expected flat view");
        };
        assert_eq!(sorted[0].story_title, "a");
    }
}
