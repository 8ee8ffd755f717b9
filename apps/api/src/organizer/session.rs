//! Caller-owned view state: mode, search text, sort order, expand flags and the
//! load-more pager. The organizer reads this state; it never stores any itself.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::experience::{ExperiencePage, ExperienceRecord};
use crate::organizer::sort::SortOrder;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    ByYear,
    ByCompetency,
    Flat,
}

/// Identity of a top-level group, stable across rebuilds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "label", rename_all = "snake_case")]
pub enum GroupKey {
    Year(String),
    Competency(String),
}

/// Expand/collapse flags by group key. Unknown keys read as expanded.
#[derive(Debug, Clone, Default)]
pub struct ExpandState {
    flags: HashMap<GroupKey, bool>,
}

impl ExpandState {
    pub fn with_collapsed(keys: impl IntoIterator<Item = GroupKey>) -> Self {
        Self {
            flags: keys.into_iter().map(|k| (k, false)).collect(),
        }
    }

    pub fn is_expanded(&self, key: &GroupKey) -> bool {
        self.flags.get(key).copied().unwrap_or(true)
    }

    /// Flips the flag for `key` and returns the new value.
    pub fn toggle(&mut self, key: &GroupKey) -> bool {
        let flag = self.flags.entry(key.clone()).or_insert(true);
        *flag = !*flag;
        *flag
    }

    /// Registers newly observed keys as expanded. Existing flags are left alone.
    pub fn sync<'k>(&mut self, keys: impl IntoIterator<Item = &'k GroupKey>) {
        for key in keys {
            self.flags.entry(key.clone()).or_insert(true);
        }
    }

    pub fn collapsed(&self) -> Vec<&GroupKey> {
        self.flags
            .iter()
            .filter(|(_, expanded)| !**expanded)
            .map(|(key, _)| key)
            .collect()
    }
}

/// Everything the organizer needs besides the records themselves.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub query: String,
    pub mode: ViewMode,
    pub sort: SortOrder,
    pub expand: ExpandState,
}

impl ViewState {
    /// Switches mode without touching the query, sort order or expand flags.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }
}

/// Permission to fetch the next page, handed out by [`Pager::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub cursor: Option<i64>,
}

/// Single forward-only cursor over a user's records.
///
/// At most one load is outstanding; pages are appended as they arrive and the
/// accumulated list is not re-sorted.
#[derive(Debug, Clone)]
pub struct Pager {
    records: Vec<ExperienceRecord>,
    cursor: Option<i64>,
    has_more: bool,
    loading: bool,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            cursor: None,
            has_more: true,
            loading: false,
        }
    }
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` while a load is in flight or once the cursor is exhausted.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        Some(LoadTicket {
            cursor: self.cursor,
        })
    }

    pub fn finish_load(&mut self, page: ExperiencePage) {
        self.loading = false;
        self.has_more = page.has_more;
        if page.next_cursor.is_some() {
            self.cursor = page.next_cursor;
        }
        self.records.extend(page.records);
    }

    /// Clears the in-flight flag so the caller can retry from the same cursor.
    pub fn fail_load(&mut self) {
        self.loading = false;
    }

    pub fn records(&self) -> &[ExperienceRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }
}
