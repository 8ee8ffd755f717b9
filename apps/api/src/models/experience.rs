use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceKind {
    #[default]
    Basic,
    Story,
}

impl ExperienceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceKind::Basic => "basic",
            ExperienceKind::Story => "story",
        }
    }

    /// Unknown or missing kinds read as `Basic` so they never reach the story views.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "story" => ExperienceKind::Story,
            _ => ExperienceKind::Basic,
        }
    }
}

/// A user-authored experience entry. Every content field defaults to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: ExperienceKind,
    #[serde(deserialize_with = "nullable_text")]
    pub activity_name: String,
    #[serde(deserialize_with = "nullable_text")]
    pub activity_type: String,
    #[serde(deserialize_with = "nullable_text")]
    pub activity_date: String,
    #[serde(deserialize_with = "nullable_text")]
    pub story_title: String,
    #[serde(deserialize_with = "nullable_text")]
    pub story_summary: String,
    #[serde(deserialize_with = "nullable_text")]
    pub detailed_content: String,
    #[serde(deserialize_with = "tag_list")]
    pub core_competency: String,
    #[serde(deserialize_with = "tag_list")]
    pub job_alignment: String,
    pub created_at: DateTime<Utc>,
    pub sequence_number: i64,
}

impl ExperienceRecord {
    pub fn is_story(&self) -> bool {
        self.kind == ExperienceKind::Story
    }

    pub fn competency_tags(&self) -> Vec<&str> {
        split_tags(&self.core_competency)
    }

    pub fn job_alignment_tags(&self) -> Vec<&str> {
        split_tags(&self.job_alignment)
    }
}

/// Splits a comma-separated tag field, trimming and dropping empty entries.
pub fn split_tags(field: &str) -> Vec<&str> {
    field
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Reads an explicit `null` as an empty string.
fn nullable_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a tag field as a string, an array of strings, or null.
fn tag_list<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Array(items) => items
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    })
}

/// Raw `experiences` row. Nullable text columns collapse to empty strings on conversion.
#[derive(Debug, Clone, FromRow)]
pub struct ExperienceRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: Option<String>,
    pub activity_name: Option<String>,
    pub activity_type: Option<String>,
    pub activity_date: Option<String>,
    pub story_title: Option<String>,
    pub story_summary: Option<String>,
    pub detailed_content: Option<String>,
    pub core_competency: Option<String>,
    pub job_alignment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub sequence_number: i64,
}

impl From<ExperienceRow> for ExperienceRecord {
    fn from(row: ExperienceRow) -> Self {
        ExperienceRecord {
            id: row.id,
            user_id: row.user_id,
            kind: ExperienceKind::parse(row.kind.as_deref().unwrap_or_default()),
            activity_name: row.activity_name.unwrap_or_default(),
            activity_type: row.activity_type.unwrap_or_default(),
            activity_date: row.activity_date.unwrap_or_default(),
            story_title: row.story_title.unwrap_or_default(),
            story_summary: row.story_summary.unwrap_or_default(),
            detailed_content: row.detailed_content.unwrap_or_default(),
            core_competency: row.core_competency.unwrap_or_default(),
            job_alignment: row.job_alignment.unwrap_or_default(),
            created_at: row.created_at,
            sequence_number: row.sequence_number,
        }
    }
}

/// Body of a create request. Missing fields are stored as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewExperience {
    pub user_id: Uuid,
    pub kind: ExperienceKind,
    #[serde(deserialize_with = "nullable_text")]
    pub activity_name: String,
    #[serde(deserialize_with = "nullable_text")]
    pub activity_type: String,
    #[serde(deserialize_with = "nullable_text")]
    pub activity_date: String,
    #[serde(deserialize_with = "nullable_text")]
    pub story_title: String,
    #[serde(deserialize_with = "nullable_text")]
    pub story_summary: String,
    #[serde(deserialize_with = "nullable_text")]
    pub detailed_content: String,
    #[serde(deserialize_with = "tag_list")]
    pub core_competency: String,
    #[serde(deserialize_with = "tag_list")]
    pub job_alignment: String,
}

/// Field-level partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperiencePatch {
    pub user_id: Uuid,
    pub kind: Option<ExperienceKind>,
    pub activity_name: Option<String>,
    pub activity_type: Option<String>,
    pub activity_date: Option<String>,
    pub story_title: Option<String>,
    pub story_summary: Option<String>,
    pub detailed_content: Option<String>,
    pub core_competency: Option<String>,
    pub job_alignment: Option<String>,
}

impl ExperiencePatch {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.activity_name.is_none()
            && self.activity_type.is_none()
            && self.activity_date.is_none()
            && self.story_title.is_none()
            && self.story_summary.is_none()
            && self.detailed_content.is_none()
            && self.core_competency.is_none()
            && self.job_alignment.is_none()
    }
}

/// One forward-only page of records, newest first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExperiencePage {
    pub records: Vec<ExperienceRecord>,
    /// `sequence_number` of the last record; pass back as `cursor` for the next page.
    pub next_cursor: Option<i64>,
    pub has_more: bool,
}
