use serde::Serialize;

use crate::models::experience::ExperienceRecord;

/// The content fields of an experience, as sent to the model.
/// Identifiers, owners and timestamps are left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedExperience {
    pub kind: &'static str,
    pub activity_name: String,
    pub activity_type: String,
    pub activity_date: String,
    pub story_title: String,
    pub story_summary: String,
    pub detailed_content: String,
    pub core_competency: Vec<String>,
    pub job_alignment: Vec<String>,
    pub sequence_number: i64,
}

impl From<&ExperienceRecord> for SanitizedExperience {
    fn from(record: &ExperienceRecord) -> Self {
        SanitizedExperience {
            kind: record.kind.as_str(),
            activity_name: record.activity_name.clone(),
            activity_type: record.activity_type.clone(),
            activity_date: record.activity_date.clone(),
            story_title: record.story_title.clone(),
            story_summary: record.story_summary.clone(),
            detailed_content: record.detailed_content.clone(),
            core_competency: owned(record.competency_tags()),
            job_alignment: owned(record.job_alignment_tags()),
            sequence_number: record.sequence_number,
        }
    }
}

fn owned(tags: Vec<&str>) -> Vec<String> {
    tags.into_iter().map(str::to_string).collect()
}

pub fn sanitize(records: &[ExperienceRecord]) -> Vec<SanitizedExperience> {
    records.iter().map(SanitizedExperience::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::experience::ExperienceKind;
    use uuid::Uuid;

    #[test]
    fn test_sanitize_drops_identity_and_timestamps() {
        let record = ExperienceRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind: ExperienceKind::Story,
            story_title: "해커톤 우승".to_string(),
            core_competency: "협업, 문제해결".to_string(),
            sequence_number: 4,
            ..Default::default()
        };
        let value = serde_json::to_value(sanitize(&[record])).unwrap();
        let entry = &value[0];
        assert_eq!(entry["kind"], "story");
        assert_eq!(entry["storyTitle"], "해커톤 우승");
        assert_eq!(entry["coreCompetency"][1], "문제해결");
        assert_eq!(entry["sequenceNumber"], 4);
        assert!(entry.get("id").is_none());
        assert!(entry.get("userId").is_none());
        assert!(entry.get("createdAt").is_none());
    }
}
