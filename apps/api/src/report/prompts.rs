// Career report prompt templates.
// Reuses cross-cutting fragments from llm_client::prompts.

pub const REPORT_SYSTEM: &str = "\
You are a career coach for Korean university students and early-career job seekers. \
You analyse a person's recorded experiences and write an honest, specific career report in Korean. \
You MUST respond with valid JSON only. Do not use markdown fences or add explanations.";

/// Replace `{experiences_json}` before sending.
pub const REPORT_PROMPT_TEMPLATE: &str = r#"Analyse the following experiences and write a career report.

EXPERIENCES (JSON array):
{experiences_json}

OUTPUT SCHEMA (return exactly this structure, all text in Korean):
{
  "strengths": {"keywords": ["string"], "description": "string"},
  "growthOpportunities": {"keywords": ["string"], "description": "string"},
  "jobRecommendations": [
    {
      "title": "string",
      "fitScore": 0-100,
      "reason": "string",
      "radar": [{"axis": "string", "myScore": 0-100, "avgScore": 0-100}],
      "strengthTags": ["string"],
      "weakSkills": [{"skill": "string", "checklist": ["string"]}],
      "relatedExperiences": ["string"]
    }
  ],
  "experienceSummaries": [{"activityName": "string", "summary": "string", "competencies": ["string"]}],
  "storySummaries": [{"storyTitle": "string", "summary": "string", "competencies": ["string"]}],
  "summary": "string"
}

RULES:
1. Recommend exactly 3 jobs. Every job uses the same 5 radar axes, in the same order.
2. avgScore is the typical applicant for that job; myScore is this person.
3. strengthTags: at most 3 per job, strongest first.
4. Each weakSkill has 2-4 concrete checklist items.
5. One experienceSummaries entry per "basic" experience, one storySummaries entry per "story" experience.
6. {grounding}
7. Return ONLY the JSON object."#;
