use serde::{Deserialize, Serialize};

use crate::chart::radar::{JobFitChart, RadarDatum, WeakSkill};

/// Keywords for the tag cloud plus a short narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSection {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecommendation {
    pub title: String,
    pub fit_score: f64,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub radar: Vec<RadarDatum>,
    #[serde(default)]
    pub strength_tags: Vec<String>,
    #[serde(default)]
    pub weak_skills: Vec<WeakSkill>,
    #[serde(default)]
    pub related_experiences: Vec<String>,
}

impl JobRecommendation {
    pub fn to_chart(&self, rank: u32) -> JobFitChart {
        JobFitChart {
            target: self.title.clone(),
            fit_score: self.fit_score,
            rank,
            radar: self.radar.clone(),
            strength_tags: self.strength_tags.clone(),
            weak_skills: self.weak_skills.clone(),
            related_experiences: self.related_experiences.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceSummary {
    pub activity_name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub competencies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorySummary {
    pub story_title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub competencies: Vec<String>,
}

/// The fixed-schema report returned by the model. Every top-level section is
/// required; a response missing one is treated as malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerReport {
    pub strengths: InsightSection,
    pub growth_opportunities: InsightSection,
    pub job_recommendations: Vec<JobRecommendation>,
    pub experience_summaries: Vec<ExperienceSummary>,
    pub story_summaries: Vec<StorySummary>,
    pub summary: String,
}

impl CareerReport {
    /// Recommendations ranked by fit score, best first, as chart inputs.
    /// Ties keep the model's order.
    pub fn ranked_charts(&self) -> Vec<JobFitChart> {
        let mut ranked: Vec<&JobRecommendation> = self.job_recommendations.iter().collect();
        ranked.sort_by(|a, b| b.fit_score.total_cmp(&a.fit_score));
        ranked
            .into_iter()
            .enumerate()
            .map(|(i, rec)| rec.to_chart(i as u32 + 1))
            .collect()
    }
}
