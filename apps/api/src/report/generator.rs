//! Report generation: one model call, strict parse, no partial recovery.

use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::prompts::GROUNDING_INSTRUCTION;
use crate::llm_client::{strip_json_fences, CompletionBackend, LlmError};
use crate::models::experience::ExperienceRecord;
use crate::report::models::CareerReport;
use crate::report::prompts::{REPORT_PROMPT_TEMPLATE, REPORT_SYSTEM};
use crate::report::sanitize::sanitize;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("No experiences to analyse. Add an experience before requesting a report.")]
    NoExperiences,

    #[error("Model response was not a valid report: {0}")]
    MalformedResponse(String),

    #[error("Report request failed: {0}")]
    Network(String),
}

impl From<LlmError> for ReportError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Parse(_) | LlmError::EmptyContent => {
                ReportError::MalformedResponse(e.to_string())
            }
            LlmError::Http(_) | LlmError::Api { .. } => ReportError::Network(e.to_string()),
        }
    }
}

/// Renders the report prompt for a set of experiences.
pub fn build_prompt(records: &[ExperienceRecord]) -> Result<String, ReportError> {
    let experiences_json = serde_json::to_string_pretty(&sanitize(records))
        .map_err(|e| ReportError::MalformedResponse(format!("Failed to encode experiences: {e}")))?;
    Ok(REPORT_PROMPT_TEMPLATE
        .replace("{experiences_json}", &experiences_json)
        .replace("{grounding}", GROUNDING_INSTRUCTION))
}

/// Parses model output into a report. Anything but a complete report is an error.
pub fn parse_report(text: &str) -> Result<CareerReport, ReportError> {
    let body = strip_json_fences(text);
    serde_json::from_str(body).map_err(|e| ReportError::MalformedResponse(e.to_string()))
}

/// Sends the user's experiences to the model and returns the parsed report.
pub async fn generate_report(
    backend: &dyn CompletionBackend,
    records: &[ExperienceRecord],
) -> Result<CareerReport, ReportError> {
    if records.is_empty() {
        return Err(ReportError::NoExperiences);
    }

    let prompt = build_prompt(records)?;
    info!("Requesting career report for {} experiences", records.len());

    let text = backend.complete(&prompt, REPORT_SYSTEM).await?;
    let report = parse_report(&text).inspect_err(|e| warn!("Discarding model output: {e}"))?;

    info!(
        "Career report parsed: {} job recommendations",
        report.job_recommendations.len()
    );
    Ok(report)
}
