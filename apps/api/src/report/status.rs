//! Report lifecycle for interactive callers.
//!
//! A new request always clears the previous report first, so a failure never
//! leaves stale or half-filled data behind.

use crate::llm_client::CompletionBackend;
use crate::models::experience::ExperienceRecord;
use crate::report::generator::{generate_report, ReportError};
use crate::report::models::CareerReport;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ReportState {
    #[default]
    Idle,
    Generating,
    Ready(CareerReport),
    Failed {
        message: String,
        retryable: bool,
    },
}

impl ReportState {
    /// Drops any previous report and marks a request as outstanding.
    /// Returns `false` if one is already running.
    pub fn begin(&mut self) -> bool {
        if matches!(self, ReportState::Generating) {
            return false;
        }
        *self = ReportState::Generating;
        true
    }

    pub fn complete(&mut self, result: Result<CareerReport, ReportError>) {
        *self = match result {
            Ok(report) => ReportState::Ready(report),
            Err(e) => ReportState::Failed {
                retryable: !matches!(e, ReportError::NoExperiences),
                message: user_message(&e).to_string(),
            },
        };
    }

    pub fn report(&self) -> Option<&CareerReport> {
        match self {
            ReportState::Ready(report) => Some(report),
            _ => None,
        }
    }

    /// Runs one generation cycle. A second call while generating is a no-op.
    pub async fn run(&mut self, backend: &dyn CompletionBackend, records: &[ExperienceRecord]) {
        if !self.begin() {
            return;
        }
        let result = generate_report(backend, records).await;
        self.complete(result);
    }
}

fn user_message(e: &ReportError) -> &'static str {
    match e {
        ReportError::NoExperiences => "분석할 경험이 없습니다. 경험을 먼저 등록해 주세요.",
        ReportError::MalformedResponse(_) => "리포트를 생성하지 못했습니다. 다시 시도해 주세요.",
        ReportError::Network(_) => "네트워크 오류가 발생했습니다. 다시 시도해 주세요.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::generator::parse_report;
    use crate::report::generator::tests::{CannedBackend, VALID_REPORT};

    fn records() -> Vec<ExperienceRecord> {
        vec![ExperienceRecord {
            activity_name: "동아리".to_string(),
            ..Default::default()
        }]
    }

    #[tokio::test]
    async fn test_not_json_clears_prior_report() {
        let mut state = ReportState::Ready(parse_report(VALID_REPORT).unwrap());
        state.run(&CannedBackend::ok("not json"), &records()).await;

        assert!(state.report().is_none());
        match state {
            ReportState::Failed { retryable, .. } => assert!(retryable),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_success_then_retry_after_failure() {
        let mut state = ReportState::default();
        state.run(&CannedBackend::failing(500), &records()).await;
        assert!(matches!(state, ReportState::Failed { .. }));

        state.run(&CannedBackend::ok(VALID_REPORT), &records()).await;
        assert_eq!(state.report().map(|r| r.summary.as_str()), Some("협업에 강한 개발자 지망생"));
    }

    #[test]
    fn test_begin_while_generating_is_rejected() {
        let mut state = ReportState::default();
        assert!(state.begin());
        assert!(!state.begin());
    }

    #[test]
    fn test_no_experiences_is_not_retryable() {
        let mut state = ReportState::default();
        state.begin();
        state.complete(Err(ReportError::NoExperiences));
        assert_eq!(
            state,
            ReportState::Failed {
                message: user_message(&ReportError::NoExperiences).to_string(),
                retryable: false,
            }
        );
    }
}
