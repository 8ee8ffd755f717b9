//! Axum route handlers for the Report API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::chart::radar::{JobFitChart, RadarLayout, RadarSvg};
use crate::errors::AppError;
use crate::experiences::store::list_all;
use crate::report::generator::generate_report;
use crate::report::models::CareerReport;
use crate::report::share::{load_shared_report, share_report, ShareLink};
use crate::state::AppState;

const CHART_RADIUS: f64 = 100.0;
const CHART_CENTER: f64 = 150.0;

#[derive(Debug, Deserialize)]
pub struct GenerateReportRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct RankedChart {
    pub chart: JobFitChart,
    pub svg: RadarSvg,
}

#[derive(Debug, Serialize)]
pub struct GenerateReportResponse {
    pub report: CareerReport,
    pub charts: Vec<RankedChart>,
}

#[derive(Debug, Deserialize)]
pub struct ShareReportRequest {
    pub user_id: Uuid,
    pub report: CareerReport,
}

/// POST /api/v1/reports
///
/// Analyses all of the user's experiences. Recommendations whose radar data
/// cannot be drawn are returned in the report but get no chart.
pub async fn handle_generate_report(
    State(state): State<AppState>,
    Json(req): Json<GenerateReportRequest>,
) -> Result<Json<GenerateReportResponse>, AppError> {
    let records = list_all(state.experiences.as_ref(), req.user_id).await?;
    let report = generate_report(&state.llm, &records).await?;

    let charts = report
        .ranked_charts()
        .into_iter()
        .filter_map(|chart| match RadarLayout::build(&chart, CHART_RADIUS, CHART_CENTER) {
            Ok(layout) => Some(RankedChart {
                svg: layout.to_svg(),
                chart,
            }),
            Err(e) => {
                warn!("Skipping chart for '{}': {e}", chart.target);
                None
            }
        })
        .collect();

    Ok(Json(GenerateReportResponse { report, charts }))
}

/// POST /api/v1/reports/share
pub async fn handle_share_report(
    State(state): State<AppState>,
    Json(req): Json<ShareReportRequest>,
) -> Result<Json<ShareLink>, AppError> {
    let link = share_report(
        &state.db,
        &state.s3,
        &state.config.s3_bucket,
        &state.config.public_base_url,
        req.user_id,
        &req.report,
    )
    .await?;
    Ok(Json(link))
}

/// GET /api/v1/reports/shared/:id
pub async fn handle_get_shared_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CareerReport>, AppError> {
    let report = load_shared_report(&state.db, &state.s3, &state.config.s3_bucket, id).await?;
    Ok(Json(report))
}
