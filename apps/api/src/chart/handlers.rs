use axum::Json;
use serde::{Deserialize, Serialize};

use crate::chart::radar::{JobFitChart, RadarLayout, RadarSvg};
use crate::errors::AppError;

const DEFAULT_RADIUS: f64 = 100.0;
const DEFAULT_CENTER: f64 = 150.0;

#[derive(Debug, Deserialize)]
pub struct RadarRequest {
    pub chart: JobFitChart,
    pub radius: Option<f64>,
    pub center: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct RadarResponse {
    pub layout: RadarLayout,
    pub svg: RadarSvg,
    pub top_strengths: Vec<String>,
}

/// POST /api/v1/charts/radar
pub async fn handle_radar_layout(
    Json(req): Json<RadarRequest>,
) -> Result<Json<RadarResponse>, AppError> {
    let layout = RadarLayout::build(
        &req.chart,
        req.radius.unwrap_or(DEFAULT_RADIUS),
        req.center.unwrap_or(DEFAULT_CENTER),
    )?;
    let svg = layout.to_svg();
    Ok(Json(RadarResponse {
        layout,
        svg,
        top_strengths: req.chart.top_strengths().to_vec(),
    }))
}
