//! Job-fit radar chart: input contract, validation and layout.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chart::geometry::{polygon_points, svg_points, Point};

/// Scores are percentages.
pub const MAX_SCORE: f64 = 100.0;
/// Guide rings as fractions of the reference polygon.
pub const GUIDE_RINGS: [f64; 3] = [0.25, 0.5, 0.75];
pub const MIN_AXES: usize = 3;
const LABEL_OFFSET: f64 = 1.15;
const TOP_STRENGTHS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarDatum {
    pub axis: String,
    pub my_score: f64,
    pub avg_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakSkill {
    pub skill: String,
    #[serde(default)]
    pub checklist: Vec<String>,
}

/// Everything the job-fit dashboard renders for one target role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFitChart {
    pub target: String,
    pub fit_score: f64,
    pub rank: u32,
    pub radar: Vec<RadarDatum>,
    #[serde(default)]
    pub strength_tags: Vec<String>,
    #[serde(default)]
    pub weak_skills: Vec<WeakSkill>,
    #[serde(default)]
    pub related_experiences: Vec<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("Radar chart needs at least 3 axes, got {found}")]
    TooFewAxes { found: usize },

    #[error("Score for axis '{axis}' is not a finite number")]
    NonFiniteScore { axis: String },

    #[error("Fit score {0} is outside 0-100")]
    FitScoreOutOfRange(f64),
}

impl JobFitChart {
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.radar.len() < MIN_AXES {
            return Err(ChartError::TooFewAxes {
                found: self.radar.len(),
            });
        }
        if let Some(bad) = self
            .radar
            .iter()
            .find(|d| !d.my_score.is_finite() || !d.avg_score.is_finite())
        {
            return Err(ChartError::NonFiniteScore {
                axis: bad.axis.clone(),
            });
        }
        if !(0.0..=MAX_SCORE).contains(&self.fit_score) {
            return Err(ChartError::FitScoreOutOfRange(self.fit_score));
        }
        Ok(())
    }

    pub fn top_strengths(&self) -> &[String] {
        let n = self.strength_tags.len().min(TOP_STRENGTHS);
        &self.strength_tags[..n]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelAnchor {
    pub axis: String,
    pub point: Point,
}

/// Vertex sets for every polygon in a radar chart.
#[derive(Debug, Clone, Serialize)]
pub struct RadarLayout {
    pub reference: Vec<Point>,
    pub rings: Vec<Vec<Point>>,
    pub mine: Vec<Point>,
    pub average: Vec<Point>,
    pub label_anchors: Vec<LabelAnchor>,
}

/// The same layout as SVG `points` attributes.
#[derive(Debug, Clone, Serialize)]
pub struct RadarSvg {
    pub reference: String,
    pub rings: Vec<String>,
    pub mine: String,
    pub average: String,
}

impl RadarLayout {
    pub fn build(chart: &JobFitChart, radius: f64, center: f64) -> Result<Self, ChartError> {
        chart.validate()?;
        let n = chart.radar.len();

        let full = vec![MAX_SCORE; n];
        let reference = polygon_points(&full, MAX_SCORE, radius, center);
        let rings = GUIDE_RINGS
            .iter()
            .map(|fraction| polygon_points(&vec![MAX_SCORE * fraction; n], MAX_SCORE, radius, center))
            .collect();

        let mine: Vec<f64> = chart.radar.iter().map(|d| d.my_score).collect();
        let average: Vec<f64> = chart.radar.iter().map(|d| d.avg_score).collect();

        let label_anchors = polygon_points(&full, MAX_SCORE, radius * LABEL_OFFSET, center)
            .into_iter()
            .zip(&chart.radar)
            .map(|(point, datum)| LabelAnchor {
                axis: datum.axis.clone(),
                point,
            })
            .collect();

        Ok(Self {
            reference,
            rings,
            mine: polygon_points(&mine, MAX_SCORE, radius, center),
            average: polygon_points(&average, MAX_SCORE, radius, center),
            label_anchors,
        })
    }

    pub fn to_svg(&self) -> RadarSvg {
        RadarSvg {
            reference: svg_points(&self.reference),
            rings: self.rings.iter().map(|r| svg_points(r)).collect(),
            mine: svg_points(&self.mine),
            average: svg_points(&self.average),
        }
    }
}
