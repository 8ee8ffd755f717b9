// Radar chart support for the job-fit dashboard.
// Pure geometry; no I/O outside the handler.

pub mod geometry;
pub mod handlers;
pub mod radar;

pub use geometry::{polygon_points, svg_points, Point};
pub use radar::{JobFitChart, RadarDatum, RadarLayout};
