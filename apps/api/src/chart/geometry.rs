use std::f64::consts::{FRAC_PI_2, PI};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Maps N scalar values onto the vertices of a radar polygon.
///
/// Vertex `i` sits at angle `-π/2 + i·2π/N` (vertex 0 points up), at distance
/// `radius · values[i] / max` from `(center, center)`. Values above `max` are
/// not clamped and land outside the reference polygon. A non-positive or
/// non-finite `max` places every vertex on the center.
pub fn polygon_points(values: &[f64], max: f64, radius: f64, center: f64) -> Vec<Point> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let step = 2.0 * PI / n as f64;

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let ratio = if max > 0.0 && max.is_finite() {
                value / max
            } else {
                0.0
            };
            let angle = -FRAC_PI_2 + i as f64 * step;
            let distance = radius * ratio;
            Point {
                x: center + distance * angle.cos(),
                y: center + distance * angle.sin(),
            }
        })
        .collect()
}

/// Formats vertices as an SVG `points` attribute: `"x,y x,y ..."`.
pub fn svg_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_full_values_lie_on_radius() {
        for n in 3..=8 {
            let values = vec![100.0; n];
            let points = polygon_points(&values, 100.0, 80.0, 120.0);
            assert_eq!(points.len(), n);
            let center = Point { x: 120.0, y: 120.0 };
            for p in points {
                assert!((p.distance_to(center) - 80.0).abs() < EPS, "{p:?}");
            }
        }
    }

    #[test]
    fn test_zero_values_collapse_to_center() {
        let points = polygon_points(&[0.0, 0.0, 0.0, 0.0, 0.0], 100.0, 80.0, 120.0);
        for p in points {
            assert_eq!(p, Point { x: 120.0, y: 120.0 });
        }
    }

    #[test]
    fn test_first_vertex_points_up() {
        let points = polygon_points(&[50.0, 50.0, 50.0], 100.0, 100.0, 150.0);
        assert!((points[0].x - 150.0).abs() < EPS);
        assert!((points[0].y - 100.0).abs() < EPS);
    }

    #[test]
    fn test_empty_values() {
        assert!(polygon_points(&[], 100.0, 80.0, 120.0).is_empty());
    }

    #[test]
    fn test_overflow_is_not_clamped() {
        let points = polygon_points(&[150.0, 100.0, 100.0], 100.0, 80.0, 0.0);
        let origin = Point { x: 0.0, y: 0.0 };
        assert!((points[0].distance_to(origin) - 120.0).abs() < EPS);
    }

    #[test]
    fn test_deterministic() {
        let values = [12.5, 99.0, 43.0, 71.25, 3.0, 60.0];
        let a = polygon_points(&values, 100.0, 90.0, 100.0);
        let b = polygon_points(&values, 100.0, 90.0, 100.0);
        for (p, q) in a.iter().zip(&b) {
            assert_eq!(p.x.to_bits(), q.x.to_bits());
            assert_eq!(p.y.to_bits(), q.y.to_bits());
        }
    }

    #[test]
    fn test_zero_max_collapses_to_center() {
        let points = polygon_points(&[10.0, 20.0, 30.0], 0.0, 80.0, 5.0);
        assert!(points.iter().all(|p| *p == Point { x: 5.0, y: 5.0 }));
    }

    #[test]
    fn test_svg_points_format() {
        let points = [Point { x: 1.0, y: 2.5 }, Point { x: 3.333, y: 4.0 }];
        assert_eq!(svg_points(&points), "1.00,2.50 3.33,4.00");
    }
}
