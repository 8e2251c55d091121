//! Pixel-space shapes the chart backends can't draw on their own:
//! rounded bars, dashed polylines and pie slices.

use std::f64::consts::{FRAC_PI_2, PI};

const CORNER_STEPS: usize = 6;

/// Outline of a rectangle with rounded corners. Corners are given in any
/// order; the radius is capped at half the shorter side.
pub fn rounded_rect(a: (i32, i32), b: (i32, i32), radius: f64) -> Vec<(i32, i32)> {
    let (left, right) = (a.0.min(b.0) as f64, a.0.max(b.0) as f64);
    let (top, bottom) = (a.1.min(b.1) as f64, a.1.max(b.1) as f64);
    let r = radius.min((right - left) / 2.0).min((bottom - top) / 2.0);

    if r < 0.5 {
        return vec![
            (left as i32, top as i32),
            (right as i32, top as i32),
            (right as i32, bottom as i32),
            (left as i32, bottom as i32),
        ];
    }

    // Corner centers clockwise from top-left, each with its arc start angle
    let corners = [
        (left + r, top + r, PI),
        (right - r, top + r, -FRAC_PI_2),
        (right - r, bottom - r, 0.0),
        (left + r, bottom - r, FRAC_PI_2),
    ];

    let mut outline = Vec::with_capacity(corners.len() * (CORNER_STEPS + 1));
    for (cx, cy, start) in corners {
        for step in 0..=CORNER_STEPS {
            let angle = start + FRAC_PI_2 * step as f64 / CORNER_STEPS as f64;
            outline.push(to_pixel(cx + r * angle.cos(), cy + r * angle.sin()));
        }
    }
    outline
}

/// Split a polyline into dash runs of `on` pixels separated by `off` gaps.
pub fn dash_polyline(points: &[(f64, f64)], on: f64, off: f64) -> Vec<Vec<(f64, f64)>> {
    let mut dashes = Vec::new();
    if points.len() < 2 || on <= 0.0 {
        return dashes;
    }

    let mut drawing = true;
    let mut remaining = on;
    let mut current = vec![points[0]];

    for pair in points.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        let length = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
        let mut pos = 0.0;

        while length - pos > 1e-9 {
            let step = remaining.min(length - pos);
            pos += step;
            remaining -= step;
            let t = pos / length;
            let point = (x0 + (x1 - x0) * t, y0 + (y1 - y0) * t);

            if drawing {
                current.push(point);
            }
            if remaining <= 1e-9 {
                if drawing {
                    dashes.push(std::mem::take(&mut current));
                    remaining = off;
                } else {
                    current = vec![point];
                    remaining = on;
                }
                drawing = !drawing;
            }
        }
    }

    if drawing && current.len() > 1 {
        dashes.push(current);
    }
    dashes
}

/// Closed outline of a pie slice. Angles are radians, clockwise on screen
/// from 3 o'clock; the outline starts and ends at the center.
pub fn pie_slice(center: (f64, f64), radius: f64, start: f64, end: f64) -> Vec<(i32, i32)> {
    let sweep = end - start;
    let steps = ((sweep.abs() / (PI / 36.0)).ceil() as usize).max(2);

    let mut outline = Vec::with_capacity(steps + 2);
    outline.push(to_pixel(center.0, center.1));
    for step in 0..=steps {
        let angle = start + sweep * step as f64 / steps as f64;
        outline.push(to_pixel(
            center.0 + radius * angle.cos(),
            center.1 + radius * angle.sin(),
        ));
    }
    outline
}

/// Slice angle ranges for the given weights, starting at 12 o'clock.
/// Non-positive weights get no slice.
pub fn pie_angles(weights: &[f64]) -> Vec<Option<(f64, f64)>> {
    // Scale by the largest weight so the sum cannot overflow
    let peak = weights
        .iter()
        .copied()
        .filter(|w| w.is_finite())
        .fold(0.0, f64::max);
    let total: f64 = weights
        .iter()
        .filter(|w| **w > 0.0 && w.is_finite())
        .map(|w| w / peak)
        .sum();
    let mut angle = -FRAC_PI_2;
    weights
        .iter()
        .map(|&w| {
            if w <= 0.0 || !w.is_finite() || total <= 0.0 {
                return None;
            }
            let start = angle;
            angle += 2.0 * PI * (w / peak) / total;
            Some((start, angle))
        })
        .collect()
}

pub fn to_pixel(x: f64, y: f64) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_corners_without_radius() {
        let outline = rounded_rect((10, 50), (0, 0), 0.0);
        assert_eq!(outline, vec![(0, 0), (10, 0), (10, 50), (0, 50)]);
    }

    #[test]
    fn test_rounded_corners_stay_inside_box() {
        let outline = rounded_rect((0, 0), (20, 40), 5.0);
        assert_eq!(outline.len(), 4 * (CORNER_STEPS + 1));
        assert!(outline
            .iter()
            .all(|&(x, y)| (0..=20).contains(&x) && (0..=40).contains(&y)));
        // the top-left corner is cut, so no vertex sits exactly on it
        assert!(!outline.contains(&(0, 0)));
        assert!(outline.contains(&(5, 0)));
    }

    #[test]
    fn test_radius_capped_by_thin_bar() {
        // radius 10 on a 4px bar becomes 2, a semicircular cap
        let outline = rounded_rect((0, 0), (4, 100), 10.0);
        assert!(outline.contains(&(2, 0)));
        assert!(outline.contains(&(2, 100)));
        assert!(!outline.contains(&(0, 0)));
        assert!(!outline.contains(&(4, 100)));
    }

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_dashes_cover_expected_length() {
        let line = [(0.0, 0.0), (30.0, 0.0)];
        let dashes = dash_polyline(&line, 8.0, 5.0);
        // 0-8, 13-21, 26-30
        assert_eq!(dashes.len(), 3);
        assert_eq!(dashes[0].len(), 2);
        assert!(close(dashes[0][1], (8.0, 0.0)));
        assert!(close(dashes[1][0], (13.0, 0.0)));
        assert!(close(dashes[1][1], (21.0, 0.0)));
        assert!(close(*dashes[2].last().unwrap(), (30.0, 0.0)));
    }

    #[test]
    fn test_dash_bends_around_corner() {
        let line = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)];
        let dashes = dash_polyline(&line, 6.0, 2.0);
        assert_eq!(dashes.len(), 1);
        assert_eq!(dashes[0].len(), 3);
        assert!(close(dashes[0][1], (4.0, 0.0)));
        assert!(close(dashes[0][2], (4.0, 2.0)));
    }

    #[test]
    fn test_pie_angles_skip_non_positive() {
        let angles = pie_angles(&[1.0, 0.0, 3.0, -2.0]);
        assert!(angles[1].is_none() && angles[3].is_none());
        let (s0, e0) = angles[0].unwrap();
        let (s2, e2) = angles[2].unwrap();
        assert!((s0 + FRAC_PI_2).abs() < 1e-12);
        assert!((e0 - s2).abs() < 1e-12);
        assert!((e2 - s0 - 2.0 * PI).abs() < 1e-9);
        assert!(((e2 - s2) / (e0 - s0) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_pie_angles_survive_huge_weights() {
        let angles = pie_angles(&[1e308, 1e308]);
        let (s0, e0) = angles[0].unwrap();
        let (s1, e1) = angles[1].unwrap();
        assert!((e0 - s0 - PI).abs() < 1e-9);
        assert!((e1 - s1 - PI).abs() < 1e-9);
    }

    #[test]
    fn test_pie_slice_starts_at_center() {
        let slice = pie_slice((50.0, 50.0), 10.0, -FRAC_PI_2, 0.0);
        assert_eq!(slice[0], (50, 50));
        assert_eq!(slice[1], (50, 40));
        assert_eq!(*slice.last().unwrap(), (60, 50));
    }
}
