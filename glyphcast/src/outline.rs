//! Turns decoded glyph outlines into flat polygonal contours. Runs of
//! off-curve points between two on-curve anchors form a single bezier curve
//! that gets sampled at fixed parameter steps.

use crate::geom::Point;
use ttf::{Glyph, GlyphPoint};

/// Number of line segments each bezier curve is approximated with. Two is
/// coarse but holds up at asteroid-HUD text sizes.
const BEZIER_SUBDIVISIONS: usize = 2;

/// Flattens a glyph (and, recursively, its components) into closed polygonal
/// contours in design units.
pub fn flatten_glyph(glyph: &Glyph) -> Vec<Vec<Point>> {
    let mut contours = Vec::with_capacity(glyph.contour_count());
    collect_contours(glyph, &mut contours);
    contours
}

fn collect_contours(glyph: &Glyph, contours: &mut Vec<Vec<Point>>) {
    let mut start = 0;
    for &end in &glyph.end_point_indices {
        let end = usize::from(end);
        if end < glyph.points.len() && start <= end {
            contours.push(flatten_contour(&glyph.points[start..=end]));
        }
        start = end + 1;
    }
    for component in &glyph.components {
        collect_contours(component, contours);
    }
}

fn flatten_contour(points: &[GlyphPoint]) -> Vec<Point> {
    // rotate the contour to start at an on-curve point so every bezier run
    // sits between two anchors
    let first_on = match points.iter().position(|p| p.on_curve) {
        Some(i) => i,
        None => return Vec::new(),
    };

    let mut flattened = Vec::with_capacity(points.len() * BEZIER_SUBDIVISIONS);
    let mut control = Vec::new();
    for i in 0..points.len() {
        let point = points[(first_on + i) % points.len()];
        let p = Point::new(point.x, point.y);
        if !point.on_curve {
            control.push(p);
        } else if control.is_empty() {
            flattened.push(p);
        } else {
            let from = *flattened.last().unwrap();
            sample_curve(from, &control, p, &mut flattened);
            flattened.push(p);
            control.clear();
        }
    }

    // trailing off-curve points curve back to the contour start
    if !control.is_empty() {
        let from = *flattened.last().unwrap();
        let to = flattened[0];
        sample_curve(from, &control, to, &mut flattened);
    }

    flattened
}

/// Pushes the interior samples of the bezier curve spanned by `from`, the
/// control points and `to`. The anchors themselves are not emitted.
fn sample_curve(from: Point, control: &[Point], to: Point, out: &mut Vec<Point>) {
    let mut polygon = Vec::with_capacity(control.len() + 2);
    polygon.push(from);
    polygon.extend_from_slice(control);
    polygon.push(to);

    for step in 1..BEZIER_SUBDIVISIONS {
        let t = step as f32 / BEZIER_SUBDIVISIONS as f32;
        out.push(bezier_point(&polygon, t));
    }
}

/// Evaluates the bezier curve defined by `polygon` at `t` using the
/// Bernstein basis.
fn bezier_point(polygon: &[Point], t: f32) -> Point {
    let degree = polygon.len() - 1;
    let mut x = 0.0;
    let mut y = 0.0;
    for (k, p) in polygon.iter().enumerate() {
        let basis = binomial(degree, k) as f32
            * t.powi(k as i32)
            * (1.0 - t).powi((degree - k) as i32);
        x += basis * p.x;
        y += basis * p.y;
    }
    Point::new(x, y)
}

fn binomial(n: usize, k: usize) -> u64 {
    let k = k.min(n - k);
    let mut result = 1u64;
    for i in 0..k {
        result = result * (n - i) as u64 / (i + 1) as u64;
    }
    result
}
