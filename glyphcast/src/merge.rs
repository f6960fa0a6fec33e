//! Merges hole contours into the filled contour that surrounds them. The ear
//! clipping triangulation only handles simple polygons, so each hole is cut
//! open along a bridge to its outer contour, turning outer plus hole into one
//! closed contour with a zero-width channel.

use std::slice;

use crate::geom::{is_clockwise, Point, Segment};
use crate::triangulate::Triangulation;

/// Splits contours into filled (clockwise) and hole (counter-clockwise)
/// shapes and splices every hole into the filled contour containing it.
/// A hole belongs to an outer contour when all of its points are inside
/// it; holes contained by no filled contour are dropped.
pub fn merge_contours(contours: Vec<Vec<Point>>) -> Vec<Vec<Point>> {
    let (outers, mut holes): (Vec<_>, Vec<_>) = contours
        .into_iter()
        .partition(|contour| is_clockwise(contour));

    let mut merged = Vec::with_capacity(outers.len());
    for outer in outers {
        let triangles: Vec<_> = Triangulation::new(slice::from_ref(&outer)).collect();

        let (contained, remaining): (Vec<_>, Vec<_>) = holes.into_iter().partition(|hole| {
            !hole.is_empty()
                && hole
                    .iter()
                    .all(|point| triangles.iter().any(|triangle| triangle.contains(*point)))
        });
        holes = remaining;

        // all cut lines are computed against the outer contour as decoded,
        // before any hole is spliced in
        let cuts: Vec<_> = contained
            .iter()
            .map(|hole| cut_line(&outer, hole))
            .collect();
        merged.push(splice(&outer, &contained, &cuts));
    }

    merged
}

/// Finds the bridge between a hole and its surrounding contour: a horizontal
/// ray cast in +x from the hole's rightmost point. Returns the index of the
/// ray origin within `hole` and the index of the crossed edge's nearer
/// endpoint within `outer`.
///
/// Panics unless the ray crosses exactly one outer edge, which holds for a
/// hole strictly inside a simple outer contour.
fn cut_line(outer: &[Point], hole: &[Point]) -> (usize, usize) {
    // rightmost hole point; the first one wins on ties
    let origin_idx = (1..hole.len()).fold(0, |best, i| {
        if hole[i].x > hole[best].x {
            i
        } else {
            best
        }
    });
    let origin = hole[origin_idx];

    let mut crossed = None;
    let mut count = 0;
    for i in 0..outer.len() {
        let edge = Segment {
            start: outer[i],
            end: outer[(i + 1) % outer.len()],
        };
        // half-open y range so a crossing through a shared vertex is only
        // counted for one of the two edges meeting there
        if !(origin.y > edge.min_y() && origin.y <= edge.max_y()) {
            continue;
        }
        if origin.x > edge.max_x() {
            continue;
        }
        let slope = edge.slope();
        let crosses = if slope.is_infinite() {
            // vertical edge right of the origin
            true
        } else {
            let x = (origin.y - edge.y_intercept()) / slope;
            x >= edge.min_x() && x <= edge.max_x()
        };
        if crosses {
            crossed = Some(i);
            count += 1;
        }
    }

    assert_eq!(count, 1, "hole must cross its outer contour exactly once");
    let i = crossed.unwrap();

    let start_distance = origin.distance_to(outer[i]);
    let end_distance = origin.distance_to(outer[(i + 1) % outer.len()]);
    // ties go to the edge's end point
    let bridge_idx = if start_distance < end_distance {
        i
    } else {
        (i + 1) % outer.len()
    };
    (origin_idx, bridge_idx)
}

/// Builds the merged contour in a single walk of the outer contour: after
/// each bridge point, the matching hole is walked in full from its ray
/// origin. The origin and bridge points repeat to close the zero-width
/// channel, so every hole adds `hole + 2` points to the result.
fn splice(outer: &[Point], holes: &[Vec<Point>], cuts: &[(usize, usize)]) -> Vec<Point> {
    let extra: usize = holes.iter().map(|hole| hole.len() + 2).sum();
    let mut merged = Vec::with_capacity(outer.len() + extra);
    for (i, p) in outer.iter().enumerate() {
        merged.push(*p);
        for (hole, &(origin_idx, bridge_idx)) in holes.iter().zip(cuts) {
            if bridge_idx != i {
                continue;
            }
            for j in 0..hole.len() {
                merged.push(hole[(origin_idx + j) % hole.len()]);
            }
            merged.push(hole[origin_idx]);
            merged.push(*p);
        }
    }
    merged
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geom::signed_area;
    use pretty_assertions::assert_eq;

    fn square(x0: f32, y0: f32, size: f32, clockwise: bool) -> Vec<Point> {
        let mut points = vec![
            Point::new(x0, y0),
            Point::new(x0, y0 + size),
            Point::new(x0 + size, y0 + size),
            Point::new(x0 + size, y0),
        ];
        if !clockwise {
            points.reverse();
        }
        points
    }

    #[test]
    fn test_solid_contours_pass_through() {
        let contours = vec![square(0.0, 0.0, 10.0, true), square(20.0, 0.0, 10.0, true)];
        assert_eq!(merge_contours(contours.clone()), contours);
    }

    #[test]
    fn test_hole_is_spliced_into_its_outer() {
        let outer = square(10.0, 10.0, 60.0, true);
        let hole = square(30.0, 30.0, 20.0, false);
        let merged = merge_contours(vec![outer, hole]);

        assert_eq!(merged.len(), 1);
        let merged = &merged[0];
        assert_eq!(merged.len(), 4 + 4 + 2);
        // the merged contour winds clockwise and encloses outer minus hole
        assert_eq!(signed_area(merged), -(3600.0 - 400.0));
    }

    #[test]
    fn test_merged_contour_triangulates_to_ring_area() {
        let outer = square(10.0, 10.0, 60.0, true);
        let hole = square(30.0, 30.0, 20.0, false);
        let merged = merge_contours(vec![outer, hole]);

        let triangles: Vec<_> = Triangulation::new(&merged).collect();
        assert_eq!(triangles.len(), merged[0].len() - 2);
        let area: f32 = triangles.iter().map(|t| t.area()).sum();
        assert!((area - 3200.0).abs() < 1.0, "area was {}", area);

        // the hole interior stays uncovered
        let inside_hole = Point::new(40.0, 40.0);
        assert!(!triangles.iter().any(|t| t.contains(inside_hole)));
    }

    #[test]
    fn test_two_holes_splice_into_one_walk() {
        let outer = square(10.0, 10.0, 60.0, true);
        let low = square(20.0, 20.0, 10.0, false);
        let high = square(45.0, 45.0, 10.0, false);
        let merged = merge_contours(vec![outer, low, high]);

        assert_eq!(merged.len(), 1);
        let merged = &merged[0];
        assert_eq!(merged.len(), 4 + 2 * (4 + 2));
        assert_eq!(signed_area(merged), -(3600.0 - 100.0 - 100.0));
        // each hole enters right after its own bridge point: the high hole's
        // ray lands nearer (70,70), the low hole's nearer (70,10)
        assert_eq!(merged[2], Point::new(70.0, 70.0));
        assert_eq!(merged[3], Point::new(55.0, 45.0));
        assert_eq!(merged[9], Point::new(70.0, 10.0));
        assert_eq!(merged[10], Point::new(30.0, 20.0));
    }

    #[test]
    fn test_stray_hole_is_dropped() {
        let outer = square(10.0, 10.0, 60.0, true);
        let stray = square(100.0, 100.0, 20.0, false);
        let merged = merge_contours(vec![outer.clone(), stray]);
        assert_eq!(merged, vec![outer]);
    }

    #[test]
    fn test_cut_line_picks_nearest_endpoint() {
        let outer = square(10.0, 10.0, 60.0, true);
        let hole = square(30.0, 30.0, 20.0, false);
        let (origin_idx, bridge_idx) = cut_line(&outer, &hole);
        // the rightmost hole point with the lowest index wins the tie
        assert_eq!(hole[origin_idx], Point::new(50.0, 30.0));
        // the ray crosses the outer's right edge; (70,10) is nearer than
        // (70,70)
        assert_eq!(outer[bridge_idx], Point::new(70.0, 10.0));
    }

    #[test]
    fn test_cut_line_tie_goes_to_edge_end() {
        let outer = square(10.0, 10.0, 60.0, true);
        // the diamond's rightmost point (50,40) is equidistant from both
        // endpoints of the crossed right edge
        let hole = vec![
            Point::new(50.0, 40.0),
            Point::new(40.0, 50.0),
            Point::new(30.0, 40.0),
            Point::new(40.0, 30.0),
        ];
        let (origin_idx, bridge_idx) = cut_line(&outer, &hole);
        assert_eq!(hole[origin_idx], Point::new(50.0, 40.0));
        // the edge runs from (70,70) to (70,10); its end wins the tie
        assert_eq!(outer[bridge_idx], Point::new(70.0, 10.0));
    }
}
