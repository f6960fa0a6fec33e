//! Ear clipping triangulation. Works per contour and yields triangles lazily,
//! so a caller can stop early or interleave rasterization with clipping.
//!
//! Contours must wind clockwise and be simple (merged contours with their
//! zero-width hole channels included). A contour of `n` points produces
//! `n - 2` triangles.

use crate::geom::{Point, Triangle};

pub struct Triangulation<'a> {
    contours: &'a [Vec<Point>],
    states: Vec<ContourState>,
    current: usize,
}

struct ContourState {
    clipped: Vec<bool>,
    /// Index of the next ear candidate.
    cursor: usize,
    produced: usize,
    expected: usize,
}

impl<'a> Triangulation<'a> {
    pub fn new(contours: &'a [Vec<Point>]) -> Triangulation<'a> {
        let states = contours
            .iter()
            .map(|contour| ContourState {
                clipped: vec![false; contour.len()],
                cursor: 0,
                produced: 0,
                expected: contour.len().saturating_sub(2),
            })
            .collect();
        Triangulation {
            contours,
            states,
            current: 0,
        }
    }
}

impl Iterator for Triangulation<'_> {
    type Item = Triangle;

    fn next(&mut self) -> Option<Triangle> {
        while self.current < self.contours.len() {
            let contour = &self.contours[self.current];
            let state = &mut self.states[self.current];

            if state.produced >= state.expected {
                self.current += 1;
                continue;
            }

            let mut found = None;
            while state.cursor < contour.len() {
                let b = state.cursor;
                if state.clipped[b] {
                    state.cursor += 1;
                    continue;
                }
                let a = prev_unclipped(&state.clipped, b);
                let c = next_unclipped(&state.clipped, b);
                if is_ear(contour, &state.clipped, a, b, c) {
                    found = Some((a, b, c));
                    break;
                }
                state.cursor += 1;
            }

            match found {
                Some((a, b, c)) => {
                    state.clipped[b] = true;
                    state.produced += 1;
                    state.cursor = 0;
                    return Some(Triangle::new(contour[a], contour[b], contour[c]));
                }
                // no ear found in a full sweep, abandon the contour
                None => self.current += 1,
            }
        }
        None
    }
}

fn prev_unclipped(clipped: &[bool], from: usize) -> usize {
    let mut i = from;
    loop {
        i = if i == 0 { clipped.len() - 1 } else { i - 1 };
        if !clipped[i] {
            return i;
        }
    }
}

fn next_unclipped(clipped: &[bool], from: usize) -> usize {
    let mut i = from;
    loop {
        i = (i + 1) % clipped.len();
        if !clipped[i] {
            return i;
        }
    }
}

/// A vertex is an ear when its interior angle is convex and no other
/// remaining vertex lies inside the triangle it spans with its neighbours.
fn is_ear(contour: &[Point], clipped: &[bool], a: usize, b: usize, c: usize) -> bool {
    if !is_convex(contour[a], contour[b], contour[c]) {
        return false;
    }

    let triangle = Triangle::new(contour[a], contour[b], contour[c]);
    for (i, point) in contour.iter().enumerate() {
        if clipped[i] || i == a || i == b || i == c {
            continue;
        }
        // merged contours repeat their bridge points, those copies never
        // block the ear they belong to
        if *point == contour[a] || *point == contour[b] || *point == contour[c] {
            continue;
        }
        if triangle.contains(*point) {
            return false;
        }
    }
    true
}

/// Interior angle at `b` of a clockwise contour, tested to be below 180
/// degrees.
fn is_convex(a: Point, b: Point, c: Point) -> bool {
    let b_to_a = Point::new(a.x - b.x, a.y - b.y);
    let b_to_c = Point::new(c.x - b.x, c.y - b.y);
    let det = b_to_a.x * b_to_c.y - b_to_a.y * b_to_c.x;
    let dot = b_to_a.x * b_to_c.x + b_to_a.y * b_to_c.y;
    let mut angle = det.atan2(dot).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    angle < 180.0
}
