//! Plane geometry primitives shared by the outline, merge, triangulation and
//! rasterization stages. Coordinates are y-up, matching font design space.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Point {
        Point { x, y }
    }

    pub(crate) fn distance_to(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    pub fn new(a: Point, b: Point, c: Point) -> Triangle {
        Triangle { a, b, c }
    }

    /// Barycentric point-in-triangle test. Points on an edge or vertex count
    /// as contained. Degenerate (zero-area) triangles contain nothing.
    pub fn contains(&self, p: Point) -> bool {
        let det = (self.b.y - self.c.y) * (self.a.x - self.c.x)
            + (self.c.x - self.b.x) * (self.a.y - self.c.y);
        if det == 0.0 {
            return false;
        }
        let w1 = ((self.b.y - self.c.y) * (p.x - self.c.x)
            + (self.c.x - self.b.x) * (p.y - self.c.y))
            / det;
        let w2 = ((self.c.y - self.a.y) * (p.x - self.c.x)
            + (self.a.x - self.c.x) * (p.y - self.c.y))
            / det;
        let w3 = 1.0 - w1 - w2;
        (0.0..=1.0).contains(&w1) && (0.0..=1.0).contains(&w2) && (0.0..=1.0).contains(&w3)
    }

    pub fn scaled(&self, factor: f32) -> Triangle {
        Triangle {
            a: Point::new(self.a.x * factor, self.a.y * factor),
            b: Point::new(self.b.x * factor, self.b.y * factor),
            c: Point::new(self.c.x * factor, self.c.y * factor),
        }
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Triangle {
        Triangle {
            a: Point::new(self.a.x + dx, self.a.y + dy),
            b: Point::new(self.b.x + dx, self.b.y + dy),
            c: Point::new(self.c.x + dx, self.c.y + dy),
        }
    }

    pub fn area(&self) -> f32 {
        let cross = (self.b.x - self.a.x) * (self.c.y - self.a.y)
            - (self.b.y - self.a.y) * (self.c.x - self.a.x);
        cross.abs() / 2.0
    }
}

/// A directed line segment between two contour points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    /// Slope of the carrying line; `f32::INFINITY` for vertical segments.
    pub fn slope(&self) -> f32 {
        let dx = self.end.x - self.start.x;
        if dx == 0.0 {
            f32::INFINITY
        } else {
            (self.end.y - self.start.y) / dx
        }
    }

    pub fn y_intercept(&self) -> f32 {
        self.start.y - self.slope() * self.start.x
    }

    pub fn min_x(&self) -> f32 {
        self.start.x.min(self.end.x)
    }

    pub fn max_x(&self) -> f32 {
        self.start.x.max(self.end.x)
    }

    pub fn min_y(&self) -> f32 {
        self.start.y.min(self.end.y)
    }

    pub fn max_y(&self) -> f32 {
        self.start.y.max(self.end.y)
    }
}

/// Signed area of a closed polygon (shoelace formula). Negative for
/// clockwise winding.
pub(crate) fn signed_area(points: &[Point]) -> f32 {
    let mut sum = 0.0;
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        sum += p.x * q.y - q.x * p.y;
    }
    sum / 2.0
}

/// Clockwise contours are filled shapes; counter-clockwise contours are
/// holes.
pub(crate) fn is_clockwise(points: &[Point]) -> bool {
    signed_area(points) < 0.0
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Extents {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Extents {
    pub fn of(triangle: &Triangle) -> Extents {
        Extents {
            min_x: triangle.a.x.min(triangle.b.x).min(triangle.c.x),
            min_y: triangle.a.y.min(triangle.b.y).min(triangle.c.y),
            max_x: triangle.a.x.max(triangle.b.x).max(triangle.c.x),
            max_y: triangle.a.y.max(triangle.b.y).max(triangle.c.y),
        }
    }

    pub fn union(self, other: Extents) -> Extents {
        Extents {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}
