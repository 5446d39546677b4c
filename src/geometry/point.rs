/// A point in target coordinate space (y grows upward).
///
/// Equality is exact: the tracer repeats coordinates verbatim between
/// consecutive segments, and the subpath split rule in the path builder
/// relies on that.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Evaluates a cubic bezier at parameter `t` in `[0, 1]`.
pub fn cubic_at(p0: Point, c1: Point, c2: Point, p1: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    Point {
        x: b0 * p0.x + b1 * c1.x + b2 * c2.x + b3 * p1.x,
        y: b0 * p0.y + b1 * c1.y + b2 * c2.y + b3 * p1.y,
    }
}
