//! Closed subpath geometry: line/cubic segments, flattened outlines and the
//! even-odd containment test the region grouping is built on.

use crate::geometry::point::cubic_at;
use crate::geometry::{Point, Rect};

/// Sample count per cubic when flattening a boundary to a polyline.
const CUBIC_FLATTEN_STEPS: usize = 16;

/// One drawing command, relative to the subpath's current point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line { to: Point },
    Cubic { c1: Point, c2: Point, to: Point },
}

impl Segment {
    pub fn end(&self) -> Point {
        match *self {
            Segment::Line { to } => to,
            Segment::Cubic { to, .. } => to,
        }
    }
}

/// A closed boundary curve in target coordinate space.
///
/// Closure is enforced at construction: if the last segment does not end at
/// the start point, a closing line segment is appended. The flattened
/// outline and the bounding box are fixed once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SubPath {
    start: Point,
    segments: Vec<Segment>,
    outline: Vec<Point>,
    bbox: Rect,
}

impl SubPath {
    /// Builds a closed subpath, appending a closing line if needed.
    pub fn closed(start: Point, mut segments: Vec<Segment>) -> Self {
        let last = segments.last().map_or(start, Segment::end);
        if last != start {
            segments.push(Segment::Line { to: start });
        }
        let outline = flatten(start, &segments);
        let bbox = Rect::covering(control_points(start, &segments))
            .expect("a subpath always has at least its start point");
        SubPath {
            start,
            segments,
            outline,
            bbox,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Start point followed by every segment endpoint. The tracer places an
    /// anchor wherever boundaries could meet, so these are the sample points
    /// for containment.
    pub fn anchor_points(&self) -> impl Iterator<Item = Point> + '_ {
        std::iter::once(self.start).chain(self.segments.iter().map(Segment::end))
    }

    /// The boundary flattened to a polyline; first and last point coincide.
    pub fn outline(&self) -> &[Point] {
        &self.outline
    }

    /// Box over anchor and control points. Conservative for cubics; used as
    /// the grouping sort key only.
    pub fn bounding_box(&self) -> Rect {
        self.bbox
    }

    /// Even-odd test: a point is inside if a ray to infinity crosses the
    /// flattened boundary an odd number of times.
    pub fn contains_point(&self, p: Point) -> bool {
        let poly = &self.outline;
        if poly.len() < 2 {
            return false;
        }
        let mut inside = false;
        let mut j = poly.len() - 1;
        for i in 0..poly.len() {
            let a = poly[i];
            let b = poly[j];
            if (a.y > p.y) != (b.y > p.y) {
                let t = (p.y - a.y) / (b.y - a.y);
                if p.x < a.x + t * (b.x - a.x) {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Whether every anchor point of `other` lies inside this boundary's
    /// filled area.
    pub fn contains(&self, other: &SubPath) -> bool {
        other.anchor_points().all(|p| self.contains_point(p))
    }
}

fn flatten(start: Point, segments: &[Segment]) -> Vec<Point> {
    let mut out = Vec::with_capacity(segments.len() + 1);
    out.push(start);
    let mut current = start;
    for segment in segments {
        match *segment {
            Segment::Line { to } => out.push(to),
            Segment::Cubic { c1, c2, to } => {
                for i in 1..=CUBIC_FLATTEN_STEPS {
                    let t = i as f64 / CUBIC_FLATTEN_STEPS as f64;
                    out.push(cubic_at(current, c1, c2, to, t));
                }
            }
        }
        current = segment.end();
    }
    out
}

fn control_points<'a>(
    start: Point,
    segments: &'a [Segment],
) -> impl Iterator<Item = Point> + 'a {
    std::iter::once(start).chain(segments.iter().flat_map(|segment| {
        let pts: Vec<Point> = match *segment {
            Segment::Line { to } => vec![to],
            Segment::Cubic { c1, c2, to } => vec![c1, c2, to],
        };
        pts
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(left: f64, top: f64, right: f64, bottom: f64) -> SubPath {
        SubPath::closed(
            Point::new(left, top),
            vec![
                Segment::Line {
                    to: Point::new(right, top),
                },
                Segment::Line {
                    to: Point::new(right, bottom),
                },
                Segment::Line {
                    to: Point::new(left, bottom),
                },
            ],
        )
    }

    #[test]
    fn closure_is_enforced() {
        let path = square(0.0, 0.0, 10.0, 10.0);
        let outline = path.outline();
        assert_eq!(outline.first(), outline.last());
        assert_eq!(path.segments().len(), 4);
    }

    #[test]
    fn already_closed_path_gains_no_segment() {
        let path = SubPath::closed(
            Point::new(0.0, 0.0),
            vec![
                Segment::Line {
                    to: Point::new(1.0, 0.0),
                },
                Segment::Line {
                    to: Point::new(0.0, 0.0),
                },
            ],
        );
        assert_eq!(path.segments().len(), 2);
    }

    #[test]
    fn point_containment() {
        let path = square(0.0, 0.0, 10.0, 10.0);
        assert!(path.contains_point(Point::new(5.0, 5.0)));
        assert!(!path.contains_point(Point::new(15.0, 5.0)));
        assert!(!path.contains_point(Point::new(-1.0, -1.0)));
    }

    #[test]
    fn nested_square_is_contained() {
        let outer = square(0.0, 0.0, 10.0, 10.0);
        let inner = square(2.0, 2.0, 8.0, 8.0);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn overlapping_square_is_not_contained() {
        let a = square(0.0, 0.0, 10.0, 10.0);
        let b = square(5.0, 5.0, 15.0, 15.0);
        assert!(!a.contains(&b));
    }

    #[test]
    fn degenerate_point_path_contains_nothing() {
        let dot = SubPath::closed(Point::new(3.0, 3.0), Vec::new());
        let sq = square(0.0, 0.0, 10.0, 10.0);
        assert_eq!(dot.bounding_box().width(), 0.0);
        assert!(!dot.contains(&sq));
        assert!(!dot.contains_point(Point::new(3.0, 3.0)));
    }

    #[test]
    fn cubic_outline_stays_closed_and_bounded() {
        // Circle-ish blob from four cubics.
        let k = 0.5523;
        let path = SubPath::closed(
            Point::new(1.0, 0.0),
            vec![
                Segment::Cubic {
                    c1: Point::new(1.0, k),
                    c2: Point::new(k, 1.0),
                    to: Point::new(0.0, 1.0),
                },
                Segment::Cubic {
                    c1: Point::new(-k, 1.0),
                    c2: Point::new(-1.0, k),
                    to: Point::new(-1.0, 0.0),
                },
                Segment::Cubic {
                    c1: Point::new(-1.0, -k),
                    c2: Point::new(-k, -1.0),
                    to: Point::new(0.0, -1.0),
                },
                Segment::Cubic {
                    c1: Point::new(k, -1.0),
                    c2: Point::new(1.0, -k),
                    to: Point::new(1.0, 0.0),
                },
            ],
        );
        let outline = path.outline();
        assert_eq!(outline.first(), outline.last());
        assert!(path.contains_point(Point::new(0.0, 0.0)));
        assert!(!path.contains_point(Point::new(1.5, 0.0)));
        let bbox = path.bounding_box();
        assert!(bbox.left() <= -1.0 && bbox.right() >= 1.0);
    }
}
