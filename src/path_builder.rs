//! Builds closed target-space subpaths from the raw segment stream.
//!
//! The stream has no explicit subpath markers. The tracer repeats the
//! previous end point verbatim at the start of every continuing segment, so
//! a start point that differs from the previous end point marks a subpath
//! boundary. Comparison is exact: equal source coordinates transform to
//! equal target coordinates.

use crate::error::TraceError;
use crate::geometry::Point;
use crate::path::{Segment, SubPath};
use crate::svg_stream::{RawSegment, SegmentStream};

/// Maps a source point (y down, 10x scale) to target space (y up) anchored
/// at the canvas height. Applied identically to every control point.
pub fn to_target(p: (f64, f64), height: f64) -> Point {
    Point::new(p.0 / 10.0, height - p.1 / 10.0)
}

pub fn build_subpaths(stream: &SegmentStream) -> Result<Vec<SubPath>, TraceError> {
    let height = stream.height();
    let mut subpaths = Vec::new();
    let mut current: Option<(Point, Vec<Segment>)> = None;
    let mut end_point: Option<Point> = None;

    for raw in stream.segments() {
        let (start, segment) = match *raw {
            RawSegment::Line { start, to } => (
                to_target(start, height),
                Segment::Line {
                    to: to_target(to, height),
                },
            ),
            RawSegment::Cubic { start, c1, c2, to } => (
                to_target(start, height),
                Segment::Cubic {
                    c1: to_target(c1, height),
                    c2: to_target(c2, height),
                    to: to_target(to, height),
                },
            ),
            RawSegment::Other { name } => {
                return Err(TraceError::UnsupportedSegmentKind(name));
            }
        };

        if end_point != Some(start) {
            if let Some((s, segments)) = current.take() {
                subpaths.push(SubPath::closed(s, segments));
            }
        }
        let (_, segments) = current.get_or_insert_with(|| (start, Vec::new()));
        segments.push(segment);
        end_point = Some(segment.end());
    }

    // The final accumulator is always closed and appended.
    if let Some((s, segments)) = current {
        subpaths.push(SubPath::closed(s, segments));
    }
    Ok(subpaths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg_stream::RawSegment;

    fn line(start: (f64, f64), to: (f64, f64)) -> RawSegment {
        RawSegment::Line { start, to }
    }

    #[test]
    fn transform_scales_and_flips() {
        let p = to_target((30.0, 400.0), 100.0);
        assert_eq!(p, Point::new(3.0, 60.0));
        assert_eq!(to_target((0.0, 0.0), 100.0), Point::new(0.0, 100.0));
    }

    #[test]
    fn transform_applies_to_bezier_handles() {
        let stream = SegmentStream::new(
            100.0,
            vec![vec![RawSegment::Cubic {
                start: (0.0, 0.0),
                c1: (10.0, 100.0),
                c2: (20.0, 200.0),
                to: (30.0, 400.0),
            }]],
        );
        let subpaths = build_subpaths(&stream).unwrap();
        assert_eq!(
            subpaths[0].segments()[0],
            Segment::Cubic {
                c1: Point::new(1.0, 90.0),
                c2: Point::new(2.0, 80.0),
                to: Point::new(3.0, 60.0),
            }
        );
    }

    #[test]
    fn continuous_segments_share_a_subpath() {
        let stream = SegmentStream::new(
            10.0,
            vec![vec![
                line((0.0, 0.0), (10.0, 0.0)),
                line((10.0, 0.0), (10.0, 10.0)),
                line((10.0, 10.0), (0.0, 0.0)),
            ]],
        );
        let subpaths = build_subpaths(&stream).unwrap();
        assert_eq!(subpaths.len(), 1);
        assert_eq!(subpaths[0].segments().len(), 3);
    }

    #[test]
    fn discontinuity_starts_a_new_subpath() {
        let stream = SegmentStream::new(
            10.0,
            vec![vec![
                line((0.0, 0.0), (10.0, 0.0)),
                // Start does not repeat the previous end point.
                line((50.0, 50.0), (60.0, 50.0)),
            ]],
        );
        let subpaths = build_subpaths(&stream).unwrap();
        assert_eq!(subpaths.len(), 2);
        assert_eq!(subpaths[0].start(), Point::new(0.0, 10.0));
        assert_eq!(subpaths[1].start(), Point::new(5.0, 5.0));
    }

    #[test]
    fn every_built_subpath_is_closed() {
        let stream = SegmentStream::new(
            10.0,
            vec![vec![
                line((0.0, 0.0), (10.0, 0.0)),
                line((10.0, 0.0), (10.0, 10.0)),
                // Left open: the builder must close it.
                line((40.0, 40.0), (60.0, 40.0)),
            ]],
        );
        for subpath in build_subpaths(&stream).unwrap() {
            let outline = subpath.outline();
            assert_eq!(outline.first(), outline.last());
        }
    }

    #[test]
    fn unsupported_kind_yields_no_partial_output() {
        let stream = SegmentStream::new(
            10.0,
            vec![vec![
                line((0.0, 0.0), (10.0, 0.0)),
                RawSegment::Other {
                    name: "elliptical arc",
                },
            ]],
        );
        match build_subpaths(&stream) {
            Err(TraceError::UnsupportedSegmentKind(name)) => {
                assert_eq!(name, "elliptical arc");
            }
            other => panic!("expected UnsupportedSegmentKind, got {other:?}"),
        }
    }

    #[test]
    fn continuity_holds_across_path_elements() {
        // Segments are compared in flattened stream order, so a path element
        // boundary alone does not split a subpath.
        let stream = SegmentStream::new(
            10.0,
            vec![
                vec![line((0.0, 0.0), (10.0, 0.0))],
                vec![line((10.0, 0.0), (0.0, 0.0))],
            ],
        );
        let subpaths = build_subpaths(&stream).unwrap();
        assert_eq!(subpaths.len(), 1);
    }

    #[test]
    fn empty_stream_builds_nothing() {
        let stream = SegmentStream::new(10.0, Vec::new());
        assert!(build_subpaths(&stream).unwrap().is_empty());
    }
}
