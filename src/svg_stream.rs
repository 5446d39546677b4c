//! Parses the tracer's SVG output into a normalized segment stream.
//!
//! The tracer wraps its path data in a group transform; the builder contract
//! wants the raw source coordinates, so this reads the XML directly instead
//! of going through a full SVG tree. Every segment carries its declared start
//! point — the builder detects subpath boundaries by comparing it against the
//! previous end point.

use svgtypes::{PathParser, PathSegment};

use crate::error::TraceError;

/// A segment in source coordinate space (y grows downward), with relative
/// commands already resolved against the running current point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawSegment {
    Line {
        start: (f64, f64),
        to: (f64, f64),
    },
    Cubic {
        start: (f64, f64),
        c1: (f64, f64),
        c2: (f64, f64),
        to: (f64, f64),
    },
    /// A kind the downstream builder refuses. Kept in the stream so the
    /// refusal happens there, not here.
    Other { name: &'static str },
}

/// The tracer's vector output: canvas height plus per-path segment lists in
/// document order.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentStream {
    height: f64,
    paths: Vec<Vec<RawSegment>>,
}

impl SegmentStream {
    pub fn new(height: f64, paths: Vec<Vec<RawSegment>>) -> Self {
        SegmentStream { height, paths }
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn paths(&self) -> &[Vec<RawSegment>] {
        &self.paths
    }

    /// All segments flattened in stream order.
    pub fn segments(&self) -> impl Iterator<Item = &RawSegment> {
        self.paths.iter().flatten()
    }
}

pub fn parse_vector_document(svg: &str) -> Result<SegmentStream, TraceError> {
    let doc = roxmltree::Document::parse(svg)
        .map_err(|e| TraceError::TracerOutputParse(format!("invalid markup: {e}")))?;
    let root = doc.root_element();
    let height = parse_height(root.attribute("height"))?;

    let mut paths = Vec::new();
    for node in root
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "path")
    {
        if let Some(d) = node.attribute("d") {
            paths.push(parse_path_data(d)?);
        }
    }
    Ok(SegmentStream::new(height, paths))
}

/// The height attribute is a number with a two-character unit suffix
/// (`"6850.000000pt"`); the suffix is stripped unconditionally before
/// parsing.
fn parse_height(attr: Option<&str>) -> Result<f64, TraceError> {
    let raw = attr
        .ok_or_else(|| TraceError::TracerOutputParse("missing height attribute".into()))?;
    raw.len()
        .checked_sub(2)
        .and_then(|end| raw.get(..end))
        .and_then(|digits| digits.trim().parse::<f64>().ok())
        .ok_or_else(|| TraceError::TracerOutputParse(format!("bad height attribute {raw:?}")))
}

fn parse_path_data(d: &str) -> Result<Vec<RawSegment>, TraceError> {
    let mut segments = Vec::new();
    let mut current = (0.0, 0.0);
    let mut subpath_start = (0.0, 0.0);
    // Second control point of the previous cubic, for smooth-curve
    // reflection.
    let mut prev_c2: Option<(f64, f64)> = None;

    for token in PathParser::from(d) {
        let token = token
            .map_err(|e| TraceError::TracerOutputParse(format!("invalid path data: {e}")))?;
        match token {
            PathSegment::MoveTo { abs, x, y } => {
                current = resolve(abs, (x, y), current);
                subpath_start = current;
                prev_c2 = None;
            }
            PathSegment::LineTo { abs, x, y } => {
                let to = resolve(abs, (x, y), current);
                segments.push(RawSegment::Line { start: current, to });
                current = to;
                prev_c2 = None;
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                let to = if abs { (x, current.1) } else { (current.0 + x, current.1) };
                segments.push(RawSegment::Line { start: current, to });
                current = to;
                prev_c2 = None;
            }
            PathSegment::VerticalLineTo { abs, y } => {
                let to = if abs { (current.0, y) } else { (current.0, current.1 + y) };
                segments.push(RawSegment::Line { start: current, to });
                current = to;
                prev_c2 = None;
            }
            PathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let c1 = resolve(abs, (x1, y1), current);
                let c2 = resolve(abs, (x2, y2), current);
                let to = resolve(abs, (x, y), current);
                segments.push(RawSegment::Cubic {
                    start: current,
                    c1,
                    c2,
                    to,
                });
                prev_c2 = Some(c2);
                current = to;
            }
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                // Reflect the previous cubic's second handle; without one the
                // first handle collapses onto the current point.
                let c1 = match prev_c2 {
                    Some((cx, cy)) => (2.0 * current.0 - cx, 2.0 * current.1 - cy),
                    None => current,
                };
                let c2 = resolve(abs, (x2, y2), current);
                let to = resolve(abs, (x, y), current);
                segments.push(RawSegment::Cubic {
                    start: current,
                    c1,
                    c2,
                    to,
                });
                prev_c2 = Some(c2);
                current = to;
            }
            PathSegment::Quadratic { abs, x, y, .. } => {
                segments.push(RawSegment::Other {
                    name: "quadratic bezier",
                });
                current = resolve(abs, (x, y), current);
                prev_c2 = None;
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                segments.push(RawSegment::Other {
                    name: "smooth quadratic bezier",
                });
                current = resolve(abs, (x, y), current);
                prev_c2 = None;
            }
            PathSegment::EllipticalArc { abs, x, y, .. } => {
                segments.push(RawSegment::Other {
                    name: "elliptical arc",
                });
                current = resolve(abs, (x, y), current);
                prev_c2 = None;
            }
            PathSegment::ClosePath { .. } => {
                if current != subpath_start {
                    segments.push(RawSegment::Line {
                        start: current,
                        to: subpath_start,
                    });
                }
                current = subpath_start;
                prev_c2 = None;
            }
        }
    }
    Ok(segments)
}

fn resolve(abs: bool, p: (f64, f64), current: (f64, f64)) -> (f64, f64) {
    if abs {
        p
    } else {
        (current.0 + p.0, current.1 + p.1)
    }
}
