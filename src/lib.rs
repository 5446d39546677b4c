//! Raster-to-vector tracing with reconstructed fill topology.
//!
//! A source image is thresholded, handed to an external tracer, and the
//! tracer's flat stream of curve segments is rebuilt into closed subpaths
//! and grouped into filled regions — outer boundaries paired with the holes
//! they contain — ready for even-odd rendering or export.

pub mod bitmap;
pub mod error;
pub mod geometry;
pub mod path;
pub mod path_builder;
pub mod pipeline;
pub mod png_writer;
pub mod regions;
pub mod renderer;
pub mod svg_stream;
pub mod tracer;

pub use error::TraceError;
pub use pipeline::Tracing;
pub use regions::{CompoundPath, FilledRegion, PathForest};
