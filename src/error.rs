/// Failures surfaced by the tracing core.
///
/// Nothing here is retried internally: the tracer is deterministic for a
/// given input, so every variant is fatal for the current trace. The core
/// never logs or prints; presentation belongs to the caller.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("failed to decode source image: {0}")]
    ImageDecode(image::ImageError),
    #[error("failed to encode bitmap for the tracer: {0}")]
    BitmapEncode(image::ImageError),
    #[error("failed to run tracer: {0}")]
    TracerLaunch(#[from] std::io::Error),
    #[error("tracer reported errors:\n{stderr}")]
    TracerInvocation { stderr: String },
    #[error("bad tracer output: {0}")]
    TracerOutputParse(String),
    #[error("unsupported segment kind: {0}")]
    UnsupportedSegmentKind(&'static str),
}
