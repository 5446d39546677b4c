//! Blocking round trip through the external tracer process.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::TraceError;

const TRACER_BIN: &str = "potrace";
/// Read a bitmap from stdin, write curve-fitted SVG to stdout.
const TRACER_ARGS: [&str; 4] = ["-", "-o-", "-b", "svg"];

/// Feeds the encoded bitmap to the tracer and returns its vector output.
///
/// The tracer is invoked at most once per trace and torn down synchronously.
/// An empty diagnostic stream means success; anything on it is fatal and
/// surfaced verbatim, with no retry — the tracer is deterministic for a
/// given input.
pub fn run(bmp: &[u8]) -> Result<String, TraceError> {
    run_command(Command::new(TRACER_BIN).args(TRACER_ARGS), bmp)
}

fn run_command(command: &mut Command, input: &[u8]) -> Result<String, TraceError> {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input)?;
        // Dropping the handle closes the pipe; the tracer reads its whole
        // input before it starts writing output.
    }
    let output = child.wait_with_output()?;

    if !output.stderr.is_empty() {
        return Err(TraceError::TracerInvocation {
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    String::from_utf8(output.stdout)
        .map_err(|_| TraceError::TracerOutputParse("tracer output is not valid UTF-8".into()))
}
