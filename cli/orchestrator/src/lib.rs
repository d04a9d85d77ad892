#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
//! Entry point logic for the `protoc-gen-twirp-swift` plugin binary.
//!
//! The host compiler writes an encoded request to the plugin's stdin and reads the
//! encoded response from its stdout, so nothing but the response may reach stdout.
//! Diagnostics go to stderr.

use std::io::{Read, Write};

use config::PluginOptions;
use pipeline::PipelineError;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that end the plugin process with a failure status.
#[derive(Debug, Error)]
pub enum CompilerError {
    /// Fatal pipeline error; no response is written.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Result type alias for plugin operations.
pub type Result<T> = std::result::Result<T, CompilerError>;

/// Read one request from `input`, run the pipeline and write the response to `output`.
///
/// Logging is initialised from the request's `log` parameter before any work is done.
/// A malformed parameter string still initialises logging at the default level so the
/// resulting error is reported.
pub fn execute<R: Read, W: Write>(input: R, output: W) -> Result<()> {
    let request = pipeline::read_request(input)?;

    let level = PluginOptions::from_parameter_string(request.parameter.as_deref())
        .map(|options| options.log_level)
        .unwrap_or_else(|_| logging::DEFAULT_LEVEL.to_string());
    logging::init(&level);
    info!(files = request.file_to_generate.len(), "received request");

    let response = pipeline::run(&request)?;
    if let Some(error) = &response.error {
        warn!(%error, "returning error response");
    }
    pipeline::write_response(output, &response)?;
    Ok(())
}
