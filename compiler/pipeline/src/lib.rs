#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! High-level pipeline that turns one plugin request into one plugin response.
//!
//! ## Module Organization
//!
//! - `codec` - Decoding the request and encoding the response
//! - `generation_context` - Two-phase model build over the eligible files
//! - `orchestration` - Main pipeline entry points (`run`, `run_with`, `run_bytes`)
//!
//! Fatal failures (undecodable request, nothing to generate, malformed parameters or
//! descriptors) are returned as [`PipelineError`]. A failure while rendering one file
//! is not fatal: it becomes the response's error string.

use thiserror::Error;

/// Convenient result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that abort a generation run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input is not a valid plugin request.
    #[error("failed to decode request: {0}")]
    Decode(#[from] prost::DecodeError),
    /// The request names no file to generate.
    #[error("no files to generate")]
    NoFilesToGenerate,
    /// Malformed or invalid parameter string.
    #[error(transparent)]
    Parameter(#[from] config::ParameterError),
    /// Malformed descriptor or conflicting registration.
    #[error(transparent)]
    Adapter(#[from] adapters::AdapterError),
    /// I/O error while reading the request or writing the response.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub mod codec;
pub mod generation_context;
pub mod orchestration;

pub use codec::{decode_request, encode_response, read_request, write_response};
pub use generation_context::GenerationContext;
pub use orchestration::{run, run_bytes, run_with};
