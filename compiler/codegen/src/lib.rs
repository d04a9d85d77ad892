#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Code generation for Twirp Swift clients.
//!
//! This crate turns a populated [`ApiContext`] plus one target file descriptor into
//! generated source files: an RPC stub file holding one client per service, and a
//! model file declaring the file's messages and enums. Which models get encoding and
//! decoding support is read off the marshal flags computed by the registry.
//!
//! Decoding requests and encoding responses happens in the pipeline crate.

pub mod generators;
pub mod type_index;
pub mod utils;

use prost_types::FileDescriptorProto;
use registry::ApiContext;
use thiserror::Error;

pub use generators::SwiftRenderer;
pub use type_index::{TypeEntry, TypeIndex, TypeKind};

/// Error type for code generation operations in this crate.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The method streams in at least one direction, which the target transport lacks
    #[error("streaming method {service}.{method} is not supported")]
    StreamingUnsupported {
        /// Fully-qualified service name
        service: String,
        /// Method name
        method: String,
    },
    /// A type reference does not resolve in the descriptor set
    #[error("unknown type `{type_name}` referenced by {referrer}")]
    UnknownType {
        /// Fully-qualified type name as referenced
        type_name: String,
        /// Field or method holding the reference
        referrer: String,
    },
    /// A method input or output names an enum rather than a message
    #[error("`{type_name}` used by {referrer} is not a message")]
    NotAMessage {
        /// Fully-qualified type name as referenced
        type_name: String,
        /// Method holding the reference
        referrer: String,
    },
    /// Messages that contain each other by value, which a Swift struct cannot
    #[error("message `{0}` contains itself through singular message fields")]
    RecursiveValueType(String),
    /// A map field's entry message is missing its key or value field
    #[error("malformed map entry `{0}`")]
    MalformedMapEntry(String),
    /// Formatting error when building generated source.
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}

/// Convenient result type for codegen functions in this crate.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// One generated output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output path relative to the host compiler's output directory
    pub name: String,
    /// File contents
    pub content: String,
}

/// Produces the generated files for one input file.
///
/// Implementors read models and services from `ctx`, which must already carry its
/// final marshal flags, and use `file` to decide what belongs to this output.
pub trait Renderer {
    /// Render every output file for `file`.
    fn render(&self, ctx: &ApiContext, file: &FileDescriptorProto) -> Result<Vec<GeneratedFile>>;
}

/// Trim trailing whitespace from each line and drop trailing blank lines.
/// Always ensures the returned string ends with a single newline when not empty.
pub fn clean_generated_source(src: &str) -> String {
    let mut lines: Vec<&str> = src.lines().map(str::trim_end).collect();

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}
