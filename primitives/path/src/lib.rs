// SPDX-License-Identifier: CC0-1.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Output filename derivation for generated files.
//!
//! Pure functions mapping an input IDL file path (and, for stubs, its package) to the
//! path of the file generated from it.

pub mod path_utils;

// Re-export for convenience
pub use path_utils::*;
