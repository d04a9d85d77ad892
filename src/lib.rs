// SPDX-License-Identifier: CC0-1.0

//! twirpgen umbrella crate.
//!
//! This crate primarily serves as the workspace root.
//!
//! All functional code lives in the workspace member crates under
//! `primitives`, `adapters`, `compiler` and `cli`. The plugin binary is
//! `protoc-gen-twirp-swift` in `cli/orchestrator`.

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![doc(test(attr(warn(unused))))]

/// Miscellaneous metadata about the twirpgen workspace.
pub mod twirpgen_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Name of the plugin binary protoc looks up for `--twirp-swift_out`.
    pub const PLUGIN_NAME: &str = "protoc-gen-twirp-swift";
}
