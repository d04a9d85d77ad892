#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Twirp API model
//!
//! This crate defines the in-memory model a code generator builds from parsed IDL
//! descriptors: message types with their fields, enumerations, and RPC services.
//! The model sits between the descriptor walker and the renderers; it carries no
//! knowledge of the wire format the descriptors arrived in.

pub mod api_model;

// Re-export the model types for convenience
pub use api_model::*;
