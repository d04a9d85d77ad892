#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Descriptor Adapter Library
//!
//! This crate translates parsed IDL file descriptors, as handed over by the host
//! compiler, into the API model held by the registry. It has two halves: a
//! [`DescriptorSource`] that yields the descriptors of one run, and the model builder
//! that walks a single descriptor into models, enumerations and services.

pub mod descriptor_source;
pub mod model_builder;

use thiserror::Error;

pub use descriptor_source::{DescriptorSource, RequestSource};
pub use model_builder::{build_file, has_services, is_generatable, is_infrastructure_file};

#[derive(Debug, Error)]
/// Errors that can occur while walking descriptors
pub enum AdapterError {
    /// A file requested for generation is absent from the descriptor set
    #[error("file to generate not found in descriptor set: {0}")]
    UnknownFile(String),
    /// A declaration has no name
    #[error("{kind} without a name in {file}")]
    MissingName {
        /// Kind of declaration (`message`, `enum`, `service`, `method`)
        kind: &'static str,
        /// File the declaration appears in
        file: String,
    },
    /// A message- or enum-typed field does not name its type
    #[error("field `{field}` of `{message}` has no type name")]
    MissingTypeName {
        /// Message declaring the field
        message: String,
        /// Field name
        field: String,
    },
    /// Registration conflict
    #[error(transparent)]
    Registry(#[from] registry::RegistryError),
}

/// Result alias for adapter operations
pub type AdapterResult<T> = std::result::Result<T, AdapterError>;
