#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! API Registry: the canonical set of models and services for one generation run.
//!
//! Registration is split in two phases. An [`ApiContextBuilder`] only accepts
//! insertions; [`ApiContextBuilder::build`] consumes it and yields an [`ApiContext`],
//! which supports lookups and the marshal flag pass but no further insertions. Flags
//! therefore cannot be computed over a partially populated registry.
//!
//! Models live in an arena indexed by [`ModelId`]. Fields and methods refer to other
//! models by name and are resolved through the context on demand.

pub mod marshal_flags;

use std::collections::HashMap;

use ir::{Enumeration, Model, Service};
use thiserror::Error;

pub use marshal_flags::MarshalFlag;

/// Errors raised while populating the registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A model with this name is already registered
    #[error("duplicate model: {0}")]
    DuplicateModel(String),
    /// A service with this fully-qualified name is already registered
    #[error("duplicate service: {0}")]
    DuplicateService(String),
    /// An enumeration with this name is already registered
    #[error("duplicate enum: {0}")]
    DuplicateEnum(String),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Stable handle to a model slot in the registry arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(usize);

impl ModelId {
    /// Position of the model in registration order
    pub fn index(self) -> usize { self.0 }
}

/// Insertion-only registry used while descriptors are being walked.
#[derive(Debug, Default)]
pub struct ApiContextBuilder {
    models: Vec<Model>,
    model_index: HashMap<String, ModelId>,
    enums: Vec<Enumeration>,
    enum_index: HashMap<String, usize>,
    services: Vec<Service>,
}

impl ApiContextBuilder {
    /// Create an empty builder
    pub fn new() -> Self { Self::default() }

    /// Register a model under its name, keeping first-seen order.
    ///
    /// A second model with the same name is rejected and the registry is left unchanged.
    pub fn add_model(&mut self, model: Model) -> Result<ModelId> {
        if self.model_index.contains_key(&model.name) {
            return Err(RegistryError::DuplicateModel(model.name));
        }
        let id = ModelId(self.models.len());
        self.model_index.insert(model.name.clone(), id);
        self.models.push(model);
        Ok(id)
    }

    /// Register an enumeration under its name
    pub fn add_enum(&mut self, enumeration: Enumeration) -> Result<()> {
        if self.enum_index.contains_key(&enumeration.name) {
            return Err(RegistryError::DuplicateEnum(enumeration.name));
        }
        self.enum_index.insert(enumeration.name.clone(), self.enums.len());
        self.enums.push(enumeration);
        Ok(())
    }

    /// Register a service, keeping declaration order
    pub fn add_service(&mut self, service: Service) -> Result<()> {
        let full_name = service.full_name();
        if self.services.iter().any(|s| s.full_name() == full_name) {
            return Err(RegistryError::DuplicateService(full_name));
        }
        self.services.push(service);
        Ok(())
    }

    /// Number of models registered so far
    pub fn model_count(&self) -> usize { self.models.len() }

    /// Finish registration
    pub fn build(self) -> ApiContext {
        ApiContext {
            models: self.models,
            model_index: self.model_index,
            enums: self.enums,
            enum_index: self.enum_index,
            services: self.services,
        }
    }
}

/// Fully populated registry of models and services.
#[derive(Debug)]
pub struct ApiContext {
    models: Vec<Model>,
    model_index: HashMap<String, ModelId>,
    enums: Vec<Enumeration>,
    enum_index: HashMap<String, usize>,
    services: Vec<Service>,
}

impl ApiContext {
    /// Start a new registration phase
    pub fn builder() -> ApiContextBuilder { ApiContextBuilder::new() }

    /// Handle of the model registered under `name`
    pub fn model_id(&self, name: &str) -> Option<ModelId> { self.model_index.get(name).copied() }

    /// Model behind a handle obtained from this context
    pub fn model(&self, id: ModelId) -> &Model { &self.models[id.0] }

    pub(crate) fn model_mut(&mut self, id: ModelId) -> &mut Model { &mut self.models[id.0] }

    /// Enumeration registered under `name`
    pub fn enumeration(&self, name: &str) -> Option<&Enumeration> {
        self.enum_index.get(name).map(|&i| &self.enums[i])
    }

    /// All enumerations in registration order
    pub fn enums(&self) -> &[Enumeration] { &self.enums }

    /// Service registered under its fully-qualified name
    pub fn service(&self, full_name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.full_name() == full_name)
    }

    /// Number of registered models
    pub fn len(&self) -> usize { self.models.len() }

    /// Whether no model is registered
    pub fn is_empty(&self) -> bool { self.models.is_empty() }
}

/// Read-only interface to the [`ApiContext`].
pub trait ApiContextReader {
    /// Model registered under `name`.
    ///
    /// Returns `None` for names that are not models of this run, e.g. scalar types or
    /// types declared in skipped files.
    fn lookup(&self, name: &str) -> Option<&Model>;

    /// All models in registration order
    fn models(&self) -> &[Model];

    /// All services in registration order
    fn services(&self) -> &[Service];
}

impl ApiContextReader for ApiContext {
    fn lookup(&self, name: &str) -> Option<&Model> { self.model_id(name).map(|id| self.model(id)) }

    fn models(&self) -> &[Model] { &self.models }

    fn services(&self) -> &[Service] { &self.services }
}
