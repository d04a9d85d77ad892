//! Descriptor Source
//!
//! This module defines where a run's file descriptors come from. The host compiler
//! sends every file reachable from the requested ones, in dependency order, and
//! separately names the subset it wants code for.

use prost_types::compiler::CodeGeneratorRequest;
use prost_types::FileDescriptorProto;

use crate::{AdapterError, AdapterResult};

/// Supplier of parsed file descriptors for one generation run
pub trait DescriptorSource {
    /// Every descriptor of the run, including dependencies that are not generated
    fn all_files(&self) -> &[FileDescriptorProto];

    /// Names of the files code is requested for, in request order
    fn requested_names(&self) -> &[String];

    /// Raw parameter string forwarded by the host, if any
    fn parameter(&self) -> Option<&str>;

    /// Resolve [`DescriptorSource::requested_names`] against [`DescriptorSource::all_files`]
    ///
    /// # Returns
    ///
    /// The requested descriptors in request order, or [`AdapterError::UnknownFile`] for
    /// the first name that has no descriptor.
    fn files_to_generate(&self) -> AdapterResult<Vec<&FileDescriptorProto>> {
        self.requested_names()
            .iter()
            .map(|name| {
                self.all_files()
                    .iter()
                    .find(|f| f.name() == name)
                    .ok_or_else(|| AdapterError::UnknownFile(name.clone()))
            })
            .collect()
    }
}

/// [`DescriptorSource`] backed by a decoded plugin request
#[derive(Debug, Clone, Copy)]
pub struct RequestSource<'a> {
    request: &'a CodeGeneratorRequest,
}

impl<'a> RequestSource<'a> {
    /// Wrap a decoded request
    pub fn new(request: &'a CodeGeneratorRequest) -> Self { Self { request } }
}

impl DescriptorSource for RequestSource<'_> {
    fn all_files(&self) -> &[FileDescriptorProto] { &self.request.proto_file }

    fn requested_names(&self) -> &[String] { &self.request.file_to_generate }

    fn parameter(&self) -> Option<&str> { self.request.parameter.as_deref() }
}
