//! Swift generators.
//!
//! [`SwiftRenderer`] produces, for every eligible input file, a stub file with one
//! Twirp client per service and (unless disabled) a model file with the file's
//! messages and enums.

use config::PluginOptions;
use prost_types::FileDescriptorProto;
use registry::ApiContext;
use tracing::debug;

use crate::{clean_generated_source, GeneratedFile, Renderer, Result, TypeIndex};

/// Sub-module generates: **`stub`**
///
/// One `public struct` per service with an `async throws` method per RPC.
pub mod stub;

/// Sub-module generates: **`models`**
///
/// Codable structs for messages and string-backed enums.
pub mod models;

/// Name the generated headers give as their producer
pub const GENERATOR_NAME: &str = "protoc-gen-twirp-swift";

/// "DO NOT EDIT" banner plus imports every generated file starts with
pub fn file_header(source: &str) -> String {
    format!(
        "// Code generated by {GENERATOR_NAME}. DO NOT EDIT.\n\
         // source: {source}\n\
         \n\
         import Foundation\n"
    )
}

/// [`Renderer`] emitting Swift
#[derive(Debug)]
pub struct SwiftRenderer {
    index: TypeIndex,
    options: PluginOptions,
}

impl SwiftRenderer {
    /// Create a renderer resolving type names through `index`
    pub fn new(index: TypeIndex, options: &PluginOptions) -> Self {
        Self { index, options: options.clone() }
    }
}

impl Renderer for SwiftRenderer {
    fn render(&self, ctx: &ApiContext, file: &FileDescriptorProto) -> Result<Vec<GeneratedFile>> {
        let mut out = Vec::new();

        if !file.service.is_empty() {
            let name = path::twirp_filename(file.package(), file.name(), &self.options.target_ext);
            let content = stub::render_stub_file(ctx, &self.index, file)?;
            debug!(file = file.name(), output = %name, "rendered stub file");
            out.push(GeneratedFile { name, content: clean_generated_source(&content) });
        }

        if self.options.emit_models && (!file.message_type.is_empty() || !file.enum_type.is_empty())
        {
            let name = path::model_filename(file.name(), &self.options.target_ext);
            let content = models::render_model_file(ctx, &self.index, file)?;
            debug!(file = file.name(), output = %name, "rendered model file");
            out.push(GeneratedFile { name, content: clean_generated_source(&content) });
        }

        Ok(out)
    }
}
