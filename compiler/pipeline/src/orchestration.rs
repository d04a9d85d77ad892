//! Pipeline orchestration for the main entry points.
//!
//! This module contains the entry points that drive a whole run: descriptor
//! source → model build → marshal flags → rendering → response.

use adapters::{DescriptorSource, RequestSource};
use codegen::{Renderer, SwiftRenderer, TypeIndex};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};

use crate::codec::{decode_request, encode_response};
use crate::generation_context::GenerationContext;
use crate::Result;

/// Run the pipeline on a decoded request with the Swift renderer.
///
/// # Returns
///
/// The response to send back, which carries a per-file error if rendering failed,
/// or a [`PipelineError`](crate::PipelineError) for failures that abort the run.
pub fn run(request: &CodeGeneratorRequest) -> Result<CodeGeneratorResponse> {
    let source = RequestSource::new(request);
    let context = GenerationContext::from_source(&source)?;
    let renderer = SwiftRenderer::new(TypeIndex::from_files(source.all_files()), &context.options);
    Ok(context.render(&renderer))
}

/// Run the pipeline on a decoded request with any renderer
pub fn run_with(
    request: &CodeGeneratorRequest,
    renderer: &dyn Renderer,
) -> Result<CodeGeneratorResponse> {
    let source = RequestSource::new(request);
    let context = GenerationContext::from_source(&source)?;
    Ok(context.render(renderer))
}

/// Full byte-level pipeline: decode, [`run`], encode
pub fn run_bytes(input: &[u8]) -> Result<Vec<u8>> {
    let request = decode_request(input)?;
    let response = run(&request)?;
    Ok(encode_response(&response))
}
