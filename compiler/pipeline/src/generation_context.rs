//! Generation context for the code generation pipeline.
//!
//! The context is built in two phases: every eligible file is walked into an
//! [`ApiContextBuilder`](registry::ApiContextBuilder), and only once all of them are
//! in is the registry frozen and its marshal flags computed. Rendering then reads
//! the finished registry.

use adapters::{build_file, is_generatable, DescriptorSource};
use codegen::Renderer;
use config::PluginOptions;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::CodeGeneratorResponse;
use prost_types::FileDescriptorProto;
use registry::ApiContext;
use tracing::{debug, info, warn};

use crate::{PipelineError, Result};

/// Context containing everything needed to render one run
#[derive(Debug)]
pub struct GenerationContext<'a> {
    /// Registry with final marshal flags
    pub api: ApiContext,
    /// Options parsed from the request parameter
    pub options: PluginOptions,
    /// Files to render, in request order
    pub files: Vec<&'a FileDescriptorProto>,
}

impl<'a> GenerationContext<'a> {
    /// Parse options, build the registry from every eligible file and apply marshal flags
    pub fn from_source(source: &'a dyn DescriptorSource) -> Result<Self> {
        if source.requested_names().is_empty() {
            return Err(PipelineError::NoFilesToGenerate);
        }
        let options = PluginOptions::from_parameter_string(source.parameter())?;

        let mut builder = ApiContext::builder();
        let mut files = Vec::new();
        for file in source.files_to_generate()? {
            if !is_generatable(file) {
                debug!(file = file.name(), "skipping non-generatable file");
                continue;
            }
            build_file(&mut builder, file)?;
            files.push(file);
        }

        let mut api = builder.build();
        api.apply_marshal_flags();

        Ok(Self { api, options, files })
    }

    /// Render every file, stopping at the first failure.
    ///
    /// On failure the response carries only the error, prefixed with the failing
    /// file's name; output already rendered for earlier files is dropped.
    pub fn render(&self, renderer: &dyn Renderer) -> CodeGeneratorResponse {
        let mut response = CodeGeneratorResponse {
            supported_features: Some(Feature::Proto3Optional as u64),
            ..Default::default()
        };

        for file in &self.files {
            match renderer.render(&self.api, file) {
                Ok(generated) => response.file.extend(generated.into_iter().map(|g| File {
                    name: Some(g.name),
                    content: Some(g.content),
                    ..Default::default()
                })),
                Err(e) => {
                    warn!(file = file.name(), error = %e, "generation failed");
                    response.file.clear();
                    response.error = Some(format!("{}: {}", file.name(), e));
                    return response;
                }
            }
        }

        info!(inputs = self.files.len(), outputs = response.file.len(), "generation complete");
        response
    }
}

#[cfg(test)]
mod tests {
    use adapters::RequestSource;
    use prost_types::compiler::CodeGeneratorRequest;
    use prost_types::{DescriptorProto, MethodDescriptorProto, ServiceDescriptorProto};

    use super::*;

    fn service_file(name: &str, package: &str) -> FileDescriptorProto {
        FileDescriptorProto {
            name: Some(name.into()),
            package: Some(package.into()),
            message_type: vec![DescriptorProto { name: Some("Ping".into()), ..Default::default() }],
            service: vec![ServiceDescriptorProto {
                name: Some("Pinger".into()),
                method: vec![MethodDescriptorProto {
                    name: Some("Ping".into()),
                    input_type: Some(format!(".{package}.Ping")),
                    output_type: Some(format!(".{package}.Ping")),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_from_source_filters_and_flags() {
        let types_only = FileDescriptorProto {
            name: Some("types.proto".into()),
            package: Some("types".into()),
            message_type: vec![DescriptorProto { name: Some("Unused".into()), ..Default::default() }],
            ..Default::default()
        };
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["types.proto".into(), "a.proto".into()],
            parameter: Some("models=false".into()),
            proto_file: vec![types_only, service_file("a.proto", "a")],
            ..Default::default()
        };
        let source = RequestSource::new(&request);
        let context = GenerationContext::from_source(&source).expect("context should build");

        assert_eq!(context.files.len(), 1);
        assert_eq!(context.files[0].name(), "a.proto");
        assert!(!context.options.emit_models);
        assert!(context.api.model_id("types.Unused").is_none());

        let ping = context.api.model(context.api.model_id("a.Ping").expect("registered"));
        assert!(ping.can_marshal && ping.can_unmarshal);
    }

    #[test]
    fn test_from_source_errors() {
        let empty = CodeGeneratorRequest::default();
        match GenerationContext::from_source(&RequestSource::new(&empty)) {
            Err(PipelineError::NoFilesToGenerate) => {}
            other => panic!("Expected NoFilesToGenerate error, got {:?}", other),
        }

        let bad_param = CodeGeneratorRequest {
            file_to_generate: vec!["a.proto".into()],
            parameter: Some("a=1,b".into()),
            proto_file: vec![service_file("a.proto", "a")],
            ..Default::default()
        };
        assert!(matches!(
            GenerationContext::from_source(&RequestSource::new(&bad_param)),
            Err(PipelineError::Parameter(_))
        ));

        let duplicate = CodeGeneratorRequest {
            file_to_generate: vec!["a.proto".into(), "b.proto".into()],
            proto_file: vec![service_file("a.proto", "same"), service_file("b.proto", "same")],
            ..Default::default()
        };
        assert!(matches!(
            GenerationContext::from_source(&RequestSource::new(&duplicate)),
            Err(PipelineError::Adapter(_))
        ));
    }
}
