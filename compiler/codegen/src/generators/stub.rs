// codegen/src/generators/stub.rs

use std::fmt::Write as _;

use ir::{Service, ServiceMethod};
use prost_types::FileDescriptorProto;
use registry::ApiContext;

use super::file_header;
use crate::type_index::TypeIndex;
use crate::utils::{decapitalize, sanitize_swift_identifier, swift_package_prefix};
use crate::{CodegenError, Result};

const SERVICE_TEMPLATE: &str = include_str!("../../templates/swift/service.swift");

/// Render the stub file for every service declared in `file`
pub fn render_stub_file(
    ctx: &ApiContext,
    index: &TypeIndex,
    file: &FileDescriptorProto,
) -> Result<String> {
    let mut out = file_header(file.name());

    for descriptor in &file.service {
        let full_name = qualified(file.package(), descriptor.name());
        let service = ctx.service(&full_name).ok_or_else(|| CodegenError::UnknownType {
            type_name: full_name.clone(),
            referrer: format!("file `{}`", file.name()),
        })?;
        out.push('\n');
        out.push_str(&render_service(index, service)?);
    }

    Ok(out)
}

/// Render one service client from [`SERVICE_TEMPLATE`]
pub fn render_service(index: &TypeIndex, service: &Service) -> Result<String> {
    let full_name = service.full_name();
    let mut methods = String::new();

    for method in &service.methods {
        if method.is_streaming() {
            return Err(CodegenError::StreamingUnsupported {
                service: full_name,
                method: method.name.clone(),
            });
        }
        methods.push('\n');
        methods.push_str(&render_method(index, &full_name, method)?);
    }

    let service_type = format!("{}{}", swift_package_prefix(&service.package), service.name);
    Ok(SERVICE_TEMPLATE
        .replace("{{SERVICE_TYPE}}", &service_type)
        .replace("{{SERVICE_FULL_NAME}}", &full_name)
        .replace("{{METHODS}}", &methods))
}

fn render_method(index: &TypeIndex, service: &str, method: &ServiceMethod) -> Result<String> {
    let referrer = format!("method `{}.{}`", service, method.name);
    let input = index.swift_message_name(&method.input_type, &referrer)?;
    let output = index.swift_message_name(&method.output_type, &referrer)?;
    let func = sanitize_swift_identifier(&decapitalize(&method.name));
    let arg = sanitize_swift_identifier(&method.input_arg);

    let mut out = String::new();
    writeln!(out, "    public func {func}({arg}: {input}) async throws -> {output} {{")?;
    writeln!(out, "        try await execute(request: {arg}, path: \"{}\")", method.name)?;
    writeln!(out, "    }}")?;
    Ok(out)
}

fn qualified(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}
