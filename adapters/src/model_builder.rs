//! Model Builder
//!
//! Walks one file descriptor into registry entries: a [`Model`] per message (nested
//! and map-entry messages included), an [`Enumeration`] per enum and a [`Service`] per
//! service. Registry keys are fully-qualified IDL names without the leading dot.

use ir::{EnumValue, Enumeration, FieldLabel, Model, ModelField, ScalarType, Service, ServiceMethod};
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    ServiceDescriptorProto,
};
use registry::ApiContextBuilder;
use tracing::debug;

use crate::{AdapterError, AdapterResult};

/// Package of the well-known types shipped with the IDL compiler
pub const INFRASTRUCTURE_PACKAGE: &str = "google.protobuf";

/// Path prefix of the well-known type files
pub const INFRASTRUCTURE_PATH_PREFIX: &str = "google/protobuf/";

/// Whether `file` is one of the IDL compiler's own infrastructure files
pub fn is_infrastructure_file(file: &FileDescriptorProto) -> bool {
    file.package() == INFRASTRUCTURE_PACKAGE || file.name().starts_with(INFRASTRUCTURE_PATH_PREFIX)
}

/// Whether `file` declares at least one service
pub fn has_services(file: &FileDescriptorProto) -> bool { !file.service.is_empty() }

/// Whether stubs are generated for `file`
pub fn is_generatable(file: &FileDescriptorProto) -> bool {
    !is_infrastructure_file(file) && has_services(file)
}

/// Register every message, enum and service declared in `file`.
pub fn build_file(builder: &mut ApiContextBuilder, file: &FileDescriptorProto) -> AdapterResult<()> {
    let package = file.package();
    for message in &file.message_type {
        register_message(builder, file, package, message)?;
    }
    for enumeration in &file.enum_type {
        register_enum(builder, file, package, enumeration)?;
    }
    for service in &file.service {
        builder.add_service(build_service(file, service)?)?;
    }
    debug!(
        file = file.name(),
        messages = file.message_type.len(),
        services = file.service.len(),
        "built file"
    );
    Ok(())
}

/// Fully-qualified name of `name` declared inside `scope`
fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}

/// Registry key for a descriptor type reference (`.svc.Hat` → `svc.Hat`)
fn type_key(type_name: &str) -> String { type_name.trim_start_matches('.').to_string() }

fn register_message(
    builder: &mut ApiContextBuilder,
    file: &FileDescriptorProto,
    scope: &str,
    message: &DescriptorProto,
) -> AdapterResult<()> {
    if message.name().is_empty() {
        return Err(AdapterError::MissingName { kind: "message", file: file.name().to_string() });
    }
    let full_name = qualify(scope, message.name());

    let mut model = Model::new(full_name.clone()).in_package(file.package());
    model.is_map_entry = message.options.as_ref().is_some_and(|o| o.map_entry());
    for field in &message.field {
        model.fields.push(build_field(&full_name, field)?);
    }
    builder.add_model(model)?;

    for nested in &message.nested_type {
        register_message(builder, file, &full_name, nested)?;
    }
    for enumeration in &message.enum_type {
        register_enum(builder, file, &full_name, enumeration)?;
    }
    Ok(())
}

fn build_field(message: &str, field: &FieldDescriptorProto) -> AdapterResult<ModelField> {
    let mut model_field = match scalar_type(field.r#type()) {
        Some(scalar) => ModelField::scalar(field.name(), scalar),
        None => {
            if field.type_name().is_empty() {
                return Err(AdapterError::MissingTypeName {
                    message: message.to_string(),
                    field: field.name().to_string(),
                });
            }
            let type_name = type_key(field.type_name());
            match field.r#type() {
                Type::Enum => ModelField::enumeration(field.name(), type_name),
                _ => ModelField::message(field.name(), type_name),
            }
        }
    };
    if !field.json_name().is_empty() {
        model_field.json_name = field.json_name().to_string();
    }
    model_field.label = match field.label() {
        Label::Optional => FieldLabel::Optional,
        Label::Required => FieldLabel::Required,
        Label::Repeated => FieldLabel::Repeated,
    };
    Ok(model_field)
}

/// Scalar kind of a descriptor field type; `None` for messages, groups and enums
fn scalar_type(ty: Type) -> Option<ScalarType> {
    let scalar = match ty {
        Type::Double => ScalarType::Double,
        Type::Float => ScalarType::Float,
        Type::Int64 => ScalarType::Int64,
        Type::Uint64 => ScalarType::Uint64,
        Type::Int32 => ScalarType::Int32,
        Type::Fixed64 => ScalarType::Fixed64,
        Type::Fixed32 => ScalarType::Fixed32,
        Type::Bool => ScalarType::Bool,
        Type::String => ScalarType::String,
        Type::Bytes => ScalarType::Bytes,
        Type::Uint32 => ScalarType::Uint32,
        Type::Sfixed32 => ScalarType::Sfixed32,
        Type::Sfixed64 => ScalarType::Sfixed64,
        Type::Sint32 => ScalarType::Sint32,
        Type::Sint64 => ScalarType::Sint64,
        Type::Group | Type::Message | Type::Enum => return None,
    };
    Some(scalar)
}

fn register_enum(
    builder: &mut ApiContextBuilder,
    file: &FileDescriptorProto,
    scope: &str,
    enumeration: &EnumDescriptorProto,
) -> AdapterResult<()> {
    if enumeration.name().is_empty() {
        return Err(AdapterError::MissingName { kind: "enum", file: file.name().to_string() });
    }
    builder.add_enum(Enumeration {
        name: qualify(scope, enumeration.name()),
        package: file.package().to_string(),
        values: enumeration
            .value
            .iter()
            .map(|v| EnumValue { name: v.name().to_string(), number: v.number() })
            .collect(),
    })?;
    Ok(())
}

fn build_service(
    file: &FileDescriptorProto,
    service: &ServiceDescriptorProto,
) -> AdapterResult<Service> {
    if service.name().is_empty() {
        return Err(AdapterError::MissingName { kind: "service", file: file.name().to_string() });
    }
    let mut built = Service::new(service.name(), file.package());
    for method in &service.method {
        if method.name().is_empty() {
            return Err(AdapterError::MissingName { kind: "method", file: file.name().to_string() });
        }
        let mut service_method = ServiceMethod::new(
            method.name(),
            type_key(method.input_type()),
            type_key(method.output_type()),
        );
        service_method.client_streaming = method.client_streaming();
        service_method.server_streaming = method.server_streaming();
        built.methods.push(service_method);
    }
    Ok(built)
}
