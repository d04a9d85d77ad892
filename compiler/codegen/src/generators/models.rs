// codegen/src/generators/models.rs

use std::collections::HashSet;
use std::fmt::Write as _;

use ir::{Enumeration, Model, ModelField};
use prost_types::{DescriptorProto, FileDescriptorProto};
use registry::ApiContext;

use super::file_header;
use crate::type_index::TypeIndex;
use crate::utils::{swift_enum_case, swift_property_name, swift_scalar, swift_string_literal};
use crate::{CodegenError, Result};

/// Swift rendering of one stored property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwiftProperty {
    /// Property name, escaped when it is a keyword
    pub name: String,
    /// Declared type (`[T]`, `T?`, `[K: V]`, or a scalar type)
    pub type_decl: String,
    /// Type handed to `decodeIfPresent`
    pub decode_type: String,
    /// Value used when the key is absent, `None` for optionals
    pub default: Option<String>,
    /// JSON key
    pub json_name: String,
}

/// Render the model file for the messages and enums declared in `file`
pub fn render_model_file(
    ctx: &ApiContext,
    index: &TypeIndex,
    file: &FileDescriptorProto,
) -> Result<String> {
    let mut out = file_header(file.name());
    let referrer = format!("file `{}`", file.name());

    let mut names = Vec::new();
    for message in &file.message_type {
        collect_names(&qualify(file.package(), ""), message, &mut names);
    }

    for (name, is_message) in &names {
        if *is_message {
            let id = ctx.model_id(name).ok_or_else(|| unknown(name, &referrer))?;
            let model = ctx.model(id);
            if model.is_map_entry {
                continue;
            }
            out.push('\n');
            out.push_str(&render_model(ctx, index, model)?);
        } else {
            let enumeration = ctx.enumeration(name).ok_or_else(|| unknown(name, &referrer))?;
            out.push('\n');
            out.push_str(&render_enum(index, enumeration)?);
        }
    }

    for descriptor in &file.enum_type {
        let name = qualify(file.package(), descriptor.name());
        let enumeration = ctx.enumeration(&name).ok_or_else(|| unknown(&name, &referrer))?;
        out.push('\n');
        out.push_str(&render_enum(index, enumeration)?);
    }

    Ok(out)
}

/// Fully-qualified names of `message`, its nested messages and nested enums, in
/// declaration order. The flag is `true` for messages.
fn collect_names(scope: &str, message: &DescriptorProto, names: &mut Vec<(String, bool)>) {
    let name = qualify(scope, message.name());
    names.push((name.clone(), true));
    for nested in &message.nested_type {
        collect_names(&name, nested, names);
    }
    for enumeration in &message.enum_type {
        names.push((qualify(&name, enumeration.name()), false));
    }
}

/// Render a struct, plus `Encodable`/`Decodable` conformances as the model's flags allow
pub fn render_model(ctx: &ApiContext, index: &TypeIndex, model: &Model) -> Result<String> {
    check_value_cycle(ctx, model)?;
    let type_name = index.swift_name(&model.name, &format!("model `{}`", model.name))?;
    let properties = model
        .fields
        .iter()
        .map(|field| swift_property(ctx, index, model, field))
        .collect::<Result<Vec<_>>>()?;

    let mut out = String::new();
    writeln!(out, "public struct {type_name} {{")?;
    for p in &properties {
        match &p.default {
            Some(default) => writeln!(out, "    public var {}: {} = {}", p.name, p.type_decl, default)?,
            None => writeln!(out, "    public var {}: {}", p.name, p.type_decl)?,
        }
    }
    if !properties.is_empty() {
        writeln!(out)?;
    }
    writeln!(out, "    public init() {{}}")?;
    if !properties.is_empty() {
        writeln!(out)?;
        writeln!(out, "    enum CodingKeys: String, CodingKey {{")?;
        for p in &properties {
            writeln!(out, "        case {} = {}", p.name, swift_string_literal(&p.json_name))?;
        }
        writeln!(out, "    }}")?;
    }
    writeln!(out, "}}")?;

    if model.can_marshal {
        writeln!(out)?;
        writeln!(out, "extension {type_name}: Encodable {{}}")?;
    }

    if model.can_unmarshal {
        writeln!(out)?;
        writeln!(out, "extension {type_name}: Decodable {{")?;
        writeln!(out, "    public init(from decoder: Decoder) throws {{")?;
        writeln!(out, "        self.init()")?;
        if !properties.is_empty() {
            writeln!(out, "        let container = try decoder.container(keyedBy: CodingKeys.self)")?;
        }
        for p in &properties {
            let decode = format!(
                "try container.decodeIfPresent({}.self, forKey: .{})",
                p.decode_type, p.name
            );
            match &p.default {
                Some(default) => writeln!(out, "        {} = {} ?? {}", p.name, decode, default)?,
                None => writeln!(out, "        {} = {}", p.name, decode)?,
            }
        }
        writeln!(out, "    }}")?;
        writeln!(out, "}}")?;
    }

    Ok(out)
}

/// Swift property for one field of `model`
pub fn swift_property(
    ctx: &ApiContext,
    index: &TypeIndex,
    model: &Model,
    field: &ModelField,
) -> Result<SwiftProperty> {
    let referrer = format!("field `{}.{}`", model.name, field.name);
    let name = swift_property_name(&field.name);
    let json_name = field.json_name.clone();

    if let Some(entry) = map_entry(ctx, field) {
        let key = entry.field("key").ok_or_else(|| CodegenError::MalformedMapEntry(entry.name.clone()))?;
        let value =
            entry.field("value").ok_or_else(|| CodegenError::MalformedMapEntry(entry.name.clone()))?;
        let dict = format!(
            "[{}: {}]",
            element_type(index, key, &referrer)?,
            element_type(index, value, &referrer)?
        );
        return Ok(SwiftProperty {
            name,
            decode_type: dict.clone(),
            type_decl: dict,
            default: Some("[:]".to_string()),
            json_name,
        });
    }

    let element = element_type(index, field, &referrer)?;
    if field.is_repeated() {
        let list = format!("[{element}]");
        return Ok(SwiftProperty {
            name,
            decode_type: list.clone(),
            type_decl: list,
            default: Some("[]".to_string()),
            json_name,
        });
    }

    match field.scalar {
        Some(scalar) => Ok(SwiftProperty {
            name,
            type_decl: element.clone(),
            decode_type: element,
            default: Some(swift_scalar(scalar).1.to_string()),
            json_name,
        }),
        None => Ok(SwiftProperty {
            name,
            type_decl: format!("{element}?"),
            decode_type: element,
            default: None,
            json_name,
        }),
    }
}

/// Reject `model` when it reaches itself through singular message fields.
///
/// Lists and maps are stored out of line in Swift, so only singular fields count.
fn check_value_cycle(ctx: &ApiContext, model: &Model) -> Result<()> {
    let mut seen = HashSet::new();
    let mut stack = vec![model];
    while let Some(current) = stack.pop() {
        for field in current.fields.iter().filter(|f| f.is_message && !f.is_repeated()) {
            let name = field.type_name.trim_start_matches('.');
            if name == model.name {
                return Err(CodegenError::RecursiveValueType(model.name.clone()));
            }
            if let Some(id) = ctx.model_id(name) {
                if seen.insert(id) {
                    stack.push(ctx.model(id));
                }
            }
        }
    }
    Ok(())
}

fn map_entry<'a>(ctx: &'a ApiContext, field: &ModelField) -> Option<&'a Model> {
    if !field.is_message || !field.is_repeated() {
        return None;
    }
    let entry = ctx.model(ctx.model_id(&field.type_name)?);
    entry.is_map_entry.then_some(entry)
}

fn element_type(index: &TypeIndex, field: &ModelField, referrer: &str) -> Result<String> {
    match field.scalar {
        Some(scalar) => Ok(swift_scalar(scalar).0.to_string()),
        None => index.swift_name(&field.type_name, referrer),
    }
}

/// Render a string-backed enum; raw values are the IDL value names used in JSON
pub fn render_enum(index: &TypeIndex, enumeration: &Enumeration) -> Result<String> {
    let type_name =
        index.swift_name(&enumeration.name, &format!("enum `{}`", enumeration.name))?;
    let short = enumeration.name.rsplit('.').next().unwrap_or(&enumeration.name);

    let mut out = String::new();
    writeln!(out, "public enum {type_name}: String, Codable, CaseIterable {{")?;
    for value in &enumeration.values {
        writeln!(
            out,
            "    case {} = {}",
            swift_enum_case(short, &value.name),
            swift_string_literal(&value.name)
        )?;
    }
    writeln!(out, "}}")?;
    Ok(out)
}

fn qualify(scope: &str, name: &str) -> String {
    match (scope.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (false, true) => scope.to_string(),
        (false, false) => format!("{scope}.{name}"),
    }
}

fn unknown(name: &str, referrer: &str) -> CodegenError {
    CodegenError::UnknownType { type_name: name.to_string(), referrer: referrer.to_string() }
}
