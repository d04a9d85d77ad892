//! API model
//!
//! Messages become [`Model`]s, their fields [`ModelField`]s, and RPC services
//! [`Service`]s with [`ServiceMethod`]s. Cross references (a field's type, a
//! method's input and output) are held by *name* and resolved through the
//! registry that owns the models; nothing in this module points at another
//! model directly.

use serde::{Deserialize, Serialize};

/// A named message type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Registry key for this model (fully-qualified IDL name without the leading dot)
    pub name: String,
    /// IDL package the message was declared in (empty for the root package)
    #[serde(default)]
    pub package: String,
    /// Client code must be able to serialize this model
    #[serde(default)]
    pub can_marshal: bool,
    /// Client code must be able to deserialize this model
    #[serde(default)]
    pub can_unmarshal: bool,
    /// Synthesized entry message backing a map field
    #[serde(default)]
    pub is_map_entry: bool,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<ModelField>,
}

impl Model {
    /// Create a model with no fields and both capability flags cleared
    pub fn new(name: impl Into<String>) -> Self { Self { name: name.into(), ..Self::default() } }

    /// Set the IDL package
    pub fn in_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Append a field
    pub fn with_field(mut self, field: ModelField) -> Self {
        self.fields.push(field);
        self
    }

    /// Name relative to the package (`svc.Outer.Inner` in package `svc` is `Outer.Inner`)
    pub fn relative_name(&self) -> &str {
        if self.package.is_empty() {
            return &self.name;
        }
        self.name
            .strip_prefix(&self.package)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(&self.name)
    }

    /// Fields whose type is itself a message
    pub fn message_fields(&self) -> impl Iterator<Item = &ModelField> {
        self.fields.iter().filter(|f| f.is_message)
    }

    /// Look up a field by its IDL name
    pub fn field(&self, name: &str) -> Option<&ModelField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One field of a [`Model`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelField {
    /// Field name as declared in the IDL
    pub name: String,
    /// Referenced type name.
    ///
    /// Fully-qualified message or enum name for composite fields, the scalar keyword
    /// (`int32`, `string`, ...) otherwise. A name that is not registered as a model is
    /// inert for flag propagation.
    pub type_name: String,
    /// The field's type is a message, not a scalar or an enum
    pub is_message: bool,
    /// JSON name used on the wire
    #[serde(default)]
    pub json_name: String,
    /// Cardinality
    #[serde(default)]
    pub label: FieldLabel,
    /// Scalar kind for non-composite fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scalar: Option<ScalarType>,
}

impl ModelField {
    /// A message-typed field referencing `type_name`
    pub fn message(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            json_name: lower_camel_case(&name),
            name,
            type_name: type_name.into(),
            is_message: true,
            label: FieldLabel::Optional,
            scalar: None,
        }
    }

    /// An enum-typed field referencing `type_name`
    pub fn enumeration(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self { is_message: false, ..Self::message(name, type_name) }
    }

    /// A scalar field
    pub fn scalar(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self {
            type_name: scalar.keyword().to_string(),
            is_message: false,
            scalar: Some(scalar),
            ..Self::message(name, String::new())
        }
    }

    /// Mark the field repeated
    pub fn repeated(mut self) -> Self {
        self.label = FieldLabel::Repeated;
        self
    }

    /// Whether the field holds a list of values
    pub fn is_repeated(&self) -> bool { self.label == FieldLabel::Repeated }
}

/// Field cardinality
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldLabel {
    /// Singular field (proto3 default)
    #[default]
    Optional,
    /// proto2 required field
    Required,
    /// Repeated field
    Repeated,
}

/// IDL scalar value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    /// 64-bit float
    Double,
    /// 32-bit float
    Float,
    /// Signed 64-bit varint
    Int64,
    /// Unsigned 64-bit varint
    Uint64,
    /// Signed 32-bit varint
    Int32,
    /// Unsigned 64-bit fixed width
    Fixed64,
    /// Unsigned 32-bit fixed width
    Fixed32,
    /// Boolean
    Bool,
    /// UTF-8 string
    String,
    /// Raw bytes
    Bytes,
    /// Unsigned 32-bit varint
    Uint32,
    /// Signed 32-bit fixed width
    Sfixed32,
    /// Signed 64-bit fixed width
    Sfixed64,
    /// Zigzag-encoded signed 32-bit varint
    Sint32,
    /// Zigzag-encoded signed 64-bit varint
    Sint64,
}

impl ScalarType {
    /// The IDL keyword for this scalar
    pub fn keyword(&self) -> &'static str {
        match self {
            ScalarType::Double => "double",
            ScalarType::Float => "float",
            ScalarType::Int64 => "int64",
            ScalarType::Uint64 => "uint64",
            ScalarType::Int32 => "int32",
            ScalarType::Fixed64 => "fixed64",
            ScalarType::Fixed32 => "fixed32",
            ScalarType::Bool => "bool",
            ScalarType::String => "string",
            ScalarType::Bytes => "bytes",
            ScalarType::Uint32 => "uint32",
            ScalarType::Sfixed32 => "sfixed32",
            ScalarType::Sfixed64 => "sfixed64",
            ScalarType::Sint32 => "sint32",
            ScalarType::Sint64 => "sint64",
        }
    }
}

/// A named RPC service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Service name as declared (`Haberdasher`)
    pub name: String,
    /// IDL package the service was declared in
    pub package: String,
    /// Methods in declaration order
    #[serde(default)]
    pub methods: Vec<ServiceMethod>,
}

impl Service {
    /// Create a service with no methods
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self { name: name.into(), package: package.into(), methods: Vec::new() }
    }

    /// Append a method
    pub fn with_method(mut self, method: ServiceMethod) -> Self {
        self.methods.push(method);
        self
    }

    /// `package.Name`, or just `Name` in the root package
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

/// One RPC method of a [`Service`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceMethod {
    /// Method name as declared (`MakeHat`)
    pub name: String,
    /// Parameter label used by generated client signatures
    pub input_arg: String,
    /// Model name of the request message
    pub input_type: String,
    /// Model name of the response message
    pub output_type: String,
    /// Client sends a stream of requests
    #[serde(default)]
    pub client_streaming: bool,
    /// Server replies with a stream of responses
    #[serde(default)]
    pub server_streaming: bool,
}

impl ServiceMethod {
    /// Create a unary method; the input argument label is derived from the input type
    pub fn new(
        name: impl Into<String>,
        input_type: impl Into<String>,
        output_type: impl Into<String>,
    ) -> Self {
        let input_type = input_type.into();
        Self {
            name: name.into(),
            input_arg: input_arg_for(&input_type),
            input_type,
            output_type: output_type.into(),
            client_streaming: false,
            server_streaming: false,
        }
    }

    /// Either side streams
    pub fn is_streaming(&self) -> bool { self.client_streaming || self.server_streaming }
}

/// An enumeration type. Enumerations never take part in marshal flag propagation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enumeration {
    /// Registry key (fully-qualified IDL name without the leading dot)
    pub name: String,
    /// IDL package the enum was declared in
    #[serde(default)]
    pub package: String,
    /// Values in declaration order
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

/// One value of an [`Enumeration`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Value name as declared (`SIZE_SMALL`)
    pub name: String,
    /// Wire number
    pub number: i32,
}

/// Parameter label for a method taking `type_name`: the lower-camel-cased short name
/// (`svc.SetPublisherRequest` → `setPublisherRequest`).
pub fn input_arg_for(type_name: &str) -> String {
    let short = type_name.rsplit('.').next().unwrap_or(type_name);
    let mut chars = short.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `snake_case` → `lowerCamelCase`, the default JSON name of a field.
pub fn lower_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
