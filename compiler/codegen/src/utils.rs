// codegen/src/utils.rs

use ir::{lower_camel_case, ScalarType};

/// Swift reserved words that must be escaped with backticks when used as identifiers
const SWIFT_KEYWORDS: &[&str] = &[
    "Any", "Protocol", "Self", "Type", "as", "associatedtype", "break", "case", "catch", "class",
    "continue", "default", "defer", "deinit", "do", "else", "enum", "extension", "fallthrough",
    "false", "fileprivate", "for", "func", "guard", "if", "import", "in", "init", "inout",
    "internal", "is", "let", "nil", "open", "operator", "private", "protocol", "public",
    "repeat", "rethrows", "return", "self", "static", "struct", "subscript", "super", "switch",
    "throw", "throws", "true", "try", "typealias", "var", "where", "while",
];

/// Capitalize the first letter of a string
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Lower-case the first letter of a string
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Convert snake_case to PascalCase
pub fn snake_to_pascal_case(s: &str) -> String { s.split('_').map(capitalize).collect() }

/// Prefix every type of `package` carries in Swift.
///
/// # Examples
/// ```
/// use twirpgen_codegen::utils::swift_package_prefix;
/// assert_eq!(swift_package_prefix("stream.video.sfu"), "Stream_Video_Sfu_");
/// assert_eq!(swift_package_prefix("my_pkg.v1"), "MyPkg_V1_");
/// assert_eq!(swift_package_prefix(""), "");
/// ```
pub fn swift_package_prefix(package: &str) -> String {
    if package.is_empty() {
        return String::new();
    }
    let components: Vec<String> = package.split('.').map(snake_to_pascal_case).collect();
    format!("{}_", components.join("_"))
}

/// Escape `name` with backticks when it is a Swift keyword
pub fn sanitize_swift_identifier(name: &str) -> String {
    if SWIFT_KEYWORDS.contains(&name) {
        format!("`{name}`")
    } else {
        name.to_string()
    }
}

/// Swift property name for an IDL field name
pub fn swift_property_name(field_name: &str) -> String {
    sanitize_swift_identifier(&lower_camel_case(field_name))
}

/// Swift case name for an enum value.
///
/// The conventional `ENUM_NAME_` prefix is dropped before camel-casing, so value
/// `TRACK_TYPE_AUDIO` of enum `TrackType` becomes `audio`. Values that would start
/// with a digit after stripping keep their prefix.
pub fn swift_enum_case(enum_name: &str, value_name: &str) -> String {
    let prefix = format!("{}_", pascal_to_upper_snake_case(enum_name));
    let stripped = match value_name.strip_prefix(&prefix) {
        Some(rest) if rest.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) => rest,
        _ => value_name,
    };
    sanitize_swift_identifier(&lower_camel_case(&stripped.to_ascii_lowercase()))
}

/// Converts a PascalCase string to UPPER_SNAKE_CASE
pub fn pascal_to_upper_snake_case(input: &str) -> String {
    let mut result = String::new();
    for c in input.chars() {
        if c.is_uppercase() && !result.is_empty() {
            result.push('_');
        }
        result.extend(c.to_uppercase());
    }
    result
}

/// Swift type and zero value for a scalar
pub fn swift_scalar(scalar: ScalarType) -> (&'static str, &'static str) {
    match scalar {
        ScalarType::Double => ("Double", "0"),
        ScalarType::Float => ("Float", "0"),
        ScalarType::Int64 | ScalarType::Sint64 | ScalarType::Sfixed64 => ("Int64", "0"),
        ScalarType::Uint64 | ScalarType::Fixed64 => ("UInt64", "0"),
        ScalarType::Int32 | ScalarType::Sint32 | ScalarType::Sfixed32 => ("Int32", "0"),
        ScalarType::Uint32 | ScalarType::Fixed32 => ("UInt32", "0"),
        ScalarType::Bool => ("Bool", "false"),
        ScalarType::String => ("String", "\"\""),
        ScalarType::Bytes => ("Data", "Data()"),
    }
}

/// Quote `s` as a Swift string literal
pub fn swift_string_literal(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
