//! Type index over the complete descriptor set.
//!
//! Field and method types may be declared in files that are not generated in this run
//! (imports, well-known types). Naming them in generated code still requires their
//! package, which only the descriptor set knows.

use std::collections::HashMap;

use prost_types::{DescriptorProto, FileDescriptorProto};

use crate::utils::swift_package_prefix;
use crate::{CodegenError, Result};

/// Kind of a named type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Message type
    Message,
    /// Enum type
    Enum,
}

/// Where a named type was declared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    /// Declaring package
    pub package: String,
    /// Name relative to the package (`Outer.Inner`)
    pub relative_name: String,
    /// Message or enum
    pub kind: TypeKind,
}

/// Fully-qualified type name → declaration site
#[derive(Debug, Default)]
pub struct TypeIndex {
    types: HashMap<String, TypeEntry>,
}

impl TypeIndex {
    /// Index every message and enum declared in `files`
    pub fn from_files(files: &[FileDescriptorProto]) -> Self {
        let mut index = Self::default();
        for file in files {
            for message in &file.message_type {
                index.add_message(file, "", message);
            }
            for enumeration in &file.enum_type {
                index.add(file, enumeration.name(), TypeKind::Enum);
            }
        }
        index
    }

    fn add_message(&mut self, file: &FileDescriptorProto, scope: &str, message: &DescriptorProto) {
        let relative = join(scope, message.name());
        self.add(file, &relative, TypeKind::Message);
        for nested in &message.nested_type {
            self.add_message(file, &relative, nested);
        }
        for enumeration in &message.enum_type {
            self.add(file, &join(&relative, enumeration.name()), TypeKind::Enum);
        }
    }

    fn add(&mut self, file: &FileDescriptorProto, relative: &str, kind: TypeKind) {
        let entry = TypeEntry {
            package: file.package().to_string(),
            relative_name: relative.to_string(),
            kind,
        };
        self.types.insert(join(file.package(), relative), entry);
    }

    /// Declaration of `full_name` (with or without a leading dot)
    pub fn get(&self, full_name: &str) -> Option<&TypeEntry> {
        self.types.get(full_name.trim_start_matches('.'))
    }

    /// Number of indexed types
    pub fn len(&self) -> usize { self.types.len() }

    /// Whether nothing is indexed
    pub fn is_empty(&self) -> bool { self.types.is_empty() }

    /// Swift type name for `full_name`.
    ///
    /// The package components are upper-camel-cased and joined with `_`, followed by
    /// the relative name with `.` replaced by `_`:
    /// `stream.video.sfu.signal.SetPublisherRequest` →
    /// `Stream_Video_Sfu_Signal_SetPublisherRequest`.
    pub fn swift_name(&self, full_name: &str, referrer: &str) -> Result<String> {
        let entry = self.get(full_name).ok_or_else(|| CodegenError::UnknownType {
            type_name: full_name.trim_start_matches('.').to_string(),
            referrer: referrer.to_string(),
        })?;
        Ok(format!("{}{}", swift_package_prefix(&entry.package), entry.relative_name.replace('.', "_")))
    }

    /// Like [`TypeIndex::swift_name`], but `full_name` must name a message
    pub fn swift_message_name(&self, full_name: &str, referrer: &str) -> Result<String> {
        let name = self.swift_name(full_name, referrer)?;
        match self.get(full_name).map(|entry| entry.kind) {
            Some(TypeKind::Message) => Ok(name),
            _ => Err(CodegenError::NotAMessage {
                type_name: full_name.trim_start_matches('.').to_string(),
                referrer: referrer.to_string(),
            }),
        }
    }
}

fn join(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}

#[cfg(test)]
mod tests {
    use prost_types::EnumDescriptorProto;

    use super::*;

    fn index() -> TypeIndex {
        let inner = DescriptorProto {
            name: Some("Inner".into()),
            enum_type: vec![EnumDescriptorProto { name: Some("Mode".into()), ..Default::default() }],
            ..Default::default()
        };
        let outer = DescriptorProto {
            name: Some("Outer".into()),
            nested_type: vec![inner],
            ..Default::default()
        };
        let signal = FileDescriptorProto {
            name: Some("video/signal.proto".into()),
            package: Some("stream.video.sfu.signal".into()),
            message_type: vec![
                DescriptorProto { name: Some("SetPublisherRequest".into()), ..Default::default() },
                outer,
            ],
            ..Default::default()
        };
        let root = FileDescriptorProto {
            name: Some("root.proto".into()),
            message_type: vec![DescriptorProto { name: Some("Bare".into()), ..Default::default() }],
            enum_type: vec![EnumDescriptorProto { name: Some("Color".into()), ..Default::default() }],
            ..Default::default()
        };
        TypeIndex::from_files(&[signal, root])
    }

    #[test]
    fn test_from_files() {
        let index = index();
        assert_eq!(index.len(), 6);

        let inner = index.get(".stream.video.sfu.signal.Outer.Inner").expect("Inner indexed");
        assert_eq!(inner.relative_name, "Outer.Inner");
        assert_eq!(inner.kind, TypeKind::Message);

        let mode = index.get("stream.video.sfu.signal.Outer.Inner.Mode").expect("Mode indexed");
        assert_eq!(mode.kind, TypeKind::Enum);
        assert_eq!(index.get("Color").expect("Color indexed").kind, TypeKind::Enum);
    }

    #[test]
    fn test_swift_name() {
        let index = index();
        assert_eq!(
            index.swift_name("stream.video.sfu.signal.SetPublisherRequest", "test").expect("known"),
            "Stream_Video_Sfu_Signal_SetPublisherRequest"
        );
        assert_eq!(
            index.swift_name(".stream.video.sfu.signal.Outer.Inner", "test").expect("known"),
            "Stream_Video_Sfu_Signal_Outer_Inner"
        );
        assert_eq!(index.swift_name("Bare", "test").expect("known"), "Bare");

        match index.swift_name("nope.Missing", "field `x`") {
            Err(CodegenError::UnknownType { type_name, referrer }) => {
                assert_eq!(type_name, "nope.Missing");
                assert_eq!(referrer, "field `x`");
            }
            other => panic!("Expected UnknownType error, got {:?}", other),
        }
    }

    #[test]
    fn test_swift_message_name() {
        let index = index();
        assert_eq!(
            index.swift_message_name(".stream.video.sfu.signal.Outer", "test").expect("message"),
            "Stream_Video_Sfu_Signal_Outer"
        );

        match index.swift_message_name("Color", "method `Svc.Call`") {
            Err(CodegenError::NotAMessage { type_name, referrer }) => {
                assert_eq!(type_name, "Color");
                assert_eq!(referrer, "method `Svc.Call`");
            }
            other => panic!("Expected NotAMessage error, got {:?}", other),
        }
        assert!(matches!(
            index.swift_message_name("nope.Missing", "test"),
            Err(CodegenError::UnknownType { .. })
        ));
    }
}
