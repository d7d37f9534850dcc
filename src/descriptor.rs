//! Source-side declarations: the subset of a compiled descriptor set this
//! translator reads, deserialized from protoc's JSON rendering.
//!
//! These are read-only inputs. The translator never mutates a descriptor;
//! it only walks them and writes into caller-owned [`SchemaNode`]s.
//!
//! [`SchemaNode`]: crate::schema::SchemaNode

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Extension identifier under which per-field validation rules are attached.
pub const RULES_EXTENSION: &str = "validate.rules";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileDescriptorSet {
    #[serde(default)]
    pub file: Vec<FileDescriptor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileDescriptor {
    pub name: Option<String>,
    #[serde(default)]
    pub package: String,
    #[serde(default, rename = "messageType")]
    pub message_type: Vec<MessageDescriptor>,
    #[serde(default, rename = "enumType")]
    pub enum_type: Vec<EnumDescriptor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageDescriptor {
    pub name: String,
    #[serde(default)]
    pub field: Vec<FieldDescriptor>,
    #[serde(default, rename = "nestedType")]
    pub nested_type: Vec<MessageDescriptor>,
    #[serde(default, rename = "enumType")]
    pub enum_type: Vec<EnumDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Fully-qualified `.package.Type` reference; only set for message and
    /// enum kinds.
    #[serde(default, rename = "typeName")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub label: FieldLabel,
    #[serde(default)]
    pub options: Option<FieldOptions>,
}

impl FieldDescriptor {
    pub fn repeated(&self) -> bool {
        self.label == FieldLabel::Repeated
    }

    pub fn type_name(&self) -> &str {
        self.type_name.as_deref().unwrap_or_default()
    }

    /// Raw extension payload attached under `validate.rules`, if any.
    pub fn rules_payload(&self) -> Option<&Value> {
        self.options.as_ref()?.extensions.get(RULES_EXTENSION)
    }
}

/// Field options carry extension payloads keyed by extension identifier.
/// Payloads stay opaque JSON until the rule decode step runs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldOptions {
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "TYPE_DOUBLE")]
    Double,
    #[serde(rename = "TYPE_FLOAT")]
    Float,
    #[serde(rename = "TYPE_INT64")]
    Int64,
    #[serde(rename = "TYPE_UINT64")]
    Uint64,
    #[serde(rename = "TYPE_INT32")]
    Int32,
    #[serde(rename = "TYPE_FIXED64")]
    Fixed64,
    #[serde(rename = "TYPE_FIXED32")]
    Fixed32,
    #[serde(rename = "TYPE_BOOL")]
    Bool,
    #[serde(rename = "TYPE_STRING")]
    String,
    #[serde(rename = "TYPE_GROUP")]
    Group,
    #[serde(rename = "TYPE_MESSAGE")]
    Message,
    #[serde(rename = "TYPE_BYTES")]
    Bytes,
    #[serde(rename = "TYPE_UINT32")]
    Uint32,
    #[serde(rename = "TYPE_ENUM")]
    Enum,
    #[serde(rename = "TYPE_SFIXED32")]
    Sfixed32,
    #[serde(rename = "TYPE_SFIXED64")]
    Sfixed64,
    #[serde(rename = "TYPE_SINT32")]
    Sint32,
    #[serde(rename = "TYPE_SINT64")]
    Sint64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum FieldLabel {
    #[default]
    #[serde(rename = "LABEL_OPTIONAL")]
    Optional,
    #[serde(rename = "LABEL_REQUIRED")]
    Required,
    #[serde(rename = "LABEL_REPEATED")]
    Repeated,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnumDescriptor {
    pub name: String,
    #[serde(default)]
    pub value: Vec<EnumValueDescriptor>,
}

impl EnumDescriptor {
    /// Declared value names, declaration order preserved.
    pub fn value_names(&self) -> impl Iterator<Item = &str> {
        self.value.iter().map(|v| v.name.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnumValueDescriptor {
    pub name: String,
    #[serde(default)]
    pub number: i32,
}

// ————————————————————————————————————————————————————————————————————————————
// FIXTURE BUILDERS
// ————————————————————————————————————————————————————————————————————————————

// Hand-assembling descriptors comes up in every test and in the end-to-end
// harness, so the builders live here rather than behind cfg(test).

impl FieldDescriptor {
    pub fn scalar(name: &str, kind: FieldKind) -> Self {
        FieldDescriptor {
            name: name.to_string(),
            kind,
            type_name: None,
            label: FieldLabel::Optional,
            options: None,
        }
    }

    pub fn message(name: &str, type_name: &str) -> Self {
        FieldDescriptor {
            type_name: Some(type_name.to_string()),
            ..Self::scalar(name, FieldKind::Message)
        }
    }

    pub fn enumeration(name: &str, type_name: &str) -> Self {
        FieldDescriptor {
            type_name: Some(type_name.to_string()),
            ..Self::scalar(name, FieldKind::Enum)
        }
    }

    pub fn repeated_of(mut self) -> Self {
        self.label = FieldLabel::Repeated;
        self
    }

    /// Attach a raw `validate.rules` extension payload.
    pub fn with_rules(mut self, payload: Value) -> Self {
        let options = self.options.get_or_insert_with(FieldOptions::default);
        options.extensions.insert(RULES_EXTENSION.to_string(), payload);
        self
    }
}

impl EnumDescriptor {
    pub fn with_values(name: &str, values: &[&str]) -> Self {
        EnumDescriptor {
            name: name.to_string(),
            value: values
                .iter()
                .enumerate()
                .map(|(i, v)| EnumValueDescriptor { name: v.to_string(), number: i as i32 })
                .collect(),
        }
    }
}
