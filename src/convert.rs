//! Descriptor-set → JSON Schema conversion.
//!
//! Builds the bare schema skeleton for each message (per-kind baseline
//! nodes, nullable unions when null values are allowed), then runs the
//! per-field passes over it: intrinsic rewrites, constraint extraction,
//! required check. One document per top-level message.
//!
//! Per-field decode failures are logged and leave that field at its
//! baseline shape; a malformed nullable union aborts the run (upstream
//! contract violation).

use indexmap::IndexMap;
use tracing::warn;

use crate::constraint;
use crate::descriptor::{FieldDescriptor, FieldKind, FileDescriptor, MessageDescriptor};
use crate::error::TranslateError;
use crate::resolve::EnumTable;
use crate::rewrite::{self, TIMESTAMP_TYPE_NAME};
use crate::schema::{SchemaNode, TypeTag, SCHEMA_DRAFT};

#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    /// Shape every singular field as a `{null, T}` union so absent data can
    /// be carried explicitly.
    pub allow_null_values: bool,
    /// 64-bit integers render as strings by default (JSON numbers lose
    /// precision past 2^53); this switches them to `integer`.
    pub disallow_big_ints_as_strings: bool,
    /// Emit `additionalProperties: false` on every object schema.
    pub disallow_additional_properties: bool,
}

/// One emitted schema document, named after its message.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    pub name: String,
    pub schema: SchemaNode,
}

impl SchemaDocument {
    pub fn file_name(&self) -> String {
        format!("{}.jsonschema", self.name)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.schema)
    }
}

pub struct Converter<'a> {
    options: ConvertOptions,
    files: &'a [FileDescriptor],
    enums: EnumTable,
    messages: IndexMap<String, &'a MessageDescriptor>,
}

impl<'a> Converter<'a> {
    /// Resolve symbols once, up front. Field processing only reads them.
    pub fn new(files: &'a [FileDescriptor], options: ConvertOptions) -> Self {
        let enums = EnumTable::build(files);
        let mut messages = IndexMap::new();
        for file in files {
            let prefix = format!(".{}", file.package);
            for message in &file.message_type {
                register_messages(&prefix, message, &mut messages);
            }
        }
        Converter { options, files, enums, messages }
    }

    pub fn enums(&self) -> &EnumTable {
        &self.enums
    }

    /// Convert every top-level message of every input file.
    pub fn convert_all(&self) -> Result<Vec<SchemaDocument>, TranslateError> {
        let mut documents = Vec::new();
        for file in self.files {
            for message in &file.message_type {
                documents.push(SchemaDocument {
                    name: message.name.clone(),
                    schema: self.convert_message(message)?,
                });
            }
        }
        Ok(documents)
    }

    /// Convert one message into a standalone schema document.
    pub fn convert_message(
        &self,
        message: &MessageDescriptor,
    ) -> Result<SchemaNode, TranslateError> {
        let mut node = self.message_schema(message)?;
        node.schema = Some(SCHEMA_DRAFT);
        node.title = Some(message.name.clone());
        Ok(node)
    }

    fn message_schema(&self, message: &MessageDescriptor) -> Result<SchemaNode, TranslateError> {
        let mut node = SchemaNode::typed(TypeTag::Object);
        if self.options.disallow_additional_properties {
            node.additional_properties = Some(false);
        }

        for field in &message.field {
            let mut field_node = self.baseline(field)?;

            rewrite::rewrite_intrinsics(field, &mut field_node, &self.enums);

            match constraint::apply_rules(field, &mut field_node) {
                Ok(()) => {}
                Err(err @ TranslateError::ExtensionDecode { .. }) => {
                    // The field keeps its baseline shape; everything else
                    // still translates.
                    warn!(%err, "skipping undecodable validation rules");
                }
                Err(err) => return Err(err),
            }

            if constraint::is_required(field).unwrap_or(false) {
                node.required.push(field.name.clone());
            }

            node.properties.insert(field.name.clone(), field_node);
        }

        Ok(node)
    }

    fn baseline(&self, field: &FieldDescriptor) -> Result<SchemaNode, TranslateError> {
        if field.repeated() {
            let mut node = SchemaNode::typed(TypeTag::Array);
            node.items = Some(Box::new(self.singular_baseline(field)?));
            return Ok(self.maybe_nullable(node));
        }
        let node = self.singular_baseline(field)?;
        // The timestamp rewrite replaces the whole shape; wrapping it first
        // would leave a stale union behind.
        if field.kind == FieldKind::Message && field.type_name() == TIMESTAMP_TYPE_NAME {
            return Ok(node);
        }
        Ok(self.maybe_nullable(node))
    }

    fn singular_baseline(&self, field: &FieldDescriptor) -> Result<SchemaNode, TranslateError> {
        let node = match field.kind {
            FieldKind::Double | FieldKind::Float => SchemaNode::typed(TypeTag::Number),
            FieldKind::Int32
            | FieldKind::Uint32
            | FieldKind::Sint32
            | FieldKind::Fixed32
            | FieldKind::Sfixed32 => SchemaNode::typed(TypeTag::Integer),
            FieldKind::Int64
            | FieldKind::Uint64
            | FieldKind::Sint64
            | FieldKind::Fixed64
            | FieldKind::Sfixed64 => {
                if self.options.disallow_big_ints_as_strings {
                    SchemaNode::typed(TypeTag::Integer)
                } else {
                    SchemaNode::typed(TypeTag::String)
                }
            }
            FieldKind::Bool => SchemaNode::typed(TypeTag::Boolean),
            FieldKind::String | FieldKind::Bytes => SchemaNode::typed(TypeTag::String),
            // The intrinsic rewriter owns enum shapes.
            FieldKind::Enum => SchemaNode::default(),
            FieldKind::Message | FieldKind::Group => {
                if field.type_name() == TIMESTAMP_TYPE_NAME {
                    // Left bare for the intrinsic rewriter.
                    SchemaNode::default()
                } else if let Some(nested) = self.messages.get(field.type_name()) {
                    self.message_schema(nested)?
                } else {
                    warn!(
                        type_name = field.type_name(),
                        field = %field.name,
                        "message type not in descriptor set, emitting a bare object"
                    );
                    SchemaNode::typed(TypeTag::Object)
                }
            }
        };
        Ok(node)
    }

    fn maybe_nullable(&self, node: SchemaNode) -> SchemaNode {
        if self.options.allow_null_values {
            SchemaNode::nullable(node)
        } else {
            node
        }
    }
}

fn register_messages<'a>(
    prefix: &str,
    message: &'a MessageDescriptor,
    out: &mut IndexMap<String, &'a MessageDescriptor>,
) {
    let fqn = format!("{prefix}.{}", message.name);
    for nested in &message.nested_type {
        register_messages(&fqn, nested, out);
    }
    out.insert(fqn, message);
}
