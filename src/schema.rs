//! Target-side schema nodes.
//!
//! One mutable struct covers every JSON Schema keyword this translator
//! writes. Unset keywords serialize to nothing, so a bare node renders as
//! `{}`. The caller owns the node tree; the translation passes receive
//! `&mut SchemaNode` and write in place.
//!
//! Note on drafts: the exclusive bound flags are booleans, which is
//! draft-04 vocabulary (later drafts redefine `exclusiveMinimum` /
//! `exclusiveMaximum` as numbers). Emitted documents pin `$schema`
//! accordingly.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::TranslateError;

/// Draft whose vocabulary the emitted documents use.
pub const SCHEMA_DRAFT: &str = "http://json-schema.org/draft-04/schema#";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaNode {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeTag>,

    // Numeric bounds. Integer-valued on purpose: fractional source bounds
    // are widened to the enclosing integer before they land here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(rename = "exclusiveMinimum", skip_serializing_if = "is_false")]
    pub exclusive_minimum: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    #[serde(rename = "exclusiveMaximum", skip_serializing_if = "is_false")]
    pub exclusive_maximum: bool,

    // String shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    // Collection cardinality. `unique_items` is an Option so an explicit
    // `false` from the rules survives to output.
    #[serde(rename = "minItems", skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(rename = "maxItems", skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(rename = "uniqueItems", skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,

    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_: Vec<String>,

    // Skeleton keywords.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(rename = "additionalProperties", skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,

    #[serde(rename = "oneOf", skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<SchemaNode>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl SchemaNode {
    pub fn typed(ty: TypeTag) -> Self {
        SchemaNode { ty: Some(ty), ..SchemaNode::default() }
    }

    /// Shape a node as the two-alternative nullable union: `{null, T}`.
    pub fn nullable(inner: SchemaNode) -> Self {
        SchemaNode {
            one_of: vec![SchemaNode::typed(TypeTag::Null), inner],
            ..SchemaNode::default()
        }
    }

    pub fn is_null_type(&self) -> bool {
        self.ty == Some(TypeTag::Null)
    }

    /// Collapse a two-alternative nullable union down to the non-null
    /// alternative's type and discard the union list.
    ///
    /// Anything other than exactly two alternatives is a no-op. A
    /// two-alternative union where every alternative is typed `null` is an
    /// upstream contract violation and surfaces as
    /// [`TranslateError::UnionConsistency`].
    pub fn collapse_one_of(&mut self) -> Result<(), TranslateError> {
        if self.one_of.len() != 2 {
            return Ok(());
        }
        for alt in &self.one_of {
            if !alt.is_null_type() {
                // The alternative may itself be untyped; the union is still
                // resolved in its favor.
                self.ty = alt.ty;
                self.one_of = Vec::new();
                return Ok(());
            }
        }
        Err(TranslateError::UnionConsistency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_node_serializes_empty() {
        let node = SchemaNode::default();
        assert_eq!(serde_json::to_value(&node).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn nullable_union_shape() {
        let node = SchemaNode::nullable(SchemaNode::typed(TypeTag::String));
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            serde_json::json!({ "oneOf": [{ "type": "null" }, { "type": "string" }] })
        );
    }

    #[test]
    fn collapse_picks_the_non_null_alternative() {
        let mut node = SchemaNode::nullable(SchemaNode::typed(TypeTag::Integer));
        node.collapse_one_of().unwrap();
        assert_eq!(node.ty, Some(TypeTag::Integer));
        assert!(node.one_of.is_empty());
    }

    #[test]
    fn collapse_is_a_noop_without_a_two_armed_union() {
        let mut node = SchemaNode::typed(TypeTag::String);
        node.collapse_one_of().unwrap();
        assert_eq!(node.ty, Some(TypeTag::String));

        let mut three = SchemaNode {
            one_of: vec![
                SchemaNode::typed(TypeTag::Null),
                SchemaNode::typed(TypeTag::String),
                SchemaNode::typed(TypeTag::Integer),
            ],
            ..SchemaNode::default()
        };
        three.collapse_one_of().unwrap();
        assert_eq!(three.one_of.len(), 3);
    }

    #[test]
    fn collapse_rejects_a_union_of_nulls() {
        let mut node = SchemaNode {
            one_of: vec![SchemaNode::typed(TypeTag::Null), SchemaNode::typed(TypeTag::Null)],
            ..SchemaNode::default()
        };
        assert!(matches!(
            node.collapse_one_of(),
            Err(crate::error::TranslateError::UnionConsistency)
        ));
    }

    #[test]
    fn explicit_false_unique_items_survives_serialization() {
        let node = SchemaNode { unique_items: Some(false), ..SchemaNode::default() };
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            serde_json::json!({ "uniqueItems": false })
        );
    }

    #[test]
    fn exclusive_flags_are_omitted_when_cleared() {
        let node = SchemaNode {
            ty: Some(TypeTag::Integer),
            minimum: Some(3),
            ..SchemaNode::default()
        };
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            serde_json::json!({ "type": "integer", "minimum": 3 })
        );
    }
}
