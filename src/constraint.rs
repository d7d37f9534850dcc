//! Constraint extraction: fold decoded validation rules into schema nodes.
//!
//! Dispatch is keyed by the decoded rule kind, gated on the field actually
//! being of that kind: a rule of the wrong kind for its field is a no-op,
//! as is a rule kind this translator does not map. Numeric and string rules
//! imply a definite, non-null type, so both collapse a pending nullable
//! union; repeated rules do not.
pub mod num;
pub mod rep;
pub mod str;

use tracing::debug;

use crate::descriptor::{FieldDescriptor, FieldKind};
use crate::error::TranslateError;
use crate::rules::{find_rules, FieldRules};
use crate::schema::SchemaNode;

/// Apply the field's validation rules, if any, onto its schema node.
pub fn apply_rules(field: &FieldDescriptor, node: &mut SchemaNode) -> Result<(), TranslateError> {
    let Some(rules) = find_rules(field)? else {
        return Ok(());
    };

    match rules {
        FieldRules::Float(r) if field.kind == FieldKind::Float => {
            num::apply_float(&r, node);
            node.collapse_one_of()?;
        }
        FieldRules::Double(r) if field.kind == FieldKind::Double => {
            num::apply_double(&r, node);
            node.collapse_one_of()?;
        }
        FieldRules::Int32(r) if field.kind == FieldKind::Int32 => {
            num::apply_int32(&r, node);
            node.collapse_one_of()?;
        }
        FieldRules::Int64(r) if field.kind == FieldKind::Int64 => {
            num::apply_int64(&r, node);
            node.collapse_one_of()?;
        }
        FieldRules::String(r) if field.kind == FieldKind::String => {
            str::apply_string(&r, node);
            node.collapse_one_of()?;
        }
        FieldRules::Repeated(r) if field.repeated() => {
            rep::apply_repeated(&r, node);
        }
        // `any`/`message` rules only matter to the required check; a rule
        // kind that does not match its field constrains nothing.
        other => {
            debug!(field = %field.name, rule = ?other, "rule does not apply to this field");
        }
    }

    Ok(())
}

/// Whether the field must be listed in the enclosing object's `required`
/// set. The flag travels on the `any`- and `message`-kind rule variants.
/// The caller owns the required list; this only answers yes/no.
pub fn is_required(field: &FieldDescriptor) -> Result<bool, TranslateError> {
    Ok(match find_rules(field)? {
        Some(FieldRules::Any(r)) => r.required.unwrap_or(false),
        Some(FieldRules::Message(r)) => r.required.unwrap_or(false),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TypeTag;
    use serde_json::json;

    #[test]
    fn absent_rules_leave_the_node_unmodified() {
        let field = FieldDescriptor::scalar("name", FieldKind::String);
        let mut node = SchemaNode::nullable(SchemaNode::typed(TypeTag::String));
        let before = node.clone();
        apply_rules(&field, &mut node).unwrap();
        assert_eq!(node, before);
    }

    #[test]
    fn wrong_kind_rules_are_a_noop() {
        let field = FieldDescriptor::scalar("age", FieldKind::Int32)
            .with_rules(json!({ "string": { "min_len": 3 } }));
        let mut node = SchemaNode::typed(TypeTag::Integer);
        let before = node.clone();
        apply_rules(&field, &mut node).unwrap();
        assert_eq!(node, before);
    }

    #[test]
    fn numeric_rules_collapse_a_nullable_union() {
        let field = FieldDescriptor::scalar("age", FieldKind::Int32)
            .with_rules(json!({ "int32": { "gte": 0, "lte": 100 } }));
        let mut node = SchemaNode::nullable(SchemaNode::typed(TypeTag::Integer));
        apply_rules(&field, &mut node).unwrap();
        assert_eq!(node.ty, Some(TypeTag::Integer));
        assert!(node.one_of.is_empty());
        assert_eq!(node.minimum, Some(0));
        assert!(node.exclusive_minimum);
        assert_eq!(node.maximum, Some(100));
        assert!(node.exclusive_maximum);
    }

    #[test]
    fn string_rules_collapse_a_nullable_string_union() {
        let field = FieldDescriptor::scalar("id", FieldKind::String)
            .with_rules(json!({ "string": { "min_len": 1 } }));
        let mut node = SchemaNode::nullable(SchemaNode::typed(TypeTag::String));
        apply_rules(&field, &mut node).unwrap();
        assert_eq!(node.ty, Some(TypeTag::String));
        assert!(node.one_of.is_empty());
        assert_eq!(node.min_length, Some(1));
    }

    #[test]
    fn repeated_rules_do_not_collapse_unions() {
        let field = FieldDescriptor::scalar("tags", FieldKind::String)
            .repeated_of()
            .with_rules(json!({ "repeated": { "min_items": 1 } }));
        let mut node = SchemaNode::nullable(SchemaNode::typed(TypeTag::Array));
        apply_rules(&field, &mut node).unwrap();
        assert_eq!(node.one_of.len(), 2, "repeated rules leave unions alone");
        assert_eq!(node.min_items, Some(1));
    }

    #[test]
    fn malformed_union_surfaces_as_a_hard_failure() {
        let field = FieldDescriptor::scalar("age", FieldKind::Int32)
            .with_rules(json!({ "int32": { "gt": 1 } }));
        let mut node = SchemaNode {
            one_of: vec![SchemaNode::typed(TypeTag::Null), SchemaNode::typed(TypeTag::Null)],
            ..SchemaNode::default()
        };
        assert!(matches!(
            apply_rules(&field, &mut node),
            Err(TranslateError::UnionConsistency)
        ));
    }

    #[test]
    fn required_flag_reads_from_any_and_message_rules() {
        let any = FieldDescriptor::message("body", ".acme.Body")
            .with_rules(json!({ "any": { "required": true } }));
        assert!(is_required(&any).unwrap());

        let message = FieldDescriptor::message("body", ".acme.Body")
            .with_rules(json!({ "message": { "required": true } }));
        assert!(is_required(&message).unwrap());

        let explicit_false = FieldDescriptor::message("body", ".acme.Body")
            .with_rules(json!({ "message": { "required": false } }));
        assert!(!is_required(&explicit_false).unwrap());

        let unrelated = FieldDescriptor::scalar("age", FieldKind::Int32)
            .with_rules(json!({ "int32": { "gt": 1 } }));
        assert!(!is_required(&unrelated).unwrap());

        let none = FieldDescriptor::scalar("age", FieldKind::Int32);
        assert!(!is_required(&none).unwrap());
    }
}
