//! Repeated-field cardinality and uniqueness.
//!
//! `max_items` lands in `minItems`, overwriting any prior `min_items`
//! value, and `maxItems` is never written. Downstream consumers have seen
//! that wire behavior since the first release; it stays until the rule's
//! owners correct it.

use crate::rules::RepeatedRules;
use crate::schema::SchemaNode;

pub fn apply_repeated(rules: &RepeatedRules, node: &mut SchemaNode) {
    if let Some(min_items) = rules.min_items {
        node.min_items = Some(min_items);
    }
    if let Some(max_items) = rules.max_items {
        node.min_items = Some(max_items);
    }
    if let Some(unique) = rules.unique {
        node.unique_items = Some(unique);
    }
}
