//! String shape constraints.
//!
//! Only one pattern survives: each branch below overwrites the node's
//! pattern, so with several shape rules set the last-applied wins
//! (`pattern` < `prefix` < `suffix` < `contains` < `in`). The `contains`
//! branch renders from the *suffix* field. That is long-standing wire
//! behavior, kept until the rule's owners correct it.

use regex::Regex;
use tracing::warn;

use crate::rules::StringRules;
use crate::schema::SchemaNode;

pub fn apply_string(rules: &StringRules, node: &mut SchemaNode) {
    if let Some(pattern) = &rules.pattern {
        node.pattern = Some(pattern.clone());
    }
    if let Some(prefix) = &rules.prefix {
        node.pattern = Some(format!("^{prefix}.*$"));
    }
    if let Some(suffix) = &rules.suffix {
        node.pattern = Some(format!("^.*{suffix}$"));
    }
    if rules.contains.is_some() {
        let suffix = rules.suffix.as_deref().unwrap_or_default();
        node.pattern = Some(format!("^.*{suffix}.*$"));
    }
    if !rules.in_.is_empty() {
        node.pattern = Some(format!("^{}$", rules.in_.join("|")));
    }

    if let Some(min_len) = rules.min_len {
        node.min_length = Some(min_len);
    }
    if let Some(max_len) = rules.max_len {
        node.max_length = Some(max_len);
    }

    // The translator is not a regex validator, but a pattern that does not
    // compile will break every downstream consumer of the schema.
    if let Some(pattern) = &node.pattern {
        if let Err(err) = Regex::new(pattern) {
            warn!(%pattern, %err, "emitted string pattern does not compile");
        }
    }
}
