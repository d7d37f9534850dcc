//! Decoding of the per-field validation-rule extension.
//!
//! The extension arrives as an opaque JSON payload under the
//! `validate.rules` key of a field's options. The payload is an object
//! keyed by the rule kind (`float`, `int32`, `string`, `repeated`, ...);
//! [`find_rules`] turns it into the sealed [`FieldRules`] union. Rule kinds
//! outside that union decode to nothing: they are someone else's concern,
//! not an error.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::descriptor::FieldDescriptor;
use crate::error::TranslateError;
use crate::path_de;

/// One decoded validation rule, tagged by the scalar kind it constrains.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRules {
    Float(FloatRules),
    Double(DoubleRules),
    Int32(Int32Rules),
    Int64(Int64Rules),
    String(StringRules),
    Repeated(RepeatedRules),
    Any(AnyRules),
    Message(MessageRules),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FloatRules {
    pub gt: Option<f32>,
    pub gte: Option<f32>,
    pub lt: Option<f32>,
    pub lte: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DoubleRules {
    pub gt: Option<f64>,
    pub gte: Option<f64>,
    pub lt: Option<f64>,
    pub lte: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Int32Rules {
    pub gt: Option<i32>,
    pub gte: Option<i32>,
    pub lt: Option<i32>,
    pub lte: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Int64Rules {
    pub gt: Option<i64>,
    pub gte: Option<i64>,
    pub lt: Option<i64>,
    pub lte: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StringRules {
    pub pattern: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub contains: Option<String>,
    #[serde(rename = "in", default)]
    pub in_: Vec<String>,
    pub min_len: Option<u64>,
    pub max_len: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RepeatedRules {
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnyRules {
    pub required: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MessageRules {
    pub required: Option<bool>,
    pub skip: Option<bool>,
}

/// Locate and decode the validation-rule extension on a field.
///
/// Absence of the extension is not an error. A payload whose rule kinds are
/// all outside the sealed set decodes to `None`. A payload that names a
/// known kind but fails to decode into its structure is an
/// [`TranslateError::ExtensionDecode`].
pub fn find_rules(field: &FieldDescriptor) -> Result<Option<FieldRules>, TranslateError> {
    let Some(payload) = field.rules_payload() else {
        return Ok(None);
    };
    decode(&field.name, payload)
}

fn decode(field_name: &str, payload: &Value) -> Result<Option<FieldRules>, TranslateError> {
    let Some(entries) = payload.as_object() else {
        return Err(TranslateError::ExtensionDecode {
            field: field_name.to_string(),
            reason: format!("rule payload must be an object, got {payload}"),
        });
    };

    for (kind, body) in entries {
        let decoded = match kind.as_str() {
            "float" => decode_kind(field_name, body).map(FieldRules::Float)?,
            "double" => decode_kind(field_name, body).map(FieldRules::Double)?,
            "int32" => decode_kind(field_name, body).map(FieldRules::Int32)?,
            "int64" => decode_kind(field_name, body).map(FieldRules::Int64)?,
            "string" => decode_kind(field_name, body).map(FieldRules::String)?,
            "repeated" => decode_kind(field_name, body).map(FieldRules::Repeated)?,
            "any" => decode_kind(field_name, body).map(FieldRules::Any)?,
            "message" => decode_kind(field_name, body).map(FieldRules::Message)?,
            other => {
                debug!(field = field_name, kind = other, "ignoring unhandled rule kind");
                continue;
            }
        };
        return Ok(Some(decoded));
    }

    Ok(None)
}

fn decode_kind<T: serde::de::DeserializeOwned>(
    field_name: &str,
    body: &Value,
) -> Result<T, TranslateError> {
    path_de::from_value_with_path(body).map_err(|reason| TranslateError::ExtensionDecode {
        field: field_name.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldDescriptor, FieldKind};
    use serde_json::json;

    #[test]
    fn absent_extension_decodes_to_none() {
        let field = FieldDescriptor::scalar("age", FieldKind::Int32);
        assert_eq!(find_rules(&field).unwrap(), None);
    }

    #[test]
    fn numeric_rule_decodes_by_kind() {
        let field = FieldDescriptor::scalar("score", FieldKind::Float)
            .with_rules(json!({ "float": { "gt": 59.4, "lte": 100.0 } }));
        let rules = find_rules(&field).unwrap().unwrap();
        let FieldRules::Float(float) = rules else {
            panic!("expected a float rule, got {rules:?}");
        };
        assert_eq!(float.gt, Some(59.4));
        assert_eq!(float.lte, Some(100.0));
        assert_eq!(float.gte, None);
    }

    #[test]
    fn string_rule_keeps_the_in_list_order() {
        let field = FieldDescriptor::scalar("env", FieldKind::String)
            .with_rules(json!({ "string": { "in": ["dev", "staging", "prod"] } }));
        let Some(FieldRules::String(rules)) = find_rules(&field).unwrap() else {
            panic!("expected string rules");
        };
        assert_eq!(rules.in_, ["dev", "staging", "prod"]);
    }

    #[test]
    fn unhandled_rule_kinds_decode_to_none() {
        let field = FieldDescriptor::scalar("count", FieldKind::Uint32)
            .with_rules(json!({ "uint32": { "gte": 1 } }));
        assert_eq!(find_rules(&field).unwrap(), None);
    }

    #[test]
    fn extra_fields_inside_a_known_kind_are_ignored() {
        // PGV carries more per-kind constraints than this translator maps;
        // they must not break decoding.
        let field = FieldDescriptor::scalar("name", FieldKind::String)
            .with_rules(json!({ "string": { "prefix": "acme_", "const": "x" } }));
        let Some(FieldRules::String(rules)) = find_rules(&field).unwrap() else {
            panic!("expected string rules");
        };
        assert_eq!(rules.prefix.as_deref(), Some("acme_"));
    }

    #[test]
    fn malformed_payload_is_a_decode_failure() {
        let field = FieldDescriptor::scalar("age", FieldKind::Int32)
            .with_rules(json!({ "int32": { "gte": "not a number" } }));
        let err = find_rules(&field).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("age"), "error should name the field: {msg}");
        assert!(msg.contains("gte"), "error should name the JSON path: {msg}");
    }

    #[test]
    fn non_object_payload_is_a_decode_failure() {
        let field = FieldDescriptor::scalar("age", FieldKind::Int32).with_rules(json!(17));
        assert!(find_rules(&field).is_err());
    }
}
