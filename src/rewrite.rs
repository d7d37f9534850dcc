//! Intrinsic type rewrites: well-known message types and enum references.
//!
//! Runs before constraint extraction. Rewrites overwrite whatever the
//! skeleton put on the node: a timestamp field ends up `string` + pattern
//! no matter what shape it arrived in.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::descriptor::{FieldDescriptor, FieldKind};
use crate::resolve::EnumTable;
use crate::schema::{SchemaNode, TypeTag};

/// Well-known timestamp message type.
pub const TIMESTAMP_TYPE_NAME: &str = ".google.protobuf.Timestamp";

/// Millisecond-precision UTC timestamps with a literal `Z` suffix. This is
/// a fixed shape, not a full RFC 3339 validator: no timezone offsets, and
/// the digit classes over-accept (e.g. month 29). Known limitation.
pub const TIMESTAMP_PATTERN: &str =
    r"^[0-9]{4}-[0-2][0-9]-[0-3][0-9]T[0-2][0-9]:[0-6][0-9]:[0-6][0-9].[0-9]{3}Z$";

pub static TIMESTAMP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(TIMESTAMP_PATTERN).expect("fixed timestamp pattern compiles"));

/// Rewrite a node whose field is the timestamp well-known type.
pub fn rewrite_timestamp(field: &FieldDescriptor, node: &mut SchemaNode) {
    if field.kind == FieldKind::Message && field.type_name() == TIMESTAMP_TYPE_NAME {
        node.ty = Some(TypeTag::String);
        node.pattern = Some(TIMESTAMP_PATTERN.to_string());
    }
}

/// Rewrite an enum-typed field to a string restricted to the declared value
/// names, clearing any nullable union.
///
/// A lookup miss (resolver ran over an incomplete declaration set) is
/// logged and skipped; every other field still translates.
pub fn rewrite_enum(field: &FieldDescriptor, node: &mut SchemaNode, enums: &EnumTable) {
    if field.kind != FieldKind::Enum {
        return;
    }
    let Some(enum_) = enums.lookup(field.type_name()) else {
        warn!(type_name = field.type_name(), "failed to find enum type");
        return;
    };

    node.ty = Some(TypeTag::String);
    node.enum_ = enum_.value_names().map(str::to_string).collect();
    node.one_of = Vec::new();
}

/// Both intrinsic rewrites, in order. Fields of any other kind pass through
/// untouched.
pub fn rewrite_intrinsics(field: &FieldDescriptor, node: &mut SchemaNode, enums: &EnumTable) {
    rewrite_timestamp(field, node);
    rewrite_enum(field, node, enums);
}
