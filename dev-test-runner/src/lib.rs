//! Shared fixtures for the end-to-end tests: a realistic order-tracking
//! descriptor set exercising every translation path (timestamps, enums,
//! nested messages, repeated fields, numeric/string rules, required
//! flags).

use proto_jsonschema::descriptor::{
    EnumDescriptor, FieldDescriptor, FieldKind, FileDescriptor, MessageDescriptor,
};
use proto_jsonschema::rewrite::TIMESTAMP_TYPE_NAME;
use serde_json::json;

/// The `otd.events` package: an `ExampleEvent` wrapping an `UpdateBody`
/// with address, coordinates and stop sub-messages.
pub fn otd_descriptor_set() -> Vec<FileDescriptor> {
    let address = MessageDescriptor {
        name: "Address".to_string(),
        field: vec![
            FieldDescriptor::scalar("country", FieldKind::String)
                .with_rules(json!({ "string": { "min_len": 3, "max_len": 3 } })),
            FieldDescriptor::scalar("postcode", FieldKind::String),
            FieldDescriptor::scalar("town", FieldKind::String),
            FieldDescriptor::scalar("streets", FieldKind::String)
                .repeated_of()
                .with_rules(json!({ "repeated": { "min_items": 1, "unique": true } })),
        ],
        ..MessageDescriptor::default()
    };

    let coordinates = MessageDescriptor {
        name: "Coordinates".to_string(),
        field: vec![
            FieldDescriptor::scalar("longitude", FieldKind::Double)
                .with_rules(json!({ "double": { "gte": -180.0, "lte": 180.0 } })),
            FieldDescriptor::scalar("latitude", FieldKind::Double)
                .with_rules(json!({ "double": { "gte": -90.0, "lte": 90.0 } })),
        ],
        ..MessageDescriptor::default()
    };

    let stop = MessageDescriptor {
        name: "Stop".to_string(),
        field: vec![
            FieldDescriptor::scalar("stop_id", FieldKind::String)
                .with_rules(json!({ "string": { "prefix": "stop" } })),
            FieldDescriptor::message("coordinates", ".otd.events.Coordinates"),
        ],
        ..MessageDescriptor::default()
    };

    let update_body = MessageDescriptor {
        name: "UpdateBody".to_string(),
        field: vec![
            FieldDescriptor::scalar("customer_id", FieldKind::String)
                .with_rules(json!({ "string": { "min_len": 1 } })),
            FieldDescriptor::scalar("age", FieldKind::Int32)
                .with_rules(json!({ "int32": { "gte": 0, "lte": 150 } })),
            FieldDescriptor::scalar("account_id", FieldKind::String)
                .with_rules(json!({ "string": { "prefix": "otd_" } })),
            FieldDescriptor::scalar("sub_account_id", FieldKind::String)
                .with_rules(json!({ "string": { "suffix": "_otd" } })),
            FieldDescriptor::scalar("income", FieldKind::Int64),
            FieldDescriptor::enumeration("category", ".otd.events.Category"),
            FieldDescriptor::message("address", ".otd.events.Address"),
            FieldDescriptor::message("stops", ".otd.events.Stop").repeated_of(),
        ],
        ..MessageDescriptor::default()
    };

    let example_event = MessageDescriptor {
        name: "ExampleEvent".to_string(),
        field: vec![
            FieldDescriptor::message("updated_at", TIMESTAMP_TYPE_NAME),
            FieldDescriptor::message("update_body", ".otd.events.UpdateBody")
                .with_rules(json!({ "message": { "required": true } })),
        ],
        ..MessageDescriptor::default()
    };

    vec![FileDescriptor {
        name: Some("otd_example.proto".to_string()),
        package: "otd.events".to_string(),
        message_type: vec![example_event, update_body, address, coordinates, stop],
        enum_type: vec![EnumDescriptor::with_values(
            "Category",
            &["UNKNOWN", "HARDWARE", "SOFTWARE"],
        )],
    }]
}
