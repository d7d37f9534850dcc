//! Deterministic protobuf-descriptor → JSON Schema translation.
//!
//! Given a compiled descriptor set, this crate maps message, field and enum
//! declarations (plus the per-field `validate.rules` extension) into JSON
//! Schema documents that carry the same value domains: numeric ranges,
//! string shape, collection cardinality, enumerated value sets, nullability
//! and required-ness.
//!
//! Three passes cooperate over caller-owned schema nodes:
//! - [`resolve`] builds the enum symbol table, once, over the full
//!   declaration set;
//! - [`rewrite`] overwrites nodes for well-known and enum-typed fields;
//! - [`constraint`] decodes validation rules and folds them into each
//!   node's constraint keywords, collapsing nullable unions where a rule
//!   forces a definite type.
//!
//! [`convert`] wraps the passes with the schema skeleton builder and
//! per-message document assembly; [`cli`] is the command-line front end.
pub mod cli;
pub mod constraint;
pub mod convert;
pub mod descriptor;
pub mod error;
pub mod path_de;
pub mod resolve;
pub mod rewrite;
pub mod rules;
pub mod schema;
