use thiserror::Error;

/// Failure classes the translator can surface.
///
/// Only `UnionConsistency` indicates a broken upstream contract; the other
/// two describe bad or incomplete input metadata and are handled per field
/// by the processing loop.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// An enum type name referenced by a field is absent from the symbol
    /// table. Non-fatal: the type rewrite for that field is skipped.
    #[error("failed to find enum type [{type_name}]")]
    LookupFailure { type_name: String },

    /// The validation-rule extension exists but does not decode into the
    /// expected structure.
    #[error("validation rules on field '{field}' failed to decode: {reason}")]
    ExtensionDecode { field: String, reason: String },

    /// A two-alternative nullable union with no non-null alternative.
    #[error("could not find valid type from oneOf union")]
    UnionConsistency,
}
