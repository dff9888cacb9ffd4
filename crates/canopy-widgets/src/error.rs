//! Error types for canopy-widgets.

use thiserror::Error;

pub use crate::date_codec::DateParseError;

/// Errors raised while loading a widget definition document.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The JSON document did not match the definition schema.
    #[error("JSON definition error: {0}")]
    Json(#[from] serde_json::Error),

    /// The YAML document did not match the definition schema.
    #[error("YAML definition error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The definition has no id to key its value by.
    #[error("widget definition has an empty id")]
    MissingId,

    /// More default values than a single date or a range can hold.
    #[error("widget {id} has {count} default values (at most 2 allowed)")]
    TooManyDefaults {
        /// Widget id
        id: String,
        /// Number of defaults found
        count: usize,
    },
}
