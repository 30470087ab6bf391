//! Failures of the explain pipeline.

use crate::error::SchemaErrors;

/// Why one submitted text could not be turned into an issue tree.
///
/// Every variant is recoverable: it replaces the rendered output of that one
/// submission and never affects the others.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExplainError {
    /// The input contains no `[` at all.
    #[error("no JSON array found")]
    NoJsonFound,

    /// The text from the first `[` onward is not valid JSON.
    #[error("JSON parse failed: {0}")]
    JsonSyntax(String),

    /// The JSON parsed but does not follow the issue grammar.
    #[error("schema validation failed: {0}")]
    SchemaMismatch(SchemaErrors),

    /// Validation produced no issue list at all (a `null` payload), as
    /// opposed to an empty one.
    #[error("no issues parsed from input")]
    EmptyResult,
}

impl From<SchemaErrors> for ExplainError {
    fn from(errors: SchemaErrors) -> Self {
        ExplainError::SchemaMismatch(errors)
    }
}

impl From<serde_json::Error> for ExplainError {
    fn from(error: serde_json::Error) -> Self {
        ExplainError::JsonSyntax(error.to_string())
    }
}
