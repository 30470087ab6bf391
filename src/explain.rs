//! The explain pipeline: raw text → JSON → typed issues.
//!
//! Each stage either hands its output to the next or stops with exactly one
//! [`ExplainError`]; there is never a partial issue list.

use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::ExplainError;
use crate::extract::extract_json;
use crate::issue::Issue;
use crate::path::JsonPath;
use crate::schema::{IssueListSchema, SchemaLike};
use crate::validation::ValidationContext;

/// Validates an already-parsed payload against the issue grammar.
///
/// # Errors
///
/// - [`ExplainError::EmptyResult`] if `value` is `null`
/// - [`ExplainError::SchemaMismatch`] listing every mismatch otherwise
pub fn issues_from_value(value: &Value, config: &Config) -> Result<Vec<Issue>, ExplainError> {
    if value.is_null() {
        return Err(ExplainError::EmptyResult);
    }

    let context = ValidationContext::new(config.max_depth);
    match IssueListSchema
        .validate(value, &JsonPath::root(), &context)
        .into_result()
    {
        Ok(issues) => {
            debug!(count = issues.len(), "payload matches issue grammar");
            Ok(issues)
        }
        Err(errors) => {
            debug!(mismatches = errors.len(), "payload rejected");
            Err(errors.into())
        }
    }
}

/// Runs extraction and validation over one submitted text.
///
/// # Example
///
/// ```rust
/// use zodlens::{explain, Config, ExplainError};
///
/// let raw = r#"ZodError: [{"code":"invalid_date","message":"Invalid date","path":["startsAt"]}]"#;
/// let issues = explain(raw, &Config::default()).unwrap();
/// assert_eq!(issues.len(), 1);
///
/// assert_eq!(explain("not json at all", &Config::default()), Err(ExplainError::NoJsonFound));
/// ```
pub fn explain(raw: &str, config: &Config) -> Result<Vec<Issue>, ExplainError> {
    let value = extract_json(raw)?;
    issues_from_value(&value, config)
}
