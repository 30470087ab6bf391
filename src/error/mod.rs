//! Error types.
//!
//! [`SchemaError`]/[`SchemaErrors`] describe where a parsed payload departs
//! from the issue grammar; [`ExplainError`] is the per-submission failure
//! reported by the pipeline.

mod explain_error;
mod schema_error;

pub use explain_error::ExplainError;
pub use schema_error::{MismatchCode, SchemaError, SchemaErrors};
