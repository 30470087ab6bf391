//! Array schema validation.
//!
//! This module provides [`ArraySchema`], which validates every item against an
//! item schema and keeps the typed outputs in order.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;
use crate::validation::ValidationContext;

use super::traits::SchemaLike;
use super::type_error;

/// A schema for arrays whose items all follow one item schema.
///
/// Item errors are accumulated across the whole array; each is located at the
/// item's index.
///
/// # Example
///
/// ```rust
/// use zodlens::{JsonPath, Schema, SchemaLike, ValidationContext};
/// use serde_json::json;
///
/// let schema = Schema::array(Schema::string());
/// let ctx = ValidationContext::default();
///
/// let result = schema.validate(&json!(["name", "email"]), &JsonPath::root(), &ctx);
/// assert_eq!(result.into_result().ok(), Some(vec!["name".to_string(), "email".to_string()]));
///
/// let result = schema.validate(&json!(["name", 7, false]), &JsonPath::root(), &ctx);
/// assert_eq!(result.into_result().map_err(|e| e.len()), Err(2));
/// ```
pub struct ArraySchema<S> {
    item_schema: S,
}

impl<S: SchemaLike> ArraySchema<S> {
    /// Creates a new array schema with the given item schema.
    pub fn new(item_schema: S) -> Self {
        Self { item_schema }
    }
}

impl<S: SchemaLike> SchemaLike for ArraySchema<S> {
    type Output = Vec<S::Output>;

    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        context: &ValidationContext,
    ) -> Validation<Vec<S::Output>, SchemaErrors> {
        let Some(items) = value.as_array() else {
            return Validation::Failure(type_error(path, "array", value));
        };

        let mut errors: Vec<SchemaError> = Vec::new();
        let mut validated = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let item_path = path.push_index(index);
            match self.item_schema.validate(item, &item_path, context) {
                Validation::Success(v) => validated.push(v),
                Validation::Failure(e) => errors.extend(e),
            }
        }

        match SchemaErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(validated),
        }
    }
}
