//! Issue Schema Validator.
//!
//! This module turns untyped `serde_json::Value`s into the typed issue model.
//! Small leaf schemas (string, number, boolean, enumerations) are composed with
//! [`ArraySchema`], [`ObjectFields`], [`RecordSchema`] and [`AnyOfSchema`] into
//! the recursive grammar in [`IssueListSchema`]. Every schema accumulates all
//! mismatches instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use zodlens::{JsonPath, Schema, SchemaLike, ValidationContext};
//! use serde_json::json;
//!
//! let payload = json!([{
//!     "code": "unrecognized_keys",
//!     "keys": ["colour"],
//!     "message": "Unrecognized key(s) in object: 'colour'",
//!     "path": []
//! }]);
//!
//! let result = Schema::issues().validate(&payload, &JsonPath::root(), &ValidationContext::default());
//! assert!(result.is_success());
//! ```

mod array;
mod combinators;
mod issue;
mod numeric;
mod object;
mod scalar;
mod string;
mod traits;

use serde_json::Value;

use crate::error::{MismatchCode, SchemaError, SchemaErrors};
use crate::issue::Vocabulary;
use crate::path::JsonPath;

pub use array::ArraySchema;
pub use combinators::{AnyOfSchema, MapExt, Mapped};
pub use issue::{IssueGroupSchema, IssueListSchema, IssueSchema};
pub use numeric::{BoundSchema, NumberSchema, PathSegmentSchema};
pub use object::{ObjectFields, RecordSchema};
pub use scalar::{BooleanSchema, PrimitiveSchema};
pub use string::{EnumSchema, StringSchema};
pub use traits::{FnSchema, SchemaLike};

/// Entry point for creating schemas.
pub struct Schema;

impl Schema {
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    pub fn boolean() -> BooleanSchema {
        BooleanSchema::new()
    }

    /// A number or big-integer limit.
    pub fn bound() -> BoundSchema {
        BoundSchema::new()
    }

    /// One of the wire names of `T`.
    pub fn enumeration<T: Vocabulary>() -> EnumSchema<T> {
        EnumSchema::new()
    }

    pub fn array<S: SchemaLike>(item_schema: S) -> ArraySchema<S> {
        ArraySchema::new(item_schema)
    }

    /// The top-level issue payload grammar.
    pub fn issues() -> IssueListSchema {
        IssueListSchema
    }
}

/// Returns the JSON type name for a value.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Short JSON rendering of an offending value for error reports.
pub(crate) fn preview_value(value: &Value) -> String {
    const LIMIT: usize = 60;
    let text = value.to_string();
    if text.chars().count() <= LIMIT {
        text
    } else {
        let clipped: String = text.chars().take(LIMIT).collect();
        format!("{}…", clipped)
    }
}

pub(crate) fn type_error(path: &JsonPath, expected: &str, value: &Value) -> SchemaErrors {
    SchemaErrors::single(
        SchemaError::new(path.clone(), format!("expected {}", expected))
            .with_code(MismatchCode::InvalidType)
            .with_expected(expected)
            .with_got(value_type_name(value)),
    )
}
