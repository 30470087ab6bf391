//! Numeric schemas: plain numbers, numeric limits and path segments.

use serde_json::{Number, Value};
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::issue::Bound;
use crate::path::{JsonPath, PathSegment};
use crate::validation::ValidationContext;

use super::traits::SchemaLike;
use super::{preview_value, type_error};

/// A schema accepting any JSON number.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberSchema;

impl NumberSchema {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaLike for NumberSchema {
    type Output = Number;

    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        _context: &ValidationContext,
    ) -> Validation<Number, SchemaErrors> {
        match value {
            Value::Number(n) => Validation::Success(n.clone()),
            other => Validation::Failure(type_error(path, "number", other)),
        }
    }
}

/// A schema for `minimum`, `maximum` and `multipleOf`: a number or a big integer.
///
/// JSON has no big integer type, so big integers are accepted in their string
/// form: optional `-`, digits, optional trailing `n`.
///
/// # Example
///
/// ```rust
/// use zodlens::{Bound, JsonPath, Schema, SchemaLike, ValidationContext};
/// use serde_json::json;
///
/// let ctx = ValidationContext::default();
/// let big = Schema::bound().validate(&json!("9007199254740993n"), &JsonPath::root(), &ctx);
/// assert_eq!(big.into_result().ok(), Some(Bound::BigInt("9007199254740993".to_string())));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundSchema;

impl BoundSchema {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaLike for BoundSchema {
    type Output = Bound;

    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        _context: &ValidationContext,
    ) -> Validation<Bound, SchemaErrors> {
        match value {
            Value::Number(n) => Validation::Success(Bound::Number(n.clone())),
            Value::String(s) => match big_int_digits(s) {
                Some(digits) => Validation::Success(Bound::BigInt(digits.to_string())),
                None => Validation::Failure(SchemaErrors::single(
                    SchemaError::new(path.clone(), "expected number or big integer")
                        .with_expected("number | bigint")
                        .with_got(preview_value(value)),
                )),
            },
            other => Validation::Failure(type_error(path, "number | bigint", other)),
        }
    }
}

/// Strips a trailing `n` and returns the digits if `s` is an integer literal.
fn big_int_digits(s: &str) -> Option<&str> {
    let digits = s.strip_suffix('n').unwrap_or(s);
    let unsigned = digits.strip_prefix('-').unwrap_or(digits);
    if !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}

/// A schema for one element of an issue `path`: a key or an array index.
///
/// Any number is accepted. Numbers that are not array indices (negative or
/// fractional) are kept as keys spelled the way JSON prints them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathSegmentSchema;

impl PathSegmentSchema {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaLike for PathSegmentSchema {
    type Output = PathSegment;

    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        _context: &ValidationContext,
    ) -> Validation<PathSegment, SchemaErrors> {
        match value {
            Value::String(key) => Validation::Success(PathSegment::Field(key.clone())),
            Value::Number(n) => match n.as_u64().and_then(|i| usize::try_from(i).ok()) {
                Some(index) => Validation::Success(PathSegment::Index(index)),
                None => Validation::Success(PathSegment::Field(n.to_string())),
            },
            other => Validation::Failure(type_error(path, "string | number", other)),
        }
    }
}
