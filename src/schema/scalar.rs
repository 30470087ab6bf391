//! Boolean and primitive-scalar schemas.

use serde_json::Value;
use stillwater::Validation;

use crate::error::SchemaErrors;
use crate::issue::Primitive;
use crate::path::JsonPath;
use crate::validation::ValidationContext;

use super::traits::SchemaLike;
use super::type_error;

/// A schema accepting `true` or `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanSchema;

impl BooleanSchema {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaLike for BooleanSchema {
    type Output = bool;

    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        _context: &ValidationContext,
    ) -> Validation<bool, SchemaErrors> {
        match value.as_bool() {
            Some(b) => Validation::Success(b),
            None => Validation::Failure(type_error(path, "boolean", value)),
        }
    }
}

/// A schema for scalar option values.
///
/// [`PrimitiveSchema::any`] takes every JSON scalar (discriminator options);
/// [`PrimitiveSchema::string_or_number`] only strings and numbers (enum options).
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveSchema {
    allow_bool_and_null: bool,
}

impl PrimitiveSchema {
    pub fn any() -> Self {
        Self {
            allow_bool_and_null: true,
        }
    }

    pub fn string_or_number() -> Self {
        Self {
            allow_bool_and_null: false,
        }
    }

    fn expected(&self) -> &'static str {
        if self.allow_bool_and_null {
            "string | number | boolean | null"
        } else {
            "string | number"
        }
    }
}

impl SchemaLike for PrimitiveSchema {
    type Output = Primitive;

    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        _context: &ValidationContext,
    ) -> Validation<Primitive, SchemaErrors> {
        match value {
            Value::String(s) => Validation::Success(Primitive::String(s.clone())),
            Value::Number(n) => Validation::Success(Primitive::Number(n.clone())),
            Value::Bool(b) if self.allow_bool_and_null => Validation::Success(Primitive::Bool(*b)),
            Value::Null if self.allow_bool_and_null => Validation::Success(Primitive::Null),
            other => Validation::Failure(type_error(path, self.expected(), other)),
        }
    }
}
