//! Object validation building blocks.
//!
//! Issue shapes are open: their known fields are validated, anything else is
//! ignored. [`ObjectFields`] reads known fields one by one and accumulates
//! every mismatch; [`RecordSchema`] validates string-keyed maps.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{MismatchCode, SchemaError, SchemaErrors};
use crate::path::JsonPath;
use crate::validation::ValidationContext;

use super::traits::SchemaLike;
use super::type_error;

/// Field-by-field reader over one JSON object.
///
/// Each read returns `None` when the field failed (the reason is recorded);
/// [`ObjectFields::finish`] turns the collected outputs into a `Validation`.
///
/// # Example
///
/// ```rust
/// use zodlens::{JsonPath, ObjectFields, Schema, ValidationContext};
/// use serde_json::json;
///
/// let value = json!({ "keys": ["extra"], "note": "ignored" });
/// let ctx = ValidationContext::default();
/// let mut fields = ObjectFields::read(&value, &JsonPath::root(), &ctx).into_result().unwrap();
///
/// let keys = fields.required("keys", &Schema::array(Schema::string()));
/// let result = fields.finish(keys);
/// assert_eq!(result.into_result().ok(), Some(vec!["extra".to_string()]));
/// ```
pub struct ObjectFields<'a> {
    object: &'a Map<String, Value>,
    path: JsonPath,
    context: &'a ValidationContext,
    errors: Vec<SchemaError>,
}

impl<'a> ObjectFields<'a> {
    /// Starts reading `value`, failing if it is not an object.
    pub fn read(
        value: &'a Value,
        path: &JsonPath,
        context: &'a ValidationContext,
    ) -> Validation<Self, SchemaErrors> {
        match value.as_object() {
            Some(object) => Validation::Success(Self {
                object,
                path: path.clone(),
                context,
                errors: Vec::new(),
            }),
            None => Validation::Failure(type_error(path, "object", value)),
        }
    }

    /// Reads `value` as an object with `read` and finishes it in one step.
    pub fn parse<T>(
        value: &'a Value,
        path: &JsonPath,
        context: &'a ValidationContext,
        read: impl FnOnce(&mut ObjectFields<'a>) -> Option<T>,
    ) -> Validation<T, SchemaErrors> {
        match Self::read(value, path, context) {
            Validation::Success(mut fields) => {
                let output = read(&mut fields);
                fields.finish(output)
            }
            Validation::Failure(e) => Validation::Failure(e),
        }
    }

    /// Returns the raw field value, absent fields as `None`.
    pub fn raw(&self, name: &str) -> Option<&'a Value> {
        self.object.get(name)
    }

    /// Reads a field that must be present.
    pub fn required<S: SchemaLike>(&mut self, name: &str, schema: &S) -> Option<S::Output> {
        let field_path = self.path.push_field(name);
        match self.object.get(name) {
            Some(value) => self.record(schema.validate(value, &field_path, self.context)),
            None => {
                self.errors.push(
                    SchemaError::new(field_path, format!("required field '{}' is missing", name))
                        .with_code(MismatchCode::Required),
                );
                None
            }
        }
    }

    /// Reads a field that may be absent.
    ///
    /// Absent yields `Some(None)`; present but invalid yields `None`. A present
    /// `null` is validated like any other value.
    pub fn optional<S: SchemaLike>(&mut self, name: &str, schema: &S) -> Option<Option<S::Output>> {
        match self.object.get(name) {
            Some(value) => {
                let field_path = self.path.push_field(name);
                self.record(schema.validate(value, &field_path, self.context))
                    .map(Some)
            }
            None => Some(None),
        }
    }

    fn record<T>(&mut self, result: Validation<T, SchemaErrors>) -> Option<T> {
        match result {
            Validation::Success(v) => Some(v),
            Validation::Failure(e) => {
                self.errors.extend(e);
                None
            }
        }
    }

    /// Finishes the object: success only if nothing was recorded.
    pub fn finish<T>(self, output: Option<T>) -> Validation<T, SchemaErrors> {
        if let Some(errors) = SchemaErrors::from_vec(self.errors) {
            return Validation::Failure(errors);
        }
        match output {
            Some(v) => Validation::Success(v),
            None => Validation::Failure(SchemaErrors::single(SchemaError::new(
                self.path,
                "object is incomplete",
            ))),
        }
    }
}

/// A schema for JSON objects used as maps, e.g. `custom.params`.
///
/// Key order is preserved.
pub struct RecordSchema<S> {
    value_schema: S,
}

impl<S: SchemaLike> RecordSchema<S> {
    pub fn new(value_schema: S) -> Self {
        Self { value_schema }
    }
}

impl<S: SchemaLike> SchemaLike for RecordSchema<S> {
    type Output = IndexMap<String, S::Output>;

    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        context: &ValidationContext,
    ) -> Validation<Self::Output, SchemaErrors> {
        let Some(object) = value.as_object() else {
            return Validation::Failure(type_error(path, "object", value));
        };

        let mut errors = Vec::new();
        let mut validated = IndexMap::with_capacity(object.len());

        for (key, entry) in object {
            match self.value_schema.validate(entry, &path.push_field(key), context) {
                Validation::Success(v) => {
                    validated.insert(key.clone(), v);
                }
                Validation::Failure(e) => errors.extend(e),
            }
        }

        match SchemaErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(validated),
        }
    }
}
