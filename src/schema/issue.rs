//! The issue grammar.
//!
//! [`IssueListSchema`], [`IssueSchema`] and [`IssueGroupSchema`] call each
//! other recursively, mirroring the shape of the data: a list holds issues,
//! union/argument/return-type issues hold groups, and a group holds a list.
//!
//! Dispatch is by `code`: the code is read first and selects which extra
//! fields are required. Unknown codes fail the whole payload.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{MismatchCode, SchemaError, SchemaErrors};
use crate::issue::{
    Issue, IssueCode, IssueGroup, IssueKind, ParsedType, SizeLimit, SizeType, StringFormat,
    StringValidation,
};
use crate::path::JsonPath;
use crate::validation::ValidationContext;

use super::array::ArraySchema;
use super::combinators::{AnyOfSchema, MapExt};
use super::numeric::{BoundSchema, NumberSchema, PathSegmentSchema};
use super::object::{ObjectFields, RecordSchema};
use super::scalar::{BooleanSchema, PrimitiveSchema};
use super::string::{EnumSchema, StringSchema};
use super::traits::{FnSchema, SchemaLike};

/// A schema for a top-level issue payload: an array of issues.
///
/// # Example
///
/// ```rust
/// use zodlens::{IssueCode, IssueListSchema, JsonPath, SchemaLike, ValidationContext};
/// use serde_json::json;
///
/// let payload = json!([{ "code": "not_finite", "message": "Number must be finite", "path": ["ratio"] }]);
/// let issues = IssueListSchema
///     .validate(&payload, &JsonPath::root(), &ValidationContext::default())
///     .into_result()
///     .unwrap();
///
/// assert_eq!(issues[0].code(), IssueCode::NotFinite);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueListSchema;

impl SchemaLike for IssueListSchema {
    type Output = Vec<Issue>;

    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        context: &ValidationContext,
    ) -> Validation<Vec<Issue>, SchemaErrors> {
        ArraySchema::new(IssueSchema).validate(value, path, context)
    }
}

/// A schema for a nested `ZodError`-shaped object: `{ "issues": [...] }`.
///
/// Each group is one nesting level; past the context's limit the group fails
/// with `max_depth_exceeded` instead of recursing.
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueGroupSchema;

impl SchemaLike for IssueGroupSchema {
    type Output = IssueGroup;

    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        context: &ValidationContext,
    ) -> Validation<IssueGroup, SchemaErrors> {
        if context.exhausted() {
            return Validation::Failure(SchemaErrors::single(
                SchemaError::new(
                    path.clone(),
                    format!(
                        "maximum nesting depth {} exceeded at '{}'",
                        context.max_depth(),
                        path
                    ),
                )
                .with_code(MismatchCode::MaxDepthExceeded),
            ));
        }

        let nested = context.increment_depth();
        ObjectFields::parse(value, path, &nested, |fields| {
            fields
                .required("issues", &IssueListSchema)
                .map(IssueGroup::new)
        })
    }
}

/// A schema for one issue object.
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueSchema;

impl SchemaLike for IssueSchema {
    type Output = Issue;

    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        context: &ValidationContext,
    ) -> Validation<Issue, SchemaErrors> {
        ObjectFields::parse(value, path, context, |fields| {
            let code = fields.required(
                "code",
                &EnumSchema::<IssueCode>::new().with_code(MismatchCode::UnknownCode),
            );
            let message = fields.required("message", &StringSchema::new());
            let issue_path = fields
                .required("path", &ArraySchema::new(PathSegmentSchema::new()))
                .map(|segments| segments.into_iter().collect::<JsonPath>());
            let kind = code.and_then(|code| read_kind(code, fields));

            Some(Issue::new(issue_path?, message?, kind?))
        })
    }
}

/// Reads the code-specific fields of an issue.
fn read_kind(code: IssueCode, fields: &mut ObjectFields<'_>) -> Option<IssueKind> {
    let kind = match code {
        IssueCode::InvalidType => {
            let expected = fields.required("expected", &StringSchema::new());
            let received = fields.required("received", &EnumSchema::<ParsedType>::new());
            IssueKind::InvalidType {
                expected: expected?,
                received: received?,
            }
        }
        IssueCode::InvalidLiteral => IssueKind::InvalidLiteral {
            expected: fields.raw("expected").cloned(),
            received: fields.raw("received").cloned(),
        },
        IssueCode::UnrecognizedKeys => IssueKind::UnrecognizedKeys {
            keys: fields.required("keys", &ArraySchema::new(StringSchema::new()))?,
        },
        IssueCode::InvalidUnion => IssueKind::InvalidUnion {
            union_errors: fields.required("unionErrors", &ArraySchema::new(IssueGroupSchema))?,
        },
        IssueCode::InvalidUnionDiscriminator => IssueKind::InvalidUnionDiscriminator {
            options: fields.required("options", &ArraySchema::new(PrimitiveSchema::any()))?,
        },
        IssueCode::InvalidEnumValue => {
            let options = fields.required(
                "options",
                &ArraySchema::new(PrimitiveSchema::string_or_number()),
            );
            let received = fields.required("received", &PrimitiveSchema::string_or_number());
            IssueKind::InvalidEnumValue {
                options: options?,
                received: received?,
            }
        }
        IssueCode::InvalidArguments => IssueKind::InvalidArguments {
            arguments_error: fields.required("argumentsError", &IssueGroupSchema)?,
        },
        IssueCode::InvalidReturnType => IssueKind::InvalidReturnType {
            return_type_error: fields.required("returnTypeError", &IssueGroupSchema)?,
        },
        IssueCode::InvalidDate => IssueKind::InvalidDate,
        IssueCode::InvalidString => IssueKind::InvalidString {
            validation: fields.required("validation", &string_validation_schema())?,
        },
        IssueCode::TooSmall => IssueKind::TooSmall(read_size_limit(fields, "minimum")?),
        IssueCode::TooBig => IssueKind::TooBig(read_size_limit(fields, "maximum")?),
        IssueCode::InvalidIntersectionTypes => IssueKind::InvalidIntersectionTypes,
        IssueCode::NotMultipleOf => IssueKind::NotMultipleOf {
            multiple_of: fields.required("multipleOf", &BoundSchema::new())?,
        },
        IssueCode::NotFinite => IssueKind::NotFinite,
        IssueCode::Custom => IssueKind::Custom {
            params: fields.optional("params", &RecordSchema::new(StringSchema::new()))?,
        },
    };
    Some(kind)
}

fn read_size_limit(fields: &mut ObjectFields<'_>, limit_field: &str) -> Option<SizeLimit> {
    let limit = fields.required(limit_field, &BoundSchema::new());
    let inclusive = fields.required("inclusive", &BooleanSchema::new());
    let exact = fields.optional("exact", &BooleanSchema::new());
    let size_type = fields.required("type", &EnumSchema::<SizeType>::new());

    Some(SizeLimit {
        limit: limit?,
        inclusive: inclusive?,
        exact: exact?,
        size_type: size_type?,
    })
}

/// `invalid_string.validation`: a named format or one of three object shapes.
fn string_validation_schema() -> AnyOfSchema<StringValidation> {
    AnyOfSchema::new(vec![
        Box::new(EnumSchema::<StringFormat>::new().map(StringValidation::Format))
            as Box<dyn SchemaLike<Output = StringValidation>>,
        Box::new(FnSchema::new(
            |value: &Value, path: &JsonPath, context: &ValidationContext| {
                ObjectFields::parse(value, path, context, |fields| {
                    let includes = fields.required("includes", &StringSchema::new());
                    let position = fields.optional("position", &NumberSchema::new());
                    Some(StringValidation::Includes {
                        includes: includes?,
                        position: position?,
                    })
                })
            },
        )),
        Box::new(FnSchema::new(
            |value: &Value, path: &JsonPath, context: &ValidationContext| {
                ObjectFields::parse(value, path, context, |fields| {
                    fields
                        .required("startsWith", &StringSchema::new())
                        .map(StringValidation::StartsWith)
                })
            },
        )),
        Box::new(FnSchema::new(
            |value: &Value, path: &JsonPath, context: &ValidationContext| {
                ObjectFields::parse(value, path, context, |fields| {
                    fields
                        .required("endsWith", &StringSchema::new())
                        .map(StringValidation::EndsWith)
                })
            },
        )),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{Bound, Primitive};
    use crate::path::PathSegment;
    use serde_json::{json, Number};

    fn parse(value: Value) -> Validation<Vec<Issue>, SchemaErrors> {
        IssueListSchema.validate(&value, &JsonPath::root(), &ValidationContext::default())
    }

    fn single(value: Value) -> Issue {
        let mut issues = parse(json!([value])).into_result().unwrap();
        assert_eq!(issues.len(), 1);
        issues.remove(0)
    }

    fn unwrap_failure(value: Value) -> SchemaErrors {
        parse(value).into_result().unwrap_err()
    }

    #[test]
    fn test_too_small_issue() {
        let issue = single(json!({
            "code": "too_small",
            "minimum": 1,
            "type": "number",
            "inclusive": true,
            "exact": false,
            "message": "Number must be greater than or equal to 1",
            "path": ["maxTokens"]
        }));

        assert_eq!(issue.path, JsonPath::from_field("maxTokens"));
        assert_eq!(
            issue.kind,
            IssueKind::TooSmall(SizeLimit {
                limit: Bound::Number(Number::from(1)),
                inclusive: true,
                exact: Some(false),
                size_type: SizeType::Number,
            })
        );
    }

    #[test]
    fn test_invalid_type_accepts_descriptive_expected() {
        let issue = single(json!({
            "expected": "'a' | 'b' | 'c'",
            "received": "undefined",
            "code": "invalid_type",
            "path": [],
            "message": "Required"
        }));
        assert_eq!(
            issue.kind,
            IssueKind::InvalidType {
                expected: "'a' | 'b' | 'c'".to_string(),
                received: ParsedType::Undefined,
            }
        );
        assert!(issue.path.is_root());
    }

    #[test]
    fn test_invalid_type_rejects_unknown_received() {
        let errors = unwrap_failure(json!([{
            "code": "invalid_type",
            "expected": "string",
            "received": "widget",
            "path": [],
            "message": "Expected string"
        }]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().path.to_string(), "[0].received");
        assert_eq!(errors.first().message, "unrecognized parsed type");
    }

    #[test]
    fn test_invalid_literal_keeps_absent_sides() {
        let issue = single(json!({
            "code": "invalid_literal",
            "expected": {"kind": "a"},
            "message": "Invalid literal value",
            "path": [0]
        }));
        assert_eq!(
            issue.kind,
            IssueKind::InvalidLiteral {
                expected: Some(json!({"kind": "a"})),
                received: None,
            }
        );
        assert_eq!(issue.path.segments().next(), Some(&PathSegment::index(0)));
    }

    #[test]
    fn test_enum_and_discriminator_options() {
        let issues = parse(json!([
            {
                "received": "pt",
                "code": "invalid_enum_value",
                "options": ["en", "es", 3],
                "path": ["toLocale"],
                "message": "Invalid enum value"
            },
            {
                "code": "invalid_union_discriminator",
                "options": ["circle", 2, true, null],
                "path": ["kind"],
                "message": "Invalid discriminator value"
            }
        ]))
        .into_result()
        .unwrap();

        assert_eq!(
            issues[0].kind,
            IssueKind::InvalidEnumValue {
                options: vec![
                    Primitive::String("en".to_string()),
                    Primitive::String("es".to_string()),
                    Primitive::Number(Number::from(3)),
                ],
                received: Primitive::String("pt".to_string()),
            }
        );
        match &issues[1].kind {
            IssueKind::InvalidUnionDiscriminator { options } => {
                assert_eq!(options.len(), 4);
                assert_eq!(options[3], Primitive::Null);
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_enum_options_reject_booleans() {
        let errors = unwrap_failure(json!([{
            "received": "pt",
            "code": "invalid_enum_value",
            "options": [true],
            "path": [],
            "message": "Invalid enum value"
        }]));
        assert_eq!(errors.first().path.to_string(), "[0].options[0]");
    }

    #[test]
    fn test_invalid_string_shapes() {
        let issues = parse(json!([
            {"code": "invalid_string", "validation": "email", "message": "Invalid email", "path": []},
            {"code": "invalid_string", "validation": {"includes": "@", "position": 2}, "message": "m", "path": []},
            {"code": "invalid_string", "validation": {"startsWith": "https://"}, "message": "m", "path": []},
            {"code": "invalid_string", "validation": {"endsWith": ".com"}, "message": "m", "path": []}
        ]))
        .into_result()
        .unwrap();

        let validations: Vec<_> = issues
            .iter()
            .map(|issue| match &issue.kind {
                IssueKind::InvalidString { validation } => validation.clone(),
                other => panic!("unexpected kind {other:?}"),
            })
            .collect();
        assert_eq!(
            validations,
            vec![
                StringValidation::Format(StringFormat::Email),
                StringValidation::Includes {
                    includes: "@".to_string(),
                    position: Some(Number::from(2)),
                },
                StringValidation::StartsWith("https://".to_string()),
                StringValidation::EndsWith(".com".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_string_unknown_format() {
        let errors = unwrap_failure(json!([{
            "code": "invalid_string",
            "validation": "phone",
            "message": "Invalid",
            "path": []
        }]));
        assert_eq!(errors.first().code, MismatchCode::NoAlternativeMatched);
        assert_eq!(errors.first().path.to_string(), "[0].validation");
    }

    #[test]
    fn test_custom_params_optional() {
        let issues = parse(json!([
            {"code": "custom", "message": "Bad", "path": ["a", 1]},
            {"code": "custom", "message": "Bad", "path": [], "params": {"reason": "taken"}}
        ]))
        .into_result()
        .unwrap();

        assert_eq!(issues[0].kind, IssueKind::Custom { params: None });
        match &issues[1].kind {
            IssueKind::Custom { params: Some(params) } => {
                assert_eq!(params.get("reason").map(String::as_str), Some("taken"));
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_nested_union_groups() {
        let issue = single(json!({
            "code": "invalid_union",
            "unionErrors": [
                {"issues": [{"code": "invalid_date", "message": "Invalid date", "path": []}], "name": "ZodError"},
                {"issues": [{
                    "code": "invalid_union",
                    "unionErrors": [{"issues": [], "name": "ZodError"}],
                    "message": "Invalid input",
                    "path": []
                }], "name": "ZodError"}
            ],
            "message": "Invalid input",
            "path": ["prompt"]
        }));

        let IssueKind::InvalidUnion { union_errors } = issue.kind else {
            panic!("expected a union issue");
        };
        assert_eq!(union_errors.len(), 2);
        assert_eq!(union_errors[0].issues[0].code(), IssueCode::InvalidDate);
        assert_eq!(union_errors[1].issues[0].code(), IssueCode::InvalidUnion);
    }

    #[test]
    fn test_nested_errors_are_located() {
        let errors = unwrap_failure(json!([{
            "code": "invalid_union",
            "unionErrors": [{"issues": [{"code": "nope", "message": "x", "path": []}]}],
            "message": "Invalid input",
            "path": []
        }]));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.first().path.to_string(),
            "[0].unionErrors[0].issues[0].code"
        );
        assert_eq!(errors.first().code, MismatchCode::UnknownCode);
    }

    #[test]
    fn test_arguments_and_return_type_groups() {
        let issues = parse(json!([
            {
                "code": "invalid_arguments",
                "argumentsError": {"issues": [{"code": "not_finite", "message": "m", "path": [0]}]},
                "message": "Invalid function arguments",
                "path": []
            },
            {
                "code": "invalid_return_type",
                "returnTypeError": {"issues": []},
                "message": "Invalid function return type",
                "path": []
            }
        ]))
        .into_result()
        .unwrap();

        match &issues[0].kind {
            IssueKind::InvalidArguments { arguments_error } => {
                assert_eq!(arguments_error.issues.len(), 1)
            }
            other => panic!("unexpected kind {other:?}"),
        }
        assert_eq!(
            issues[1].kind,
            IssueKind::InvalidReturnType {
                return_type_error: IssueGroup::default()
            }
        );
    }

    #[test]
    fn test_all_errors_accumulate_across_issues() {
        let errors = unwrap_failure(json!([
            {"code": "too_big", "maximum": "ten", "inclusive": true, "type": "string", "message": "m", "path": []},
            {"code": "unrecognized_keys", "message": "m", "path": []},
            {"message": 3, "path": {}}
        ]));

        let paths: Vec<_> = errors.iter().map(|e| e.path.to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "[0].maximum",
                "[1].keys",
                "[2].code",
                "[2].message",
                "[2].path"
            ]
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut payload = json!([{"code": "invalid_date", "message": "m", "path": []}]);
        for _ in 0..5 {
            payload = json!([{
                "code": "invalid_union",
                "unionErrors": [{"issues": payload}],
                "message": "Invalid input",
                "path": []
            }]);
        }

        let shallow = IssueListSchema.validate(&payload, &JsonPath::root(), &ValidationContext::new(5));
        assert!(shallow.is_success());

        let errors = IssueListSchema
            .validate(&payload, &JsonPath::root(), &ValidationContext::new(4))
            .into_result()
            .unwrap_err();
        assert_eq!(errors.with_code(MismatchCode::MaxDepthExceeded).len(), 1);
    }

    #[test]
    fn test_rejects_non_array_payload() {
        let errors = unwrap_failure(json!({"code": "custom", "message": "m", "path": []}));
        assert_eq!(errors.first().code, MismatchCode::InvalidType);
        assert!(errors.first().path.is_root());
    }
}
