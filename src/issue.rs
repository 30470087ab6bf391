//! Typed model of a parsed Zod issue tree.
//!
//! An [`Issue`] always carries a path and a message; everything else hangs off
//! its [`IssueKind`], one variant per recognized `code`. Union, argument and
//! return-type issues nest further [`IssueGroup`]s, so the tree is recursive.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::{Number, Value};

use crate::path::JsonPath;

/// A closed set of string names, parsed from and printed back to JSON strings.
pub trait Vocabulary: Sized + Copy + Send + Sync + 'static {
    /// Human-readable name of the set, used in mismatch messages.
    const NAME: &'static str;

    /// Every member, in declaration order.
    fn all() -> &'static [Self];

    /// The wire name of this member.
    fn as_str(&self) -> &'static str;

    /// Looks up a member by its wire name.
    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.as_str() == name)
    }
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $vis:vis enum $ty:ident as $label:literal {
            $($(#[$vmeta:meta])* $variant:ident => $name:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $ty {
            $($(#[$vmeta])* $variant,)+
        }

        impl Vocabulary for $ty {
            const NAME: &'static str = $label;

            fn all() -> &'static [Self] {
                &[$($ty::$variant,)+]
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// The discriminant of an issue.
    pub enum IssueCode as "issue code" {
        InvalidType => "invalid_type",
        InvalidLiteral => "invalid_literal",
        UnrecognizedKeys => "unrecognized_keys",
        InvalidUnion => "invalid_union",
        InvalidUnionDiscriminator => "invalid_union_discriminator",
        InvalidEnumValue => "invalid_enum_value",
        InvalidArguments => "invalid_arguments",
        InvalidReturnType => "invalid_return_type",
        InvalidDate => "invalid_date",
        InvalidString => "invalid_string",
        TooSmall => "too_small",
        TooBig => "too_big",
        InvalidIntersectionTypes => "invalid_intersection_types",
        NotMultipleOf => "not_multiple_of",
        NotFinite => "not_finite",
        Custom => "custom",
    }
}

vocabulary! {
    /// Runtime type names Zod reports as `received` on `invalid_type` issues.
    pub enum ParsedType as "parsed type" {
        String => "string",
        Nan => "nan",
        Number => "number",
        Integer => "integer",
        Float => "float",
        Boolean => "boolean",
        Date => "date",
        BigInt => "bigint",
        Symbol => "symbol",
        Function => "function",
        Undefined => "undefined",
        Null => "null",
        Array => "array",
        Object => "object",
        Unknown => "unknown",
        Promise => "promise",
        Void => "void",
        Never => "never",
        Map => "map",
        Set => "set",
    }
}

vocabulary! {
    /// Named string formats checked by `invalid_string` issues.
    pub enum StringFormat as "string validation" {
        Email => "email",
        Url => "url",
        Emoji => "emoji",
        Uuid => "uuid",
        Nanoid => "nanoid",
        Regex => "regex",
        Cuid => "cuid",
        Cuid2 => "cuid2",
        Ulid => "ulid",
        Datetime => "datetime",
        Date => "date",
        Time => "time",
        Duration => "duration",
        Ip => "ip",
        Base64 => "base64",
    }
}

vocabulary! {
    /// The kind of value a size limit applied to.
    pub enum SizeType as "size type" {
        Array => "array",
        String => "string",
        Number => "number",
        Set => "set",
        Date => "date",
        BigInt => "bigint",
    }
}

/// What an `invalid_string` issue checked.
#[derive(Debug, Clone, PartialEq)]
pub enum StringValidation {
    /// One of the named formats.
    Format(StringFormat),
    /// `{ "includes": ..., "position"?: ... }`
    Includes {
        includes: String,
        position: Option<Number>,
    },
    /// `{ "startsWith": ... }`
    StartsWith(String),
    /// `{ "endsWith": ... }`
    EndsWith(String),
}

/// A numeric limit that may exceed what a JSON number represents exactly.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    /// A plain JSON number.
    Number(Number),
    /// A big integer serialized as a digit string, with or without a trailing `n`.
    BigInt(String),
}

impl Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Number(n) => write!(f, "{}", n),
            Bound::BigInt(digits) => write!(f, "{}n", digits),
        }
    }
}

/// A scalar JSON value, as allowed in enum and discriminator option lists.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
}

impl Primitive {
    /// Converts back into a JSON value for display.
    pub fn to_value(&self) -> Value {
        match self {
            Primitive::String(s) => Value::String(s.clone()),
            Primitive::Number(n) => Value::Number(n.clone()),
            Primitive::Bool(b) => Value::Bool(*b),
            Primitive::Null => Value::Null,
        }
    }
}

/// The limit carried by `too_small` and `too_big` issues.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeLimit {
    /// `minimum` for `too_small`, `maximum` for `too_big`.
    pub limit: Bound,
    pub inclusive: bool,
    pub exact: Option<bool>,
    pub size_type: SizeType,
}

/// Code-specific payload of an [`Issue`].
#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    InvalidType {
        /// Any string: Zod sometimes reports a descriptive phrase such as
        /// `'a' | 'b' | 'c'` here instead of a type name.
        expected: String,
        received: ParsedType,
    },
    /// `None` means the field was absent (JS `undefined`).
    InvalidLiteral {
        expected: Option<Value>,
        received: Option<Value>,
    },
    UnrecognizedKeys {
        keys: Vec<String>,
    },
    InvalidUnion {
        union_errors: Vec<IssueGroup>,
    },
    InvalidUnionDiscriminator {
        options: Vec<Primitive>,
    },
    InvalidEnumValue {
        options: Vec<Primitive>,
        received: Primitive,
    },
    InvalidArguments {
        arguments_error: IssueGroup,
    },
    InvalidReturnType {
        return_type_error: IssueGroup,
    },
    InvalidDate,
    InvalidString {
        validation: StringValidation,
    },
    TooSmall(SizeLimit),
    TooBig(SizeLimit),
    InvalidIntersectionTypes,
    NotMultipleOf {
        multiple_of: Bound,
    },
    NotFinite,
    Custom {
        params: Option<IndexMap<String, String>>,
    },
}

impl IssueKind {
    /// The `code` discriminant this payload belongs to.
    pub fn code(&self) -> IssueCode {
        match self {
            IssueKind::InvalidType { .. } => IssueCode::InvalidType,
            IssueKind::InvalidLiteral { .. } => IssueCode::InvalidLiteral,
            IssueKind::UnrecognizedKeys { .. } => IssueCode::UnrecognizedKeys,
            IssueKind::InvalidUnion { .. } => IssueCode::InvalidUnion,
            IssueKind::InvalidUnionDiscriminator { .. } => IssueCode::InvalidUnionDiscriminator,
            IssueKind::InvalidEnumValue { .. } => IssueCode::InvalidEnumValue,
            IssueKind::InvalidArguments { .. } => IssueCode::InvalidArguments,
            IssueKind::InvalidReturnType { .. } => IssueCode::InvalidReturnType,
            IssueKind::InvalidDate => IssueCode::InvalidDate,
            IssueKind::InvalidString { .. } => IssueCode::InvalidString,
            IssueKind::TooSmall(_) => IssueCode::TooSmall,
            IssueKind::TooBig(_) => IssueCode::TooBig,
            IssueKind::InvalidIntersectionTypes => IssueCode::InvalidIntersectionTypes,
            IssueKind::NotMultipleOf { .. } => IssueCode::NotMultipleOf,
            IssueKind::NotFinite => IssueCode::NotFinite,
            IssueKind::Custom { .. } => IssueCode::Custom,
        }
    }
}

/// One explanation of why a value failed validation at a specific path.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Route into the validated value; empty means the value itself.
    pub path: JsonPath,
    pub message: String,
    pub kind: IssueKind,
}

impl Issue {
    pub fn new(path: JsonPath, message: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            path,
            message: message.into(),
            kind,
        }
    }

    pub fn code(&self) -> IssueCode {
        self.kind.code()
    }
}

/// A nested error, shaped like a full `ZodError`.
///
/// Only `issues` is kept; `name` and any other keys are dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IssueGroup {
    pub issues: Vec<Issue>,
}

impl IssueGroup {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }
}
