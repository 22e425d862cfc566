//! Type descriptors for entity fields.
//!
//! Every field of an entity carries a [`TypeDescriptor`] that classifies the
//! value it holds. All generators switch exhaustively over this enum, so adding
//! a variant is a compile error until every generator handles it.
//!
//! Descriptors are written by callers using a fixed set of symbolic tokens
//! (`"String"`, `"IntArray"`, `"MongoId"`, ...) or a tagged object for nested
//! references and literals:
//!
//! ```json
//! { "title": "String", "editions": "IntArray", "author": { "object": "Author" } }
//! ```
//!
//! Anything else decodes to [`TypeDescriptor::Unsupported`] instead of failing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Token for an identifier scalar.
pub const MONGO_ID: &str = "MongoId";
/// Token for a string scalar.
pub const STRING: &str = "String";
/// Token for an integer scalar.
pub const INT: &str = "Int";
/// Token for a float scalar.
pub const FLOAT: &str = "Float";
/// Token for a boolean scalar.
pub const BOOLEAN: &str = "Boolean";
/// Token for an opaque JSON scalar.
pub const JSON: &str = "JSON";
/// Token for a date field.
pub const DATE: &str = "Date";
/// Token for an array of strings.
pub const STRING_ARRAY: &str = "StringArray";
/// Token for an array of integers.
pub const INT_ARRAY: &str = "IntArray";
/// Token for an array of floats.
pub const FLOAT_ARRAY: &str = "FloatArray";
/// Token for an array of identifiers.
pub const MONGO_ID_ARRAY: &str = "MongoIdArray";

/// Scalar kinds a field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Id,
    String,
    Int,
    Float,
    Bool,
    Json,
}

impl ScalarKind {
    /// The GraphQL scalar this kind is exposed as.
    #[must_use]
    pub fn graphql_name(self) -> &'static str {
        match self {
            Self::Id | Self::String => "String",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Bool => "Boolean",
            Self::Json => "JSON",
        }
    }

    fn token(self) -> &'static str {
        match self {
            Self::Id => MONGO_ID,
            Self::String => STRING,
            Self::Int => INT,
            Self::Float => FLOAT,
            Self::Bool => BOOLEAN,
            Self::Json => JSON,
        }
    }
}

/// Element kinds for arrays of scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayKind {
    String,
    Int,
    Float,
    Id,
}

impl ArrayKind {
    /// The GraphQL scalar of a single element. Identifier arrays hold strings.
    #[must_use]
    pub fn element_name(self) -> &'static str {
        match self {
            Self::String | Self::Id => "String",
            Self::Int => "Int",
            Self::Float => "Float",
        }
    }

    /// The input type used for positional element replacement.
    #[must_use]
    pub fn array_update_name(self) -> &'static str {
        match self {
            Self::String | Self::Id => "StringArrayUpdate",
            Self::Int => "IntArrayUpdate",
            Self::Float => "FloatArrayUpdate",
        }
    }

    fn token(self) -> &'static str {
        match self {
            Self::String => STRING_ARRAY,
            Self::Int => INT_ARRAY,
            Self::Float => FLOAT_ARRAY,
            Self::Id => MONGO_ID_ARRAY,
        }
    }
}

/// Classification of a field's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawDescriptor", into = "RawDescriptor")]
pub enum TypeDescriptor {
    /// A single scalar value.
    Scalar(ScalarKind),
    /// An array of scalar values.
    ArrayOfScalar(ArrayKind),
    /// A date, exposed as a string at the schema boundary.
    Date,
    /// An embedded object of the named entity.
    ObjectRef(String),
    /// An embedded array of objects of the named entity.
    ArrayOfObjectRef(String),
    /// Raw type text emitted verbatim.
    Literal(String),
    /// Input that matched no known descriptor. Carries the raw text.
    Unsupported(String),
}

impl TypeDescriptor {
    pub const ID: Self = Self::Scalar(ScalarKind::Id);
    pub const STRING: Self = Self::Scalar(ScalarKind::String);
    pub const INT: Self = Self::Scalar(ScalarKind::Int);
    pub const FLOAT: Self = Self::Scalar(ScalarKind::Float);
    pub const BOOL: Self = Self::Scalar(ScalarKind::Bool);
    pub const JSON: Self = Self::Scalar(ScalarKind::Json);
    pub const STRING_ARRAY: Self = Self::ArrayOfScalar(ArrayKind::String);
    pub const INT_ARRAY: Self = Self::ArrayOfScalar(ArrayKind::Int);
    pub const FLOAT_ARRAY: Self = Self::ArrayOfScalar(ArrayKind::Float);
    pub const ID_ARRAY: Self = Self::ArrayOfScalar(ArrayKind::Id);

    /// An embedded object of `entity`.
    pub fn object(entity: impl Into<String>) -> Self {
        Self::ObjectRef(entity.into())
    }

    /// An embedded array of `entity` objects.
    pub fn array_of(entity: impl Into<String>) -> Self {
        Self::ArrayOfObjectRef(entity.into())
    }

    /// Raw type text passed through unchanged.
    pub fn literal(type_text: impl Into<String>) -> Self {
        Self::Literal(type_text.into())
    }

    #[must_use]
    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date)
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Scalar(ScalarKind::Json))
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// The entity this descriptor refers to, if it is a nested object.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::ObjectRef(target) | Self::ArrayOfObjectRef(target) => Some(target),
            _ => None,
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = std::convert::Infallible;

    /// Parses a symbolic token. Unknown tokens become `Unsupported`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Ok(match token {
            MONGO_ID => Self::ID,
            STRING => Self::STRING,
            INT => Self::INT,
            FLOAT => Self::FLOAT,
            BOOLEAN => Self::BOOL,
            JSON => Self::JSON,
            DATE => Self::Date,
            STRING_ARRAY => Self::STRING_ARRAY,
            INT_ARRAY => Self::INT_ARRAY,
            FLOAT_ARRAY => Self::FLOAT_ARRAY,
            MONGO_ID_ARRAY => Self::ID_ARRAY,
            other => Self::Unsupported(other.to_string()),
        })
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => f.write_str(kind.token()),
            Self::ArrayOfScalar(kind) => f.write_str(kind.token()),
            Self::Date => f.write_str(DATE),
            Self::ObjectRef(target) => write!(f, "object({target})"),
            Self::ArrayOfObjectRef(target) => write!(f, "arrayOf({target})"),
            Self::Literal(text) => write!(f, "literal({text})"),
            Self::Unsupported(raw) => write!(f, "unsupported({raw})"),
        }
    }
}

/// Wire form of a descriptor: a bare token, a tagged object, or anything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawDescriptor {
    Token(String),
    Tagged(TaggedDescriptor),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum TaggedDescriptor {
    Object(String),
    ArrayOf(String),
    Literal(String),
}

impl From<RawDescriptor> for TypeDescriptor {
    fn from(raw: RawDescriptor) -> Self {
        match raw {
            RawDescriptor::Token(token) => match token.parse() {
                Ok(descriptor) => descriptor,
                Err(never) => match never {},
            },
            RawDescriptor::Tagged(TaggedDescriptor::Object(target)) => Self::ObjectRef(target),
            RawDescriptor::Tagged(TaggedDescriptor::ArrayOf(target)) => {
                Self::ArrayOfObjectRef(target)
            }
            RawDescriptor::Tagged(TaggedDescriptor::Literal(text)) => Self::Literal(text),
            RawDescriptor::Other(value) => Self::Unsupported(value.to_string()),
        }
    }
}

impl From<TypeDescriptor> for RawDescriptor {
    fn from(descriptor: TypeDescriptor) -> Self {
        match descriptor {
            TypeDescriptor::ObjectRef(target) => Self::Tagged(TaggedDescriptor::Object(target)),
            TypeDescriptor::ArrayOfObjectRef(target) => {
                Self::Tagged(TaggedDescriptor::ArrayOf(target))
            }
            TypeDescriptor::Literal(text) => Self::Tagged(TaggedDescriptor::Literal(text)),
            TypeDescriptor::Unsupported(raw) => Self::Token(raw),
            other => Self::Token(other.to_string()),
        }
    }
}

/// Outcome of running a generator over a descriptor.
///
/// `Supported(empty)` means the descriptor is known but contributes nothing by
/// design; `Unsupported` means the descriptor was not recognised at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Supported(T),
    Unsupported,
}

impl<T> Resolution<T> {
    #[must_use]
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Supported(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Self::Supported(value) => Resolution::Supported(f(value)),
            Self::Unsupported => Resolution::Unsupported,
        }
    }

    pub fn supported(self) -> Option<T> {
        match self {
            Self::Supported(value) => Some(value),
            Self::Unsupported => None,
        }
    }
}

impl<T: Default> Resolution<T> {
    /// The produced value, or the empty value when unsupported.
    pub fn unwrap_or_default(self) -> T {
        self.supported().unwrap_or_default()
    }
}
