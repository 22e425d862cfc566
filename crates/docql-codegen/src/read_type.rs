//! Read types for entity fields.
//!
//! Maps a [`TypeDescriptor`] to the type text used when declaring the field
//! on an object type ([`Usage::Output`]) or on an input type ([`Usage::Input`]).

use docql_core::{Resolution, TypeDescriptor, naming};

/// Where a field's type is being declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    Output,
    Input,
}

/// Resolves the type text of a field.
///
/// Dates and identifiers are strings at the schema boundary; nested objects
/// use the target's `Input` type on inputs; literals are emitted verbatim.
pub fn read_type(descriptor: &TypeDescriptor, usage: Usage) -> Resolution<String> {
    let type_text = match descriptor {
        TypeDescriptor::Date => "String".to_string(),
        TypeDescriptor::Scalar(kind) => kind.graphql_name().to_string(),
        TypeDescriptor::ArrayOfScalar(kind) => format!("[{}]", kind.element_name()),
        TypeDescriptor::ObjectRef(target) => entity_type(target, usage),
        TypeDescriptor::ArrayOfObjectRef(target) => format!("[{}]", entity_type(target, usage)),
        TypeDescriptor::Literal(text) => text.clone(),
        TypeDescriptor::Unsupported(_) => return Resolution::Unsupported,
    };
    Resolution::Supported(type_text)
}

/// The target entity's type name for the given usage.
pub(crate) fn entity_type(target: &str, usage: Usage) -> String {
    match usage {
        Usage::Output => target.to_string(),
        Usage::Input => naming::input_type(target),
    }
}
