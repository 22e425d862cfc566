//! Relationship fields.
//!
//! A relationship contributes a resolver field to the object type, a field to
//! the primary input type, and a single attach (`_ADD`) or replace (`_SET`)
//! argument to the mutation input. Array relationships accept `SORT`/`SORTS`
//! so nested collections can be ordered on their own.

use docql_core::{RelationshipDescriptor, naming};

use crate::mutations::{MutationArgument, MutationOp};
use crate::read_type::{Usage, entity_type};
use crate::sdl::{Argument, FieldDef};

/// Everything one relationship contributes to its entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipFields {
    pub resolver: FieldDef,
    pub input: FieldDef,
    pub mutation: MutationArgument,
}

/// The relationship's type text: the target, array-wrapped if needed.
pub fn relationship_type(rel: &RelationshipDescriptor, usage: Usage) -> String {
    let target = entity_type(&rel.target, usage);
    if rel.is_array {
        format!("[{target}]")
    } else {
        target
    }
}

/// The resolver arguments of a relationship field.
pub fn resolver_arguments(rel: &RelationshipDescriptor) -> Vec<Argument> {
    if !rel.is_array {
        return Vec::new();
    }
    let sort = naming::sort_type(&rel.target);
    vec![
        Argument::new("SORT", sort.as_str()),
        Argument::new("SORTS", format!("[{sort}]")),
    ]
}

/// Expands one relationship into its object, input and mutation fields.
pub fn expand(name: &str, rel: &RelationshipDescriptor) -> RelationshipFields {
    let input_type = relationship_type(rel, Usage::Input);
    let op = if rel.is_array {
        MutationOp::Add
    } else {
        MutationOp::SetRelation
    };

    RelationshipFields {
        resolver: FieldDef::new(name, relationship_type(rel, Usage::Output))
            .with_arguments(resolver_arguments(rel)),
        input: FieldDef::new(name, input_type.as_str()),
        mutation: MutationArgument::new(name, op, input_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_relationship() {
        let fields = expand("subjects", &RelationshipDescriptor::many("Subject"));

        assert_eq!(fields.resolver.type_text, "[Subject]");
        assert_eq!(
            fields.resolver.arguments,
            vec![
                Argument::new("SORT", "SubjectSort"),
                Argument::new("SORTS", "[SubjectSort]"),
            ]
        );
        assert_eq!(fields.input, FieldDef::new("subjects", "[SubjectInput]"));
        assert_eq!(fields.mutation.name(), "subjects_ADD");
        assert_eq!(fields.mutation.type_text, "[SubjectInput]");
    }

    #[test]
    fn test_single_relationship() {
        let fields = expand("mainAuthor", &RelationshipDescriptor::one("Author"));

        assert_eq!(fields.resolver, FieldDef::new("mainAuthor", "Author"));
        assert_eq!(fields.input.type_text, "AuthorInput");
        assert_eq!(fields.mutation.name(), "mainAuthor_SET");
        assert_eq!(fields.mutation.type_text, "AuthorInput");
    }
}
