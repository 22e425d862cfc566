//! Mutation operators for entity fields.
//!
//! Each field contributes arguments to its entity's `<Name>MutationInput`.
//! The identifier field is excluded by the assembler; identifiers never change
//! after creation.

use docql_core::{ArrayKind, Resolution, ScalarKind, TypeDescriptor, naming};

use crate::sdl::Argument;

/// A mutation operator, identified by the suffix appended to the field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationOp {
    /// Plain assignment (no suffix).
    Set,
    Inc,
    Dec,
    Push,
    Concat,
    Update,
    Updates,
    Pull,
    AddToSet,
    /// Append to an array relationship.
    Add,
    /// Replace a single relationship.
    SetRelation,
}

impl MutationOp {
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Set => "",
            Self::Inc => "_INC",
            Self::Dec => "_DEC",
            Self::Push => "_PUSH",
            Self::Concat => "_CONCAT",
            Self::Update => "_UPDATE",
            Self::Updates => "_UPDATES",
            Self::Pull => "_PULL",
            Self::AddToSet => "_ADDTOSET",
            Self::Add => "_ADD",
            Self::SetRelation => "_SET",
        }
    }
}

/// One generated mutation argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationArgument {
    pub field: String,
    pub op: MutationOp,
    pub type_text: String,
}

impl MutationArgument {
    pub(crate) fn new(field: &str, op: MutationOp, type_text: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            op,
            type_text: type_text.into(),
        }
    }

    /// The argument name, e.g. `editions_PUSH`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}{}", self.field, self.op.suffix())
    }

    #[must_use]
    pub fn to_argument(&self) -> Argument {
        Argument::new(self.name(), self.type_text.clone())
    }
}

/// Generates the mutation arguments for one field.
///
/// `_INC` and `_DEC` are typed `Int` even on `Float` fields.
pub fn mutation_arguments(
    field: &str,
    descriptor: &TypeDescriptor,
) -> Resolution<Vec<MutationArgument>> {
    let set = |type_text: &str| MutationArgument::new(field, MutationOp::Set, type_text);

    let args = match descriptor {
        TypeDescriptor::Date => vec![set("String")],
        TypeDescriptor::Scalar(ScalarKind::Bool) => vec![set("Boolean")],
        TypeDescriptor::Scalar(kind @ (ScalarKind::Int | ScalarKind::Float)) => vec![
            set(kind.graphql_name()),
            MutationArgument::new(field, MutationOp::Inc, "Int"),
            MutationArgument::new(field, MutationOp::Dec, "Int"),
        ],
        TypeDescriptor::Scalar(ScalarKind::Json) => vec![set("JSON")],
        TypeDescriptor::Scalar(ScalarKind::String | ScalarKind::Id) => vec![set("String")],
        TypeDescriptor::ArrayOfScalar(kind) => scalar_array_arguments(field, *kind),
        TypeDescriptor::ArrayOfObjectRef(target) => {
            let input = naming::input_type(target);
            let element_update = naming::array_mutation_input_type(target);
            vec![
                set(&format!("[{input}]")),
                MutationArgument::new(field, MutationOp::Push, input.as_str()),
                MutationArgument::new(field, MutationOp::Concat, format!("[{input}]")),
                MutationArgument::new(field, MutationOp::Update, element_update.as_str()),
                MutationArgument::new(field, MutationOp::Updates, format!("[{element_update}]")),
                MutationArgument::new(field, MutationOp::Pull, naming::filters_type(target)),
            ]
        }
        TypeDescriptor::ObjectRef(target) => vec![
            set(&naming::input_type(target)),
            MutationArgument::new(field, MutationOp::Update, naming::mutation_input_type(target)),
        ],
        TypeDescriptor::Literal(text) => vec![set(text)],
        TypeDescriptor::Unsupported(_) => return Resolution::Unsupported,
    };

    Resolution::Supported(args)
}

fn scalar_array_arguments(field: &str, kind: ArrayKind) -> Vec<MutationArgument> {
    let elem = kind.element_name();
    let update = kind.array_update_name();
    vec![
        MutationArgument::new(field, MutationOp::Set, format!("[{elem}]")),
        MutationArgument::new(field, MutationOp::Push, elem),
        MutationArgument::new(field, MutationOp::Concat, format!("[{elem}]")),
        MutationArgument::new(field, MutationOp::Update, update),
        MutationArgument::new(field, MutationOp::Updates, format!("[{update}]")),
        MutationArgument::new(field, MutationOp::Pull, format!("[{elem}]")),
        MutationArgument::new(field, MutationOp::AddToSet, format!("[{elem}]")),
    ]
}
