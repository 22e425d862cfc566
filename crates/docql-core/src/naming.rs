//! Derived type and operation names.
//!
//! Client queries and hand-written extension code depend on these names, so
//! they are fixed suffixes and verbs on the entity name. Plurals are a literal
//! trailing `s`.

use std::fmt;

pub fn input_type(entity: &str) -> String {
    format!("{entity}Input")
}

pub fn mutation_input_type(entity: &str) -> String {
    format!("{entity}MutationInput")
}

pub fn array_mutation_input_type(entity: &str) -> String {
    format!("{entity}ArrayMutationInput")
}

pub fn sort_type(entity: &str) -> String {
    format!("{entity}Sort")
}

pub fn filters_type(entity: &str) -> String {
    format!("{entity}Filters")
}

pub fn query_results_type(entity: &str) -> String {
    format!("{entity}QueryResults")
}

pub fn single_query_result_type(entity: &str) -> String {
    format!("{entity}SingleQueryResult")
}

pub fn mutation_result_type(entity: &str) -> String {
    format!("{entity}MutationResult")
}

pub fn mutation_result_multi_type(entity: &str) -> String {
    format!("{entity}MutationResultMulti")
}

pub fn bulk_mutation_result_type(entity: &str) -> String {
    format!("{entity}BulkMutationResult")
}

/// Pagination metadata attached to every `QueryResults` type.
pub const QUERY_RESULTS_METADATA: &str = "QueryResultsMetadata";

/// Root operations generated for storage-backed entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootOperation {
    Create,
    Update,
    UpdateMany,
    UpdateBulk,
    Delete,
    All,
    Get,
}

impl RootOperation {
    /// Mutation operations in emission order.
    pub const MUTATIONS: [Self; 5] = [
        Self::Create,
        Self::Update,
        Self::UpdateMany,
        Self::UpdateBulk,
        Self::Delete,
    ];

    /// Query operations in emission order.
    pub const QUERIES: [Self; 2] = [Self::All, Self::Get];

    /// The operation name for `entity`.
    #[must_use]
    pub fn operation_name(self, entity: &str) -> String {
        match self {
            Self::Create => format!("create{entity}"),
            Self::Update => format!("update{entity}"),
            Self::UpdateMany => format!("update{entity}s"),
            Self::UpdateBulk => format!("update{entity}sBulk"),
            Self::Delete => format!("delete{entity}"),
            Self::All => format!("all{entity}s"),
            Self::Get => format!("get{entity}"),
        }
    }

    #[must_use]
    pub fn is_mutation(self) -> bool {
        !matches!(self, Self::All | Self::Get)
    }
}

impl fmt::Display for RootOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::UpdateMany => "updateMany",
            Self::UpdateBulk => "updateBulk",
            Self::Delete => "delete",
            Self::All => "all",
            Self::Get => "get",
        };
        f.write_str(verb)
    }
}

/// Checks that `name` is a valid GraphQL name (`[_A-Za-z][_0-9A-Za-z]*`).
#[must_use]
pub fn is_valid_graphql_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
