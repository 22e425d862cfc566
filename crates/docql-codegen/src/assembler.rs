//! Schema assembly for a single entity.
//!
//! [`SchemaAssembler`] runs the per-field generators over an
//! [`EntityDefinition`] and sequences their output into the entity's
//! declarations and, for storage-backed entities, its root Query and Mutation
//! operations.
//!
//! For an entity `Book` the declarations are, in order:
//!
//! - `type Book`
//! - `BookQueryResults`, `BookSingleQueryResult`, `BookMutationResult`,
//!   `BookMutationResultMulti`, `BookBulkMutationResult` (storage-backed only)
//! - `input BookInput`, `input BookMutationInput`
//! - `input BookArrayMutationInput` (only when used as an array element)
//! - `input BookSort`, `input BookFilters`

use docql_core::naming::{self, RootOperation};
use docql_core::{EntityDefinition, ID_FIELD, Resolution, TypeDescriptor};
use tracing::{debug, trace, warn};

use crate::config::CodegenConfig;
use crate::error::{CodegenError, Diagnostic};
use crate::filters::{FilterArgument, filter_arguments};
use crate::fragments::FragmentSource;
use crate::mutations::{MutationArgument, mutation_arguments};
use crate::read_type::{Usage, read_type};
use crate::relationships::{RelationshipFields, expand};
use crate::sdl::{Argument, Declaration, FieldDef, Operation, SdlWriter};

/// Pagination and ordering arguments of the `all` query.
const PAGING_ARGUMENTS: [&str; 4] = ["LIMIT", "SKIP", "PAGE", "PAGE_SIZE"];

/// Generated output for one field.
struct FieldPlan<'e> {
    name: &'e str,
    descriptor: &'e TypeDescriptor,
    output: String,
    input: String,
    filters: Vec<FilterArgument>,
    mutations: Vec<MutationArgument>,
}

fn plan_field<'e>(name: &'e str, descriptor: &'e TypeDescriptor) -> Resolution<FieldPlan<'e>> {
    let (
        Resolution::Supported(output),
        Resolution::Supported(input),
        Resolution::Supported(filters),
        Resolution::Supported(mutations),
    ) = (
        read_type(descriptor, Usage::Output),
        read_type(descriptor, Usage::Input),
        filter_arguments(name, descriptor),
        mutation_arguments(name, descriptor),
    )
    else {
        return Resolution::Unsupported;
    };

    Resolution::Supported(FieldPlan {
        name,
        descriptor,
        output,
        input,
        filters,
        // identifiers are immutable after creation
        mutations: if name == ID_FIELD { Vec::new() } else { mutations },
    })
}

/// The generated schema of one entity, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    pub name: String,
    pub table: bool,
    pub declarations: Vec<Declaration>,
    pub queries: Vec<Operation>,
    pub mutations: Vec<Operation>,
    /// Auxiliary Query fragments, in schema source order.
    pub query_fragments: Vec<String>,
    /// Auxiliary Mutation fragments, in schema source order.
    pub mutation_fragments: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl EntitySchema {
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == name)
    }

    pub fn query(&self, name: &str) -> Option<&Operation> {
        self.queries.iter().find(|op| op.name == name)
    }

    pub fn mutation(&self, name: &str) -> Option<&Operation> {
        self.mutations.iter().find(|op| op.name == name)
    }

    /// Renders the three text blocks of this entity.
    pub fn render(&self, writer: &SdlWriter) -> RenderedEntity {
        let root_block = |ops: &[Operation], fragments: &[String]| {
            if !self.table {
                return None;
            }
            let mut parts: Vec<String> = ops.iter().map(|op| writer.operation(op)).collect();
            parts.extend(fragments.iter().cloned());
            (!parts.is_empty()).then(|| parts.join("\n\n"))
        };

        RenderedEntity {
            name: self.name.clone(),
            types: writer.declarations(&self.declarations),
            mutation: root_block(&self.mutations, &self.mutation_fragments),
            query: root_block(&self.queries, &self.query_fragments),
        }
    }
}

/// Rendered text blocks of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntity {
    pub name: String,
    /// Object and input type declarations.
    pub types: String,
    /// Mutation root fields; `None` unless storage-backed.
    pub mutation: Option<String>,
    /// Query root fields; `None` unless storage-backed.
    pub query: Option<String>,
}

impl RenderedEntity {
    /// All blocks joined by blank lines.
    #[must_use]
    pub fn to_text(&self) -> String {
        [Some(&self.types), self.mutation.as_ref(), self.query.as_ref()]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Assembles entity schemas.
pub struct SchemaAssembler<'a> {
    config: &'a CodegenConfig,
    fragments: &'a dyn FragmentSource,
}

impl<'a> SchemaAssembler<'a> {
    pub fn new(config: &'a CodegenConfig, fragments: &'a dyn FragmentSource) -> Self {
        Self { config, fragments }
    }

    /// Generates the schema of one entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is structurally invalid, or, in strict
    /// mode, if a field has an unrecognised descriptor.
    pub fn assemble(&self, entity: &EntityDefinition) -> Result<EntitySchema, CodegenError> {
        entity.validate()?;
        let name = entity.name.as_str();
        trace!(entity = name, fields = entity.fields.len(), "Assembling entity");

        let mut diagnostics = Vec::new();
        let mut plans = Vec::with_capacity(entity.fields.len());
        for (field, descriptor) in &entity.fields {
            match plan_field(field, descriptor) {
                Resolution::Supported(plan) => plans.push(plan),
                Resolution::Unsupported => {
                    let raw = match descriptor {
                        TypeDescriptor::Unsupported(raw) => raw.clone(),
                        other => other.to_string(),
                    };
                    let diagnostic = Diagnostic::unsupported(name, field, &raw);
                    if self.config.strict {
                        return Err(diagnostic.into_error());
                    }
                    warn!(entity = name, field = %field, descriptor = %descriptor, "Omitting field with unsupported type descriptor");
                    diagnostics.push(diagnostic);
                }
            }
        }

        let relationships: Vec<RelationshipFields> = entity
            .relationships
            .iter()
            .map(|(field, rel)| expand(field, rel))
            .collect();

        let filter_args: Vec<Argument> = plans
            .iter()
            .flat_map(|plan| plan.filters.iter().map(FilterArgument::to_argument))
            .collect();

        let mut declarations = vec![object_type(entity, &plans, &relationships)];
        if entity.table {
            declarations.extend(result_types(name));
        }
        declarations.push(Declaration::input(
            naming::input_type(name),
            plans
                .iter()
                .map(|plan| FieldDef::new(plan.name, plan.input.as_str()))
                .chain(relationships.iter().map(|rel| rel.input.clone()))
                .collect(),
        ));
        declarations.push(Declaration::input(
            naming::mutation_input_type(name),
            plans
                .iter()
                .flat_map(|plan| plan.mutations.iter())
                .chain(relationships.iter().map(|rel| &rel.mutation))
                .map(|arg| FieldDef::from(arg.to_argument()))
                .collect(),
        ));
        if entity.used_in_array {
            declarations.push(Declaration::input(
                naming::array_mutation_input_type(name),
                vec![
                    FieldDef::new("index", "Int"),
                    FieldDef::new("Updates", naming::mutation_input_type(name)),
                ],
            ));
        }
        declarations.push(Declaration::input(
            naming::sort_type(name),
            plans
                .iter()
                .filter(|plan| !plan.descriptor.is_json())
                .map(|plan| FieldDef::new(plan.name, "Int"))
                .collect(),
        ));
        declarations.push(Declaration::input(
            naming::filters_type(name),
            filter_args
                .iter()
                .cloned()
                .chain([or_argument(name)])
                .map(FieldDef::from)
                .collect(),
        ));

        let (mut queries, mut mutations) = (Vec::new(), Vec::new());
        let (mut query_fragments, mut mutation_fragments) = (Vec::new(), Vec::new());
        if entity.table {
            mutations = self.mutation_operations(entity, &plans);
            queries = self.query_operations(entity, filter_args);
            for source in &entity.extras.schema_sources {
                query_fragments.extend(self.fragments.query_fragment(source));
                mutation_fragments.extend(self.fragments.mutation_fragment(source));
            }
        }

        debug!(
            entity = name,
            declarations = declarations.len(),
            queries = queries.len(),
            mutations = mutations.len(),
            omitted = diagnostics.len(),
            "Entity schema assembled"
        );

        Ok(EntitySchema {
            name: entity.name.clone(),
            table: entity.table,
            declarations,
            queries,
            mutations,
            query_fragments,
            mutation_fragments,
            diagnostics,
        })
    }

    fn mutation_operations(&self, entity: &EntityDefinition, plans: &[FieldPlan<'_>]) -> Vec<Operation> {
        let name = entity.name.as_str();
        let id_type = plans
            .iter()
            .find(|plan| plan.name == ID_FIELD)
            .map_or_else(|| "String".to_string(), |plan| plan.output.clone());
        let updates = || Argument::new("Updates", naming::mutation_input_type(name));

        RootOperation::MUTATIONS
            .into_iter()
            .filter(|op| !entity.is_overridden(*op))
            .filter_map(|op| {
                let (arguments, returns) = match op {
                    RootOperation::Create => (
                        vec![Argument::new(name, naming::input_type(name))],
                        naming::mutation_result_type(name),
                    ),
                    RootOperation::Update => (
                        vec![Argument::new(ID_FIELD, id_type.as_str()), updates()],
                        naming::mutation_result_type(name),
                    ),
                    RootOperation::UpdateMany => (
                        vec![Argument::new("_ids", "[String]"), updates()],
                        naming::mutation_result_multi_type(name),
                    ),
                    RootOperation::UpdateBulk => (
                        vec![Argument::new("Match", naming::filters_type(name)), updates()],
                        naming::bulk_mutation_result_type(name),
                    ),
                    RootOperation::Delete => (
                        vec![Argument::new(ID_FIELD, "String")],
                        "Boolean".to_string(),
                    ),
                    RootOperation::All | RootOperation::Get => return None,
                };
                Some(Operation::new(op.operation_name(name), arguments, returns))
            })
            .collect()
    }

    fn query_operations(&self, entity: &EntityDefinition, filter_args: Vec<Argument>) -> Vec<Operation> {
        let name = entity.name.as_str();
        let sort = naming::sort_type(name);
        let date_formats: Vec<Argument> = entity
            .date_fields()
            .map(|field| Argument::new(format!("{field}_format"), "String"))
            .collect();
        let manual: Vec<Argument> = entity
            .manual_query_args
            .iter()
            .map(|arg| Argument::new(arg.name.as_str(), arg.type_text.as_str()))
            .collect();

        let mut all_args = filter_args;
        all_args.push(or_argument(name));
        all_args.push(Argument::new("SORT", sort.as_str()));
        all_args.push(Argument::new("SORTS", format!("[{sort}]")));
        all_args.extend(PAGING_ARGUMENTS.iter().map(|arg| Argument::new(*arg, "Int")));
        all_args.extend(date_formats.iter().cloned());
        all_args.extend(manual.iter().cloned());

        let mut get_args = vec![Argument::new(ID_FIELD, "String")];
        get_args.extend(date_formats);
        get_args.extend(manual);

        let mut queries = Vec::new();
        if !entity.is_overridden(RootOperation::All) {
            queries.push(Operation::new(
                RootOperation::All.operation_name(name),
                all_args,
                naming::query_results_type(name),
            ));
        }
        if !entity.is_overridden(RootOperation::Get) {
            queries.push(Operation::new(
                RootOperation::Get.operation_name(name),
                get_args,
                naming::single_query_result_type(name),
            ));
        }
        queries
    }
}

fn or_argument(entity: &str) -> Argument {
    Argument::new("OR", format!("[{}]", naming::filters_type(entity)))
}

fn object_type(
    entity: &EntityDefinition,
    plans: &[FieldPlan<'_>],
    relationships: &[RelationshipFields],
) -> Declaration {
    let fields = plans
        .iter()
        .map(|plan| FieldDef::new(plan.name, plan.output.as_str()))
        .chain(
            entity
                .resolved_fields
                .iter()
                .map(|(field, type_text)| FieldDef::new(field.as_str(), type_text.as_str())),
        )
        .chain(relationships.iter().map(|rel| rel.resolver.clone()))
        .collect();
    Declaration::object(entity.name.as_str(), fields)
}

fn result_types(name: &str) -> [Declaration; 5] {
    let plural = format!("{name}s");
    let list = format!("[{name}]");
    [
        Declaration::object(
            naming::query_results_type(name),
            vec![
                FieldDef::new(plural.as_str(), list.as_str()),
                FieldDef::new("Meta", naming::QUERY_RESULTS_METADATA),
            ],
        ),
        Declaration::object(
            naming::single_query_result_type(name),
            vec![FieldDef::new(name, name)],
        ),
        Declaration::object(
            naming::mutation_result_type(name),
            vec![FieldDef::new("success", "Boolean"), FieldDef::new(name, name)],
        ),
        Declaration::object(
            naming::mutation_result_multi_type(name),
            vec![
                FieldDef::new("success", "Boolean"),
                FieldDef::new(plural.as_str(), list.as_str()),
            ],
        ),
        Declaration::object(
            naming::bulk_mutation_result_type(name),
            vec![FieldDef::new("success", "Boolean")],
        ),
    ]
}
