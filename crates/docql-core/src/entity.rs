//! Entity definitions consumed by the schema generator.
//!
//! An [`EntityDefinition`] is one schema-generation unit: its scalar and
//! nested fields, its relationships to other entities, computed fields, extra
//! query arguments, and the knobs that decide which root operations exist.
//!
//! Definitions are built either with [`EntityBuilder`] or decoded with serde:
//!
//! ```json
//! {
//!   "name": "Book",
//!   "table": true,
//!   "fields": { "title": "String", "editions": "IntArray" },
//!   "relationships": { "subjects": { "target": "Subject", "isArray": true } },
//!   "manualQueryArgs": [{ "name": "ManualArg", "type": "String" }]
//! }
//! ```

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::descriptor::TypeDescriptor;
use crate::error::ModelError;
use crate::naming::{RootOperation, is_valid_graphql_name};

/// Name of the identifier field of storage-backed entities.
pub const ID_FIELD: &str = "_id";

/// A relationship to another entity, resolved by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipDescriptor {
    /// Name of the related entity.
    pub target: String,
    /// Whether the relationship holds many targets.
    #[serde(default)]
    pub is_array: bool,
}

impl RelationshipDescriptor {
    pub fn one(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            is_array: false,
        }
    }

    pub fn many(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            is_array: true,
        }
    }
}

/// An argument injected verbatim into the `all` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualQueryArg {
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
}

/// Extension points supplied alongside the entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extras {
    /// Root operation names to suppress (a hand-written replacement exists).
    #[serde(default)]
    pub overrides: BTreeSet<String>,
    /// Auxiliary schema sources spliced into the Query and Mutation blocks.
    #[serde(default)]
    pub schema_sources: Vec<String>,
}

/// One entity of the generated schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "EntityDocument")]
pub struct EntityDefinition {
    pub name: String,
    pub fields: IndexMap<String, TypeDescriptor>,
    pub relationships: IndexMap<String, RelationshipDescriptor>,
    pub resolved_fields: IndexMap<String, String>,
    pub manual_query_args: Vec<ManualQueryArg>,
    pub extras: Extras,
    /// Storage-backed: enables result wrappers and root operations.
    pub table: bool,
    /// Used as an array target elsewhere: enables the array mutation input.
    pub used_in_array: bool,
}

impl EntityDefinition {
    /// Starts building an entity named `name`.
    pub fn builder(name: impl Into<String>) -> EntityBuilder {
        EntityBuilder::new(name)
    }

    /// Checks names and that fields and relationships do not overlap.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !is_valid_graphql_name(&self.name) {
            return Err(ModelError::invalid_name(&self.name));
        }

        let declared = self
            .fields
            .keys()
            .chain(self.relationships.keys())
            .chain(self.resolved_fields.keys());
        for field in declared {
            if !is_valid_graphql_name(field) {
                return Err(ModelError::invalid_name(format!("{}.{field}", self.name)));
            }
        }

        if let Some(field) = self
            .relationships
            .keys()
            .find(|name| self.fields.contains_key(*name))
        {
            return Err(ModelError::duplicate_field(&self.name, field));
        }

        Ok(())
    }

    /// Names of fields declared as dates, in declaration order.
    pub fn date_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, descriptor)| descriptor.is_date())
            .map(|(name, _)| name.as_str())
    }

    /// `(field, target)` pairs for every field or relationship naming another entity.
    pub fn referenced_entities(&self) -> impl Iterator<Item = (&str, &str)> {
        let from_fields = self
            .fields
            .iter()
            .filter_map(|(name, descriptor)| descriptor.target().map(|t| (name.as_str(), t)));
        let from_relationships = self
            .relationships
            .iter()
            .map(|(name, rel)| (name.as_str(), rel.target.as_str()));
        from_fields.chain(from_relationships)
    }

    /// Whether the root operation has been overridden by hand-written code.
    #[must_use]
    pub fn is_overridden(&self, operation: RootOperation) -> bool {
        self.extras
            .overrides
            .contains(&operation.operation_name(&self.name))
    }
}

/// Fluent builder for [`EntityDefinition`].
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    entity: EntityDefinition,
}

impl EntityBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            entity: EntityDefinition {
                name: name.into(),
                fields: IndexMap::new(),
                relationships: IndexMap::new(),
                resolved_fields: IndexMap::new(),
                manual_query_args: Vec::new(),
                extras: Extras::default(),
                table: false,
                used_in_array: false,
            },
        }
    }

    pub fn field(mut self, name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        self.entity.fields.insert(name.into(), descriptor);
        self
    }

    pub fn relationship(mut self, name: impl Into<String>, rel: RelationshipDescriptor) -> Self {
        self.entity.relationships.insert(name.into(), rel);
        self
    }

    pub fn resolved_field(mut self, name: impl Into<String>, type_text: impl Into<String>) -> Self {
        self.entity
            .resolved_fields
            .insert(name.into(), type_text.into());
        self
    }

    pub fn manual_query_arg(
        mut self,
        name: impl Into<String>,
        type_text: impl Into<String>,
    ) -> Self {
        self.entity.manual_query_args.push(ManualQueryArg {
            name: name.into(),
            type_text: type_text.into(),
        });
        self
    }

    /// Suppresses the named root operation.
    pub fn override_operation(mut self, operation_name: impl Into<String>) -> Self {
        self.entity.extras.overrides.insert(operation_name.into());
        self
    }

    pub fn schema_source(mut self, source: impl Into<String>) -> Self {
        self.entity.extras.schema_sources.push(source.into());
        self
    }

    pub fn table(mut self, table: bool) -> Self {
        self.entity.table = table;
        self
    }

    pub fn used_in_array(mut self, used_in_array: bool) -> Self {
        self.entity.used_in_array = used_in_array;
        self
    }

    /// Finishes the entity. Storage-backed entities always get an `_id`
    /// field, placed first when it was not declared.
    pub fn build(mut self) -> EntityDefinition {
        if self.entity.table && !self.entity.fields.contains_key(ID_FIELD) {
            self.entity
                .fields
                .shift_insert(0, ID_FIELD.to_string(), TypeDescriptor::ID);
        }
        self.entity
    }
}

/// Serde shape of an entity; every section is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntityDocument {
    name: String,
    #[serde(default)]
    fields: IndexMap<String, TypeDescriptor>,
    #[serde(default)]
    relationships: IndexMap<String, RelationshipDescriptor>,
    #[serde(default)]
    resolved_fields: IndexMap<String, String>,
    #[serde(default)]
    manual_query_args: Vec<ManualQueryArg>,
    #[serde(default)]
    extras: Extras,
    #[serde(default)]
    table: bool,
    #[serde(default)]
    used_in_array: bool,
}

impl From<EntityDocument> for EntityDefinition {
    fn from(doc: EntityDocument) -> Self {
        EntityBuilder {
            entity: Self {
                name: doc.name,
                fields: doc.fields,
                relationships: doc.relationships,
                resolved_fields: doc.resolved_fields,
                manual_query_args: doc.manual_query_args,
                extras: doc.extras,
                table: doc.table,
                used_in_array: doc.used_in_array,
            },
        }
        .build()
    }
}
