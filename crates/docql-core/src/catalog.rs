//! Ordered collection of the entities that make up one schema.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::descriptor::TypeDescriptor;
use crate::entity::EntityDefinition;
use crate::error::ModelError;

/// All entities of a schema, keyed by name, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entities: IndexMap<String, EntityDefinition>,
}

impl Catalog {
    /// Creates a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from entities, rejecting duplicate names.
    pub fn from_entities(
        entities: impl IntoIterator<Item = EntityDefinition>,
    ) -> Result<Self, ModelError> {
        let mut catalog = Self::new();
        for entity in entities {
            catalog.insert(entity)?;
        }
        Ok(catalog)
    }

    /// Adds an entity. Names must be unique across the schema.
    pub fn insert(&mut self, entity: EntityDefinition) -> Result<(), ModelError> {
        if self.entities.contains_key(&entity.name) {
            return Err(ModelError::DuplicateEntity(entity.name));
        }
        trace!(entity = %entity.name, "Registering entity");
        self.entities.insert(entity.name.clone(), entity);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&EntityDefinition> {
        self.entities.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityDefinition> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Validates every entity and every cross-entity reference.
    pub fn validate(&self) -> Result<(), ModelError> {
        for entity in self.entities.values() {
            entity.validate()?;
            for (field, target) in entity.referenced_entities() {
                if !self.contains(target) {
                    return Err(ModelError::unknown_entity(&entity.name, field, target));
                }
            }
        }
        debug!(count = self.entities.len(), "Catalog validated");
        Ok(())
    }

    /// Entities that appear as the element type of an embedded object array.
    pub fn array_targets(&self) -> BTreeSet<&str> {
        self.entities
            .values()
            .flat_map(|entity| entity.fields.values())
            .filter_map(|descriptor| match descriptor {
                TypeDescriptor::ArrayOfObjectRef(target) => Some(target.as_str()),
                _ => None,
            })
            .collect()
    }
}
