//! Insertion-ordered document storage.

use docql_core::Catalog;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::MatchError;
use crate::matcher::DocumentMatcher;

/// Documents of one entity, kept in insertion order.
#[derive(Debug, Clone)]
pub struct MemoryCollection {
    entity: String,
    documents: Vec<Value>,
}

impl MemoryCollection {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            documents: Vec::new(),
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn insert(&mut self, document: Value) {
        self.documents.push(document);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.documents.iter()
    }

    /// Documents accepted by `matcher`, in insertion order.
    pub fn find(&self, matcher: &DocumentMatcher) -> Vec<&Value> {
        self.documents.iter().filter(|d| matcher.matches(d)).collect()
    }

    pub fn count(&self, matcher: &DocumentMatcher) -> usize {
        self.documents.iter().filter(|d| matcher.matches(d)).count()
    }

    /// Compiles `arguments` against this collection's entity and runs it.
    pub fn query(
        &self,
        catalog: &Catalog,
        arguments: &Map<String, Value>,
    ) -> Result<Vec<&Value>, MatchError> {
        let matcher = DocumentMatcher::compile(catalog, &self.entity, arguments)?;
        let found = self.find(&matcher);
        debug!(
            entity = %self.entity,
            arguments = arguments.len(),
            matched = found.len(),
            total = self.documents.len(),
            "Filtered collection"
        );
        Ok(found)
    }
}
