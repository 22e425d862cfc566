//! Auxiliary schema sources.
//!
//! An entity may list auxiliary schema sources whose hand-written Query and
//! Mutation fragments are spliced into the generated root blocks. Their shape
//! is opaque to the generator; a [`FragmentSource`] resolves a source
//! identifier to its pre-rendered text.

use indexmap::IndexMap;

/// Resolves auxiliary schema source identifiers to rendered fragments.
pub trait FragmentSource {
    /// The fragment to splice into the Query block, if the source has one.
    fn query_fragment(&self, source: &str) -> Option<String>;

    /// The fragment to splice into the Mutation block, if the source has one.
    fn mutation_fragment(&self, source: &str) -> Option<String>;
}

/// A source that knows no fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFragments;

impl FragmentSource for NoFragments {
    fn query_fragment(&self, _source: &str) -> Option<String> {
        None
    }

    fn mutation_fragment(&self, _source: &str) -> Option<String> {
        None
    }
}

/// The fragments contributed by one auxiliary source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuxiliaryFragment {
    pub query: Option<String>,
    pub mutation: Option<String>,
}

/// In-memory registry of auxiliary sources keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct AuxiliarySchemas {
    sources: IndexMap<String, AuxiliaryFragment>,
}

impl AuxiliarySchemas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the fragments of `source`, replacing any earlier entry.
    #[must_use]
    pub fn with_source(
        mut self,
        source: impl Into<String>,
        query: Option<&str>,
        mutation: Option<&str>,
    ) -> Self {
        self.sources.insert(
            source.into(),
            AuxiliaryFragment {
                query: query.map(str::to_string),
                mutation: mutation.map(str::to_string),
            },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl FragmentSource for AuxiliarySchemas {
    fn query_fragment(&self, source: &str) -> Option<String> {
        self.sources.get(source).and_then(|f| f.query.clone())
    }

    fn mutation_fragment(&self, source: &str) -> Option<String> {
        self.sources.get(source).and_then(|f| f.mutation.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let schemas = AuxiliarySchemas::new()
            .with_source("./bookExtras", Some("  bookStats: Int"), None)
            .with_source("./audit", None, Some("  purgeAudit: Boolean"));

        assert_eq!(schemas.len(), 2);
        assert_eq!(
            schemas.query_fragment("./bookExtras").as_deref(),
            Some("  bookStats: Int")
        );
        assert_eq!(schemas.mutation_fragment("./bookExtras"), None);
        assert_eq!(
            schemas.mutation_fragment("./audit").as_deref(),
            Some("  purgeAudit: Boolean")
        );
        assert_eq!(schemas.query_fragment("./missing"), None);
    }

    #[test]
    fn test_no_fragments() {
        assert_eq!(NoFragments.query_fragment("anything"), None);
        assert_eq!(NoFragments.mutation_fragment("anything"), None);
    }
}
