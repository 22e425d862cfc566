//! Multi-entity schema builds.
//!
//! A [`Project`] validates a [`Catalog`], generates every entity on its own,
//! and joins the results into one SDL document:
//!
//! 1. The shared prelude (JSON scalar, pagination metadata, array updates)
//! 2. Every entity's type and input declarations, in catalog order
//! 3. `type Query { ... }` and `type Mutation { ... }` wrapping the root
//!    fragments of every storage-backed entity

use std::borrow::Cow;

use docql_core::{Catalog, naming};
use tracing::debug;

use crate::assembler::{EntitySchema, RenderedEntity, SchemaAssembler};
use crate::config::CodegenConfig;
use crate::error::{CodegenError, Diagnostic};
use crate::fragments::FragmentSource;
use crate::sdl::{Declaration, FieldDef, SdlWriter};

/// Builds the schema of every entity in a catalog.
#[derive(Debug, Clone, Default)]
pub struct Project {
    config: CodegenConfig,
}

impl Project {
    #[must_use]
    pub fn new(config: CodegenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Generates all entities of `catalog`.
    ///
    /// Entities used as the element type of an embedded object array are
    /// generated with their array mutation input even when not flagged.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid configuration, structural catalog errors
    /// (duplicate names, unknown targets), or, in strict mode, unsupported
    /// descriptors.
    pub fn build(
        &self,
        catalog: &Catalog,
        fragments: &dyn FragmentSource,
    ) -> Result<ProjectSchema, CodegenError> {
        self.config.validate()?;
        catalog.validate()?;

        let array_targets = catalog.array_targets();
        let assembler = SchemaAssembler::new(&self.config, fragments);

        let entities = catalog
            .iter()
            .map(|entity| {
                let entity = if !entity.used_in_array && array_targets.contains(entity.name.as_str()) {
                    let mut marked = entity.clone();
                    marked.used_in_array = true;
                    Cow::Owned(marked)
                } else {
                    Cow::Borrowed(entity)
                };
                assembler.assemble(&entity)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(entities = entities.len(), "Project schema generated");

        Ok(ProjectSchema {
            entities,
            writer: SdlWriter::new(self.config.indent.as_str()),
            emit_prelude: self.config.emit_prelude,
        })
    }
}

/// The generated schema of a whole project.
#[derive(Debug, Clone)]
pub struct ProjectSchema {
    entities: Vec<EntitySchema>,
    writer: SdlWriter,
    emit_prelude: bool,
}

impl ProjectSchema {
    pub fn entities(&self) -> &[EntitySchema] {
        &self.entities
    }

    pub fn entity(&self, name: &str) -> Option<&EntitySchema> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Diagnostics of every entity, in catalog order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entities.iter().flat_map(|e| e.diagnostics.iter())
    }

    /// Rendered blocks of every entity, in catalog order.
    pub fn rendered(&self) -> Vec<RenderedEntity> {
        self.entities
            .iter()
            .map(|e| e.render(&self.writer))
            .collect()
    }

    /// The complete SDL document.
    pub fn to_sdl(&self) -> String {
        let rendered = self.rendered();
        let mut blocks = Vec::new();

        if self.emit_prelude {
            blocks.push(prelude(&self.writer));
        }
        blocks.extend(rendered.iter().map(|r| r.types.clone()));

        let queries: Vec<String> = rendered.iter().filter_map(|r| r.query.clone()).collect();
        if !queries.is_empty() {
            blocks.push(self.writer.root_type("Query", &queries));
        }
        let mutations: Vec<String> = rendered.iter().filter_map(|r| r.mutation.clone()).collect();
        if !mutations.is_empty() {
            blocks.push(self.writer.root_type("Mutation", &mutations));
        }

        blocks.join("\n\n")
    }
}

/// Types referenced by generated declarations but owned by no entity.
pub fn prelude(writer: &SdlWriter) -> String {
    let array_update = |name: &str, elem: &str| {
        Declaration::input(
            name,
            vec![FieldDef::new("index", "Int"), FieldDef::new("value", elem)],
        )
    };

    let declarations = [
        Declaration::object(
            naming::QUERY_RESULTS_METADATA,
            vec![FieldDef::new("count", "Int")],
        ),
        array_update("StringArrayUpdate", "String"),
        array_update("IntArrayUpdate", "Int"),
        array_update("FloatArrayUpdate", "Float"),
    ];

    format!("scalar JSON\n\n{}", writer.declarations(&declarations))
}
