//! # docql-codegen
//!
//! Compiles DocQL entity definitions into GraphQL SDL: object types, input
//! types, filter and mutation arguments, and root Query/Mutation operations.
//!
//! ## Overview
//!
//! Generation is a pure, synchronous transformation. Each field's
//! [`TypeDescriptor`](docql_core::TypeDescriptor) is run through three
//! generators (read type, filters, mutations); relationships are expanded
//! separately; the [`SchemaAssembler`] sequences the results into an IR that
//! the [`SdlWriter`] renders.
//!
//! ```ignore
//! let catalog = Catalog::from_entities([book, author])?;
//! let schema = Project::new(CodegenConfig::default()).build(&catalog, &NoFragments)?;
//! println!("{}", schema.to_sdl());
//! ```
//!
//! ## Modules
//!
//! - [`read_type`] - Field read types
//! - [`filters`] - Filter operators
//! - [`mutations`] - Mutation operators
//! - [`relationships`] - Relationship fields and sort arguments
//! - [`assembler`] - Per-entity assembly
//! - [`project`] - Multi-entity builds and the shared prelude
//! - [`fragments`] - Auxiliary schema sources
//! - [`sdl`] - IR and serializer
//! - [`config`] - Configuration options
//! - [`error`] - Errors and diagnostics

pub mod assembler;
pub mod config;
pub mod error;
pub mod filters;
pub mod fragments;
pub mod mutations;
pub mod project;
pub mod read_type;
pub mod relationships;
pub mod sdl;

pub use assembler::{EntitySchema, RenderedEntity, SchemaAssembler};
pub use config::CodegenConfig;
pub use error::{CodegenError, Diagnostic, DiagnosticKind};
pub use filters::{FilterArgument, FilterOp, filter_arguments};
pub use fragments::{AuxiliarySchemas, FragmentSource, NoFragments};
pub use mutations::{MutationArgument, MutationOp, mutation_arguments};
pub use project::{Project, ProjectSchema};
pub use read_type::{Usage, read_type};
pub use sdl::SdlWriter;

/// Result type for code generation.
pub type Result<T> = std::result::Result<T, CodegenError>;
