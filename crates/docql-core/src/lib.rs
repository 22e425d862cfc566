//! # docql-core
//!
//! Entity model shared by the DocQL schema generator and its in-memory
//! backend.
//!
//! ## Modules
//!
//! - [`descriptor`] - Field type descriptors and the generator outcome type
//! - [`entity`] - Entity and relationship definitions
//! - [`catalog`] - The set of entities that form one schema
//! - [`naming`] - Derived type and operation names
//! - [`error`] - Structural model errors

pub mod catalog;
pub mod descriptor;
pub mod entity;
pub mod error;
pub mod naming;

pub use catalog::Catalog;
pub use descriptor::{ArrayKind, Resolution, ScalarKind, TypeDescriptor};
pub use entity::{
    EntityBuilder, EntityDefinition, Extras, ID_FIELD, ManualQueryArg, RelationshipDescriptor,
};
pub use error::ModelError;
pub use naming::RootOperation;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
