//! # docql-memory
//!
//! In-memory reference semantics for the filter arguments generated by
//! `docql-codegen`. Used to pin down what each operator means without a
//! document database.
//!
//! ## Modules
//!
//! - [`matcher`] - Compiling and evaluating `<Name>Filters` arguments
//! - [`collection`] - Insertion-ordered document storage
//! - [`error`] - Compile errors

pub mod collection;
pub mod error;
pub mod matcher;

pub use collection::MemoryCollection;
pub use error::MatchError;
pub use matcher::DocumentMatcher;

/// Result type for filter compilation.
pub type Result<T> = std::result::Result<T, MatchError>;
