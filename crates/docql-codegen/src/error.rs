//! Error and diagnostic types for schema generation.

use std::fmt;

use docql_core::ModelError;
use thiserror::Error;

/// Errors that stop schema generation.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Unsupported type descriptor for {entity}.{field}: {raw}")]
    UnsupportedDescriptor {
        entity: String,
        field: String,
        raw: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CodegenError {
    /// Create a new Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// What a diagnostic reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The field's descriptor was not recognised; it was left out of the
    /// object, input, filter and mutation types.
    UnsupportedDescriptor { raw: String },
}

/// A non-fatal finding produced while generating an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub entity: String,
    pub field: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn unsupported(entity: &str, field: &str, raw: &str) -> Self {
        Self {
            entity: entity.to_string(),
            field: field.to_string(),
            kind: DiagnosticKind::UnsupportedDescriptor {
                raw: raw.to_string(),
            },
        }
    }

    /// Converts the diagnostic into the error raised in strict mode.
    #[must_use]
    pub fn into_error(self) -> CodegenError {
        match self.kind {
            DiagnosticKind::UnsupportedDescriptor { raw } => CodegenError::UnsupportedDescriptor {
                entity: self.entity,
                field: self.field,
                raw,
            },
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnsupportedDescriptor { raw } => write!(
                f,
                "{}.{}: unsupported type descriptor {raw}, field omitted",
                self.entity, self.field
            ),
        }
    }
}
