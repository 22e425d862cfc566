use thiserror::Error;

/// Structural errors in entity definitions.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid GraphQL name: {0}")]
    InvalidName(String),

    #[error("Field {entity}.{field} is declared both as a field and as a relationship")]
    DuplicateField { entity: String, field: String },

    #[error("Entity {0} is defined more than once")]
    DuplicateEntity(String),

    #[error("Field {entity}.{field} refers to unknown entity {target}")]
    UnknownEntity {
        entity: String,
        field: String,
        target: String,
    },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ModelError {
    /// Create a new InvalidName error
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName(name.into())
    }

    /// Create a new DuplicateField error
    pub fn duplicate_field(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::DuplicateField {
            entity: entity.into(),
            field: field.into(),
        }
    }

    /// Create a new UnknownEntity error
    pub fn unknown_entity(
        entity: impl Into<String>,
        field: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::UnknownEntity {
            entity: entity.into(),
            field: field.into(),
            target: target.into(),
        }
    }
}
