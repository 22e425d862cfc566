//! Errors raised while compiling filter arguments.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Unknown filter argument {argument} for {entity}")]
    UnknownArgument { entity: String, argument: String },

    #[error("Invalid value for {argument}: expected {expected}")]
    InvalidValue { argument: String, expected: String },

    #[error("Invalid regular expression for {argument}: {source}")]
    InvalidRegex {
        argument: String,
        #[source]
        source: regex::Error,
    },
}

impl MatchError {
    pub fn unknown_argument(entity: &str, argument: &str) -> Self {
        Self::UnknownArgument {
            entity: entity.to_string(),
            argument: argument.to_string(),
        }
    }

    pub fn invalid_value(argument: &str, expected: impl Into<String>) -> Self {
        Self::InvalidValue {
            argument: argument.to_string(),
            expected: expected.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MatchError::unknown_argument("Book", "title_like").to_string(),
            "Unknown filter argument title_like for Book"
        );
        assert_eq!(
            MatchError::invalid_value("pages_lt", "Int").to_string(),
            "Invalid value for pages_lt: expected Int"
        );
    }
}
