//! Code generation configuration.
//!
//! Configuration can be specified in TOML under a `[codegen]` section or as a
//! standalone document.
//!
//! # Example Configuration
//!
//! ```toml
//! [codegen]
//! strict = false
//! indent = "  "
//! emit_prelude = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CodegenError;

/// Schema generation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Fail on unrecognised type descriptors instead of omitting the field.
    /// Default: false
    #[serde(default = "default_strict")]
    pub strict: bool,

    /// Indentation used for fields and operations.
    /// Default: two spaces
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Emit the shared prelude (JSON scalar, pagination metadata and
    /// array-update inputs) ahead of a project's SDL.
    /// Default: true
    #[serde(default = "default_emit_prelude")]
    pub emit_prelude: bool,
}

fn default_strict() -> bool {
    false
}

fn default_indent() -> String {
    "  ".to_string()
}

fn default_emit_prelude() -> bool {
    true
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            strict: default_strict(),
            indent: default_indent(),
            emit_prelude: default_emit_prelude(),
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    codegen: Option<CodegenConfig>,
}

impl CodegenConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the indent is empty or contains non-whitespace.
    pub fn validate(&self) -> Result<(), CodegenError> {
        if self.indent.is_empty() {
            return Err(CodegenError::configuration("codegen.indent must not be empty"));
        }
        if !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(CodegenError::configuration(
                "codegen.indent must contain only spaces or tabs",
            ));
        }
        Ok(())
    }

    /// Parses configuration from TOML, accepting either a `[codegen]` table or
    /// top-level keys.
    pub fn from_toml_str(content: &str) -> Result<Self, CodegenError> {
        let config = match toml::from_str::<ConfigFile>(content)? {
            ConfigFile {
                codegen: Some(config),
            } => config,
            ConfigFile { codegen: None } => toml::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CodegenError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading codegen configuration");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = CodegenConfig::default();
        assert!(!config.strict);
        assert_eq!(config.indent, "  ");
        assert!(config.emit_prelude);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_section_parsing() {
        let toml = r#"
            [codegen]
            strict = true
            indent = "    "
        "#;

        let config = CodegenConfig::from_toml_str(toml).unwrap();
        assert!(config.strict);
        assert_eq!(config.indent, "    ");
        assert!(config.emit_prelude);
    }

    #[test]
    fn test_top_level_parsing() {
        let config = CodegenConfig::from_toml_str("emit_prelude = false").unwrap();
        assert!(!config.emit_prelude);
        assert!(!config.strict);
    }

    #[test]
    fn test_invalid_indent() {
        let err = CodegenConfig::from_toml_str("indent = \"--\"").unwrap_err();
        assert!(matches!(err, CodegenError::Configuration(_)));

        let config = CodegenConfig {
            indent: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[codegen]\nstrict = true").unwrap();

        let config = CodegenConfig::from_file(file.path()).unwrap();
        assert!(config.strict);
    }

    #[test]
    fn test_missing_file() {
        let err = CodegenConfig::from_file("/nonexistent/docql.toml").unwrap_err();
        assert!(matches!(err, CodegenError::Io(_)));
    }
}
