//! Error types for Stamp Core
//!
//! Provides error handling for:
//! - Schema errors while formatting metadata
//! - Configuration loading and validation

use std::path::PathBuf;

/// Errors while formatting a metadata value
///
/// Both variants indicate a schema that no longer matches the data. Callers
/// skip the offending field and keep the rest of the stamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Field has no descriptor in the field-info schema
    #[error("unknown field: '{0}'")]
    UnknownField(String),

    /// Value tag does not match the declared datatype
    #[error("field '{field}' expects a {expected} value, got {actual}")]
    ShapeMismatch {
        /// Field name
        field: String,
        /// Shape the descriptor requires
        expected: &'static str,
        /// Shape the value carries
        actual: &'static str,
    },
}

impl FormatError {
    /// Field the error refers to
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownField(field) | Self::ShapeMismatch { field, .. } => field,
        }
    }
}

/// Errors while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during config read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// TOML could not be parsed
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed config violates a constraint
    #[error("invalid config value: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_display() {
        let err = FormatError::UnknownField("title".to_string());
        assert_eq!(err.to_string(), "unknown field: 'title'");
        assert_eq!(err.field(), "title");
    }

    #[test]
    fn shape_mismatch_display() {
        let err = FormatError::ShapeMismatch {
            field: "created".to_string(),
            expected: "datetime",
            actual: "scalar",
        };
        assert_eq!(
            err.to_string(),
            "field 'created' expects a datetime value, got scalar"
        );
    }
}
