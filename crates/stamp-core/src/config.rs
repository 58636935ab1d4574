//! Stamp panel configuration
//!
//! Loaded from TOML; every key is optional and falls back to the defaults
//! the panel ships with.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fields that are never stamped, regardless of editability
pub const DEFAULT_IGNORED_FIELDS: [&str; 3] = ["filename", "previewState", "thumbnailState"];

/// Stamp panel configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StampConfig {
    /// Extension marking an asset as a stamp template (without the dot)
    pub template_extension: String,
    /// Field template searches are sorted by
    pub sort_field: String,
    /// Fields excluded from stamping
    pub ignored_fields: Vec<String>,
    /// Field holding a template's display name
    pub display_name_field: String,
    /// Message-catalogue prefix for field labels
    pub label_key_prefix: String,
    /// Upper bound on template hits per search
    pub max_search_hits: usize,
}

impl StampConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With template extension
    #[inline]
    #[must_use]
    pub fn with_template_extension(mut self, extension: impl Into<String>) -> Self {
        self.template_extension = extension.into();
        self
    }

    /// With ignored fields
    #[must_use]
    pub fn with_ignored_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// - `ConfigError::Parse` on malformed TOML
    /// - `ConfigError::Invalid` if a value violates a constraint
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - otherwise as [`StampConfig::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Check value constraints
    ///
    /// # Errors
    /// `ConfigError::Invalid` on an empty extension or sort field
    pub fn validate(&self) -> Result<(), ConfigError> {
        let extension = self.template_extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(ConfigError::Invalid(
                "template_extension must not be empty".to_string(),
            ));
        }
        if self.sort_field.is_empty() {
            return Err(ConfigError::Invalid("sort_field must not be empty".to_string()));
        }
        Ok(())
    }

    /// Search query selecting template assets
    #[must_use]
    pub fn template_query(&self) -> String {
        format!("extension:{}", self.template_extension.trim_start_matches('.'))
    }

    /// Filename suffix identifying template assets
    #[must_use]
    pub fn template_suffix(&self) -> String {
        format!(".{}", self.template_extension.trim_start_matches('.'))
    }

    /// Message key of a field label
    #[must_use]
    pub fn label_key(&self, field: &str) -> String {
        format!("{}{field}", self.label_key_prefix)
    }
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            template_extension: "stamp".to_string(),
            sort_field: "filename".to_string(),
            ignored_fields: DEFAULT_IGNORED_FIELDS.iter().map(ToString::to_string).collect(),
            display_name_field: "baseName".to_string(),
            label_key_prefix: "field_label.".to_string(),
            max_search_hits: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = StampConfig::default();
        assert_eq!(config.template_query(), "extension:stamp");
        assert_eq!(config.template_suffix(), ".stamp");
        assert_eq!(config.label_key("title"), "field_label.title");
        assert_eq!(config.ignored_fields.len(), 3);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = StampConfig::from_toml_str("template_extension = \".tpl\"\n").unwrap();
        assert_eq!(config.template_suffix(), ".tpl");
        assert_eq!(config.template_query(), "extension:tpl");
        assert_eq!(config.sort_field, "filename");
    }

    #[test]
    fn empty_extension_rejected() {
        let err = StampConfig::from_toml_str("template_extension = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_rejected() {
        let err = StampConfig::from_toml_str("template_extension = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ignored_fields = [\"filename\"]").unwrap();
        let config = StampConfig::load(file.path()).unwrap();
        assert_eq!(config.ignored_fields, vec!["filename".to_string()]);
    }

    #[test]
    fn load_missing_file() {
        let err = StampConfig::load("/nonexistent/stamp.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
