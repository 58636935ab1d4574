//! Error types for Stamp Panel
//!
//! Provides error handling for:
//! - Asset-service calls (field info, search, bulk update, messages)
//! - Stamp application

use stamp_core::ConfigError;

/// Failed call to the asset service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Field-info schema could not be retrieved
    #[error("field info request failed: {0}")]
    FieldInfo(String),

    /// Template search failed
    #[error("search failed: {0}")]
    Search(String),

    /// Bulk update was rejected or never reached the service
    #[error("bulk update failed: {0}")]
    Update(String),

    /// Message catalogue could not be loaded
    #[error("loading messages failed: {0}")]
    Messages(String),
}

/// Stamp panel error
#[derive(Debug, thiserror::Error)]
pub enum StampError {
    /// Asset service error
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Template id is not in the current registry
    #[error("unknown stamp template: {0}")]
    UnknownTemplate(String),
}

impl StampError {
    /// Check if re-triggering the action may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Api(_))
    }
}

/// Result type alias for panel operations
pub type StampResult<T> = Result<T, StampError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = ApiError::Search("timeout".to_string());
        assert_eq!(err.to_string(), "search failed: timeout");
    }

    #[test]
    fn error_conversions() {
        let err: StampError = ApiError::Update("503".to_string()).into();
        assert!(matches!(err, StampError::Api(ApiError::Update(_))));
        assert!(err.is_retryable());
        assert!(!StampError::UnknownTemplate("t1".to_string()).is_retryable());

        let err: StampError = ConfigError::Invalid("template_extension is empty".to_string()).into();
        assert!(matches!(err, StampError::Config(ConfigError::Invalid(_))));
        assert!(!err.is_retryable());
    }
}
