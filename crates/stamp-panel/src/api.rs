//! External collaborators
//!
//! The asset service and the hosting application are reached only through
//! these traits; the session never owns any wire detail.

use crate::error::ApiError;
use crate::messages::Messages;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stamp_core::{Asset, FieldInfo, StampConfig, UpdatePayload};

/// Search request sent to the asset service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query expression
    pub query: String,
    /// Field to sort ascending by
    pub sort: String,
    /// Maximum number of hits
    pub num: usize,
}

impl SearchRequest {
    /// Search selecting all stamp templates, sorted by filename
    #[must_use]
    pub fn templates(config: &StampConfig) -> Self {
        Self {
            query: config.template_query(),
            sort: config.sort_field.clone(),
            num: config.max_search_hits,
        }
    }
}

/// Asset service client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetsApi: Send + Sync {
    /// Fetch the field-info schema
    async fn field_info(&self) -> Result<FieldInfo, ApiError>;

    /// Search assets
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Asset>, ApiError>;

    /// Apply a payload to every asset matched by `locator`
    async fn update_bulk(&self, locator: &str, payload: &UpdatePayload) -> Result<(), ApiError>;

    /// Load the localisation message catalogue
    async fn load_messages(&self) -> Result<Messages, ApiError>;

    /// Build the locator expression for a selection
    fn query_for_selection(&self, selection: &[Asset]) -> String {
        stamp_core::query_for_selection(selection)
    }
}

/// Hosting application
///
/// Owns the selection; the session reads it fresh on every use.
#[cfg_attr(test, mockall::automock)]
pub trait HostContext: Send + Sync {
    /// Point-in-time snapshot of the active selection
    fn active_selection(&self) -> Vec<Asset>;
}

/// Notification delivered by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Active selection changed
    SelectionChanged,
    /// Templates should be searched again
    Reload,
    /// User clicked a stamp
    StampClicked(String),
    /// Panel is being torn down
    Teardown,
}
