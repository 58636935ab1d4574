//! Selection filtering
//!
//! Keeps stamp templates out of the set of assets a stamp is applied to.

use crate::types::Asset;

/// Narrows host selections to stampable assets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionFilter {
    suffix: String,
}

impl SelectionFilter {
    /// Create filter for a template filename suffix (e.g. `.stamp`)
    #[inline]
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Check if an asset is itself a stamp template
    ///
    /// Assets without a filename cannot be identified as templates.
    #[inline]
    #[must_use]
    pub fn is_template(&self, asset: &Asset) -> bool {
        asset
            .filename()
            .is_some_and(|name| name.ends_with(&self.suffix))
    }

    /// Drop templates from a selection, preserving order
    #[must_use]
    pub fn filter(&self, selection: &[Asset]) -> Vec<Asset> {
        selection
            .iter()
            .filter(|asset| !self.is_template(asset))
            .cloned()
            .collect()
    }
}

impl Default for SelectionFilter {
    fn default() -> Self {
        Self::new(".stamp")
    }
}
