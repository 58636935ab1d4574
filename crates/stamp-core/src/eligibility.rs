//! Field eligibility
//!
//! Derives the set of fields a stamp may write from the field-info schema.

use crate::types::FieldInfo;
use std::collections::HashSet;

/// Names of fields that may be stamped
///
/// Every name is declared in the [`FieldInfo`] it was resolved from. An empty
/// set means stamping is impossible for this session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibleFields {
    names: HashSet<String>,
}

impl EligibleFields {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check membership
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of eligible fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if nothing can be stamped
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over field names (unordered)
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Resolve the fields eligible for stamping
///
/// A field qualifies iff it is declared in `field_info`, is not listed in
/// `ignored`, and is editable.
#[must_use]
pub fn resolve_eligible_fields<S: AsRef<str>>(field_info: &FieldInfo, ignored: &[S]) -> EligibleFields {
    let names = field_info
        .iter()
        .filter(|(name, _)| !ignored.iter().any(|i| i.as_ref() == name.as_str()))
        .filter(|(_, descriptor)| descriptor.editable)
        .map(|(name, _)| name.clone())
        .collect();
    EligibleFields { names }
}
