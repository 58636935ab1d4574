//! Panel visibility state machine
//!
//! The visible panel is a pure function of two snapshots: whether any stamp
//! template is registered and whether the filtered selection is non-empty.
//! No history is kept, so evaluation is idempotent.

use crate::registry::StampRegistry;
use crate::types::Asset;
use serde::{Deserialize, Serialize};

/// What the panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelState {
    /// No stamp template is available
    NoStamps,
    /// Stamps exist but nothing stampable is selected
    NoSelection,
    /// Stamps can be applied to the selection
    StampsPanel,
}

impl PanelState {
    /// Resolve from the two input flags
    ///
    /// An empty registry wins over an empty selection.
    #[inline]
    #[must_use]
    pub fn from_flags(has_stamps: bool, has_selection: bool) -> Self {
        match (has_stamps, has_selection) {
            (false, _) => Self::NoStamps,
            (true, false) => Self::NoSelection,
            (true, true) => Self::StampsPanel,
        }
    }

    /// Resolve from the registry and an already filtered selection
    #[inline]
    #[must_use]
    pub fn evaluate(registry: &StampRegistry, filtered_selection: &[Asset]) -> Self {
        Self::from_flags(!registry.is_empty(), !filtered_selection.is_empty())
    }

    /// Body class the panel page uses for this state
    #[inline]
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::NoStamps => "no-stamps",
            Self::NoSelection => "no-selection",
            Self::StampsPanel => "stamps-panel",
        }
    }

    /// Check if stamps may be applied
    #[inline]
    #[must_use]
    pub fn can_stamp(&self) -> bool {
        matches!(self, Self::StampsPanel)
    }
}

impl std::fmt::Display for PanelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_class())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truth_table() {
        assert_eq!(PanelState::from_flags(false, false), PanelState::NoStamps);
        assert_eq!(PanelState::from_flags(false, true), PanelState::NoStamps);
        assert_eq!(PanelState::from_flags(true, false), PanelState::NoSelection);
        assert_eq!(PanelState::from_flags(true, true), PanelState::StampsPanel);
    }

    #[test]
    fn empty_registry_is_no_stamps() {
        let state = PanelState::evaluate(&StampRegistry::new(), &[Asset::new("a")]);
        assert_eq!(state, PanelState::NoStamps);
        assert!(!state.can_stamp());
    }

    #[test]
    fn css_classes() {
        assert_eq!(PanelState::NoStamps.to_string(), "no-stamps");
        assert_eq!(PanelState::NoSelection.css_class(), "no-selection");
        assert_eq!(PanelState::StampsPanel.css_class(), "stamps-panel");
    }

    #[test]
    fn serializes_kebab_case() {
        let json = serde_json::to_string(&PanelState::StampsPanel).unwrap();
        assert_eq!(json, "\"stamps-panel\"");
    }
}
