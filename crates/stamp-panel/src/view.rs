//! Render model for the presentation layer
//!
//! Turns the registry into labelled, display-formatted cards. A field that
//! fails to format is dropped from its card; the card itself is kept.

use crate::messages::Messages;
use serde::{Deserialize, Serialize};
use stamp_core::{MetadataFormatter, PanelState, StampConfig, StampRegistry, StampTemplate};

/// A metadata field ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedField {
    /// Field name
    pub name: String,
    /// Localised label
    pub label: String,
    /// Display-formatted value
    pub value: String,
}

/// One stamp template as shown in the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampCard {
    /// Template id, passed back on click
    pub id: String,
    /// Template display name
    pub display_name: String,
    /// Fields the stamp writes
    pub fields: Vec<RenderedField>,
}

/// Everything the presentation layer needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelView {
    /// Visible panel, `None` before the first evaluation
    pub state: Option<PanelState>,
    /// Stamps in registry order
    pub stamps: Vec<StampCard>,
}

/// Render a single template
#[must_use]
pub fn render_card(
    template: &StampTemplate,
    formatter: &MetadataFormatter<'_>,
    messages: &Messages,
    config: &StampConfig,
) -> StampCard {
    let fields = template
        .metadata
        .iter()
        .filter_map(|(name, value)| match formatter.format_for_display(name, value) {
            Ok(value) => Some(RenderedField {
                name: name.clone(),
                label: messages.get_or(&config.label_key(name), name),
                value,
            }),
            Err(e) => {
                tracing::warn!(template = %template.id, error = %e, "skipping field in stamp view");
                None
            }
        })
        .collect();

    StampCard {
        id: template.id.clone(),
        display_name: template.display_name.clone(),
        fields,
    }
}

/// Render every template in registry order
#[must_use]
pub fn render_cards(
    registry: &StampRegistry,
    formatter: &MetadataFormatter<'_>,
    messages: &Messages,
    config: &StampConfig,
) -> Vec<StampCard> {
    registry
        .iter()
        .map(|template| render_card(template, formatter, messages, config))
        .collect()
}
