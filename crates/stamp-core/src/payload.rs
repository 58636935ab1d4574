//! Bulk-update payloads
//!
//! Converts a stamp template into the request the bulk-update service
//! expects: a locator naming the target assets plus the encoded metadata.

use crate::format::MetadataFormatter;
use crate::types::{Asset, StampTemplate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field name → encoded value, in template order
pub type UpdatePayload = IndexMap<String, String>;

/// A single bulk-update request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    /// Query expression matching exactly the target assets
    pub locator: String,
    /// Metadata to write
    pub payload: UpdatePayload,
}

/// Encode every field of a template for update
///
/// Fields that fail to format are logged and omitted; the rest of the
/// template is still stamped.
#[must_use]
pub fn build_update_payload(formatter: &MetadataFormatter<'_>, template: &StampTemplate) -> UpdatePayload {
    template
        .metadata
        .iter()
        .filter_map(|(field, value)| match formatter.format_for_update(field, value) {
            Ok(encoded) => Some((field.clone(), encoded)),
            Err(e) => {
                tracing::warn!(template = %template.id, error = %e, "skipping field in update payload");
                None
            }
        })
        .collect()
}

/// Prepare the request stamping `template` onto `selection`
///
/// Returns `None` when there is nothing to do: an empty selection, or a
/// template none of whose fields could be encoded. `locate` turns the
/// selection into the service's locator expression.
pub fn prepare_stamp<F>(
    formatter: &MetadataFormatter<'_>,
    template: &StampTemplate,
    selection: &[Asset],
    locate: F,
) -> Option<UpdateRequest>
where
    F: FnOnce(&[Asset]) -> String,
{
    if selection.is_empty() {
        return None;
    }

    let payload = build_update_payload(formatter, template);
    if payload.is_empty() {
        return None;
    }

    Some(UpdateRequest {
        locator: locate(selection),
        payload,
    })
}

/// Locator matching exactly the given assets by id
#[must_use]
pub fn query_for_selection(selection: &[Asset]) -> String {
    selection
        .iter()
        .map(|asset| format!("id:{}", asset.id))
        .collect::<Vec<_>>()
        .join(" OR ")
}
