//! Stamp template registry
//!
//! Provides [`StampRegistry`], the ordered map of template id to the
//! metadata each template can stamp. Rebuilt wholesale from every search;
//! never patched in place.

use crate::eligibility::EligibleFields;
use crate::types::{Asset, Metadata, StampTemplate};
use indexmap::IndexMap;

/// Field holding a template's display name unless configured otherwise
pub const DEFAULT_DISPLAY_NAME_FIELD: &str = "baseName";

/// Registry of stamp templates, in search-result order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StampRegistry {
    templates: IndexMap<String, StampTemplate>,
}

impl StampRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from template search hits
    ///
    /// Hits without any eligible field are dropped. Iteration order follows
    /// `hits`; a repeated id keeps its first position and its last metadata.
    #[must_use]
    pub fn build(hits: &[Asset], eligible: &EligibleFields, display_name_field: &str) -> Self {
        let mut templates = IndexMap::with_capacity(hits.len());

        for hit in hits {
            let Some(metadata) = stamp_metadata(hit, eligible) else {
                tracing::debug!(id = %hit.id, "template has no eligible fields, skipping");
                continue;
            };
            let template = StampTemplate {
                id: hit.id.clone(),
                display_name: hit.display_name(display_name_field).to_string(),
                metadata,
            };
            if templates.insert(hit.id.clone(), template).is_some() {
                tracing::warn!(id = %hit.id, "duplicate template id in search results");
            }
        }

        Self { templates }
    }

    /// Get template by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&StampTemplate> {
        self.templates.get(id)
    }

    /// Check if template exists
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// Number of templates
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if no template can be stamped
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate templates in render order
    pub fn iter(&self) -> impl Iterator<Item = &StampTemplate> {
        self.templates.values()
    }

    /// Template ids in render order
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }
}

/// Build a registry using the default display-name field
#[must_use]
pub fn build_registry(hits: &[Asset], eligible: &EligibleFields) -> StampRegistry {
    StampRegistry::build(hits, eligible, DEFAULT_DISPLAY_NAME_FIELD)
}

/// Eligible subset of a hit's metadata, `None` when empty
///
/// Only fields the hit actually carries are included.
#[must_use]
pub fn stamp_metadata(hit: &Asset, eligible: &EligibleFields) -> Option<Metadata> {
    let metadata: Metadata = hit
        .metadata
        .iter()
        .filter(|(name, _)| eligible.contains(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    (!metadata.is_empty()).then_some(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::resolve_eligible_fields;
    use crate::types::{FieldDescriptor, FieldInfo, MetadataValue};
    use pretty_assertions::assert_eq;

    fn eligible() -> EligibleFields {
        let info: FieldInfo = [
            FieldDescriptor::new("title"),
            FieldDescriptor::new("filename"),
            FieldDescriptor::new("color").multivalue(),
        ]
        .into_iter()
        .collect();
        resolve_eligible_fields(&info, &["filename"][..])
    }

    fn template(id: &str, name: &str) -> Asset {
        Asset::new(id)
            .with_field("filename", MetadataValue::scalar(format!("{name}.stamp")))
            .with_field("baseName", MetadataValue::scalar(name))
    }

    #[test]
    fn keeps_only_eligible_fields() {
        let hit = template("t1", "approved")
            .with_field("title", MetadataValue::scalar("Approved"))
            .with_field("color", MetadataValue::multi(["red", "blue"]));

        let registry = build_registry(&[hit], &eligible());
        let entry = registry.get("t1").unwrap();

        let mut expected = Metadata::new();
        expected.insert("title".to_string(), MetadataValue::scalar("Approved"));
        expected.insert("color".to_string(), MetadataValue::multi(["red", "blue"]));
        assert_eq!(entry.metadata, expected);
        assert_eq!(entry.display_name, "approved");
    }

    #[test]
    fn drops_hits_without_eligible_fields() {
        let empty = template("t1", "empty");
        let useful = template("t2", "useful").with_field("title", MetadataValue::scalar("x"));

        let registry = build_registry(&[empty, useful], &eligible());
        assert_eq!(registry.ids(), vec!["t2"]);
    }

    #[test]
    fn preserves_hit_order() {
        let hits: Vec<_> = ["c", "a", "b"]
            .iter()
            .map(|id| template(id, id).with_field("title", MetadataValue::scalar(*id)))
            .collect();

        let registry = build_registry(&hits, &eligible());
        assert_eq!(registry.ids(), vec!["c", "a", "b"]);
    }

    #[test]
    fn absent_fields_are_not_synthesized() {
        let hit = template("t1", "one").with_field("color", MetadataValue::multi(["red"]));
        let registry = build_registry(&[hit], &eligible());
        assert!(!registry.get("t1").unwrap().metadata.contains_key("title"));
    }

    #[test]
    fn empty_eligibility_yields_empty_registry() {
        let hit = template("t1", "one").with_field("title", MetadataValue::scalar("x"));
        let registry = build_registry(&[hit], &EligibleFields::empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn display_name_falls_back_to_filename_then_id() {
        let by_filename = Asset::new("t1")
            .with_field("filename", MetadataValue::scalar("only.stamp"))
            .with_field("title", MetadataValue::scalar("x"));
        let bare = Asset::new("t2").with_field("title", MetadataValue::scalar("y"));

        let registry = build_registry(&[by_filename, bare], &eligible());
        assert_eq!(registry.get("t1").unwrap().display_name, "only.stamp");
        assert_eq!(registry.get("t2").unwrap().display_name, "t2");
    }

    #[test]
    fn duplicate_id_keeps_first_position_and_last_metadata() {
        let first = template("t1", "first").with_field("title", MetadataValue::scalar("old"));
        let other = template("t2", "other").with_field("title", MetadataValue::scalar("x"));
        let second = template("t1", "second").with_field("title", MetadataValue::scalar("new"));

        let registry = build_registry(&[first, other, second], &eligible());
        assert_eq!(registry.ids(), vec!["t1", "t2"]);
        assert_eq!(
            registry.get("t1").unwrap().metadata["title"],
            MetadataValue::scalar("new")
        );
    }
}
