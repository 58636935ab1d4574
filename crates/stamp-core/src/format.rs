//! Metadata formatting
//!
//! Two renderings of the same value, selected by the field's descriptor and
//! the value's tag:
//! - display: human-oriented and lossy
//! - update: the exact encoding the bulk-update service expects
//!
//! | datatype / multiplicity | display             | update          |
//! |-------------------------|---------------------|-----------------|
//! | `datetime`              | `formatted` verbatim | `value`        |
//! | multivalue              | `a, b`              | `+a, +b` (`+` when empty) |
//! | otherwise               | scalar as-is        | scalar as-is    |

use crate::error::FormatError;
use crate::types::{Datatype, FieldDescriptor, FieldInfo, MetadataValue};

/// Formats metadata values against a field-info schema
#[derive(Debug, Clone, Copy)]
pub struct MetadataFormatter<'a> {
    field_info: &'a FieldInfo,
}

/// Value normalised against its descriptor
enum Shape<'v> {
    DateTime { formatted: &'v str, value: &'v str },
    Multi(&'v [String]),
    Scalar(&'v str),
}

impl<'a> MetadataFormatter<'a> {
    /// Create formatter over a schema
    #[inline]
    #[must_use]
    pub fn new(field_info: &'a FieldInfo) -> Self {
        Self { field_info }
    }

    /// Render a value for the panel
    ///
    /// # Errors
    /// - `FormatError::UnknownField` if the field has no descriptor
    /// - `FormatError::ShapeMismatch` if the value does not fit the descriptor
    pub fn format_for_display(&self, field: &str, value: &MetadataValue) -> Result<String, FormatError> {
        Ok(match self.shape(field, value)? {
            Shape::DateTime { formatted, .. } => formatted.to_string(),
            Shape::Multi(items) => items.join(", "),
            Shape::Scalar(s) => s.to_string(),
        })
    }

    /// Encode a value for a bulk-update payload
    ///
    /// Multivalue entries are prefixed with `+` so they are added to the
    /// target's existing values instead of replacing them. An empty list
    /// encodes to a bare `+`.
    ///
    /// # Errors
    /// Same as [`MetadataFormatter::format_for_display`]
    pub fn format_for_update(&self, field: &str, value: &MetadataValue) -> Result<String, FormatError> {
        Ok(match self.shape(field, value)? {
            Shape::DateTime { value, .. } => value.to_string(),
            // An empty list still carries the marker so nothing is cleared
            Shape::Multi(items) => format!("+{}", items.join(", +")),
            Shape::Scalar(s) => s.to_string(),
        })
    }

    fn descriptor(&self, field: &str) -> Result<&'a FieldDescriptor, FormatError> {
        self.field_info
            .get(field)
            .ok_or_else(|| FormatError::UnknownField(field.to_string()))
    }

    fn shape<'v>(&self, field: &str, value: &'v MetadataValue) -> Result<Shape<'v>, FormatError> {
        let descriptor = self.descriptor(field)?;
        let mismatch = |expected: &'static str| FormatError::ShapeMismatch {
            field: field.to_string(),
            expected,
            actual: value.kind(),
        };

        if descriptor.datatype == Datatype::Datetime {
            return match value {
                MetadataValue::DateTime { formatted, value } => Ok(Shape::DateTime { formatted, value }),
                _ => Err(mismatch("datetime")),
            };
        }

        match (descriptor.multivalue, value) {
            (true, MetadataValue::MultiValue(items)) => Ok(Shape::Multi(items)),
            // Single entry reported without the surrounding list
            (true, MetadataValue::Scalar(s)) => Ok(Shape::Multi(std::slice::from_ref(s))),
            (true, MetadataValue::DateTime { .. }) => Err(mismatch("multivalue")),
            (false, MetadataValue::Scalar(s)) => Ok(Shape::Scalar(s)),
            (false, _) => Err(mismatch("scalar")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldDescriptor;

    fn schema() -> FieldInfo {
        [
            FieldDescriptor::new("title"),
            FieldDescriptor::new("color").multivalue(),
            FieldDescriptor::new("shootDate").with_datatype(Datatype::Datetime),
            FieldDescriptor::new("rating").with_datatype(Datatype::Number),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn multivalue_display_and_update() {
        let info = schema();
        let formatter = MetadataFormatter::new(&info);
        let colors = MetadataValue::multi(["red", "blue"]);

        assert_eq!(formatter.format_for_display("color", &colors).unwrap(), "red, blue");
        assert_eq!(formatter.format_for_update("color", &colors).unwrap(), "+red, +blue");
    }

    #[test]
    fn datetime_uses_formatted_for_display_and_value_for_update() {
        let info = schema();
        let formatter = MetadataFormatter::new(&info);
        let date = MetadataValue::datetime("Jan 2, 2024 10:00", "1704189600000");

        assert_eq!(formatter.format_for_display("shootDate", &date).unwrap(), "Jan 2, 2024 10:00");
        assert_eq!(formatter.format_for_update("shootDate", &date).unwrap(), "1704189600000");
    }

    #[test]
    fn scalar_passes_through() {
        let info = schema();
        let formatter = MetadataFormatter::new(&info);

        let title = MetadataValue::scalar("Approved");
        assert_eq!(formatter.format_for_display("title", &title).unwrap(), "Approved");
        assert_eq!(formatter.format_for_update("title", &title).unwrap(), "Approved");

        let rating = MetadataValue::scalar("4");
        assert_eq!(formatter.format_for_update("rating", &rating).unwrap(), "4");
    }

    #[test]
    fn multivalue_field_with_single_scalar() {
        let info = schema();
        let formatter = MetadataFormatter::new(&info);
        let one = MetadataValue::scalar("green");

        assert_eq!(formatter.format_for_display("color", &one).unwrap(), "green");
        assert_eq!(formatter.format_for_update("color", &one).unwrap(), "+green");
    }

    #[test]
    fn empty_multivalue_keeps_add_marker() {
        let info = schema();
        let formatter = MetadataFormatter::new(&info);
        let none = MetadataValue::MultiValue(Vec::new());

        assert_eq!(formatter.format_for_display("color", &none).unwrap(), "");
        assert_eq!(formatter.format_for_update("color", &none).unwrap(), "+");
    }

    #[test]
    fn unknown_field() {
        let info = schema();
        let formatter = MetadataFormatter::new(&info);
        let err = formatter
            .format_for_update("missing", &MetadataValue::scalar("x"))
            .unwrap_err();
        assert_eq!(err, FormatError::UnknownField("missing".to_string()));
    }

    #[test]
    fn datetime_field_with_scalar_value() {
        let info = schema();
        let formatter = MetadataFormatter::new(&info);
        let err = formatter
            .format_for_display("shootDate", &MetadataValue::scalar("yesterday"))
            .unwrap_err();
        assert!(matches!(err, FormatError::ShapeMismatch { expected: "datetime", .. }));
    }

    #[test]
    fn scalar_field_with_list_value() {
        let info = schema();
        let formatter = MetadataFormatter::new(&info);
        let err = formatter
            .format_for_update("title", &MetadataValue::multi(["a"]))
            .unwrap_err();
        assert!(matches!(err, FormatError::ShapeMismatch { expected: "scalar", actual: "multivalue", .. }));
    }
}
