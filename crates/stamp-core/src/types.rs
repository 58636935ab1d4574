//! Core types for stamping
//!
//! Defines the data model shared by every stage of the panel:
//! - Field descriptors and the field-info schema
//! - Tagged metadata values
//! - Assets (template hits and selection entries)
//! - Stamp templates

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Field name → value, in the order the asset record carries them
pub type Metadata = IndexMap<String, MetadataValue>;

/// Datatype of a metadata field as declared by the field-info service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Datatype {
    /// Plain text
    #[default]
    Text,
    /// Date/time with a machine and a display representation
    Datetime,
    /// Integral number
    Number,
    /// Decimal number
    Decimal,
    /// Boolean flag
    Boolean,
    /// Any datatype this crate does not know about
    #[serde(other)]
    Other,
}

/// Schema entry for a single metadata field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name (defaults to the key it is registered under)
    #[serde(default)]
    pub name: String,
    /// Declared datatype
    #[serde(default)]
    pub datatype: Datatype,
    /// Whether the field holds a list of values
    #[serde(default)]
    pub multivalue: bool,
    /// Whether clients may write the field
    #[serde(default)]
    pub editable: bool,
}

impl FieldDescriptor {
    /// Create an editable, single-valued text field
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datatype: Datatype::Text,
            multivalue: false,
            editable: true,
        }
    }

    /// With datatype
    #[inline]
    #[must_use]
    pub fn with_datatype(mut self, datatype: Datatype) -> Self {
        self.datatype = datatype;
        self
    }

    /// Mark as multivalued
    #[inline]
    #[must_use]
    pub fn multivalue(mut self) -> Self {
        self.multivalue = true;
        self
    }

    /// Mark as read-only
    #[inline]
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }
}

/// Field-info schema, keyed by field name
///
/// Fetched once per session and read-only afterwards. Deserializes from the
/// service shape `{"fieldInfoByName": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFieldInfo", into = "RawFieldInfo")]
pub struct FieldInfo {
    fields: HashMap<String, FieldDescriptor>,
}

impl FieldInfo {
    /// Create empty schema
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under its own name
    pub fn insert(&mut self, descriptor: FieldDescriptor) {
        self.fields.insert(descriptor.name.clone(), descriptor);
    }

    /// Look up a descriptor by field name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Check if a field is declared
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of declared fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the schema is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(name, descriptor)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldDescriptor)> {
        self.fields.iter()
    }
}

impl FromIterator<FieldDescriptor> for FieldInfo {
    fn from_iter<I: IntoIterator<Item = FieldDescriptor>>(iter: I) -> Self {
        let mut info = Self::new();
        for descriptor in iter {
            info.insert(descriptor);
        }
        info
    }
}

#[derive(Serialize, Deserialize)]
struct RawFieldInfo {
    #[serde(rename = "fieldInfoByName", default)]
    field_info_by_name: HashMap<String, FieldDescriptor>,
}

impl From<RawFieldInfo> for FieldInfo {
    fn from(raw: RawFieldInfo) -> Self {
        let fields = raw
            .field_info_by_name
            .into_iter()
            .map(|(key, mut descriptor)| {
                if descriptor.name.is_empty() {
                    descriptor.name.clone_from(&key);
                }
                (key, descriptor)
            })
            .collect();
        Self { fields }
    }
}

impl From<FieldInfo> for RawFieldInfo {
    fn from(info: FieldInfo) -> Self {
        Self {
            field_info_by_name: info.fields,
        }
    }
}

/// A single metadata value, tagged by shape
///
/// Built from raw service JSON: an object carrying both `formatted` and
/// `value` is a [`MetadataValue::DateTime`], an array is a
/// [`MetadataValue::MultiValue`], anything else is a [`MetadataValue::Scalar`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum MetadataValue {
    /// Single value, stringified
    Scalar(String),
    /// List of values, each stringified
    MultiValue(Vec<String>),
    /// Date/time value
    DateTime {
        /// Human-readable representation, used verbatim for display
        formatted: String,
        /// Machine representation, sent on update
        value: String,
    },
}

impl MetadataValue {
    /// Create scalar value
    #[inline]
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    /// Create multivalue from any list of strings
    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MultiValue(values.into_iter().map(Into::into).collect())
    }

    /// Create date/time value
    #[inline]
    pub fn datetime(formatted: impl Into<String>, value: impl Into<String>) -> Self {
        Self::DateTime {
            formatted: formatted.into(),
            value: value.into(),
        }
    }

    /// Short name of the tag, used in diagnostics
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::MultiValue(_) => "multivalue",
            Self::DateTime { .. } => "datetime",
        }
    }
}

fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl From<Value> for MetadataValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::MultiValue(items.into_iter().map(stringify).collect()),
            Value::Object(mut map) if map.contains_key("formatted") && map.contains_key("value") => {
                let formatted = map.remove("formatted").map(stringify).unwrap_or_default();
                let value = map.remove("value").map(stringify).unwrap_or_default();
                Self::DateTime { formatted, value }
            }
            other => Self::Scalar(stringify(other)),
        }
    }
}

impl From<MetadataValue> for Value {
    fn from(value: MetadataValue) -> Self {
        match value {
            MetadataValue::Scalar(s) => Value::String(s),
            MetadataValue::MultiValue(items) => {
                Value::Array(items.into_iter().map(Value::String).collect())
            }
            MetadataValue::DateTime { formatted, value } => {
                serde_json::json!({ "formatted": formatted, "value": value })
            }
        }
    }
}

/// An asset as reported by the search service or the host selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset identifier
    pub id: String,
    /// Metadata carried by the asset record
    #[serde(default)]
    pub metadata: Metadata,
}

impl Asset {
    /// Create asset without metadata
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metadata: Metadata::new(),
        }
    }

    /// With a metadata field
    #[inline]
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: MetadataValue) -> Self {
        self.metadata.insert(name.into(), value);
        self
    }

    /// Filename, when present as a scalar
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.scalar_field("filename")
    }

    /// Name shown for the asset: `field`, else the filename, else the id
    #[must_use]
    pub fn display_name(&self, field: &str) -> &str {
        self.scalar_field(field)
            .or_else(|| self.filename())
            .unwrap_or(self.id.as_str())
    }

    /// Scalar field value by name
    #[must_use]
    pub fn scalar_field(&self, name: &str) -> Option<&str> {
        match self.metadata.get(name) {
            Some(MetadataValue::Scalar(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// A template asset reduced to its stampable metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampTemplate {
    /// Id of the template asset
    pub id: String,
    /// Name shown in the panel
    pub display_name: String,
    /// Eligible metadata, never empty once registered
    pub metadata: Metadata,
}
