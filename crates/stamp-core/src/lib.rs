//! Stamp Core - metadata stamping logic
//!
//! The decision logic between raw asset-service responses and the rendered
//! stamp panel:
//! - Resolves which fields may be stamped
//! - Formats metadata for display and for bulk updates
//! - Builds the registry of stamp templates
//! - Filters templates out of the host selection
//! - Decides which panel is visible
//!
//! # Architecture
//!
//! ```text
//! FieldInfo → resolve_eligible_fields → EligibleFields ─┐
//!                               template hits ──────────┴→ StampRegistry ─┐
//! host selection → SelectionFilter → filtered selection ──────────────────┴→ PanelState
//!                                                        (on click) → prepare_stamp → UpdateRequest
//! ```
//!
//! # Example
//!
//! ```rust
//! use stamp_core::prelude::*;
//!
//! let info: FieldInfo = [FieldDescriptor::new("title"), FieldDescriptor::new("filename")]
//!     .into_iter()
//!     .collect();
//! let eligible = resolve_eligible_fields(&info, &DEFAULT_IGNORED_FIELDS[..]);
//!
//! let hit = Asset::new("t1")
//!     .with_field("filename", MetadataValue::scalar("approved.stamp"))
//!     .with_field("title", MetadataValue::scalar("Approved"));
//! let registry = build_registry(&[hit], &eligible);
//!
//! let selection = SelectionFilter::default().filter(&[Asset::new("a1")]);
//! assert_eq!(PanelState::evaluate(&registry, &selection), PanelState::StampsPanel);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod config;
pub mod eligibility;
pub mod error;
pub mod format;
pub mod panel;
pub mod payload;
pub mod registry;
pub mod selection;
pub mod types;

// Re-exports for convenience
pub use config::{StampConfig, DEFAULT_IGNORED_FIELDS};
pub use eligibility::{resolve_eligible_fields, EligibleFields};
pub use error::{ConfigError, FormatError};
pub use format::MetadataFormatter;
pub use panel::PanelState;
pub use payload::{build_update_payload, prepare_stamp, query_for_selection, UpdatePayload, UpdateRequest};
pub use registry::{build_registry, stamp_metadata, StampRegistry, DEFAULT_DISPLAY_NAME_FIELD};
pub use selection::SelectionFilter;
pub use types::{Asset, Datatype, FieldDescriptor, FieldInfo, Metadata, MetadataValue, StampTemplate};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Stamp Core
    pub use crate::{
        build_registry, resolve_eligible_fields, Asset, Datatype, EligibleFields, FieldDescriptor,
        FieldInfo, MetadataFormatter, MetadataValue, PanelState, SelectionFilter, StampConfig,
        StampRegistry, StampTemplate, DEFAULT_IGNORED_FIELDS,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
