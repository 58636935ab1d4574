//! Stamp Panel - the stamping workflow over an asset service
//!
//! Wraps [`stamp_core`] in a session that talks to its collaborators:
//! - Loads the message catalogue and field-info schema
//! - Searches stamp templates and publishes the registry
//! - Re-evaluates the visible panel on every host notification
//! - Applies a clicked stamp to the current selection as one bulk update
//!
//! # Example
//!
//! ```rust,ignore
//! use stamp_panel::{HostEvent, StampSession};
//! use stamp_core::StampConfig;
//! use std::sync::Arc;
//!
//! # async fn example(api: Arc<dyn stamp_panel::AssetsApi>, host: Arc<dyn stamp_panel::HostContext>) {
//! let session = StampSession::new(api, host, StampConfig::default());
//! let state = session.start().await;
//!
//! let (tx, rx) = tokio::sync::mpsc::channel(16);
//! tx.send(HostEvent::StampClicked("template-id".into())).await.unwrap();
//! tx.send(HostEvent::Teardown).await.unwrap();
//! session.run(rx).await;
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod api;
pub mod error;
pub mod messages;
pub mod session;
pub mod view;

// Re-exports for convenience
pub use api::{AssetsApi, HostContext, HostEvent, SearchRequest};
pub use error::{ApiError, StampError, StampResult};
pub use messages::Messages;
pub use session::{ReloadOutcome, StampOutcome, StampSession};
pub use view::{render_card, render_cards, PanelView, RenderedField, StampCard};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Stamp Panel
    pub use crate::{
        ApiError, AssetsApi, HostContext, HostEvent, Messages, PanelView, StampError,
        StampOutcome, StampSession,
    };
    pub use stamp_core::{PanelState, StampConfig};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
