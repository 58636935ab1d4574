//! Stamp panel session
//!
//! The single context object a panel instance works through:
//! - Holds the asset-service client, the host, and the configuration
//! - Owns the schema, registry, and message snapshots
//! - Sequences startup and reloads, discarding superseded reloads
//! - Evaluates the visible panel and applies stamps
//!
//! # Lifecycle
//!
//! ```text
//! new → start (messages → field info → search → panel) → run(events) … → teardown
//! ```
//!
//! Snapshots are replaced wholesale behind a short-lived lock that is never
//! held across an `.await`. Each reload takes a generation token; its result
//! is published only if no newer reload was issued in the meantime.

use crate::api::{AssetsApi, HostContext, HostEvent, SearchRequest};
use crate::error::{StampError, StampResult};
use crate::messages::Messages;
use crate::view::{render_cards, PanelView};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use stamp_core::{
    prepare_stamp, resolve_eligible_fields, Asset, EligibleFields, FieldInfo, MetadataFormatter,
    PanelState, SelectionFilter, StampConfig, StampRegistry, StampTemplate,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Result of a reload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReloadOutcome {
    /// Registry was rebuilt and published
    Published {
        /// Number of stamp templates now registered
        templates: usize,
    },
    /// A newer reload started first; this result was discarded
    Superseded,
}

/// Result of applying a stamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StampOutcome {
    /// Bulk update was submitted
    Submitted {
        /// Assets targeted by the update
        assets: usize,
        /// Fields written
        fields: usize,
    },
    /// Nothing stampable is selected
    NoSelection,
    /// No field of the template could be encoded
    NothingToStamp,
}

/// Snapshots published by the session
#[derive(Debug, Default)]
struct Snapshot {
    field_info: Option<Arc<FieldInfo>>,
    eligible: Arc<EligibleFields>,
    registry: Arc<StampRegistry>,
    messages: Arc<Messages>,
    panel: Option<PanelState>,
}

/// A stamp panel session
pub struct StampSession {
    /// Asset service client
    api: Arc<dyn AssetsApi>,
    /// Hosting application
    host: Arc<dyn HostContext>,
    /// Configuration
    config: StampConfig,
    /// Excludes templates from selections
    filter: SelectionFilter,
    /// Latest issued reload token
    generation: AtomicU64,
    /// Published state
    snapshot: Mutex<Snapshot>,
}

impl std::fmt::Debug for StampSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StampSession")
            .field("config", &self.config)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("snapshot", &*self.snapshot.lock())
            .finish_non_exhaustive()
    }
}

impl StampSession {
    /// Create session over its collaborators
    #[must_use]
    pub fn new(api: Arc<dyn AssetsApi>, host: Arc<dyn HostContext>, config: StampConfig) -> Self {
        let filter = SelectionFilter::new(config.template_suffix());
        Self {
            api,
            host,
            config,
            filter,
            generation: AtomicU64::new(0),
            snapshot: Mutex::new(Snapshot::default()),
        }
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StampConfig {
        &self.config
    }

    /// Run the startup sequence and evaluate the first panel
    ///
    /// Never fails: every service error is logged and degrades to "no data".
    pub async fn start(&self) -> PanelState {
        tracing::info!("Starting stamp panel session");

        match self.api.load_messages().await {
            Ok(messages) => {
                tracing::debug!("Loaded {} messages", messages.len());
                self.snapshot.lock().messages = Arc::new(messages);
            }
            Err(e) => tracing::error!("Messages call failed: {}", e),
        }

        self.reload().await;
        self.refresh_panel()
    }

    /// Fetch the field-info schema and resolve eligible fields
    ///
    /// Nothing is published here; [`StampSession::reload`] commits the
    /// result together with the registry it was used for. `None` means the
    /// schema is unavailable and stamping stays disabled.
    pub async fn fetch_schema(&self) -> Option<(Arc<FieldInfo>, Arc<EligibleFields>)> {
        match self.api.field_info().await {
            Ok(info) => {
                let eligible = resolve_eligible_fields(&info, self.config.ignored_fields.as_slice());
                if eligible.is_empty() {
                    tracing::warn!("No stampable fields in schema");
                } else {
                    tracing::info!("Resolved {} stampable fields", eligible.len());
                }
                Some((Arc::new(info), Arc::new(eligible)))
            }
            Err(e) => {
                tracing::error!("Fieldinfo call failed: {}", e);
                None
            }
        }
    }

    /// Search templates again and rebuild the registry
    ///
    /// Retries the schema first if it was never loaded. A freshly fetched
    /// schema and the rebuilt registry replace the old ones together, and
    /// only if no newer reload (or teardown) was issued meanwhile.
    pub async fn reload(&self) -> ReloadOutcome {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let needs_schema = self.snapshot.lock().field_info.is_none();
        let schema = if needs_schema {
            self.fetch_schema().await
        } else {
            None
        };

        let eligible = match &schema {
            Some((_, eligible)) => Arc::clone(eligible),
            None => Arc::clone(&self.snapshot.lock().eligible),
        };
        let registry = if eligible.is_empty() {
            tracing::debug!("Skipping template search, nothing can be stamped");
            StampRegistry::new()
        } else {
            let request = SearchRequest::templates(&self.config);
            match self.api.search(&request).await {
                Ok(hits) => {
                    StampRegistry::build(&hits, &eligible, &self.config.display_name_field)
                }
                Err(e) => {
                    tracing::error!("Search call failed: {}", e);
                    StampRegistry::new()
                }
            }
        };

        let mut snapshot = self.snapshot.lock();
        if self.generation.load(Ordering::SeqCst) != token {
            tracing::debug!(token, "Discarding superseded reload");
            return ReloadOutcome::Superseded;
        }
        if let Some((field_info, eligible)) = schema {
            snapshot.field_info = Some(field_info);
            snapshot.eligible = eligible;
        }
        let templates = registry.len();
        snapshot.registry = Arc::new(registry);
        tracing::info!("Loaded {} stamp templates", templates);
        ReloadOutcome::Published { templates }
    }

    /// Host selection with stamp templates removed
    #[must_use]
    pub fn selection(&self) -> Vec<Asset> {
        self.filter.filter(&self.host.active_selection())
    }

    /// Re-evaluate the visible panel from current snapshots
    pub fn refresh_panel(&self) -> PanelState {
        let selection = self.selection();
        let mut snapshot = self.snapshot.lock();
        let state = PanelState::evaluate(&snapshot.registry, &selection);
        if snapshot.panel != Some(state) {
            tracing::debug!(%state, "Panel state changed");
        }
        snapshot.panel = Some(state);
        state
    }

    /// Last evaluated panel, `None` before the first evaluation
    #[must_use]
    pub fn panel_state(&self) -> Option<PanelState> {
        self.snapshot.lock().panel
    }

    /// Current registry snapshot
    #[must_use]
    pub fn registry(&self) -> Arc<StampRegistry> {
        Arc::clone(&self.snapshot.lock().registry)
    }

    /// Templates in render order
    #[must_use]
    pub fn templates(&self) -> Vec<StampTemplate> {
        self.registry().iter().cloned().collect()
    }

    /// Render the panel for the presentation layer
    #[must_use]
    pub fn view(&self) -> PanelView {
        let (field_info, registry, messages, state) = {
            let snapshot = self.snapshot.lock();
            (
                snapshot.field_info.clone().unwrap_or_default(),
                Arc::clone(&snapshot.registry),
                Arc::clone(&snapshot.messages),
                snapshot.panel,
            )
        };
        let formatter = MetadataFormatter::new(&field_info);
        PanelView {
            state,
            stamps: render_cards(&registry, &formatter, &messages, &self.config),
        }
    }

    /// Apply a stamp template to the current selection
    ///
    /// An empty selection is a no-op. Update failures are logged and
    /// returned; nothing is retried or rolled back.
    ///
    /// # Errors
    /// - `StampError::UnknownTemplate` if `template_id` is not registered
    /// - `StampError::Api` if the bulk update fails
    pub async fn apply_stamp(&self, template_id: &str) -> StampResult<StampOutcome> {
        let (field_info, registry) = {
            let snapshot = self.snapshot.lock();
            (
                snapshot.field_info.clone().unwrap_or_default(),
                Arc::clone(&snapshot.registry),
            )
        };
        let template = registry
            .get(template_id)
            .ok_or_else(|| StampError::UnknownTemplate(template_id.to_string()))?;

        let selection = self.selection();
        if selection.is_empty() {
            tracing::debug!(template = template_id, "No selection, stamp ignored");
            return Ok(StampOutcome::NoSelection);
        }

        let formatter = MetadataFormatter::new(&field_info);
        let Some(request) = prepare_stamp(&formatter, template, &selection, |s| {
            self.api.query_for_selection(s)
        }) else {
            tracing::warn!(template = template_id, "Stamp has no encodable fields");
            return Ok(StampOutcome::NothingToStamp);
        };

        if let Err(e) = self.api.update_bulk(&request.locator, &request.payload).await {
            tracing::error!("Updatebulk call failed: {}", e);
            return Err(e.into());
        }

        tracing::info!(
            template = template_id,
            assets = selection.len(),
            fields = request.payload.len(),
            "Stamp applied"
        );
        Ok(StampOutcome::Submitted {
            assets: selection.len(),
            fields: request.payload.len(),
        })
    }

    /// Handle one host notification to completion
    ///
    /// Returns `false` once the session has been torn down.
    pub async fn handle_event(&self, event: HostEvent) -> bool {
        match event {
            HostEvent::SelectionChanged => {
                self.refresh_panel();
            }
            HostEvent::Reload => {
                self.reload().await;
                self.refresh_panel();
            }
            HostEvent::StampClicked(id) => {
                if let Err(e) = self.apply_stamp(&id).await {
                    tracing::debug!(template = %id, "Stamp not applied: {}", e);
                }
            }
            HostEvent::Teardown => {
                self.teardown();
                return false;
            }
        }
        true
    }

    /// Process host notifications one at a time until teardown
    ///
    /// A closed channel is treated as teardown.
    pub async fn run(&self, mut events: mpsc::Receiver<HostEvent>) {
        while let Some(event) = events.recv().await {
            if !self.handle_event(event).await {
                return;
            }
        }
        self.teardown();
    }

    /// Drop all snapshots and invalidate in-flight reloads
    pub fn teardown(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.snapshot.lock() = Snapshot::default();
        tracing::info!("Stamp panel session torn down");
    }
}
