//! Offline asset service backed by a JSON snapshot
//!
//! The snapshot captures what the live service would answer:
//!
//! ```json
//! {
//!   "fieldInfo": { "fieldInfoByName": { "status": { "editable": true } } },
//!   "templates": [ { "id": "t1", "metadata": { "filename": "ok.stamp", "status": "OK" } } ],
//!   "selection": [ { "id": "a1", "metadata": { "filename": "a1.jpg" } } ],
//!   "messages": { "field_label.status": "Status" }
//! }
//! ```
//!
//! Bulk updates are recorded instead of sent.

use anyhow::Context;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use stamp_core::{Asset, FieldInfo, UpdatePayload, UpdateRequest};
use stamp_panel::{ApiError, AssetsApi, HostContext, Messages, SearchRequest};
use std::path::Path;

/// Captured service state
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    /// Field-info schema; absent means the schema call fails
    pub field_info: Option<FieldInfo>,
    /// Every template asset, in any order
    pub templates: Vec<Asset>,
    /// Host selection
    pub selection: Vec<Asset>,
    /// Message catalogue
    pub messages: Messages,
}

impl Snapshot {
    /// Read a snapshot file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing snapshot {}", path.display()))
    }
}

/// Asset service answering from a [`Snapshot`]
#[derive(Debug)]
pub struct SnapshotApi {
    snapshot: Snapshot,
    submitted: Mutex<Vec<UpdateRequest>>,
}

impl SnapshotApi {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Updates that would have been sent
    pub fn submitted(&self) -> Vec<UpdateRequest> {
        self.submitted.lock().clone()
    }
}

#[async_trait]
impl AssetsApi for SnapshotApi {
    async fn field_info(&self) -> Result<FieldInfo, ApiError> {
        self.snapshot
            .field_info
            .clone()
            .ok_or_else(|| ApiError::FieldInfo("snapshot has no fieldInfo".to_string()))
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<Asset>, ApiError> {
        let mut hits = self.snapshot.templates.clone();
        hits.sort_by(|a, b| {
            let key = |asset: &Asset| asset.scalar_field(&request.sort).unwrap_or_default().to_string();
            key(a).cmp(&key(b))
        });
        hits.truncate(request.num);
        Ok(hits)
    }

    async fn update_bulk(&self, locator: &str, payload: &UpdatePayload) -> Result<(), ApiError> {
        self.submitted.lock().push(UpdateRequest {
            locator: locator.to_string(),
            payload: payload.clone(),
        });
        Ok(())
    }

    async fn load_messages(&self) -> Result<Messages, ApiError> {
        Ok(self.snapshot.messages.clone())
    }
}

/// Host reporting the snapshot's selection
#[derive(Debug)]
pub struct SnapshotHost {
    selection: Vec<Asset>,
}

impl SnapshotHost {
    pub fn new(selection: Vec<Asset>) -> Self {
        Self { selection }
    }
}

impl HostContext for SnapshotHost {
    fn active_selection(&self) -> Vec<Asset> {
        self.selection.clone()
    }
}
