//! Testing utilities for the stamp panel workspace
//!
//! Shared fixtures and in-memory collaborators.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use stamp_core::{
    Asset, Datatype, FieldDescriptor, FieldInfo, MetadataValue, UpdatePayload, UpdateRequest,
};
use stamp_panel::{ApiError, AssetsApi, HostContext, Messages, SearchRequest};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;

pub type SearchResponse = Result<Vec<Asset>, ApiError>;
pub type FieldInfoResponse = Result<FieldInfo, ApiError>;

/// Schema with one field of every interesting kind
pub fn field_info_fixture() -> FieldInfo {
    [
        FieldDescriptor::new("title"),
        FieldDescriptor::new("status"),
        FieldDescriptor::new("filename"),
        FieldDescriptor::new("baseName").read_only(),
        FieldDescriptor::new("previewState"),
        FieldDescriptor::new("thumbnailState"),
        FieldDescriptor::new("assetCreator").read_only(),
        FieldDescriptor::new("tags").multivalue(),
        FieldDescriptor::new("shootDate").with_datatype(Datatype::Datetime),
    ]
    .into_iter()
    .collect()
}

/// Template asset named `<name>.stamp`
pub fn template_hit(id: &str, name: &str) -> Asset {
    Asset::new(id)
        .with_field("filename", MetadataValue::scalar(format!("{name}.stamp")))
        .with_field("baseName", MetadataValue::scalar(name))
}

/// Template stamping a status, tags and a shoot date
pub fn approved_stamp() -> Asset {
    template_hit("stamp-approved", "Approved")
        .with_field("status", MetadataValue::scalar("Approved"))
        .with_field("tags", MetadataValue::multi(["checked", "final"]))
        .with_field("shootDate", MetadataValue::datetime("Mar 1, 2024", "1709251200000"))
}

/// Template without any stampable field
pub fn empty_stamp() -> Asset {
    template_hit("stamp-empty", "Empty").with_field("assetCreator", MetadataValue::scalar("ops"))
}

/// Regular image asset
pub fn photo(id: &str) -> Asset {
    Asset::new(id).with_field("filename", MetadataValue::scalar(format!("{id}.jpg")))
}

/// In-memory asset service
///
/// Field-info calls and searches answer from a queue of pending responses
/// first, then from the configured result. Every bulk update is recorded.
#[derive(Debug)]
pub struct FakeAssetsApi {
    field_info: Mutex<FieldInfoResponse>,
    pending_field_info: Mutex<VecDeque<oneshot::Receiver<FieldInfoResponse>>>,
    hits: Mutex<SearchResponse>,
    messages: Mutex<Result<Messages, ApiError>>,
    update_result: Mutex<Result<(), ApiError>>,
    pending_searches: Mutex<VecDeque<oneshot::Receiver<SearchResponse>>>,
    updates: Mutex<Vec<UpdateRequest>>,
    searches: Mutex<Vec<SearchRequest>>,
    field_info_calls: AtomicUsize,
}

impl FakeAssetsApi {
    pub fn new(field_info: FieldInfo, hits: Vec<Asset>) -> Self {
        Self {
            field_info: Mutex::new(Ok(field_info)),
            pending_field_info: Mutex::new(VecDeque::new()),
            hits: Mutex::new(Ok(hits)),
            messages: Mutex::new(Ok(Messages::new())),
            update_result: Mutex::new(Ok(())),
            pending_searches: Mutex::new(VecDeque::new()),
            updates: Mutex::new(Vec::new()),
            searches: Mutex::new(Vec::new()),
            field_info_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_messages(self, messages: Messages) -> Self {
        *self.messages.lock() = Ok(messages);
        self
    }

    pub fn set_field_info(&self, result: FieldInfoResponse) {
        *self.field_info.lock() = result;
    }

    pub fn set_hits(&self, result: SearchResponse) {
        *self.hits.lock() = result;
    }

    pub fn set_messages(&self, result: Result<Messages, ApiError>) {
        *self.messages.lock() = result;
    }

    pub fn set_update_result(&self, result: Result<(), ApiError>) {
        *self.update_result.lock() = result;
    }

    /// Make the next field-info call wait for the returned sender
    pub fn defer_next_field_info(&self) -> oneshot::Sender<FieldInfoResponse> {
        let (tx, rx) = oneshot::channel();
        self.pending_field_info.lock().push_back(rx);
        tx
    }

    /// Make the next search wait for the returned sender
    pub fn defer_next_search(&self) -> oneshot::Sender<SearchResponse> {
        let (tx, rx) = oneshot::channel();
        self.pending_searches.lock().push_back(rx);
        tx
    }

    pub fn updates(&self) -> Vec<UpdateRequest> {
        self.updates.lock().clone()
    }

    pub fn searches(&self) -> Vec<SearchRequest> {
        self.searches.lock().clone()
    }

    pub fn field_info_calls(&self) -> usize {
        self.field_info_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetsApi for FakeAssetsApi {
    async fn field_info(&self) -> Result<FieldInfo, ApiError> {
        self.field_info_calls.fetch_add(1, Ordering::SeqCst);
        let pending = self.pending_field_info.lock().pop_front();
        let Some(rx) = pending else {
            let info = self.field_info.lock().clone();
            return info;
        };
        rx.await
            .unwrap_or_else(|_| Err(ApiError::FieldInfo("response dropped".to_string())))
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<Asset>, ApiError> {
        self.searches.lock().push(request.clone());
        let pending = self.pending_searches.lock().pop_front();
        let Some(rx) = pending else {
            let hits = self.hits.lock().clone();
            return hits;
        };
        rx.await
            .unwrap_or_else(|_| Err(ApiError::Search("response dropped".to_string())))
    }

    async fn update_bulk(&self, locator: &str, payload: &UpdatePayload) -> Result<(), ApiError> {
        self.update_result.lock().clone()?;
        self.updates.lock().push(UpdateRequest {
            locator: locator.to_string(),
            payload: payload.clone(),
        });
        Ok(())
    }

    async fn load_messages(&self) -> Result<Messages, ApiError> {
        self.messages.lock().clone()
    }
}

/// Host whose selection tests can change at will
#[derive(Debug, Default)]
pub struct FakeHost {
    selection: Mutex<Vec<Asset>>,
}

impl FakeHost {
    pub fn new(selection: Vec<Asset>) -> Self {
        Self {
            selection: Mutex::new(selection),
        }
    }

    pub fn select(&self, selection: Vec<Asset>) {
        *self.selection.lock() = selection;
    }
}

impl HostContext for FakeHost {
    fn active_selection(&self) -> Vec<Asset> {
        self.selection.lock().clone()
    }
}
