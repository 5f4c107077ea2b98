//! # Persistence Gateway
//!
//! Seam between the editor and the document store. A gateway loads one
//! document per owner and stores either a whole document or a patch.
//!
//! Saves must be idempotent under retry with the same payload: applying a
//! patch twice yields the same stored content.

use crate::errors::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use weddingsite_document::{DocumentPatch, WeddingDocument};

/// What a save sends to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavePayload {
    /// Whole document (create or full replace)
    Full(WeddingDocument),
    /// Only the attributes a commit touched
    Patch(DocumentPatch),
}

impl SavePayload {
    /// Apply this payload on top of what the store currently holds
    pub(crate) fn merge_into(
        &self,
        owner_id: &str,
        stored: Option<WeddingDocument>,
    ) -> GatewayResult<WeddingDocument> {
        match (self, stored) {
            (SavePayload::Full(doc), Some(existing)) => {
                // The share id is minted once by the store and survives full saves
                Ok(match (doc.shareable_id(), existing.shareable_id()) {
                    (None, Some(shareable_id)) => doc.clone().with_shareable_id(shareable_id),
                    _ => doc.clone(),
                })
            }
            (SavePayload::Full(doc), None) => Ok(doc.clone()),
            (SavePayload::Patch(patch), Some(mut existing)) => {
                existing.apply(patch);
                Ok(existing)
            }
            (SavePayload::Patch(_), None) => Err(GatewayError::NotFound(owner_id.to_string())),
        }
    }
}

pub trait PersistenceGateway: Send + Sync {
    /// Stored document for `owner_id`, `None` when there is none
    fn load(&self, owner_id: &str) -> GatewayResult<Option<WeddingDocument>>;

    fn save(&self, owner_id: &str, payload: &SavePayload) -> GatewayResult<()>;
}

#[derive(Debug, Default)]
struct MemoryStore {
    documents: HashMap<String, WeddingDocument>,
    scripted_failures: VecDeque<String>,
    save_count: usize,
}

/// Process-local gateway. Failures can be scripted to exercise error paths.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    store: Mutex<MemoryStore>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway pre-seeded with a stored document
    pub fn with_document(doc: WeddingDocument) -> Self {
        let gateway = Self::new();
        gateway.insert(doc);
        gateway
    }

    fn lock(&self, operation: &'static str) -> GatewayResult<std::sync::MutexGuard<'_, MemoryStore>> {
        self.store
            .lock()
            .map_err(|_| GatewayError::LockPoisoned(operation))
    }

    pub fn insert(&self, doc: WeddingDocument) {
        if let Ok(mut store) = self.lock("insert") {
            store.documents.insert(doc.owner_id().to_string(), doc);
        }
    }

    /// Reject the next save with `reason`
    pub fn fail_next(&self, reason: impl Into<String>) {
        if let Ok(mut store) = self.lock("fail_next") {
            store.scripted_failures.push_back(reason.into());
        }
    }

    /// Number of saves attempted, failed ones included
    pub fn save_count(&self) -> usize {
        self.lock("save_count").map(|store| store.save_count).unwrap_or(0)
    }

    pub fn get(&self, owner_id: &str) -> Option<WeddingDocument> {
        self.lock("get")
            .ok()
            .and_then(|store| store.documents.get(owner_id).cloned())
    }
}

impl PersistenceGateway for InMemoryGateway {
    fn load(&self, owner_id: &str) -> GatewayResult<Option<WeddingDocument>> {
        Ok(self.lock("load")?.documents.get(owner_id).cloned())
    }

    fn save(&self, owner_id: &str, payload: &SavePayload) -> GatewayResult<()> {
        let mut store = self.lock("save")?;
        store.save_count += 1;

        if let Some(reason) = store.scripted_failures.pop_front() {
            return Err(GatewayError::Rejected(reason));
        }

        let stored = store.documents.get(owner_id).cloned();
        let doc = payload.merge_into(owner_id, stored)?;
        store.documents.insert(owner_id.to_string(), doc);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weddingsite_document::{ScalarField, Theme};

    fn stored() -> WeddingDocument {
        WeddingDocument::new("w-1", "owner-1").with_shareable_id("ab12cd34")
    }

    #[test]
    fn test_load_missing_owner_is_none() {
        let gateway = InMemoryGateway::new();
        assert!(gateway.load("nobody").unwrap().is_none());
    }

    #[test]
    fn test_patch_save_merges_into_stored_document() {
        let gateway = InMemoryGateway::with_document(stored());
        let mut patch = DocumentPatch::scalar(ScalarField::VenueName, "Lakeside Hall");
        patch.theme = Some(Theme::Modern);

        gateway.save("owner-1", &SavePayload::Patch(patch.clone())).unwrap();
        gateway.save("owner-1", &SavePayload::Patch(patch)).unwrap();

        let doc = gateway.get("owner-1").unwrap();
        assert_eq!(doc.scalar(ScalarField::VenueName), "Lakeside Hall");
        assert_eq!(doc.theme(), Theme::Modern);
        assert_eq!(doc.shareable_id(), Some("ab12cd34"));
    }

    #[test]
    fn test_patch_without_stored_document_is_not_found() {
        let gateway = InMemoryGateway::new();
        let result = gateway.save("owner-1", &SavePayload::Patch(DocumentPatch::new()));
        assert!(matches!(result, Err(GatewayError::NotFound(owner)) if owner == "owner-1"));
    }

    #[test]
    fn test_full_save_keeps_share_id() {
        let gateway = InMemoryGateway::with_document(stored());
        let replacement = WeddingDocument::new("w-1", "owner-1");

        gateway.save("owner-1", &SavePayload::Full(replacement)).unwrap();
        assert_eq!(gateway.get("owner-1").unwrap().shareable_id(), Some("ab12cd34"));
    }

    #[test]
    fn test_scripted_failure_leaves_store_untouched() {
        let gateway = InMemoryGateway::with_document(stored());
        gateway.fail_next("backend unavailable");

        let payload = SavePayload::Patch(DocumentPatch::scalar(ScalarField::VenueName, "x"));
        let err = gateway.save("owner-1", &payload).unwrap_err();

        assert!(matches!(err, GatewayError::Rejected(_)));
        assert_eq!(gateway.get("owner-1").unwrap().scalar(ScalarField::VenueName), "");
        assert_eq!(gateway.save_count(), 1);
        assert!(gateway.save("owner-1", &payload).is_ok());
    }
}
