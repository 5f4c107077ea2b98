//! # Persister
//!
//! Fire-and-forget writes through a [`PersistenceGateway`].
//!
//! Each save runs on the blocking pool inside its own task; the outcome is
//! reported as a [`SaveNotice`] on a channel the host drains whenever it
//! likes. Editing never waits on a save, and a failed save never rolls back
//! the in-memory document.
//!
//! Saves from one persister reach the gateway in the order they were
//! requested: each task waits for its predecessor before writing.

use crate::errors::EditorError;
use crate::gateway::{PersistenceGateway, SavePayload};
use crate::DocumentChange;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use weddingsite_document::WeddingDocument;

/// Outcome of one background save
#[derive(Debug, Clone, PartialEq)]
pub enum SaveNotice {
    Saved { payload: SavePayload },
    Failed { payload: SavePayload, reason: String },
}

impl SaveNotice {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveNotice::Saved { .. })
    }
}

pub struct Persister {
    gateway: Arc<dyn PersistenceGateway>,
    owner_id: String,
    notices: mpsc::UnboundedSender<SaveNotice>,
    /// Completion signal of the most recently requested save
    tail: Mutex<Option<oneshot::Receiver<()>>>,
}

impl Persister {
    /// Persister for one owner, plus the receiving end of its notices
    pub fn new(
        gateway: Arc<dyn PersistenceGateway>,
        owner_id: impl Into<String>,
    ) -> (Self, mpsc::UnboundedReceiver<SaveNotice>) {
        let (notices, rx) = mpsc::unbounded_channel();
        let persister = Self {
            gateway,
            owner_id: owner_id.into(),
            notices,
            tail: Mutex::new(None),
        };
        (persister, rx)
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Start a background save. The returned handle may be ignored.
    pub fn persist(&self, payload: SavePayload) -> JoinHandle<()> {
        let gateway = Arc::clone(&self.gateway);
        let owner_id = self.owner_id.clone();
        let notices = self.notices.clone();

        let (done, done_rx) = oneshot::channel();
        let previous = match self.tail.lock() {
            Ok(mut tail) => tail.replace(done_rx),
            Err(poisoned) => poisoned.into_inner().replace(done_rx),
        };

        tokio::spawn(async move {
            if let Some(previous) = previous {
                // A predecessor that panicked or was aborted drops its sender
                let _ = previous.await;
            }

            let outcome = {
                let owner_id = owner_id.clone();
                let payload = payload.clone();
                tokio::task::spawn_blocking(move || gateway.save(&owner_id, &payload))
                    .await
                    .map_err(EditorError::from)
                    .and_then(|result| result.map_err(EditorError::from))
            };

            let notice = match outcome {
                Ok(()) => {
                    debug!(owner = %owner_id, "Saved document");
                    SaveNotice::Saved { payload }
                }
                Err(e) => {
                    warn!(owner = %owner_id, error = %e, "Save failed; local document kept");
                    SaveNotice::Failed {
                        payload,
                        reason: e.to_string(),
                    }
                }
            };

            // Nobody listening is fine
            let _ = notices.send(notice);
            let _ = done.send(());
        })
    }

    /// Persist the patch a commit produced
    pub fn persist_change(&self, change: &DocumentChange) -> JoinHandle<()> {
        self.persist(SavePayload::Patch(change.patch.clone()))
    }

    /// Resend the payload of a failed save
    pub fn retry(&self, notice: SaveNotice) -> Option<JoinHandle<()>> {
        match notice {
            SaveNotice::Failed { payload, .. } => Some(self.persist(payload)),
            SaveNotice::Saved { .. } => None,
        }
    }

    /// Load the owner's document without blocking the runtime
    pub async fn load(&self) -> Result<Option<WeddingDocument>, EditorError> {
        let gateway = Arc::clone(&self.gateway);
        let owner_id = self.owner_id.clone();
        let doc = tokio::task::spawn_blocking(move || gateway.load(&owner_id)).await??;
        Ok(doc)
    }
}
