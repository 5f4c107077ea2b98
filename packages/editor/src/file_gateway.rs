//! JSON-file document store: one `<owner>.json` per owner in a data directory.
//!
//! Saves are read-merge-write, so they hold the gateway's write lock from the
//! read until the rename lands.

use crate::errors::{GatewayError, GatewayResult};
use crate::gateway::{PersistenceGateway, SavePayload};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use tracing::debug;
use weddingsite_document::WeddingDocument;

#[derive(Debug)]
pub struct JsonFileGateway {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileGateway {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the owner's document file. Owner ids that could escape the
    /// data directory are rejected.
    pub fn path_for(&self, owner_id: &str) -> GatewayResult<PathBuf> {
        let invalid = owner_id.is_empty()
            || owner_id.starts_with('.')
            || owner_id.contains(['/', '\\']);
        if invalid {
            return Err(GatewayError::Rejected(format!("invalid owner id {owner_id:?}")));
        }
        Ok(self.dir.join(format!("{owner_id}.json")))
    }
}

impl PersistenceGateway for JsonFileGateway {
    fn load(&self, owner_id: &str) -> GatewayResult<Option<WeddingDocument>> {
        let path = self.path_for(owner_id)?;
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn save(&self, owner_id: &str, payload: &SavePayload) -> GatewayResult<()> {
        let path = self.path_for(owner_id)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| GatewayError::LockPoisoned("save"))?;

        let stored = self.load(owner_id)?;
        let doc = payload.merge_into(owner_id, stored)?;

        fs::create_dir_all(&self.dir)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut tmp, &doc)?;
        tmp.persist(&path).map_err(|e| e.error)?;

        debug!(owner = %owner_id, path = %path.display(), "Wrote document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use weddingsite_document::{DocumentPatch, FaqItem, ScalarField};

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let gateway = JsonFileGateway::new(dir.path());
        assert!(gateway.load("owner-1").unwrap().is_none());
    }

    #[test]
    fn test_full_save_round_trips() {
        let dir = TempDir::new().unwrap();
        let gateway = JsonFileGateway::new(dir.path().join("data"));
        let mut doc = WeddingDocument::new("w-1", "owner-1");
        doc.apply(&DocumentPatch::scalar(ScalarField::CoupleName1, "Ana"));

        gateway.save("owner-1", &SavePayload::Full(doc)).unwrap();

        let loaded = gateway.load("owner-1").unwrap().unwrap();
        assert_eq!(loaded.scalar(ScalarField::CoupleName1), "Ana");
        assert!(dir.path().join("data/owner-1.json").exists());
    }

    #[test]
    fn test_patch_save_merges_and_retries_cleanly() {
        let dir = TempDir::new().unwrap();
        let gateway = JsonFileGateway::new(dir.path());
        let mut doc = WeddingDocument::new("w-1", "owner-1");
        doc.apply(&DocumentPatch::scalar(ScalarField::CoupleName1, "Ana"));
        gateway.save("owner-1", &SavePayload::Full(doc)).unwrap();

        let mut patch = DocumentPatch::new();
        patch.faqs = Some(vec![FaqItem::starter("f-1")]);
        let payload = SavePayload::Patch(patch);
        gateway.save("owner-1", &payload).unwrap();
        let once = fs::read_to_string(dir.path().join("owner-1.json")).unwrap();
        gateway.save("owner-1", &payload).unwrap();
        let twice = fs::read_to_string(dir.path().join("owner-1.json")).unwrap();

        assert_eq!(once, twice);
        let loaded = gateway.load("owner-1").unwrap().unwrap();
        assert_eq!(loaded.scalar(ScalarField::CoupleName1), "Ana");
        assert_eq!(loaded.faqs().len(), 1);
    }

    #[test]
    fn test_concurrent_patch_saves_all_land() {
        let dir = TempDir::new().unwrap();
        let gateway = JsonFileGateway::new(dir.path());
        gateway
            .save("owner-1", &SavePayload::Full(WeddingDocument::new("w-1", "owner-1")))
            .unwrap();

        let fields = [
            (ScalarField::CoupleName1, "Ana"),
            (ScalarField::CoupleName2, "Ben"),
            (ScalarField::VenueName, "Lakeside Hall"),
            (ScalarField::VenueLocation, "Lake Como"),
        ];
        std::thread::scope(|scope| {
            for (field, value) in fields {
                let gateway = &gateway;
                scope.spawn(move || {
                    let payload = SavePayload::Patch(DocumentPatch::scalar(field, value));
                    gateway.save("owner-1", &payload).unwrap();
                });
            }
        });

        let loaded = gateway.load("owner-1").unwrap().unwrap();
        for (field, value) in fields {
            assert_eq!(loaded.scalar(field), value);
        }
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .filter(|name| name != "owner-1.json")
            .collect();
        assert!(leftovers.is_empty(), "stray temp files: {leftovers:?}");
    }

    #[test]
    fn test_owner_ids_cannot_escape_data_dir() {
        let gateway = JsonFileGateway::new("data");
        for owner in ["", "../etc", "a/b", "a\\b", ".hidden"] {
            assert!(matches!(gateway.path_for(owner), Err(GatewayError::Rejected(_))));
        }
    }

    #[test]
    fn test_corrupt_file_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("owner-1.json"), "{not json").unwrap();
        let gateway = JsonFileGateway::new(dir.path());

        assert!(matches!(
            gateway.load("owner-1"),
            Err(GatewayError::Serialization(_))
        ));
    }
}
