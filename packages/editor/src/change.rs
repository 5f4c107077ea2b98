use weddingsite_document::{CommitResult, DocumentPatch};

/// "Document changed" notification emitted by a successful commit.
///
/// Carries the exact patch that was applied so the caller can forward it to
/// the persistence layer unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentChange {
    pub patch: DocumentPatch,

    /// Document version after the commit
    pub version: u64,
}

impl DocumentChange {
    pub(crate) fn new(patch: DocumentPatch, result: CommitResult) -> Self {
        Self {
            patch,
            version: result.version,
        }
    }
}
