/// Failures while loading or preparing a document's annotation state.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("cannot read annotation state of {document} for user {user}: {reason}")]
    ReadFailed {
        document: String,
        user: String,
        reason: String,
    },

    #[error("cannot upgrade annotation state of {document} for user {user}: {reason}")]
    UpgradeFailed {
        document: String,
        user: String,
        reason: String,
    },

    #[error("cannot clone annotation state of {document}: {reason}")]
    CloneFailed { document: String, reason: String },

    #[error("offset {begin}..{end} is outside the document text ({length} bytes)")]
    OffsetOutOfBounds {
        begin: usize,
        end: usize,
        length: usize,
    },
}
