use thiserror::Error;

/// Errors that can arise while loading the item catalog or driving the
/// augment lifecycle.
///
/// Declined installs and removals from empty slots are not errors; they are
/// reported through [`InstallOutcome`](super::InstallOutcome) and
/// [`RemoveOutcome`](super::RemoveOutcome).
#[derive(Debug, Error)]
pub enum AugmentError {
    /// Wrapper around IO errors (reading the catalog file, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around JSON errors raised while decoding the catalog.
    #[error("catalog format error: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog declares the same item id twice.
    #[error("duplicate catalog id: {0}")]
    DuplicateId(String),

    /// No augment profile exists for the requested id.
    #[error("unknown augment: {0}")]
    UnknownAugment(String),

    /// No catalog record exists for the requested id.
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// The slot index does not exist on the host item.
    #[error("slot {slot} out of range for {host} ({count} slots)")]
    SlotOutOfRange {
        host: String,
        slot: usize,
        count: usize,
    },

    /// Installing consumes one unit of the augment and none is held.
    #[error("{0} is not in the inventory")]
    NotInInventory(String),

    /// A scripted session line could not be understood.
    #[error("script line {line}: {reason}")]
    Script { line: usize, reason: String },
}
