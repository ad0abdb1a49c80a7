use serde::Serialize;

/// Store-reported outcome of a targeted document update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub modified_count: u64,
}

impl UpdateOutcome {
    pub fn new(modified_count: u64) -> Self {
        Self { modified_count }
    }

    /// Whether the update altered exactly one document.
    pub fn is_applied(&self) -> bool {
        self.modified_count == 1
    }
}
