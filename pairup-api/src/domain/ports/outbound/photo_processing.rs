use crate::domain::{models::PhotoRendition, ProfileError};

/// Derives storable renditions from raw upload bytes.
///
/// Synchronous on purpose; callers run it on a blocking thread.
pub trait PhotoProcessor: Send + Sync + 'static {
    fn process(&self, input: &[u8]) -> Result<Vec<PhotoRendition>, ProfileError>;
}
