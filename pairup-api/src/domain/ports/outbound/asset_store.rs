use async_trait::async_trait;

use crate::domain::{
    models::{Photo, UserId},
    ProfileError,
};

/// External store holding the photo files themselves.
///
/// Writes to this store are not transactionally coupled to the document
/// updates that follow them.
#[async_trait]
pub trait PhotoAssetStore: Send + Sync + 'static {
    /// Persists derived renditions of an upload and returns their addresses,
    /// display address first.
    async fn materialize(
        &self,
        file: Vec<u8>,
        owner: &UserId,
    ) -> Result<Vec<String>, ProfileError>;

    /// Deletes every rendition backing the photo.
    async fn destroy(&self, photo: &Photo) -> Result<(), ProfileError>;
}
