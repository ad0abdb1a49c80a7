use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, RwLock,
};

use async_trait::async_trait;

use crate::domain::{
    models::{Photo, UserId},
    ports::outbound::PhotoAssetStore,
    ProfileError,
};

/// In-memory photo asset store with scriptable outcomes.
#[derive(Clone)]
pub struct MemoryPhotoAssetStore {
    addresses: Vec<String>,
    fail_destroy: bool,
    destroyed: Arc<RwLock<Vec<String>>>,
    materialize_calls: Arc<AtomicUsize>,
}

impl Default for MemoryPhotoAssetStore {
    fn default() -> Self {
        Self {
            addresses: vec!["a-display".to_string(), "a-thumb".to_string()],
            fail_destroy: false,
            destroyed: Arc::default(),
            materialize_calls: Arc::default(),
        }
    }
}

impl MemoryPhotoAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Addresses every materialization will return.
    pub fn with_addresses(mut self, addresses: Vec<String>) -> Self {
        self.addresses = addresses;
        self
    }

    /// Make every destroy fail.
    pub fn with_destroy_failure(mut self) -> Self {
        self.fail_destroy = true;
        self
    }

    /// Display addresses of destroyed photos (for test assertions).
    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.read().unwrap().clone()
    }

    pub fn materialize_calls(&self) -> usize {
        self.materialize_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PhotoAssetStore for MemoryPhotoAssetStore {
    async fn materialize(
        &self,
        _file: Vec<u8>,
        _owner: &UserId,
    ) -> Result<Vec<String>, ProfileError> {
        self.materialize_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.addresses.clone())
    }

    async fn destroy(&self, photo: &Photo) -> Result<(), ProfileError> {
        if self.fail_destroy {
            return Err(ProfileError::storage("injected destroy failure"));
        }

        self.destroyed.write().unwrap().push(photo.url.clone());
        Ok(())
    }
}
