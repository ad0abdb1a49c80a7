use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    models::{Photo, UserId},
    ports::outbound::{PhotoAssetStore, PhotoProcessor},
    ProfileError,
};

/// Filesystem-backed photo asset store.
///
/// Renditions live under `<root>/<owner>/<stem>_<label>.webp` and are
/// addressed as `<public_base>/<owner>/<stem>_<label>.webp`, so an address
/// maps back to its file by swapping the base for the root.
pub struct DiskPhotoAssetStore<P> {
    root: PathBuf,
    public_base: String,
    processor: Arc<P>,
}

impl<P> DiskPhotoAssetStore<P> {
    pub fn new(
        root: impl Into<PathBuf>,
        public_base: impl Into<String>,
        processor: Arc<P>,
    ) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
            processor,
        }
    }

    fn path_for(&self, owner: &UserId, file_name: &str) -> PathBuf {
        self.root.join(owner.as_str()).join(file_name)
    }

    fn address_for(&self, owner: &UserId, file_name: &str) -> String {
        format!("{}/{}/{}", self.public_base, owner.as_str(), file_name)
    }

    /// Maps a public address back to the file it was materialized as.
    fn path_for_address(&self, address: &str) -> Option<PathBuf> {
        let relative = address
            .strip_prefix(&self.public_base)?
            .trim_start_matches('/');
        if relative.is_empty() {
            return None;
        }

        Some(self.root.join(relative))
    }
}

#[async_trait]
impl<P: PhotoProcessor> PhotoAssetStore for DiskPhotoAssetStore<P> {
    async fn materialize(
        &self,
        file: Vec<u8>,
        owner: &UserId,
    ) -> Result<Vec<String>, ProfileError> {
        let processor = Arc::clone(&self.processor);
        let renditions = tokio::task::spawn_blocking(move || processor.process(&file))
            .await
            .map_err(|err| ProfileError::storage(format!("processing task failed: {err}")))??;

        let dir = self.root.join(owner.as_str());
        fs::create_dir_all(&dir)
            .await
            .map_err(|err| ProfileError::storage(err.to_string()))?;

        let stem = Uuid::new_v4();
        let mut addresses = Vec::with_capacity(renditions.len());
        for rendition in &renditions {
            let file_name = format!("{stem}_{}.webp", rendition.label);
            fs::write(self.path_for(owner, &file_name), &rendition.bytes)
                .await
                .map_err(|err| ProfileError::storage(err.to_string()))?;
            addresses.push(self.address_for(owner, &file_name));
        }

        info!(owner = %owner, renditions = addresses.len(), "photo renditions materialized");
        Ok(addresses)
    }

    async fn destroy(&self, photo: &Photo) -> Result<(), ProfileError> {
        for address in [&photo.url, &photo.thumb_url] {
            let Some(path) = self.path_for_address(address) else {
                warn!(address = %address, "address does not map under the storage root");
                return Err(ProfileError::storage(format!(
                    "unresolvable photo address: {address}"
                )));
            };

            match fs::remove_file(&path).await {
                Ok(()) => {}
                // A rendition that is already gone is not a failure.
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(ProfileError::storage(err.to_string())),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::media::WebpPhotoProcessor;
    use crate::domain::models::PhotoId;

    fn png_fixture() -> Vec<u8> {
        let pixels = image::RgbaImage::from_pixel(8, 8, image::Rgba([120, 40, 200, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(pixels)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .unwrap();
        bytes
    }

    #[tokio::test]
    async fn materialize_writes_renditions_and_destroy_removes_them() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            DiskPhotoAssetStore::new(dir.path(), "/assets", Arc::new(WebpPhotoProcessor));
        let owner = UserId::new("u1");

        let addresses = store.materialize(png_fixture(), &owner).await.unwrap();

        assert_eq!(addresses.len(), 2);
        for address in &addresses {
            let path = store.path_for_address(address).unwrap();
            assert!(path.exists(), "missing rendition at {}", path.display());
        }

        let photo = Photo {
            id: PhotoId::generate(),
            url: addresses[0].clone(),
            thumb_url: addresses[1].clone(),
            is_main: false,
        };
        store.destroy(&photo).await.unwrap();

        for address in &addresses {
            assert!(!store.path_for_address(address).unwrap().exists());
        }
    }

    #[tokio::test]
    async fn destroy_rejects_addresses_outside_the_public_base() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            DiskPhotoAssetStore::new(dir.path(), "/assets", Arc::new(WebpPhotoProcessor));

        let photo = Photo {
            id: PhotoId::generate(),
            url: "https://elsewhere.example/p.webp".to_string(),
            thumb_url: "https://elsewhere.example/t.webp".to_string(),
            is_main: false,
        };

        let err = store.destroy(&photo).await.unwrap_err();
        assert!(matches!(err, ProfileError::Storage(_)));
    }

    #[tokio::test]
    async fn destroy_tolerates_already_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            DiskPhotoAssetStore::new(dir.path(), "/assets", Arc::new(WebpPhotoProcessor));

        let photo = Photo {
            id: PhotoId::generate(),
            url: "/assets/u1/gone_display.webp".to_string(),
            thumb_url: "/assets/u1/gone_thumb.webp".to_string(),
            is_main: false,
        };

        store.destroy(&photo).await.unwrap();
    }
}
