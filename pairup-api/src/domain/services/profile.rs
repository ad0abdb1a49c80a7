use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::domain::{
    models::{Photo, ProfileFields, UpdateOutcome, UserId, UserProfile},
    ports::{
        inbound::ProfileService,
        outbound::{PhotoAssetStore, UserStore},
    },
    ProfileError,
};

/// Implementation of the ProfileService inbound port.
///
/// Orchestrates photo-list and profile-field mutations over a document
/// store and a photo asset store. Every mutation is issued as a targeted
/// single-document update; the store's per-document serialization is the
/// only concurrency control.
pub struct ProfileServiceImpl<S, A> {
    store: Arc<S>,
    assets: Arc<A>,
}

impl<S, A> ProfileServiceImpl<S, A> {
    pub fn new(store: Arc<S>, assets: Arc<A>) -> Self {
        Self { store, assets }
    }
}

impl<S: UserStore, A: PhotoAssetStore> ProfileServiceImpl<S, A> {
    async fn require_user(
        &self,
        user_id: &UserId,
        cancel: &CancellationToken,
    ) -> Result<UserProfile, ProfileError> {
        race(cancel, self.store.find_by_id(user_id))
            .await?
            .ok_or(ProfileError::NotFound)
    }
}

#[async_trait]
impl<S: UserStore, A: PhotoAssetStore> ProfileService for ProfileServiceImpl<S, A> {
    async fn get_profile(
        &self,
        user_id: &UserId,
        cancel: &CancellationToken,
    ) -> Result<UserProfile, ProfileError> {
        self.require_user(user_id, cancel).await
    }

    async fn add_photo(
        &self,
        user_id: &UserId,
        file: Vec<u8>,
        cancel: &CancellationToken,
    ) -> Result<Photo, ProfileError> {
        let user = self.require_user(user_id, cancel).await?;

        let addresses = race(cancel, self.assets.materialize(file, user_id)).await?;
        let Some(photo) = Photo::from_addresses(&addresses, user.photos.is_empty()) else {
            return Err(ProfileError::MaterializationFailed);
        };

        let outcome = race(cancel, self.store.push_photo(user_id, &photo)).await?;
        if !outcome.is_applied() {
            // The renditions are already on disk; nothing cleans them up.
            warn!(user = %user_id, url = %photo.url, "photo append not applied, asset orphaned");
            return Err(ProfileError::UpdateNotApplied);
        }

        info!(user = %user_id, photo = %photo.id, main = photo.is_main, "photo added");
        Ok(photo)
    }

    async fn promote_main_photo(
        &self,
        user_id: &UserId,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<UpdateOutcome, ProfileError> {
        // Phase one: demote whichever photo currently carries the flag.
        // Matching nothing (no current main) is fine and not surfaced.
        race(cancel, self.store.clear_main_flag(user_id)).await?;

        // Phase two: flag the requested photo. The two phases are not atomic
        // as a whole; a concurrent reader can observe zero or two main
        // photos in between.
        let outcome = race(cancel, self.store.set_main_flag(user_id, url)).await?;
        if outcome.is_applied() {
            info!(user = %user_id, url = %url, "main photo changed");
        }

        Ok(outcome)
    }

    async fn delete_photo(
        &self,
        user_id: &UserId,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<UpdateOutcome, ProfileError> {
        if url.trim().is_empty() {
            return Err(ProfileError::InvalidAddress);
        }

        let user = self.require_user(user_id, cancel).await?;
        let photo = user.photo_by_url(url).ok_or(ProfileError::NotFound)?;

        if photo.is_main {
            return Err(ProfileError::InvalidOperation("cannot delete the main photo"));
        }

        // The list entry must outlive the backing asset, never the other way
        // around: only pull it once the asset is confirmed gone.
        if let Err(err) = race(cancel, self.assets.destroy(photo)).await {
            error!(user = %user_id, photo = %photo.id, %err, "asset destroy failed, keeping list entry");
            return Err(err);
        }

        let outcome = race(cancel, self.store.pull_photo(user_id, url)).await?;
        if !outcome.is_applied() {
            // Asset is gone but the entry survived; compensating action is
            // the caller's call.
            warn!(user = %user_id, url = %url, "photo pull not applied after asset destroy");
        }

        Ok(outcome)
    }

    async fn update_profile_fields(
        &self,
        user_id: &UserId,
        fields: ProfileFields,
        cancel: &CancellationToken,
    ) -> Result<UpdateOutcome, ProfileError> {
        let fields = fields.normalized();

        // A zero modified-count is a benign no-op here: the store does not
        // distinguish an absent user from an unchanged one on this path.
        race(cancel, self.store.set_profile_fields(user_id, &fields)).await
    }
}

/// Races a store call against the caller's cancellation signal.
async fn race<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T, ProfileError>>,
) -> Result<T, ProfileError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ProfileError::Cancelled),
        result = call => result,
    }
}
