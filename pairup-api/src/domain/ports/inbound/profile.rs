use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{
    models::{Photo, ProfileFields, UpdateOutcome, UserId, UserProfile},
    ProfileError,
};

/// Profile and photo mutations exposed to the calling layer.
///
/// Every operation takes a cancellation token that aborts the in-flight
/// store call; effects already committed to the store are not rolled back.
#[async_trait]
pub trait ProfileService: Send + Sync + 'static {
    async fn get_profile(
        &self,
        user_id: &UserId,
        cancel: &CancellationToken,
    ) -> Result<UserProfile, ProfileError>;

    /// Materializes the upload and appends it to the user's photo list.
    /// The first photo of a user becomes the main photo.
    async fn add_photo(
        &self,
        user_id: &UserId,
        file: Vec<u8>,
        cancel: &CancellationToken,
    ) -> Result<Photo, ProfileError>;

    /// Moves the main flag to the photo with the given display address.
    async fn promote_main_photo(
        &self,
        user_id: &UserId,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<UpdateOutcome, ProfileError>;

    /// Destroys the backing assets and removes the photo from the list.
    /// The main photo cannot be deleted.
    async fn delete_photo(
        &self,
        user_id: &UserId,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<UpdateOutcome, ProfileError>;

    /// Normalizes and persists the scalar profile fields.
    async fn update_profile_fields(
        &self,
        user_id: &UserId,
        fields: ProfileFields,
        cancel: &CancellationToken,
    ) -> Result<UpdateOutcome, ProfileError>;
}
