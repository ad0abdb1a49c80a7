use async_trait::async_trait;

use crate::domain::{
    models::{Photo, ProfileFields, UpdateOutcome, UserId, UserProfile},
    ProfileError,
};

/// Atomic single-document update primitives over the user aggregate.
///
/// Each mutation targets exactly one user document and reports the store's
/// modified-count. Multi-step sequences built on top of these primitives are
/// not atomic as a whole; conflict resolution is delegated to the store's
/// per-document update serialization.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<UserProfile>, ProfileError>;

    /// Appends a photo to the end of the user's photo list.
    async fn push_photo(
        &self,
        user_id: &UserId,
        photo: &Photo,
    ) -> Result<UpdateOutcome, ProfileError>;

    /// Clears the main flag on the first photo currently carrying it.
    /// Matching nothing is a no-op, not an error.
    async fn clear_main_flag(&self, user_id: &UserId) -> Result<UpdateOutcome, ProfileError>;

    /// Sets the main flag on the first photo with the given display address.
    async fn set_main_flag(
        &self,
        user_id: &UserId,
        url: &str,
    ) -> Result<UpdateOutcome, ProfileError>;

    /// Removes the photo with the given display address from the list.
    async fn pull_photo(&self, user_id: &UserId, url: &str)
        -> Result<UpdateOutcome, ProfileError>;

    /// Overwrites the scalar profile fields. Values are persisted as given;
    /// normalization happens upstream.
    async fn set_profile_fields(
        &self,
        user_id: &UserId,
        fields: &ProfileFields,
    ) -> Result<UpdateOutcome, ProfileError>;
}
