use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::{
    models::{Photo, ProfileFields, UpdateOutcome, UserId, UserProfile},
    ports::outbound::UserStore,
    ProfileError,
};

/// In-memory user store mirroring the document-store primitives.
///
/// Each primitive mutates under a single lock acquisition, so it is atomic
/// per "document" exactly like the real store's single-statement updates.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<UserId, UserProfile>>>,
    reject_pushes: bool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user aggregate.
    pub fn with_user(self, user: UserProfile) -> Self {
        self.users.write().unwrap().insert(user.id.clone(), user);
        self
    }

    /// Make every append report a modified-count of zero.
    pub fn with_push_rejected(mut self) -> Self {
        self.reject_pushes = true;
        self
    }

    /// Current aggregate state (for test assertions).
    pub fn user(&self, user_id: &UserId) -> Option<UserProfile> {
        self.users.read().unwrap().get(user_id).cloned()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<UserProfile>, ProfileError> {
        Ok(self.user(user_id))
    }

    async fn push_photo(
        &self,
        user_id: &UserId,
        photo: &Photo,
    ) -> Result<UpdateOutcome, ProfileError> {
        if self.reject_pushes {
            return Ok(UpdateOutcome::new(0));
        }

        let mut users = self.users.write().unwrap();
        match users.get_mut(user_id) {
            Some(user) => {
                user.photos.push(photo.clone());
                Ok(UpdateOutcome::new(1))
            }
            None => Ok(UpdateOutcome::new(0)),
        }
    }

    async fn clear_main_flag(&self, user_id: &UserId) -> Result<UpdateOutcome, ProfileError> {
        let mut users = self.users.write().unwrap();
        let Some(user) = users.get_mut(user_id) else {
            return Ok(UpdateOutcome::new(0));
        };

        match user.photos.iter_mut().find(|photo| photo.is_main) {
            Some(photo) => {
                photo.is_main = false;
                Ok(UpdateOutcome::new(1))
            }
            None => Ok(UpdateOutcome::new(0)),
        }
    }

    async fn set_main_flag(
        &self,
        user_id: &UserId,
        url: &str,
    ) -> Result<UpdateOutcome, ProfileError> {
        let mut users = self.users.write().unwrap();
        let Some(user) = users.get_mut(user_id) else {
            return Ok(UpdateOutcome::new(0));
        };

        match user.photos.iter_mut().find(|photo| photo.url == url) {
            Some(photo) => {
                photo.is_main = true;
                Ok(UpdateOutcome::new(1))
            }
            None => Ok(UpdateOutcome::new(0)),
        }
    }

    async fn pull_photo(
        &self,
        user_id: &UserId,
        url: &str,
    ) -> Result<UpdateOutcome, ProfileError> {
        let mut users = self.users.write().unwrap();
        let Some(user) = users.get_mut(user_id) else {
            return Ok(UpdateOutcome::new(0));
        };

        let before = user.photos.len();
        user.photos.retain(|photo| photo.url != url);

        Ok(UpdateOutcome::new(u64::from(user.photos.len() < before)))
    }

    async fn set_profile_fields(
        &self,
        user_id: &UserId,
        fields: &ProfileFields,
    ) -> Result<UpdateOutcome, ProfileError> {
        let mut users = self.users.write().unwrap();
        let Some(user) = users.get_mut(user_id) else {
            return Ok(UpdateOutcome::new(0));
        };

        user.introduction = fields.introduction.clone();
        user.looking_for = fields.looking_for.clone();
        user.interests = fields.interests.clone();
        user.city = fields.city.clone();
        user.country = fields.country.clone();

        Ok(UpdateOutcome::new(1))
    }
}
