use serde::{Deserialize, Serialize};

use super::{Photo, UserId};

/// The user aggregate: scalar profile fields plus the ordered photo list.
///
/// The document is the unit of consistency; all mutations go through
/// targeted field or array updates scoped to one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub introduction: String,
    pub looking_for: String,
    pub interests: String,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl UserProfile {
    pub fn main_photo(&self) -> Option<&Photo> {
        self.photos.iter().find(|photo| photo.is_main)
    }

    pub fn photo_by_url(&self, url: &str) -> Option<&Photo> {
        self.photos.iter().find(|photo| photo.url == url)
    }
}

/// Free-text profile fields as submitted by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub introduction: String,
    pub looking_for: String,
    pub interests: String,
    pub city: String,
    pub country: String,
}

impl ProfileFields {
    /// Trims every field and lower-cases the location fields.
    pub fn normalized(&self) -> Self {
        Self {
            introduction: self.introduction.trim().to_string(),
            looking_for: self.looking_for.trim().to_string(),
            interests: self.interests.trim().to_string(),
            city: self.city.trim().to_lowercase(),
            country: self.country.trim().to_lowercase(),
        }
    }
}
