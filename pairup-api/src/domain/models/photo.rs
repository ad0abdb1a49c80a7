use serde::{Deserialize, Serialize};

use super::PhotoId;

/// A single photo in a user's ordered photo list.
///
/// The display address doubles as the photo's natural key within its owner's
/// list. Addresses never change once the photo exists; only the main flag and
/// list membership do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub url: String,
    pub thumb_url: String,
    pub is_main: bool,
}

impl Photo {
    /// Builds a photo from materialized rendition addresses, display address
    /// first. Returns `None` when the asset store produced no addresses.
    pub fn from_addresses(addresses: &[String], is_main: bool) -> Option<Self> {
        let url = addresses.first()?.clone();
        let thumb_url = addresses.get(1).unwrap_or(&url).clone();

        Some(Self {
            id: PhotoId::generate(),
            url,
            thumb_url,
            is_main,
        })
    }
}

/// A single derived rendition of an uploaded photo, ready to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRendition {
    pub label: &'static str,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}
