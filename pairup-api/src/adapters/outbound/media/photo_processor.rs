use image::imageops::FilterType;

use crate::domain::{models::PhotoRendition, ports::outbound::PhotoProcessor, ProfileError};

const DISPLAY_EDGE: u32 = 512;
const THUMB_EDGE: u32 = 165;
const WEBP_QUALITY: f32 = 80.0;

/// Derives the display and thumbnail WebP renditions of an upload.
#[derive(Default)]
pub struct WebpPhotoProcessor;

impl PhotoProcessor for WebpPhotoProcessor {
    fn process(&self, input: &[u8]) -> Result<Vec<PhotoRendition>, ProfileError> {
        let image =
            image::load_from_memory(input).map_err(|_| ProfileError::MaterializationFailed)?;

        Ok(vec![
            encode(&image, "display", DISPLAY_EDGE),
            encode(&image, "thumb", THUMB_EDGE),
        ])
    }
}

fn encode(image: &image::DynamicImage, label: &'static str, edge: u32) -> PhotoRendition {
    let resized = image.resize(edge, edge, FilterType::Lanczos3);
    let rgba = resized.to_rgba8();
    let (width, height) = rgba.dimensions();

    let encoder = webp::Encoder::from_rgba(&rgba, width, height);
    let webp = encoder.encode(WEBP_QUALITY);

    PhotoRendition {
        label,
        bytes: webp.to_vec(),
        mime_type: "image/webp".to_string(),
    }
}
