use crate::uploaded_image::upload::UploadError;
use image::{imageops, DynamicImage, GenericImageView};

/// Decoded RGB pixels shown in the UI. Kept apart from the raw upload bytes.
#[derive(Clone, PartialEq)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl std::fmt::Debug for PreviewImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rgb_len", &self.rgb.len())
            .finish()
    }
}

pub fn fit_within(image: DynamicImage, max_side: u32) -> DynamicImage {
    if image.width() <= max_side && image.height() <= max_side {
        return image;
    }
    image.resize(max_side, max_side, imageops::FilterType::Triangle)
}

pub fn decode_preview(bytes: &[u8], max_side: u32) -> Result<PreviewImage, UploadError> {
    let image =
        image::load_from_memory(bytes).map_err(|e| UploadError::Decode(e.to_string()))?;

    let rgb = fit_within(image, max_side).to_rgb8();

    Ok(PreviewImage {
        width: rgb.width(),
        height: rgb.height(),
        rgb: rgb.into_raw(),
    })
}
