/// Image preprocessing for Teachable Machine image models.
///
/// Matches what the exported model was trained on: centre square crop,
/// resize to `image_size`, RGB, scaled to [-1, 1].
use image::imageops::FilterType;
use image::DynamicImage;
use lens_model_cache::MAX_IMAGE_SIZE;

use crate::error::{PipelineError, Result};

/// Input tensor in NHWC layout with a batch of one.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    pub data: Vec<f32>,
    pub width: u32,
    pub height: u32,
    pub channels: u32,
}

impl ImageTensor {
    /// `[1, height, width, channels]`
    pub fn shape(&self) -> [usize; 4] {
        [1, self.height as usize, self.width as usize, self.channels as usize]
    }

    /// Value at pixel (x, y), channel c.
    pub fn at(&self, x: u32, y: u32, c: u32) -> f32 {
        let idx = ((y * self.width + x) * self.channels + c) as usize;
        self.data[idx]
    }
}

/// Decode encoded image bytes (PNG/JPEG) and preprocess.
pub fn preprocess_bytes(bytes: &[u8], image_size: u32) -> Result<ImageTensor> {
    if bytes.is_empty() {
        return Err(PipelineError::InvalidImage("image payload is empty".to_string()));
    }
    let decoded = image::load_from_memory(bytes)?;
    preprocess_image(&decoded, image_size)
}

pub fn preprocess_image(image: &DynamicImage, image_size: u32) -> Result<ImageTensor> {
    if image_size == 0 || image_size > MAX_IMAGE_SIZE {
        return Err(PipelineError::InvalidImage(format!(
            "target size must be in 1..={MAX_IMAGE_SIZE}, got {image_size}"
        )));
    }
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidImage("image has no pixels".to_string()));
    }

    let side = width.min(height);
    let x = (width - side) / 2;
    let y = (height - side) / 2;

    let rgb = image
        .crop_imm(x, y, side, side)
        .resize_exact(image_size, image_size, FilterType::Triangle)
        .to_rgb8();

    let data = rgb
        .as_raw()
        .iter()
        .map(|v| *v as f32 / 127.5 - 1.0)
        .collect();

    Ok(ImageTensor {
        data,
        width: image_size,
        height: image_size,
        channels: 3,
    })
}
