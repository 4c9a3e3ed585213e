use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageError};
use log::debug;
use std::time::Instant;

/// RGBA pixels ready to be wrapped in an iced image handle.
#[derive(Clone)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Thumbnail")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

pub fn generate_thumbnail(
    bytes: &[u8],
    max_width: u32,
    max_height: u32,
) -> Result<Thumbnail, ImageError> {
    let start_time = Instant::now();

    let img = image::load_from_memory(bytes)?;
    let resized = resize_preserving_aspect_ratio(&img, max_width, max_height);

    let rgba = resized.to_rgba8();
    let (width, height) = rgba.dimensions();

    debug!(
        "Thumbnail {}x{} generated in {:.3}s",
        width,
        height,
        start_time.elapsed().as_secs_f64()
    );

    Ok(Thumbnail {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

fn resize_preserving_aspect_ratio(
    img: &DynamicImage,
    max_width: u32,
    max_height: u32,
) -> DynamicImage {
    let (width, height) = img.dimensions();

    if width <= max_width && height <= max_height {
        return img.clone();
    }

    let (new_width, new_height) = calculate_dimensions(width, height, max_width, max_height);

    let filter = if new_width <= 200 || new_height <= 200 {
        FilterType::Triangle
    } else {
        FilterType::Lanczos3
    };

    img.resize_exact(new_width, new_height, filter)
}

#[inline]
fn calculate_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let width_ratio = max_width as f32 / width as f32;
    let height_ratio = max_height as f32 / height as f32;
    let scale_ratio = width_ratio.min(height_ratio);

    (
        ((width as f32 * scale_ratio).round() as u32).max(1),
        ((height as f32 * scale_ratio).round() as u32).max(1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn downscales_preserving_aspect_ratio() {
        let thumb = generate_thumbnail(&png_bytes(800, 400), 200, 200).unwrap();

        assert_eq!((thumb.width, thumb.height), (200, 100));
        assert_eq!(thumb.pixels.len(), 200 * 100 * 4);
    }

    #[test]
    fn never_upscales() {
        let thumb = generate_thumbnail(&png_bytes(50, 30), 200, 200).unwrap();
        assert_eq!((thumb.width, thumb.height), (50, 30));
    }

    #[test]
    fn rejects_non_image_bytes() {
        assert!(generate_thumbnail(b"<html>not an image</html>", 100, 100).is_err());
    }

    #[test]
    fn extreme_ratios_keep_one_pixel() {
        assert_eq!(calculate_dimensions(10_000, 10, 100, 100), (100, 1));
    }
}
