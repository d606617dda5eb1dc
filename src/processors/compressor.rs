// thumbnailer/src/processors/compressor.rs
use crate::core::{Result, ThumbnailError};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use oxipng::{optimize_from_memory, Options};
use std::io::Cursor;
use std::path::Path;

/// Encodes thumbnails into the bytes handed to storage.
pub struct Compressor {
    quality: u8,
    optimize_png: bool,
}

impl Compressor {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
            optimize_png: false,
        }
    }

    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }

    pub fn compress_to_bytes(&self, image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());

        match format {
            ImageFormat::Png => {
                image.write_to(&mut buffer, ImageFormat::Png)?;
                if self.optimize_png {
                    return self.optimize_png_bytes(&buffer.into_inner());
                }
            }
            _ => {
                // JPEG has no alpha channel.
                let rgb = image.to_rgb8();
                JpegEncoder::new_with_quality(&mut buffer, self.quality).encode_image(&rgb)?;
            }
        }

        let bytes = buffer.into_inner();
        log::debug!("Encoded {:?} thumbnail ({} bytes)", format, bytes.len());
        Ok(bytes)
    }

    fn optimize_png_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        optimize_from_memory(data, &Options::default())
            .map_err(|e| ThumbnailError::Transform(format!("PNG optimization failed: {}", e)))
    }

    /// Output format follows the source extension; anything unrecognised becomes JPEG.
    pub fn detect_format(&self, path: &Path) -> ImageFormat {
        match crate::utils::get_file_extension(path).as_deref() {
            Some("png") => ImageFormat::Png,
            _ => ImageFormat::Jpeg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_png_and_jpeg() {
        let image = DynamicImage::new_rgba8(8, 8);
        let compressor = Compressor::new(80);

        let png = compressor.compress_to_bytes(&image, ImageFormat::Png).unwrap();
        assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);

        let jpeg = compressor.compress_to_bytes(&image, ImageFormat::Jpeg).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn optimized_png_is_still_png() {
        let image = DynamicImage::new_rgb8(16, 16);
        let png = Compressor::new(80)
            .with_png_optimization(true)
            .compress_to_bytes(&image, ImageFormat::Png)
            .unwrap();
        assert!(image::load_from_memory(&png).is_ok());
    }

    #[test]
    fn format_follows_extension() {
        let compressor = Compressor::new(85);
        assert_eq!(compressor.detect_format(Path::new("cat.PNG")), ImageFormat::Png);
        assert_eq!(compressor.detect_format(Path::new("cat.jpeg")), ImageFormat::Jpeg);
        assert_eq!(compressor.detect_format(Path::new("cat")), ImageFormat::Jpeg);
    }
}
