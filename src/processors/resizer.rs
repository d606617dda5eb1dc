// thumbnailer/src/processors/resizer.rs
use crate::core::{ResizeAlgorithm, TransformSpec};
use image::{imageops::FilterType, DynamicImage, GenericImageView};

pub struct Resizer {
    algorithm: ResizeAlgorithm,
}

impl Resizer {
    pub fn new(algorithm: ResizeAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Shrinks `image` to fit inside the box. Images already inside it are returned unchanged.
    pub fn fit(&self, image: &DynamicImage, spec: TransformSpec) -> DynamicImage {
        let (orig_width, orig_height) = image.dimensions();
        let (width, height) = Self::fit_dimensions(orig_width, orig_height, spec);

        if width == orig_width && height == orig_height {
            log::debug!("Image already fits {}x{}, skipping resize", spec.width, spec.height);
            return image.clone();
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{}",
            orig_width,
            orig_height,
            width,
            height
        );

        image.resize_exact(width, height, self.get_filter_type())
    }

    pub fn fit_dimensions(orig_w: u32, orig_h: u32, spec: TransformSpec) -> (u32, u32) {
        if orig_w == 0 || orig_h == 0 || (orig_w <= spec.width && orig_h <= spec.height) {
            return (orig_w, orig_h);
        }

        let ratio_w = spec.width as f64 / orig_w as f64;
        let ratio_h = spec.height as f64 / orig_h as f64;
        let ratio = ratio_w.min(ratio_h);

        let new_w = (orig_w as f64 * ratio).round() as u32;
        let new_h = (orig_h as f64 * ratio).round() as u32;

        (new_w.clamp(1, spec.width), new_h.clamp(1, spec.height))
    }

    fn get_filter_type(&self) -> FilterType {
        match self.algorithm {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}
