// thumbnailer/src/processors/metadata.rs
use exif::{In, Reader, Tag};
use image::DynamicImage;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// EXIF orientation values (TIFF tag 0x0112).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Normal,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    Transpose,
    Rotate90,
    Transverse,
    Rotate270,
}

impl Orientation {
    pub fn from_exif(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270,
            _ => Orientation::Normal,
        }
    }

    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        match self {
            Orientation::Normal => image,
            Orientation::FlipHorizontal => image.fliph(),
            Orientation::Rotate180 => image.rotate180(),
            Orientation::FlipVertical => image.flipv(),
            Orientation::Transpose => image.rotate90().fliph(),
            Orientation::Rotate90 => image.rotate90(),
            Orientation::Transverse => image.rotate270().fliph(),
            Orientation::Rotate270 => image.rotate270(),
        }
    }
}

pub struct MetadataProcessor;

impl MetadataProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Reads the orientation tag. Files without EXIF data are treated as upright.
    pub fn read_orientation(&self, path: &Path) -> Orientation {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(_) => return Orientation::Normal,
        };
        let mut bufreader = BufReader::new(file);

        match Reader::new().read_from_container(&mut bufreader) {
            Ok(exif) => exif
                .get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
                .map(Orientation::from_exif)
                .unwrap_or(Orientation::Normal),
            Err(exif::Error::NotFound(_)) => {
                log::debug!("No EXIF data found in {}", path.display());
                Orientation::Normal
            }
            Err(e) => {
                log::debug!("Ignoring unreadable EXIF in {}: {}", path.display(), e);
                Orientation::Normal
            }
        }
    }

    pub fn auto_orient(&self, image: DynamicImage, path: &Path) -> DynamicImage {
        let orientation = self.read_orientation(path);
        if orientation != Orientation::Normal {
            log::debug!("Applying {:?} to {}", orientation, path.display());
        }
        orientation.apply(image)
    }
}

impl Default for MetadataProcessor {
    fn default() -> Self {
        Self::new()
    }
}
