// thumbnailer/src/core/processor.rs
use super::{Result, SourceItem, ThumbnailConfig};
use crate::processors::{Compressor, Loader, MetadataProcessor, Resizer};

/// Turns one source image into encoded thumbnail bytes.
pub trait ImageTransformer: Send + Sync {
    fn transform(&self, item: &SourceItem) -> Result<Vec<u8>>;
}

pub struct ThumbnailProcessor {
    config: ThumbnailConfig,
    loader: Loader,
    resizer: Resizer,
    compressor: Compressor,
    metadata_processor: MetadataProcessor,
}

impl ThumbnailProcessor {
    pub fn new(config: ThumbnailConfig) -> Self {
        let resizer = Resizer::new(config.algorithm);
        let compressor = Compressor::new(config.quality).with_png_optimization(config.optimize_png);

        Self {
            config,
            loader: Loader::new(),
            resizer,
            compressor,
            metadata_processor: MetadataProcessor::new(),
        }
    }
}

impl ImageTransformer for ThumbnailProcessor {
    fn transform(&self, item: &SourceItem) -> Result<Vec<u8>> {
        let mut image = self.loader.load(&item.path)?;

        if self.config.auto_orient {
            image = self.metadata_processor.auto_orient(image, &item.path);
        }

        let thumbnail = self.resizer.fit(&image, self.config.spec);
        let format = self.compressor.detect_format(&item.path);

        self.compressor.compress_to_bytes(&thumbnail, format)
    }
}
