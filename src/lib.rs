mod cli;
pub mod core;
pub mod processors;
pub mod storage;
mod utils;

pub use cli::{Algorithm, Cli};
pub use crate::core::memory::MemoryProbe;
pub use crate::core::pipeline::{generate, generate_with_output, RunOptions, RunRequest};
pub use crate::core::processor::{ImageTransformer, ThumbnailProcessor};
pub use crate::core::report::RunReport;
pub use crate::core::{
    ItemResult, PathKind, ResizeAlgorithm, Result, RunOutcome, SourceItem, StorageKind,
    ThumbnailConfig, ThumbnailError, TransformSpec,
};
pub use processors::{BatchProcessor, ExtensionMatch, InputResolver};
pub use storage::{open_sink, StorageConfig, StorageError, StorageSink};
pub use utils::{bytes_to_megabytes, format_file_size, has_image_extension};

pub mod prelude {
    pub use crate::{
        generate, BatchProcessor, ImageTransformer, InputResolver, PathKind, RunOptions,
        RunRequest, StorageKind, StorageSink, ThumbnailProcessor,
    };
}
