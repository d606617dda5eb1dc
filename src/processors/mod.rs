// thumbnailer/src/processors/mod.rs
mod batch;
mod compressor;
mod loader;
mod metadata;
mod resizer;
mod resolver;

pub use batch::BatchProcessor;
pub use compressor::Compressor;
pub use loader::Loader;
pub use metadata::{MetadataProcessor, Orientation};
pub use resizer::Resizer;
pub use resolver::{ExtensionMatch, InputResolver};

