// thumbnailer/src/core/mod.rs
pub mod memory;
pub mod pipeline;
pub mod processor;
pub mod report;

use crate::storage::StorageError;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Whether the input path names one image or a directory to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PathKind {
    #[value(name = "file", alias = "single-file")]
    SingleFile,
    #[value(name = "directory", alias = "dir")]
    Directory,
}

impl FromStr for PathKind {
    type Err = ThumbnailError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Err(ThumbnailError::Validation("Path kind is required".to_string())),
            "file" | "single-file" => Ok(PathKind::SingleFile),
            "directory" | "dir" => Ok(PathKind::Directory),
            other => Err(ThumbnailError::Validation(format!(
                "Unknown path kind '{}' (expected 'file' or 'directory')",
                other
            ))),
        }
    }
}

/// Backend that receives the generated thumbnails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StorageKind {
    #[default]
    Local,
    #[value(alias = "s3")]
    ObjectStore,
    #[value(alias = "dropbox")]
    FileSync,
}

impl FromStr for StorageKind {
    type Err = ThumbnailError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Err(ThumbnailError::Validation("Storage kind is required".to_string())),
            "local" => Ok(StorageKind::Local),
            "object-store" | "s3" => Ok(StorageKind::ObjectStore),
            "file-sync" | "dropbox" => Ok(StorageKind::FileSync),
            other => Err(ThumbnailError::Validation(format!(
                "Unknown storage '{}' (expected 'local', 'object-store' or 'file-sync')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeAlgorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

/// Bounding box every thumbnail must fit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformSpec {
    pub width: u32,
    pub height: u32,
}

impl Default for TransformSpec {
    fn default() -> Self {
        Self {
            width: 150,
            height: 150,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    pub spec: TransformSpec,
    pub algorithm: ResizeAlgorithm,
    pub quality: u8,
    pub optimize_png: bool,
    pub auto_orient: bool,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            spec: TransformSpec::default(),
            algorithm: ResizeAlgorithm::Lanczos3,
            quality: 85,
            optimize_png: false,
            auto_orient: true,
        }
    }
}

impl ThumbnailConfig {
    pub fn validate(&self) -> Result<()> {
        if self.spec.width == 0 || self.spec.height == 0 {
            return Err(ThumbnailError::Validation(
                "Thumbnail bounding box must be non-empty".to_string(),
            ));
        }

        if self.quality == 0 || self.quality > 100 {
            return Err(ThumbnailError::Validation(
                "Quality must be between 1 and 100".to_string(),
            ));
        }

        Ok(())
    }
}

/// One input image, as produced by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    pub path: PathBuf,
    pub display_name: String,
}

impl SourceItem {
    pub fn new(path: PathBuf) -> Self {
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Self { path, display_name }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemResult {
    Succeeded,
    Failed(String),
}

#[derive(Debug, Default, Clone)]
pub struct RunOutcome {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed: Duration,
    /// Peak resident memory in bytes.
    pub peak_memory: u64,
    pub failures: Vec<(String, String)>,
}

impl RunOutcome {
    pub fn is_consistent(&self) -> bool {
        self.succeeded + self.failed == self.total
    }
}

#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Cannot read {path}: {reason}")]
    Resolution { path: PathBuf, reason: String },

    #[error("Transform failed: {0}")]
    Transform(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ThumbnailError>;
