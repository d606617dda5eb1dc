// thumbnailer/src/cli.rs
use crate::core::pipeline::{RunOptions, RunRequest};
use crate::core::{PathKind, ResizeAlgorithm, StorageKind, ThumbnailConfig, TransformSpec};
use crate::processors::ExtensionMatch;
use crate::storage::{FileSyncConfig, LocalConfig, ObjectStoreConfig, StorageConfig};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Algorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Algorithm> for ResizeAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Nearest => ResizeAlgorithm::Nearest,
            Algorithm::Bilinear => ResizeAlgorithm::Bilinear,
            Algorithm::Bicubic => ResizeAlgorithm::Bicubic,
            Algorithm::Lanczos3 => ResizeAlgorithm::Lanczos3,
        }
    }
}

/// Generate 150x150 thumbnails for an image or a directory of images.
#[derive(Debug, Parser)]
#[command(name = "thumbnailer", version, about)]
pub struct Cli {
    /// Image file or directory to process
    #[arg(short, long)]
    pub path: PathBuf,

    /// Whether PATH is a single file or a directory
    #[arg(short, long, value_enum)]
    pub kind: PathKind,

    /// Where thumbnails are stored
    #[arg(short, long, value_enum, default_value_t = StorageKind::Local, env = "THUMBNAILER_STORAGE")]
    pub storage: StorageKind,

    /// Output directory for local storage
    #[arg(short, long, default_value = "thumbnails", env = "THUMBNAILER_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Object storage bucket
    #[arg(long, env = "THUMBNAILER_BUCKET")]
    pub bucket: Option<String>,

    /// Object storage endpoint
    #[arg(long, default_value = "https://storage.googleapis.com", env = "THUMBNAILER_OBJECT_ENDPOINT")]
    pub object_endpoint: String,

    /// Key prefix inside the bucket
    #[arg(long, default_value = "thumbnails/", env = "THUMBNAILER_OBJECT_PREFIX")]
    pub object_prefix: String,

    /// Bearer token for object storage
    #[arg(long, env = "THUMBNAILER_OBJECT_TOKEN", hide_env_values = true)]
    pub object_token: Option<String>,

    /// Access token for file sync storage
    #[arg(long, env = "THUMBNAILER_SYNC_TOKEN", hide_env_values = true)]
    pub sync_token: Option<String>,

    /// Remote folder for file sync storage
    #[arg(long, default_value = "/thumbnails", env = "THUMBNAILER_SYNC_FOLDER")]
    pub sync_folder: String,

    /// File sync content endpoint
    #[arg(long, default_value = "https://content.dropboxapi.com", env = "THUMBNAILER_SYNC_ENDPOINT")]
    pub sync_endpoint: String,

    /// Upload timeout in seconds for remote storage
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = 85, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Resize filter
    #[arg(short, long, value_enum, default_value_t = Algorithm::Lanczos3)]
    pub algorithm: Algorithm,

    /// Keep pixel data as stored, ignoring the EXIF orientation tag
    #[arg(long)]
    pub no_auto_orient: bool,

    /// Run PNG thumbnails through oxipng
    #[arg(long)]
    pub optimize_png: bool,

    /// Match jpg/jpeg/png extensions case-insensitively when scanning
    #[arg(long)]
    pub ignore_case: bool,

    /// Worker threads (1 = sequential, 0 = all cores)
    #[arg(short = 'j', long, default_value_t = 1)]
    pub threads: usize,

    /// Print timing and memory usage, and enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn request(&self) -> RunRequest {
        RunRequest::new(self.path.clone(), self.kind).with_storage(self.storage)
    }

    pub fn options(&self) -> RunOptions {
        RunOptions {
            thumbnail: ThumbnailConfig {
                spec: TransformSpec::default(),
                algorithm: self.algorithm.into(),
                quality: self.quality,
                optimize_png: self.optimize_png,
                auto_orient: !self.no_auto_orient,
            },
            storage: StorageConfig {
                local: LocalConfig {
                    output_dir: self.output_dir.clone(),
                },
                object_store: ObjectStoreConfig {
                    endpoint: self.object_endpoint.clone(),
                    bucket: self.bucket.clone(),
                    prefix: self.object_prefix.clone(),
                    token: self.object_token.clone(),
                    timeout_secs: self.timeout,
                },
                file_sync: FileSyncConfig {
                    endpoint: self.sync_endpoint.clone(),
                    token: self.sync_token.clone(),
                    folder: self.sync_folder.clone(),
                    timeout_secs: self.timeout,
                },
            },
            extension_match: if self.ignore_case {
                ExtensionMatch::IgnoreCase
            } else {
                ExtensionMatch::Exact
            },
            threads: self.threads,
            verbose: self.verbose,
            show_progress: true,
        }
    }
}
