// thumbnailer/src/storage/mod.rs
mod file_sync;
mod local;
mod object_store;

pub use file_sync::{FileSyncConfig, FileSyncSink};
pub use local::{LocalConfig, LocalSink};
pub use object_store::{ObjectStoreConfig, ObjectStoreSink};

use crate::core::{Result, StorageKind, ThumbnailError};
use thiserror::Error;

/// Destination for generated thumbnails.
///
/// Implementations are called once per item and must tolerate repeated calls
/// from the same thread. In parallel mode they also receive concurrent writes.
pub trait StorageSink: Send + Sync {
    fn backend(&self) -> &'static str;

    fn write(&self, name: &str, bytes: &[u8]) -> StorageResult<()>;
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("write to {path} failed: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upload rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    pub local: LocalConfig,
    pub object_store: ObjectStoreConfig,
    pub file_sync: FileSyncConfig,
}

/// Builds the sink for `kind`. Missing credentials fail here, before any item is processed.
pub fn open_sink(kind: StorageKind, config: &StorageConfig) -> Result<Box<dyn StorageSink>> {
    let sink: Box<dyn StorageSink> = match kind {
        StorageKind::Local => Box::new(LocalSink::new(config.local.clone())),
        StorageKind::ObjectStore => Box::new(
            ObjectStoreSink::new(config.object_store.clone()).map_err(into_validation)?,
        ),
        StorageKind::FileSync => {
            Box::new(FileSyncSink::new(config.file_sync.clone()).map_err(into_validation)?)
        }
    };

    log::debug!("Opened {} storage", sink.backend());
    Ok(sink)
}

fn into_validation(err: StorageError) -> ThumbnailError {
    match err {
        StorageError::Config(message) => ThumbnailError::Validation(message),
        other => ThumbnailError::Storage(other),
    }
}

pub(crate) fn content_type_for(name: &str) -> &'static str {
    match crate::utils::get_file_extension(std::path::Path::new(name)).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

pub(crate) fn check_response(response: reqwest::blocking::Response) -> StorageResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().unwrap_or_default();
    Err(StorageError::Rejected {
        status: status.as_u16(),
        body: body.chars().take(200).collect(),
    })
}
