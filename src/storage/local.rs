// thumbnailer/src/storage/local.rs
use super::{StorageError, StorageResult, StorageSink};
use crate::utils::{format_file_size, sanitize_filename};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalConfig {
    pub output_dir: PathBuf,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("thumbnails"),
        }
    }
}

pub struct LocalSink {
    config: LocalConfig,
}

impl LocalSink {
    pub fn new(config: LocalConfig) -> Self {
        Self { config }
    }

    pub fn target_path(&self, name: &str) -> PathBuf {
        self.config.output_dir.join(sanitize_filename(name))
    }
}

impl StorageSink for LocalSink {
    fn backend(&self) -> &'static str {
        "local"
    }

    fn write(&self, name: &str, bytes: &[u8]) -> StorageResult<()> {
        let io_error = |source| StorageError::Io {
            path: self.config.output_dir.display().to_string(),
            source,
        };

        std::fs::create_dir_all(&self.config.output_dir).map_err(io_error)?;

        let path = self.target_path(name);
        std::fs::write(&path, bytes).map_err(|source| StorageError::Io {
            path: path.display().to_string(),
            source,
        })?;

        log::debug!(
            "Saved thumbnail: {} ({})",
            path.display(),
            format_file_size(bytes.len() as u64)
        );
        Ok(())
    }
}
