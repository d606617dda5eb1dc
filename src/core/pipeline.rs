// thumbnailer/src/core/pipeline.rs
use super::processor::ThumbnailProcessor;
use super::{PathKind, Result, RunOutcome, StorageKind, ThumbnailConfig, ThumbnailError};
use crate::processors::{BatchProcessor, ExtensionMatch, InputResolver};
use crate::storage::{open_sink, StorageConfig};
use std::io::Write;
use std::path::PathBuf;

/// The typed parameters of one run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub path: PathBuf,
    pub kind: PathKind,
    pub storage: StorageKind,
}

impl RunRequest {
    pub fn new(path: impl Into<PathBuf>, kind: PathKind) -> Self {
        Self {
            path: path.into(),
            kind,
            storage: StorageKind::default(),
        }
    }

    pub fn with_storage(mut self, storage: StorageKind) -> Self {
        self.storage = storage;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(ThumbnailError::Validation("Path is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub thumbnail: ThumbnailConfig,
    pub storage: StorageConfig,
    pub extension_match: ExtensionMatch,
    pub threads: usize,
    pub verbose: bool,
    pub show_progress: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            thumbnail: ThumbnailConfig::default(),
            storage: StorageConfig::default(),
            extension_match: ExtensionMatch::default(),
            threads: 1,
            verbose: false,
            show_progress: true,
        }
    }
}

/// Validates, resolves the input, opens the sink and runs the batch.
///
/// Every error returned here happens before the first item is processed.
/// Per-item failures are only visible in the returned outcome.
pub fn generate(request: &RunRequest, options: &RunOptions) -> Result<RunOutcome> {
    generate_with_output(request, options, std::io::stdout())
}

/// Same as [`generate`], with diagnostics and the report written to `output`.
pub fn generate_with_output<W: Write + Send>(
    request: &RunRequest,
    options: &RunOptions,
    output: W,
) -> Result<RunOutcome> {
    request.validate()?;
    options.thumbnail.validate()?;

    let sink = open_sink(request.storage, &options.storage)?;
    let items = InputResolver::new(options.extension_match).resolve(&request.path, request.kind)?;

    let processor = BatchProcessor::new(options.threads)?
        .verbose(options.verbose)
        .show_progress(options.show_progress);
    let transformer = ThumbnailProcessor::new(options.thumbnail.clone());

    Ok(processor.run_with_output(items, &transformer, sink.as_ref(), output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_is_rejected() {
        let request = RunRequest::new("", PathKind::SingleFile);
        assert!(matches!(
            generate(&request, &RunOptions::default()),
            Err(ThumbnailError::Validation(_))
        ));
    }

    #[test]
    fn storage_defaults_to_local() {
        let request = RunRequest::new("cat.png", PathKind::SingleFile);
        assert_eq!(request.storage, StorageKind::Local);
    }
}
