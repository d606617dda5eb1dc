#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use image::GenericImageView;
    use thumbnailer::storage::LocalConfig;
    use thumbnailer::{
        generate, generate_with_output, BatchProcessor, InputResolver, PathKind, RunOptions,
        RunRequest, StorageError, StorageKind, StorageSink, ThumbnailConfig, ThumbnailError,
        ThumbnailProcessor,
    };

    fn save_image(dir: &TempDir, name: &str, width: u32, height: u32) {
        let path = dir.child(name);
        std::fs::create_dir_all(path.path().parent().unwrap()).unwrap();
        image::RgbImage::new(width, height).save(path.path()).unwrap();
    }

    fn local_options(output: &TempDir) -> RunOptions {
        let mut options = RunOptions {
            show_progress: false,
            ..Default::default()
        };
        options.storage.local = LocalConfig {
            output_dir: output.path().to_path_buf(),
        };
        options
    }

    struct FailingSink;

    impl StorageSink for FailingSink {
        fn backend(&self) -> &'static str {
            "failing"
        }

        fn write(&self, _name: &str, _bytes: &[u8]) -> Result<(), StorageError> {
            Err(StorageError::Rejected {
                status: 500,
                body: "bucket unavailable".to_string(),
            })
        }
    }

    #[test]
    fn test_single_file_to_local_storage() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        save_image(&input, "cat.png", 600, 400);

        let request = RunRequest::new(input.child("cat.png").path(), PathKind::SingleFile);
        let mut printed: Vec<u8> = Vec::new();
        let outcome = generate_with_output(&request, &local_options(&output), &mut printed).unwrap();

        assert_eq!((outcome.total, outcome.succeeded, outcome.failed), (1, 1, 0));
        let printed = String::from_utf8(printed).unwrap();
        assert!(printed.contains("Success: 1, Fail: 0"));

        let thumb = image::open(output.child("cat.png").path()).unwrap();
        assert_eq!(thumb.dimensions(), (150, 100));
    }

    #[test]
    fn test_single_missing_file_counts_as_failure() {
        let output = TempDir::new().unwrap();
        let request = RunRequest::new("no-such-cat.png", PathKind::SingleFile);

        let outcome = generate(&request, &local_options(&output)).unwrap();

        assert_eq!(outcome.total, 1);
        assert_eq!((outcome.succeeded, outcome.failed), (0, 1));
    }

    #[test]
    fn test_directory_filters_extensions() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        for name in ["a.jpg", "b.jpg", "nested/c.jpg", "d.png", "e.png"] {
            save_image(&input, name, 300, 300);
        }
        input.child("notes.txt").write_str("not an image").unwrap();

        let request = RunRequest::new(input.path(), PathKind::Directory);
        let outcome = generate(&request, &local_options(&output)).unwrap();

        assert_eq!(outcome.total, 5);
        assert_eq!(outcome.succeeded, 5);
        assert!(output.child("c.jpg").path().exists());
        assert!(!output.child("notes.txt").path().exists());
    }

    #[test]
    fn test_repeated_runs_have_same_total() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        save_image(&input, "a.png", 10, 10);
        save_image(&input, "b.jpg", 10, 10);

        let request = RunRequest::new(input.path(), PathKind::Directory);
        let first = generate(&request, &local_options(&output)).unwrap();
        let second = generate(&request, &local_options(&output)).unwrap();

        assert_eq!(first.total, 2);
        assert_eq!(first.total, second.total);
    }

    #[test]
    fn test_missing_directory_aborts() {
        let output = TempDir::new().unwrap();
        let missing = output.path().join("images");
        let request = RunRequest::new(&missing, PathKind::Directory);

        let mut printed: Vec<u8> = Vec::new();
        let result = generate_with_output(&request, &local_options(&output), &mut printed);

        assert!(matches!(result, Err(ThumbnailError::Resolution { .. })));
        assert!(printed.is_empty());
    }

    #[test]
    fn test_remote_storage_without_credentials_aborts() {
        let input = TempDir::new().unwrap();
        save_image(&input, "a.png", 10, 10);

        let request =
            RunRequest::new(input.path(), PathKind::Directory).with_storage(StorageKind::FileSync);
        let result = generate(&request, &RunOptions::default());

        assert!(matches!(result, Err(ThumbnailError::Validation(_))));
    }

    #[test]
    fn test_failing_sink_does_not_abort() {
        let input = TempDir::new().unwrap();
        for name in ["a.jpg", "b.png", "c.png"] {
            save_image(&input, name, 20, 20);
        }

        let items = InputResolver::default()
            .resolve(input.path(), PathKind::Directory)
            .unwrap();
        let transformer = ThumbnailProcessor::new(ThumbnailConfig::default());
        let outcome = BatchProcessor::sequential()
            .show_progress(false)
            .run(items, &transformer, &FailingSink);

        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.succeeded, 0);
        assert_eq!(outcome.failed, 3);
        assert!(outcome.failures.iter().all(|(_, reason)| reason.contains("bucket unavailable")));
    }

    #[test]
    fn test_corrupt_image_does_not_stop_batch() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        save_image(&input, "good.png", 400, 800);
        input.child("broken.jpg").write_str("garbage").unwrap();

        let request = RunRequest::new(input.path(), PathKind::Directory);
        let mut printed: Vec<u8> = Vec::new();
        let outcome = generate_with_output(&request, &local_options(&output), &mut printed).unwrap();

        assert_eq!((outcome.total, outcome.succeeded, outcome.failed), (2, 1, 1));
        assert_eq!(outcome.failures[0].0, "broken.jpg");
        let printed = String::from_utf8(printed).unwrap();
        assert!(printed.lines().any(|line| line.starts_with("Failed to process broken.jpg: ")));
        assert!(printed.contains("Success: 1, Fail: 1"));

        let thumb = image::open(output.child("good.png").path()).unwrap();
        assert_eq!(thumb.dimensions(), (75, 150));
    }
}
