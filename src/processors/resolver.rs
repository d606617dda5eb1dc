// thumbnailer/src/processors/resolver.rs
use crate::core::{PathKind, Result, SourceItem, ThumbnailError};
use crate::utils::has_image_extension;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtensionMatch {
    #[default]
    Exact,
    IgnoreCase,
}

/// Turns the input path into the list of images to process.
#[derive(Debug, Clone, Default)]
pub struct InputResolver {
    extension_match: ExtensionMatch,
}

impl InputResolver {
    pub fn new(extension_match: ExtensionMatch) -> Self {
        Self { extension_match }
    }

    pub fn resolve(&self, path: &Path, kind: PathKind) -> Result<Vec<SourceItem>> {
        match kind {
            // Existence is checked when the item is loaded.
            PathKind::SingleFile => Ok(vec![SourceItem::new(path.to_path_buf())]),
            PathKind::Directory => self.scan_directory(path),
        }
    }

    fn scan_directory(&self, dir: &Path) -> Result<Vec<SourceItem>> {
        if !dir.exists() {
            return Err(ThumbnailError::Resolution {
                path: dir.to_path_buf(),
                reason: "directory does not exist".to_string(),
            });
        }

        if !dir.is_dir() {
            return Err(ThumbnailError::Resolution {
                path: dir.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let ignore_case = self.extension_match == ExtensionMatch::IgnoreCase;

        let mut items = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                // The root itself could not be listed.
                Err(e) if e.depth() == 0 => {
                    return Err(ThumbnailError::Resolution {
                        path: dir.to_path_buf(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    log::warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                    continue;
                }
            };

            if entry.file_type().is_file() && has_image_extension(entry.path(), ignore_case) {
                items.push(SourceItem::new(entry.into_path()));
            }
        }

        log::debug!("Found {} images under {}", items.len(), dir.display());
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use assert_fs::TempDir;

    #[test]
    fn single_file_is_never_filtered() {
        let items = InputResolver::default()
            .resolve(Path::new("missing/notes.txt"), PathKind::SingleFile)
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].display_name, "notes.txt");
    }

    #[test]
    fn directory_scan_is_recursive_and_filtered() {
        let temp = TempDir::new().unwrap();
        temp.child("a.jpg").touch().unwrap();
        temp.child("b.png").touch().unwrap();
        temp.child("c.txt").touch().unwrap();
        temp.child("nested/deeper").create_dir_all().unwrap();
        temp.child("nested/deeper/d.jpeg").touch().unwrap();
        temp.child("nested/E.JPG").touch().unwrap();

        let items = InputResolver::default()
            .resolve(temp.path(), PathKind::Directory)
            .unwrap();
        let names: Vec<_> = items.iter().map(|i| i.display_name.as_str()).collect();

        assert_eq!(names, vec!["a.jpg", "b.png", "d.jpeg"]);
    }

    #[test]
    fn ignore_case_broadens_matching() {
        let temp = TempDir::new().unwrap();
        temp.child("E.JPG").touch().unwrap();
        temp.child("f.Png").touch().unwrap();

        let items = InputResolver::new(ExtensionMatch::IgnoreCase)
            .resolve(temp.path(), PathKind::Directory)
            .unwrap();

        assert_eq!(items.len(), 2);
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let temp = TempDir::new().unwrap();
        let items = InputResolver::default()
            .resolve(temp.path(), PathKind::Directory)
            .unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn missing_directory_is_a_resolution_error() {
        let temp = TempDir::new().unwrap();
        let result = InputResolver::default().resolve(&temp.path().join("nope"), PathKind::Directory);
        assert!(matches!(result, Err(ThumbnailError::Resolution { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_is_a_resolution_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let locked = temp.child("locked");
        locked.create_dir_all().unwrap();
        locked.child("a.jpg").touch().unwrap();
        std::fs::set_permissions(locked.path(), std::fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not stop root.
        let readable = std::fs::read_dir(locked.path()).is_ok();
        let result = InputResolver::default().resolve(locked.path(), PathKind::Directory);

        std::fs::set_permissions(locked.path(), std::fs::Permissions::from_mode(0o755)).unwrap();

        if readable {
            return;
        }
        assert!(matches!(result, Err(ThumbnailError::Resolution { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        temp.child("a.jpg").touch().unwrap();
        let locked = temp.child("locked");
        locked.create_dir_all().unwrap();
        locked.child("b.jpg").touch().unwrap();
        std::fs::set_permissions(locked.path(), std::fs::Permissions::from_mode(0o000)).unwrap();

        let readable = std::fs::read_dir(locked.path()).is_ok();
        let result = InputResolver::default().resolve(temp.path(), PathKind::Directory);

        std::fs::set_permissions(locked.path(), std::fs::Permissions::from_mode(0o755)).unwrap();

        let items = result.unwrap();
        assert_eq!(items[0].display_name, "a.jpg");
        assert_eq!(items.len(), if readable { 2 } else { 1 });
    }

    #[test]
    fn file_given_as_directory_is_rejected() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("cat.png");
        file.touch().unwrap();

        let result = InputResolver::default().resolve(file.path(), PathKind::Directory);
        assert!(matches!(result, Err(ThumbnailError::Resolution { .. })));
    }
}
