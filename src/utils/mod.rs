// thumbnailer/src/utils/mod.rs
use std::path::Path;

pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as i32).min(UNITS.len() as i32 - 1);
    let size = bytes_f64 / base.powi(exponent);

    format!("{:.2} {}", size, UNITS[exponent as usize])
}

pub fn bytes_to_megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MEGABYTE
}

/// Extension check used by the directory scan.
pub fn has_image_extension(path: &Path, ignore_case: bool) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            if ignore_case {
                IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
            } else {
                IMAGE_EXTENSIONS.contains(&ext)
            }
        })
        .unwrap_or(false)
}

pub fn sanitize_filename(filename: &str) -> String {
    let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
    filename
        .chars()
        .map(|c| if invalid_chars.contains(&c) { '_' } else { c })
        .collect()
}

pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_is_case_sensitive_by_default() {
        assert!(has_image_extension(Path::new("a/cat.jpg"), false));
        assert!(has_image_extension(Path::new("a/cat.jpeg"), false));
        assert!(!has_image_extension(Path::new("a/cat.JPG"), false));
        assert!(has_image_extension(Path::new("a/cat.JPG"), true));
        assert!(!has_image_extension(Path::new("a/notes.txt"), true));
        assert!(!has_image_extension(Path::new("a/png"), false));
    }

    #[test]
    fn megabytes_use_binary_units() {
        assert_eq!(bytes_to_megabytes(1024 * 1024), 1.0);
        assert_eq!(bytes_to_megabytes(512 * 1024), 0.5);
    }

    #[test]
    fn formats_sizes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1536), "1.50 KB");
    }
}
