//! Source image data and media type detection.

use std::fs;
use std::io;
use std::path::Path;

/// File extensions scanned for when a directory is given as input.
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff", "webp"];

/// A raw image file read into memory.
///
/// Treated as immutable once constructed: the embedding strategies only
/// ever borrow the bytes. The media type is declared, not verified - it
/// is inferred from the file extension and may disagree with the actual
/// content (the strategy chain handles that case).
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub file_name: String,
    pub media_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SourceImage {
    /// Create a source image, inferring the media type from the file name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let media_type = extension_of(&file_name)
            .and_then(|ext| media_type_for_extension(&ext))
            .map(String::from);
        Self {
            file_name,
            media_type,
            bytes,
        }
    }

    /// Create a source image with an explicitly declared media type.
    pub fn with_media_type(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: Some(media_type.into()),
            bytes,
        }
    }

    /// Read a source image from disk.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = fs::read(path)?;
        Ok(Self::new(file_name, bytes))
    }

    /// The lowercased file extension, if any.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.file_name)
    }

    /// Whether the declared media type or the file extension indicates
    /// the given format.
    pub fn declares(&self, media_type: &str, extensions: &[&str]) -> bool {
        if self.media_type.as_deref() == Some(media_type) {
            return true;
        }
        match self.extension() {
            Some(ext) => extensions.contains(&ext.as_str()),
            None => false,
        }
    }
}

/// Whether a path has one of the extensions scanned for in directories.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

fn media_type_for_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_media_type_from_extension() {
        let img = SourceImage::new("photo.JPG", vec![1, 2, 3]);
        assert_eq!(img.media_type.as_deref(), Some("image/jpeg"));

        let img = SourceImage::new("scan.png", vec![]);
        assert_eq!(img.media_type.as_deref(), Some("image/png"));

        let img = SourceImage::new("notes.txt", vec![]);
        assert_eq!(img.media_type, None);
    }

    #[test]
    fn test_declares_by_media_type_or_extension() {
        let img = SourceImage::with_media_type("upload.bin", "image/jpeg", vec![]);
        assert!(img.declares("image/jpeg", &["jpg", "jpeg"]));
        assert!(!img.declares("image/png", &["png"]));

        let img = SourceImage::new("photo.jpeg", vec![]);
        assert!(img.declares("image/jpeg", &["jpg", "jpeg"]));
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_image(&PathBuf::from("a/b/photo.JPG")));
        assert!(is_supported_image(&PathBuf::from("scan.webp")));
        assert!(!is_supported_image(&PathBuf::from("document.pdf")));
        assert!(!is_supported_image(&PathBuf::from("no_extension")));
    }
}
