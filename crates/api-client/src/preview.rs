//! Retrieved artifacts and the buffer that displays them

use pixmark_image::extension_for_mime;
use std::path::Path;

/// Raw bytes of a retrieved artifact plus its content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    /// Image bytes exactly as served
    pub bytes: Vec<u8>,
    /// Content type reported by the service
    pub content_type: String,
}

impl PreviewImage {
    /// Size in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the service returned an empty body
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File extension matching the content type (`bin` when unknown)
    #[must_use]
    pub fn extension(&self) -> &'static str {
        extension_for_mime(&self.content_type)
    }

    /// Write the bytes to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, &self.bytes)
    }
}

/// Holds at most one displayed image
///
/// Showing a new image releases the previous buffer; [`PreviewPane::close`]
/// releases it explicitly.
#[derive(Debug, Default)]
pub struct PreviewPane {
    current: Option<PreviewImage>,
}

impl PreviewPane {
    /// An empty pane
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Display `image`, handing back whatever it replaced
    pub fn show(&mut self, image: PreviewImage) -> Option<PreviewImage> {
        self.current.replace(image)
    }

    /// The image on display
    #[must_use]
    pub fn current(&self) -> Option<&PreviewImage> {
        self.current.as_ref()
    }

    /// Whether an image is on display
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Release the displayed image; returns whether there was one
    pub fn close(&mut self) -> bool {
        self.current.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(bytes: &[u8], content_type: &str) -> PreviewImage {
        PreviewImage {
            bytes: bytes.to_vec(),
            content_type: content_type.to_string(),
        }
    }

    #[test]
    fn test_extension() {
        assert_eq!(image(b"x", "image/jpeg").extension(), "jpg");
        assert_eq!(image(b"x", "application/octet-stream").extension(), "bin");
    }

    #[test]
    fn test_pane_replacement_and_close() {
        let mut pane = PreviewPane::new();
        assert!(!pane.is_open());
        assert!(!pane.close());

        assert!(pane.show(image(b"one", "image/png")).is_none());
        let replaced = pane.show(image(b"two", "image/png")).unwrap();
        assert_eq!(replaced.bytes, b"one");
        assert_eq!(pane.current().unwrap().bytes, b"two");

        assert!(pane.close());
        assert!(pane.current().is_none());
    }

    #[test]
    fn test_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.png");
        image(b"\x89PNG", "image/png").save(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG");
    }
}
