use serde::{Deserialize, Serialize};

/// Upload formats the page accepts. Everything else is rejected before
/// ingestion runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Resolve a format from a file extension ("jpeg", "jpg" or "png",
    /// any case).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpeg" | "jpg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
        };
        write!(f, "{}", s)
    }
}

/// An upload that passed the extension gate, held until submit.
#[derive(Debug, Clone)]
pub struct StagedImage {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

/// One image as the model API expects it: declared MIME type plus raw bytes.
/// Built at submit time, consumed by a single inference call.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension_accepts_all_three() {
        assert_eq!(ImageFormat::from_extension("jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("png"), Some(ImageFormat::Png));
    }

    #[test]
    fn test_from_extension_is_case_insensitive() {
        assert_eq!(ImageFormat::from_extension("JPG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("Png"), Some(ImageFormat::Png));
    }

    #[test]
    fn test_from_extension_rejects_everything_else() {
        assert_eq!(ImageFormat::from_extension("gif"), None);
        assert_eq!(ImageFormat::from_extension("webp"), None);
        assert_eq!(ImageFormat::from_extension(""), None);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(ImageFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
    }
}
