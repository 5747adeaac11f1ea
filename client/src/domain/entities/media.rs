//! Media upload entity
//!
//! An image asset on its way to the remote media endpoint.

/// Image formats accepted by the create-quote form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
}

impl ImageFormat {
    /// Guess the format from a file name's extension
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            _ => None,
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            "image/gif" => Some(ImageFormat::Gif),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
        }
    }
}

/// A file selected for upload
#[derive(Debug, Clone, PartialEq)]
pub struct MediaUpload {
    pub file_name: String,
    /// MIME type as reported by the source; `application/octet-stream` when unknown
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    /// Build an upload, deriving the content type from the file name
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = ImageFormat::from_file_name(&file_name)
            .map(|f| f.mime().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// The accepted image format of this upload, if any
    pub fn format(&self) -> Option<ImageFormat> {
        ImageFormat::from_mime(&self.content_type)
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
