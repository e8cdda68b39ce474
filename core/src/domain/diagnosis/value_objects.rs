use bytes::Bytes;

pub const DEFAULT_IMAGE_FILE_NAME: &str = "upload.jpg";
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "application/octet-stream";

/// Image picked from the camera or the file picker. Forwarded as-is.
#[derive(Debug, Clone)]
pub struct DiagnosisImage {
    pub bytes: Bytes,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

impl DiagnosisImage {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: None,
            content_type: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn file_name_or_default(&self) -> &str {
        self.file_name.as_deref().unwrap_or(DEFAULT_IMAGE_FILE_NAME)
    }

    pub fn content_type_or_default(&self) -> &str {
        self.content_type
            .as_deref()
            .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
    }
}
