use std::path::Path;

use reqwest::multipart::Part;

use crate::error::ByteDanceError;
use crate::utils::random_file_name;

/// A file to be sent as a multipart part.
///
/// File name and content type are optional; each upload endpoint supplies
/// its own defaults (a random name with the right extension, and the
/// media type the endpoint expects).
#[derive(Debug, Clone)]
pub struct UploadFile {
    bytes: Vec<u8>,
    file_name: Option<String>,
    content_type: Option<String>,
}

impl UploadFile {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: None,
            content_type: None,
        }
    }

    /// Reads a file from disk, keeping its name for the multipart part.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ByteDanceError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string);
        Ok(Self {
            bytes,
            file_name,
            content_type: None,
        })
    }

    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn into_part(
        self,
        default_extension: &str,
        default_content_type: &str,
    ) -> Result<Part, ByteDanceError> {
        if self.bytes.is_empty() {
            return Err(ByteDanceError::InvalidArgument(
                "upload file must not be empty".to_string(),
            ));
        }

        let file_name = self
            .file_name
            .unwrap_or_else(|| random_file_name(default_extension));
        let content_type = self
            .content_type
            .unwrap_or_else(|| default_content_type.to_string());

        let part = Part::bytes(self.bytes)
            .file_name(file_name)
            .mime_str(&content_type)?;
        Ok(part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_upload_rejected() {
        let err = UploadFile::new(Vec::new()).into_part("jpg", "image/jpeg").unwrap_err();
        assert!(matches!(err, ByteDanceError::InvalidArgument(_)));
    }

    #[test]
    fn test_invalid_content_type_rejected() {
        let result = UploadFile::new(vec![1u8, 2, 3])
            .content_type("not a mime")
            .into_part("jpg", "image/jpeg");
        assert!(result.is_err());
    }

    #[test]
    fn test_upload_file_builders() {
        let file = UploadFile::new(vec![0u8; 4]).file_name("a.png");
        assert_eq!(file.len(), 4);
        assert!(!file.is_empty());
        assert!(file.into_part("jpg", "image/jpeg").is_ok());
    }

    #[tokio::test]
    async fn test_from_path_keeps_file_name() {
        let path = std::env::temp_dir().join(random_file_name("png"));
        tokio::fs::write(&path, [0x89u8, 0x50, 0x4e, 0x47]).await.unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(file.len(), 4);
        assert_eq!(
            file.file_name.as_deref(),
            path.file_name().and_then(|n| n.to_str())
        );
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let result = UploadFile::from_path("/nonexistent/dir/video.mp4").await;
        assert!(matches!(result, Err(ByteDanceError::Io(_))));
    }
}
