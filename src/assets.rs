//! Asset store adapter: input validation plus the HTTP upload client.
//!
//! The core only validates constraints and delegates; retry, auth and
//! provider specifics belong to the external store. Upload failures always
//! surface as a distinguishable error, never as a silently empty result.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::types::ImageUrl;
use crate::models::config::AssetStoreConfig;

/// File extensions accepted for image uploads.
pub const ALLOWED_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];
/// Content types accepted for image uploads.
pub const ALLOWED_CONTENT_TYPES: [&str; 2] = ["image/jpeg", "image/png"];
/// Maximum accepted upload size: 300 KB, independent of file content.
pub const MAX_IMAGE_SIZE_BYTES: usize = 300 * 1024;

/// An in-memory file received from a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Why an uploaded file was rejected before any delegation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageValidationError {
    #[error("file is missing or empty")]
    Empty,
    #[error("file '{0}' is invalid: only .jpg, .jpeg and .png files are allowed")]
    UnsupportedType(String),
    #[error("file '{0}' is too large: maximum size is 300 KB")]
    TooLarge(String),
}

/// Validate a single image against the extension/content-type/size rules.
pub fn validate_image(file: &UploadFile) -> Result<(), ImageValidationError> {
    if file.bytes.is_empty() {
        return Err(ImageValidationError::Empty);
    }

    let name = file.file_name.to_ascii_lowercase();
    let extension_ok = ALLOWED_EXTENSIONS.iter().any(|ext| name.ends_with(ext));
    let content_type_ok = ALLOWED_CONTENT_TYPES
        .iter()
        .any(|ct| file.content_type.eq_ignore_ascii_case(ct));
    if !extension_ok || !content_type_ok {
        return Err(ImageValidationError::UnsupportedType(
            file.file_name.clone(),
        ));
    }

    if file.bytes.len() > MAX_IMAGE_SIZE_BYTES {
        return Err(ImageValidationError::TooLarge(file.file_name.clone()));
    }

    Ok(())
}

/// Validate a batch of images, collecting every failure instead of stopping
/// at the first one.
pub fn validate_images(files: &[UploadFile]) -> Vec<ImageValidationError> {
    files
        .iter()
        .filter_map(|file| validate_image(file).err())
        .collect()
}

/// Errors surfaced by asset store implementations.
#[derive(Debug, Error)]
pub enum AssetStoreError {
    #[error("upload request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("asset store returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("asset store response was malformed: {0}")]
    MalformedResponse(String),
}

/// External binary-object storage returning a durable retrieval URL per
/// upload.
pub trait AssetStore {
    fn upload(
        &self,
        file: &UploadFile,
    ) -> impl Future<Output = Result<ImageUrl, AssetStoreError>>;
}

/// Production [`AssetStore`] posting raw bytes to a configured HTTP
/// endpoint with a per-upload timeout.
#[derive(Clone)]
pub struct HttpAssetStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAssetStore {
    pub fn new(config: &AssetStoreConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl AssetStore for HttpAssetStore {
    async fn upload(&self, file: &UploadFile) -> Result<ImageUrl, AssetStoreError> {
        // A random prefix keeps distinct uploads of the same file name apart.
        let object_name = format!("images/{}_{}", Uuid::new_v4(), file.file_name);
        let upload_url = format!(
            "{}?uploadType=media&name={}",
            self.base_url,
            urlencoding::encode(&object_name)
        );

        let response = self
            .client
            .post(&upload_url)
            .header(CONTENT_TYPE, &file.content_type)
            .body(file.bytes.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssetStoreError::Status(status));
        }

        let body: serde_json::Value = response.json().await?;
        let name = body
            .get("name")
            .and_then(|value| value.as_str())
            .ok_or_else(|| {
                AssetStoreError::MalformedResponse("missing object name".to_string())
            })?;

        let download_url = format!("{}/{}?alt=media", self.base_url, urlencoding::encode(name));
        ImageUrl::new(download_url)
            .map_err(|e| AssetStoreError::MalformedResponse(e.to_string()))
    }
}
