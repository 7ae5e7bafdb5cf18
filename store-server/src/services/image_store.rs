//! Product image storage — uploads to S3 and hands back a public URL
//!
//! Pipeline: validate → decode → JPEG re-encode → SHA256 → put_object.
//! Keys are content-addressed (`images/products/{hash}.jpg`), so re-uploading
//! the same image is idempotent and a failed database write after a
//! successful upload leaves nothing to compensate.

use aws_sdk_s3::Client as S3Client;
use image::codecs::jpeg::JpegEncoder;
use sha2::{Digest, Sha256};
use shared::{AppError, AppResult, ErrorCode};
use std::io::Cursor;

use crate::core::Config;

/// Maximum file size (20MB)
const MAX_FILE_SIZE: usize = 20 * 1024 * 1024;

/// JPEG quality for re-encoded uploads
const JPEG_QUALITY: u8 = 85;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// S3 key for a product image
fn image_key(hash: &str) -> String {
    format!("images/products/{hash}.jpg")
}

/// S3-backed image store
#[derive(Clone)]
pub struct ImageStore {
    client: S3Client,
    bucket: String,
    public_base_url: String,
}

impl ImageStore {
    pub fn new(client: S3Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build an image store from the server config and ambient AWS settings
    pub async fn initialize(config: &Config) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(
            S3Client::new(&aws_config),
            config.storage_bucket.clone(),
            config.storage_public_base_url.clone(),
        )
    }

    /// Upload an image and return its public URL
    ///
    /// Runs before the product row is written; failures abort the
    /// create/update without touching the database.
    pub async fn upload(&self, filename: &str, data: Vec<u8>) -> AppResult<String> {
        if data.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::InvalidImageFile,
                "Empty file",
            ));
        }

        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::with_message(
                ErrorCode::FileTooLarge,
                format!("File too large: {} bytes (max {})", data.len(), MAX_FILE_SIZE),
            ));
        }

        // Validate file extension
        let ext = std::path::Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
            return Err(AppError::with_message(
                ErrorCode::UnsupportedFileFormat,
                format!("Unsupported format: {ext}. Supported: png, jpg, jpeg, webp"),
            ));
        }

        // Load and validate image content
        let img = image::load_from_memory(&data).map_err(|e| {
            AppError::with_message(ErrorCode::InvalidImageFile, format!("Invalid image: {e}"))
        })?;

        // Compress to JPEG
        let mut buffer = Vec::new();
        {
            let mut cursor = Cursor::new(&mut buffer);
            let rgb_img = img.to_rgb8();
            let encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
            rgb_img.write_with_encoder(encoder).map_err(|e| {
                AppError::with_message(
                    ErrorCode::ImageProcessingFailed,
                    format!("Image compression failed: {e}"),
                )
            })?;
        }

        // SHA256 hash
        let mut hasher = Sha256::new();
        hasher.update(&buffer);
        let hash = hex::encode(hasher.finalize());

        // Upload to S3 (idempotent — same hash = same content)
        let key = image_key(&hash);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(buffer.into())
            .content_type("image/jpeg")
            .send()
            .await
            .map_err(|e| {
                tracing::error!(hash = %hash, error = %e, "S3 upload failed");
                AppError::with_message(ErrorCode::FileStorageFailed, "Image upload failed")
            })?;

        let url = self.public_url(&key);
        tracing::info!(hash = %hash, url = %url, "Product image uploaded");
        Ok(url)
    }

    /// Public URL for a stored object
    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}
