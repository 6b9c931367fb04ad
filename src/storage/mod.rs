//! Image uploads for entity forms

use reqwest::multipart;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::{Action, Error, Operation, Result};
use crate::fetch::{self, ApiClient};

const UPLOAD: Operation = Operation::new(Action::Upload, "image");

/// Where an uploaded image can be fetched from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedImage {
    /// Public URL of the stored image
    pub url: String,
}

/// Client for `POST /users/upload`
#[derive(Debug, Clone)]
pub struct UploadClient {
    api: ApiClient,
}

impl UploadClient {
    /// Create a new UploadClient
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Upload image bytes, returning the URL to store in a form
    pub async fn upload_image(
        &self,
        file_data: Vec<u8>,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadedImage> {
        if file_data.is_empty() {
            return Err(Error::validation("Please choose an image to upload"));
        }
        if !content_type.starts_with("image/") {
            return Err(Error::validation(format!(
                "{} is not an image ({})",
                file_name, content_type
            )));
        }

        let url = self.api.endpoint(&["users", "upload"])?;
        debug!(file_name, size = file_data.len(), "uploading image");

        let form = multipart::Form::new().part(
            "image",
            multipart::Part::bytes(file_data)
                .file_name(file_name.to_string())
                .mime_str(content_type)?,
        );

        // No JSON content type here; reqwest sets the multipart boundary
        let request = self
            .api
            .http_client()
            .post(url)
            .header("X-Client-Info", &self.api.options().client_info)
            .multipart(form);

        let response = fetch::send_request(request, UPLOAD).await?;
        fetch::decode(response).await
    }

    /// Upload an image file from disk; the content type follows the extension
    pub async fn upload_image_file(&self, path: impl AsRef<Path>) -> Result<UploadedImage> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        let content_type = image_content_type(path).ok_or_else(|| {
            Error::validation(format!("{} is not a supported image type", file_name))
        })?;

        let file_data = tokio::fs::read(path)
            .await
            .map_err(|err| {
                Error::validation(format!("Could not read {}: {}", path.display(), err))
            })?;
        self.upload_image(file_data, &file_name, content_type).await
    }
}

/// Content type of an image file, judged by its extension
pub fn image_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}
