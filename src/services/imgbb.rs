use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::image_host::{HostError, ImageHost};
use crate::config::Config;
use crate::models::UploadedImage;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    success: bool,
    data: Option<UploadData>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    url: Option<String>,
}

/// ImgBB upload API client
pub struct ImgbbClient {
    api_key: Option<String>,
    api_url: String,
    client: reqwest::Client,
}

impl ImgbbClient {
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.imgbb_api_key.clone(),
            api_url: config.imgbb_api_url.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn upload_url(&self) -> String {
        format!("{}/1/upload", self.api_url)
    }

    fn parse_upload_response(body: &str) -> Result<String, HostError> {
        let response: UploadResponse = serde_json::from_str(body)
            .map_err(|e| HostError::Rejected(format!("unreadable response ({}): {}", e, body)))?;

        if !response.success {
            return Err(HostError::Rejected(body.to_string()));
        }

        response
            .data
            .and_then(|data| data.url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| HostError::Rejected(format!("no data.url in response: {}", body)))
    }
}

#[async_trait::async_trait]
impl ImageHost for ImgbbClient {
    async fn host_image(&self, image: UploadedImage) -> Result<String, HostError> {
        let api_key = self.api_key.as_deref().ok_or(HostError::MissingApiKey)?;

        let UploadedImage { bytes, filename } = image;
        log::info!("📤 Uploading {} ({} bytes) to ImgBB", filename, bytes.len());

        let form = Form::new().part("image", Part::bytes(bytes).file_name(filename));

        let response = self
            .client
            .post(self.upload_url())
            .query(&[("key", api_key)])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        log::debug!("📥 ImgBB response status: {}", status);

        if !status.is_success() {
            return Err(HostError::Status { status, body });
        }

        Self::parse_upload_response(&body)
    }
}
