//! HTTP client for the Cloudinary upload API.

use crate::config::CloudinaryConfig;
use crate::error::{Result, UploadError};
use crate::signature::sign;
use crate::Uploader;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Default upload API root.
pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Fields of a successful upload response that we care about.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadReceipt {
    pub public_id: String,
    #[serde(default)]
    pub version: Option<u64>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub bytes: Option<u64>,
    #[serde(default)]
    pub secure_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Uploads raw resources with signed requests.
#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    http: reqwest::Client,
    api_base: String,
}

/// Builder for [`CloudinaryClient`].
#[derive(Debug, Clone)]
pub struct CloudinaryClientBuilder {
    api_base: String,
    timeout: Option<Duration>,
}

impl CloudinaryClientBuilder {
    /// Override the API root (no trailing cloud name).
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Bound the whole upload request. Unbounded by default.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<CloudinaryClient> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(CloudinaryClient {
            http: builder.build()?,
            api_base: self.api_base.trim_end_matches('/').to_string(),
        })
    }
}

impl CloudinaryClient {
    pub fn builder() -> CloudinaryClientBuilder {
        CloudinaryClientBuilder {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: None,
        }
    }

    /// Upload endpoint for raw resources of `config`'s account.
    pub fn raw_upload_url(&self, config: &CloudinaryConfig) -> String {
        format!("{}/{}/raw/upload", self.api_base, config.cloud_name)
    }
}

impl Uploader for CloudinaryClient {
    async fn upload_raw(
        &self,
        config: &CloudinaryConfig,
        public_id: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadReceipt> {
        let mut params: BTreeMap<&'static str, String> = BTreeMap::new();
        params.insert("public_id", public_id.to_string());
        params.insert("timestamp", unix_timestamp().to_string());
        let signature = sign(&params, config.api_secret());

        let size = bytes.len();
        let mut form = Form::new()
            .part("file", Part::bytes(bytes).file_name(public_id.to_string()))
            .text("api_key", config.api_key.clone())
            .text("signature", signature);
        for (name, value) in params {
            form = form.text(name, value);
        }

        let url = self.raw_upload_url(config);
        log::debug!("Uploading {} ({} bytes) to {}", public_id, size, url);

        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        parse_upload_response(status, &body)
    }
}

/// Turn an upload API response into a receipt or an error.
pub(crate) fn parse_upload_response(status: u16, body: &[u8]) -> Result<UploadReceipt> {
    if (200..300).contains(&status) {
        return serde_json::from_slice(body).map_err(|e| {
            UploadError::InvalidResponse(format!(
                "{}; response body: {}",
                e,
                String::from_utf8_lossy(body)
            ))
        });
    }

    let message = match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => format!(
            "Upload failed with status {}: {}",
            status,
            String::from_utf8_lossy(body)
        ),
    };
    log::warn!("Cloudinary rejected upload ({}): {}", status, message);

    Err(UploadError::Rejected { status, message })
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
