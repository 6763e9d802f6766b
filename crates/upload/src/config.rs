//! Per-request Cloudinary account settings.

use std::fmt;

/// Host serving delivered assets.
const DELIVERY_HOST: &str = "res.cloudinary.com";

/// Credentials and delivery options for one Cloudinary account.
///
/// Built per request and passed by reference to the upload call; nothing
/// here is ever stored globally.
#[derive(Clone, PartialEq, Eq)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    api_secret: String,
    /// Use https delivery URLs.
    pub secure: bool,
}

impl CloudinaryConfig {
    /// Build a secure config, or `None` if any credential is missing or empty.
    pub fn from_parts(
        cloud_name: Option<&str>,
        api_key: Option<&str>,
        api_secret: Option<&str>,
    ) -> Option<Self> {
        let non_empty = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_string);

        Some(Self {
            cloud_name: non_empty(cloud_name)?,
            api_key: non_empty(api_key)?,
            api_secret: non_empty(api_secret)?,
            secure: true,
        })
    }

    /// Set whether delivery URLs use https.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }

    /// Delivery URL of a raw resource with no version component.
    pub fn raw_delivery_url(&self, public_id: &str) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!(
            "{}://{}/{}/raw/upload/{}",
            scheme, DELIVERY_HOST, self.cloud_name, public_id
        )
    }
}

impl fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("secure", &self.secure)
            .finish()
    }
}
