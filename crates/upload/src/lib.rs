//! Cloudinary raw upload client for pptgen.
//!
//! Credentials travel in a [`CloudinaryConfig`] passed to every call. The
//! client itself only holds a connection pool, so one client can serve
//! concurrent requests for different accounts.

pub mod client;
pub mod config;
pub mod error;
pub mod signature;

pub use client::{CloudinaryClient, CloudinaryClientBuilder, UploadReceipt};
pub use config::CloudinaryConfig;
pub use error::{Result, UploadError};

/// Destination for generated artifacts.
#[allow(async_fn_in_trait)]
pub trait Uploader {
    /// Upload `bytes` as a raw resource named `public_id`.
    async fn upload_raw(
        &self,
        config: &CloudinaryConfig,
        public_id: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadReceipt>;

    /// Public URL of a raw resource.
    fn delivery_url(&self, config: &CloudinaryConfig, public_id: &str) -> String {
        config.raw_delivery_url(public_id)
    }
}
