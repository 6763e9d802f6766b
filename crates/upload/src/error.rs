//! Error types for Cloudinary uploads.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, UploadError>;

/// Errors that can occur while uploading an artifact.
#[derive(Error, Debug)]
pub enum UploadError {
    /// Transport failure, timeout, or an unreadable response body.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Cloudinary answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A success response that could not be decoded.
    #[error("Invalid upload response: {0}")]
    InvalidResponse(String),
}
