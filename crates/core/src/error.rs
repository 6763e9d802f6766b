//! Error types for presentation assembly and serialization.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or writing a presentation.
#[derive(Error, Debug)]
pub enum Error {
    /// Body text was set on a slide whose layout has no body placeholder.
    #[error("Layout '{layout}' has no body placeholder at index {idx}")]
    MissingPlaceholder { layout: &'static str, idx: u32 },

    /// Failed to write the output file.
    #[error("Failed to write file: {0}")]
    IoError(#[from] std::io::Error),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML generation error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),
}
