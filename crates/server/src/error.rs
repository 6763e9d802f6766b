use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced to API callers as `{"error": message}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Cloudinary configuration is incomplete")]
    ConfigurationIncomplete,

    #[error("Slide data is required")]
    MissingSlideData,

    #[error("{0}")]
    Malformed(String),

    #[error("{0}")]
    Worker(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Assembly(#[from] pptgen_core::Error),

    #[error(transparent)]
    Upload(#[from] pptgen_upload::UploadError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ConfigurationIncomplete | ApiError::MissingSlideData => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{self}");
        } else {
            log::info!("Rejected request: {self}");
        }
        HttpResponse::build(status).json(json!({ "error": self.to_string() }))
    }
}
