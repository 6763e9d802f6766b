//! The `/create_ppt` endpoint.

use crate::artifact::artifact_name;
use crate::error::ApiError;
use actix_web::{web, HttpResponse};
use pptgen_core::{Presentation, SlideDescriptor};
use pptgen_pptx::PptxWriter;
use pptgen_upload::{CloudinaryConfig, Uploader};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Shared, read-only state handed to every request.
pub struct AppState<U> {
    pub uploader: U,
    /// Where decks are written before upload.
    pub scratch_dir: PathBuf,
}

pub fn routes<U: Uploader + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/create_ppt", web::post().to(create_ppt::<U>));
}

/// Build a deck from the posted slides, upload it with the posted
/// credentials and answer with its download URL.
pub async fn create_ppt<U: Uploader + 'static>(
    state: web::Data<AppState<U>>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let payload: Value = serde_json::from_slice(&body)?;
    let payload = payload
        .as_object()
        .ok_or_else(|| ApiError::Malformed("Request body must be a JSON object".to_string()))?;

    let config = CloudinaryConfig::from_parts(
        text_field(payload, "cloud_name"),
        text_field(payload, "api_key"),
        text_field(payload, "api_secret"),
    )
    .ok_or(ApiError::ConfigurationIncomplete)?;

    let slides = match payload.get("slides") {
        Some(slides) if !is_falsy(slides) => slides,
        _ => return Err(ApiError::MissingSlideData),
    };
    let descriptors = Vec::<SlideDescriptor>::deserialize(slides)?;
    let presentation = pptgen_core::assemble(&descriptors)?;

    let name = artifact_name();
    log::info!(
        "Building {} ({} slides) for cloud '{}'",
        name,
        presentation.slide_count(),
        config.cloud_name
    );

    let download_url = publish(&state, &config, presentation, &name).await?;
    log::info!("Uploaded {}", name);

    Ok(HttpResponse::Ok().json(json!({ "download_url": download_url })))
}

/// Serialize into a scratch file, upload its bytes and return the delivery URL.
///
/// The scratch file is removed when it goes out of scope, so every early
/// return cleans up too.
async fn publish<U: Uploader>(
    state: &AppState<U>,
    config: &CloudinaryConfig,
    presentation: Presentation,
    name: &str,
) -> Result<String, ApiError> {
    let scratch_dir = state.scratch_dir.clone();
    let (scratch, bytes) = web::block(move || write_scratch(&presentation, &scratch_dir))
        .await
        .map_err(|e| ApiError::Worker(e.to_string()))??;

    let receipt = state.uploader.upload_raw(config, name, bytes).await?;
    log::debug!("Upload receipt: {:?}", receipt);
    let url = state.uploader.delivery_url(config, name);

    scratch.close()?;
    Ok(url)
}

/// Write the package to a fresh file in `dir` and read it back.
fn write_scratch(
    presentation: &Presentation,
    dir: &Path,
) -> Result<(NamedTempFile, Vec<u8>), ApiError> {
    let mut scratch = tempfile::Builder::new()
        .prefix("pptgen_")
        .suffix(".pptx")
        .tempfile_in(dir)?;

    PptxWriter::new().write(presentation, scratch.as_file_mut())?;
    let bytes = std::fs::read(scratch.path())?;
    log::debug!("Wrote {} bytes to {}", bytes.len(), scratch.path().display());

    Ok((scratch, bytes))
}

fn text_field<'a>(payload: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    payload.get(name).and_then(Value::as_str)
}

/// JSON values treated as "nothing given".
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, App};
    use pptgen_upload::{UploadError, UploadReceipt};
    use std::sync::Mutex;

    #[derive(Debug)]
    struct Call {
        cloud_name: String,
        public_id: String,
        bytes: Vec<u8>,
        scratch_files: usize,
    }

    struct FakeUploader {
        scratch_dir: PathBuf,
        fail: bool,
        calls: Mutex<Vec<Call>>,
    }

    impl Uploader for FakeUploader {
        async fn upload_raw(
            &self,
            config: &CloudinaryConfig,
            public_id: &str,
            bytes: Vec<u8>,
        ) -> pptgen_upload::Result<UploadReceipt> {
            let size = bytes.len() as u64;
            self.calls.lock().unwrap().push(Call {
                cloud_name: config.cloud_name.clone(),
                public_id: public_id.to_string(),
                bytes,
                scratch_files: file_count(&self.scratch_dir),
            });

            if self.fail {
                return Err(UploadError::Rejected {
                    status: 401,
                    message: "Invalid Signature".to_string(),
                });
            }
            Ok(UploadReceipt {
                public_id: public_id.to_string(),
                version: Some(1),
                resource_type: Some("raw".to_string()),
                bytes: Some(size),
                secure_url: None,
            })
        }
    }

    fn file_count(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    fn state(scratch: &tempfile::TempDir, fail: bool) -> web::Data<AppState<FakeUploader>> {
        web::Data::new(AppState {
            uploader: FakeUploader {
                scratch_dir: scratch.path().to_path_buf(),
                fail,
                calls: Mutex::new(Vec::new()),
            },
            scratch_dir: scratch.path().to_path_buf(),
        })
    }

    async fn post(state: &web::Data<AppState<FakeUploader>>, body: Value) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(routes::<FakeUploader>),
        )
        .await;
        let req = actix_test::TestRequest::post()
            .uri("/create_ppt")
            .set_json(body)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        let status = resp.status();
        let body: Value = actix_test::read_body_json(resp).await;
        (status, body)
    }

    fn with_credentials(extra: Value) -> Value {
        let mut body = json!({
            "cloud_name": "demo",
            "api_key": "123456",
            "api_secret": "shh",
        });
        if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
            body.extend(extra.clone());
        }
        body
    }

    #[actix_web::test]
    async fn test_missing_credentials() {
        let scratch = tempfile::tempdir().unwrap();
        let state = state(&scratch, false);
        let slides = json!([{ "title": "Intro" }]);

        let bodies = [
            json!({ "slides": slides }),
            json!({ "api_key": "k", "api_secret": "s", "slides": slides }),
            json!({ "cloud_name": "demo", "api_secret": "s", "slides": slides }),
            json!({ "cloud_name": "demo", "api_key": "k", "slides": slides }),
            json!({ "cloud_name": "", "api_key": "k", "api_secret": "s", "slides": slides }),
            json!({ "cloud_name": 7, "api_key": "k", "api_secret": "s", "slides": slides }),
        ];
        for body in bodies {
            let (status, body) = post(&state, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "error": "Cloudinary configuration is incomplete" }));
        }
        assert!(state.uploader.calls.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_credentials_checked_before_slides() {
        let scratch = tempfile::tempdir().unwrap();
        let state = state(&scratch, false);

        let (status, body) = post(&state, json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Cloudinary configuration is incomplete");
    }

    #[actix_web::test]
    async fn test_missing_slides() {
        let scratch = tempfile::tempdir().unwrap();
        let state = state(&scratch, false);

        for slides in [None, Some(json!(null)), Some(json!([])), Some(json!(""))] {
            let extra = match slides {
                Some(slides) => json!({ "slides": slides }),
                None => json!({}),
            };
            let (status, body) = post(&state, with_credentials(extra)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "error": "Slide data is required" }));
        }
        assert!(state.uploader.calls.lock().unwrap().is_empty());
        assert_eq!(file_count(scratch.path()), 0);
    }

    #[actix_web::test]
    async fn test_success() {
        let scratch = tempfile::tempdir().unwrap();
        let state = state(&scratch, false);

        let body = with_credentials(json!({
            "slides": [
                { "title": "Intro" },
                { "title": "A", "content": "B", "bg_color": [255, 0, 128] },
                { "image_placeholders": [{ "left": 1 }] },
            ]
        }));
        let (status, body) = post(&state, body).await;
        assert_eq!(status, StatusCode::OK);

        let calls = state.uploader.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.cloud_name, "demo");
        assert!(call.public_id.ends_with(".pptx"));
        assert!(call.bytes.starts_with(b"PK\x03\x04"));
        assert_eq!(call.scratch_files, 1);

        assert_eq!(
            body,
            json!({
                "download_url": format!("https://res.cloudinary.com/demo/raw/upload/{}", call.public_id)
            })
        );
        assert_eq!(file_count(scratch.path()), 0);
    }

    #[actix_web::test]
    async fn test_each_request_gets_a_new_artifact() {
        let scratch = tempfile::tempdir().unwrap();
        let state = state(&scratch, false);
        let body = with_credentials(json!({ "slides": [{ "title": "Intro" }] }));

        let (first, _) = post(&state, body.clone()).await;
        let (second, _) = post(&state, body).await;
        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::OK);

        let calls = state.uploader.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_ne!(calls[0].public_id, calls[1].public_id);
    }

    #[actix_web::test]
    async fn test_upload_failure() {
        let scratch = tempfile::tempdir().unwrap();
        let state = state(&scratch, true);

        let body = with_credentials(json!({ "slides": [{ "title": "Intro" }] }));
        let (status, body) = post(&state, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Invalid Signature" }));

        assert_eq!(state.uploader.calls.lock().unwrap().len(), 1);
        assert_eq!(file_count(scratch.path()), 0);
    }

    #[actix_web::test]
    async fn test_bad_descriptor() {
        let scratch = tempfile::tempdir().unwrap();
        let state = state(&scratch, false);

        let body = with_credentials(json!({ "slides": [{ "title": "A", "bg_color": [1, 2] }] }));
        let (status, body) = post(&state, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
        assert!(state.uploader.calls.lock().unwrap().is_empty());
        assert_eq!(file_count(scratch.path()), 0);
    }

    #[actix_web::test]
    async fn test_body_not_json() {
        let scratch = tempfile::tempdir().unwrap();
        let state = state(&scratch, false);
        let app = actix_test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(routes::<FakeUploader>),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/create_ppt")
            .set_payload("slides please")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = actix_test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[test]
    fn test_write_scratch() {
        let scratch = tempfile::tempdir().unwrap();
        let presentation = pptgen_core::assemble(&[SlideDescriptor {
            title: Some("Intro".to_string()),
            ..Default::default()
        }])
        .unwrap();

        let (file, bytes) = write_scratch(&presentation, scratch.path()).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
        assert_eq!(std::fs::read(file.path()).unwrap(), bytes);
        assert_eq!(file_count(scratch.path()), 1);

        drop(file);
        assert_eq!(file_count(scratch.path()), 0);
    }

    #[test]
    fn test_write_scratch_missing_dir() {
        let scratch = tempfile::tempdir().unwrap();
        let missing = scratch.path().join("gone");
        let err = write_scratch(&Presentation::new(), &missing).unwrap_err();
        assert!(matches!(err, ApiError::Io(_)));
    }

    #[test]
    fn test_is_falsy() {
        assert!(is_falsy(&json!(null)));
        assert!(is_falsy(&json!(false)));
        assert!(is_falsy(&json!(0)));
        assert!(is_falsy(&json!("")));
        assert!(is_falsy(&json!([])));
        assert!(is_falsy(&json!({})));
        assert!(!is_falsy(&json!([{}])));
        assert!(!is_falsy(&json!("x")));
    }
}
