//! HTTP service that turns JSON slide lists into PowerPoint decks hosted on
//! Cloudinary.

use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use clap::Parser;
use pptgen_upload::CloudinaryClient;

mod artifact;
mod config;
mod error;
mod handler;

use config::Args;
use handler::AppState;

#[actix_web::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    let uploader = CloudinaryClient::builder()
        .api_base(args.api_base.clone())
        .timeout(args.upload_timeout())
        .build()
        .context("Failed to build upload client")?;

    let scratch_dir = args.scratch_dir();
    std::fs::create_dir_all(&scratch_dir).with_context(|| {
        format!("Failed to create scratch directory {}", scratch_dir.display())
    })?;

    let state = web::Data::new(AppState {
        uploader,
        scratch_dir,
    });
    let max_body_bytes = args.max_body_bytes;
    let (host, port) = args.bind_addr();

    log::info!("Starting server at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .configure(handler::routes::<CloudinaryClient>)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("Failed to bind {}:{}", host, port))?
    .run()
    .await
    .context("Server error")
}
