//! Command-line configuration.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Build PowerPoint decks from JSON and publish them to Cloudinary.
#[derive(Parser, Debug, Clone)]
#[command(name = "pptgen-server")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 5000)]
    pub port: u16,

    /// Directory for temporary deck files (default: OS temp dir)
    #[arg(long)]
    pub scratch_dir: Option<PathBuf>,

    /// Largest accepted request body, in bytes
    #[arg(long, default_value_t = 4 * 1024 * 1024)]
    pub max_body_bytes: usize,

    /// Abort uploads that take longer than this many seconds
    #[arg(long)]
    pub upload_timeout_secs: Option<u64>,

    /// Cloudinary upload API root
    #[arg(long, default_value = pptgen_upload::client::DEFAULT_API_BASE)]
    pub api_base: String,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn upload_timeout(&self) -> Option<Duration> {
        self.upload_timeout_secs.map(Duration::from_secs)
    }

    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
