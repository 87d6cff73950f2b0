//! Document Preview Binary
//!
//! Renders one document to HTML on stdout, exactly as the live preview would.
//!
//! # Usage
//!
//! ```bash
//! # Render a document JSON file
//! cargo run --bin portfolio-preview -- path/to/document.json
//!
//! # Render a stored document by id from the content directory
//! cargo run --bin portfolio-preview -- 0b7f3c2e-5d1a-4c8e-9f00-2a6b1d4e8c11
//! ```
//!
//! # Environment Variables
//!
//! - `PORTFOLIO_CONFIG`: Path to a JSON config file (optional)
//! - `PORTFOLIO_STORAGE_DIR`: Content directory (default: `~/.portfolio/content`)
//! - `PORTFOLIO_WORDS_PER_MINUTE`: Reading speed for the reported reading time
//! - `RUST_LOG`: Logging level (e.g., "info", "debug"); logs go to stderr

use std::env;
use std::path::Path;

use portfolio_core::db::{DocumentStore, JsonFileStore};
use portfolio_core::models::Document;
use portfolio_core::render::render_document;
use portfolio_core::PortfolioConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let target = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: portfolio-preview <document.json | document-id>"))?;

    let mut config = match env::var("PORTFOLIO_CONFIG") {
        Ok(path) => PortfolioConfig::from_json_file(&path)?,
        Err(_) => PortfolioConfig::default(),
    };
    config.apply_env_overrides()?;
    config.validate()?;

    let mut document = if Path::new(&target).is_file() {
        tracing::info!("Reading document file {}", target);
        let text = tokio::fs::read_to_string(&target).await?;
        let mut document: Document = serde_json::from_str(&text)?;
        document.normalize();
        document
    } else {
        let dir = config.resolve_storage_dir()?;
        tracing::info!("Loading document {} from {}", target, dir.display());
        JsonFileStore::new(dir).load(&target).await?
    };

    let minutes = document.refresh_reading_time(config.words_per_minute);
    tracing::info!(
        title = %document.title,
        blocks = document.len(),
        legacy = document.is_legacy(),
        reading_time = minutes,
        "Rendering document"
    );

    println!("{}", render_document(&document));
    Ok(())
}
