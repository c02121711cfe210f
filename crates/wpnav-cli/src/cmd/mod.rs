pub mod config;
pub mod fetch;
pub mod init;
pub mod match_title;
pub mod normalize;
pub mod render;
pub mod serve;

use anyhow::Context;
use std::path::Path;
use wpnav_core::client::ContentClient;
use wpnav_core::config::Config;
use wpnav_core::links::UrlNormalizer;
use wpnav_core::NavError;

/// Config if the site has one; commands that work offline fall back to
/// defaults when it does not.
pub fn load_optional_config(root: &Path) -> anyhow::Result<Option<Config>> {
    match Config::load(root) {
        Ok(config) => Ok(Some(config)),
        Err(NavError::NotConfigured) => Ok(None),
        Err(e) => Err(e).context("failed to load wpnav.yaml"),
    }
}

pub fn url_normalizer(config: Option<&Config>) -> UrlNormalizer {
    config
        .map(|c| UrlNormalizer::from_config(&c.urls))
        .unwrap_or_default()
}

pub fn content_client(root: &Path) -> anyhow::Result<ContentClient> {
    let config = Config::load(root).context("failed to load wpnav.yaml")?;
    ContentClient::new(config).context("failed to create backend client")
}

pub fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}

/// Read and decode a JSON payload file with one of the `payload` decoders.
pub fn read_payload<T>(
    path: &Path,
    decode: fn(&str) -> serde_json::Result<T>,
) -> anyhow::Result<T> {
    let body = wpnav_core::io::read_text(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    decode(&body).with_context(|| format!("failed to decode {}", path.display()))
}
