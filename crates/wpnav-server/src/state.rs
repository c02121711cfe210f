use std::path::PathBuf;
use std::sync::Arc;
use wpnav_core::client::ContentClient;
use wpnav_core::config::Config;
use wpnav_core::links::UrlNormalizer;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub config: Arc<Config>,
    pub client: Arc<ContentClient>,
    pub urls: Arc<UrlNormalizer>,
}

impl AppState {
    /// Load `wpnav.yaml` from `root` and build the backend client.
    pub fn new(root: PathBuf) -> wpnav_core::Result<Self> {
        let config = Config::load(&root)?;
        Self::with_config(root, config)
    }

    pub fn with_config(root: PathBuf, config: Config) -> wpnav_core::Result<Self> {
        let client = ContentClient::new(config.clone())?;
        Ok(Self {
            root,
            urls: Arc::new(UrlNormalizer::from_config(&config.urls)),
            config: Arc::new(config),
            client: Arc::new(client),
        })
    }
}
