use crate::config::Config;
use crate::error::{NavError, Result};
use crate::header::{FetchSource, HeaderData};
use crate::model::{MegaMenuData, MenuItem, SiteSettings};
use crate::paths;
use crate::payload;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::time::Duration;

/// Read-only client for the CMS endpoints the navigation needs.
///
/// Every request is attempted once with its own timeout. Callers that must
/// not fail (page rendering) go through [`ContentClient::load_header`],
/// which swaps each failure for an empty default.
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    config: Config,
}

impl ContentClient {
    pub fn new(config: Config) -> Result<Self> {
        let api_url = config.backend.api_url.trim();
        match url::Url::parse(api_url) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => {}
            _ => return Err(NavError::InvalidUrl(api_url.to_string())),
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .user_agent(concat!("wpnav/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|source| NavError::Http {
                url: config.backend.api_url.clone(),
                source,
            })?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn fetch_menu(&self, location: &str) -> Result<Vec<MenuItem>> {
        paths::validate_location(location)?;
        let url = self.config.menu_url(location);
        let body = self.get_text(&url, self.config.backend.timeouts.menu()).await?;
        payload::menu_items(&body).map_err(|e| payload_error(&url, e))
    }

    pub async fn fetch_mega_menus(&self) -> Result<Vec<MegaMenuData>> {
        let url = self.config.mega_menus_url();
        let body = self
            .get_text(&url, self.config.backend.timeouts.mega_menu())
            .await?;
        payload::mega_menus(&body).map_err(|e| payload_error(&url, e))
    }

    pub async fn fetch_site_settings(&self) -> Result<SiteSettings> {
        let url = self.config.settings_url();
        let body = self
            .get_text(&url, self.config.backend.timeouts.settings())
            .await?;
        payload::site_settings(&body).map_err(|e| payload_error(&url, e))
    }

    /// Fetch everything the header needs, concurrently. Never fails: each
    /// source that could not be loaded is logged, left empty, and listed in
    /// [`HeaderData::degraded`].
    pub async fn load_header(&self) -> HeaderData {
        let menus = &self.config.menus;
        let (primary, secondary, mega_menus, settings) = tokio::join!(
            self.fetch_menu(&menus.primary),
            self.fetch_menu(&menus.secondary),
            self.fetch_mega_menus(),
            self.fetch_site_settings(),
        );

        let mut data = HeaderData::empty();
        data.primary = degrade(FetchSource::PrimaryMenu, primary, &mut data.degraded);
        data.secondary = degrade(FetchSource::SecondaryMenu, secondary, &mut data.degraded);
        data.mega_menus = degrade(FetchSource::MegaMenus, mega_menus, &mut data.degraded);
        data.settings = degrade(FetchSource::SiteSettings, settings.map(Some), &mut data.degraded);
        data
    }

    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String> {
        tracing::debug!(url = %url, timeout_ms = timeout.as_millis() as u64, "fetching");
        let resp = self
            .http
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(url, timeout, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NavError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text()
            .await
            .map_err(|e| transport_error(url, timeout, e))
    }
}

fn transport_error(url: &str, timeout: Duration, source: reqwest::Error) -> NavError {
    if source.is_timeout() {
        NavError::Timeout {
            url: url.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        NavError::Http {
            url: url.to_string(),
            source,
        }
    }
}

fn payload_error(url: &str, e: serde_json::Error) -> NavError {
    NavError::Payload {
        url: url.to_string(),
        reason: e.to_string(),
    }
}

fn degrade<T: Default>(source: FetchSource, result: Result<T>, degraded: &mut Vec<FetchSource>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(source = source.as_str(), error = %e, "navigation data unavailable, using empty default");
            degraded.push(source);
            T::default()
        }
    }
}
