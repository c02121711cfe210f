use crate::error::{NavError, Result};
use crate::links::DEFAULT_BASE_PATH;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// EndpointConfig
// ---------------------------------------------------------------------------

/// REST paths on the CMS, relative to `api_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Must contain `{location}`.
    #[serde(default = "default_menu_endpoint")]
    pub menu: String,
    #[serde(default = "default_mega_menu_endpoint")]
    pub mega_menus: String,
    #[serde(default = "default_settings_endpoint")]
    pub settings: String,
}

fn default_menu_endpoint() -> String {
    "/wp-json/custom/v1/menus/{location}".to_string()
}

fn default_mega_menu_endpoint() -> String {
    "/wp-json/custom/v1/mega-menus".to_string()
}

fn default_settings_endpoint() -> String {
    "/wp-json/custom/v1/site-settings".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            menu: default_menu_endpoint(),
            mega_menus: default_mega_menu_endpoint(),
            settings: default_settings_endpoint(),
        }
    }
}

// ---------------------------------------------------------------------------
// TimeoutConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_menu_ms")]
    pub menu_ms: u64,
    #[serde(default = "default_mega_menu_ms")]
    pub mega_menu_ms: u64,
    #[serde(default = "default_settings_ms")]
    pub settings_ms: u64,
}

fn default_menu_ms() -> u64 {
    10_000
}

fn default_mega_menu_ms() -> u64 {
    5_000
}

fn default_settings_ms() -> u64 {
    5_000
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            menu_ms: default_menu_ms(),
            mega_menu_ms: default_mega_menu_ms(),
            settings_ms: default_settings_ms(),
        }
    }
}

impl TimeoutConfig {
    pub fn menu(&self) -> Duration {
        Duration::from_millis(self.menu_ms)
    }

    pub fn mega_menu(&self) -> Duration {
        Duration::from_millis(self.mega_menu_ms)
    }

    pub fn settings(&self) -> Duration {
        Duration::from_millis(self.settings_ms)
    }
}

// ---------------------------------------------------------------------------
// BackendConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub api_url: String,
    #[serde(default)]
    pub endpoints: EndpointConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

impl BackendConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            endpoints: EndpointConfig::default(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// UrlConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlConfig {
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Hosts whose links are rewritten to site-relative paths. Empty means
    /// every http(s) link is treated as internal.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub site_hosts: Vec<String>,
}

fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            site_hosts: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// MenuConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuConfig {
    #[serde(default = "default_primary")]
    pub primary: String,
    #[serde(default = "default_secondary")]
    pub secondary: String,
    /// The desktop primary bar renders plain links and submenus only.
    #[serde(default = "default_suppress")]
    pub suppress_mega_on_primary: bool,
}

fn default_primary() -> String {
    "primary".to_string()
}

fn default_secondary() -> String {
    "second-menu".to_string()
}

fn default_suppress() -> bool {
    true
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            secondary: default_secondary(),
            suppress_mega_on_primary: default_suppress(),
        }
    }
}

// ---------------------------------------------------------------------------
// InteractionConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    #[serde(default = "default_close_delay_ms")]
    pub close_delay_ms: u64,
}

fn default_close_delay_ms() -> u64 {
    200
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            close_delay_ms: default_close_delay_ms(),
        }
    }
}

impl InteractionConfig {
    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub backend: BackendConfig,
    #[serde(default)]
    pub urls: UrlConfig,
    #[serde(default)]
    pub menus: MenuConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
}

fn default_version() -> u32 {
    1
}

impl Config {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            version: 1,
            backend: BackendConfig::new(api_url),
            urls: UrlConfig::default(),
            menus: MenuConfig::default(),
            interaction: InteractionConfig::default(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(NavError::NotConfigured);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// Absolute URL of the menu endpoint for `location`.
    pub fn menu_url(&self, location: &str) -> String {
        self.endpoint_url(&self.backend.endpoints.menu.replace("{location}", location))
    }

    pub fn mega_menus_url(&self) -> String {
        self.endpoint_url(&self.backend.endpoints.mega_menus)
    }

    pub fn settings_url(&self) -> String {
        self.endpoint_url(&self.backend.endpoints.settings)
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.backend.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let mut push = |level: WarnLevel, message: String| {
            warnings.push(ConfigWarning { level, message });
        };

        // 1. api_url must be an absolute http(s) URL
        let api_url = self.backend.api_url.trim();
        if api_url.is_empty() {
            push(WarnLevel::Error, "backend.api_url is empty".to_string());
        } else {
            match url::Url::parse(api_url) {
                Ok(u) if matches!(u.scheme(), "http" | "https") => {}
                Ok(u) => push(
                    WarnLevel::Error,
                    format!("backend.api_url uses unsupported scheme '{}'", u.scheme()),
                ),
                Err(e) => push(
                    WarnLevel::Error,
                    format!("backend.api_url '{api_url}' is not a valid URL: {e}"),
                ),
            }
        }

        // 2. Menu endpoint must be parameterized by location
        if !self.backend.endpoints.menu.contains("{location}") {
            push(
                WarnLevel::Error,
                "backend.endpoints.menu must contain '{location}'".to_string(),
            );
        }

        // 3. Zero timeouts abort every fetch immediately
        let timeouts = &self.backend.timeouts;
        for (name, ms) in [
            ("menu_ms", timeouts.menu_ms),
            ("mega_menu_ms", timeouts.mega_menu_ms),
            ("settings_ms", timeouts.settings_ms),
        ] {
            if ms == 0 {
                push(
                    WarnLevel::Error,
                    format!("backend.timeouts.{name} is 0; every fetch would time out"),
                );
            }
        }

        // 4. Base path shape
        let base = &self.urls.base_path;
        if !base.is_empty() && !base.starts_with('/') {
            push(
                WarnLevel::Warning,
                format!("urls.base_path '{base}' should start with '/'"),
            );
        }
        if base.len() > 1 && base.ends_with('/') {
            push(
                WarnLevel::Warning,
                format!("urls.base_path '{base}' has a trailing '/'; it is ignored"),
            );
        }

        // 5. Menu locations
        for (name, location) in [
            ("menus.primary", &self.menus.primary),
            ("menus.secondary", &self.menus.secondary),
        ] {
            if let Err(e) = paths::validate_location(location) {
                push(WarnLevel::Error, format!("{name}: {e}"));
            }
        }
        if self.menus.primary == self.menus.secondary {
            push(
                WarnLevel::Warning,
                format!(
                    "menus.primary and menus.secondary are both '{}'; the drawer fallback never applies",
                    self.menus.primary
                ),
            );
        }

        // 6. Close delay
        let delay = self.interaction.close_delay_ms;
        if delay == 0 {
            push(
                WarnLevel::Warning,
                "interaction.close_delay_ms is 0; panels close before the pointer reaches them"
                    .to_string(),
            );
        } else if delay > 2_000 {
            push(
                WarnLevel::Warning,
                format!("interaction.close_delay_ms={delay} (>2000 is unusual)"),
            );
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::new("https://cms.example.com");
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.version, 1);
    }

    #[test]
    fn minimal_yaml_gets_defaults() {
        let cfg: Config = serde_yaml::from_str("backend:\n  api_url: https://cms.example.com\n")
            .unwrap();
        assert_eq!(cfg.urls.base_path, "/moreyeahs-new");
        assert_eq!(cfg.menus.primary, "primary");
        assert_eq!(cfg.menus.secondary, "second-menu");
        assert!(cfg.menus.suppress_mega_on_primary);
        assert_eq!(cfg.interaction.close_delay_ms, 200);
        assert_eq!(cfg.backend.timeouts.menu_ms, 10_000);
        assert_eq!(cfg.backend.timeouts.mega_menu_ms, 5_000);
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::new("https://cms.example.com");
        cfg.urls.site_hosts = vec!["cms.example.com".into()];
        cfg.save(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn load_missing_is_not_configured() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(NavError::NotConfigured)
        ));
    }

    #[test]
    fn endpoint_urls_join_cleanly() {
        let cfg = Config::new("https://cms.example.com/moreyeahs-new/");
        assert_eq!(
            cfg.menu_url("second-menu"),
            "https://cms.example.com/moreyeahs-new/wp-json/custom/v1/menus/second-menu"
        );
        assert_eq!(
            cfg.mega_menus_url(),
            "https://cms.example.com/moreyeahs-new/wp-json/custom/v1/mega-menus"
        );
    }

    #[test]
    fn default_config_has_no_warnings() {
        let cfg = Config::new("https://cms.example.com");
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn validate_flags_bad_backend() {
        let mut cfg = Config::new("ftp://cms.example.com");
        cfg.backend.endpoints.menu = "/wp-json/menus/primary".into();
        cfg.backend.timeouts.settings_ms = 0;
        let warnings = cfg.validate();
        let errors: Vec<_> = warnings
            .iter()
            .filter(|w| w.level == WarnLevel::Error)
            .collect();
        assert_eq!(errors.len(), 3, "{warnings:?}");
        assert!(errors.iter().any(|w| w.message.contains("scheme 'ftp'")));
        assert!(errors.iter().any(|w| w.message.contains("{location}")));
        assert!(errors.iter().any(|w| w.message.contains("settings_ms")));
    }

    #[test]
    fn validate_flags_menu_and_interaction_oddities() {
        let mut cfg = Config::new("https://cms.example.com");
        cfg.urls.base_path = "cms/".into();
        cfg.menus.secondary = "primary".into();
        cfg.interaction.close_delay_ms = 5_000;
        let warnings = cfg.validate();
        assert!(warnings.iter().all(|w| w.level == WarnLevel::Warning));
        assert!(warnings.iter().any(|w| w.message.contains("should start with '/'")));
        assert!(warnings.iter().any(|w| w.message.contains("trailing '/'")));
        assert!(warnings.iter().any(|w| w.message.contains("drawer fallback")));
        assert!(warnings.iter().any(|w| w.message.contains("close_delay_ms=5000")));
    }

    #[test]
    fn validate_rejects_bad_location() {
        let mut cfg = Config::new("https://cms.example.com");
        cfg.menus.primary = "Main Menu".into();
        assert!(cfg
            .validate()
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.starts_with("menus.primary")));
    }
}
