//! Menu URL normalization.
//!
//! WordPress stores menu links as absolute URLs pointing at the CMS host,
//! usually under the sub-directory the CMS is installed in. The frontend
//! wants site-relative paths instead.

use crate::config::UrlConfig;
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub const DEFAULT_BASE_PATH: &str = "/moreyeahs-new";

static ABSOLUTE_RE: OnceLock<Regex> = OnceLock::new();

/// Best-effort split of `scheme://host/path?query#fragment` (scheme optional)
/// for inputs the URL parser rejects.
fn absolute_re() -> &'static Regex {
    ABSOLUTE_RE.get_or_init(|| {
        Regex::new(r"^(?i:(?:https?:)?//)([^/?#\s]*)([^?#\s]*)").unwrap()
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlNormalizer {
    base_path: String,
    site_hosts: Vec<String>,
}

impl Default for UrlNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_PATH)
    }
}

impl UrlNormalizer {
    /// `base_path` is the prefix the CMS lives under; pass `""` for none.
    pub fn new(base_path: impl Into<String>) -> Self {
        let base_path = base_path.into().trim().trim_end_matches('/').to_string();
        Self {
            base_path,
            site_hosts: Vec::new(),
        }
    }

    /// Restrict rewriting to these hosts; links to any other host are kept
    /// absolute. With no hosts every http(s) URL is treated as internal.
    pub fn with_site_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.site_hosts = hosts
            .into_iter()
            .map(|h| h.as_ref().trim().to_ascii_lowercase())
            .filter(|h| !h.is_empty())
            .collect();
        self
    }

    pub fn from_config(cfg: &UrlConfig) -> Self {
        Self::new(cfg.base_path.as_str()).with_site_hosts(&cfg.site_hosts)
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Turn a menu URL into a link target.
    ///
    /// Root-relative paths pass through (except `/home`, which is `/`).
    /// Absolute http(s) URLs are reduced to their path with the base path
    /// stripped, a single trailing slash removed, and `/home` mapped to `/`.
    /// Other schemes (`mailto:`, `tel:`) and foreign hosts pass through.
    /// Anything unparseable becomes `/`.
    pub fn normalize(&self, raw: &str) -> String {
        let raw = raw.trim();

        if is_root_relative(raw) {
            return if matches!(raw, "/home" | "/home/") {
                "/".to_string()
            } else {
                raw.to_string()
            };
        }

        match Url::parse(raw) {
            Ok(parsed) => match parsed.scheme() {
                "http" | "https" => {
                    if !self.is_site_host(parsed.host_str().unwrap_or("")) {
                        return raw.to_string();
                    }
                    self.site_path(parsed.path())
                }
                _ => raw.to_string(),
            },
            Err(e) => {
                tracing::debug!(url = %raw, error = %e, "url parse failed, using fallback");
                self.normalize_fallback(raw)
            }
        }
    }

    fn normalize_fallback(&self, raw: &str) -> String {
        let Some(caps) = absolute_re().captures(raw) else {
            return "/".to_string();
        };
        let host = strip_port(caps.get(1).map_or("", |m| m.as_str()));
        if !self.is_site_host(host) {
            return raw.to_string();
        }
        self.site_path(caps.get(2).map_or("", |m| m.as_str()))
    }

    /// `host` must already be free of a port.
    fn is_site_host(&self, host: &str) -> bool {
        if self.site_hosts.is_empty() {
            return true;
        }
        let host = host.to_ascii_lowercase();
        self.site_hosts.iter().any(|h| *h == host)
    }

    /// Reduce a URL path to a site-relative one. The result has exactly one
    /// leading slash, so it can never be read as a protocol-relative URL.
    fn site_path(&self, path: &str) -> String {
        let path = format!("/{}", path.trim_start_matches('/'));
        let mut rest = path.as_str();
        if !self.base_path.is_empty() {
            if rest == self.base_path {
                rest = "";
            } else if let Some(stripped) = rest
                .strip_prefix(self.base_path.as_str())
                .filter(|r| r.starts_with('/'))
            {
                rest = stripped;
            }
        }

        let rest = rest.trim_start_matches('/');
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        if rest.is_empty() || rest == "home" {
            return "/".to_string();
        }
        format!("/{rest}")
    }
}

/// Drop a `:port` suffix from a raw authority, keeping IPv6 brackets.
fn strip_port(host: &str) -> &str {
    match host.rfind(']') {
        Some(end) => &host[..=end],
        None => host.split(':').next().unwrap_or(host),
    }
}

fn is_root_relative(s: &str) -> bool {
    s.starts_with('/') && !s.starts_with("//")
}

/// Normalize with the default base path.
pub fn normalize_url(raw: &str) -> String {
    UrlNormalizer::default().normalize(raw)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "/",
        "/about",
        "/about/",
        "/home",
        "/home/",
        "https://site.com",
        "https://site.com/",
        "https://site.com/moreyeahs-new",
        "https://site.com/moreyeahs-new/",
        "https://site.com/moreyeahs-new/about/",
        "https://site.com/moreyeahs-new/home/",
        "https://site.com/moreyeahs-newsroom/",
        "https://site.com/services/cloud/?ref=nav#top",
        "http://site.com/about us/",
        "//cdn.site.com/moreyeahs-new/blog/",
        "https://site.com/moreyeahs-new//services/",
        "https://site.com//moreyeahs-new/about/",
        "http://[::1]:8080/moreyeahs-new/about/",
        "mailto:hello@site.com",
        "tel:+15551234",
        "about",
        "#",
        "not a url at all",
    ];

    #[test]
    fn strips_base_path_and_trailing_slash() {
        assert_eq!(
            normalize_url("https://site.com/moreyeahs-new/about/"),
            "/about"
        );
    }

    #[test]
    fn home_maps_to_root() {
        assert_eq!(normalize_url("/home"), "/");
        assert_eq!(normalize_url("https://site.com/home/"), "/");
        assert_eq!(normalize_url("https://site.com/moreyeahs-new/home"), "/");
    }

    #[test]
    fn empty_is_root() {
        assert_eq!(normalize_url(""), "/");
        assert_eq!(normalize_url("   "), "/");
    }

    #[test]
    fn base_path_alone_is_root() {
        assert_eq!(normalize_url("https://site.com/moreyeahs-new"), "/");
        assert_eq!(normalize_url("https://site.com/moreyeahs-new/"), "/");
    }

    #[test]
    fn base_path_must_match_whole_segment() {
        assert_eq!(
            normalize_url("https://site.com/moreyeahs-newsroom/"),
            "/moreyeahs-newsroom"
        );
    }

    #[test]
    fn root_relative_passes_through() {
        assert_eq!(normalize_url("/about/"), "/about/");
        assert_eq!(normalize_url("/moreyeahs-new/about"), "/moreyeahs-new/about");
    }

    #[test]
    fn query_and_fragment_are_dropped_from_absolute_urls() {
        assert_eq!(
            normalize_url("https://site.com/services/cloud/?ref=nav#top"),
            "/services/cloud"
        );
    }

    #[test]
    fn protocol_relative_uses_fallback() {
        assert_eq!(normalize_url("//cdn.site.com/moreyeahs-new/blog/"), "/blog");
    }

    #[test]
    fn doubled_slashes_never_yield_protocol_relative_paths() {
        assert_eq!(
            normalize_url("https://site.com/moreyeahs-new//services/"),
            "/services"
        );
        assert_eq!(normalize_url("https://site.com//moreyeahs-new/about/"), "/about");
        assert_eq!(normalize_url("https://site.com///"), "/");
        for sample in SAMPLES {
            let once = normalize_url(sample);
            assert!(
                !once.starts_with("//") || once == sample.trim(),
                "{sample:?} normalized to {once:?}"
            );
        }
    }

    #[test]
    fn ipv6_site_hosts_match() {
        let n = UrlNormalizer::default().with_site_hosts(["[::1]"]);
        assert_eq!(n.normalize("http://[::1]:8080/moreyeahs-new/about/"), "/about");
        assert_eq!(n.normalize("http://[::2]/about/"), "http://[::2]/about/");
    }

    #[test]
    fn fallback_strips_port_before_host_check() {
        let n = UrlNormalizer::default().with_site_hosts(["site.com"]);
        assert_eq!(n.normalize("https://site.com:99999/about/"), "/about");
        assert_eq!(strip_port("[::1]:8080"), "[::1]");
        assert_eq!(strip_port("site.com:80"), "site.com");
    }

    #[test]
    fn non_http_schemes_pass_through() {
        assert_eq!(normalize_url("mailto:hello@site.com"), "mailto:hello@site.com");
        assert_eq!(normalize_url("tel:+15551234"), "tel:+15551234");
    }

    #[test]
    fn unparseable_is_root() {
        assert_eq!(normalize_url("about"), "/");
        assert_eq!(normalize_url("not a url at all"), "/");
    }

    #[test]
    fn foreign_hosts_stay_absolute_when_hosts_configured() {
        let n = UrlNormalizer::default().with_site_hosts(["site.com"]);
        assert_eq!(n.normalize("https://site.com/moreyeahs-new/about/"), "/about");
        assert_eq!(
            n.normalize("https://www.linkedin.com/company/x/"),
            "https://www.linkedin.com/company/x/"
        );
        assert_eq!(n.normalize("https://SITE.com:8443/blog/"), "/blog");
    }

    #[test]
    fn empty_base_path_only_trims() {
        let n = UrlNormalizer::new("");
        assert_eq!(n.normalize("https://site.com/moreyeahs-new/x/"), "/moreyeahs-new/x");
    }

    #[test]
    fn base_path_trailing_slash_is_ignored() {
        let n = UrlNormalizer::new("/cms/");
        assert_eq!(n.base_path(), "/cms");
        assert_eq!(n.normalize("https://site.com/cms/team/"), "/team");
    }

    #[test]
    fn normalization_is_idempotent() {
        let normalizers = [
            UrlNormalizer::default(),
            UrlNormalizer::new(""),
            UrlNormalizer::default().with_site_hosts(["site.com"]),
        ];
        for n in &normalizers {
            for sample in SAMPLES {
                let once = n.normalize(sample);
                assert_eq!(n.normalize(&once), once, "not idempotent for {sample:?}");
            }
        }
    }
}
