use crate::error::{NavError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// File constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "wpnav.yaml";

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// Menu location validation
// ---------------------------------------------------------------------------

static LOCATION_RE: OnceLock<Regex> = OnceLock::new();

fn location_re() -> &'static Regex {
    LOCATION_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9_\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

/// Menu locations are WordPress theme slugs (`primary`, `second-menu`) and
/// are interpolated into endpoint paths, so anything else is rejected.
pub fn validate_location(location: &str) -> Result<()> {
    if location.is_empty() || location.len() > 64 || !location_re().is_match(location) {
        return Err(NavError::InvalidConfig(format!(
            "invalid menu location '{location}': must be lowercase alphanumeric with hyphens or underscores"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
