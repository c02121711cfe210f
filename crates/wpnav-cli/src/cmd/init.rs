use anyhow::Context;
use std::path::Path;
use wpnav_core::config::Config;
use wpnav_core::{io, paths};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

pub fn run(root: &Path, api_url: Option<&str>) -> anyhow::Result<()> {
    println!("Initializing wpnav in: {}", root.display());

    let config = Config::new(api_url.unwrap_or(DEFAULT_API_URL));
    let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
    let path = paths::config_path(root);
    let created = io::write_if_missing(&path, yaml.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;

    if created {
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
        if api_url.is_some() {
            println!("  note: --api-url ignored; edit backend.api_url in {} instead", paths::CONFIG_FILE);
        }
    }
    Ok(())
}
