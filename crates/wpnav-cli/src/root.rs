use std::path::{Path, PathBuf};
use wpnav_core::paths::CONFIG_FILE;

/// Resolve the site root directory.
///
/// Priority:
/// 1. `--root` flag / `WPNAV_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `wpnav.yaml`
/// 3. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_config_dir(&cwd).unwrap_or(cwd)
}

fn find_config_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE).is_file())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root(Some(dir.path()));
        assert_eq!(result, dir.path());
    }

    #[test]
    fn finds_config_in_ancestor() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "backend:\n  api_url: http://x\n").unwrap();
        let subdir = dir.path().join("themes/deep");
        std::fs::create_dir_all(&subdir).unwrap();

        assert_eq!(find_config_dir(&subdir).as_deref(), Some(dir.path()));
    }

    #[test]
    fn no_config_anywhere() {
        let dir = TempDir::new().unwrap();
        let subdir = dir.path().join("a/b");
        std::fs::create_dir_all(&subdir).unwrap();
        // Ancestors above the temp dir are outside our control; only check
        // that the temp dir itself is not reported.
        assert_ne!(find_config_dir(&subdir).as_deref(), Some(dir.path()));
    }
}
