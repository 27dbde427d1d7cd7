use dirs::home_dir;
use std::{env, path::Path, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".resale_core";
const HOME_ENV: &str = "RESALE_CORE_HOME";
const CATALOG_FILE: &str = "catalog.json";
const LEGACY_DIR: &str = "legacy";
const CONFIG_FILE: &str = "config.json";

/// Resolves the well-known locations inside an application data directory.
pub struct PathResolver;

impl PathResolver {
    /// Returns `RESALE_CORE_HOME` when set, else `~/.resale_core`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        custom.unwrap_or_else(Self::base_dir)
    }

    pub fn catalog_file_in(base: &Path) -> PathBuf {
        base.join(CATALOG_FILE)
    }

    pub fn legacy_dir_in(base: &Path) -> PathBuf {
        base.join(LEGACY_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_base_wins() {
        let base = PathResolver::resolve_base(Some(PathBuf::from("/tmp/resale")));
        assert_eq!(base, PathBuf::from("/tmp/resale"));
        assert_eq!(
            PathResolver::catalog_file_in(&base),
            PathBuf::from("/tmp/resale/catalog.json")
        );
        assert_eq!(
            PathResolver::legacy_dir_in(&base),
            PathBuf::from("/tmp/resale/legacy")
        );
    }
}
