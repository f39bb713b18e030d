use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub(crate) const DB_ENV: &str = "BUDGET_TRACKER_DB";
pub(crate) const LOG_ENV: &str = "BUDGET_TRACKER_LOG";
pub(crate) const CURRENCY_ENV: &str = "BUDGET_TRACKER_CURRENCY";

const DEFAULT_CURRENCY: &str = "£";
const DB_FILE: &str = "budget-tracker.db";
const LOG_FILE: &str = "budget-tracker.log";
const EXPORT_FILE: &str = "budget-tracker-export.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    /// Where `export` writes when no path is given.
    pub export_path: PathBuf,
    pub currency: String,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "budget-tracker", "BudgetTracker")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let home = directories::UserDirs::new().map(|d| d.home_dir().to_path_buf());
        Ok(Self::resolve(
            |key| std::env::var(key).ok(),
            proj_dirs.data_dir(),
            home.as_deref(),
        ))
    }

    /// Builds a config from an environment lookup plus the platform
    /// directories. Empty variables count as unset.
    pub(crate) fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        data_dir: &Path,
        home: Option<&Path>,
    ) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let db_path = var(DB_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DB_FILE));
        let log_path = var(LOG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(LOG_FILE));
        let export_path = home.unwrap_or(data_dir).join(EXPORT_FILE);
        let currency = var(CURRENCY_ENV)
            .map(|c| c.trim().to_string())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        Self {
            data_dir: data_dir.to_path_buf(),
            db_path,
            log_path,
            export_path,
            currency,
        }
    }

    /// Creates every directory the store and log file need.
    pub(crate) fn ensure_dirs(&self) -> Result<()> {
        let dirs = [
            Some(self.data_dir.as_path()),
            self.db_path.parent(),
            self.log_path.parent(),
        ];
        for dir in dirs.into_iter().flatten() {
            if dir.as_os_str().is_empty() {
                continue;
            }
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::collections::HashMap;

    fn resolve_with(vars: &[(&str, &str)], home: Option<&Path>) -> Config {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::resolve(|k| env.get(k).cloned(), Path::new("/data/bt"), home)
    }

    #[test]
    fn test_defaults() {
        let config = resolve_with(&[], Some(Path::new("/home/sam")));
        assert_eq!(config.data_dir, PathBuf::from("/data/bt"));
        assert_eq!(config.db_path, PathBuf::from("/data/bt/budget-tracker.db"));
        assert_eq!(config.log_path, PathBuf::from("/data/bt/budget-tracker.log"));
        assert_eq!(
            config.export_path,
            PathBuf::from("/home/sam/budget-tracker-export.csv")
        );
        assert_eq!(config.currency, "£");
    }

    #[test]
    fn test_env_overrides() {
        let config = resolve_with(
            &[
                (DB_ENV, "/tmp/other.db"),
                (LOG_ENV, "/tmp/other.log"),
                (CURRENCY_ENV, " $ "),
            ],
            None,
        );
        assert_eq!(config.db_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.log_path, PathBuf::from("/tmp/other.log"));
        assert_eq!(config.currency, "$");
    }

    #[test]
    fn test_empty_values_ignored() {
        let config = resolve_with(&[(DB_ENV, ""), (CURRENCY_ENV, "  ")], None);
        assert_eq!(config.db_path, PathBuf::from("/data/bt/budget-tracker.db"));
        assert_eq!(config.currency, "£");
    }

    #[test]
    fn test_export_falls_back_to_data_dir() {
        let config = resolve_with(&[], None);
        assert_eq!(
            config.export_path,
            PathBuf::from("/data/bt/budget-tracker-export.csv")
        );
    }

    #[test]
    fn test_ensure_dirs_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let db = dir.path().join("nested").join("store.db");
        let db_str = db.display().to_string();
        let config = Config::resolve(
            |k| (k == DB_ENV).then(|| db_str.clone()),
            &data_dir,
            None,
        );
        config.ensure_dirs().unwrap();
        assert!(data_dir.is_dir());
        assert!(db.parent().unwrap().is_dir());
    }
}
