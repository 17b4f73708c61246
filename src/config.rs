// ⚙️ Configuration
// JSON file (optional) + environment overrides.
//
// Lookup order for the file: $LITURGICAL_CONFIG, then ./liturgical.json.
// A missing file means defaults. Env vars LITURGICAL_DB and
// LITURGICAL_BIND win over whatever the file says.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "LITURGICAL_CONFIG";
pub const DB_ENV: &str = "LITURGICAL_DB";
pub const BIND_ENV: &str = "LITURGICAL_BIND";
pub const DEFAULT_CONFIG_FILE: &str = "liturgical.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// SQLite file holding feast_days and saints
    pub database_path: PathBuf,

    /// Default size of the "upcoming feasts" list
    pub upcoming_limit: usize,

    /// Longest day-by-day expansion accepted by get_liturgical_dates
    pub max_range_days: i64,

    /// Continue "upcoming feasts" into January once December runs out
    pub wrap_upcoming_feasts: bool,

    /// Listen address for the HTTP server
    pub bind_address: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            database_path: PathBuf::from("dominicana.db"),
            upcoming_limit: 10,
            max_range_days: 3660,
            wrap_upcoming_feasts: false,
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

impl CalendarConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// File (if any) plus env overrides
    pub fn load() -> Result<Self> {
        let mut config = match env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?,
            None => Self::default(),
        };
        config.apply_overrides(env::var(DB_ENV).ok(), env::var(BIND_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, database_path: Option<String>, bind_address: Option<String>) {
        if let Some(path) = database_path.filter(|p| !p.is_empty()) {
            self.database_path = PathBuf::from(path);
        }
        if let Some(addr) = bind_address.filter(|a| !a.is_empty()) {
            self.bind_address = addr;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_range_days < 1 {
            anyhow::bail!("max_range_days must be at least 1, got {}", self.max_range_days);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: CalendarConfig = serde_json::from_str(r#"{"upcoming_limit": 5}"#).unwrap();
        assert_eq!(config.upcoming_limit, 5);
        assert_eq!(config.max_range_days, 3660);
        assert!(!config.wrap_upcoming_feasts);
    }

    #[test]
    fn test_overrides_win() {
        let mut config = CalendarConfig::default();
        config.apply_overrides(Some("/tmp/other.db".to_string()), Some(String::new()));
        assert_eq!(config.database_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn test_zero_range_rejected() {
        let config = CalendarConfig {
            max_range_days: 0,
            ..CalendarConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("liturgical-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"wrap_upcoming_feasts": true, "database_path": "feasts.db"}"#).unwrap();
        let config = CalendarConfig::from_file(&path).unwrap();
        assert!(config.wrap_upcoming_feasts);
        assert_eq!(config.database_path, PathBuf::from("feasts.db"));
        fs::remove_file(&path).ok();
    }
}
