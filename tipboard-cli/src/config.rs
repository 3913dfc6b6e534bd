//! Runner configuration file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk configuration, merged under CLI flag overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub auto_reload: bool,
    pub debounce_ms: u32,
    pub table_rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let defaults = tipboard::Config::default();
        Self {
            auto_reload: defaults.auto_reload,
            debounce_ms: defaults.debounce_ms,
            table_rows: defaults.table_rows,
        }
    }
}

impl AppConfig {
    pub fn into_config(self) -> tipboard::Config {
        tipboard::Config::default()
            .auto_reload(self.auto_reload)
            .debounce_ms(self.debounce_ms)
            .table_rows(self.table_rows)
    }
}

/// Get the path to the config file.
fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tipboard").join("config.toml"))
}

/// Load the runner configuration.
/// Returns defaults if the config file doesn't exist or can't be parsed.
pub fn load() -> AppConfig {
    let Some(path) = config_path() else {
        return AppConfig::default();
    };

    let Ok(contents) = std::fs::read_to_string(&path) else {
        return AppConfig::default();
    };

    toml::from_str(&contents).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_track_the_library() {
        let config = AppConfig::default().into_config();
        let library = tipboard::Config::default();
        assert_eq!(config.auto_reload, library.auto_reload);
        assert_eq!(config.debounce_ms, library.debounce_ms);
        assert_eq!(config.table_rows, library.table_rows);
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let config: AppConfig = toml::from_str("debounce_ms = 100").unwrap();
        assert_eq!(config.debounce_ms, 100);
        assert!(config.auto_reload);
        assert_eq!(config.table_rows, tipboard::Config::default().table_rows);
    }

    #[test]
    fn default_config_serializes() {
        let serialized = toml::to_string(&AppConfig::default()).unwrap();
        assert!(serialized.contains("auto_reload"));
        assert!(serialized.contains("debounce_ms"));
        assert!(serialized.contains("table_rows"));
    }
}
