use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use serde::{Deserialize, Serialize};

const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite database file, `~/` is expanded
    #[serde(default = "default_database")]
    database: String,
    /// IANA zone used to decide whether a show is upcoming and to display times
    #[serde(default = "default_timezone")]
    timezone: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_database() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("fyyur").join("fyyur.db"))
        .unwrap_or_else(|| PathBuf::from("fyyur.db"))
        .to_string_lossy()
        .to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            timezone: default_timezone(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()))?;

        // Fail at startup rather than on the first detail page
        config.timezone()?;
        Ok(config)
    }

    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("fyyur").join("config.toml"))
    }

    /// Load the default config file, falling back to defaults when it doesn't exist
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Write the default config to the default path, if no file exists there yet
    pub fn create_default() -> Result<PathBuf> {
        let path = Self::config_path().ok_or_else(|| eyre!("No config directory available"))?;
        Self::default().write_if_missing(&path)?;
        Ok(path)
    }

    fn write_if_missing(&self, path: &Path) -> Result<()> {
        if path.exists() {
            log::info!("Config already exists at: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).wrap_err_with(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).wrap_err("Failed to serialize config")?;
        std::fs::write(path, contents)
            .wrap_err_with(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Expand ~ to home directory
    fn expand_path(&self, path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return home.join(rest);
        }
        PathBuf::from(path)
    }

    /// Get expanded database path
    pub fn database_path(&self) -> PathBuf {
        self.expand_path(&self.database)
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| eyre!("Invalid timezone `{}`: {}", self.timezone, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_applies_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "database = \"/tmp/fyyur-test.db\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/fyyur-test.db"));
        assert_eq!(config.timezone().unwrap(), chrono_tz::America::Los_Angeles);
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_from_file_rejects_unknown_timezone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timezone = \"Mars/Olympus_Mons\"\n").unwrap();

        let result = Config::from_file(&path);
        assert!(result.is_err());
        assert!(format!("{:?}", result.unwrap_err()).contains("Invalid timezone"));
    }

    #[test]
    fn test_write_if_missing_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            database: "~/music/fyyur.db".into(),
            timezone: "Europe/Berlin".into(),
            port: 8080,
        };
        config.write_if_missing(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.port, 8080);
        assert_eq!(loaded.timezone().unwrap(), chrono_tz::Europe::Berlin);
    }

    #[test]
    fn test_write_if_missing_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = 1234\n").unwrap();

        Config::default().write_if_missing(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.port, 1234);
    }
}
