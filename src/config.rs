// Settings loading and parsing (config/settings.toml).
//
// Every setting has a built-in default so the tool runs with zero setup; the
// file only exists to point at a different API base, change the request
// timeout, or pick the default rankings format.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::rankings::RankingFormat;
use crate::sleeper::DEFAULT_BASE_URL;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    Validation { field: String, message: String },
}

// ---------------------------------------------------------------------------
// settings.toml structs
// ---------------------------------------------------------------------------

/// Raw file shape. Both tables are optional so a partial file works.
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    sleeper: SleeperSection,
    #[serde(default)]
    rankings: RankingsSection,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SleeperSection {
    base_url: String,
    timeout_secs: u64,
}

impl Default for SleeperSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RankingsSection {
    default_format: String,
}

impl Default for RankingsSection {
    fn default() -> Self {
        Self {
            default_format: "standard".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Assembled Settings
// ---------------------------------------------------------------------------

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Duration,
    pub default_format: RankingFormat,
}

impl Default for Settings {
    fn default() -> Self {
        // The built-in defaults always validate.
        assemble(SettingsFile::default()).expect("built-in defaults must be valid")
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load settings from `config/settings.toml` under `base_dir`.
///
/// A missing file yields the built-in defaults; a file that is present but
/// unparseable or invalid is an error.
pub fn load_settings_from(base_dir: &Path) -> Result<Settings, ConfigError> {
    let path = base_dir.join("config").join("settings.toml");

    let file = if path.exists() {
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            source: e,
        })?
    } else {
        SettingsFile::default()
    };

    assemble(file)
}

/// Convenience wrapper: loads settings relative to the current working
/// directory.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::Io {
        path: PathBuf::from("."),
        source: e,
    })?;
    load_settings_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn assemble(file: SettingsFile) -> Result<Settings, ConfigError> {
    let base_url = file.sleeper.base_url.trim_end_matches('/').to_string();
    if base_url.is_empty() {
        return Err(ConfigError::Validation {
            field: "sleeper.base_url".into(),
            message: "must not be empty".into(),
        });
    }

    if file.sleeper.timeout_secs == 0 {
        return Err(ConfigError::Validation {
            field: "sleeper.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    let default_format =
        file.rankings
            .default_format
            .parse::<RankingFormat>()
            .map_err(|e| ConfigError::Validation {
                field: "rankings.default_format".into(),
                message: e.to_string(),
            })?;

    Ok(Settings {
        base_url,
        timeout: Duration::from_secs(file.sleeper.timeout_secs),
        default_format,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_settings(dir: &Path, contents: &str) {
        let config_dir = dir.join("config");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("settings.toml"), contents).unwrap();
    }

    // -- Defaults --

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(dir.path()).unwrap();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.default_format, RankingFormat::Standard);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_settings(dir.path(), "[rankings]\ndefault_format = \"bc\"\n");

        let settings = load_settings_from(dir.path()).unwrap();
        assert_eq!(settings.default_format, RankingFormat::Bc);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    // -- Overrides --

    #[test]
    fn full_file_overrides_everything() {
        let dir = tempfile::tempdir().unwrap();
        write_settings(
            dir.path(),
            "[sleeper]\n\
             base_url = \"http://localhost:8080/v1\"\n\
             timeout_secs = 5\n\
             \n\
             [rankings]\n\
             default_format = \"bc\"\n",
        );

        let settings = load_settings_from(dir.path()).unwrap();
        assert_eq!(settings.base_url, "http://localhost:8080/v1");
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.default_format, RankingFormat::Bc);
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let dir = tempfile::tempdir().unwrap();
        write_settings(dir.path(), "[sleeper]\nbase_url = \"http://localhost:8080/v1/\"\n");

        let settings = load_settings_from(dir.path()).unwrap();
        assert_eq!(settings.base_url, "http://localhost:8080/v1");
    }

    // -- Validation failures --

    #[test]
    fn zero_timeout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_settings(dir.path(), "[sleeper]\ntimeout_secs = 0\n");

        let err = load_settings_from(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { field, .. } if field == "sleeper.timeout_secs"));
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_settings(dir.path(), "[sleeper]\nbase_url = \"\"\n");

        let err = load_settings_from(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { field, .. } if field == "sleeper.base_url"));
    }

    #[test]
    fn bad_default_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_settings(dir.path(), "[rankings]\ndefault_format = \"xyz\"\n");

        let err = load_settings_from(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { field, .. } if field == "rankings.default_format"));
    }

    #[test]
    fn unparseable_toml_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_settings(dir.path(), "this is not toml = = =");

        let err = load_settings_from(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    // -- Default impl --

    #[test]
    fn settings_default_matches_missing_file() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.default_format, RankingFormat::Standard);
    }
}
