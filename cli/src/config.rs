use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "order.toml";

/// Settings read from `order.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub log: LogConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Log filter used when neither `-v` nor `RUST_LOG` is given.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Colored diagnostics.
    pub color: bool,
    /// Indented JSON output.
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            color: true,
            pretty_json: true,
        }
    }
}

impl Config {
    /// Load an explicit config file, or `order.toml` from the working
    /// directory when present. No file means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config '{}'", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config("[output]\npretty_json = false\n");
        let config = Config::from_file(file.path()).expect("valid config");
        assert!(!config.output.pretty_json);
        assert!(config.output.color);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn log_level() {
        let file = write_config("[log]\nlevel = \"order=debug\"\n");
        let config = Config::from_file(file.path()).expect("valid config");
        assert_eq!(config.log.level, "order=debug");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("[output]\ncolour = false\n");
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/order.toml"))).unwrap_err();
        assert!(err.to_string().contains("cannot read config"));
    }
}
