//! Captured configuration flag values and loading them into typed config.
//!
//! # Example YAML
//!
//! ```yaml
//! include:
//!   - "src/*"
//! hidden: false
//! ```
//!
//! The same document can be passed inline as `--json '{"include":["src/*"]}'`.

use std::io::BufReader;
use std::path::PathBuf;

use command_dispatch_core::Context;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Result;
use crate::handle::{CONFIG_FLAG, JSON_FLAG};

/// Values of the `--config` and `--json` flags from one run.
///
/// Empty flag values are stored as `None`.
///
/// # Examples
///
/// ```
/// use command_dispatch_config::ConfigSource;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct Settings {
///     jobs: usize,
/// }
///
/// let source = ConfigSource {
///     path: None,
///     json: Some(r#"{"jobs": 4}"#.to_string()),
/// };
/// let settings: Option<Settings> = source.load().unwrap();
/// assert_eq!(settings, Some(Settings { jobs: 4 }));
///
/// assert!(ConfigSource::default().load::<Settings>().unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSource {
    /// Path given with `--config`.
    pub path: Option<PathBuf>,
    /// Literal JSON given with `--json`.
    pub json: Option<String>,
}

impl ConfigSource {
    /// Builds a source from raw flag values; empty strings mean "not set".
    pub fn from_flags(path: &str, json: &str) -> Self {
        Self {
            path: (!path.is_empty()).then(|| PathBuf::from(path)),
            json: (!json.is_empty()).then(|| json.to_string()),
        }
    }

    /// Reads the flags from the root level of the run `ctx` belongs to.
    ///
    /// Each run sees only its own values, so concurrent runs of one App do
    /// not observe each other's configuration. Missing flags read as unset.
    pub fn from_context(ctx: &Context<'_>) -> Self {
        let root = ctx.root();
        Self::from_flags(
            root.try_string(CONFIG_FLAG).unwrap_or_default(),
            root.try_string(JSON_FLAG).unwrap_or_default(),
        )
    }

    /// Whether neither flag was set.
    pub fn is_empty(&self) -> bool {
        self.path.is_none() && self.json.is_none()
    }

    /// Deserializes the configuration.
    ///
    /// Literal JSON takes precedence over the file. The file is parsed as
    /// YAML, which also accepts JSON documents. Returns `Ok(None)` when
    /// neither flag was set.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError`](crate::ConfigError::JsonError) for malformed
    /// literal JSON, [`IoError`](crate::ConfigError::IoError) if the file
    /// cannot be read, or [`YamlError`](crate::ConfigError::YamlError) if
    /// it cannot be parsed.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if let Some(json) = &self.json {
            debug!("Loading configuration from literal JSON");
            return Ok(Some(serde_json::from_str(json)?));
        }
        if let Some(path) = &self.path {
            debug!(path = %path.display(), "Loading configuration file");
            let file = std::fs::File::open(path)?;
            let config = serde_yaml::from_reader(BufReader::new(file))?;
            return Ok(Some(config));
        }
        Ok(None)
    }

    /// Like [`load`](Self::load) but falls back to `T::default()`.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self) -> Result<T> {
        Ok(self.load()?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde::Deserialize;

    use super::*;
    use crate::ConfigError;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Settings {
        #[serde(default)]
        include: Vec<String>,
        #[serde(default)]
        hidden: bool,
    }

    #[test]
    fn test_from_flags_treats_empty_as_unset() {
        assert!(ConfigSource::from_flags("", "").is_empty());
        let source = ConfigSource::from_flags("c.yml", "");
        assert_eq!(source.path, Some(PathBuf::from("c.yml")));
        assert_eq!(source.json, None);
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "include:\n  - \"src/*\"\nhidden: true").unwrap();

        let source = ConfigSource::from_flags(file.path().to_str().unwrap(), "");
        let settings: Settings = source.load_or_default().unwrap();
        assert_eq!(
            settings,
            Settings {
                include: vec!["src/*".to_string()],
                hidden: true,
            }
        );
    }

    #[test]
    fn test_json_wins_over_file() {
        let source = ConfigSource {
            path: Some(PathBuf::from("/does/not/exist.yml")),
            json: Some(r#"{"hidden": true}"#.to_string()),
        };
        let settings: Settings = source.load_or_default().unwrap();
        assert!(settings.hidden);
    }

    #[test]
    fn test_load_errors() {
        let missing = ConfigSource::from_flags("/does/not/exist.yml", "");
        assert!(matches!(
            missing.load::<Settings>(),
            Err(ConfigError::IoError(_))
        ));

        let bad_json = ConfigSource::from_flags("", "{not json");
        assert!(matches!(
            bad_json.load::<Settings>(),
            Err(ConfigError::JsonError(_))
        ));
    }
}
