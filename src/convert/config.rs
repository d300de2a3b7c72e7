//! Converter defaults persistence
//!
//! Defaults live in ~/.config/csv2xspf/config.json. Every field is optional
//! and command-line flags take precedence over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::reader::RowPolicy;
use crate::xspf::OutputEncoding;

/// User defaults for conversions
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Playlist title when none is given on the command line
    pub title: Option<String>,
    /// Playlist creator when none is given on the command line
    pub creator: Option<String>,
    /// How to treat rows with missing columns
    pub short_rows: RowPolicy,
    /// Encoding of written documents
    pub encoding: OutputEncoding,
    /// Stamp every playlist with its creation time
    pub stamp_date: bool,
}

impl ConverterConfig {
    /// Load defaults from `explicit`, or from the user config directory
    ///
    /// A missing file in the user config directory means defaults. An
    /// explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let path = match Self::config_path() {
            Ok(path) => path,
            Err(e) => {
                debug!("{}, using defaults", e);
                return Ok(Self::default());
            }
        };

        if !path.exists() {
            debug!("No config found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load defaults from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config {:?}", path))?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("csv2xspf").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() -> Result<()> {
        let json = r#"{
            "title": "Exported Mix",
            "creator": "me",
            "short_rows": "fail",
            "encoding": "us-ascii",
            "stamp_date": true
        }"#;

        let config: ConverterConfig = serde_json::from_str(json)?;

        assert_eq!(config.title.as_deref(), Some("Exported Mix"));
        assert_eq!(config.creator.as_deref(), Some("me"));
        assert_eq!(config.short_rows, RowPolicy::Fail);
        assert_eq!(config.encoding, OutputEncoding::Ascii);
        assert!(config.stamp_date);
        Ok(())
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() -> Result<()> {
        let config: ConverterConfig = serde_json::from_str(r#"{"short_rows": "pad"}"#)?;

        assert_eq!(config.title, None);
        assert_eq!(config.short_rows, RowPolicy::Pad);
        assert_eq!(config.encoding, OutputEncoding::Utf8);
        assert!(!config.stamp_date);
        Ok(())
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(serde_json::from_str::<ConverterConfig>(r#"{"titel": "typo"}"#).is_err());
    }

    #[test]
    fn test_load_explicit_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{"title": "From File"}}"#)?;

        let config = ConverterConfig::load(Some(file.path()))?;
        assert_eq!(config.title.as_deref(), Some("From File"));
        Ok(())
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(ConverterConfig::load(Some(&missing)).is_err());
    }
}
