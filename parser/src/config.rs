//! Catalog build configuration.
//!
//! Defines the YAML-serializable configuration that selects documentation
//! sources, where their snapshots live, and how duplicate command names
//! are handled.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! sources:
//!   - klipper
//! snapshot_root: docs
//! duplicates: last-wins
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::builder::DuplicatePolicy;
use crate::error::{ParseError, Result};
use crate::registry::{self, DocumentationParser};

/// Top-level build configuration. Every field has a default, so an empty
/// file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    /// Parser identifiers to build, in merge order.
    pub sources: Vec<String>,
    /// Root directory of the snapshot store.
    pub snapshot_root: PathBuf,
    /// Handling of command names documented more than once.
    pub duplicates: DuplicatePolicy,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            sources: registry::parser_ids().into_iter().map(String::from).collect(),
            snapshot_root: PathBuf::from("docs"),
            duplicates: DuplicatePolicy::default(),
        }
    }
}

impl CatalogConfig {
    /// Loads configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Writes configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Rejects an empty version, an empty source list and unknown sources.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(ParseError::InvalidConfig("version cannot be empty".to_string()));
        }
        if self.sources.is_empty() {
            return Err(ParseError::InvalidConfig("at least one source is required".to_string()));
        }
        self.parsers().map(|_| ())
    }

    /// Parsers for the configured sources, in configured order.
    pub fn parsers(&self) -> Result<Vec<&'static dyn DocumentationParser>> {
        self.sources
            .iter()
            .map(|id| registry::parser_by_id(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: CatalogConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.sources, vec!["klipper".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parses_full_config() {
        let yaml = "version: \"1.0\"\nsources: [klipper]\nsnapshot_root: /tmp/docs\nduplicates: accumulate\n";
        let config: CatalogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.snapshot_root, PathBuf::from("/tmp/docs"));
        assert_eq!(config.duplicates, DuplicatePolicy::Accumulate);
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        let config = CatalogConfig {
            sources: vec!["klipper".to_string(), "reprapfirmware".to_string()],
            ..CatalogConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ParseError::UnknownSource(id)) if id == "reprapfirmware"
        ));
    }

    #[test]
    fn test_empty_sources_are_rejected() {
        let config = CatalogConfig {
            sources: Vec::new(),
            ..CatalogConfig::default()
        };
        assert!(matches!(config.validate(), Err(ParseError::InvalidConfig(_))));
    }

    #[test]
    fn test_save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("catalog.yml");
        let config = CatalogConfig {
            duplicates: DuplicatePolicy::Accumulate,
            ..CatalogConfig::default()
        };

        config.save(&path).unwrap();
        assert_eq!(CatalogConfig::load(&path).unwrap(), config);
    }
}
