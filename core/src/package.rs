use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::Catalog;

/// Documentation source that contributed records to a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Stable parser identifier (e.g. `klipper`).
    pub id: String,
    /// Human-readable source name written into each record.
    pub source: String,
    /// Canonical documentation URL.
    pub url: String,
}

/// Serializable catalog bundle used for curation and distribution.
///
/// A package wraps a [`Catalog`] with version metadata and a content hash,
/// making it suitable for writing to a single JSON file that consumers can
/// verify on load.
///
/// # Examples
///
/// ```
/// use gcode_catalog_core::*;
///
/// let mut catalog = Catalog::new();
/// catalog.insert("G28", CommandRecord::new("G28", "Klipper", "https://a#home"));
///
/// let package = CatalogPackage::new("1.0.0", "2024-01-15T10:30:00Z", catalog).with_bundle_hash();
/// assert_eq!(package.command_count(), 1);
/// assert!(package.hash_matches());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPackage {
    /// Catalog contract version (populated from
    /// [`CATALOG_CONTRACT_VERSION`](crate::CATALOG_CONTRACT_VERSION)).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Package format version (semver string).
    pub version: String,
    /// Optional package name.
    pub name: Option<String>,
    /// ISO-8601 timestamp for package creation.
    pub generated_at: String,
    /// Hex SHA-256 of the catalog's JSON encoding.
    pub bundle_hash: Option<String>,
    /// Sources the catalog was built from.
    #[serde(default)]
    pub sources: Vec<SourceInfo>,
    pub catalog: Catalog,
}

impl CatalogPackage {
    /// Creates a package with required fields and no hash.
    pub fn new(version: impl Into<String>, generated_at: impl Into<String>, catalog: Catalog) -> Self {
        Self {
            schema_version: Some(crate::CATALOG_CONTRACT_VERSION.to_string()),
            version: version.into(),
            name: None,
            generated_at: generated_at.into(),
            bundle_hash: None,
            sources: Vec::new(),
            catalog,
        }
    }

    /// Computes and stores the content hash.
    pub fn with_bundle_hash(mut self) -> Self {
        self.bundle_hash = Some(catalog_hash(&self.catalog));
        self
    }

    /// Returns `true` when a hash is present and matches the catalog.
    pub fn hash_matches(&self) -> bool {
        self.bundle_hash
            .as_deref()
            .is_some_and(|hash| hash == catalog_hash(&self.catalog))
    }

    /// Number of command names in the packaged catalog.
    pub fn command_count(&self) -> usize {
        self.catalog.len()
    }
}

/// Hex SHA-256 of the catalog's JSON encoding.
///
/// Keys are sorted by [`Catalog`], so equal catalogs hash equally.
pub fn catalog_hash(catalog: &Catalog) -> String {
    let bytes = serde_json::to_vec(catalog).expect("catalog serialization is infallible");
    format!("{:x}", Sha256::digest(&bytes))
}
