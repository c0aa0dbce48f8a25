//! Catalog and package validation.
//!
//! Validates structural invariants of command records, catalogs and
//! packages, catching errors such as empty code lists, decorated parameter
//! tags and stale bundle hashes before they reach downstream tooling.
//!
//! # Examples
//!
//! ```
//! use gcode_catalog_core::*;
//!
//! let good = CommandRecord::new("G28", "Klipper", "https://a#home")
//!     .with_parameter(ParameterRecord::new("X", "[X]", true));
//! assert!(validate_record("G28", &good).is_empty());
//!
//! // Invalid: the tag keeps its bracket decoration
//! let bad = CommandRecord::new("G28", "Klipper", "https://a#home")
//!     .with_parameter(ParameterRecord::new("[X]", "[X]", true));
//! assert!(!validate_record("G28", &bad).is_empty());
//! ```

use thiserror::Error;

use crate::{Catalog, CatalogPackage, CommandRecord};

/// Characters a parameter tag must never contain.
const TAG_DECORATION: &[char] = &['[', ']', '<', '>'];

/// Catalog/package validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Package version string is empty.
    #[error("package version cannot be empty")]
    EmptyPackageVersion,
    /// Package hash is missing or does not match its catalog.
    #[error("package bundle hash does not match catalog content")]
    BundleHashMismatch,
    /// Catalog key is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// A record lists no codes.
    #[error("record for {0} has no codes")]
    EmptyCodes(String),
    /// A record is stored under a name its codes do not mention.
    #[error("record stored under {name} does not list it in codes {codes:?}")]
    NameNotInCodes { name: String, codes: Vec<String> },
    /// A record has no source name.
    #[error("record for {0} has an empty source")]
    EmptySource(String),
    /// A record URL has no `#` fragment separator.
    #[error("record for {name} has a url without an anchor: {url}")]
    MissingAnchor { name: String, url: String },
    /// A parameter tag keeps bracket or placeholder decoration, or `=` outside
    /// letter + digits codes.
    #[error("parameter tag of {name} carries decoration: {tag}")]
    DecoratedTag { name: String, tag: String },
    /// A parameter has no display label.
    #[error("parameter {tag} of {name} has an empty label")]
    EmptyLabel { name: String, tag: String },
}

/// Validates a full catalog package.
///
/// Checks for an empty version string and a stale hash, then validates the
/// packaged catalog.
pub fn validate_package(package: &CatalogPackage) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if package.version.trim().is_empty() {
        errors.push(ValidationError::EmptyPackageVersion);
        return errors;
    }
    if package.bundle_hash.is_some() && !package.hash_matches() {
        errors.push(ValidationError::BundleHashMismatch);
    }

    errors.extend(validate_catalog(&package.catalog));
    errors
}

/// Validates every record in a catalog.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationError> {
    catalog
        .iter()
        .flat_map(|(name, records)| {
            records
                .iter()
                .flat_map(move |record| validate_record(name, record))
        })
        .collect()
}

/// Validates one record stored under `name`.
pub fn validate_record(name: &str, record: &CommandRecord) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(ValidationError::EmptyCommandName);
        return errors;
    }

    if record.codes.is_empty() {
        errors.push(ValidationError::EmptyCodes(name.to_string()));
    } else if !record.codes.iter().any(|code| code == name) {
        errors.push(ValidationError::NameNotInCodes {
            name: name.to_string(),
            codes: record.codes.clone(),
        });
    }

    if record.source.trim().is_empty() {
        errors.push(ValidationError::EmptySource(name.to_string()));
    }

    if record.anchor().is_none() {
        errors.push(ValidationError::MissingAnchor {
            name: name.to_string(),
            url: record.url.clone(),
        });
    }

    // Letter + digits codes keep `=` in their tags (`K=` for `K=<f>`).
    let allows_equals = is_fixed_code(name);
    for param in &record.parameters {
        if param.tag.contains(TAG_DECORATION) || (!allows_equals && param.tag.contains('=')) {
            errors.push(ValidationError::DecoratedTag {
                name: name.to_string(),
                tag: param.tag.clone(),
            });
        }
        if param.label.is_empty() {
            errors.push(ValidationError::EmptyLabel {
                name: name.to_string(),
                tag: param.tag.clone(),
            });
        }
    }

    errors
}

/// `G`/`M` followed by one or more digits.
fn is_fixed_code(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some('G' | 'M'))
        && !chars.as_str().is_empty()
        && chars.all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParameterRecord;

    fn record(code: &str) -> CommandRecord {
        CommandRecord::new(code, "Klipper", "https://www.klipper3d.org/G-Codes.html#")
    }

    #[test]
    fn test_empty_anchor_is_accepted() {
        assert!(validate_record("M18", &record("M18")).is_empty());
    }

    #[test]
    fn test_rejects_record_without_codes() {
        let mut rec = record("M18");
        rec.codes.clear();
        assert_eq!(
            validate_record("M18", &rec),
            vec![ValidationError::EmptyCodes("M18".to_string())]
        );
    }

    #[test]
    fn test_rejects_key_missing_from_codes() {
        let errors = validate_record("M84", &record("M18"));
        assert!(matches!(errors[0], ValidationError::NameNotInCodes { .. }));
    }

    #[test]
    fn test_rejects_url_without_fragment() {
        let rec = CommandRecord::new("G1", "Klipper", "https://www.klipper3d.org/G-Codes.html");
        let errors = validate_record("G1", &rec);
        assert!(matches!(errors[0], ValidationError::MissingAnchor { .. }));
    }

    #[test]
    fn test_rejects_decorated_tags_and_empty_labels() {
        let rec = record("SET_PIN")
            .with_parameter(ParameterRecord::new("PIN=", "PIN=<config_name>", false))
            .with_parameter(ParameterRecord::new("VALUE", "", false));

        let errors = validate_record("SET_PIN", &rec);
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ValidationError::DecoratedTag { .. }));
        assert!(matches!(errors[1], ValidationError::EmptyLabel { .. }));
    }

    #[test]
    fn test_fixed_code_tags_may_keep_equals() {
        let rec = record("M900")
            .with_parameter(ParameterRecord::new("K=", "K=<f>", false))
            .with_parameter(ParameterRecord::new("L=1", "[L=1]", true));
        assert!(validate_record("M900", &rec).is_empty());

        let bracketed = record("M900").with_parameter(ParameterRecord::new("[K]", "[K]", true));
        assert_eq!(validate_record("M900", &bracketed).len(), 1);
    }

    #[test]
    fn test_is_fixed_code() {
        assert!(is_fixed_code("G28"));
        assert!(is_fixed_code("M900"));
        assert!(!is_fixed_code("M"));
        assert!(!is_fixed_code("MANUAL_PROBE"));
        assert!(!is_fixed_code("G28X"));
    }

    #[test]
    fn test_package_with_stale_hash_is_rejected() {
        let mut catalog = Catalog::new();
        catalog.insert("G4", record("G4"));
        let mut package = CatalogPackage::new("1.0.0", "2024-01-01T00:00:00Z", catalog).with_bundle_hash();
        package.catalog.insert("G90", record("G90"));

        assert_eq!(
            validate_package(&package),
            vec![ValidationError::BundleHashMismatch]
        );
    }

    #[test]
    fn test_package_version_must_not_be_empty() {
        let package = CatalogPackage::new(" ", "2024-01-01T00:00:00Z", Catalog::new());
        assert_eq!(
            validate_package(&package),
            vec![ValidationError::EmptyPackageVersion]
        );
    }
}
