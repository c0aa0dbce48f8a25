//! Catalog merging with configurable conflict resolution.
//!
//! When the same command name is documented by several sources (e.g. two
//! firmware documentation pages), [`merge_catalogs`] combines them into a
//! single catalog using a [`MergeStrategy`] to resolve conflicts.
//!
//! # Example
//!
//! ```
//! use gcode_catalog_core::*;
//!
//! let mut base = Catalog::new();
//! base.insert("G28", CommandRecord::new("G28", "Klipper", "https://a#home"));
//!
//! let mut overlay = Catalog::new();
//! overlay.insert("G28", CommandRecord::new("G28", "Marlin", "https://b#home"));
//! overlay.insert("M400", CommandRecord::new("M400", "Marlin", "https://b#wait"));
//!
//! let merged = merge_catalogs(&base, &overlay, MergeStrategy::Union);
//! assert_eq!(merged.len(), 2);
//! assert_eq!(merged.get("G28").unwrap().len(), 2);
//! ```

use crate::{Catalog, CommandRecord};

/// Catalog merge behavior.
///
/// Controls how a command name present in both the base and the overlay
/// catalog is resolved. Names present on one side only are always kept.
///
/// # Examples
///
/// ```
/// use gcode_catalog_core::*;
///
/// let mut base = Catalog::new();
/// base.insert("M104", CommandRecord::new("M104", "Klipper", "u#").with_title("base"));
/// let mut overlay = Catalog::new();
/// overlay.insert("M104", CommandRecord::new("M104", "Klipper", "u#").with_title("overlay"));
///
/// let m1 = merge_catalogs(&base, &overlay, MergeStrategy::PreferBase);
/// assert_eq!(m1.get("M104").unwrap()[0].title, "base");
///
/// let m2 = merge_catalogs(&base, &overlay, MergeStrategy::PreferOverlay);
/// assert_eq!(m2.get("M104").unwrap()[0].title, "overlay");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Keep the base records when both sides define a name.
    PreferBase,
    /// Keep the overlay records when both sides define a name.
    PreferOverlay,
    /// Keep base records and append overlay records not already present.
    Union,
}

/// Merges two catalogs into one catalog.
///
/// With [`MergeStrategy::Union`], records are compared by value, so merging
/// a catalog with itself yields the same catalog.
pub fn merge_catalogs(base: &Catalog, overlay: &Catalog, strategy: MergeStrategy) -> Catalog {
    let mut merged = base.clone();

    for (name, records) in overlay.iter() {
        let Some(existing) = merged.get(name) else {
            merged.set(name, records.to_vec());
            continue;
        };

        let resolved = match strategy {
            MergeStrategy::PreferBase => existing.to_vec(),
            MergeStrategy::PreferOverlay => records.to_vec(),
            MergeStrategy::Union => union_records(existing, records),
        };
        merged.set(name, resolved);
    }

    merged
}

fn union_records(base: &[CommandRecord], overlay: &[CommandRecord]) -> Vec<CommandRecord> {
    let mut records = base.to_vec();
    for record in overlay {
        if !records.contains(record) {
            records.push(record.clone());
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with(name: &str, title: &str, source: &str) -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(
            name,
            CommandRecord::new(name, source, "https://example.org/doc#x").with_title(title),
        );
        catalog
    }

    #[test]
    fn test_merge_keeps_names_from_both_sides() {
        let base = catalog_with("G1", "Move", "Klipper");
        let overlay = catalog_with("M400", "Wait for moves", "Klipper");

        let merged = merge_catalogs(&base, &overlay, MergeStrategy::PreferBase);
        assert!(merged.contains("G1"));
        assert!(merged.contains("M400"));
    }

    #[test]
    fn test_merge_union_skips_identical_records() {
        let base = catalog_with("G1", "Move", "Klipper");
        let merged = merge_catalogs(&base, &base, MergeStrategy::Union);
        assert_eq!(merged, base);
    }

    #[test]
    fn test_merge_union_accumulates_distinct_variants() {
        let base = catalog_with("G1", "Move", "Klipper");
        let overlay = catalog_with("G1", "Linear move", "Marlin");

        let merged = merge_catalogs(&base, &overlay, MergeStrategy::Union);
        let records = merged.get("G1").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source, "Klipper");
        assert_eq!(records[1].source, "Marlin");
    }

    #[test]
    fn test_merge_prefer_overlay_replaces_records() {
        let base = catalog_with("G1", "Move", "Klipper");
        let overlay = catalog_with("G1", "Linear move", "Marlin");

        let merged = merge_catalogs(&base, &overlay, MergeStrategy::PreferOverlay);
        let records = merged.get("G1").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Linear move");
    }
}
