//! Registry of documentation parsers.
//!
//! Each documentation source implements [`DocumentationParser`] and is
//! listed once in [`PARSERS`]. The catalog-merging layer only ever talks to
//! the trait, so adding a source means adding one implementation and one
//! entry in the slice.

use gcode_catalog_core::{Catalog, MergeStrategy, SourceInfo, merge_catalogs};
use tracing::info;

use crate::builder::{CatalogBuilder, DuplicatePolicy};
use crate::dom::Document;
use crate::error::{ParseError, Result};
use crate::sources::klipper::KlipperParser;

/// A parser for one documentation source.
pub trait DocumentationParser: Sync {
    /// Stable identifier used on the command line and in config files.
    fn id(&self) -> &'static str;

    /// Human-readable source name written into every record.
    fn source(&self) -> &'static str;

    /// Canonical documentation URL; record links are `{url}#{anchor}`.
    fn url(&self) -> &'static str;

    /// File name of the downloaded page inside a snapshot directory.
    fn snapshot_file(&self) -> &'static str;

    /// Builder preconfigured with this source's name and URL.
    fn builder(&self) -> CatalogBuilder<'static> {
        CatalogBuilder::new(self.source(), self.url())
    }

    fn build(&self, document: &Document) -> Result<Catalog> {
        self.builder().build(document)
    }

    fn info(&self) -> SourceInfo {
        SourceInfo {
            id: self.id().to_string(),
            source: self.source().to_string(),
            url: self.url().to_string(),
        }
    }
}

/// Every built-in parser.
pub static PARSERS: &[&dyn DocumentationParser] = &[&KlipperParser];

/// Looks up a parser by identifier.
pub fn parser_by_id(id: &str) -> Result<&'static dyn DocumentationParser> {
    PARSERS
        .iter()
        .copied()
        .find(|parser| parser.id() == id)
        .ok_or_else(|| ParseError::UnknownSource(id.to_string()))
}

/// Identifiers of every built-in parser, in registration order.
pub fn parser_ids() -> Vec<&'static str> {
    PARSERS.iter().map(|parser| parser.id()).collect()
}

/// Builds each (parser, document) pair and merges the results.
///
/// `duplicates` applies within each document. Records for a name documented
/// by several sources are kept side by side.
pub fn build_all<'d, I>(inputs: I, duplicates: DuplicatePolicy) -> Result<Catalog>
where
    I: IntoIterator<Item = (&'static dyn DocumentationParser, &'d Document)>,
{
    let mut merged = Catalog::new();
    for (parser, document) in inputs {
        let catalog = parser
            .builder()
            .with_duplicate_policy(duplicates)
            .build(document)?;
        info!(source = parser.id(), commands = catalog.len(), "merging source catalog");
        merged = merge_catalogs(&merged, &catalog, MergeStrategy::Union);
    }
    Ok(merged)
}
