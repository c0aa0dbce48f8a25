//! Catalog assembly: candidate selection, extraction and merging.

use std::collections::HashSet;

use gcode_catalog_core::{Catalog, CommandRecord};
use scraper::ElementRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classify::classify;
use crate::context::{resolve_anchor, resolve_title};
use crate::dom::{self, Document};
use crate::error::{ParseError, Result};
use crate::params::parse_parameters;

/// Selector for inline code inside list items; only the first match per
/// list item becomes a candidate.
pub const CANDIDATE_SELECTOR: &str = "li code";

/// What happens when two fragments produce the same command name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DuplicatePolicy {
    /// The later fragment replaces the earlier record.
    #[default]
    LastWins,
    /// Every fragment is kept as a variant under the shared name.
    Accumulate,
}

/// Builds a [`Catalog`] from one documentation page.
///
/// Every record is tagged with `source` and linked as `{base_url}#{anchor}`.
#[derive(Debug, Clone)]
pub struct CatalogBuilder<'a> {
    source: &'a str,
    base_url: &'a str,
    duplicates: DuplicatePolicy,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(source: &'a str, base_url: &'a str) -> Self {
        Self {
            source,
            base_url,
            duplicates: DuplicatePolicy::default(),
        }
    }

    pub fn with_duplicate_policy(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Extracts every recognized command in document order.
    ///
    /// Unrecognized fragments are skipped. A structural fault aborts the
    /// build and is returned to the caller.
    pub fn build(&self, document: &Document) -> Result<Catalog> {
        let mut catalog = Catalog::new();
        let mut skipped = 0usize;

        for code in candidates(document)? {
            match self.extract(code)? {
                Some((name, record)) => self.store(&mut catalog, name, record),
                None => skipped += 1,
            }
        }

        info!(
            source = self.source,
            commands = catalog.len(),
            records = catalog.record_count(),
            skipped,
            "built command catalog"
        );
        Ok(catalog)
    }

    /// Turns one candidate code element into a keyed record.
    ///
    /// Returns `Ok(None)` for fragments matching neither dialect and
    /// [`ParseError::MissingListItem`] when `code` is not inside a list
    /// item.
    pub fn extract(&self, code: ElementRef<'_>) -> Result<Option<(String, CommandRecord)>> {
        let fragment_text = dom::plain_text(code).replace('\n', " ");
        let list_item = dom::enclosing_list_item(code)
            .ok_or_else(|| ParseError::MissingListItem(fragment_text.clone()))?;

        let classification = classify(&fragment_text);
        let (Some(dialect), Some(fragment)) = (classification.dialect(), classification.fragment())
        else {
            debug!(fragment = %fragment_text, "skipping unrecognized code fragment");
            return Ok(None);
        };

        let title = resolve_title(code, list_item, dialect);
        let anchor = resolve_anchor(list_item);
        debug!(
            code = fragment.code,
            dialect = dialect.label(),
            anchor = %anchor,
            "extracted command"
        );

        let record = CommandRecord::new(fragment.code, self.source, format!("{}#{anchor}", self.base_url))
            .with_title(title.title)
            .with_brief(title.brief)
            .with_parameters(parse_parameters(fragment.parameters, dialect));
        Ok(Some((fragment.code.to_string(), record)))
    }

    fn store(&self, catalog: &mut Catalog, name: String, record: CommandRecord) {
        match self.duplicates {
            DuplicatePolicy::LastWins => {
                if catalog.insert(name.clone(), record).is_some() {
                    warn!(command = %name, "command documented more than once; keeping the last");
                }
            }
            DuplicatePolicy::Accumulate => catalog.append(name, record),
        }
    }
}

/// The first inline code element of every list item, in document order.
///
/// Later code elements in the same item annotate parameters and are not
/// separate commands.
pub fn candidates(document: &Document) -> Result<Vec<ElementRef<'_>>> {
    let mut seen = HashSet::new();
    let mut first_codes = Vec::new();

    for code in document.select(CANDIDATE_SELECTOR)? {
        let Some(list_item) = dom::enclosing_list_item(code) else {
            continue;
        };
        if seen.insert(list_item.id()) {
            first_codes.push(code);
        }
    }

    Ok(first_codes)
}
