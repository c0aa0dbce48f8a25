//! Offline extraction of G-code command catalogs from HTML documentation.
//!
//! This crate turns a firmware's prose documentation page into a
//! [`Catalog`] of [`CommandRecord`]s. Inline code fragments inside list
//! items are classified into one of two dialects (letter + digits codes
//! such as `G28`, or uppercase identifiers such as `SET_FAN_SPEED`), then
//! their parameters, title and documentation anchor are inferred from the
//! text and the surrounding tree.
//!
//! # Main entry points
//!
//! - [`parse_html`]: build the catalog of a registered source from an
//!   HTML string.
//! - [`registry::DocumentationParser`]: per-source parser trait; see
//!   [`registry::PARSERS`].
//! - [`builder::CatalogBuilder`]: the extraction driver, for sources not
//!   in the registry.
//!
//! # Example
//!
//! ```
//! use gcode_catalog_parser::parse_html;
//!
//! let html = r#"
//! <h2 id="g-code-commands">G-Code commands</h2>
//! <ul>
//!   <li><code>G4 P&lt;milliseconds&gt;</code></li>
//!   <li><code>TURN_OFF_HEATERS</code>: Turn off all heaters.</li>
//! </ul>
//! "#;
//!
//! let catalog = parse_html("klipper", html).unwrap();
//! assert_eq!(catalog.len(), 2);
//! let dwell = &catalog.get("G4").unwrap()[0];
//! assert_eq!(dwell.parameters[0].label, "P<milliseconds>");
//! assert_eq!(dwell.url, "https://www.klipper3d.org/G-Codes.html#g-code-commands");
//! ```
//!
//! [`Catalog`]: gcode_catalog_core::Catalog
//! [`CommandRecord`]: gcode_catalog_core::CommandRecord

pub mod builder;
pub mod classify;
pub mod config;
pub mod context;
pub mod dialect;
pub mod dom;
pub mod error;
pub mod output;
pub mod params;
pub mod registry;
pub mod snapshot;
pub mod sources;

use gcode_catalog_core::Catalog;

pub use error::{ParseError, Result};

/// Builds the catalog of the registered source `source_id` from raw HTML.
pub fn parse_html(source_id: &str, html: &str) -> Result<Catalog> {
    let parser = registry::parser_by_id(source_id)?;
    parser.build(&dom::Document::parse(html))
}
