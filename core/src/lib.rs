//! Core record types and shared catalog primitives.
//!
//! This crate defines the normalized data model that every documentation
//! parser produces:
//!
//! - [`CommandRecord`]: one documented command (title, brief, parameters,
//!   deep link back to the documentation).
//! - [`ParameterRecord`]: one parameter of a command, with its display label.
//! - [`Catalog`]: mapping from command name to one or more records.
//! - [`CatalogPackage`]: a versioned, hashed bundle of a catalog for
//!   distribution.
//!
//! Validation ([`validate_catalog`], [`validate_package`]) catches structural
//! errors such as empty code lists or decorated parameter tags.
//!
//! Merging ([`merge_catalogs`]) combines catalogs from several documentation
//! sources using a [`MergeStrategy`].
//!
//! # Example
//!
//! ```
//! use gcode_catalog_core::*;
//!
//! let mut catalog = Catalog::new();
//! catalog.insert(
//!     "G28",
//!     CommandRecord::new("G28", "Klipper", "https://www.klipper3d.org/G-Codes.html#g-code-commands")
//!         .with_title("Home axes")
//!         .with_parameter(ParameterRecord::new("X", "[X]", true)),
//! );
//!
//! assert_eq!(catalog.get("G28").unwrap()[0].title, "Home axes");
//! assert!(validate_catalog(&catalog).is_empty());
//! ```

mod merge;
mod package;
mod types;
mod validate;

pub use merge::{MergeStrategy, merge_catalogs};
pub use package::{CatalogPackage, SourceInfo, catalog_hash};
pub use types::*;
pub use validate::{ValidationError, validate_catalog, validate_package, validate_record};
