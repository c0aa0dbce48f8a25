//! Record type definitions for command catalog modeling.
//!
//! This module defines the normalized data model shared by every
//! documentation parser. The types serialize with [`serde`] into the
//! plain key → record-list structure that downstream tooling consumes.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

/// Version of the catalog contract (semver).
///
/// Embedded in every [`CatalogPackage`](crate::CatalogPackage) to track
/// compatibility across releases.
pub const CATALOG_CONTRACT_VERSION: &str = "1.0.0";

/// One parameter of a documented command.
///
/// `tag` is the bare identifying token (`X`, `TEMPERATURE`, `index`), while
/// `label` keeps the exact display form including bracket and placeholder
/// decoration (`[X<pos>]`, `TEMPERATURE=<value>`).
///
/// # Examples
///
/// ```
/// use gcode_catalog_core::ParameterRecord;
///
/// let param = ParameterRecord::new("S", "[S<temp>]", true);
/// assert!(param.optional);
/// assert!(param.description.is_empty());
/// assert!(param.values.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterRecord {
    /// Identifying token, free of `[]<>=` decoration
    pub tag: String,
    /// Whether the documentation marks the parameter as optional
    pub optional: bool,
    /// Reserved for enrichment; always empty when extracted
    #[serde(default)]
    pub description: String,
    /// Reserved for enrichment; always empty when extracted
    #[serde(default)]
    pub values: Vec<String>,
    /// Display form as documented
    pub label: String,
}

impl ParameterRecord {
    /// Creates a parameter with empty description and values.
    pub fn new(tag: impl Into<String>, label: impl Into<String>, optional: bool) -> Self {
        Self {
            tag: tag.into(),
            optional,
            description: String::new(),
            values: Vec::new(),
            label: label.into(),
        }
    }
}

/// Normalized description of one documented command.
///
/// Use [`CommandRecord::new`] and chain the builder methods to fill in the
/// title, brief and parameters.
///
/// # Examples
///
/// ```
/// use gcode_catalog_core::{CommandRecord, ParameterRecord};
///
/// let record = CommandRecord::new("SET_FAN_SPEED", "Klipper", "https://example.org/doc#fan")
///     .with_title("Set the speed of a fan")
///     .with_brief("Set the speed of a fan. Requires a fan_generic section.")
///     .with_parameter(ParameterRecord::new("FAN", "FAN=<fan_name>", false));
///
/// assert_eq!(record.codes, vec!["SET_FAN_SPEED".to_string()]);
/// assert!(record.related.is_empty());
/// assert_eq!(record.anchor(), Some("fan"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Short title; may be empty but is always present
    pub title: String,
    /// Longer description; empty when the source offers none
    pub brief: String,
    /// Command codes covered by this record (never empty)
    pub codes: Vec<String>,
    /// Related command codes
    #[serde(default)]
    pub related: Vec<String>,
    /// Parameters in documented order
    pub parameters: Vec<ParameterRecord>,
    /// Human-readable documentation source name
    pub source: String,
    /// Deep link into the documentation, `{base_url}#{anchor}`
    pub url: String,
}

impl CommandRecord {
    /// Creates a record for a single code with an empty title and brief.
    pub fn new(code: impl Into<String>, source: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            brief: String::new(),
            codes: vec![code.into()],
            related: Vec::new(),
            parameters: Vec::new(),
            source: source.into(),
            url: url.into(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the brief description.
    pub fn with_brief(mut self, brief: impl Into<String>) -> Self {
        self.brief = brief.into();
        self
    }

    /// Appends a parameter.
    pub fn with_parameter(mut self, parameter: ParameterRecord) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Replaces the parameter list.
    pub fn with_parameters(mut self, parameters: Vec<ParameterRecord>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Returns the URL fragment, if the URL carries one.
    ///
    /// An empty fragment (`...html#`) is returned as `Some("")`.
    pub fn anchor(&self) -> Option<&str> {
        self.url.split_once('#').map(|(_, anchor)| anchor)
    }

    /// Finds a parameter by tag.
    pub fn find_parameter(&self, tag: &str) -> Option<&ParameterRecord> {
        self.parameters.iter().find(|param| param.tag == tag)
    }
}

/// Mapping from command name to the records documenting it.
///
/// Keys are kept sorted so that serialized output is deterministic. The
/// catalog serializes transparently as a JSON object:
/// `{"G28": [{...}], "M104": [{...}]}`.
///
/// # Examples
///
/// ```
/// use gcode_catalog_core::{Catalog, CommandRecord};
///
/// let mut catalog = Catalog::new();
/// catalog.insert("M104", CommandRecord::new("M104", "Klipper", "u#a"));
/// catalog.insert("M104", CommandRecord::new("M104", "Klipper", "u#b"));
/// assert_eq!(catalog.get("M104").unwrap().len(), 1);
///
/// catalog.append("M104", CommandRecord::new("M104", "Klipper", "u#c"));
/// assert_eq!(catalog.get("M104").unwrap().len(), 2);
/// assert_eq!(catalog.record_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    commands: BTreeMap<String, Vec<CommandRecord>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` as the only entry for `name`, returning the records
    /// it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        record: CommandRecord,
    ) -> Option<Vec<CommandRecord>> {
        self.commands.insert(name.into(), vec![record])
    }

    /// Adds `record` as a further variant under `name`.
    pub fn append(&mut self, name: impl Into<String>, record: CommandRecord) {
        self.commands.entry(name.into()).or_default().push(record);
    }

    /// Replaces every record stored under `name`.
    pub fn set(&mut self, name: impl Into<String>, records: Vec<CommandRecord>) {
        self.commands.insert(name.into(), records);
    }

    pub fn get(&self, name: &str) -> Option<&[CommandRecord]> {
        self.commands.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Number of command names.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Total number of records across all names.
    pub fn record_count(&self) -> usize {
        self.commands.values().map(Vec::len).sum()
    }

    /// Command names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CommandRecord])> {
        self.commands
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }
}

impl IntoIterator for Catalog {
    type Item = (String, Vec<CommandRecord>);
    type IntoIter = btree_map::IntoIter<String, Vec<CommandRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

impl FromIterator<(String, CommandRecord)> for Catalog {
    /// Collects records keyed by name; a repeated name keeps the last record.
    fn from_iter<I: IntoIterator<Item = (String, CommandRecord)>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for (name, record) in iter {
            catalog.insert(name, record);
        }
        catalog
    }
}
