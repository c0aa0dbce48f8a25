//! Dialect classification of inline code fragments.
//!
//! Documentation prose contains plenty of inline code that is not a
//! command (config keys, file names, shell snippets). A fragment either
//! matches one of the two command dialects or is silently dropped.

use std::sync::LazyLock;

use regex::Regex;

use crate::dialect::{CommandSyntax, FixedCodeSyntax, NamedCodeSyntax};

/// Letter + digits codes (`G28`, `M104 S<temp>`).
pub(crate) static FIXED_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([GM]\d+)(?:\s(.*))?$").expect("static regex must compile")
});

/// Uppercase identifier codes (`SET_FAN_SPEED FAN=<name>`).
pub(crate) static NAMED_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][A-Z_]+)(?:\s(.*))?$").expect("static regex must compile")
});

/// Command-name syntax of a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// A single letter from a fixed set followed by digits.
    FixedCode,
    /// An uppercase identifier made of letters and underscores.
    NamedCode,
}

impl Dialect {
    /// Dialects in the order they are tried.
    pub const ALL: [Dialect; 2] = [Dialect::FixedCode, Dialect::NamedCode];

    /// Dialect-specific extraction rules.
    pub fn syntax(self) -> &'static dyn CommandSyntax {
        match self {
            Dialect::FixedCode => &FixedCodeSyntax,
            Dialect::NamedCode => &NamedCodeSyntax,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dialect::FixedCode => "fixed-code",
            Dialect::NamedCode => "named-code",
        }
    }
}

/// A recognized fragment split into command name and trailing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFragment<'a> {
    pub code: &'a str,
    /// Text after the separating whitespace; empty when absent.
    pub parameters: &'a str,
}

/// Result of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    FixedCode(CommandFragment<'a>),
    NamedCode(CommandFragment<'a>),
    Unrecognized,
}

impl<'a> Classification<'a> {
    pub fn dialect(&self) -> Option<Dialect> {
        match self {
            Classification::FixedCode(_) => Some(Dialect::FixedCode),
            Classification::NamedCode(_) => Some(Dialect::NamedCode),
            Classification::Unrecognized => None,
        }
    }

    pub fn fragment(&self) -> Option<CommandFragment<'a>> {
        match self {
            Classification::FixedCode(fragment) | Classification::NamedCode(fragment) => {
                Some(*fragment)
            }
            Classification::Unrecognized => None,
        }
    }

    fn recognized(dialect: Dialect, fragment: CommandFragment<'a>) -> Self {
        match dialect {
            Dialect::FixedCode => Classification::FixedCode(fragment),
            Dialect::NamedCode => Classification::NamedCode(fragment),
        }
    }
}

/// Decides which dialect a fragment belongs to.
///
/// The fixed-code pattern is tried first. The two patterns are disjoint
/// (one requires digits after the letter, the other forbids them), so the
/// order only matters for documentation purposes.
pub fn classify(fragment: &str) -> Classification<'_> {
    for dialect in Dialect::ALL {
        if let Some(parts) = split_fragment(dialect.syntax().pattern(), fragment) {
            return Classification::recognized(dialect, parts);
        }
    }
    Classification::Unrecognized
}

fn split_fragment<'a>(pattern: &Regex, fragment: &'a str) -> Option<CommandFragment<'a>> {
    let captures = pattern.captures(fragment)?;
    let code = captures.get(1)?.as_str();
    let parameters = captures.get(2).map_or("", |m| m.as_str());
    Some(CommandFragment { code, parameters })
}
