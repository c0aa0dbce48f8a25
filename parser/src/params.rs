//! Parameter list parsing.
//!
//! Parameter text is the free-form tail of a code fragment, e.g.
//! `[T<index>] [S<temperature>]` or `FAN=<fan_name> [SPEED=<speed>]`.
//! Each whitespace-separated token becomes one [`ParameterRecord`]:
//!
//! - `[`…`]` marks the token optional; brackets never reach the tag.
//! - `<name>` alone is an all-placeholder token whose tag is `name`.
//! - `tag<name>` splits into a literal tag and a placeholder.
//!
//! How the tag and label are derived from the bracket-free token is
//! decided by the dialect's [`CommandSyntax`](crate::dialect::CommandSyntax).

use gcode_catalog_core::ParameterRecord;

use crate::classify::Dialect;

/// Splits parameter text into parameter records, in order.
///
/// Empty or whitespace-only text yields an empty list; tokens that are
/// empty once brackets are removed are dropped.
pub fn parse_parameters(text: &str, dialect: Dialect) -> Vec<ParameterRecord> {
    text.split_whitespace()
        .filter_map(|token| parse_parameter(token, dialect))
        .collect()
}

/// Parses a single parameter token.
pub fn parse_parameter(token: &str, dialect: Dialect) -> Option<ParameterRecord> {
    let optional = token.starts_with('[') || token.ends_with(']');
    let working: String = token.chars().filter(|ch| !matches!(ch, '[' | ']')).collect();
    if working.is_empty() {
        return None;
    }

    let (tag, label) = if working.starts_with('<') {
        let name = strip_angles(&working);
        let label = format!("<{name}>");
        (name, label)
    } else if let Some(split) = working.find('<') {
        let (literal, rest) = working.split_at(split);
        dialect
            .syntax()
            .placeholder_parameter(&working, literal, &strip_angles(rest))
    } else {
        dialect.syntax().plain_parameter(&working)
    };

    let label = if optional { format!("[{label}]") } else { label };
    Some(ParameterRecord::new(tag, label, optional))
}

fn strip_angles(text: &str) -> String {
    text.chars().filter(|ch| !matches!(ch, '<' | '>')).collect()
}
