//! Per-dialect extraction rules.
//!
//! The two dialects share the shape of parameter parsing and record
//! assembly but differ in how a parameter tag is derived and where the
//! title text lives. Each dialect is a unit struct implementing
//! [`CommandSyntax`]; [`Dialect::syntax`](crate::classify::Dialect::syntax)
//! is the only dispatch point.

use regex::Regex;
use scraper::ElementRef;

use crate::classify::{Dialect, FIXED_CODE_RE, NAMED_CODE_RE};
use crate::context::{self, Title};

/// Dialect-specific pieces of command extraction.
pub trait CommandSyntax: Sync {
    fn dialect(&self) -> Dialect;

    /// Anchored pattern capturing the code and the optional parameter text.
    fn pattern(&self) -> &'static Regex;

    /// Tag and label for a `literal<placeholder>` token.
    ///
    /// `token` is the bracket-free token, `literal` the text before the
    /// first `<`, and `placeholder` the remainder with `<`/`>` removed.
    fn placeholder_parameter(&self, token: &str, literal: &str, placeholder: &str) -> (String, String);

    /// Tag and label for a token without any placeholder.
    fn plain_parameter(&self, token: &str) -> (String, String);

    /// Title and brief for a command found at `code` inside `list_item`.
    fn resolve_title(&self, code: ElementRef<'_>, list_item: ElementRef<'_>) -> Title;
}

/// RepRap-style `G`/`M` codes.
pub struct FixedCodeSyntax;

impl CommandSyntax for FixedCodeSyntax {
    fn dialect(&self) -> Dialect {
        Dialect::FixedCode
    }

    fn pattern(&self) -> &'static Regex {
        &FIXED_CODE_RE
    }

    fn placeholder_parameter(&self, _token: &str, literal: &str, placeholder: &str) -> (String, String) {
        (literal.to_string(), format!("{literal}<{placeholder}>"))
    }

    fn plain_parameter(&self, token: &str) -> (String, String) {
        (token.to_string(), token.to_string())
    }

    fn resolve_title(&self, _code: ElementRef<'_>, list_item: ElementRef<'_>) -> Title {
        context::title_from_preceding_text(list_item)
    }
}

/// Extended commands such as `SET_FAN_SPEED FAN=<name>`.
pub struct NamedCodeSyntax;

impl CommandSyntax for NamedCodeSyntax {
    fn dialect(&self) -> Dialect {
        Dialect::NamedCode
    }

    fn pattern(&self) -> &'static Regex {
        &NAMED_CODE_RE
    }

    fn placeholder_parameter(&self, token: &str, literal: &str, _placeholder: &str) -> (String, String) {
        (literal.replace('=', ""), token.to_string())
    }

    fn plain_parameter(&self, token: &str) -> (String, String) {
        (token.replace('=', ""), token.to_string())
    }

    fn resolve_title(&self, code: ElementRef<'_>, _list_item: ElementRef<'_>) -> Title {
        context::title_from_following_content(code)
    }
}
