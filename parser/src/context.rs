//! Title and anchor recovery from a fragment's position in the tree.

use scraper::ElementRef;

use crate::classify::Dialect;
use crate::dom;

/// Human-readable text attached to a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Title {
    pub title: String,
    pub brief: String,
}

/// Resolves the title and brief for the command at `code`.
pub fn resolve_title(code: ElementRef<'_>, list_item: ElementRef<'_>, dialect: Dialect) -> Title {
    dialect.syntax().resolve_title(code, list_item)
}

/// Fixed-code dialect: the plain text preceding the list item in its
/// parent, nearest first, joined with single spaces. Only `title` is set.
pub fn title_from_preceding_text(list_item: ElementRef<'_>) -> Title {
    let joined = dom::preceding_text(list_item).collect::<Vec<_>>().join(" ");
    Title {
        title: joined.trim().trim_matches(':').to_string(),
        brief: String::new(),
    }
}

/// Named-code dialect: the first non-empty content following the code
/// element. `brief` is the whole text, `title` its first sentence. A
/// whitespace-only text node counts as content and yields an empty title.
pub fn title_from_following_content(code: ElementRef<'_>) -> Title {
    let text = dom::following_content(code)
        .find(|content| !content.is_empty())
        .unwrap_or_default();
    let brief = text
        .replace('\n', "")
        .trim()
        .trim_matches(':')
        .trim()
        .to_string();
    let title = brief.split('.').next().unwrap_or_default().to_string();
    Title { title, brief }
}

/// Elements that may supply the anchor for `list_item`, in priority order.
///
/// For each ancestor of the list item, innermost first, yields the
/// ancestor's preceding siblings, nearest first. The walk ends at the
/// document root, so it is always finite.
pub fn anchor_candidates(list_item: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    dom::ancestors(list_item).flat_map(dom::preceding_elements)
}

/// Identifier of the nearest preceding anchor for `list_item`, or an empty
/// string when there is none.
///
/// Form inputs are skipped: themes use them for navigation toggles and
/// their ids do not point at documentation sections.
pub fn resolve_anchor(list_item: ElementRef<'_>) -> String {
    anchor_candidates(list_item)
        .filter(|element| element.value().name() != "input")
        .find_map(|element| element.value().attr("id"))
        .unwrap_or_default()
        .to_string()
}
