//! Thin document layer over [`scraper`].
//!
//! Parsers never touch the raw tree directly; they go through the
//! navigation helpers here (enclosing list item, ancestors, sibling text)
//! so that every rule about which nodes count as "content" lives in one
//! place.

use scraper::{ElementRef, Html, Selector};

use crate::error::{ParseError, Result};

/// A fully loaded, read-only HTML document.
#[derive(Debug)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses an HTML page. Malformed markup is repaired by the HTML5
    /// tree builder and never fails.
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// Selects every element matching a CSS selector, in document order.
    pub fn select(&self, css: &str) -> Result<Vec<ElementRef<'_>>> {
        let selector = Selector::parse(css).map_err(|err| ParseError::Selector(err.to_string()))?;
        Ok(self.html.select(&selector).collect())
    }
}

/// Nearest `<li>` ancestor of `element`.
pub fn enclosing_list_item(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    ancestors(element).find(|ancestor| ancestor.value().name() == "li")
}

/// Ancestor elements, innermost first. The document node itself is not an
/// element and is never yielded.
pub fn ancestors(element: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    element.ancestors().filter_map(ElementRef::wrap)
}

/// Preceding sibling elements, nearest first.
pub fn preceding_elements(element: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    element.prev_siblings().filter_map(ElementRef::wrap)
}

/// Preceding sibling text nodes, nearest first. Sibling elements and
/// comments are skipped.
pub fn preceding_text(element: ElementRef<'_>) -> impl Iterator<Item = &str> {
    element
        .prev_siblings()
        .filter_map(|node| node.value().as_text().map(|text| &**text))
}

/// Content of every following sibling, nearest first: text nodes verbatim,
/// elements as their [`plain_text`]. Comments are skipped.
pub fn following_content(element: ElementRef<'_>) -> impl Iterator<Item = String> {
    element.next_siblings().filter_map(|node| {
        if let Some(text) = node.value().as_text() {
            return Some(text.to_string());
        }
        ElementRef::wrap(node).map(plain_text)
    })
}

/// Concatenated descendant text of `element`.
pub fn plain_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_rejects_invalid_selector() {
        let document = Document::parse("<p>x</p>");
        assert!(matches!(
            document.select("code["),
            Err(ParseError::Selector(_))
        ));
    }

    #[test]
    fn test_enclosing_list_item_finds_nearest() {
        let document = Document::parse(
            "<ul><li>outer<ul><li id=\"inner\"><p><code>G1</code></p></li></ul></li></ul>",
        );
        let code = document.select("code").unwrap()[0];
        let item = enclosing_list_item(code).unwrap();
        assert_eq!(item.value().attr("id"), Some("inner"));
    }

    #[test]
    fn test_enclosing_list_item_absent_outside_lists() {
        let document = Document::parse("<p><code>G1</code></p>");
        let code = document.select("code").unwrap()[0];
        assert!(enclosing_list_item(code).is_none());
    }

    #[test]
    fn test_preceding_text_skips_elements() {
        let document = Document::parse("<div>first <b>bold</b> second<span id=\"t\"></span></div>");
        let target = document.select("#t").unwrap()[0];
        let texts: Vec<&str> = preceding_text(target).collect();
        assert_eq!(texts, vec![" second", "first "]);
    }

    #[test]
    fn test_following_content_includes_element_text() {
        let document = Document::parse("<p><code>X</code><em>emph</em> tail</p>");
        let code = document.select("code").unwrap()[0];
        let content: Vec<String> = following_content(code).collect();
        assert_eq!(content, vec!["emph".to_string(), " tail".to_string()]);
    }
}
