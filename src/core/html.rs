// src/core/html.rs
//! DOM helpers on top of `scraper`.
//!
//! "Following" means document order after an element's start tag, so an
//! element's own descendants come first, then everything after it.

use scraper::{ElementRef, Html, Node, Selector};

use crate::core::sanitize::normalize_ws;
use crate::error::ParseError;

/// Parse a rendered page. The HTML parser is lenient, so the only
/// rejected input is a document with no content at all.
pub fn parse_document(text: &str) -> Result<Html, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::BlankDocument);
    }
    Ok(Html::parse_document(text))
}

pub fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector {
        css: css.to_string(),
        reason: e.to_string(),
    })
}

/// All text below `el`, whitespace-normalized.
pub fn text_of(el: ElementRef<'_>) -> String {
    let raw: String = el.text().collect();
    normalize_ws(&raw)
}

/// Text of `el`, or `None` when it is empty after normalization.
pub fn non_empty_text(el: ElementRef<'_>) -> Option<String> {
    let t = text_of(el);
    if t.is_empty() { None } else { Some(t) }
}

/// All text below `el` with only the ends trimmed; inner line breaks and
/// spacing are kept as the page shows them. `None` when nothing is left.
pub fn trimmed_text(el: ElementRef<'_>) -> Option<String> {
    let raw: String = el.text().collect();
    let t = raw.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

/// The element's own string: its single text child, or the own string of
/// its single element child. `None` as soon as any level has more than one
/// child, so a wrapper around several spans has no own string.
pub fn own_string(el: ElementRef<'_>) -> Option<String> {
    let mut children = el.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }
    match only.value() {
        Node::Text(t) => Some((**t).to_owned()),
        Node::Element(_) => ElementRef::wrap(only).and_then(own_string),
        _ => None,
    }
}

/// Elements after `el` in document order (descendants included).
pub fn following<'a>(doc: &'a Html, el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    let id = el.id();
    doc.tree
        .root()
        .descendants()
        .skip_while(move |n| n.id() != id)
        .skip(1)
        .filter_map(ElementRef::wrap)
}

/// Nearest following element matching `sel`.
pub fn find_next<'a>(doc: &'a Html, el: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    following(doc, el).find(|e| sel.matches(e))
}

/// Nearest following element matching `sel` that also satisfies `pred`.
pub fn find_next_where<'a, P>(
    doc: &'a Html,
    el: ElementRef<'a>,
    sel: &Selector,
    mut pred: P,
) -> Option<ElementRef<'a>>
where
    P: FnMut(ElementRef<'a>) -> bool,
{
    following(doc, el).find(|e| sel.matches(e) && pred(*e))
}

/// First descendant of `el` matching `sel`.
pub fn first_within<'a>(el: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    el.select(sel).next()
}
