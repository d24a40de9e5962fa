// src/specs/mod.rs
//! # Site extraction specs
//!
//! One module per shop. Each extractor is a pure function from a rendered document
//! to product rows and encodes *where the data lives in that shop's markup*.
//!
//! ## Contract
//! - Candidates whose title or price cannot be resolved are dropped, never an
//!   error. Selector drift shows up as fewer rows.
//! - The stock column is never empty: extracted text or a sentinel.
//! - The number of candidate containers is logged before filtering.
//! - Only a blank document is a `ParseError`.
//!
//! ## Registry
//! `SiteKind` is the closed set of shops with an extractor. Configured site
//! names resolve through `SiteKind::from_name`; anything else is rejected at
//! startup, before a browser is launched.

pub mod argos;
pub mod element_games;
pub mod wayland_games;

use std::fmt;

use scraper::Html;
use url::Url;

use crate::core::html::parse_document;
use crate::core::sanitize::site_key;
use crate::error::ParseError;
use crate::record::ProductRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SiteKind {
    ElementGames,
    WaylandGames,
    Argos,
}

impl SiteKind {
    pub const ALL: [SiteKind; 3] = [SiteKind::ElementGames, SiteKind::WaylandGames, SiteKind::Argos];

    /// Resolve a configured site name ("Wayland Games", "wayland_games", ...).
    pub fn from_name(name: &str) -> Option<SiteKind> {
        let key = site_key(name);
        Self::ALL.into_iter().find(|k| k.key() == key)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SiteKind::ElementGames => "Element Games",
            SiteKind::WaylandGames => "Wayland Games",
            SiteKind::Argos => "Argos",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            SiteKind::ElementGames => "element_games",
            SiteKind::WaylandGames => "wayland_games",
            SiteKind::Argos => "argos",
        }
    }

    /// CSS whose presence means the product grid has rendered; the renderer
    /// waits for it.
    pub fn ready_selector(self) -> &'static str {
        match self {
            SiteKind::ElementGames => element_games::CONTAINER,
            SiteKind::WaylandGames => wayland_games::READY,
            SiteKind::Argos => argos::CONTAINER,
        }
    }

    /// Run this site's extractor over an already-parsed document.
    /// `base` resolves relative product links.
    pub fn extract_from(self, doc: &Html, base: &Url) -> Result<Vec<ProductRecord>, ParseError> {
        match self {
            SiteKind::ElementGames => element_games::extract(doc),
            SiteKind::WaylandGames => wayland_games::extract(doc, base),
            SiteKind::Argos => argos::extract(doc),
        }
    }

    /// Parse `text` and extract.
    pub fn extract(self, text: &str, base: &Url) -> Result<Vec<ProductRecord>, ParseError> {
        let doc = parse_document(text)?;
        self.extract_from(&doc, base)
    }
}

/// A configured shop bound to its extractor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Site {
    pub kind: SiteKind,
    pub name: String,
    pub url: Url,
}

impl Site {
    pub fn new(kind: SiteKind, url: Url) -> Self {
        Self { kind, name: kind.display_name().to_string(), url }
    }

    pub fn extract(&self, text: &str) -> Result<Vec<ProductRecord>, ParseError> {
        self.kind.extract(text, &self.url)
    }
}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_accepts_display_names_and_keys() {
        assert_eq!(SiteKind::from_name("Element Games"), Some(SiteKind::ElementGames));
        assert_eq!(SiteKind::from_name("wayland_games"), Some(SiteKind::WaylandGames));
        assert_eq!(SiteKind::from_name("  ARGOS "), Some(SiteKind::Argos));
        assert_eq!(SiteKind::from_name("Games Workshop"), None);
    }

    #[test]
    fn every_kind_round_trips_through_its_name() {
        for k in SiteKind::ALL {
            assert_eq!(SiteKind::from_name(k.display_name()), Some(k));
            assert_eq!(site_key(k.display_name()), k.key());
        }
    }

    #[test]
    fn wayland_waits_for_prices_not_labelled_links() {
        let doc = parse_document(r#"<nav><a aria-label="Basket" href="/basket">Basket</a></nav>"#).unwrap();
        let ready = crate::core::html::selector(SiteKind::WaylandGames.ready_selector()).unwrap();
        assert!(doc.select(&ready).next().is_none());
    }

    #[test]
    fn blank_document_fails_for_every_site() {
        let base = Url::parse("https://example.com/").unwrap();
        for k in SiteKind::ALL {
            assert!(matches!(k.extract("", &base), Err(ParseError::BlankDocument)));
        }
    }

    #[test]
    fn document_without_containers_yields_nothing() {
        let base = Url::parse("https://example.com/").unwrap();
        let html = "<html><body><p>Nothing to see</p></body></html>";
        for k in SiteKind::ALL {
            assert!(k.extract(html, &base).unwrap().is_empty());
        }
    }
}
