// src/specs/wayland_games.rs
//! Wayland Games listing pages.
//!
//! Each product is an anchor with an `aria-label`; its price and stock badge
//! are not nested inside it but come after it in document order. The lookup
//! is positional: the nearest price span and the nearest "in stock" span
//! after the anchor belong to that product. A stock span only counts when
//! the phrase is its own string, so a wrapper around price and badge is
//! passed over in favour of the badge itself.

use log::{debug, info};
use scraper::{ElementRef, Html};
use url::Url;

use crate::core::html::{find_next, find_next_where, non_empty_text, own_string, selector, trimmed_text};
use crate::core::sanitize::contains_ci;
use crate::error::ParseError;
use crate::record::{ProductRecord, NOT_AVAILABLE, OUT_OF_STOCK};

pub const CONTAINER: &str = "a[aria-label]";
/// Present only once the product grid has rendered.
pub const READY: &str = PRICE;
const PRICE: &str = "span.Price_price__sfl_r.Price_priceNow__OV_3o";
const SPAN: &str = "span";
const STOCK_PHRASE: &str = "in stock";

pub fn extract(doc: &Html, base: &Url) -> Result<Vec<ProductRecord>, ParseError> {
    let anchor_sel = selector(CONTAINER)?;
    let price_sel = selector(PRICE)?;
    let span_sel = selector(SPAN)?;

    let products: Vec<ElementRef<'_>> = doc
        .select(&anchor_sel)
        .filter(|a| a.value().attr("aria-label").is_some_and(|l| !l.trim().is_empty()))
        .collect();
    info!("Found {} products in Wayland Games", products.len());

    let mut out = Vec::with_capacity(products.len());
    for (i, anchor) in products.into_iter().enumerate() {
        let title = non_empty_text(anchor);
        let price = find_next(doc, anchor, &price_sel).and_then(trimmed_text);
        let (Some(title), Some(price)) = (title, price) else {
            debug!("Wayland Games: skipping candidate #{} (missing title or price)", i + 1);
            continue;
        };

        let stock = find_next_where(doc, anchor, &span_sel, |s| {
            own_string(s).is_some_and(|t| contains_ci(&t, STOCK_PHRASE))
        })
        .and_then(trimmed_text)
            .unwrap_or_else(|| OUT_OF_STOCK.to_string());

        out.push(ProductRecord::new(title, product_url(anchor, base), price, stock));
    }
    Ok(out)
}

/// Absolute link for the anchor, or "N/A" if it has no usable `href`.
fn product_url(anchor: ElementRef<'_>, base: &Url) -> String {
    anchor
        .value()
        .attr("href")
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .and_then(|h| base.join(h).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
