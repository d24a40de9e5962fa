// src/specs/argos.rs
//! Argos listing pages.
//!
//! Product cards are flagged by `data-test="component-product-card-title"`;
//! the price is the next `<strong>` after the title. The listing exposes no
//! stock signal, so every product is reported as "In Stock".

use log::{debug, info};
use scraper::{ElementRef, Html};

use crate::core::html::{find_next, non_empty_text, selector, trimmed_text};
use crate::error::ParseError;
use crate::record::{ProductRecord, IN_STOCK, NOT_AVAILABLE};

pub const CONTAINER: &str = r#"div[data-test="component-product-card-title"]"#;
const PRICE: &str = "strong";

pub fn extract(doc: &Html) -> Result<Vec<ProductRecord>, ParseError> {
    let title_sel = selector(CONTAINER)?;
    let price_sel = selector(PRICE)?;

    let products: Vec<ElementRef<'_>> = doc.select(&title_sel).collect();
    info!("Found {} products in Argos", products.len());

    let mut out = Vec::with_capacity(products.len());
    for (i, title_el) in products.into_iter().enumerate() {
        let title = non_empty_text(title_el);
        let price = find_next(doc, title_el, &price_sel).and_then(trimmed_text);
        match (title, price) {
            (Some(title), Some(price)) => {
                out.push(ProductRecord::new(title, NOT_AVAILABLE, price, IN_STOCK));
            }
            _ => debug!("Argos: skipping candidate #{} (missing title or price)", i + 1),
        }
    }
    Ok(out)
}
