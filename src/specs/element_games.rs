// src/specs/element_games.rs
//! Element Games listing pages.
//!
//! ```text
//! <div class="product-list-item">
//!   <h3 class="producttitle">…</h3>
//!   <span class="price">£45.00</span>
//!   <div class="stock_popup">Low Stock</div>      (or the green-button image)
//! </div>
//! ```
//! The listing carries no per-product link, so the URL column is "N/A".

use log::{debug, info};
use scraper::{ElementRef, Html, Selector};

use crate::core::html::{first_within, non_empty_text, selector, trimmed_text};
use crate::error::ParseError;
use crate::record::{ProductRecord, IN_STOCK, NOT_AVAILABLE, OUT_OF_STOCK};

pub const CONTAINER: &str = "div.product-list-item";
const TITLE: &str = "h3.producttitle";
const PRICE: &str = "span.price";
const STOCK_POPUP: &str = "div.stock_popup";
const STOCK_IMAGE: &str = r#"img[src="//images/green-button.png"]"#;

struct Selectors {
    container: Selector,
    title: Selector,
    price: Selector,
    popup: Selector,
    image: Selector,
}

impl Selectors {
    fn build() -> Result<Self, ParseError> {
        Ok(Self {
            container: selector(CONTAINER)?,
            title: selector(TITLE)?,
            price: selector(PRICE)?,
            popup: selector(STOCK_POPUP)?,
            image: selector(STOCK_IMAGE)?,
        })
    }
}

pub fn extract(doc: &Html) -> Result<Vec<ProductRecord>, ParseError> {
    let sel = Selectors::build()?;
    let products: Vec<ElementRef<'_>> = doc.select(&sel.container).collect();
    info!("Found {} products in Element Games", products.len());

    let mut out = Vec::with_capacity(products.len());
    for (i, product) in products.into_iter().enumerate() {
        let title = first_within(product, &sel.title).and_then(non_empty_text);
        let price = first_within(product, &sel.price).and_then(trimmed_text);
        let (Some(title), Some(price)) = (title, price) else {
            debug!("Element Games: skipping candidate #{} (missing title or price)", i + 1);
            continue;
        };
        let stock = stock_level(product, &sel);
        out.push(ProductRecord::new(title, NOT_AVAILABLE, price, stock));
    }
    Ok(out)
}

/// Popup text wins; an empty popup falls through to the green indicator
/// image, which alone means in stock.
fn stock_level(product: ElementRef<'_>, sel: &Selectors) -> String {
    if let Some(text) = first_within(product, &sel.popup).and_then(trimmed_text) {
        return text;
    }
    if first_within(product, &sel.image).is_some() {
        return IN_STOCK.to_string();
    }
    OUT_OF_STOCK.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html::parse_document;

    fn run(html: &str) -> Vec<ProductRecord> {
        extract(&parse_document(html).unwrap()).unwrap()
    }

    #[test]
    fn keeps_complete_item_and_drops_priceless_one() {
        let html = r#"
            <div class="product-list-item">
              <h3 class="producttitle"> Space Marine </h3>
              <span class="price">£45.00</span>
              <div class="stock_popup">Low Stock</div>
            </div>
            <div class="product-list-item">
              <h3 class="producttitle">Ork Boyz</h3>
            </div>
        "#;
        let rows = run(html);
        assert_eq!(rows, vec![ProductRecord::new("Space Marine", "N/A", "£45.00", "Low Stock")]);
    }

    #[test]
    fn green_button_image_means_in_stock() {
        let html = r#"
            <div class="product-list-item">
              <h3 class="producttitle">Tau Drone</h3>
              <span class="price">£9.50</span>
              <img src="//images/green-button.png">
            </div>
        "#;
        assert_eq!(run(html)[0].stock_status, IN_STOCK);
    }

    #[test]
    fn no_stock_signal_means_out_of_stock() {
        let html = r#"
            <div class="product-list-item">
              <h3 class="producttitle">Necron Warrior</h3>
              <span class="price">£30.00</span>
              <img src="//images/red-button.png">
            </div>
        "#;
        assert_eq!(run(html)[0].stock_status, OUT_OF_STOCK);
    }

    #[test]
    fn empty_popup_falls_back_to_image_then_out_of_stock() {
        let html = r#"
            <div class="product-list-item">
              <h3 class="producttitle">Tau Drone</h3>
              <span class="price">£9.50</span>
              <div class="stock_popup">  </div>
              <img src="//images/green-button.png">
            </div>
            <div class="product-list-item">
              <h3 class="producttitle">Ork Boy</h3>
              <span class="price">£4.00</span>
              <div class="stock_popup"></div>
            </div>
        "#;
        let rows = run(html);
        assert_eq!(rows[0].stock_status, IN_STOCK);
        assert_eq!(rows[1].stock_status, OUT_OF_STOCK);
    }

    #[test]
    fn price_is_trimmed_but_otherwise_untouched() {
        let html = "<div class=\"product-list-item\"><h3 class=\"producttitle\">Space Marine</h3>\
                    <span class=\"price\"> £45.00\n   <s>£50.00</s> </span></div>";
        assert_eq!(run(html)[0].price, "£45.00\n   £50.00");
    }

    #[test]
    fn missing_title_drops_candidate() {
        let html = r#"
            <div class="product-list-item">
              <h3 class="other">Not a title</h3>
              <span class="price">£1.00</span>
            </div>
            <div class="product-list-item">
              <h3 class="producttitle">   </h3>
              <span class="price">£2.00</span>
            </div>
        "#;
        assert!(run(html).is_empty());
    }

    #[test]
    fn fields_are_scoped_to_their_container() {
        let html = r#"
            <div class="product-list-item">
              <h3 class="producttitle">Alpha</h3>
            </div>
            <div class="product-list-item">
              <span class="price">£3.00</span>
            </div>
        "#;
        assert!(run(html).is_empty());
    }
}
