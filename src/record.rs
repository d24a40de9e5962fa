// src/record.rs
use serde::{Deserialize, Serialize};

/// Placeholder for a field the listing page does not expose.
pub const NOT_AVAILABLE: &str = "N/A";
pub const IN_STOCK: &str = "In Stock";
pub const OUT_OF_STOCK: &str = "Out of Stock";

/// Column order of every export file.
pub const HEADERS: [&str; 4] = ["Product Title", "Product URL", "Price", "Stock Level"];

/// One product row. `price` keeps the site's display string untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "Product Title")]
    pub title: String,
    #[serde(rename = "Product URL")]
    pub url: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Stock Level")]
    pub stock_status: String,
}

impl ProductRecord {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        price: impl Into<String>,
        stock_status: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            price: price.into(),
            stock_status: stock_status.into(),
        }
    }

    /// Fields in export column order.
    pub fn as_row(&self) -> [&str; 4] {
        [&self.title, &self.url, &self.price, &self.stock_status]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_follows_header_order() {
        let r = ProductRecord::new("Toy Set", NOT_AVAILABLE, "£19.99", IN_STOCK);
        assert_eq!(r.as_row(), ["Toy Set", "N/A", "£19.99", "In Stock"]);
        assert_eq!(HEADERS[3], "Stock Level");
    }
}
