// src/render/mod.rs
//! Rendered document source.
//!
//! The runner only sees `DocumentSource`: give it a URL, get back the page's
//! HTML after client-side scripts ran. `WebDriverSource` is the real browser;
//! tests plug in canned documents.

mod driver;
mod webdriver;

pub use driver::DriverProcess;
pub use webdriver::{capabilities, WebDriverSource};

use crate::error::RenderError;

pub trait DocumentSource {
    /// Load `url` and return the rendered HTML. `ready` is a CSS selector
    /// whose presence marks the page as ready for extraction.
    fn render(&mut self, url: &str, ready: Option<&str>) -> Result<String, RenderError>;
}
