// src/lib.rs

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod file;
pub mod logging;
pub mod progress;
pub mod record;
pub mod render;
pub mod runner;
pub mod specs;

pub use error::{ConfigError, ExportError, ParseError, RenderError, SiteError};
pub use record::ProductRecord;
