// src/error.rs
//! Error taxonomy.
//!
//! `RenderError`, `ParseError` and `ExportError` are fatal to one site only;
//! the runner records them in that site's report and moves on.
//! `ConfigError` is raised before any site is attempted.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("render failed for {url}: {kind}")]
pub struct RenderError {
    pub url: String,
    pub kind: RenderErrorKind,
}

impl RenderError {
    pub fn new(url: impl Into<String>, kind: RenderErrorKind) -> Self {
        Self { url: url.into(), kind }
    }
}

#[derive(Debug, Error)]
pub enum RenderErrorKind {
    #[error("could not build runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("could not start browser session: {0}")]
    Session(String),

    #[error("navigation failed: {0}")]
    Navigate(String),

    #[error("could not read page source: {0}")]
    Source(String),

    #[error("webdriver process: {0}")]
    Driver(String),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("document is blank")]
    BlankDocument,

    #[error("invalid selector `{css}`: {reason}")]
    Selector { css: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not prepare {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no extractor registered for site `{0}`")]
    UnknownSite(String),

    #[error("site `{0}` is configured more than once")]
    DuplicateSite(String),

    #[error("invalid url for site `{site}`: {source}")]
    BadUrl {
        site: String,
        #[source]
        source: url::ParseError,
    },

    #[error("no sites configured")]
    NoSites,
}

/// Everything that can end one site's iteration.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
