// src/config/options.rs
//! Run configuration.
//!
//! Precedence: built-in defaults, then the JSON config file (any subset of
//! fields), then command-line overrides applied by the binary.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use super::consts::*;
use crate::core::sanitize::site_key;
use crate::error::ConfigError;
use crate::specs::{Site, SiteKind};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    /// Ordered `{name, url}` table.
    pub sites: Vec<SiteEntry>,
    pub render: RenderOptions,
    pub export: ExportOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            sites: DEFAULT_SITES.iter().map(|(name, url)| SiteEntry::new(*name, *url)).collect(),
            render: RenderOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SiteEntry {
    pub name: String,
    pub url: String,
}

impl SiteEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into() }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Browser {
    #[default]
    Chrome,
    Firefox,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub webdriver_url: String,
    pub browser: Browser,
    pub headless: bool,
    /// Upper bound on waiting for the product containers after navigation.
    pub ready_timeout_secs: u64,
    /// Extra pause once the page is ready.
    pub settle_ms: u64,
    /// Spawn and own this WebDriver binary for the run.
    pub driver_binary: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            browser: Browser::Chrome,
            headless: true,
            ready_timeout_secs: DEFAULT_READY_TIMEOUT_SECS,
            settle_ms: DEFAULT_SETTLE_MS,
            driver_binary: None,
        }
    }
}

impl RenderOptions {
    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { out_dir: PathBuf::from(DEFAULT_OUT_DIR) }
    }
}

impl ExportOptions {
    /// `<out_dir>/<site_key>_products.csv`
    pub fn path_for(&self, site_name: &str) -> PathBuf {
        self.out_dir.join(format!("{}{}.{}", site_key(site_name), FILE_SUFFIX, FILE_EXT))
    }
}

impl AppOptions {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_json(&text).map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Keep only the named sites (display name or key), in configured order.
    pub fn restrict_to(&mut self, names: &[String]) -> Result<(), ConfigError> {
        let wanted: HashSet<String> = names.iter().map(|n| site_key(n)).collect();
        for name in names {
            let key = site_key(name);
            if !self.sites.iter().any(|e| site_key(&e.name) == key) {
                return Err(ConfigError::UnknownSite(name.clone()));
            }
        }
        self.sites.retain(|e| wanted.contains(&site_key(&e.name)));
        Ok(())
    }

    /// Bind every configured entry to its extractor. Fails on the first
    /// name without one, so nothing runs with a partial registry.
    pub fn resolve_sites(&self) -> Result<Vec<Site>, ConfigError> {
        if self.sites.is_empty() {
            return Err(ConfigError::NoSites);
        }
        let mut seen: HashSet<SiteKind> = HashSet::new();
        let mut out = Vec::with_capacity(self.sites.len());
        for entry in &self.sites {
            let kind = SiteKind::from_name(&entry.name)
                .ok_or_else(|| ConfigError::UnknownSite(entry.name.clone()))?;
            if !seen.insert(kind) {
                return Err(ConfigError::DuplicateSite(entry.name.clone()));
            }
            let url = Url::parse(entry.url.trim())
                .map_err(|source| ConfigError::BadUrl { site: entry.name.clone(), source })?;
            out.push(Site { kind, name: entry.name.trim().to_string(), url });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_three_shops() {
        let opts = AppOptions::default();
        let sites = opts.resolve_sites().unwrap();
        let kinds: Vec<SiteKind> = sites.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, SiteKind::ALL.to_vec());
        assert!(opts.render.headless);
        assert_eq!(opts.render.ready_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn path_for_uses_site_key() {
        let export = ExportOptions { out_dir: PathBuf::from("out") };
        assert_eq!(export.path_for("Element Games"), PathBuf::from("out").join("element_games_products.csv"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let opts = AppOptions::from_json(r#"{ "render": { "headless": false } }"#).unwrap();
        assert!(!opts.render.headless);
        assert_eq!(opts.render.webdriver_url, DEFAULT_WEBDRIVER_URL);
        assert_eq!(opts.sites, AppOptions::default().sites);
    }

    #[test]
    fn unknown_site_fails_fast() {
        let opts = AppOptions::from_json(
            r#"{ "sites": [ {"name": "Argos", "url": "https://www.argos.co.uk/"},
                            {"name": "Zavvi", "url": "https://www.zavvi.com/"} ] }"#,
        )
        .unwrap();
        assert!(matches!(opts.resolve_sites(), Err(ConfigError::UnknownSite(n)) if n == "Zavvi"));
    }

    #[test]
    fn duplicate_and_empty_site_tables_are_rejected() {
        let mut opts = AppOptions::default();
        opts.sites.push(SiteEntry::new("argos", "https://www.argos.co.uk/toys"));
        assert!(matches!(opts.resolve_sites(), Err(ConfigError::DuplicateSite(_))));

        opts.sites.clear();
        assert!(matches!(opts.resolve_sites(), Err(ConfigError::NoSites)));
    }

    #[test]
    fn bad_url_is_reported_with_site() {
        let mut opts = AppOptions::default();
        opts.sites[0].url = "not a url".into();
        assert!(matches!(opts.resolve_sites(), Err(ConfigError::BadUrl { site, .. }) if site == "Element Games"));
    }

    #[test]
    fn restrict_to_keeps_order_and_rejects_unknown() {
        let mut opts = AppOptions::default();
        opts.restrict_to(&["argos".into(), "Element Games".into()]).unwrap();
        let names: Vec<&str> = opts.sites.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Element Games", "Argos"]);

        let mut opts = AppOptions::default();
        assert!(matches!(opts.restrict_to(&["Zavvi".into()]), Err(ConfigError::UnknownSite(_))));
    }
}
