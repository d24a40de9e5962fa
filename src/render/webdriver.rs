// src/render/webdriver.rs
//! `DocumentSource` backed by a WebDriver endpoint (chromedriver/geckodriver).
//!
//! Each `render` opens its own session, so every page gets a fresh browser
//! instance. The session is closed on every path before `render` returns.
//! Calls block: the async client runs on a private current-thread runtime.

use fantoccini::{Client, ClientBuilder, Locator};
use log::{debug, warn};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};

use super::DocumentSource;
use crate::config::consts::READY_POLL_MS;
use crate::config::{Browser, RenderOptions};
use crate::error::{RenderError, RenderErrorKind};

pub struct WebDriverSource {
    rt: Runtime,
    opts: RenderOptions,
}

impl WebDriverSource {
    pub fn new(opts: RenderOptions) -> Result<Self, RenderError> {
        let rt = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| RenderError::new(&opts.webdriver_url, RenderErrorKind::Runtime(e)))?;
        Ok(Self { rt, opts })
    }
}

impl DocumentSource for WebDriverSource {
    fn render(&mut self, url: &str, ready: Option<&str>) -> Result<String, RenderError> {
        self.rt.block_on(render_page(&self.opts, url, ready))
    }
}

async fn render_page(opts: &RenderOptions, url: &str, ready: Option<&str>) -> Result<String, RenderError> {
    debug!("Opening {:?} session on {}", opts.browser, opts.webdriver_url);
    let mut builder = ClientBuilder::native();
    builder.capabilities(capabilities(opts.browser, opts.headless));
    let client = builder
        .connect(&opts.webdriver_url)
        .await
        .map_err(|e| RenderError::new(url, RenderErrorKind::Session(e.to_string())))?;

    let result = load(&client, opts, url, ready).await;

    if let Err(e) = client.close().await {
        warn!("Closing browser session for {url} failed: {e}");
    }
    result
}

async fn load(client: &Client, opts: &RenderOptions, url: &str, ready: Option<&str>) -> Result<String, RenderError> {
    client
        .goto(url)
        .await
        .map_err(|e| RenderError::new(url, RenderErrorKind::Navigate(e.to_string())))?;

    match ready {
        Some(css) => {
            let waited = client
                .wait()
                .at_most(opts.ready_timeout())
                .every(Duration::from_millis(READY_POLL_MS))
                .for_element(Locator::Css(css))
                .await;
            match waited {
                Ok(_) => debug!("{url}: `{css}` present"),
                Err(e) => warn!(
                    "{url}: `{css}` not present after {}s ({e}); reading page as-is",
                    opts.ready_timeout_secs
                ),
            }
        }
        None => tokio::time::sleep(opts.ready_timeout()).await,
    }

    if !opts.settle().is_zero() {
        tokio::time::sleep(opts.settle()).await;
    }

    client
        .source()
        .await
        .map_err(|e| RenderError::new(url, RenderErrorKind::Source(e.to_string())))
}

/// W3C capabilities for a new session.
pub fn capabilities(browser: Browser, headless: bool) -> Map<String, Value> {
    let mut caps = Map::new();
    match browser {
        Browser::Chrome => {
            let mut args = vec!["--window-size=1400,1200", "--disable-gpu", "--disable-dev-shm-usage"];
            if headless {
                args.push("--headless=new");
            }
            caps.insert("browserName".into(), json!("chrome"));
            caps.insert("goog:chromeOptions".into(), json!({ "args": args }));
        }
        Browser::Firefox => {
            let mut args = Vec::new();
            if headless {
                args.push("-headless");
            }
            caps.insert("browserName".into(), json!("firefox"));
            caps.insert("moz:firefoxOptions".into(), json!({ "args": args }));
        }
    }
    caps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(caps: &Map<String, Value>, key: &str) -> Vec<String> {
        caps[key]["args"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn chrome_headless_flag_follows_option() {
        let on = capabilities(Browser::Chrome, true);
        let off = capabilities(Browser::Chrome, false);
        assert_eq!(on["browserName"], "chrome");
        assert!(args(&on, "goog:chromeOptions").iter().any(|a| a.starts_with("--headless")));
        assert!(!args(&off, "goog:chromeOptions").iter().any(|a| a.starts_with("--headless")));
    }

    #[test]
    fn firefox_uses_moz_options() {
        let caps = capabilities(Browser::Firefox, true);
        assert_eq!(caps["browserName"], "firefox");
        assert_eq!(args(&caps, "moz:firefoxOptions"), vec!["-headless"]);
    }

    #[test]
    fn unreachable_endpoint_is_a_session_error() {
        let opts = RenderOptions {
            webdriver_url: "http://127.0.0.1:1".into(),
            ..RenderOptions::default()
        };
        let mut source = WebDriverSource::new(opts).unwrap();
        let err = source.render("https://www.argos.co.uk/", None).unwrap_err();
        assert_eq!(err.url, "https://www.argos.co.uk/");
        assert!(matches!(err.kind, RenderErrorKind::Session(_)));
    }
}
