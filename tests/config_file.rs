// tests/config_file.rs
//
// Loading AppOptions from a JSON file.
//
use std::fs;
use std::path::PathBuf;

use shop_scrape::config::{AppOptions, Browser};
use shop_scrape::error::ConfigError;
use shop_scrape::specs::SiteKind;

fn tmp(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("shop_scrape_config_{}", name));
    p
}

#[test]
fn full_config_file_is_applied() {
    let path = tmp("full.json");
    fs::write(
        &path,
        r#"{
            "sites": [ { "name": "Argos", "url": "https://www.argos.co.uk/browse/toys/" } ],
            "render": { "browser": "firefox", "headless": false, "ready_timeout_secs": 20,
                        "webdriver_url": "http://localhost:4444" },
            "export": { "out_dir": "exports" }
        }"#,
    )
    .unwrap();

    let opts = AppOptions::load(&path).unwrap();
    assert_eq!(opts.render.browser, Browser::Firefox);
    assert!(!opts.render.headless);
    assert_eq!(opts.render.ready_timeout_secs, 20);
    assert_eq!(opts.export.out_dir, PathBuf::from("exports"));

    let sites = opts.resolve_sites().unwrap();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].kind, SiteKind::Argos);
    assert_eq!(sites[0].url.as_str(), "https://www.argos.co.uk/browse/toys/");
}

#[test]
fn missing_file_is_a_read_error() {
    let err = AppOptions::load(&tmp("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn malformed_json_is_reported() {
    let path = tmp("bad.json");
    fs::write(&path, "{ sites: nope").unwrap();
    assert!(matches!(AppOptions::load(&path), Err(ConfigError::Json { .. })));
}
