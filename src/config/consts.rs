// src/config/consts.rs

// Sites scraped when no config file says otherwise
pub const DEFAULT_SITES: [(&str, &str); 3] = [
    ("Element Games", "https://www.elementgames.co.uk/"),
    ("Wayland Games", "https://www.waylandgames.co.uk/"),
    ("Argos", "https://www.argos.co.uk/"),
];

// WebDriver (chromedriver listens on 9515 by default)
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
pub const DEFAULT_READY_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SETTLE_MS: u64 = 0;
pub const READY_POLL_MS: u64 = 250;
pub const DRIVER_START_TIMEOUT_SECS: u64 = 15;
pub const DRIVER_POLL_MS: u64 = 100;

// Export
pub const DEFAULT_OUT_DIR: &str = ".";
pub const FILE_SUFFIX: &str = "_products";
pub const FILE_EXT: &str = "csv";
