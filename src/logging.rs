// src/logging.rs
//! `log` backend: `[HH:MM:SS.mmm][LEVEL] message` lines on stderr, elapsed
//! time counted from `init`. Optionally mirrored into a log file.
//!
//! Records from other crates (webdriver client, HTTP stack) only pass at
//! `Warn` and above.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

static LOGGER: OnceLock<Logger> = OnceLock::new();

struct Logger {
    start: Instant,
    level: LevelFilter,
    file: Option<Mutex<File>>,
}

/// Install the logger once. Later calls leave the first configuration in place.
pub fn init(level: LevelFilter, file: Option<&Path>) -> io::Result<()> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let file = match file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Some(Mutex::new(OpenOptions::new().create(true).append(true).open(path)?))
        }
        None => None,
    };
    let logger = LOGGER.get_or_init(|| Logger { start: Instant::now(), level, file });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
    Ok(())
}

fn own_crate(target: &str) -> bool {
    target.split("::").next() == Some(env!("CARGO_CRATE_NAME"))
}

pub(crate) fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && (own_crate(metadata.target()) || metadata.level() <= Level::Warn)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = fmt_elapsed(self.start.elapsed().as_millis());
        let line = format!("[{elapsed}][{}] {}\n", record.level(), record.args());

        let _ = io::stderr().write_all(line.as_bytes());
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = f.write_all(line.as_bytes());
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = f.flush();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_zero_padded() {
        assert_eq!(fmt_elapsed(0), "00:00:00.000");
        assert_eq!(fmt_elapsed(3_723_004), "01:02:03.004");
    }

    #[test]
    fn foreign_targets_are_recognised() {
        assert!(own_crate("shop_scrape::specs::argos"));
        assert!(!own_crate("fantoccini::session"));
    }
}
