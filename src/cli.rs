// src/cli.rs
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Result, WrapErr};
use log::LevelFilter;

use crate::config::consts::DRIVER_START_TIMEOUT_SECS;
use crate::config::{AppOptions, Browser};
use crate::logging;
use crate::progress::Progress;
use crate::render::{DriverProcess, WebDriverSource};
use crate::runner::{self, RunSummary, SiteOutcome, SiteReport};

#[derive(Debug, Parser)]
#[command(
    name = "shop_scrape",
    version,
    about = "Scrape product listings from the configured shops into <site>_products.csv files"
)]
pub struct Args {
    /// JSON config file (sites, render, export sections; all optional)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run the browser without a window
    #[arg(long, conflicts_with = "visible")]
    pub headless: bool,

    /// Show the browser window
    #[arg(long)]
    pub visible: bool,

    #[arg(long, value_enum)]
    pub browser: Option<Browser>,

    /// WebDriver endpoint
    #[arg(long, value_name = "URL")]
    pub webdriver: Option<String>,

    /// Start this WebDriver binary for the run (e.g. chromedriver)
    #[arg(long, value_name = "PATH")]
    pub driver: Option<PathBuf>,

    /// Max seconds to wait for product containers after navigation
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Extra pause once the page is ready
    #[arg(long, value_name = "MS")]
    pub settle: Option<u64>,

    /// Directory for the CSV files
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Only scrape this site (repeatable)
    #[arg(long = "site", value_name = "NAME")]
    pub sites: Vec<String>,

    /// Print the configured sites as name,url and exit
    #[arg(long)]
    pub list_sites: bool,

    /// Also append log lines to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// More diagnostics (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Error,
            (false, 0) => LevelFilter::Info,
            (false, 1) => LevelFilter::Debug,
            (false, _) => LevelFilter::Trace,
        }
    }

    /// Command-line values win over the config file.
    pub fn apply(&self, opts: &mut AppOptions) {
        if self.headless {
            opts.render.headless = true;
        }
        if self.visible {
            opts.render.headless = false;
        }
        if let Some(b) = self.browser {
            opts.render.browser = b;
        }
        if let Some(url) = &self.webdriver {
            opts.render.webdriver_url = url.clone();
        }
        if let Some(bin) = &self.driver {
            opts.render.driver_binary = Some(bin.clone());
        }
        if let Some(secs) = self.timeout {
            opts.render.ready_timeout_secs = secs;
        }
        if let Some(ms) = self.settle {
            opts.render.settle_ms = ms;
        }
        if let Some(dir) = &self.out_dir {
            opts.export.out_dir = dir.clone();
        }
    }
}

/// Console lines for the operator.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn site_started(&mut self, site: &str) {
        println!("Scraping {site}...");
    }

    fn site_finished(&mut self, report: &SiteReport) {
        let site = &report.site;
        match &report.outcome {
            SiteOutcome::Exported { path, .. } => {
                println!("Data from {site} saved successfully. ({})", path.display())
            }
            SiteOutcome::NoData => {
                println!("No data found for {site}. Please check selectors or website structure.")
            }
            SiteOutcome::Failed { error, .. } => println!("Failed to scrape {site}: {error}"),
        }
    }

    fn finish(&mut self, summary: &RunSummary) {
        if summary.all_failed() {
            println!("All {} sites failed.", summary.reports.len());
        }
    }
}

pub fn run(args: Args) -> Result<ExitCode> {
    logging::init(args.log_level(), args.log_file.as_deref()).wrap_err("could not open log file")?;

    let mut opts = match &args.config {
        Some(path) => AppOptions::load(path)?,
        None => AppOptions::default(),
    };
    args.apply(&mut opts);
    if !args.sites.is_empty() {
        opts.restrict_to(&args.sites)?;
    }
    let sites = opts.resolve_sites()?;

    if args.list_sites {
        for site in &sites {
            println!("{},{}", site.name, site.url);
        }
        return Ok(ExitCode::SUCCESS);
    }

    // Held until the run ends; dropping it stops the driver.
    let _driver = match &opts.render.driver_binary {
        Some(bin) => Some(
            DriverProcess::spawn(
                bin,
                &opts.render.webdriver_url,
                Duration::from_secs(DRIVER_START_TIMEOUT_SECS),
            )
            .wrap_err("could not start webdriver")?,
        ),
        None => None,
    };

    let mut source = WebDriverSource::new(opts.render.clone())?;
    let mut progress = ConsoleProgress;
    let summary = runner::run(&sites, &opts.export, &mut source, Some(&mut progress as &mut dyn Progress));

    Ok(if summary.all_failed() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "shop_scrape", "--visible", "--browser", "firefox", "--timeout", "30", "-o", "out",
        ]);
        let mut opts = AppOptions::default();
        args.apply(&mut opts);
        assert!(!opts.render.headless);
        assert_eq!(opts.render.browser, Browser::Firefox);
        assert_eq!(opts.render.ready_timeout_secs, 30);
        assert_eq!(opts.export.out_dir, PathBuf::from("out"));
    }

    #[test]
    fn no_flags_leave_defaults() {
        let args = Args::parse_from(["shop_scrape"]);
        let mut opts = AppOptions::default();
        args.apply(&mut opts);
        assert_eq!(opts, AppOptions::default());
        assert_eq!(args.log_level(), LevelFilter::Info);
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(Args::parse_from(["shop_scrape", "-v"]).log_level(), LevelFilter::Debug);
        assert_eq!(Args::parse_from(["shop_scrape", "-vv"]).log_level(), LevelFilter::Trace);
        assert_eq!(Args::parse_from(["shop_scrape", "-q"]).log_level(), LevelFilter::Error);
    }

    #[test]
    fn repeated_site_flags_collect() {
        let args = Args::parse_from(["shop_scrape", "--site", "Argos", "--site", "wayland_games"]);
        assert_eq!(args.sites, vec!["Argos", "wayland_games"]);
    }
}
