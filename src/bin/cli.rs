// src/bin/cli.rs
use std::process::ExitCode;

use clap::Parser;
use shop_scrape::cli::{self, Args};

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    cli::run(Args::parse())
}
