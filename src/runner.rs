// src/runner.rs
//! Orchestrator: drive every configured site end-to-end, in order.
//!
//! Per site: `Pending -> Rendering -> Extracting -> Exporting -> Exported`,
//! with `NoData` when extraction yields nothing and `Failed` from any
//! working state. A failed site never stops the sites after it.

use std::fmt;
use std::path::PathBuf;

use log::{debug, error, info};

use crate::config::ExportOptions;
use crate::error::SiteError;
use crate::file;
use crate::progress::Progress;
use crate::render::DocumentSource;
use crate::specs::Site;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SiteState {
    Pending,
    Rendering,
    Extracting,
    Exporting,
    Exported,
    NoData,
    Failed,
}

impl fmt::Display for SiteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SiteState::Pending => "PENDING",
            SiteState::Rendering => "RENDERING",
            SiteState::Extracting => "EXTRACTING",
            SiteState::Exporting => "EXPORTING",
            SiteState::Exported => "EXPORTED",
            SiteState::NoData => "NO_DATA",
            SiteState::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

#[derive(Debug)]
pub enum SiteOutcome {
    Exported { path: PathBuf, rows: usize },
    NoData,
    /// `stage` is the state the site was in when it failed.
    Failed { stage: SiteState, error: SiteError },
}

impl SiteOutcome {
    pub fn state(&self) -> SiteState {
        match self {
            SiteOutcome::Exported { .. } => SiteState::Exported,
            SiteOutcome::NoData => SiteState::NoData,
            SiteOutcome::Failed { .. } => SiteState::Failed,
        }
    }
}

#[derive(Debug)]
pub struct SiteReport {
    pub site: String,
    pub url: String,
    pub outcome: SiteOutcome,
}

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<SiteReport>,
}

impl RunSummary {
    pub fn files_written(&self) -> Vec<PathBuf> {
        self.reports
            .iter()
            .filter_map(|r| match &r.outcome {
                SiteOutcome::Exported { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn failed(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.state() == SiteState::Failed).count()
    }

    /// Every attempted site failed (an empty run is not a failure).
    pub fn all_failed(&self) -> bool {
        !self.reports.is_empty() && self.failed() == self.reports.len()
    }
}

/// Top-level runner. `progress` can be None (no operator output).
pub fn run(
    sites: &[Site],
    export: &ExportOptions,
    source: &mut dyn DocumentSource,
    mut progress: Option<&mut dyn Progress>,
) -> RunSummary {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(sites.len());
    }

    let mut summary = RunSummary { reports: Vec::with_capacity(sites.len()) };
    for site in sites {
        if let Some(p) = progress.as_deref_mut() {
            p.site_started(&site.name);
        }
        let report = scrape_site(site, export, source);
        if let Some(p) = progress.as_deref_mut() {
            p.site_finished(&report);
        }
        summary.reports.push(report);
    }

    info!(
        "Run finished: {} exported, {} failed, {} total",
        summary.files_written().len(),
        summary.failed(),
        summary.reports.len()
    );
    if let Some(p) = progress.as_deref_mut() {
        p.finish(&summary);
    }
    summary
}

/// Render, extract and export one site. Failures end up in the report.
pub fn scrape_site(site: &Site, export: &ExportOptions, source: &mut dyn DocumentSource) -> SiteReport {
    let mut state = SiteState::Pending;
    let outcome = drive(site, export, source, &mut state);

    match &outcome {
        SiteOutcome::Failed { stage, error } => error!("{}: failed while {stage}: {error}", site.name),
        SiteOutcome::NoData => info!("{}: no products extracted", site.name),
        SiteOutcome::Exported { path, rows } => info!("{}: {rows} rows -> {}", site.name, path.display()),
    }
    transition(site, &mut state, outcome.state());

    SiteReport { site: site.name.clone(), url: site.url.to_string(), outcome }
}

fn drive(site: &Site, export: &ExportOptions, source: &mut dyn DocumentSource, state: &mut SiteState) -> SiteOutcome {
    let fail = |stage: SiteState, error: SiteError| SiteOutcome::Failed { stage, error };

    transition(site, state, SiteState::Rendering);
    let html = match source.render(site.url.as_str(), Some(site.kind.ready_selector())) {
        Ok(html) => html,
        Err(e) => return fail(*state, e.into()),
    };

    transition(site, state, SiteState::Extracting);
    let records = match site.extract(&html) {
        Ok(records) => records,
        Err(e) => return fail(*state, e.into()),
    };
    if records.is_empty() {
        return SiteOutcome::NoData;
    }

    transition(site, state, SiteState::Exporting);
    match file::export_site(export, &site.name, &records) {
        Ok(Some(path)) => SiteOutcome::Exported { path, rows: records.len() },
        Ok(None) => SiteOutcome::NoData,
        Err(e) => fail(*state, e.into()),
    }
}

fn transition(site: &Site, state: &mut SiteState, next: SiteState) {
    debug!("{}: {} -> {}", site.name, state, next);
    *state = next;
}
