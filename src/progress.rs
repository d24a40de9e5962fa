// src/progress.rs
use crate::runner::{RunSummary, SiteReport};

/// Operator-facing progress for a run. Frontends implement this to surface
/// status; diagnostics go through `log` instead.
pub trait Progress {
    /// Called at the start with the number of configured sites.
    fn begin(&mut self, _total: usize) {}

    /// A site is about to be rendered.
    fn site_started(&mut self, _site: &str) {}

    /// A site reached a terminal state (exported, no data, failed).
    fn site_finished(&mut self, _report: &SiteReport) {}

    /// Called once after every site was attempted.
    fn finish(&mut self, _summary: &RunSummary) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
