//! Smoke test for the preparation queue

use crate::{FallbackEngine, JobStatus};

pub const SELFTEST_FORMATS: [&str; 3] = ["BC1_UNORM", "BC3_UNORM", "BC7_UNORM"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelftestReport {
    pub results: Vec<(&'static str, bool)>,
}

impl SelftestReport {
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|(_, ok)| *ok)
    }
}

/// Prepare decoders for BC1, BC3 and BC7; a format passes when its job ends ready.
pub fn run_selftest(engine: &FallbackEngine) -> SelftestReport {
    tracing::info!("bc_emulate selftest");
    let results = SELFTEST_FORMATS
        .iter()
        .map(|&format| {
            let report = engine.ensure_ready(format);
            let ok = report.status == JobStatus::Ready;
            tracing::info!(format, ok, "selftest format");
            (format, ok)
        })
        .collect();
    tracing::info!("bc_emulate selftest complete");
    SelftestReport { results }
}
