//! Xeno Services Layer
//!
//! Process-level plumbing shared by the driver shim:
//! - side log (append-only file mirror of every diagnostic line)
//! - crash handlers
//! - manifest advisory checks
//! - feature dump report

pub mod crash;
pub mod manifest;
pub mod report;
pub mod side_log;

pub use manifest::{Manifest, ManifestCheck};
pub use report::{FeatureDump, ReportError};
pub use side_log::SideLog;

use tracing_subscriber::fmt::writer::MakeWriterExt;
use xeno_env::Settings;

/// Point the side log at the configured paths and install a global subscriber
/// that writes to stderr and the side log. A subscriber installed earlier by
/// the host is left in place.
pub fn init_logging(settings: &Settings) {
    side_log::global().set_paths(settings.side_log.clone(), settings.side_log_fallback.clone());

    let writer = std::io::stderr.and(|| side_log::global().writer());
    if tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer)
        .try_init()
        .is_err()
    {
        tracing::debug!("global subscriber already installed");
    }
}
