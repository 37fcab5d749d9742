//! Xeno Fallback Resolution
//!
//! Decides whether a BCn format needs a software decoder and, when it does,
//! locates and loads the precompiled SPIR-V decode program:
//! - `needs_software_fallback`: override flags first, then the hardware probe
//! - `locate_decoder` / `load_decoder_blob`: ordered directory search
//! - `FallbackEngine`: synchronous preparation queue

pub mod engine;
pub mod error;
pub mod format;
pub mod job;
pub mod locate;
pub mod selftest;

pub use engine::{FallbackEngine, PassReport};
pub use error::FallbackError;
pub use format::BcFormat;
pub use job::{FallbackJob, JobId, JobStatus};
pub use locate::{load_decoder_blob, locate_decoder};
pub use selftest::{run_selftest, SelftestReport};

use xeno_env::{ForceFlag, HardwareProbe, Settings};

/// Whether `format` must be decoded in software on this machine.
///
/// The disable flag wins over everything; the force flag short-circuits the
/// probe in either direction.
pub fn needs_software_fallback(format: &str, settings: &Settings, probe: &HardwareProbe) -> bool {
    if settings.disable_all_hw_bc {
        tracing::debug!(format, "all hardware BC disabled");
        return true;
    }
    match settings.force_hw_bc {
        ForceFlag::On => false,
        ForceFlag::Off => true,
        ForceFlag::Unset => !probe.hardware_present(),
    }
}
