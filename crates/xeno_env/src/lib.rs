//! Xeno Environment
//!
//! Process environment snapshot and platform probing:
//! - `Settings`: every environment-driven knob the wrapper honours
//! - `HardwareProbe`: best-effort detection of native BCn support

pub mod probe;
pub mod settings;

pub use probe::HardwareProbe;
pub use settings::{ForceFlag, Settings};

/// Wrapper version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
