//! Environment-driven settings
//!
//! Everything is read through a key lookup so tests can feed a fixed map
//! instead of mutating the process environment. The force flag can also be
//! set in-process, which wins over the environment in `from_env`.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};

pub const SIDE_LOG_ENV: &str = "XCLIPSE_SIDE_LOG";
pub const TUNE_REPORT_ENV: &str = "XCLIPSE_TUNE_REPORT";
pub const FORCE_HW_BC_ENV: &str = "XCLIPSE_FORCE_HW_BC";
pub const DISABLE_ALL_HW_BC_ENV: &str = "XCLIPSE_DISABLE_ALL_HW_BC";

pub const DEFAULT_SIDE_LOG: &str = "/data/local/tmp/xeno_wrapper.log";
pub const PACKAGE_SIDE_LOG: &str = "/var/log/xeno_wrapper.log";
pub const DEFAULT_TUNE_REPORT: &str = "/data/local/tmp/xeno_tune_report.json";
pub const MANIFEST_PATH: &str = "/etc/exynostools/profiles/vendor/xilinx_xc/manifest.json";

/// Decoder directories, highest priority first.
pub const DECODER_SEARCH_PATHS: [&str; 3] = [
    "/usr/share/exynostools/shaders/pipeline_cache/",
    "/assets/shaders/decode/",
    "/usr/share/xclipse/shaders/",
];

/// Tri-state override for the hardware probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceFlag {
    #[default]
    Unset,
    On,
    Off,
}

impl ForceFlag {
    /// Empty and missing values are unset; unrecognised text counts as on.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some("") => ForceFlag::Unset,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") => ForceFlag::Off,
            Some(_) => ForceFlag::On,
        }
    }

    fn to_bits(self) -> u8 {
        match self {
            ForceFlag::Unset => 0,
            ForceFlag::On => 1,
            ForceFlag::Off => 2,
        }
    }

    fn from_bits(bits: u8) -> Self {
        match bits {
            1 => ForceFlag::On,
            2 => ForceFlag::Off,
            _ => ForceFlag::Unset,
        }
    }
}

static FORCE_OVERRIDE: AtomicU8 = AtomicU8::new(0);

/// Process-wide force flag consulted before `XCLIPSE_FORCE_HW_BC`.
/// `ForceFlag::Unset` hands the decision back to the environment.
pub fn set_force_override(flag: ForceFlag) {
    FORCE_OVERRIDE.store(flag.to_bits(), Ordering::Release);
}

pub fn force_override() -> ForceFlag {
    ForceFlag::from_bits(FORCE_OVERRIDE.load(Ordering::Acquire))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub side_log: PathBuf,
    pub side_log_fallback: PathBuf,
    pub tune_report: PathBuf,
    pub manifest: PathBuf,
    pub decoder_search_paths: Vec<PathBuf>,
    pub force_hw_bc: ForceFlag,
    pub disable_all_hw_bc: bool,
}

impl Settings {
    /// Snapshot of the current process environment plus the in-process
    /// force override.
    pub fn from_env() -> Self {
        let mut settings = Self::from_lookup(|key| std::env::var(key).ok());
        match force_override() {
            ForceFlag::Unset => {}
            flag => settings.force_hw_bc = flag,
        }
        settings
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            side_log: path_or(SIDE_LOG_ENV, DEFAULT_SIDE_LOG),
            side_log_fallback: PathBuf::from(PACKAGE_SIDE_LOG),
            tune_report: path_or(TUNE_REPORT_ENV, DEFAULT_TUNE_REPORT),
            manifest: PathBuf::from(MANIFEST_PATH),
            decoder_search_paths: DECODER_SEARCH_PATHS.iter().map(PathBuf::from).collect(),
            force_hw_bc: ForceFlag::parse(lookup(FORCE_HW_BC_ENV).as_deref()),
            disable_all_hw_bc: lookup(DISABLE_ALL_HW_BC_ENV).is_some_and(|v| !v.is_empty()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let s = Settings::default();
        assert_eq!(s.side_log, PathBuf::from(DEFAULT_SIDE_LOG));
        assert_eq!(s.tune_report, PathBuf::from(DEFAULT_TUNE_REPORT));
        assert_eq!(s.force_hw_bc, ForceFlag::Unset);
        assert!(!s.disable_all_hw_bc);
        assert_eq!(s.decoder_search_paths.len(), 3);
    }

    #[test]
    fn path_overrides() {
        let s = settings(&[(SIDE_LOG_ENV, "/tmp/a.log"), (TUNE_REPORT_ENV, "/tmp/r.json")]);
        assert_eq!(s.side_log, PathBuf::from("/tmp/a.log"));
        assert_eq!(s.tune_report, PathBuf::from("/tmp/r.json"));
    }

    #[test]
    fn force_flag_parsing() {
        assert_eq!(ForceFlag::parse(None), ForceFlag::Unset);
        assert_eq!(ForceFlag::parse(Some("")), ForceFlag::Unset);
        assert_eq!(ForceFlag::parse(Some("1")), ForceFlag::On);
        assert_eq!(ForceFlag::parse(Some("TRUE")), ForceFlag::On);
        assert_eq!(ForceFlag::parse(Some("0")), ForceFlag::Off);
        assert_eq!(ForceFlag::parse(Some("False")), ForceFlag::Off);
        // Unrecognised text keeps the hardware path
        assert_eq!(ForceFlag::parse(Some("maybe")), ForceFlag::On);
    }

    #[test]
    fn force_override_wins_until_cleared() {
        set_force_override(ForceFlag::Off);
        assert_eq!(Settings::from_env().force_hw_bc, ForceFlag::Off);
        set_force_override(ForceFlag::On);
        assert_eq!(Settings::from_env().force_hw_bc, ForceFlag::On);

        set_force_override(ForceFlag::Unset);
        assert_eq!(force_override(), ForceFlag::Unset);
        let from_env = ForceFlag::parse(std::env::var(FORCE_HW_BC_ENV).ok().as_deref());
        assert_eq!(Settings::from_env().force_hw_bc, from_env);
    }

    #[test]
    fn disable_flag_requires_value() {
        assert!(!settings(&[(DISABLE_ALL_HW_BC_ENV, "")]).disable_all_hw_bc);
        assert!(settings(&[(DISABLE_ALL_HW_BC_ENV, "1")]).disable_all_hw_bc);
    }
}
