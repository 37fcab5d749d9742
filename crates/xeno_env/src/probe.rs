// probe.rs
//! Best-effort detection of native BCn texture support.
//! Scans DRM device nodes for a vendor driver binding; assumes hardware is
//! present when nothing stronger is found.

use std::path::{Path, PathBuf};

/// Module-name fragments that identify the vendor driver (case-insensitive).
pub const VENDOR_TOKENS: [&str; 3] = ["xcl", "xclipse", "xeno"];

/// What the probe based its answer on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeEvidence {
    /// A DRM node is bound to a vendor driver module.
    VendorDriver { node: String, module: String },
    /// Only a generic primary node exists.
    PrimaryNode,
    /// No evidence either way.
    Assumed,
}

#[derive(Debug, Clone)]
pub struct HardwareProbe {
    drm_class: PathBuf,
    primary_node: PathBuf,
}

impl HardwareProbe {
    pub fn new(drm_class: impl Into<PathBuf>, primary_node: impl Into<PathBuf>) -> Self {
        Self {
            drm_class: drm_class.into(),
            primary_node: primary_node.into(),
        }
    }

    pub fn evidence(&self) -> ProbeEvidence {
        if let Some((node, module)) = find_vendor_driver(&self.drm_class) {
            return ProbeEvidence::VendorDriver { node, module };
        }
        if self.primary_node.exists() {
            return ProbeEvidence::PrimaryNode;
        }
        ProbeEvidence::Assumed
    }

    /// Every kind of evidence resolves to "present", including none at all.
    pub fn hardware_present(&self) -> bool {
        let evidence = self.evidence();
        tracing::debug!(?evidence, "BC hardware probe");
        true
    }
}

impl Default for HardwareProbe {
    fn default() -> Self {
        Self::new("/sys/class/drm", "/dev/dri/card0")
    }
}

#[cfg_attr(not(any(target_os = "linux", target_os = "android")), allow(dead_code))]
fn matches_vendor(module: &str) -> bool {
    let lower = module.to_ascii_lowercase();
    VENDOR_TOKENS.iter().any(|t| lower.contains(t))
}

/* --------------------- Linux / Android --------------------- */

#[cfg(any(target_os = "linux", target_os = "android"))]
fn find_vendor_driver(drm_class: &Path) -> Option<(String, String)> {
    let entries = std::fs::read_dir(drm_class).ok()?;
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let link = entry.path().join("device/driver/module");
        // The module link resolves to e.g. ../../module/xclipse_gpu
        if let Ok(target) = std::fs::read_link(&link) {
            let module = target.to_string_lossy().into_owned();
            if matches_vendor(&module) {
                return Some((name, module));
            }
        }
    }
    None
}

/* --------------------- Other / Fallbacks --------------------- */

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn find_vendor_driver(_drm_class: &Path) -> Option<(String, String)> {
    None
}
