//! Xeno ICD
//!
//! A Vulkan installable client driver that answers capability queries for a
//! synthetic Xclipse 940 and forwards everything else to the system driver.
//!
//! ## Architecture
//!
//! - **Negotiation:** `vk_icdNegotiateLoaderICDInterfaceVersion` agrees on version ≤ 2
//! - **Dispatch:** a fixed allow-list of names is answered locally (`dispatch`),
//!   the rest is forwarded through the real driver opened once per process (`driver`)
//! - **Queries:** device, memory, queue family, format, feature and extension
//!   answers come from constant tables (`device`, `formats`, `features`, `extensions`)
//! - **BCn fallback:** decisions and decoder preparation via `xeno_fallback`

pub mod device;
pub mod dispatch;
pub mod driver;
pub mod entry;
pub mod error;
pub mod exports;
pub mod extensions;
pub mod features;
pub mod formats;
pub mod negotiate;

pub use driver::RealDriver;
pub use error::IcdError;

use ash::vk;
use once_cell::sync::{Lazy, OnceCell};
use parking_lot::Mutex;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::Path;
use xeno_env::{HardwareProbe, Settings};
use xeno_fallback::{FallbackEngine, PassReport};
use xeno_services::{FeatureDump, Manifest, ManifestCheck};

/// Formats whose decoders are prepared at init when hardware BC is missing.
pub const PREWARM_FORMATS: [&str; 2] = ["BC1_UNORM", "BC3_UNORM"];

/// Process state shared by every entry point.
pub struct Icd {
    driver: OnceCell<RealDriver>,
    loader: fn() -> RealDriver,
    probe: HardwareProbe,
    fallback: FallbackEngine,
    /// Paths handed to C callers; kept alive for the process lifetime.
    decoder_paths: Mutex<Vec<CString>>,
}

/// What `initialize` did, step by step.
#[derive(Debug, Clone)]
pub struct InitReport {
    pub manifest: Vec<ManifestCheck>,
    pub hardware_bc: bool,
    pub prewarmed: Vec<PassReport>,
    pub report_written: bool,
}

static LOGGING: Lazy<()> = Lazy::new(|| xeno_services::init_logging(&Settings::from_env()));

static ICD: Lazy<Icd> = Lazy::new(|| {
    ensure_logging();
    Icd::new(&Settings::from_env())
});

/// Route diagnostics to stderr and the side log. Runs once per process, from
/// whichever entry point the host reaches first.
pub fn ensure_logging() {
    Lazy::force(&LOGGING);
}

pub fn global() -> &'static Icd {
    &ICD
}

impl Icd {
    pub fn new(settings: &Settings) -> Self {
        Self::with_loader(settings, RealDriver::load_default)
    }

    /// `loader` runs at most once, on the first resolution request.
    pub fn with_loader(settings: &Settings, loader: fn() -> RealDriver) -> Self {
        Self {
            driver: OnceCell::new(),
            loader,
            probe: HardwareProbe::default(),
            fallback: FallbackEngine::new(settings.decoder_search_paths.clone()),
            decoder_paths: Mutex::new(Vec::new()),
        }
    }

    pub fn with_probe(mut self, probe: HardwareProbe) -> Self {
        self.probe = probe;
        self
    }

    pub fn real_driver(&self) -> &RealDriver {
        self.driver.get_or_init(self.loader)
    }

    pub fn fallback(&self) -> &FallbackEngine {
        &self.fallback
    }

    pub fn probe(&self) -> &HardwareProbe {
        &self.probe
    }

    pub fn resolve_instance_function(&self, instance: vk::Instance, name: &CStr) -> vk::PFN_vkVoidFunction {
        let driver = self.real_driver();
        if let Some(local) = dispatch::intercept(name) {
            return Some(local);
        }
        tracing::trace!(?name, "forwarding instance lookup");
        unsafe { driver.instance_proc_addr(instance, name) }
    }

    pub fn resolve_device_function(&self, device: vk::Device, name: &CStr) -> vk::PFN_vkVoidFunction {
        let driver = self.real_driver();
        unsafe { driver.device_proc_addr(device, name) }
    }

    pub fn needs_software_fallback(&self, format: &str, settings: &Settings) -> bool {
        xeno_fallback::needs_software_fallback(format, settings, &self.probe)
    }

    /// Keep `path` alive in this context and return a C view of it.
    /// Repeated paths share one entry.
    pub fn intern_decoder_path(&self, path: &Path) -> *const c_char {
        let Ok(c_path) = CString::new(path.to_string_lossy().into_owned()) else {
            return std::ptr::null();
        };
        let mut paths = self.decoder_paths.lock();
        if let Some(existing) = paths.iter().find(|p| **p == c_path) {
            return existing.as_ptr();
        }
        let ptr = c_path.as_ptr();
        paths.push(c_path);
        ptr
    }

    /// One-time setup run by `xeno_init`. Every step only logs on failure.
    pub fn initialize(&self, settings: &Settings) -> InitReport {
        xeno_services::crash::install_crash_handlers();
        tracing::info!("xeno_init called - initializing Xclipse 940 wrapper");

        tracing::info!(path = %settings.manifest.display(), "validating manifest alignment");
        let manifest = Manifest::read(&settings.manifest).validate_alignment();

        let hardware_bc = !self.needs_software_fallback(PREWARM_FORMATS[0], settings);
        tracing::info!(hardware_bc, "BC hardware detection result");
        let prewarmed = if hardware_bc {
            Vec::new()
        } else {
            PREWARM_FORMATS.iter().map(|f| self.fallback.ensure_ready(f)).collect()
        };

        let report_written = match FeatureDump::for_device("Xclipse 940").write_to(&settings.tune_report) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(path = %settings.tune_report.display(), %err, "feature dump failed");
                false
            }
        };

        tracing::info!("xeno_init complete");
        InitReport {
            manifest,
            hardware_bc,
            prewarmed,
            report_written,
        }
    }
}
