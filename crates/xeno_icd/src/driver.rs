//! Handle to the real Vulkan driver
//!
//! Opened lazily, once per process, and kept for the process lifetime. A failed
//! open is final: forwarding then resolves nothing instead of retrying.

use crate::IcdError;
use ash::vk;
use libloading::Library;
use std::ffi::CStr;

/// Library the unintercepted calls are forwarded to.
pub const REAL_DRIVER_LIBRARY: &str = "libvulkan.so.1";

pub struct RealDriver {
    _library: Option<Library>,
    get_instance_proc_addr: Option<vk::PFN_vkGetInstanceProcAddr>,
    get_device_proc_addr: Option<vk::PFN_vkGetDeviceProcAddr>,
}

impl RealDriver {
    pub fn open(name: &str) -> Result<Self, IcdError> {
        let library = unsafe { Library::new(name) }.map_err(|err| IcdError::ResourceUnavailable {
            what: name.to_string(),
            reason: err.to_string(),
        })?;

        let get_instance_proc_addr = unsafe {
            library
                .get::<vk::PFN_vkGetInstanceProcAddr>(b"vkGetInstanceProcAddr\0")
                .map(|sym| *sym)
        }
        .map_err(|_| IcdError::NotFound { name: "vkGetInstanceProcAddr".into() })?;
        // Device-level forwarding is optional
        let get_device_proc_addr = unsafe {
            library
                .get::<vk::PFN_vkGetDeviceProcAddr>(b"vkGetDeviceProcAddr\0")
                .map(|sym| *sym)
                .ok()
        };

        Ok(Self {
            _library: Some(library),
            get_instance_proc_addr: Some(get_instance_proc_addr),
            get_device_proc_addr,
        })
    }

    /// The default loader: open the system driver, or stay unavailable.
    pub fn load_default() -> Self {
        match Self::open(REAL_DRIVER_LIBRARY) {
            Ok(driver) => driver,
            Err(err) => {
                tracing::warn!(%err, "cannot open real driver");
                Self::unavailable()
            }
        }
    }

    pub fn unavailable() -> Self {
        Self {
            _library: None,
            get_instance_proc_addr: None,
            get_device_proc_addr: None,
        }
    }

    /// Wrap resolvers that are already in memory.
    pub fn from_resolvers(
        get_instance_proc_addr: Option<vk::PFN_vkGetInstanceProcAddr>,
        get_device_proc_addr: Option<vk::PFN_vkGetDeviceProcAddr>,
    ) -> Self {
        Self {
            _library: None,
            get_instance_proc_addr,
            get_device_proc_addr,
        }
    }

    pub fn is_available(&self) -> bool {
        self.get_instance_proc_addr.is_some()
    }

    /// # Safety
    /// `instance` must be null or a handle the real driver understands.
    pub unsafe fn instance_proc_addr(&self, instance: vk::Instance, name: &CStr) -> vk::PFN_vkVoidFunction {
        self.get_instance_proc_addr.and_then(|f| f(instance, name.as_ptr()))
    }

    /// # Safety
    /// `device` must be a handle the real driver understands.
    pub unsafe fn device_proc_addr(&self, device: vk::Device, name: &CStr) -> vk::PFN_vkVoidFunction {
        self.get_device_proc_addr.and_then(|f| f(device, name.as_ptr()))
    }
}
