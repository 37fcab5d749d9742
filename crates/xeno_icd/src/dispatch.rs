//! Name-based dispatch
//!
//! A fixed allow-list of instance-level names is answered locally; every other
//! name goes to the real driver.

use crate::entry;
use ash::vk;
use std::ffi::CStr;

/// Instance-level names answered by this driver, paired with their entry.
pub fn intercepts() -> [(&'static CStr, *const ()); 5] {
    [
        (c"vkEnumeratePhysicalDevices", entry::enumerate_physical_devices as *const ()),
        (c"vkGetPhysicalDeviceProperties", entry::get_physical_device_properties as *const ()),
        (c"vkGetPhysicalDeviceFeatures2", entry::get_physical_device_features2 as *const ()),
        (
            c"vkEnumerateDeviceExtensionProperties",
            entry::enumerate_device_extension_properties as *const (),
        ),
        (c"vkGetInstanceProcAddr", entry::get_instance_proc_addr as *const ()),
    ]
}

/// Local implementation for an intercepted name.
pub fn intercept(name: &CStr) -> vk::PFN_vkVoidFunction {
    let (_, f) = intercepts().into_iter().find(|(listed, _)| *listed == name)?;
    // The loader casts the pointer back to the PFN type matching the name
    Some(unsafe { std::mem::transmute::<*const (), unsafe extern "system" fn()>(f) })
}
