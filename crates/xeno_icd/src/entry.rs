//! C ABI entry points seen by the Vulkan loader and applications
//!
//! Thin wrappers: check pointers, build slices, call the safe implementation,
//! translate errors into `VkResult`.

#![allow(clippy::missing_safety_doc)]

use crate::device::{self, XCLIPSE_940};
use crate::error::to_vk;
use crate::{extensions, features, formats, negotiate};
use ash::vk;
use std::ffi::CStr;
use std::os::raw::c_char;

/// Buffer of `*count` entries, or `None` for a count query.
unsafe fn out_slice<'a, T>(count: *const u32, ptr: *mut T) -> Option<&'a mut [T]> {
    if ptr.is_null() {
        None
    } else {
        Some(std::slice::from_raw_parts_mut(ptr, *count as usize))
    }
}

#[export_name = "vk_icdNegotiateLoaderICDInterfaceVersion"]
pub unsafe extern "system" fn negotiate_loader_icd_interface_version(p_version: *mut u32) -> vk::Result {
    crate::ensure_logging();
    let Some(version) = p_version.as_mut() else {
        return vk::Result::ERROR_INCOMPATIBLE_DRIVER;
    };
    match negotiate::negotiate(*version) {
        Ok(agreed) => {
            *version = agreed;
            tracing::info!(agreed, "vk_icdNegotiateLoaderICDInterfaceVersion");
            vk::Result::SUCCESS
        }
        Err(err) => {
            tracing::warn!(%err, "interface negotiation failed");
            err.into()
        }
    }
}

#[export_name = "vk_icdGetInstanceProcAddr"]
pub unsafe extern "system" fn icd_get_instance_proc_addr(instance: vk::Instance, p_name: *const c_char) -> vk::PFN_vkVoidFunction {
    get_instance_proc_addr(instance, p_name)
}

#[export_name = "vkGetInstanceProcAddr"]
pub unsafe extern "system" fn get_instance_proc_addr(instance: vk::Instance, p_name: *const c_char) -> vk::PFN_vkVoidFunction {
    let icd = crate::global();
    if p_name.is_null() {
        icd.real_driver();
        return None;
    }
    icd.resolve_instance_function(instance, CStr::from_ptr(p_name))
}

#[export_name = "vkGetDeviceProcAddr"]
pub unsafe extern "system" fn get_device_proc_addr(device: vk::Device, p_name: *const c_char) -> vk::PFN_vkVoidFunction {
    let icd = crate::global();
    if p_name.is_null() {
        icd.real_driver();
        return None;
    }
    icd.resolve_device_function(device, CStr::from_ptr(p_name))
}

#[export_name = "vkEnumeratePhysicalDevices"]
pub unsafe extern "system" fn enumerate_physical_devices(
    _instance: vk::Instance,
    p_count: *mut u32,
    p_devices: *mut vk::PhysicalDevice,
) -> vk::Result {
    if p_count.is_null() {
        return vk::Result::ERROR_INITIALIZATION_FAILED;
    }
    let devices = out_slice(p_count, p_devices);
    to_vk(device::enumerate_physical_devices(&mut *p_count, devices))
}

#[export_name = "vkGetPhysicalDeviceProperties"]
pub unsafe extern "system" fn get_physical_device_properties(
    _physical_device: vk::PhysicalDevice,
    p_properties: *mut vk::PhysicalDeviceProperties,
) {
    if let Some(out) = p_properties.as_mut() {
        *out = XCLIPSE_940.properties();
    }
}

#[export_name = "vkGetPhysicalDeviceMemoryProperties"]
pub unsafe extern "system" fn get_physical_device_memory_properties(
    _physical_device: vk::PhysicalDevice,
    p_memory_properties: *mut vk::PhysicalDeviceMemoryProperties,
) {
    if let Some(out) = p_memory_properties.as_mut() {
        *out = XCLIPSE_940.memory_properties();
    }
}

#[export_name = "vkGetPhysicalDeviceQueueFamilyProperties"]
pub unsafe extern "system" fn get_physical_device_queue_family_properties(
    _physical_device: vk::PhysicalDevice,
    p_count: *mut u32,
    p_properties: *mut vk::QueueFamilyProperties,
) {
    if p_count.is_null() {
        return;
    }
    let out = out_slice(p_count, p_properties);
    XCLIPSE_940.queue_family_properties(&mut *p_count, out);
}

#[export_name = "vkGetPhysicalDeviceFormatProperties"]
pub unsafe extern "system" fn get_physical_device_format_properties(
    _physical_device: vk::PhysicalDevice,
    format: vk::Format,
    p_format_properties: *mut vk::FormatProperties,
) {
    if let Some(out) = p_format_properties.as_mut() {
        *out = formats::format_properties(format);
    }
}

#[export_name = "vkGetPhysicalDeviceFeatures2"]
pub unsafe extern "system" fn get_physical_device_features2(
    _physical_device: vk::PhysicalDevice,
    p_features: *mut vk::PhysicalDeviceFeatures2<'_>,
) {
    if let Some(out) = p_features.as_mut() {
        let filled = features::fill_features2(out);
        tracing::debug!(?filled, "vkGetPhysicalDeviceFeatures2");
    }
}

#[export_name = "vkEnumerateDeviceExtensionProperties"]
pub unsafe extern "system" fn enumerate_device_extension_properties(
    _physical_device: vk::PhysicalDevice,
    _p_layer_name: *const c_char,
    p_count: *mut u32,
    p_properties: *mut vk::ExtensionProperties,
) -> vk::Result {
    if p_count.is_null() {
        return vk::Result::ERROR_INITIALIZATION_FAILED;
    }
    let out = out_slice(p_count, p_properties);
    to_vk(extensions::enumerate_device_extensions(&mut *p_count, out))
}

#[export_name = "vkEnumerateInstanceExtensionProperties"]
pub unsafe extern "system" fn enumerate_instance_extension_properties(
    _p_layer_name: *const c_char,
    p_count: *mut u32,
    _p_properties: *mut vk::ExtensionProperties,
) -> vk::Result {
    match p_count.as_mut() {
        Some(count) => to_vk(extensions::enumerate_empty(count)),
        None => vk::Result::ERROR_INITIALIZATION_FAILED,
    }
}

#[export_name = "vkEnumerateInstanceLayerProperties"]
pub unsafe extern "system" fn enumerate_instance_layer_properties(
    p_count: *mut u32,
    _p_properties: *mut vk::LayerProperties,
) -> vk::Result {
    match p_count.as_mut() {
        Some(count) => to_vk(extensions::enumerate_empty(count)),
        None => vk::Result::ERROR_INITIALIZATION_FAILED,
    }
}
