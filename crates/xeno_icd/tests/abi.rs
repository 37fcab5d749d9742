//! Drives the exported C ABI the way the loader and an application would.

use ash::vk::{self, Handle};
use std::ffi::CStr;
use xeno_icd::entry;
use xeno_icd::exports;

unsafe fn resolve(name: &CStr) -> unsafe extern "system" fn() {
    entry::icd_get_instance_proc_addr(vk::Instance::null(), name.as_ptr()).expect("intercepted name must resolve")
}

#[test]
fn negotiation_through_pointer() {
    unsafe {
        for (proposed, agreed) in [(1, 1), (2, 2), (5, 2)] {
            let mut version = proposed;
            assert_eq!(entry::negotiate_loader_icd_interface_version(&mut version), vk::Result::SUCCESS);
            assert_eq!(version, agreed);
        }

        let mut version = 0;
        assert_eq!(
            entry::negotiate_loader_icd_interface_version(&mut version),
            vk::Result::ERROR_INCOMPATIBLE_DRIVER
        );
        assert_eq!(version, 0);
        assert_eq!(
            entry::negotiate_loader_icd_interface_version(std::ptr::null_mut()),
            vk::Result::ERROR_INCOMPATIBLE_DRIVER
        );
    }
}

#[test]
fn physical_device_enumeration() {
    unsafe {
        let enumerate: vk::PFN_vkEnumeratePhysicalDevices = std::mem::transmute(resolve(c"vkEnumeratePhysicalDevices"));

        let mut count = 0;
        assert_eq!(enumerate(vk::Instance::null(), &mut count, std::ptr::null_mut()), vk::Result::SUCCESS);
        assert_eq!(count, 1);

        let mut devices = [vk::PhysicalDevice::null(); 2];
        let mut zero = 0;
        assert_eq!(enumerate(vk::Instance::null(), &mut zero, devices.as_mut_ptr()), vk::Result::INCOMPLETE);
        assert_eq!(devices[0], vk::PhysicalDevice::null());

        let mut count = 2;
        assert_eq!(enumerate(vk::Instance::null(), &mut count, devices.as_mut_ptr()), vk::Result::SUCCESS);
        assert_eq!(count, 1);
        assert_eq!(devices[0].as_raw(), xeno_icd::device::SYNTHETIC_PHYSICAL_DEVICE);

        assert_eq!(
            enumerate(vk::Instance::null(), std::ptr::null_mut(), std::ptr::null_mut()),
            vk::Result::ERROR_INITIALIZATION_FAILED
        );
    }
}

#[test]
fn queue_family_two_call() {
    let device = xeno_icd::device::synthetic_handle();
    unsafe {
        let mut count = 0;
        entry::get_physical_device_queue_family_properties(device, &mut count, std::ptr::null_mut());
        assert_eq!(count, 3);

        let mut props = [vk::QueueFamilyProperties::default(); 3];
        let mut count = 2;
        entry::get_physical_device_queue_family_properties(device, &mut count, props.as_mut_ptr());
        assert_eq!(count, 3);
        assert_eq!(props[0].queue_count, 8);
        assert!(props[0]
            .queue_flags
            .contains(vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE | vk::QueueFlags::TRANSFER));
        assert_eq!(props[1].queue_count, 4);
        // Only two entries were requested
        assert_eq!(props[2].queue_count, 0);
    }
}

#[test]
fn device_properties_and_formats() {
    let device = xeno_icd::device::synthetic_handle();
    unsafe {
        let get_properties: vk::PFN_vkGetPhysicalDeviceProperties =
            std::mem::transmute(resolve(c"vkGetPhysicalDeviceProperties"));
        let mut props = vk::PhysicalDeviceProperties::default();
        get_properties(device, &mut props);
        assert_eq!(props.vendor_id, 0x1002);
        assert_eq!(props.limits.max_compute_work_group_invocations, 2048);

        let mut mem = vk::PhysicalDeviceMemoryProperties::default();
        entry::get_physical_device_memory_properties(device, &mut mem);
        assert_eq!(mem.memory_heap_count, 2);

        let mut bc7 = vk::FormatProperties::default();
        entry::get_physical_device_format_properties(device, vk::Format::BC7_UNORM_BLOCK, &mut bc7);
        assert!(bc7.optimal_tiling_features.contains(vk::FormatFeatureFlags::SAMPLED_IMAGE));

        let mut other = vk::FormatProperties {
            optimal_tiling_features: vk::FormatFeatureFlags::SAMPLED_IMAGE,
            ..Default::default()
        };
        entry::get_physical_device_format_properties(device, vk::Format::D32_SFLOAT, &mut other);
        assert!(other.optimal_tiling_features.is_empty());
    }
}

#[test]
fn features2_through_resolved_pointer() {
    unsafe {
        let get_features: vk::PFN_vkGetPhysicalDeviceFeatures2 = std::mem::transmute(resolve(c"vkGetPhysicalDeviceFeatures2"));
        let mut mesh = vk::PhysicalDeviceMeshShaderFeaturesNV::default();
        let mut features = vk::PhysicalDeviceFeatures2 {
            p_next: (&mut mesh as *mut vk::PhysicalDeviceMeshShaderFeaturesNV).cast(),
            ..Default::default()
        };
        get_features(xeno_icd::device::synthetic_handle(), &mut features);
        assert_eq!(features.features.robust_buffer_access, vk::TRUE);
        assert_eq!(mesh.mesh_shader, vk::TRUE);
    }
}

#[test]
fn extension_and_layer_enumeration() {
    let device = xeno_icd::device::synthetic_handle();
    unsafe {
        let enumerate: vk::PFN_vkEnumerateDeviceExtensionProperties =
            std::mem::transmute(resolve(c"vkEnumerateDeviceExtensionProperties"));

        let mut count = 0;
        assert_eq!(enumerate(device, std::ptr::null(), &mut count, std::ptr::null_mut()), vk::Result::SUCCESS);
        assert_eq!(count, 20);

        let mut props = vec![vk::ExtensionProperties::default(); 3];
        let mut count = 3;
        assert_eq!(enumerate(device, std::ptr::null(), &mut count, props.as_mut_ptr()), vk::Result::INCOMPLETE);
        assert_eq!(count, 3);

        let mut count = 7;
        assert_eq!(
            entry::enumerate_instance_extension_properties(std::ptr::null(), &mut count, std::ptr::null_mut()),
            vk::Result::SUCCESS
        );
        assert_eq!(count, 0);
        let mut count = 7;
        assert_eq!(entry::enumerate_instance_layer_properties(&mut count, std::ptr::null_mut()), vk::Result::SUCCESS);
        assert_eq!(count, 0);
        assert_eq!(
            entry::enumerate_instance_layer_properties(std::ptr::null_mut(), std::ptr::null_mut()),
            vk::Result::ERROR_INITIALIZATION_FAILED
        );
    }
}

#[test]
fn null_names_resolve_nothing() {
    unsafe {
        assert!(entry::get_instance_proc_addr(vk::Instance::null(), std::ptr::null()).is_none());
        assert!(entry::get_device_proc_addr(vk::Device::null(), std::ptr::null()).is_none());
    }
}

#[test]
fn force_flag_controls_hardware_answer() {
    unsafe {
        exports::xeno_set_force_hw_bc(1);
        assert_eq!(exports::xeno_hw_supports_bc_format(c"BC1_UNORM".as_ptr()), 1);
        assert!(exports::prepare_decoder_for_format(c"BC1_UNORM".as_ptr()).is_null());

        exports::xeno_set_force_hw_bc(0);
        assert_eq!(exports::xeno_hw_supports_bc_format(c"BC1_UNORM".as_ptr()), 0);

        // Queue bookkeeping works whatever the machine has installed
        let before = xeno_icd::global().fallback().len();
        assert_eq!(exports::ensure_fallback_decoder_ready(c"BC1_UNORM".as_ptr()), 0);
        assert_eq!(xeno_icd::global().fallback().len(), before + 1);
    }
    xeno_env::settings::set_force_override(xeno_env::ForceFlag::Unset);
}
