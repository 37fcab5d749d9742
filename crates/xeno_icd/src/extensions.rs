//! Extension and layer enumeration

use crate::device::write_c_str;
use crate::IcdError;
use ash::vk;

/// Device extensions advertised for the synthetic device, all at spec version 1.
pub const DEVICE_EXTENSIONS: [&str; 20] = [
    "VK_KHR_acceleration_structure",
    "VK_KHR_ray_tracing_pipeline",
    "VK_KHR_deferred_host_operations",
    "VK_KHR_buffer_device_address",
    "VK_EXT_descriptor_indexing",
    "VK_KHR_timeline_semaphore",
    "VK_KHR_dynamic_rendering",
    "VK_EXT_mesh_shader",
    "VK_KHR_maintenance5",
    "VK_KHR_shader_float16_int8",
    "VK_KHR_shader_subgroup_extended_types",
    "VK_EXT_shader_demote_to_helper_invocation",
    "VK_KHR_pipeline_library",
    "VK_KHR_pipeline_executable_properties",
    "VK_EXT_vertex_input_dynamic_state",
    "VK_EXT_extended_dynamic_state3",
    "VK_EXT_shader_object",
    "VK_EXT_shader_atomic_float",
    "VK_KHR_synchronization2",
    "VK_EXT_memory_budget",
];

fn extension(name: &str) -> vk::ExtensionProperties {
    let mut props = vk::ExtensionProperties {
        spec_version: 1,
        ..Default::default()
    };
    write_c_str(&mut props.extension_name, name);
    props
}

/// Count query when `out` is `None`; otherwise copy as many as fit, set
/// `count` to the number copied and report `Incomplete` on a short buffer.
pub fn enumerate_device_extensions(count: &mut u32, out: Option<&mut [vk::ExtensionProperties]>) -> Result<(), IcdError> {
    let available = DEVICE_EXTENSIONS.len() as u32;
    let Some(out) = out else {
        *count = available;
        return Ok(());
    };

    let copied = out.len().min(DEVICE_EXTENSIONS.len());
    for (slot, name) in out.iter_mut().zip(DEVICE_EXTENSIONS) {
        *slot = extension(name);
    }
    *count = copied as u32;
    if (copied as u32) < available {
        return Err(IcdError::Incomplete { capacity: copied as u32, available });
    }
    Ok(())
}

/// Instance extensions and layers: there are none.
pub fn enumerate_empty(count: &mut u32) -> Result<(), IcdError> {
    *count = 0;
    Ok(())
}
