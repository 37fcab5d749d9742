//! The one synthetic physical device

use crate::IcdError;
use ash::vk::{self, Handle};
use std::os::raw::c_char;

/// Compile-time description of the fabricated device.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticDevice {
    pub name: &'static str,
    pub vendor_id: u32,
    pub device_id: u32,
    pub api_version: u32,
    pub driver_version: u32,
    pub device_type: vk::PhysicalDeviceType,
    pub limits: SyntheticLimits,
    /// (size in bytes, flags)
    pub heaps: &'static [(u64, vk::MemoryHeapFlags)],
    /// (heap index, property flags)
    pub memory_types: &'static [(u32, vk::MemoryPropertyFlags)],
    /// (queue flags, queue count)
    pub queue_families: &'static [(vk::QueueFlags, u32)],
}

#[derive(Debug, Clone, Copy)]
pub struct SyntheticLimits {
    pub max_image_dimension_2d: u32,
    pub max_compute_shared_memory_size: u32,
    pub max_compute_work_group_invocations: u32,
    pub max_color_attachments: u32,
}

const MIB: u64 = 1024 * 1024;

pub const XCLIPSE_940: SyntheticDevice = SyntheticDevice {
    name: "Xclipse 940 (synthetic ICD)",
    vendor_id: 0x1002,
    device_id: 0x0940,
    api_version: vk::make_api_version(0, 1, 4, 0),
    driver_version: vk::make_api_version(0, 1, 0, 0),
    device_type: vk::PhysicalDeviceType::INTEGRATED_GPU,
    limits: SyntheticLimits {
        max_image_dimension_2d: 16384,
        max_compute_shared_memory_size: 131072,
        max_compute_work_group_invocations: 2048,
        max_color_attachments: 8,
    },
    heaps: &[
        (512 * MIB, vk::MemoryHeapFlags::DEVICE_LOCAL),
        (2048 * MIB, vk::MemoryHeapFlags::from_raw(0)),
    ],
    memory_types: &[
        (0, vk::MemoryPropertyFlags::DEVICE_LOCAL),
        (
            1,
            vk::MemoryPropertyFlags::from_raw(
                vk::MemoryPropertyFlags::HOST_VISIBLE.as_raw() | vk::MemoryPropertyFlags::HOST_COHERENT.as_raw(),
            ),
        ),
    ],
    queue_families: &[
        (
            vk::QueueFlags::from_raw(
                vk::QueueFlags::GRAPHICS.as_raw() | vk::QueueFlags::COMPUTE.as_raw() | vk::QueueFlags::TRANSFER.as_raw(),
            ),
            8,
        ),
        (
            vk::QueueFlags::from_raw(vk::QueueFlags::COMPUTE.as_raw() | vk::QueueFlags::TRANSFER.as_raw()),
            4,
        ),
        (vk::QueueFlags::TRANSFER, 2),
    ],
};

/// Handle value handed out for the synthetic device.
pub const SYNTHETIC_PHYSICAL_DEVICE: u64 = 0xC0FFEE;

pub fn synthetic_handle() -> vk::PhysicalDevice {
    vk::PhysicalDevice::from_raw(SYNTHETIC_PHYSICAL_DEVICE)
}

/// Copy `src` into a fixed C string field, truncating and NUL-terminating.
pub fn write_c_str(dst: &mut [c_char], src: &str) {
    let Some(room) = dst.len().checked_sub(1) else {
        return;
    };
    let bytes = &src.as_bytes()[..src.len().min(room)];
    for (d, b) in dst.iter_mut().zip(bytes) {
        *d = *b as c_char;
    }
    dst[bytes.len()] = 0;
}

/// Two-call enumeration of the single device. `devices` is `None` for the
/// count query; a zero-capacity buffer is `Incomplete` and nothing is written.
pub fn enumerate_physical_devices(count: &mut u32, devices: Option<&mut [vk::PhysicalDevice]>) -> Result<(), IcdError> {
    match devices {
        None => {
            *count = 1;
            Ok(())
        }
        Some([]) => Err(IcdError::Incomplete { capacity: 0, available: 1 }),
        Some([first, ..]) => {
            *first = synthetic_handle();
            *count = 1;
            Ok(())
        }
    }
}

impl SyntheticDevice {
    pub fn properties(&self) -> vk::PhysicalDeviceProperties {
        let mut props = vk::PhysicalDeviceProperties {
            api_version: self.api_version,
            driver_version: self.driver_version,
            vendor_id: self.vendor_id,
            device_id: self.device_id,
            device_type: self.device_type,
            ..Default::default()
        };
        write_c_str(&mut props.device_name, self.name);
        props.limits.max_image_dimension2_d = self.limits.max_image_dimension_2d;
        props.limits.max_compute_shared_memory_size = self.limits.max_compute_shared_memory_size;
        props.limits.max_compute_work_group_invocations = self.limits.max_compute_work_group_invocations;
        props.limits.max_color_attachments = self.limits.max_color_attachments;
        props
    }

    pub fn memory_properties(&self) -> vk::PhysicalDeviceMemoryProperties {
        let mut mem = vk::PhysicalDeviceMemoryProperties {
            memory_heap_count: self.heaps.len() as u32,
            memory_type_count: self.memory_types.len() as u32,
            ..Default::default()
        };
        for (slot, &(size, flags)) in mem.memory_heaps.iter_mut().zip(self.heaps) {
            *slot = vk::MemoryHeap { size, flags };
        }
        for (slot, &(heap_index, property_flags)) in mem.memory_types.iter_mut().zip(self.memory_types) {
            *slot = vk::MemoryType { property_flags, heap_index };
        }
        mem
    }

    pub fn queue_family_count(&self) -> u32 {
        self.queue_families.len() as u32
    }

    /// Fills up to the buffer's capacity; `count` always ends up as the full
    /// family count so callers can tell they got a short copy.
    pub fn queue_family_properties(&self, count: &mut u32, out: Option<&mut [vk::QueueFamilyProperties]>) {
        if let Some(out) = out {
            for (slot, &(queue_flags, queue_count)) in out.iter_mut().zip(self.queue_families) {
                *slot = vk::QueueFamilyProperties {
                    queue_flags,
                    queue_count,
                    ..Default::default()
                };
            }
        }
        *count = self.queue_family_count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn enumeration_two_call_pattern() {
        let mut count = 0;
        assert_eq!(enumerate_physical_devices(&mut count, None), Ok(()));
        assert_eq!(count, 1);

        let mut none: [vk::PhysicalDevice; 0] = [];
        let mut count = 0;
        assert!(matches!(
            enumerate_physical_devices(&mut count, Some(&mut none)),
            Err(IcdError::Incomplete { .. })
        ));
        assert_eq!(count, 0);

        let mut devices = [vk::PhysicalDevice::null(); 4];
        let mut count = 4;
        assert_eq!(enumerate_physical_devices(&mut count, Some(&mut devices)), Ok(()));
        assert_eq!(count, 1);
        assert_eq!(devices[0].as_raw(), SYNTHETIC_PHYSICAL_DEVICE);
        assert_eq!(devices[1], vk::PhysicalDevice::null());
    }

    #[test]
    fn properties_carry_identity_and_limits() {
        let props = XCLIPSE_940.properties();
        assert_eq!(props.vendor_id, 0x1002);
        assert_eq!(props.device_id, 0x0940);
        assert_eq!(props.api_version, vk::make_api_version(0, 1, 4, 0));
        assert_eq!(props.limits.max_image_dimension2_d, 16384);
        assert_eq!(props.limits.max_color_attachments, 8);
        let name = unsafe { CStr::from_ptr(props.device_name.as_ptr()) };
        assert_eq!(name.to_str().unwrap(), "Xclipse 940 (synthetic ICD)");
    }

    #[test]
    fn memory_layout() {
        let mem = XCLIPSE_940.memory_properties();
        assert_eq!(mem.memory_heap_count, 2);
        assert_eq!(mem.memory_heaps[0].size, 512 * MIB);
        assert!(mem.memory_heaps[0].flags.contains(vk::MemoryHeapFlags::DEVICE_LOCAL));
        assert_eq!(mem.memory_heaps[1].size, 2048 * MIB);
        assert_eq!(mem.memory_type_count, 2);
        assert_eq!(mem.memory_types[1].heap_index, 1);
        assert!(mem.memory_types[1]
            .property_flags
            .contains(vk::MemoryPropertyFlags::HOST_VISIBLE | vk::MemoryPropertyFlags::HOST_COHERENT));
    }

    #[test]
    fn queue_families_short_buffer_still_reports_three() {
        let mut count = 0;
        XCLIPSE_940.queue_family_properties(&mut count, None);
        assert_eq!(count, 3);

        let mut props = [vk::QueueFamilyProperties::default(); 2];
        let mut count = 2;
        XCLIPSE_940.queue_family_properties(&mut count, Some(&mut props));
        assert_eq!(count, 3);
        assert_eq!(
            props[0].queue_flags,
            vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE | vk::QueueFlags::TRANSFER
        );
        assert_eq!(props[0].queue_count, 8);
        assert_eq!(props[1].queue_flags, vk::QueueFlags::COMPUTE | vk::QueueFlags::TRANSFER);
        assert_eq!(props[1].queue_count, 4);
    }

    #[test]
    fn c_string_is_truncated_and_terminated() {
        let mut buf = [1 as c_char; 4];
        write_c_str(&mut buf, "abcdef");
        assert_eq!(buf, [b'a' as c_char, b'b' as c_char, b'c' as c_char, 0]);
    }
}
