//! Format capability table

use ash::vk;

/// Block-compressed formats reported as sampleable.
pub const BC_FORMATS: [vk::Format; 8] = [
    vk::Format::BC1_RGB_UNORM_BLOCK,
    vk::Format::BC1_RGBA_UNORM_BLOCK,
    vk::Format::BC2_UNORM_BLOCK,
    vk::Format::BC3_UNORM_BLOCK,
    vk::Format::BC4_UNORM_BLOCK,
    vk::Format::BC5_UNORM_BLOCK,
    vk::Format::BC6H_UFLOAT_BLOCK,
    vk::Format::BC7_UNORM_BLOCK,
];

/// Sampled and linear-filterable, in both tilings. Everything else reports nothing.
pub fn format_properties(format: vk::Format) -> vk::FormatProperties {
    if !BC_FORMATS.contains(&format) {
        return vk::FormatProperties::default();
    }
    let features = vk::FormatFeatureFlags::SAMPLED_IMAGE | vk::FormatFeatureFlags::SAMPLED_IMAGE_FILTER_LINEAR;
    vk::FormatProperties {
        linear_tiling_features: features,
        optimal_tiling_features: features,
        buffer_features: vk::FormatFeatureFlags::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_bc_format_reports_the_same_flags() {
        let expected = format_properties(vk::Format::BC1_RGB_UNORM_BLOCK);
        assert!(!expected.optimal_tiling_features.is_empty());
        assert_eq!(expected.optimal_tiling_features, expected.linear_tiling_features);
        for format in BC_FORMATS {
            let props = format_properties(format);
            assert_eq!(props.optimal_tiling_features, expected.optimal_tiling_features);
            assert_eq!(props.linear_tiling_features, expected.linear_tiling_features);
        }
    }

    #[test]
    fn unknown_formats_report_nothing() {
        for format in [vk::Format::R8G8B8A8_UNORM, vk::Format::BC1_RGB_SRGB_BLOCK, vk::Format::from_raw(999_999)] {
            let props = format_properties(format);
            assert!(props.optimal_tiling_features.is_empty());
            assert!(props.linear_tiling_features.is_empty());
        }
    }
}
