//! Feature queries
//!
//! `vkGetPhysicalDeviceFeatures2` fills a fixed base set, then walks the
//! caller's `pNext` chain and enables every group it recognises.

use ash::vk;

/// Nodes visited before the walk gives up on a (possibly cyclic) chain.
pub const MAX_CHAIN_NODES: usize = 64;

/// Capability groups recognised in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureGroup {
    DescriptorIndexing,
    ShaderFloat16Int8,
    RayTracingPipeline,
    AccelerationStructure,
    MeshShader,
    CooperativeMatrix,
}

impl FeatureGroup {
    pub fn from_structure_type(s_type: vk::StructureType) -> Option<Self> {
        match s_type {
            vk::StructureType::PHYSICAL_DEVICE_DESCRIPTOR_INDEXING_FEATURES => Some(Self::DescriptorIndexing),
            vk::StructureType::PHYSICAL_DEVICE_SHADER_FLOAT16_INT8_FEATURES => Some(Self::ShaderFloat16Int8),
            vk::StructureType::PHYSICAL_DEVICE_RAY_TRACING_PIPELINE_FEATURES_KHR => Some(Self::RayTracingPipeline),
            vk::StructureType::PHYSICAL_DEVICE_ACCELERATION_STRUCTURE_FEATURES_KHR => Some(Self::AccelerationStructure),
            vk::StructureType::PHYSICAL_DEVICE_MESH_SHADER_FEATURES_NV => Some(Self::MeshShader),
            vk::StructureType::PHYSICAL_DEVICE_COOPERATIVE_MATRIX_FEATURES_NV => Some(Self::CooperativeMatrix),
            _ => None,
        }
    }
}

pub fn base_features() -> vk::PhysicalDeviceFeatures {
    vk::PhysicalDeviceFeatures {
        robust_buffer_access: vk::TRUE,
        full_draw_index_uint32: vk::TRUE,
        shader_int64: vk::TRUE,
        geometry_shader: vk::TRUE,
        ..Default::default()
    }
}

/// Fill the base features and every recognised chain node. Returns the groups
/// that were filled, in chain order.
///
/// # Safety
/// `features.p_next` must be null or point to a chain of Vulkan output
/// structures whose `s_type` matches their real layout.
pub unsafe fn fill_features2(features: &mut vk::PhysicalDeviceFeatures2<'_>) -> Vec<FeatureGroup> {
    features.features = base_features();

    let mut filled = Vec::new();
    let mut node = features.p_next as *mut vk::BaseOutStructure<'_>;
    let mut visited = 0;
    while !node.is_null() {
        if visited == MAX_CHAIN_NODES {
            tracing::warn!(visited, "feature chain too long, stopping");
            break;
        }
        visited += 1;

        if let Some(group) = FeatureGroup::from_structure_type((*node).s_type) {
            enable_group(node, group);
            filled.push(group);
        }
        node = (*node).p_next;
    }
    filled
}

unsafe fn enable_group(node: *mut vk::BaseOutStructure<'_>, group: FeatureGroup) {
    match group {
        FeatureGroup::DescriptorIndexing => {
            let f = &mut *node.cast::<vk::PhysicalDeviceDescriptorIndexingFeatures<'_>>();
            f.runtime_descriptor_array = vk::TRUE;
            f.descriptor_binding_variable_descriptor_count = vk::TRUE;
            f.descriptor_binding_partially_bound = vk::TRUE;
            f.descriptor_binding_sampled_image_update_after_bind = vk::TRUE;
        }
        FeatureGroup::ShaderFloat16Int8 => {
            let f = &mut *node.cast::<vk::PhysicalDeviceShaderFloat16Int8Features<'_>>();
            f.shader_float16 = vk::TRUE;
            f.shader_int8 = vk::TRUE;
        }
        FeatureGroup::RayTracingPipeline => {
            let f = &mut *node.cast::<vk::PhysicalDeviceRayTracingPipelineFeaturesKHR<'_>>();
            f.ray_tracing_pipeline = vk::TRUE;
            f.ray_traversal_primitive_culling = vk::TRUE;
        }
        FeatureGroup::AccelerationStructure => {
            let f = &mut *node.cast::<vk::PhysicalDeviceAccelerationStructureFeaturesKHR<'_>>();
            f.acceleration_structure = vk::TRUE;
        }
        FeatureGroup::MeshShader => {
            let f = &mut *node.cast::<vk::PhysicalDeviceMeshShaderFeaturesNV<'_>>();
            f.mesh_shader = vk::TRUE;
            f.task_shader = vk::TRUE;
        }
        FeatureGroup::CooperativeMatrix => {
            let f = &mut *node.cast::<vk::PhysicalDeviceCooperativeMatrixFeaturesNV<'_>>();
            f.cooperative_matrix = vk::TRUE;
        }
    }
}
