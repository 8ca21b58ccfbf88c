/// Canonical, backend-independent reflection model
///
/// Every extractor fills a [`ReflectionBuilder`] and freezes it into a
/// [`ReflectionInfo`]. Freezing sorts stage IO by location and derives the
/// vertex layout, so both bytecode families produce the same shape.

use crate::format::VertexElementFormat;
use crate::log::Logger;
use crate::stage::ShaderStage;
use crate::vertex_layout::VertexLayoutBuilder;

/// Bound resource (buffer, image or sampler)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderResourceInfo {
    /// Declared name (empty when the backend could not resolve it)
    pub name: String,
    /// Backend-specific numeric id
    pub id: u32,
    /// Descriptor set (SPIR-V) or register space (D3D)
    pub set: u32,
    /// Binding slot (SPIR-V) or register index (D3D)
    pub binding: u32,
    /// Array element count, 1 for non-arrays
    pub array_count: u32,
}

impl ShaderResourceInfo {
    /// Non-array resource at (set, binding)
    pub fn new(name: impl Into<String>, id: u32, set: u32, binding: u32) -> Self {
        Self {
            name: name.into(),
            id,
            set,
            binding,
            array_count: 1,
        }
    }
}

/// Stage input or output variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderStageIoInfo {
    pub name: String,
    pub id: u32,
    /// Location (SPIR-V) or signature register (D3D)
    pub location: u32,
    pub format: VertexElementFormat,
    /// Vector width (1 for scalars)
    pub vec_size: u32,
    /// Matrix column count (1 for scalars and vectors)
    pub columns: u32,
}

/// Push constant block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPushConstantInfo {
    pub name: String,
    /// Declared size of the block in bytes
    pub size: u32,
}

/// Vertex attribute in the single interleaved vertex buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: String,
    pub format: VertexElementFormat,
    /// Vertex buffer index (always 0)
    pub buffer_index: u32,
    /// Offset in bytes from the start of the vertex
    pub offset: u32,
    /// Stride in bytes between consecutive vertices, shared by all attributes
    pub stride: u32,
}

/// Resource categories of [`ReflectionInfo`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceCategory {
    UniformBuffer,
    SampledImage,
    StorageImage,
    StorageBuffer,
    SeparateSampler,
    SeparateImage,
}

/// Reflection result of one compiled shader
///
/// Write-once: produced by [`ReflectionBuilder::build`] and read-only afterwards.
/// Counters are always the length of the matching slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionInfo {
    stage: ShaderStage,
    uniform_buffers: Vec<ShaderResourceInfo>,
    sampled_images: Vec<ShaderResourceInfo>,
    storage_images: Vec<ShaderResourceInfo>,
    storage_buffers: Vec<ShaderResourceInfo>,
    separate_samplers: Vec<ShaderResourceInfo>,
    separate_images: Vec<ShaderResourceInfo>,
    push_constants: Vec<ShaderPushConstantInfo>,
    stage_inputs: Vec<ShaderStageIoInfo>,
    stage_outputs: Vec<ShaderStageIoInfo>,
    vertex_attributes: Vec<VertexAttribute>,
}

impl ReflectionInfo {
    pub fn stage(&self) -> ShaderStage { self.stage }

    pub fn uniform_buffers(&self) -> &[ShaderResourceInfo] { &self.uniform_buffers }
    pub fn sampled_images(&self) -> &[ShaderResourceInfo] { &self.sampled_images }
    pub fn storage_images(&self) -> &[ShaderResourceInfo] { &self.storage_images }
    pub fn storage_buffers(&self) -> &[ShaderResourceInfo] { &self.storage_buffers }
    pub fn separate_samplers(&self) -> &[ShaderResourceInfo] { &self.separate_samplers }
    pub fn separate_images(&self) -> &[ShaderResourceInfo] { &self.separate_images }
    pub fn push_constants(&self) -> &[ShaderPushConstantInfo] { &self.push_constants }
    pub fn stage_inputs(&self) -> &[ShaderStageIoInfo] { &self.stage_inputs }
    pub fn stage_outputs(&self) -> &[ShaderStageIoInfo] { &self.stage_outputs }
    /// Derived vertex layout (empty unless the stage is `Vertex`)
    pub fn vertex_attributes(&self) -> &[VertexAttribute] { &self.vertex_attributes }

    /// Resources of one category
    pub fn resources(&self, category: ResourceCategory) -> &[ShaderResourceInfo] {
        match category {
            ResourceCategory::UniformBuffer => &self.uniform_buffers,
            ResourceCategory::SampledImage => &self.sampled_images,
            ResourceCategory::StorageImage => &self.storage_images,
            ResourceCategory::StorageBuffer => &self.storage_buffers,
            ResourceCategory::SeparateSampler => &self.separate_samplers,
            ResourceCategory::SeparateImage => &self.separate_images,
        }
    }

    pub fn num_uniform_buffers(&self) -> usize { self.uniform_buffers.len() }
    pub fn num_sampled_images(&self) -> usize { self.sampled_images.len() }
    pub fn num_storage_images(&self) -> usize { self.storage_images.len() }
    pub fn num_storage_buffers(&self) -> usize { self.storage_buffers.len() }
    pub fn num_separate_samplers(&self) -> usize { self.separate_samplers.len() }
    pub fn num_separate_images(&self) -> usize { self.separate_images.len() }
    pub fn num_push_constants(&self) -> usize { self.push_constants.len() }
    pub fn num_stage_inputs(&self) -> usize { self.stage_inputs.len() }
    pub fn num_stage_outputs(&self) -> usize { self.stage_outputs.len() }
    pub fn num_vertex_attributes(&self) -> usize { self.vertex_attributes.len() }

    /// Shared vertex stride, `None` when no attribute was derived
    pub fn vertex_stride(&self) -> Option<u32> {
        self.vertex_attributes.first().map(|a| a.stride)
    }

    /// One-line summary logged when reflection completes
    ///
    /// `Vertex | UBO=1 Sampled=2 StorageTex=0 StorageBuf=0 Inputs=3 Outputs=2`
    pub fn summary(&self) -> String {
        format!(
            "{} | UBO={} Sampled={} StorageTex={} StorageBuf={} Inputs={} Outputs={}",
            self.stage,
            self.num_uniform_buffers(),
            self.num_sampled_images(),
            self.num_storage_images(),
            self.num_storage_buffers(),
            self.num_stage_inputs(),
            self.num_stage_outputs(),
        )
    }
}

/// Accumulates extractor output before it is frozen into a [`ReflectionInfo`]
///
/// Intended for bytecode extractor crates; callers only ever see the
/// finished `ReflectionInfo`.
#[derive(Debug, Clone)]
pub struct ReflectionBuilder {
    info: ReflectionInfo,
}

impl ReflectionBuilder {
    pub fn new(stage: ShaderStage) -> Self {
        Self {
            info: ReflectionInfo {
                stage,
                uniform_buffers: Vec::new(),
                sampled_images: Vec::new(),
                storage_images: Vec::new(),
                storage_buffers: Vec::new(),
                separate_samplers: Vec::new(),
                separate_images: Vec::new(),
                push_constants: Vec::new(),
                stage_inputs: Vec::new(),
                stage_outputs: Vec::new(),
                vertex_attributes: Vec::new(),
            },
        }
    }

    pub fn stage(&self) -> ShaderStage {
        self.info.stage
    }

    /// Append a resource to `category`, keeping extractor order
    pub fn push_resource(&mut self, category: ResourceCategory, resource: ShaderResourceInfo) {
        let list = match category {
            ResourceCategory::UniformBuffer => &mut self.info.uniform_buffers,
            ResourceCategory::SampledImage => &mut self.info.sampled_images,
            ResourceCategory::StorageImage => &mut self.info.storage_images,
            ResourceCategory::StorageBuffer => &mut self.info.storage_buffers,
            ResourceCategory::SeparateSampler => &mut self.info.separate_samplers,
            ResourceCategory::SeparateImage => &mut self.info.separate_images,
        };
        list.push(resource);
    }

    pub fn push_push_constant(&mut self, push_constant: ShaderPushConstantInfo) {
        self.info.push_constants.push(push_constant);
    }

    pub fn push_input(&mut self, input: ShaderStageIoInfo) {
        self.info.stage_inputs.push(input);
    }

    pub fn push_output(&mut self, output: ShaderStageIoInfo) {
        self.info.stage_outputs.push(output);
    }

    /// Freeze the reflection
    ///
    /// Sorts stage inputs and outputs by location (stable, so equal keys keep
    /// extractor order) and, for the vertex stage, derives the vertex layout
    /// from the sorted inputs.
    pub fn build(mut self, logger: &dyn Logger) -> ReflectionInfo {
        self.info.stage_inputs.sort_by_key(|io| io.location);
        self.info.stage_outputs.sort_by_key(|io| io.location);

        if self.info.stage == ShaderStage::Vertex {
            self.info.vertex_attributes = VertexLayoutBuilder::build(&self.info.stage_inputs, logger);
        }

        self.info
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "reflection_tests.rs"]
mod tests;
