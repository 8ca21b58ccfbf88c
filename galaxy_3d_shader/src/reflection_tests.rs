use super::*;
use crate::log::NullLogger;

fn io(name: &str, location: u32, format: VertexElementFormat, vec_size: u32) -> ShaderStageIoInfo {
    ShaderStageIoInfo {
        name: name.to_string(),
        id: 0,
        location,
        format,
        vec_size,
        columns: 1,
    }
}

// ============================================================================
// Builder tests
// ============================================================================

#[test]
fn test_empty_builder() {
    let info = ReflectionBuilder::new(ShaderStage::Pixel).build(&NullLogger);

    assert_eq!(info.stage(), ShaderStage::Pixel);
    assert_eq!(info.num_uniform_buffers(), 0);
    assert_eq!(info.num_stage_inputs(), 0);
    assert!(info.vertex_attributes().is_empty());
    assert_eq!(info.vertex_stride(), None);
}

#[test]
fn test_resources_land_in_their_category() {
    let mut builder = ReflectionBuilder::new(ShaderStage::Compute);
    builder.push_resource(ResourceCategory::UniformBuffer, ShaderResourceInfo::new("Globals", 1, 0, 0));
    builder.push_resource(ResourceCategory::StorageBuffer, ShaderResourceInfo::new("Particles", 2, 0, 384));
    builder.push_resource(ResourceCategory::StorageBuffer, ShaderResourceInfo::new("Counters", 3, 0, 385));
    builder.push_resource(ResourceCategory::SeparateSampler, ShaderResourceInfo::new("LinearClamp", 4, 1, 128));
    builder.push_push_constant(ShaderPushConstantInfo { name: "Push".to_string(), size: 64 });

    let info = builder.build(&NullLogger);

    assert_eq!(info.num_uniform_buffers(), 1);
    assert_eq!(info.num_storage_buffers(), 2);
    assert_eq!(info.num_separate_samplers(), 1);
    assert_eq!(info.num_push_constants(), 1);
    assert_eq!(info.num_sampled_images(), 0);
    assert_eq!(info.resources(ResourceCategory::StorageBuffer)[1].name, "Counters");
    assert_eq!(info.push_constants()[0].size, 64);
}

#[test]
fn test_counts_match_slices() {
    let mut builder = ReflectionBuilder::new(ShaderStage::Pixel);
    builder.push_resource(ResourceCategory::SampledImage, ShaderResourceInfo::new("Albedo", 0, 0, 0));
    builder.push_resource(ResourceCategory::StorageImage, ShaderResourceInfo::new("Out", 0, 0, 1));
    builder.push_resource(ResourceCategory::SeparateImage, ShaderResourceInfo::new("Tex", 0, 0, 2));
    builder.push_output(io("color", 0, VertexElementFormat::Float4, 4));

    let info = builder.build(&NullLogger);

    assert_eq!(info.num_sampled_images(), info.sampled_images().len());
    assert_eq!(info.num_storage_images(), info.storage_images().len());
    assert_eq!(info.num_separate_images(), info.separate_images().len());
    assert_eq!(info.num_stage_outputs(), info.stage_outputs().len());
}

#[test]
fn test_resource_default_array_count() {
    assert_eq!(ShaderResourceInfo::new("x", 0, 0, 0).array_count, 1);
}

// ============================================================================
// Sorting and vertex layout
// ============================================================================

#[test]
fn test_stage_io_sorted_by_location() {
    let mut builder = ReflectionBuilder::new(ShaderStage::Pixel);
    builder.push_input(io("c", 2, VertexElementFormat::Float, 1));
    builder.push_input(io("a", 0, VertexElementFormat::Float, 1));
    builder.push_input(io("b", 1, VertexElementFormat::Float, 1));
    builder.push_output(io("y", 3, VertexElementFormat::Float4, 4));
    builder.push_output(io("x", 0, VertexElementFormat::Float4, 4));

    let info = builder.build(&NullLogger);

    let inputs: Vec<&str> = info.stage_inputs().iter().map(|i| i.name.as_str()).collect();
    let outputs: Vec<&str> = info.stage_outputs().iter().map(|o| o.name.as_str()).collect();
    assert_eq!(inputs, vec!["a", "b", "c"]);
    assert_eq!(outputs, vec!["x", "y"]);
}

#[test]
fn test_vertex_layout_only_for_vertex_stage() {
    for stage in ShaderStage::ALL {
        let mut builder = ReflectionBuilder::new(stage);
        builder.push_input(io("uv", 0, VertexElementFormat::Float2, 2));
        let info = builder.build(&NullLogger);

        if stage == ShaderStage::Vertex {
            assert_eq!(info.num_vertex_attributes(), 1);
        } else {
            assert!(info.vertex_attributes().is_empty(), "{}", stage);
        }
    }
}

#[test]
fn test_vertex_layout_follows_sorted_inputs() {
    let mut builder = ReflectionBuilder::new(ShaderStage::Vertex);
    builder.push_input(io("normal", 1, VertexElementFormat::Float3, 3));
    builder.push_input(io("position", 0, VertexElementFormat::Float3, 3));

    let info = builder.build(&NullLogger);
    let attributes = info.vertex_attributes();

    assert_eq!(attributes[0].name, "position");
    assert_eq!(attributes[0].offset, 0);
    assert_eq!(attributes[1].name, "normal");
    assert_eq!(attributes[1].offset, 12);
    assert_eq!(info.vertex_stride(), Some(24));
}

// ============================================================================
// Summary
// ============================================================================

#[test]
fn test_summary_format() {
    let mut builder = ReflectionBuilder::new(ShaderStage::Vertex);
    builder.push_resource(ResourceCategory::UniformBuffer, ShaderResourceInfo::new("Camera", 0, 0, 256));
    builder.push_input(io("position", 0, VertexElementFormat::Float3, 3));
    builder.push_output(io("uv", 0, VertexElementFormat::Float2, 2));
    builder.push_output(io("normal", 1, VertexElementFormat::Float3, 3));

    let info = builder.build(&NullLogger);

    assert_eq!(
        info.summary(),
        "Vertex | UBO=1 Sampled=0 StorageTex=0 StorageBuf=0 Inputs=1 Outputs=2"
    );
}
