/// DXIL / DXBC reflection over the container reader

use galaxy_3d_shader::galaxy3d::log::Logger;
use galaxy_3d_shader::galaxy3d::reflect::{
    map_d3d_component, BytecodeReflector, ReflectionBuilder, ReflectionInfo, RegisterComponentType,
    ResourceCategory, ShaderResourceInfo, ShaderStageIoInfo,
};
use galaxy_3d_shader::galaxy3d::{Result, ShaderPlatform, ShaderStage};
use galaxy_3d_shader::{shader_bail, shader_debug, shader_info, shader_warn};
use crate::introspection::{ResourceTable, ShaderIntrospection};
use crate::psv::{PsvResourceBinding, PsvResourceType};
use crate::rdef::{ResourceDefinitions, ShaderInputType};
use crate::signature::SignatureParameter;

const SOURCE: &str = "galaxy3d::shader::Dxil";

/// Bytecode family A extractor
///
/// Accepts SM6 containers (`DXIL` part) and SM4/SM5 containers
/// (`SHDR`/`SHEX`). Every unordered-access kind is reported as a storage
/// buffer; the canonical model has no finer UAV category.
#[derive(Debug, Default, Clone, Copy)]
pub struct DxbcReflector;

impl DxbcReflector {
    pub fn new() -> Self {
        Self
    }

    /// Canonical category of a bound resource
    ///
    /// Constant buffers are handled from the constant buffer table, so they
    /// return `None` here along with every kind the model does not track.
    fn category(input_type: ShaderInputType) -> Option<ResourceCategory> {
        match input_type {
            ShaderInputType::Texture => Some(ResourceCategory::SampledImage),
            ShaderInputType::Sampler => Some(ResourceCategory::SeparateSampler),
            ty if ty.is_uav() => Some(ResourceCategory::StorageBuffer),
            _ => None,
        }
    }

    fn collect_resources(rdef: &ResourceDefinitions, builder: &mut ReflectionBuilder, logger: &dyn Logger) {
        for (index, cbuffer) in rdef.constant_buffers.iter().enumerate() {
            let mut resource = ShaderResourceInfo::new(cbuffer.name.as_str(), index as u32, 0, 0);
            // Linear scan; reflection-sized tables
            if let Some(binding) = rdef
                .bound_resources
                .iter()
                .find(|b| b.input_type == ShaderInputType::ConstantBuffer && b.name == cbuffer.name)
            {
                resource.set = binding.space;
                resource.binding = binding.bind_point;
                resource.array_count = binding.bind_count.max(1);
            } else {
                shader_debug!(logger, SOURCE, "Constant buffer '{}' has no binding", cbuffer.name);
            }
            builder.push_resource(ResourceCategory::UniformBuffer, resource);
        }

        for (index, binding) in rdef.bound_resources.iter().enumerate() {
            if binding.input_type == ShaderInputType::ConstantBuffer {
                continue;
            }
            let category = match Self::category(binding.input_type) {
                Some(category) => category,
                None => {
                    shader_debug!(logger, SOURCE, "Skipping resource '{}' of type {:?}", binding.name, binding.input_type);
                    continue;
                }
            };
            builder.push_resource(
                category,
                ShaderResourceInfo {
                    name: binding.name.clone(),
                    id: index as u32,
                    set: binding.space,
                    binding: binding.bind_point,
                    array_count: binding.bind_count.max(1),
                },
            );
        }
    }

    fn pipeline_category(res_type: PsvResourceType) -> Option<ResourceCategory> {
        match res_type {
            PsvResourceType::Cbv => Some(ResourceCategory::UniformBuffer),
            PsvResourceType::SrvTyped => Some(ResourceCategory::SampledImage),
            PsvResourceType::Sampler => Some(ResourceCategory::SeparateSampler),
            ty if ty.is_uav() => Some(ResourceCategory::StorageBuffer),
            _ => None,
        }
    }

    /// Register ranges from `PSV0`; names are left empty
    fn collect_pipeline_bindings(bindings: &[PsvResourceBinding], builder: &mut ReflectionBuilder, logger: &dyn Logger) {
        for (index, binding) in bindings.iter().enumerate() {
            let category = match Self::pipeline_category(binding.res_type) {
                Some(category) => category,
                None => {
                    shader_debug!(
                        logger,
                        SOURCE,
                        "Skipping {:?} range at space {} register {}",
                        binding.res_type,
                        binding.space,
                        binding.lower_bound
                    );
                    continue;
                }
            };
            builder.push_resource(
                category,
                ShaderResourceInfo {
                    name: String::new(),
                    id: index as u32,
                    set: binding.space,
                    binding: binding.lower_bound,
                    array_count: binding.bind_count().max(1),
                },
            );
        }
    }

    fn stage_io(id: usize, param: &SignatureParameter) -> ShaderStageIoInfo {
        let vec_size = param.mask.component_count().max(1);
        ShaderStageIoInfo {
            name: param.display_name(),
            id: id as u32,
            location: param.register,
            format: map_d3d_component(RegisterComponentType::from_raw(param.component_type), vec_size),
            vec_size,
            columns: 1,
        }
    }
}

impl BytecodeReflector for DxbcReflector {
    fn platforms(&self) -> &[ShaderPlatform] {
        &[ShaderPlatform::Dxil, ShaderPlatform::Dxbc]
    }

    fn reflect(&self, stage: ShaderStage, bytecode: &[u8], logger: &dyn Logger) -> Result<ReflectionInfo> {
        let introspection = match ShaderIntrospection::load(bytecode) {
            Ok(introspection) => introspection,
            Err(e) => shader_bail!(logger, SOURCE, InternalError, "DXIL reflection failed: {}", e),
        };

        shader_info!(logger, SOURCE, "DXIL reflection: {}", stage);
        shader_debug!(
            logger,
            SOURCE,
            "{:?} program, shader model {}.{}",
            introspection.program,
            introspection.version.major,
            introspection.version.minor
        );
        if let Some(program_stage) = introspection.version.stage() {
            if program_stage != stage {
                shader_warn!(
                    logger,
                    SOURCE,
                    "DXIL reflection: bytecode is a {} program, reflecting as {}",
                    program_stage,
                    stage
                );
            }
        }

        let mut builder = ReflectionBuilder::new(stage);

        match &introspection.resources {
            Some(ResourceTable::Rdef(rdef)) => Self::collect_resources(rdef, &mut builder, logger),
            Some(ResourceTable::Pipeline(bindings)) => {
                shader_debug!(logger, SOURCE, "No RDEF chunk, using PSV0 bindings without names");
                Self::collect_pipeline_bindings(bindings, &mut builder, logger)
            }
            None => shader_debug!(logger, SOURCE, "No RDEF or PSV0 chunk, resource lists left empty"),
        }

        for (index, param) in introspection.inputs.iter().enumerate() {
            builder.push_input(Self::stage_io(index, param));
        }
        for (index, param) in introspection.outputs.iter().enumerate() {
            builder.push_output(Self::stage_io(index, param));
        }

        let info = builder.build(logger);
        shader_info!(logger, SOURCE, "DXIL reflection complete: {}", info.summary());
        Ok(info)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "dxbc_reflector_tests.rs"]
mod tests;
