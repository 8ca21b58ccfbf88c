/// SPIR-V reflection using spirq

use galaxy_3d_shader::galaxy3d::log::Logger;
use galaxy_3d_shader::galaxy3d::reflect::{
    map_spirv_type, BytecodeReflector, ReflectionBuilder, ReflectionInfo, ResourceCategory,
    ScalarKind, ShaderPushConstantInfo, ShaderResourceInfo, ShaderStageIoInfo,
};
use galaxy_3d_shader::galaxy3d::{Error, Result, ShaderPlatform, ShaderStage};
use galaxy_3d_shader::{shader_bail, shader_debug, shader_error, shader_info, shader_warn};

const SOURCE: &str = "galaxy3d::shader::Spirv";
const SPIRV_MAGIC: u32 = 0x0723_0203;

/// Bytecode family B extractor
///
/// Resource ids are the variable's position in spirq's enumeration of the
/// entry point, which is stable for a given module.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpirvReflector;

impl SpirvReflector {
    pub fn new() -> Self {
        Self
    }

    /// Reinterpret `bytecode` as SPIR-V words, honoring the module's endianness
    fn to_words(bytecode: &[u8]) -> Result<Vec<u32>> {
        if bytecode.len() % 4 != 0 {
            return Err(Error::MisalignedBytecode { len: bytecode.len() });
        }
        let mut words: Vec<u32> = bytecode
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        if words.first() == Some(&SPIRV_MAGIC.swap_bytes()) {
            for word in &mut words {
                *word = word.swap_bytes();
            }
        }
        Ok(words)
    }

    /// Canonical category of a descriptor variable
    ///
    /// Any sampled-image-typed variable is a sampled image, including texel
    /// buffers (`samplerBuffer`) that spirq reports as `UniformTexelBuffer`.
    /// `None` for descriptors the canonical model has no category for
    /// (input attachments, acceleration structures).
    fn category(desc_ty: &spirq::ty::DescriptorType, ty: &spirq::ty::Type) -> Option<ResourceCategory> {
        use spirq::ty::{DescriptorType, Type};
        if let Type::CombinedImageSampler(_) = ty {
            return Some(ResourceCategory::SampledImage);
        }
        match desc_ty {
            DescriptorType::UniformBuffer() => Some(ResourceCategory::UniformBuffer),
            DescriptorType::StorageBuffer(..) => Some(ResourceCategory::StorageBuffer),
            DescriptorType::CombinedImageSampler() => Some(ResourceCategory::SampledImage),
            DescriptorType::SampledImage() | DescriptorType::UniformTexelBuffer() => {
                Some(ResourceCategory::SeparateImage)
            }
            DescriptorType::StorageImage(..) | DescriptorType::StorageTexelBuffer(..) => {
                Some(ResourceCategory::StorageImage)
            }
            DescriptorType::Sampler() => Some(ResourceCategory::SeparateSampler),
            _ => None,
        }
    }

    fn scalar_kind(scalar_ty: &spirq::ty::ScalarType) -> ScalarKind {
        use spirq::ty::ScalarType;
        match scalar_ty {
            ScalarType::Float { bits: 32 } => ScalarKind::Float32,
            ScalarType::Integer { bits: 32, is_signed: true } => ScalarKind::Int32,
            ScalarType::Integer { bits: 32, is_signed: false } => ScalarKind::UInt32,
            _ => ScalarKind::Other,
        }
    }

    /// (scalar kind, vector width, column count) of an interface variable type
    fn io_shape(ty: &spirq::ty::Type) -> (ScalarKind, u32, u32) {
        use spirq::ty::Type;
        match ty {
            Type::Scalar(s) => (Self::scalar_kind(s), 1, 1),
            Type::Vector(v) => (Self::scalar_kind(&v.scalar_ty), v.nscalar, 1),
            Type::Matrix(m) => (Self::scalar_kind(&m.vector_ty.scalar_ty), m.vector_ty.nscalar, m.nvector),
            _ => (ScalarKind::Other, 0, 0),
        }
    }

    fn stage_io(
        id: u32,
        name: &Option<String>,
        location: u32,
        ty: &spirq::ty::Type,
        direction: &str,
        logger: &dyn Logger,
    ) -> ShaderStageIoInfo {
        let (kind, vec_size, columns) = Self::io_shape(ty);
        let format = map_spirv_type(kind, vec_size, columns);
        let name = name.clone().unwrap_or_default();

        if format.is_invalid() {
            shader_warn!(
                logger,
                SOURCE,
                "SPIRV reflection: unsupported {} type for '{}' at location {} ({:?} x{} x{})",
                direction,
                name,
                location,
                kind,
                vec_size,
                columns
            );
        }

        ShaderStageIoInfo {
            name,
            id,
            location,
            format,
            vec_size,
            columns,
        }
    }
}

impl BytecodeReflector for SpirvReflector {
    fn platforms(&self) -> &[ShaderPlatform] {
        &[ShaderPlatform::Spirv]
    }

    fn reflect(&self, stage: ShaderStage, bytecode: &[u8], logger: &dyn Logger) -> Result<ReflectionInfo> {
        let words = match Self::to_words(bytecode) {
            Ok(words) => words,
            Err(e) => {
                shader_error!(logger, SOURCE, "SPIRV reflection failed: {}", e.diagnostic());
                return Err(e);
            }
        };

        let entry_points = match spirq::ReflectConfig::new()
            .spv(words.as_slice())
            .ref_all_rscs(true)
            .reflect()
        {
            Ok(entry_points) => entry_points,
            Err(e) => shader_bail!(logger, SOURCE, InternalError, "SPIRV reflection failed: could not parse SPIRV blob: {:?}", e),
        };

        let entry_point = match entry_points.first() {
            Some(entry_point) => entry_point,
            None => shader_bail!(logger, SOURCE, InternalError, "SPIRV reflection failed: module has no entry point"),
        };
        if entry_points.len() > 1 {
            shader_debug!(
                logger,
                SOURCE,
                "SPIRV module has {} entry points, reflecting '{}'",
                entry_points.len(),
                entry_point.name
            );
        }

        let mut builder = ReflectionBuilder::new(stage);

        for (index, var) in entry_point.vars.iter().enumerate() {
            let id = index as u32;
            match var {
                spirq::var::Variable::Descriptor { name, desc_bind, desc_ty, ty, nbind } => {
                    let category = match Self::category(desc_ty, ty) {
                        Some(category) => category,
                        None => {
                            shader_debug!(logger, SOURCE, "Skipping descriptor {:?} of type {:?}", name, desc_ty);
                            continue;
                        }
                    };
                    builder.push_resource(
                        category,
                        ShaderResourceInfo {
                            name: name.clone().unwrap_or_default(),
                            id,
                            set: desc_bind.set(),
                            binding: desc_bind.bind(),
                            array_count: (*nbind).max(1),
                        },
                    );
                }
                spirq::var::Variable::PushConstant { name, ty } => {
                    builder.push_push_constant(ShaderPushConstantInfo {
                        name: name.clone().unwrap_or_default(),
                        size: ty.nbyte().unwrap_or(0) as u32,
                    });
                }
                spirq::var::Variable::Input { name, location, ty } => {
                    builder.push_input(Self::stage_io(id, name, location.loc(), ty, "input", logger));
                }
                spirq::var::Variable::Output { name, location, ty } => {
                    builder.push_output(Self::stage_io(id, name, location.loc(), ty, "output", logger));
                }
                _ => {}
            }
        }

        let info = builder.build(logger);
        shader_info!(logger, SOURCE, "SPIRV reflection complete: {}", info.summary());
        Ok(info)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "spirv_reflector_tests.rs"]
mod tests;
