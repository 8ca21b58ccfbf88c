/*!
# Galaxy 3D Shader - SPIR-V Reflection Backend

SPIR-V implementation of the galaxy_3d_shader `BytecodeReflector` trait.

Bytecode is parsed with spirq; descriptors, push constants and stage IO are
mapped onto the canonical `ReflectionInfo` of the core crate.
*/

mod spirv_reflector;

use std::sync::Arc;
use galaxy_3d_shader::galaxy3d::reflect::ReflectionNormalizer;

pub mod galaxy3d {
    pub use crate::spirv_reflector::SpirvReflector;
}

/// Register the SPIR-V extractor with a normalizer
///
/// # Example
///
/// ```
/// use galaxy_3d_shader::galaxy3d::reflect::ReflectionNormalizer;
/// use galaxy_3d_shader::galaxy3d::ShaderPlatform;
///
/// let mut normalizer = ReflectionNormalizer::new();
/// galaxy_3d_shader_spirv::register(&mut normalizer);
/// assert!(normalizer.supports(ShaderPlatform::Spirv));
/// ```
pub fn register(normalizer: &mut ReflectionNormalizer) {
    normalizer.register(Arc::new(spirv_reflector::SpirvReflector::new()));
}
