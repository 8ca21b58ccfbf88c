/*!
# Galaxy 3D Shader - DXIL / DXBC Reflection Backend

DirectX implementation of the galaxy_3d_shader `BytecodeReflector` trait.

Bytecode is read with a bounds-checked DXBC container reader:

- **DXIL containers** (SM6): `DXIL` program part, `ISG1`/`OSG1` signatures
- **Legacy containers** (SM4/SM5): `SHDR`/`SHEX` program, `ISGN`/`OSGN` signatures
- **Resources**: `RDEF` constant buffer and bound resource tables, or the
  `PSV0` binding table when `RDEF` is absent (all DXC SM6 output)

Linking this crate is what makes DXIL/DXBC reflection available; a
normalizer without it reports `UnsupportedPlatform` for those targets.
*/

mod error;
mod container;
mod rdef;
mod psv;
mod signature;
mod introspection;
mod dxbc_reflector;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;
use galaxy_3d_shader::galaxy3d::reflect::ReflectionNormalizer;

pub mod galaxy3d {
    pub use crate::dxbc_reflector::DxbcReflector;
    pub use crate::error::DxbcError;

    /// Low-level container access
    pub mod container {
        pub use crate::container::{DxbcChunk, DxbcContainer};
        pub use crate::introspection::{ProgramKind, ProgramVersion, ResourceTable, ShaderIntrospection};
        pub use crate::psv::{parse_psv_bindings, PsvResourceBinding, PsvResourceType};
        pub use crate::rdef::{parse_rdef, BoundResourceDesc, ConstantBufferDesc, ResourceDefinitions, ShaderInputType};
        pub use crate::signature::{parse_signature, ComponentMask, SignatureParameter};
    }
}

/// Register the DXIL / DXBC extractor with a normalizer
///
/// # Example
///
/// ```
/// use galaxy_3d_shader::galaxy3d::reflect::ReflectionNormalizer;
/// use galaxy_3d_shader::galaxy3d::ShaderPlatform;
///
/// let mut normalizer = ReflectionNormalizer::new();
/// galaxy_3d_shader_dxbc::register(&mut normalizer);
/// assert!(normalizer.supports(ShaderPlatform::Dxil));
/// assert!(normalizer.supports(ShaderPlatform::Dxbc));
/// ```
pub fn register(normalizer: &mut ReflectionNormalizer) {
    normalizer.register(Arc::new(dxbc_reflector::DxbcReflector::new()));
}
