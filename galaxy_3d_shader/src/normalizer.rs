/// Reflection dispatch over the registered bytecode extractors

use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::log::Logger;
use crate::reflection::ReflectionInfo;
use crate::stage::{BytecodeFamily, ShaderPlatform, ShaderStage};

/// Extractor turning one bytecode family into a [`ReflectionInfo`]
///
/// Implemented by the backend crates (`galaxy_3d_shader_spirv`,
/// `galaxy_3d_shader_dxbc`). Implementations convert every parser failure
/// into an [`Error`] and never panic on malformed input.
pub trait BytecodeReflector: Send + Sync {
    /// Platforms this extractor understands
    fn platforms(&self) -> &[ShaderPlatform];

    /// Reflect `bytecode` compiled for `stage`
    fn reflect(&self, stage: ShaderStage, bytecode: &[u8], logger: &dyn Logger) -> Result<ReflectionInfo>;
}

/// Checks preconditions and routes bytecode to the extractor of its platform
///
/// A platform with no registered extractor reports
/// [`Error::UnsupportedPlatform`] without looking at the bytes.
///
/// # Example
///
/// ```
/// use galaxy_3d_shader::galaxy3d::reflect::ReflectionNormalizer;
/// use galaxy_3d_shader::galaxy3d::{Error, ShaderPlatform, ShaderStage};
/// use galaxy_3d_shader::galaxy3d::log::NullLogger;
///
/// let normalizer = ReflectionNormalizer::new();
/// let result = normalizer.reflect(&[0u8; 16], ShaderStage::Vertex, ShaderPlatform::Dxil, &NullLogger);
/// assert!(matches!(result, Err(Error::UnsupportedPlatform(_))));
/// ```
#[derive(Default)]
pub struct ReflectionNormalizer {
    reflectors: FxHashMap<ShaderPlatform, Arc<dyn BytecodeReflector>>,
}

impl ReflectionNormalizer {
    /// Normalizer with no extractor registered
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `reflector` for every platform it declares
    ///
    /// A later registration replaces an earlier one for the same platform.
    pub fn register(&mut self, reflector: Arc<dyn BytecodeReflector>) {
        for platform in reflector.platforms() {
            self.reflectors.insert(*platform, reflector.clone());
        }
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_reflector(mut self, reflector: Arc<dyn BytecodeReflector>) -> Self {
        self.register(reflector);
        self
    }

    /// Whether an extractor is registered for `platform`
    pub fn supports(&self, platform: ShaderPlatform) -> bool {
        self.reflectors.contains_key(&platform)
    }

    /// Reflect `bytecode`
    ///
    /// # Errors
    ///
    /// * `Error::InvalidArgument` - empty bytecode, or native bytecode under 4 bytes
    /// * `Error::MisalignedBytecode` - SPIR-V length not a multiple of 4
    /// * `Error::UnsupportedPlatform` - no extractor registered for `platform`
    /// * extractor errors otherwise
    pub fn reflect(
        &self,
        bytecode: &[u8],
        stage: ShaderStage,
        platform: ShaderPlatform,
        logger: &dyn Logger,
    ) -> Result<ReflectionInfo> {
        const SOURCE: &str = "galaxy3d::shader::Reflection";

        if bytecode.is_empty() {
            crate::shader_bail!(logger, SOURCE, InvalidArgument, "{} reflection failed: shader blob is empty", platform);
        }

        match platform.family() {
            BytecodeFamily::Spirv => {
                if bytecode.len() % 4 != 0 {
                    let err = Error::MisalignedBytecode { len: bytecode.len() };
                    crate::shader_error!(logger, SOURCE, "{} reflection failed: {}", platform, err.diagnostic());
                    return Err(err);
                }
            }
            BytecodeFamily::Native => {
                if bytecode.len() < 4 {
                    crate::shader_bail!(
                        logger,
                        SOURCE,
                        InvalidArgument,
                        "{} reflection failed: shader blob is too small ({} bytes)",
                        platform,
                        bytecode.len()
                    );
                }
            }
        }

        let reflector = match self.reflectors.get(&platform) {
            Some(reflector) => reflector,
            None => {
                crate::shader_warn!(logger, SOURCE, "{} reflection is not available on this host", platform);
                return Err(Error::UnsupportedPlatform(format!("{} reflection", platform)));
            }
        };

        reflector.reflect(stage, bytecode, logger)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "normalizer_tests.rs"]
mod tests;
