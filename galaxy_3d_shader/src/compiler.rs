/// Compiler backend seam and the compile orchestrator

use std::path::{Path, PathBuf};
use std::process::Command;
use crate::arguments::{ArgumentSynthesizer, CompileArguments, CompilerBackendKind};
use crate::descriptor::CompileDescriptor;
use crate::error::{Error, Result};
use crate::log::Logger;
use crate::stage::{BytecodeFamily, SourceLanguage};

/// Native compiler invocation
///
/// Implementations receive fully synthesized arguments and the path the
/// bytecode must be written to, and return the produced bytes.
pub trait CompilerBackend: Send + Sync {
    /// Run the backend
    ///
    /// # Errors
    ///
    /// `Error::CompilationFailed` with the backend diagnostic when the source
    /// is rejected, `Error::InternalError` when the backend cannot be run.
    fn compile(&self, arguments: &CompileArguments, output: &Path) -> Result<Vec<u8>>;
}

/// Runs `dxc` / `glslc` as a child process
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessCompiler;

impl CompilerBackend for ProcessCompiler {
    fn compile(&self, arguments: &CompileArguments, output: &Path) -> Result<Vec<u8>> {
        let backend = arguments.backend();
        let result = Command::new(backend.executable())
            .args(arguments.args())
            .arg(backend.output_flag())
            .arg(output)
            .output()
            .map_err(|e| Error::InternalError(format!("failed to run {}: {}", backend.executable(), e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            let diagnostic = if stderr.is_empty() {
                format!("{} exited with {}", backend, result.status)
            } else {
                stderr
            };
            return Err(Error::CompilationFailed(diagnostic));
        }

        Ok(std::fs::read(output)?)
    }
}

/// Compile orchestrator: validate, synthesize, invoke
pub struct ShaderCompiler {
    backend: Box<dyn CompilerBackend>,
}

impl ShaderCompiler {
    /// Orchestrator running the native executables
    pub fn new() -> Self {
        Self::with_backend(Box::new(ProcessCompiler))
    }

    pub fn with_backend(backend: Box<dyn CompilerBackend>) -> Self {
        Self { backend }
    }

    /// Where the bytecode for `desc` is written
    ///
    /// `<output_dir or source dir>/<source file name with the platform extension>`,
    /// e.g. `Lit.pixel.hlsl` becomes `Lit.pixel.dxil`.
    pub fn output_path(desc: &CompileDescriptor, output_dir: Option<&Path>) -> PathBuf {
        let dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => desc
                .source_path()
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };
        let extension = desc.platform().extension().trim_start_matches('.');
        let file_name = desc.source_path().file_name().map(PathBuf::from).unwrap_or_default();
        dir.join(file_name.with_extension(extension))
    }

    /// Compile `desc`, writing the bytecode under `output_dir` (or next to the source)
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` for an unknown source extension or a GLSL
    /// source targeting DXIL/DXBC; backend errors otherwise.
    pub fn compile(
        &self,
        desc: &CompileDescriptor,
        output_dir: Option<&Path>,
        logger: &dyn Logger,
    ) -> Result<Vec<u8>> {
        let language = match desc.source_language() {
            Some(language) => language,
            None => crate::shader_bail!(
                logger,
                "galaxy3d::shader::Compiler",
                InvalidArgument,
                "Unknown shader language for {}",
                desc.source_path().display()
            ),
        };

        if language == SourceLanguage::Glsl && desc.platform().family() != BytecodeFamily::Spirv {
            crate::shader_bail!(
                logger,
                "galaxy3d::shader::Compiler",
                InvalidArgument,
                "GLSL compilation supports SPIRV output only (requested {})",
                desc.platform()
            );
        }

        let arguments = ArgumentSynthesizer::synthesize(desc, CompilerBackendKind::for_language(language), logger);
        let output = Self::output_path(desc, output_dir);

        let bytes = match self.backend.compile(&arguments, &output) {
            Ok(bytes) => bytes,
            Err(e) => {
                crate::shader_error!(
                    logger,
                    "galaxy3d::shader::Compiler",
                    "Failed to compile {}: {}",
                    desc.source_path().display(),
                    e
                );
                return Err(e);
            }
        };

        if bytes.is_empty() {
            crate::shader_bail!(
                logger,
                "galaxy3d::shader::Compiler",
                CompilationFailed,
                "{} produced no bytecode for {}",
                arguments.backend(),
                desc.source_path().display()
            );
        }

        crate::shader_info!(
            logger,
            "galaxy3d::shader::Compiler",
            "Compiled shader: {}",
            output.display()
        );

        Ok(bytes)
    }
}

impl Default for ShaderCompiler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
