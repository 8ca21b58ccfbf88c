/// Argument synthesis for the native compiler backends
///
/// Turns one [`CompileDescriptor`] into the command line of DXC (HLSL) or
/// glslc (GLSL). Synthesis is a pure transform and cannot fail; a bad
/// argument surfaces as a backend compilation failure.

use std::fmt;
use crate::descriptor::{CompileDescriptor, RegisterKind, RegisterShifts};
use crate::log::Logger;
use crate::stage::{BytecodeFamily, ShaderStage, SourceLanguage};

// ===== BACKEND KIND =====

/// Native compiler a set of arguments is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilerBackendKind {
    /// DirectX Shader Compiler (HLSL to DXIL or SPIR-V)
    Dxc,
    /// Khronos glslc (GLSL to SPIR-V)
    Glslc,
}

impl CompilerBackendKind {
    /// Backend handling a source language
    pub fn for_language(language: SourceLanguage) -> Self {
        match language {
            SourceLanguage::Hlsl => CompilerBackendKind::Dxc,
            SourceLanguage::Glsl => CompilerBackendKind::Glslc,
        }
    }

    /// Executable name looked up on `PATH`
    pub fn executable(&self) -> &'static str {
        match (self, cfg!(windows)) {
            (CompilerBackendKind::Dxc, false) => "dxc",
            (CompilerBackendKind::Dxc, true) => "dxc.exe",
            (CompilerBackendKind::Glslc, false) => "glslc",
            (CompilerBackendKind::Glslc, true) => "glslc.exe",
        }
    }

    /// Flag preceding the output file path
    pub fn output_flag(&self) -> &'static str {
        match self {
            CompilerBackendKind::Dxc => "-Fo",
            CompilerBackendKind::Glslc => "-o",
        }
    }
}

impl fmt::Display for CompilerBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompilerBackendKind::Dxc => "DXC",
            CompilerBackendKind::Glslc => "glslc",
        })
    }
}

// ===== ARGUMENTS =====

/// Ordered argument list for one backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileArguments {
    backend: CompilerBackendKind,
    args: Vec<String>,
}

impl CompileArguments {
    pub fn backend(&self) -> CompilerBackendKind {
        self.backend
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Executable followed by every argument, space separated
    pub fn command_line(&self) -> String {
        let mut line = self.backend.executable().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

// ===== SYNTHESIZER =====

/// Stateless descriptor to argument-list transform
pub struct ArgumentSynthesizer;

impl ArgumentSynthesizer {
    /// Synthesize the argument list for `backend`
    ///
    /// In verbose mode the rendered command line is logged before returning.
    pub fn synthesize(
        desc: &CompileDescriptor,
        backend: CompilerBackendKind,
        logger: &dyn Logger,
    ) -> CompileArguments {
        let args = match backend {
            CompilerBackendKind::Dxc => Self::dxc_args(desc),
            CompilerBackendKind::Glslc => Self::glslc_args(desc),
        };
        let arguments = CompileArguments { backend, args };

        if desc.verbose() {
            crate::shader_info!(logger, "galaxy3d::shader::Arguments", "{}", arguments.command_line());
        }

        arguments
    }

    /// DXC convention
    pub fn dxc_args(desc: &CompileDescriptor) -> Vec<String> {
        let mut args = Vec::new();

        args.push(desc.source_path().display().to_string());
        args.push("-T".to_string());
        args.push(format!("{}_{}", desc.stage().profile_prefix(), desc.shader_model()));
        args.push("-E".to_string());
        args.push(desc.entry_point().to_string());

        for define in desc.defines() {
            args.push("-D".to_string());
            args.push(define.to_string());
        }

        for dir in desc.include_dirs() {
            args.push("-I".to_string());
            args.push(dir.display().to_string());
        }

        let opt = if desc.optimization().is_optimized() { "-O3" } else { "-Od" };
        args.push(opt.to_string());

        if desc.shader_model().supports_16bit_types() {
            args.push("-enable-16bit-types".to_string());
        }
        if desc.warnings_are_errors() {
            args.push("-WX".to_string());
        }
        if desc.all_resources_bound() {
            args.push("-all_resources_bound".to_string());
        }
        if desc.matrix_row_major() {
            args.push("-Zpr".to_string());
        }
        if desc.hlsl2021() {
            args.push("-HV".to_string());
            args.push("2021".to_string());
        }
        if desc.embed_pdb() {
            args.push("-Qembed_debug".to_string());
        }

        match desc.platform().family() {
            BytecodeFamily::Spirv => {
                args.push("-spirv".to_string());
                args.push(format!("-fspv-target-env=vulkan{}", desc.vulkan_version()));
                if let Some(layout) = desc.vulkan_memory_layout() {
                    args.push(format!("-fvk-use-{}-layout", layout));
                }
                for ext in desc.spirv_extensions() {
                    args.push(format!("-fspv-extension={}", ext));
                }
                if !desc.no_register_shifts() {
                    args.extend(Self::register_shift_args(desc.register_shifts(), desc.register_spaces()));
                }
            }
            BytecodeFamily::Native => {
                if desc.strip_reflection() {
                    args.push("-Qstrip_reflect".to_string());
                }
            }
        }

        for options in desc.extra_options() {
            args.extend(tokenize_options(options));
        }

        args
    }

    /// glslc convention (SPIR-V output only)
    pub fn glslc_args(desc: &CompileDescriptor) -> Vec<String> {
        let mut args = Vec::new();

        args.push(desc.source_path().display().to_string());
        if let Some(stage) = glslc_stage(desc.stage()) {
            args.push(format!("-fshader-stage={}", stage));
        }
        args.push(format!("--target-env=vulkan{}", glslc_target_env(desc.vulkan_version())));
        args.push(format!("-fentry-point={}", desc.entry_point()));

        let opt = if desc.optimization().is_optimized() { "-O" } else { "-O0" };
        args.push(opt.to_string());

        if desc.warnings_are_errors() {
            args.push("-Werror".to_string());
        }

        for define in desc.defines() {
            args.push(format!("-D{}", define));
        }

        for dir in desc.include_dirs() {
            args.push("-I".to_string());
            args.push(dir.display().to_string());
        }

        for options in desc.extra_options() {
            args.extend(tokenize_options(options));
        }

        args
    }

    /// `-fvk-<r>-shift <shift> <space>` for every register kind and space
    ///
    /// Kinds are emitted in `t`, `s`, `b`, `u` order, spaces ascending within
    /// each kind: `4 * spaces` triples in total.
    pub fn register_shift_args(shifts: RegisterShifts, spaces: u32) -> Vec<String> {
        let mut args = Vec::with_capacity(RegisterKind::ALL.len() * spaces as usize * 3);
        for kind in RegisterKind::ALL {
            for space in 0..spaces {
                args.push(format!("-fvk-{}-shift", kind.letter()));
                args.push(shifts.get(kind).to_string());
                args.push(space.to_string());
            }
        }
        args
    }
}

fn glslc_stage(stage: ShaderStage) -> Option<&'static str> {
    match stage {
        ShaderStage::Vertex => Some("vert"),
        ShaderStage::Pixel => Some("frag"),
        ShaderStage::Geometry => Some("geom"),
        ShaderStage::Compute => Some("comp"),
        // tesc/tese are ambiguous, let glslc read the #pragma
        ShaderStage::Tessellation => None,
    }
}

fn glslc_target_env(version: &str) -> &'static str {
    match version {
        "1.0" => "1.0",
        "1.1" => "1.1",
        "1.2" => "1.2",
        _ => "1.3",
    }
}

/// Split a raw option string into arguments
///
/// Spaces separate arguments, double quotes group them, and a backslash
/// inserts the next character literally.
pub fn tokenize_options(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut escaped = false;

    for ch in input.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            ' ' if !quoted => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
            '\\' => escaped = true,
            '"' => quoted = !quoted,
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        out.push(current);
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "arguments_tests.rs"]
mod tests;
