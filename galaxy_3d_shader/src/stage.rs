/// Shader stage and target platform enumerations

use std::fmt;
use std::path::Path;

/// Pipeline stage a shader is compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Pixel (fragment) shader
    Pixel,
    /// Geometry shader
    Geometry,
    /// Compute shader
    Compute,
    /// Tessellation shader
    Tessellation,
}

impl ShaderStage {
    /// All stages, in declaration order
    pub const ALL: [ShaderStage; 5] = [
        ShaderStage::Vertex,
        ShaderStage::Pixel,
        ShaderStage::Geometry,
        ShaderStage::Compute,
        ShaderStage::Tessellation,
    ];

    /// HLSL profile prefix (`vs`, `ps`, `gs`, `cs`, `ts`)
    pub fn profile_prefix(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs",
            ShaderStage::Pixel => "ps",
            ShaderStage::Geometry => "gs",
            ShaderStage::Compute => "cs",
            ShaderStage::Tessellation => "ts",
        }
    }

    /// Human readable name for logs
    pub fn display_name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "Vertex",
            ShaderStage::Pixel => "Pixel",
            ShaderStage::Geometry => "Geometry",
            ShaderStage::Compute => "Compute",
            ShaderStage::Tessellation => "Tessellation",
        }
    }

    /// Filename token identifying this stage (`.vertex.`, `.pixel.`, ...)
    fn filename_token(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => ".vertex.",
            ShaderStage::Pixel => ".pixel.",
            ShaderStage::Geometry => ".geometry.",
            ShaderStage::Compute => ".compute.",
            ShaderStage::Tessellation => ".tessellation.",
        }
    }

    /// Infer the stage from a file name such as `Lit.pixel.hlsl`
    ///
    /// Matching is case-insensitive. Falls back to `Vertex` when no token matches.
    pub fn from_filename(filename: &str) -> ShaderStage {
        let lower = filename.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|stage| lower.contains(stage.filename_token()))
            .unwrap_or(ShaderStage::Vertex)
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The two bytecode families the toolchain targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BytecodeFamily {
    /// DirectX bytecode (DXIL / DXBC) with register/space addressing
    Native,
    /// SPIR-V with (set, binding) addressing
    Spirv,
}

/// Output bytecode format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderPlatform {
    /// Legacy SM4/SM5 DirectX bytecode
    Dxbc,
    /// SM6 DirectX intermediate language
    Dxil,
    /// Vulkan SPIR-V
    Spirv,
}

impl ShaderPlatform {
    /// Bytecode family this platform belongs to
    pub fn family(&self) -> BytecodeFamily {
        match self {
            ShaderPlatform::Dxbc | ShaderPlatform::Dxil => BytecodeFamily::Native,
            ShaderPlatform::Spirv => BytecodeFamily::Spirv,
        }
    }

    /// Default output file extension (with leading dot)
    pub fn extension(&self) -> &'static str {
        match self {
            ShaderPlatform::Dxbc => ".dxbc",
            ShaderPlatform::Dxil => ".dxil",
            ShaderPlatform::Spirv => ".spirv",
        }
    }
}

impl fmt::Display for ShaderPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderPlatform::Dxbc => "DXBC",
            ShaderPlatform::Dxil => "DXIL",
            ShaderPlatform::Spirv => "SPIRV",
        })
    }
}

/// Surface language of a shader source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    /// HLSL, compiled by DXC
    Hlsl,
    /// GLSL, compiled by glslc
    Glsl,
}

impl SourceLanguage {
    /// Detect the language from the file extension (`.hlsl` / `.glsl`, any case)
    pub fn from_path(path: &Path) -> Option<SourceLanguage> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "hlsl" => Some(SourceLanguage::Hlsl),
            "glsl" => Some(SourceLanguage::Glsl),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
