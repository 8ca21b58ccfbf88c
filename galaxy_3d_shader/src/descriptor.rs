/// CompileDescriptor - backend-agnostic description of one compile request
///
/// A descriptor is built once through [`CompileDescriptorBuilder`] and is
/// immutable afterwards. The argument synthesizer reads it to produce the
/// command line of whichever native compiler handles the source.

use std::fmt;
use std::path::{Path, PathBuf};
use crate::error::{Error, Result};
use crate::stage::{ShaderPlatform, ShaderStage, SourceLanguage};

// ===== OPTIMIZATION =====

/// Optimization tier requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OptimizationLevel {
    /// Disable all optimization
    O0,
    O1,
    O2,
    /// Maximize performance (default)
    O3,
}

impl OptimizationLevel {
    /// Map a numeric tier (0..=3) to a level
    pub fn from_tier(tier: u32) -> Option<Self> {
        match tier {
            0 => Some(OptimizationLevel::O0),
            1 => Some(OptimizationLevel::O1),
            2 => Some(OptimizationLevel::O2),
            3 => Some(OptimizationLevel::O3),
            _ => None,
        }
    }

    /// Whether any optimization is requested
    ///
    /// Tiers 1 through 3 all collapse to "maximize performance" in both
    /// backends' argument conventions.
    pub fn is_optimized(&self) -> bool {
        *self != OptimizationLevel::O0
    }
}

// ===== REGISTER SHIFTS =====

/// HLSL register kinds, in `t`, `s`, `b`, `u` order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterKind {
    /// `t#` shader resource views
    Texture,
    /// `s#` samplers
    Sampler,
    /// `b#` constant buffers
    ConstantBuffer,
    /// `u#` unordered access views
    UnorderedAccess,
}

impl RegisterKind {
    /// All kinds, in shift-block order
    pub const ALL: [RegisterKind; 4] = [
        RegisterKind::Texture,
        RegisterKind::Sampler,
        RegisterKind::ConstantBuffer,
        RegisterKind::UnorderedAccess,
    ];

    /// Slot in [`RegisterShifts`]
    pub fn index(&self) -> usize {
        match self {
            RegisterKind::Texture => 0,
            RegisterKind::Sampler => 1,
            RegisterKind::ConstantBuffer => 2,
            RegisterKind::UnorderedAccess => 3,
        }
    }

    /// HLSL register letter
    pub fn letter(&self) -> char {
        match self {
            RegisterKind::Texture => 't',
            RegisterKind::Sampler => 's',
            RegisterKind::ConstantBuffer => 'b',
            RegisterKind::UnorderedAccess => 'u',
        }
    }
}

/// Base binding shift applied to each register kind when flattening HLSL
/// registers into SPIR-V bindings
///
/// With the default spacing of 128, every kind owns a disjoint window of 128
/// bindings per register space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterShifts([u32; 4]);

impl RegisterShifts {
    /// Distance between consecutive kinds in [`RegisterShifts::default`]
    pub const DEFAULT_SPACING: u32 = 128;

    /// Explicit shifts in `t`, `s`, `b`, `u` order
    pub fn new(texture: u32, sampler: u32, constant_buffer: u32, unordered_access: u32) -> Self {
        Self([texture, sampler, constant_buffer, unordered_access])
    }

    /// Shifts `0, spacing, 2*spacing, 3*spacing`
    pub fn spaced(spacing: u32) -> Self {
        Self([0, spacing, spacing.saturating_mul(2), spacing.saturating_mul(3)])
    }

    /// All shifts zero
    pub fn zero() -> Self {
        Self([0; 4])
    }

    /// Shift configured for `kind`
    pub fn get(&self, kind: RegisterKind) -> u32 {
        self.0[kind.index()]
    }

    /// Replace the shift of `kind`
    pub fn with(mut self, kind: RegisterKind, shift: u32) -> Self {
        self.0[kind.index()] = shift;
        self
    }
}

impl Default for RegisterShifts {
    fn default() -> Self {
        Self::spaced(Self::DEFAULT_SPACING)
    }
}

// ===== MACROS =====

/// Preprocessor definition `NAME` or `NAME=VALUE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDefinition {
    pub name: String,
    pub value: Option<String>,
}

impl MacroDefinition {
    /// Definition without value
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), value: None }
    }

    /// Definition with value
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: Some(value.into()) }
    }

    /// Parse `NAME=VALUE` (or bare `NAME`)
    pub fn parse(define: &str) -> Self {
        match define.split_once('=') {
            Some((name, value)) => Self::with_value(name, value),
            None => Self::new(define),
        }
    }
}

impl fmt::Display for MacroDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.name, value),
            None => f.write_str(&self.name),
        }
    }
}

// ===== SHADER MODEL =====

/// HLSL shader model, e.g. 6.5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ShaderModel {
    pub major: u32,
    pub minor: u32,
}

impl ShaderModel {
    /// First model with native 16-bit scalar types
    pub const FIRST_16BIT: ShaderModel = ShaderModel { major: 6, minor: 2 };

    /// Parse `6_5` or `6.5`
    pub fn parse(text: &str) -> Result<Self> {
        let (major, minor) = text
            .split_once(|c| c == '_' || c == '.')
            .ok_or_else(|| Error::InvalidArgument(format!("malformed shader model '{}'", text)))?;
        let major = major
            .parse()
            .map_err(|_| Error::InvalidArgument(format!("malformed shader model '{}'", text)))?;
        let minor = minor
            .parse()
            .map_err(|_| Error::InvalidArgument(format!("malformed shader model '{}'", text)))?;
        Ok(Self { major, minor })
    }

    /// Whether `-enable-16bit-types` applies
    pub fn supports_16bit_types(&self) -> bool {
        *self >= Self::FIRST_16BIT
    }
}

impl fmt::Display for ShaderModel {
    /// Rendered the way profile strings expect it (`6_5`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.major, self.minor)
    }
}

// ===== DESCRIPTOR =====

/// Immutable description of one compile request
#[derive(Debug, Clone)]
pub struct CompileDescriptor {
    source_path: PathBuf,
    stage: ShaderStage,
    entry_point: String,
    shader_model: ShaderModel,
    vulkan_version: String,
    vulkan_memory_layout: Option<String>,
    optimization: OptimizationLevel,
    defines: Vec<MacroDefinition>,
    include_dirs: Vec<PathBuf>,
    register_shifts: RegisterShifts,
    register_spaces: u32,
    platform: ShaderPlatform,
    spirv_extensions: Vec<String>,
    extra_options: Vec<String>,
    warnings_are_errors: bool,
    all_resources_bound: bool,
    matrix_row_major: bool,
    hlsl2021: bool,
    embed_pdb: bool,
    strip_reflection: bool,
    no_register_shifts: bool,
    verbose: bool,
}

impl CompileDescriptor {
    /// Number of register spaces covered by the shift block by default
    pub const DEFAULT_REGISTER_SPACES: u32 = 8;

    /// Start building a descriptor for `source_path`
    pub fn builder(source_path: impl Into<PathBuf>, platform: ShaderPlatform) -> CompileDescriptorBuilder {
        CompileDescriptorBuilder::new(source_path, platform)
    }

    pub fn source_path(&self) -> &Path { &self.source_path }
    pub fn stage(&self) -> ShaderStage { self.stage }
    pub fn entry_point(&self) -> &str { &self.entry_point }
    pub fn shader_model(&self) -> ShaderModel { self.shader_model }
    pub fn vulkan_version(&self) -> &str { &self.vulkan_version }
    pub fn vulkan_memory_layout(&self) -> Option<&str> { self.vulkan_memory_layout.as_deref() }
    pub fn optimization(&self) -> OptimizationLevel { self.optimization }
    pub fn defines(&self) -> &[MacroDefinition] { &self.defines }
    pub fn include_dirs(&self) -> &[PathBuf] { &self.include_dirs }
    pub fn register_shifts(&self) -> RegisterShifts { self.register_shifts }
    pub fn register_spaces(&self) -> u32 { self.register_spaces }
    pub fn platform(&self) -> ShaderPlatform { self.platform }
    pub fn spirv_extensions(&self) -> &[String] { &self.spirv_extensions }
    pub fn extra_options(&self) -> &[String] { &self.extra_options }
    pub fn warnings_are_errors(&self) -> bool { self.warnings_are_errors }
    pub fn all_resources_bound(&self) -> bool { self.all_resources_bound }
    pub fn matrix_row_major(&self) -> bool { self.matrix_row_major }
    pub fn hlsl2021(&self) -> bool { self.hlsl2021 }
    pub fn embed_pdb(&self) -> bool { self.embed_pdb }
    pub fn strip_reflection(&self) -> bool { self.strip_reflection }
    pub fn no_register_shifts(&self) -> bool { self.no_register_shifts }
    pub fn verbose(&self) -> bool { self.verbose }

    /// Surface language inferred from the source extension
    pub fn source_language(&self) -> Option<SourceLanguage> {
        SourceLanguage::from_path(&self.source_path)
    }

    /// Defines joined with spaces, as written into byte-array dumps
    pub fn combined_defines(&self) -> String {
        self.defines
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Builder for [`CompileDescriptor`]
///
/// # Example
///
/// ```
/// use galaxy_3d_shader::galaxy3d::compile::{CompileDescriptor, OptimizationLevel};
/// use galaxy_3d_shader::galaxy3d::ShaderPlatform;
///
/// let desc = CompileDescriptor::builder("Shaders/Lit.pixel.hlsl", ShaderPlatform::Spirv)
///     .shader_model("6_2")
///     .optimization(OptimizationLevel::O0)
///     .define("USE_SHADOWS=1")
///     .build()?;
/// assert_eq!(desc.entry_point(), "main");
/// # Ok::<(), galaxy_3d_shader::galaxy3d::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CompileDescriptorBuilder {
    source_path: PathBuf,
    stage: Option<ShaderStage>,
    entry_point: String,
    shader_model: String,
    vulkan_version: String,
    vulkan_memory_layout: Option<String>,
    optimization: OptimizationLevel,
    defines: Vec<MacroDefinition>,
    include_dirs: Vec<PathBuf>,
    register_shifts: RegisterShifts,
    register_spaces: u32,
    platform: ShaderPlatform,
    spirv_extensions: Vec<String>,
    extra_options: Vec<String>,
    warnings_are_errors: bool,
    all_resources_bound: bool,
    matrix_row_major: bool,
    hlsl2021: bool,
    embed_pdb: bool,
    strip_reflection: bool,
    no_register_shifts: bool,
    verbose: bool,
}

impl CompileDescriptorBuilder {
    fn new(source_path: impl Into<PathBuf>, platform: ShaderPlatform) -> Self {
        Self {
            source_path: source_path.into(),
            stage: None,
            entry_point: "main".to_string(),
            shader_model: "6_5".to_string(),
            vulkan_version: "1.3".to_string(),
            vulkan_memory_layout: None,
            optimization: OptimizationLevel::O3,
            defines: Vec::new(),
            include_dirs: Vec::new(),
            register_shifts: RegisterShifts::default(),
            register_spaces: CompileDescriptor::DEFAULT_REGISTER_SPACES,
            platform,
            spirv_extensions: vec!["SPV_EXT_descriptor_indexing".to_string(), "KHR".to_string()],
            extra_options: Vec::new(),
            warnings_are_errors: false,
            all_resources_bound: false,
            matrix_row_major: false,
            hlsl2021: false,
            embed_pdb: false,
            strip_reflection: false,
            no_register_shifts: false,
            verbose: false,
        }
    }

    /// Stage to compile for (inferred from the file name when not set)
    pub fn stage(mut self, stage: ShaderStage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into();
        self
    }

    /// Shader model as `6_5` or `6.5`
    pub fn shader_model(mut self, shader_model: impl Into<String>) -> Self {
        self.shader_model = shader_model.into();
        self
    }

    /// Vulkan target environment version (`1.0` .. `1.3`)
    pub fn vulkan_version(mut self, version: impl Into<String>) -> Self {
        self.vulkan_version = version.into();
        self
    }

    /// SPIR-V memory layout hint (`dx`, `gl`, `scalar`)
    pub fn vulkan_memory_layout(mut self, layout: impl Into<String>) -> Self {
        self.vulkan_memory_layout = Some(layout.into());
        self
    }

    pub fn optimization(mut self, level: OptimizationLevel) -> Self {
        self.optimization = level;
        self
    }

    /// Add a `NAME` or `NAME=VALUE` definition
    pub fn define(mut self, define: &str) -> Self {
        self.defines.push(MacroDefinition::parse(define));
        self
    }

    pub fn macro_definition(mut self, definition: MacroDefinition) -> Self {
        self.defines.push(definition);
        self
    }

    pub fn include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dirs.push(dir.into());
        self
    }

    pub fn register_shifts(mut self, shifts: RegisterShifts) -> Self {
        self.register_shifts = shifts;
        self
    }

    /// Number of register spaces covered by the shift block
    pub fn register_spaces(mut self, spaces: u32) -> Self {
        self.register_spaces = spaces;
        self
    }

    /// Replace the SPIR-V extension list
    pub fn spirv_extensions(mut self, extensions: Vec<String>) -> Self {
        self.spirv_extensions = extensions;
        self
    }

    /// Append raw compiler options, tokenized at synthesis time
    pub fn extra_options(mut self, options: impl Into<String>) -> Self {
        self.extra_options.push(options.into());
        self
    }

    pub fn warnings_are_errors(mut self, enabled: bool) -> Self {
        self.warnings_are_errors = enabled;
        self
    }

    pub fn all_resources_bound(mut self, enabled: bool) -> Self {
        self.all_resources_bound = enabled;
        self
    }

    pub fn matrix_row_major(mut self, enabled: bool) -> Self {
        self.matrix_row_major = enabled;
        self
    }

    pub fn hlsl2021(mut self, enabled: bool) -> Self {
        self.hlsl2021 = enabled;
        self
    }

    pub fn embed_pdb(mut self, enabled: bool) -> Self {
        self.embed_pdb = enabled;
        self
    }

    /// Strip embedded reflection from DXIL output (ignored for SPIR-V)
    pub fn strip_reflection(mut self, enabled: bool) -> Self {
        self.strip_reflection = enabled;
        self
    }

    /// Skip the SPIR-V register shift block entirely
    pub fn no_register_shifts(mut self, enabled: bool) -> Self {
        self.no_register_shifts = enabled;
        self
    }

    /// Log the full command line before invoking the backend
    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Validate and freeze the descriptor
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the source path, entry point or
    /// shader model is empty, or if the shader model is malformed.
    pub fn build(self) -> Result<CompileDescriptor> {
        if self.source_path.as_os_str().is_empty() {
            return Err(Error::InvalidArgument("source path is empty".to_string()));
        }
        if self.entry_point.is_empty() {
            return Err(Error::InvalidArgument("entry point is empty".to_string()));
        }
        if self.shader_model.is_empty() {
            return Err(Error::InvalidArgument("shader model is empty".to_string()));
        }
        let shader_model = ShaderModel::parse(&self.shader_model)?;

        let stage = match self.stage {
            Some(stage) => stage,
            None => {
                let filename = self
                    .source_path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or_default();
                ShaderStage::from_filename(filename)
            }
        };

        Ok(CompileDescriptor {
            source_path: self.source_path,
            stage,
            entry_point: self.entry_point,
            shader_model,
            vulkan_version: self.vulkan_version,
            vulkan_memory_layout: self.vulkan_memory_layout.filter(|l| !l.is_empty()),
            optimization: self.optimization,
            defines: self.defines,
            include_dirs: self.include_dirs,
            register_shifts: self.register_shifts,
            register_spaces: self.register_spaces,
            platform: self.platform,
            spirv_extensions: self.spirv_extensions,
            extra_options: self.extra_options,
            warnings_are_errors: self.warnings_are_errors,
            all_resources_bound: self.all_resources_bound,
            matrix_row_major: self.matrix_row_major,
            hlsl2021: self.hlsl2021,
            embed_pdb: self.embed_pdb,
            strip_reflection: self.strip_reflection,
            no_register_shifts: self.no_register_shifts,
            verbose: self.verbose,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;
