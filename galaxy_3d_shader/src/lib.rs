/*!
# Galaxy 3D Shader

Shader compilation front-end and reflection normalizer for the Galaxy 3D engine.

This crate turns one backend-agnostic compile request into the command line of
the native shader compilers, and unifies the reflection data of the two
bytecode families into a single [`ReflectionInfo`](galaxy3d::reflect::ReflectionInfo).
Bytecode extractors live in their own crates and plug in through the
[`BytecodeReflector`](galaxy3d::reflect::BytecodeReflector) trait.

## Architecture

- **CompileDescriptor**: Immutable compile request (stage, model, defines, register shifts)
- **ArgumentSynthesizer**: Descriptor to DXC / glslc argument list
- **ShaderCompiler**: Runs a `CompilerBackend` with synthesized arguments
- **ReflectionNormalizer**: Preconditions and dispatch to registered extractors
- **ReflectionBuilder**: Sorts stage IO and derives the vertex layout

Every operation takes the logger explicitly; there is no global logging state.
*/

// Internal modules
mod error;
mod stage;
mod format;
mod descriptor;
mod arguments;
mod compiler;
mod type_mapper;
mod vertex_layout;
mod reflection;
mod normalizer;
pub mod dump;
pub mod log;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, ErrorKind, Result};

    // Stage / platform enums
    pub use crate::stage::{BytecodeFamily, ShaderPlatform, ShaderStage, SourceLanguage};
    pub use crate::format::VertexElementFormat;

    // Logging sub-module (types only, macros are exported at crate root)
    pub mod log {
        pub use crate::log::{CallbackLogger, DefaultLogger, LogEntry, LogSeverity, Logger, NullLogger};
    }

    // Compile sub-module: descriptor, argument synthesis, backends
    pub mod compile {
        pub use crate::descriptor::{
            CompileDescriptor, CompileDescriptorBuilder, MacroDefinition, OptimizationLevel,
            RegisterKind, RegisterShifts, ShaderModel,
        };
        pub use crate::arguments::{tokenize_options, ArgumentSynthesizer, CompileArguments, CompilerBackendKind};
        pub use crate::compiler::{CompilerBackend, ProcessCompiler, ShaderCompiler};
    }

    // Reflection sub-module: canonical model, normalizer, type mapping
    pub mod reflect {
        pub use crate::reflection::{
            ReflectionBuilder, ReflectionInfo, ResourceCategory, ShaderPushConstantInfo,
            ShaderResourceInfo, ShaderStageIoInfo, VertexAttribute,
        };
        pub use crate::normalizer::{BytecodeReflector, ReflectionNormalizer};
        pub use crate::type_mapper::{map_d3d_component, map_spirv_type, RegisterComponentType, ScalarKind};
        pub use crate::vertex_layout::VertexLayoutBuilder;
    }

    // Byte-array dump
    pub mod dump {
        pub use crate::dump::format_byte_array;
    }
}

/// Version of the shader toolchain
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
