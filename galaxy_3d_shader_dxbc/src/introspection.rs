/// Reflection view of a DXBC container
///
/// Two loaders share the same output. The container loader handles SM6
/// output (a `DXIL` program part, `ISG1`/`OSG1` signatures); the legacy loader
/// handles SM4/SM5 output (a `SHDR`/`SHEX` program, `ISGN`/`OSGN`). Resources
/// come from `RDEF` when present, else from the `PSV0` binding table that DXC
/// writes into SM6 containers in place of `RDEF`.

use galaxy_3d_shader::galaxy3d::ShaderStage;
use crate::container::{read_u32, DxbcContainer};
use crate::error::DxbcError;
use crate::psv::{parse_psv_bindings, PsvResourceBinding};
use crate::rdef::{parse_rdef, ResourceDefinitions};
use crate::signature::{parse_signature, SignatureParameter};

/// Which loader produced the introspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramKind {
    /// SM6 `DXIL` program part
    Dxil,
    /// SM4/SM5 `SHDR` / `SHEX` token stream
    Legacy,
}

/// Program version token shared by `DXIL` parts and SM4/SM5 token streams
///
/// Bits 0-3 minor, 4-7 major, 16-31 program type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramVersion {
    pub program_type: u16,
    pub major: u8,
    pub minor: u8,
}

impl ProgramVersion {
    pub fn from_token(token: u32) -> Self {
        Self {
            program_type: (token >> 16) as u16,
            major: ((token >> 4) & 0xF) as u8,
            minor: (token & 0xF) as u8,
        }
    }

    /// Pipeline stage of the program type, `None` for libraries and newer kinds
    pub fn stage(&self) -> Option<ShaderStage> {
        match self.program_type {
            0 => Some(ShaderStage::Pixel),
            1 => Some(ShaderStage::Vertex),
            2 => Some(ShaderStage::Geometry),
            3 | 4 => Some(ShaderStage::Tessellation),
            5 => Some(ShaderStage::Compute),
            _ => None,
        }
    }
}

/// Where the resource list was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceTable {
    /// Named constant buffers and bindings
    Rdef(ResourceDefinitions),
    /// Unnamed register ranges
    Pipeline(Vec<PsvResourceBinding>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderIntrospection {
    pub program: ProgramKind,
    pub version: ProgramVersion,
    /// `None` when the container carries neither `RDEF` nor `PSV0`
    pub resources: Option<ResourceTable>,
    pub inputs: Vec<SignatureParameter>,
    pub outputs: Vec<SignatureParameter>,
}

impl ShaderIntrospection {
    /// Load from container bytes, container-based first, legacy second
    pub fn load(bytes: &[u8]) -> Result<Self, DxbcError> {
        let container = DxbcContainer::parse(bytes)?;
        match Self::from_dxil_part(&container) {
            Ok(introspection) => Ok(introspection),
            Err(dxil_err) => Self::from_legacy_program(&container).map_err(|legacy_err| {
                match legacy_err {
                    DxbcError::MissingProgram => dxil_err,
                    other => other,
                }
            }),
        }
    }

    fn from_dxil_part(container: &DxbcContainer<'_>) -> Result<Self, DxbcError> {
        let program = container.find(b"DXIL").ok_or(DxbcError::MissingProgram)?;
        Self::read(
            container,
            ProgramKind::Dxil,
            program,
            &[b"ISG1", b"ISGN"],
            &[b"OSG1", b"OSGN"],
        )
    }

    fn from_legacy_program(container: &DxbcContainer<'_>) -> Result<Self, DxbcError> {
        let program = container
            .find_any(&[b"SHEX", b"SHDR"])
            .ok_or(DxbcError::MissingProgram)?;
        Self::read(
            container,
            ProgramKind::Legacy,
            program.data,
            &[b"ISGN", b"ISG1"],
            &[b"OSGN", b"OSG1"],
        )
    }

    fn read(
        container: &DxbcContainer<'_>,
        kind: ProgramKind,
        program: &[u8],
        input_tags: &[&[u8; 4]],
        output_tags: &[&[u8; 4]],
    ) -> Result<Self, DxbcError> {
        let version = ProgramVersion::from_token(read_u32(program, 0)?);

        let resources = match (container.find(b"RDEF"), container.find(b"PSV0")) {
            (Some(data), _) => Some(ResourceTable::Rdef(parse_rdef(data)?)),
            (None, Some(data)) => Some(ResourceTable::Pipeline(parse_psv_bindings(data)?)),
            (None, None) => None,
        };

        let inputs = match container.find_any(input_tags) {
            Some(chunk) => parse_signature(&chunk.fourcc, chunk.data)?,
            None => Vec::new(),
        };
        let outputs = match container.find_any(output_tags) {
            Some(chunk) => parse_signature(&chunk.fourcc, chunk.data)?,
            None => Vec::new(),
        };

        Ok(Self {
            program: kind,
            version,
            resources,
            inputs,
            outputs,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "introspection_tests.rs"]
mod tests;
