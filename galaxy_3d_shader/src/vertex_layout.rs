/// Derivation of an interleaved vertex layout from stage inputs

use crate::log::Logger;
use crate::reflection::{ShaderStageIoInfo, VertexAttribute};

const COMPONENT_SIZE: u32 = 4;

/// Builds [`VertexAttribute`]s for a single interleaved vertex buffer
///
/// Inputs are consumed in the order given (callers pass them sorted by
/// location or register). Each attribute occupies 4 bytes per vector lane;
/// the final accumulated offset becomes the stride of every attribute.
pub struct VertexLayoutBuilder;

impl VertexLayoutBuilder {
    pub fn build(inputs: &[ShaderStageIoInfo], logger: &dyn Logger) -> Vec<VertexAttribute> {
        let mut attributes = Vec::with_capacity(inputs.len());
        let mut offset = 0u32;

        for input in inputs {
            if input.format.is_invalid() {
                crate::shader_warn!(
                    logger,
                    "galaxy3d::shader::VertexLayout",
                    "Unsupported vertex attribute format for '{}' at location {}",
                    input.name,
                    input.location
                );
                continue;
            }

            attributes.push(VertexAttribute {
                name: input.name.clone(),
                format: input.format,
                buffer_index: 0,
                offset,
                stride: 0,
            });
            offset += COMPONENT_SIZE * input.vec_size.max(1);
        }

        for attribute in &mut attributes {
            attribute.stride = offset;
        }

        attributes
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "vertex_layout_tests.rs"]
mod tests;
