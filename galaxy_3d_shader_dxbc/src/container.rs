/// DXBC container reader
///
/// Layout: `DXBC` magic, 16-byte checksum, reserved u32, total size, chunk
/// count, then one u32 offset per chunk. Each chunk is a fourcc, a payload
/// size and the payload. Every offset and size is checked against the
/// declared total size; the checksum is not verified.

use crate::error::DxbcError;

const DXBC_MAGIC: &[u8; 4] = b"DXBC";
const HEADER_LEN: usize = 4 + 16 + 4 + 4 + 4;
const MAX_CHUNK_COUNT: u32 = 4096;

/// One chunk of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DxbcChunk<'a> {
    pub fourcc: [u8; 4],
    pub data: &'a [u8],
}

/// A parsed container borrowing the caller's bytes
#[derive(Debug, Clone)]
pub struct DxbcContainer<'a> {
    chunks: Vec<DxbcChunk<'a>>,
}

impl<'a> DxbcContainer<'a> {
    pub fn parse(bytes: &'a [u8]) -> Result<Self, DxbcError> {
        if bytes.len() < HEADER_LEN {
            return Err(DxbcError::MalformedHeader(format!(
                "need at least {} bytes, got {}",
                HEADER_LEN,
                bytes.len()
            )));
        }
        if &bytes[0..4] != DXBC_MAGIC {
            return Err(DxbcError::MalformedHeader(format!(
                "bad magic {:?}",
                String::from_utf8_lossy(&bytes[0..4])
            )));
        }

        let total_size = read_u32(bytes, 24)? as usize;
        let chunk_count = read_u32(bytes, 28)?;
        if chunk_count > MAX_CHUNK_COUNT {
            return Err(DxbcError::MalformedHeader(format!(
                "chunk count {} exceeds {}",
                chunk_count, MAX_CHUNK_COUNT
            )));
        }
        if total_size < HEADER_LEN || total_size > bytes.len() {
            return Err(DxbcError::OutOfBounds(format!(
                "total size {} does not fit buffer of {} bytes",
                total_size,
                bytes.len()
            )));
        }
        let bytes = &bytes[..total_size];

        let table_end = HEADER_LEN + chunk_count as usize * 4;
        if table_end > bytes.len() {
            return Err(DxbcError::OutOfBounds(format!(
                "chunk offset table ends at {}, total size is {}",
                table_end,
                bytes.len()
            )));
        }

        let mut chunks = Vec::with_capacity(chunk_count as usize);
        for i in 0..chunk_count as usize {
            let offset = read_u32(bytes, HEADER_LEN + i * 4)? as usize;
            if offset < table_end {
                return Err(DxbcError::OutOfBounds(format!(
                    "chunk {} offset {} points into the container header",
                    i, offset
                )));
            }
            let fourcc = read_fourcc(bytes, offset)?;
            let size = read_u32(bytes, offset + 4)? as usize;
            let data = slice(bytes, offset + 8, size)?;
            chunks.push(DxbcChunk { fourcc, data });
        }

        Ok(Self { chunks })
    }

    pub fn chunks(&self) -> &[DxbcChunk<'a>] {
        &self.chunks
    }

    /// Payload of the first chunk tagged `fourcc`
    pub fn find(&self, fourcc: &[u8; 4]) -> Option<&'a [u8]> {
        self.chunks
            .iter()
            .find(|chunk| &chunk.fourcc == fourcc)
            .map(|chunk| chunk.data)
    }

    /// First chunk matching any of `fourccs`, in preference order
    pub fn find_any(&self, fourccs: &[&[u8; 4]]) -> Option<DxbcChunk<'a>> {
        fourccs.iter().find_map(|fourcc| {
            self.chunks.iter().find(|chunk| &chunk.fourcc == *fourcc).copied()
        })
    }
}

// ============================================================================
// Bounds-checked readers shared by the chunk parsers
// ============================================================================

pub(crate) fn slice(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8], DxbcError> {
    let end = offset
        .checked_add(len)
        .ok_or_else(|| DxbcError::OutOfBounds(format!("range {}+{} overflows", offset, len)))?;
    bytes.get(offset..end).ok_or_else(|| {
        DxbcError::OutOfBounds(format!("range {}..{} exceeds {} bytes", offset, end, bytes.len()))
    })
}

pub(crate) fn read_u32(bytes: &[u8], offset: usize) -> Result<u32, DxbcError> {
    let b = slice(bytes, offset, 4)?;
    Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

pub(crate) fn read_u8(bytes: &[u8], offset: usize) -> Result<u8, DxbcError> {
    Ok(slice(bytes, offset, 1)?[0])
}

fn read_fourcc(bytes: &[u8], offset: usize) -> Result<[u8; 4], DxbcError> {
    let b = slice(bytes, offset, 4)?;
    Ok([b[0], b[1], b[2], b[3]])
}

/// NUL-terminated string starting at `offset`
pub(crate) fn read_cstr(bytes: &[u8], offset: usize) -> Result<String, DxbcError> {
    let tail = bytes.get(offset..).ok_or_else(|| {
        DxbcError::OutOfBounds(format!("string offset {} exceeds {} bytes", offset, bytes.len()))
    })?;
    let len = tail.iter().position(|&b| b == 0).ok_or_else(|| {
        DxbcError::OutOfBounds(format!("string at {} is not NUL-terminated", offset))
    })?;
    Ok(String::from_utf8_lossy(&tail[..len]).into_owned())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "container_tests.rs"]
mod tests;
