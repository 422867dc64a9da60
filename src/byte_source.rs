// File Purpose: random-access reads over either an owned buffer or a memory-mapped file.
//
// The object model never copies the whole file; it borrows slices from whichever
// `ByteSource` it was handed. This is the one seam the parser needs from its
// storage: size, a bounds-checked slice read, and a bounds-checked NUL-terminated
// string read.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use memmap2::Mmap;

use crate::error::{MachoError, Result};

/// A finite byte sequence the parser can read from at arbitrary offsets.
pub trait ByteSource: Send + Sync {
    /// Total size of the underlying sequence in bytes.
    fn size(&self) -> u64;

    /// Raw access to the whole sequence.
    fn as_slice(&self) -> &[u8];

    /// Read `len` bytes starting at `offset`. Fails with `IoOutOfRange` if the
    /// range extends past `size()`.
    fn read_at(&self, offset: u64, len: u64) -> Result<&[u8]> {
        let size = self.size();
        let end = offset.checked_add(len).ok_or(MachoError::IoOutOfRange {
            offset,
            len,
            size,
        })?;
        if end > size {
            return Err(MachoError::IoOutOfRange { offset, len, size });
        }
        Ok(&self.as_slice()[offset as usize..end as usize])
    }

    /// Read a NUL-terminated string starting at `offset`, scanning at most `max`
    /// bytes. Fails with `MalformedString` if no NUL appears within `max` bytes.
    fn read_cstr(&self, offset: u64, max: u64) -> Result<String> {
        let bytes = self.read_at(offset, max)?;
        match bytes.iter().position(|&b| b == 0) {
            Some(pos) => Ok(String::from_utf8_lossy(&bytes[..pos]).into_owned()),
            None => Err(MachoError::MalformedString {
                what: "c string",
                offset,
                max,
            }),
        }
    }
}

/// An owned, in-memory buffer. Used for `Macho::parse` and for slices sliced out
/// of a fat binary that don't warrant their own mapping.
#[derive(Clone)]
pub struct Bytes(Arc<[u8]>);

impl Bytes {
    pub fn new(data: Vec<u8>) -> Self {
        Self(Arc::from(data))
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl ByteSource for Bytes {
    fn size(&self) -> u64 {
        self.0.len() as u64
    }

    fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

/// A memory-mapped file. Used by `MachOFile::open` so inspecting a large binary
/// doesn't require reading the whole thing into the heap up front.
pub struct MmapSource {
    mmap: Mmap,
}

impl MmapSource {
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::open(path)?;
        // SAFETY: the file is not concurrently truncated by this process; the
        // parser only ever performs read-only positional reads on the mapping.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self { mmap })
    }
}

impl ByteSource for MmapSource {
    fn size(&self) -> u64 {
        self.mmap.len() as u64
    }

    fn as_slice(&self) -> &[u8] {
        &self.mmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_at_reports_out_of_range() {
        let src = Bytes::new(vec![1, 2, 3, 4]);
        assert!(src.read_at(0, 4).is_ok());
        assert!(src.read_at(1, 4).is_err());
        assert!(src.read_at(5, 1).is_err());
    }

    #[test]
    fn read_cstr_finds_terminator() {
        let src = Bytes::new(b"hello\0world".to_vec());
        assert_eq!(src.read_cstr(0, 11).unwrap(), "hello");
    }

    #[test]
    fn read_cstr_requires_terminator_within_max() {
        let src = Bytes::new(b"hello".to_vec());
        assert!(src.read_cstr(0, 5).is_err());
    }
}
