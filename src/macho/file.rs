// File Purpose: "Is this one Mach-O, or a fat binary holding several?" The
// entry point that owns the bytes (or the mapping) and hands out `Macho` views
// into them.

use std::path::Path;

use crate::byte_source::{Bytes, ByteSource, MmapSource};
use crate::error::{MachoError, Result};
use crate::macho::endian::classify_magic;
use crate::macho::fat::{read_fat_archs, read_fat_header, FatArch, FatHeader};
use crate::macho::image::Macho;

/// One architecture slice of a fat binary, paired with the fat_arch entry that
/// described it.
pub struct FatSlice<'a> {
    pub arch: FatArch,
    pub macho: Macho<'a>,
}

/// Either a single Mach-O image or a fat binary bundling several.
pub enum MachOKind<'a> {
    Thin(Macho<'a>),
    Fat { header: FatHeader, slices: Vec<FatSlice<'a>> },
}

/// Owns the bytes (owned buffer or mmap) a `MachOKind` borrows from.
pub struct MachOFile {
    source: Box<dyn ByteSource>,
}

impl MachOFile {
    /// Memory-maps `path` and classifies it without eagerly decoding anything.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mmap = MmapSource::open(path.as_ref())?;
        Ok(Self { source: Box::new(mmap) })
    }

    /// Wraps an in-memory buffer already read by the caller.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { source: Box::new(Bytes::new(data)) }
    }

    pub fn data(&self) -> &[u8] {
        self.source.as_slice()
    }

    /// Classifies the magic and parses either the single thin image or every
    /// architecture slice of a fat container.
    pub fn parse(&self) -> Result<MachOKind<'_>> {
        let data = self.source.as_slice();
        if data.len() < 4 {
            return Err(MachoError::Truncated { what: "magic", offset: 0, len: 4, bound: data.len() as u64 });
        }
        let magic: [u8; 4] = data[0..4].try_into().unwrap();
        let kind = classify_magic(magic).ok_or(MachoError::BadMagic {
            offset: 0,
            magic: u32::from_be_bytes(magic),
        })?;

        if kind.is_fat() {
            let header = read_fat_header(data)?;
            let archs = read_fat_archs(data, &header)?;
            let slices = archs
                .into_iter()
                .map(|arch| {
                    let macho = Macho::parse_at(data, arch.slice())?;
                    Ok(FatSlice { arch, macho })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(MachOKind::Fat { header, slices })
        } else {
            Ok(MachOKind::Thin(Macho::parse(data)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macho::constants::{CPU_SUBTYPE_X86_64_ALL, CPU_TYPE_X86_64, MH_CIGAM_64, MH_MAGIC_64};

    fn thin_macho_le() -> Vec<u8> {
        let mut data = MH_CIGAM_64.to_vec();
        data.extend_from_slice(&(CPU_TYPE_X86_64 as u32).to_le_bytes());
        data.extend_from_slice(&(CPU_SUBTYPE_X86_64_ALL as u32).to_le_bytes());
        data.extend_from_slice(&2u32.to_le_bytes()); // filetype: MH_EXECUTE
        data.extend_from_slice(&0u32.to_le_bytes()); // ncmds
        data.extend_from_slice(&0u32.to_le_bytes()); // sizeofcmds
        data.extend_from_slice(&0u32.to_le_bytes()); // flags
        data.extend_from_slice(&0u32.to_le_bytes()); // reserved
        data
    }

    #[test]
    fn parses_thin_macho_file() {
        let file = MachOFile::from_bytes(thin_macho_le());
        match file.parse().unwrap() {
            MachOKind::Thin(macho) => {
                assert!(macho.header.is_64());
                assert_eq!(macho.header.ncmds(), 0);
            }
            MachOKind::Fat { .. } => panic!("expected thin"),
        }
    }

    #[test]
    fn rejects_bad_magic() {
        let file = MachOFile::from_bytes(vec![0u8; 16]);
        assert!(matches!(file.parse(), Err(MachoError::BadMagic { .. })));
    }

    #[test]
    fn big_endian_thin_header_is_recognized() {
        let mut data = MH_MAGIC_64.to_vec();
        data.extend_from_slice(&(CPU_TYPE_X86_64 as u32).to_be_bytes());
        data.extend_from_slice(&(CPU_SUBTYPE_X86_64_ALL as u32).to_be_bytes());
        data.extend_from_slice(&2u32.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());

        let file = MachOFile::from_bytes(data);
        match file.parse().unwrap() {
            MachOKind::Thin(macho) => assert!(macho.is_be),
            MachOKind::Fat { .. } => panic!("expected thin"),
        }
    }

    #[test]
    fn rejects_truncated_magic() {
        let file = MachOFile::from_bytes(vec![0u8; 2]);
        assert!(matches!(file.parse(), Err(MachoError::Truncated { .. })));
    }
}
