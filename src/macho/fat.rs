// File Purpose: "Which Mach-O should be parsed?"

/*
+-------------------+
| fat_header        |  <-- global container metadata
+-------------------+
| fat_arch[0]       |  <-- where Mach-O #0 lives
+-------------------+
| fat_arch[1]       |  <-- where Mach-O #1 lives
+-------------------+
| ...               |
+-------------------+
| Mach-O #0 bytes   |  <-- offset from fat_arch[0]
+-------------------+
| Mach-O #1 bytes   |  <-- offset from fat_arch[1]
+-------------------+
*/

use super::constants;
use super::endian::{self, MagicKind};
use super::header::MachOSlice;
use super::utils;
use crate::error::{MachoError, Result};

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FatHeader {
    pub kind: FatKind,
    pub nfat_arch: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FatArch32 {
    pub cputype: i32,    // Target CPU architecture
    pub cpusubtype: i32, // Specific CPU variant
    pub offset: u32,     // File offset where the Mach-O binary begins
    pub size: u32,       // Size (in bytes) of the Mach-O binary
    pub align: u32,      // Power-of-two alignment of the Macho-O binary
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FatArch64 {
    pub cputype: i32,
    pub cpusubtype: i32,
    pub offset: u64,
    pub size: u64,
    pub align: u32,
    pub reserved: u32,
}

#[derive(Debug, Clone, Copy)]
pub enum FatArch {
    Arch32(FatArch32),
    Arch64(FatArch64),
}

impl FatArch {
    pub fn cputype(&self) -> i32 {
        match self {
            FatArch::Arch32(a) => a.cputype,
            FatArch::Arch64(a) => a.cputype,
        }
    }

    pub fn cpusubtype(&self) -> i32 {
        match self {
            FatArch::Arch32(a) => a.cpusubtype,
            FatArch::Arch64(a) => a.cpusubtype,
        }
    }

    pub fn offset(&self) -> u64 {
        match self {
            FatArch::Arch32(a) => a.offset as u64,
            FatArch::Arch64(a) => a.offset,
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            FatArch::Arch32(a) => a.size as u64,
            FatArch::Arch64(a) => a.size,
        }
    }

    pub fn slice(&self) -> MachOSlice {
        MachOSlice {
            offset: self.offset(),
            size: self.size(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatKind {
    Fat32BE,
    Fat32LE,
    Fat64BE,
    Fat64LE,
}

impl FatKind {
    pub fn is_64(self) -> bool {
        matches!(self, FatKind::Fat64BE | FatKind::Fat64LE)
    }

    pub fn is_be(self) -> bool {
        matches!(self, FatKind::Fat32BE | FatKind::Fat64BE)
    }
}

impl From<MagicKind> for Option<FatKind> {
    fn from(kind: MagicKind) -> Self {
        match kind {
            MagicKind::Fat32BE => Some(FatKind::Fat32BE),
            MagicKind::Fat32LE => Some(FatKind::Fat32LE),
            MagicKind::Fat64BE => Some(FatKind::Fat64BE),
            MagicKind::Fat64LE => Some(FatKind::Fat64LE),
            _ => None,
        }
    }
}

pub fn read_fat_archs(
    data: &[u8],        // Entire file contents
    header: &FatHeader, // Previously-parsed fat header
) -> Result<Vec<FatArch>> {
    let mut archs = Vec::new();
    let mut offset: usize = constants::FAT_HEADER_SIZE; // Start after the on-disk fat header

    for _ in 0..header.nfat_arch {
        if header.kind.is_64() {
            // ==== fat_arch_64 ====
            if offset + constants::FAT_ARCH64_SIZE > data.len() {
                return Err(MachoError::Truncated {
                    what: "fat_arch_64",
                    offset: offset as u64,
                    len: constants::FAT_ARCH64_SIZE as u64,
                    bound: data.len() as u64,
                });
            }

            let base = offset;
            let cputype: i32 = utils::bytes_to(header.kind.is_be(), &data[base..])?;
            let cpusubtype: i32 = utils::bytes_to(header.kind.is_be(), &data[base + 4..])?;
            let arch_offset: u64 = utils::bytes_to(header.kind.is_be(), &data[base + 8..])?;
            let size: u64 = utils::bytes_to(header.kind.is_be(), &data[base + 16..])?;
            let align: u32 = utils::bytes_to(header.kind.is_be(), &data[base + 24..])?;
            let reserved: u32 = utils::bytes_to(header.kind.is_be(), &data[base + 28..])?;

            archs.push(FatArch::Arch64(FatArch64 {
                cputype,
                cpusubtype,
                offset: arch_offset,
                size,
                align,
                reserved,
            }));
            offset += constants::FAT_ARCH64_SIZE;
        } else {
            // ==== fat_arch_32 ====
            if offset + constants::FAT_ARCH32_SIZE > data.len() {
                return Err(MachoError::Truncated {
                    what: "fat_arch",
                    offset: offset as u64,
                    len: constants::FAT_ARCH32_SIZE as u64,
                    bound: data.len() as u64,
                });
            }

            let base = offset;
            let cputype: i32 = utils::bytes_to(header.kind.is_be(), &data[base..])?;
            let cpusubtype: i32 = utils::bytes_to(header.kind.is_be(), &data[base + 4..])?;
            let arch_offset: u32 = utils::bytes_to(header.kind.is_be(), &data[base + 8..])?;
            let size: u32 = utils::bytes_to(header.kind.is_be(), &data[base + 12..])?;
            let align: u32 = utils::bytes_to(header.kind.is_be(), &data[base + 16..])?;

            archs.push(FatArch::Arch32(FatArch32 {
                cputype,
                cpusubtype,
                offset: arch_offset,
                size,
                align,
            }));
            offset += constants::FAT_ARCH32_SIZE;
        }

        // Every arch, regardless of word size, must itself stay within the file.
        let last = archs.last().unwrap();
        if last.offset() + last.size() > data.len() as u64 {
            return Err(MachoError::Truncated {
                what: "fat_arch image",
                offset: last.offset(),
                len: last.size(),
                bound: data.len() as u64,
            });
        }
    }

    Ok(archs)
}

pub fn read_fat_header(data: &[u8]) -> Result<FatHeader> {
    if data.len() < constants::FAT_HEADER_SIZE {
        return Err(MachoError::Truncated {
            what: "fat_header",
            offset: 0,
            len: constants::FAT_HEADER_SIZE as u64,
            bound: data.len() as u64,
        });
    }

    let magic_bytes: [u8; 4] = data[0..4].try_into().unwrap();

    let kind: FatKind = match endian::classify_magic(magic_bytes).and_then(|k| Option::<FatKind>::from(k)) {
        Some(kind) => kind,
        None => {
            return Err(MachoError::BadMagic {
                offset: 0,
                magic: u32::from_be_bytes(magic_bytes),
            })
        }
    };

    let nfat_arch = if kind.is_be() {
        u32::from_be_bytes(data[4..8].try_into().unwrap())
    } else {
        u32::from_le_bytes(data[4..8].try_into().unwrap())
    };

    Ok(FatHeader { kind, nfat_arch })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fat32(n: u32) -> Vec<u8> {
        let mut data = constants::FAT_MAGIC.to_vec();
        data.extend_from_slice(&n.to_be_bytes());
        data
    }

    #[test]
    fn reads_fat32_header() {
        let data = sample_fat32(2);
        let header = read_fat_header(&data).unwrap();
        assert_eq!(header.kind, FatKind::Fat32BE);
        assert_eq!(header.nfat_arch, 2);
        assert!(!header.kind.is_64());
    }

    #[test]
    fn rejects_non_fat_magic() {
        let data = vec![0u8; 8];
        assert!(matches!(read_fat_header(&data), Err(MachoError::BadMagic { .. })));
    }

    #[test]
    fn reads_fat_arch_table() {
        let mut data = sample_fat32(1);
        // one fat_arch_32: cputype, cpusubtype, offset, size, align
        data.extend_from_slice(&(constants::CPU_TYPE_X86_64 as u32).to_be_bytes());
        data.extend_from_slice(&(constants::CPU_SUBTYPE_X86_64_ALL as u32).to_be_bytes());
        data.extend_from_slice(&4096u32.to_be_bytes());
        data.extend_from_slice(&64u32.to_be_bytes());
        data.extend_from_slice(&12u32.to_be_bytes());
        data.resize(4096 + 64, 0);

        let header = read_fat_header(&data).unwrap();
        let archs = read_fat_archs(&data, &header).unwrap();
        assert_eq!(archs.len(), 1);
        assert_eq!(archs[0].offset(), 4096);
        assert_eq!(archs[0].size(), 64);
    }
}
