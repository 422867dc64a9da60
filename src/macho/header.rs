// File Purpose: "what kind of Mach-O file is this?"
/*
Mach-O Header
+----------------+      +---------------+
| mach_header_64 | -->  | Magic Number  |
+----------------+      +---------------+
| load commands  |      |   CPU Type    |
+----------------+      +---------------+
| segments       |      |  CPU Subtype  |
+----------------+      +---------------+
                        |   File Type   |
                        +---------------+
                        | Num Load Cmds |
                        +---------------+
                        | Size of LC's  |
                        +---------------+
                        |     Flags     |
                        +---------------+
                        |    Reserved   |
                        +---------------+

*/

use super::constants::{self, MACH_HEADER64_SIZE};
use super::endian::{self, MagicKind};
use super::utils;
use crate::error::{MachoError, Result};
use crate::reporting::header::MachHeaderReport;

/*
From <mach-o/loader.h>
/* Constant for the magic field of the mach_header (32-bit architectures) */
#define	MH_MAGIC	0xfeedface	/* the mach magic number */
#define MH_CIGAM	0xcefaedfe	/* NXSwapInt(MH_MAGIC) */

/* Constant for the magic field of the mach_header_64 (64-bit architectures) */
#define MH_MAGIC_64 0xfeedfacf /* the 64-bit mach magic number */
#define MH_CIGAM_64 0xcffaedfe /* NXSwapInt(MH_MAGIC_64) */
*/
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct MachHeader64 {
    pub magic: u32,       // mach magic number identifier
    pub cputype: i32,     // cpu specifier
    pub cpusubtype: i32,  // machine specifier
    pub filetype: u32,    // type of file
    pub ncmds: u32,       // number of load commands
    pub sizeofcmds: u32,  // the size of all the load commands
    pub flags: u32,       // flags
    pub reserved: u32,    // reserved
}
/// A located region of a file holding one Mach-O image, carved out by the fat
/// arch table (or the whole file, for a thin binary).
#[derive(Debug, Clone, Copy)]
pub struct MachOSlice {
    pub offset: u64,
    pub size: u64,
}

#[derive(Debug, Clone, Copy)]
pub enum MachOHeader {
    Header64(MachHeader64),
}

impl MachOHeader {
    pub fn is_64(&self) -> bool {
        matches!(self, MachOHeader::Header64(_))
    }

    pub fn cputype(&self) -> i32 {
        match self {
            MachOHeader::Header64(h) => h.cputype,
        }
    }

    pub fn cpusubtype(&self) -> i32 {
        match self {
            MachOHeader::Header64(h) => h.cpusubtype,
        }
    }

    pub fn filetype(&self) -> u32 {
        match self {
            MachOHeader::Header64(h) => h.filetype,
        }
    }

    pub fn ncmds(&self) -> u32 {
        match self {
            MachOHeader::Header64(h) => h.ncmds,
        }
    }

    pub fn sizeofcmds(&self) -> u32 {
        match self {
            MachOHeader::Header64(h) => h.sizeofcmds,
        }
    }

    pub fn flags(&self) -> u32 {
        match self {
            MachOHeader::Header64(h) => h.flags,
        }
    }

    pub fn size(&self) -> usize {
        MACH_HEADER64_SIZE
    }
}

/// Reads the mach_header (or mach_header_64) living at `slice.offset`.
/// Returns the parsed header alongside whether the image is big-endian.
pub fn read_thin_header(data: &[u8], slice: &MachOSlice) -> Result<(MachOHeader, bool)> {
    let off = slice.offset as usize;
    if off + 4 > data.len() {
        return Err(MachoError::Truncated {
            what: "mach_header magic",
            offset: slice.offset,
            len: 4,
            bound: data.len() as u64,
        });
    }

    let magic_bytes: [u8; 4] = data[off..off + 4].try_into().unwrap();
    let kind = endian::classify_magic(magic_bytes).ok_or(MachoError::BadMagic {
        offset: slice.offset,
        magic: u32::from_be_bytes(magic_bytes),
    })?;

    if kind.is_fat() {
        return Err(MachoError::UnsupportedFormat {
            what: "fat magic where a thin mach_header was expected",
        });
    }

    if !kind.is_64() {
        return Err(MachoError::UnsupportedFormat { what: "32-bit Mach-O (Thin32)" });
    }

    let is_be = kind.is_be();
    let magic = utils::bytes_to::<u32>(is_be, &data[off..])?;

    if off + MACH_HEADER64_SIZE > data.len() {
        return Err(MachoError::Truncated {
            what: "mach_header_64",
            offset: slice.offset,
            len: MACH_HEADER64_SIZE as u64,
            bound: data.len() as u64,
        });
    }
    let header = MachHeader64 {
        magic,
        cputype: utils::bytes_to(is_be, &data[off + 4..])?,
        cpusubtype: utils::bytes_to(is_be, &data[off + 8..])?,
        filetype: utils::bytes_to(is_be, &data[off + 12..])?,
        ncmds: utils::bytes_to(is_be, &data[off + 16..])?,
        sizeofcmds: utils::bytes_to(is_be, &data[off + 20..])?,
        flags: utils::bytes_to(is_be, &data[off + 24..])?,
        reserved: utils::bytes_to(is_be, &data[off + 28..])?,
    };
    Ok((MachOHeader::Header64(header), is_be))
}

impl MachOHeader {
    pub fn cpu_type_name(&self) -> &'static str {
        constants::cpu_type_name(self.cputype())
    }

    pub fn cpu_subtype_name(&self) -> &'static str {
        constants::cpu_subtype_name(self.cputype(), self.cpusubtype())
    }

    pub fn filetype_name(&self) -> &'static str {
        constants::filetype_name(self.filetype())
    }

    pub fn flag_names(&self) -> Vec<String> {
        constants::header_flags(self.flags())
    }

    pub fn build_report(&self, _json: bool) -> MachHeaderReport {
        MachHeaderReport {
            magic: match self {
                MachOHeader::Header64(h) => h.magic,
            },
            file_type: self.filetype_name().to_string(),
            cpu_type: self.cpu_type_name().to_string(),
            cpu_subtype: self.cpu_subtype_name().to_string(),
            ncmds: self.ncmds(),
            sizeofcmds: self.sizeofcmds(),
            flags: self.flag_names(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_64(is_be: bool) -> Vec<u8> {
        let magic = if is_be {
            constants::MH_MAGIC_64
        } else {
            constants::MH_CIGAM_64
        };
        let mut data = Vec::new();
        data.extend_from_slice(&magic);
        let push = |data: &mut Vec<u8>, v: u32| {
            if is_be {
                data.extend_from_slice(&v.to_be_bytes());
            } else {
                data.extend_from_slice(&v.to_le_bytes());
            }
        };
        push(&mut data, constants::CPU_TYPE_ARM64 as u32);
        push(&mut data, constants::CPU_SUBTYPE_ARM64_ALL as u32);
        push(&mut data, constants::MH_EXECUTE);
        push(&mut data, 3); // ncmds
        push(&mut data, 128); // sizeofcmds
        push(&mut data, constants::MH_PIE);
        push(&mut data, 0); // reserved
        data
    }

    #[test]
    fn reads_little_endian_64_header() {
        let data = sample_64(false);
        let slice = MachOSlice { offset: 0, size: data.len() as u64 };
        let (header, is_be) = read_thin_header(&data, &slice).unwrap();
        assert!(!is_be);
        assert!(header.is_64());
        assert_eq!(header.filetype(), constants::MH_EXECUTE);
        assert_eq!(header.ncmds(), 3);
        assert_eq!(header.cpu_type_name(), "ARM64");
    }

    #[test]
    fn reads_big_endian_64_header() {
        let data = sample_64(true);
        let slice = MachOSlice { offset: 0, size: data.len() as u64 };
        let (header, is_be) = read_thin_header(&data, &slice).unwrap();
        assert!(is_be);
        assert_eq!(header.sizeofcmds(), 128);
    }

    #[test]
    fn thin32_magic_is_detected_but_not_decoded() {
        let data = constants::MH_MAGIC.to_vec();
        let slice = MachOSlice { offset: 0, size: data.len() as u64 };
        assert!(matches!(
            read_thin_header(&data, &slice),
            Err(MachoError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn rejects_fat_magic() {
        let data = constants::FAT_MAGIC.to_vec();
        let slice = MachOSlice { offset: 0, size: data.len() as u64 };
        assert!(matches!(
            read_thin_header(&data, &slice),
            Err(MachoError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn rejects_truncated_header() {
        let data = constants::MH_MAGIC_64.to_vec();
        let slice = MachOSlice { offset: 0, size: data.len() as u64 };
        assert!(matches!(
            read_thin_header(&data, &slice),
            Err(MachoError::Truncated { .. })
        ));
    }
}
