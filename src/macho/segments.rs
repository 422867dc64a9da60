// File Purpose: Enumerate Segments and Sections
// https://web.archive.org/web/20260107202245/https://developer.apple.com/library/archive/documentation/Performance/Conceptual/CodeFootprint/Articles/MachOOverview.html
// https://web.archive.org/web/20250912084041/https://medium.com/@travmath/understanding-the-mach-o-file-format-66cf0354e3f4
// https://github.com/aidansteele/osx-abi-macho-file-format-reference/blob/master/README.md#table-1-the-sections-of-a__textsegment

// NOTE: I have read through the above 3 resources and compiled what I believe to be the most important ones to know
/*
=======================================
==== Notable Segments and Sections ====
=======================================

__TEXT (Read + Execute)
    Executable code and read-only data. Typically shared across processes.

    __text
        Compiled machine instructions.

    __const
        Read-only constant data that does not require relocation.

    __cstring
        Null-terminated C string literals.
        Duplicate strings are typically coalesced by the linker.

__DATA (Read + Write)
    Mutable data sections mapped into writable memory.

__PAGEZERO
    - Unmapped region starting at virtual address 0
    - No read/write/execute permissions
    - Size is typically one page or more
    - Occupies no space in the file
    - Used to trap NULL pointer dereferences
*/

use crate::error::{MachoError, Result};
use crate::macho::constants::{LC_SEGMENT, LC_SEGMENT_64};
use crate::macho::load_commands::LoadCommand;
use crate::macho::sections::{read_section32_from_bytes, read_section64_from_bytes, ParsedSection};
use crate::macho::utils;
use crate::reporting::segments::SegmentReport;

const SEGMENT_COMMAND32_HEADER: usize = 56; // up to and including nsects/flags
const SEGMENT_COMMAND64_HEADER: usize = 72;
const SECTION32_SIZE: usize = 68;
const SECTION64_SIZE: usize = 80;

#[derive(Debug, Clone)]
pub struct ParsedSegment {
    pub segname: [u8; 16],
    pub vmaddr: u64,
    pub vmsize: u64,
    pub fileoff: u64,
    pub filesize: u64,
    pub maxprot: i32,
    pub initprot: i32,
    pub flags: u32,
    pub sections: Vec<ParsedSection>,
    pub source_lc: LoadCommand,
}

impl ParsedSegment {
    pub fn name(&self) -> String {
        utils::name_to_string(&self.segname)
    }

    pub fn build_report(&self, json: bool) -> SegmentReport {
        SegmentReport {
            name: self.name(),
            vmaddr: self.vmaddr,
            vmsize: self.vmsize,
            fileoff: self.fileoff,
            filesize: self.filesize,
            maxprot: prot_string(self.maxprot),
            initprot: prot_string(self.initprot),
            sections: self.sections.iter().map(|s| s.build_report(json)).collect(),
        }
    }
}

/// Renders a `vm_prot_t` bitmask (VM_PROT_READ=1, WRITE=2, EXECUTE=4) the way `ls -l`/`vmmap` do.
pub fn prot_string(prot: i32) -> String {
    let r = if prot & 0x1 != 0 { 'r' } else { '-' };
    let w = if prot & 0x2 != 0 { 'w' } else { '-' };
    let x = if prot & 0x4 != 0 { 'x' } else { '-' };
    format!("{r}{w}{x}")
}

pub fn parse_segment(data: &[u8], lc: &LoadCommand, is_be: bool) -> Result<ParsedSegment> {
    let base = lc.offset as usize;
    let end = base + lc.cmdsize as usize;
    if end > data.len() {
        return Err(MachoError::MalformedLoadCommand {
            index: 0,
            reason: "segment load command exceeds file bounds".to_string(),
        });
    }

    let is_64 = lc.cmd == LC_SEGMENT_64;
    if lc.cmd != LC_SEGMENT && lc.cmd != LC_SEGMENT_64 {
        return Err(MachoError::MalformedLoadCommand {
            index: 0,
            reason: format!("cmd 0x{:x} is not LC_SEGMENT or LC_SEGMENT_64", lc.cmd),
        });
    }

    let segname: [u8; 16] = utils::read_name(data, base + 8)?;

    let (vmaddr, vmsize, fileoff, filesize, maxprot, initprot, nsects, flags, sections_start);
    if is_64 {
        if base + SEGMENT_COMMAND64_HEADER > data.len() {
            return Err(MachoError::Truncated {
                what: "segment_command_64",
                offset: base as u64,
                len: SEGMENT_COMMAND64_HEADER as u64,
                bound: data.len() as u64,
            });
        }
        vmaddr = utils::bytes_to(is_be, &data[base + 24..])?;
        vmsize = utils::bytes_to(is_be, &data[base + 32..])?;
        fileoff = utils::bytes_to(is_be, &data[base + 40..])?;
        filesize = utils::bytes_to(is_be, &data[base + 48..])?;
        maxprot = utils::bytes_to(is_be, &data[base + 56..])?;
        initprot = utils::bytes_to(is_be, &data[base + 60..])?;
        nsects = utils::bytes_to::<u32>(is_be, &data[base + 64..])?;
        flags = utils::bytes_to(is_be, &data[base + 68..])?;
        sections_start = base + SEGMENT_COMMAND64_HEADER;
    } else {
        if base + SEGMENT_COMMAND32_HEADER > data.len() {
            return Err(MachoError::Truncated {
                what: "segment_command",
                offset: base as u64,
                len: SEGMENT_COMMAND32_HEADER as u64,
                bound: data.len() as u64,
            });
        }
        let vmaddr32: u32 = utils::bytes_to(is_be, &data[base + 24..])?;
        let vmsize32: u32 = utils::bytes_to(is_be, &data[base + 28..])?;
        let fileoff32: u32 = utils::bytes_to(is_be, &data[base + 32..])?;
        let filesize32: u32 = utils::bytes_to(is_be, &data[base + 36..])?;
        vmaddr = vmaddr32 as u64;
        vmsize = vmsize32 as u64;
        fileoff = fileoff32 as u64;
        filesize = filesize32 as u64;
        maxprot = utils::bytes_to(is_be, &data[base + 40..])?;
        initprot = utils::bytes_to(is_be, &data[base + 44..])?;
        nsects = utils::bytes_to::<u32>(is_be, &data[base + 48..])?;
        flags = utils::bytes_to(is_be, &data[base + 52..])?;
        sections_start = base + SEGMENT_COMMAND32_HEADER;
    }

    let section_size = if is_64 { SECTION64_SIZE } else { SECTION32_SIZE };
    if sections_start + nsects as usize * section_size > end {
        return Err(MachoError::MalformedLoadCommand {
            index: 0,
            reason: format!("{nsects} sections exceed the segment command's cmdsize"),
        });
    }

    let mut sections = Vec::with_capacity(nsects as usize);
    for i in 0..nsects {
        let sect_offset = sections_start + i as usize * section_size;
        let section = if is_64 {
            read_section64_from_bytes(data, is_be, sect_offset)?
        } else {
            read_section32_from_bytes(data, is_be, sect_offset)?
        };
        sections.push(section);
    }

    Ok(ParsedSegment {
        segname,
        vmaddr,
        vmsize,
        fileoff,
        filesize,
        maxprot,
        initprot,
        flags,
        sections,
        source_lc: *lc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macho::constants::LC_SEGMENT_64;

    fn segment64_bytes(name: &str, nsects: u32) -> Vec<u8> {
        let mut v = vec![0u8; SEGMENT_COMMAND64_HEADER];
        v[0..4].copy_from_slice(&LC_SEGMENT_64.to_le_bytes());
        let cmdsize = (SEGMENT_COMMAND64_HEADER + nsects as usize * SECTION64_SIZE) as u32;
        v[4..8].copy_from_slice(&cmdsize.to_le_bytes());
        let bytes = name.as_bytes();
        v[8..8 + bytes.len()].copy_from_slice(bytes);
        v[24..32].copy_from_slice(&0x1_0000_0000u64.to_le_bytes()); // vmaddr
        v[32..40].copy_from_slice(&0x1000u64.to_le_bytes()); // vmsize
        v[40..48].copy_from_slice(&0u64.to_le_bytes()); // fileoff
        v[48..56].copy_from_slice(&0x1000u64.to_le_bytes()); // filesize
        v[56..60].copy_from_slice(&7i32.to_le_bytes()); // maxprot rwx
        v[60..64].copy_from_slice(&5i32.to_le_bytes()); // initprot r-x
        v[64..68].copy_from_slice(&nsects.to_le_bytes());
        v.resize(cmdsize as usize, 0);
        v
    }

    #[test]
    fn parses_segment_with_no_sections() {
        let data = segment64_bytes("__TEXT", 0);
        let lc = LoadCommand { cmd: LC_SEGMENT_64, cmdsize: data.len() as u32, offset: 0 };
        let seg = parse_segment(&data, &lc, false).unwrap();
        assert_eq!(seg.name(), "__TEXT");
        assert_eq!(seg.vmsize, 0x1000);
        assert_eq!(prot_string(seg.initprot), "r-x");
        assert!(seg.sections.is_empty());
    }

    #[test]
    fn rejects_nsects_overflowing_cmdsize() {
        let mut data = segment64_bytes("__TEXT", 1);
        // Lie about cmdsize so the declared section doesn't fit.
        let lc = LoadCommand { cmd: LC_SEGMENT_64, cmdsize: SEGMENT_COMMAND64_HEADER as u32, offset: 0 };
        data.truncate(SEGMENT_COMMAND64_HEADER);
        assert!(matches!(parse_segment(&data, &lc, false), Err(MachoError::MalformedLoadCommand { .. })));
    }
}
