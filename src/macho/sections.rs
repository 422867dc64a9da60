// File Purpose: Enumerate Sections, Work with segments.rs

use crate::error::{MachoError, Result};
use crate::macho::constants::*;
use crate::macho::utils;
use crate::reporting::sections::SectionReport;
use std::mem::size_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Code,
    CString,
    ConstData,
    Stub,
    SymbolPointer,
    Bss,
    ObjC,
    LinkEdit,
    Other,
    Unknown,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Section {
    // For 32-bit architectures
    pub sectname: [u8; 16], // name of this section
    pub segname: [u8; 16],  // segment this section goes in
    pub addr: u32,          // memory address of this section
    pub size: u32,          // size in bytes of this section
    pub offset: u32,        // file offset of this section
    pub align: u32,         // section alignment (power of 2)
    pub reloff: u32,        // file offset of relocation entries
    pub nreloc: u32,        // number of relocation entries
    pub flags: u32,         // flags (section type and attributes)
    pub reserved1: u32,     // reserved (for offset or index)
    pub reserved2: u32,     // reserved (for count or size)
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Section64 {
    // For 64-bit architectures
    pub sectname: [u8; 16], // name of this section
    pub segname: [u8; 16],  // segment this section goes in
    pub addr: u64,          // memory address of this section
    pub size: u64,          // size in bytes of this section
    pub offset: u32,        // file offset of this section
    pub align: u32,         // section alignment (power of 2)
    pub reloff: u32,        // file offset of relocation entries
    pub nreloc: u32,        // number of relocation entries
    pub flags: u32,         // flags (section type and attributes)
    pub reserved1: u32,     // reserved (for offset or index)
    pub reserved2: u32,     // reserved (for count or size)
    pub reserved3: u32,     // reserved
}

#[derive(Debug, Clone)]
pub struct ParsedSection {
    pub sectname: [u8; 16],
    pub segname: [u8; 16],
    pub addr: u64,
    pub size: u64,
    pub offset: u32,
    pub flags: u32,
    pub kind: SectionKind,
}

impl ParsedSection {
    pub fn name(&self) -> String {
        utils::name_to_string(&self.sectname)
    }

    pub fn segment_name(&self) -> String {
        utils::name_to_string(&self.segname)
    }

    pub fn build_report(&self, _json: bool) -> SectionReport {
        SectionReport {
            name: self.name(),
            segment: self.segment_name(),
            kind: format!("{:?}", self.kind),
            addr: self.addr,
            size: self.size,
        }
    }
}

fn classify(seg_name: &[u8; 16], sect_name: &[u8; 16], flags: u32) -> SectionKind {
    let sect_type = flags & SECTION_TYPE;
    match sect_type {
        S_CSTRING_LITERALS => SectionKind::CString,
        S_ZEROFILL => SectionKind::Bss,
        S_SYMBOL_STUBS => SectionKind::Stub,
        S_LAZY_SYMBOL_POINTERS | S_NON_LAZY_SYMBOL_POINTERS => SectionKind::SymbolPointer,
        S_MOD_INIT_FUNC_POINTERS | S_MOD_TERM_FUNC_POINTERS => SectionKind::Other,
        _ => {
            if *seg_name == SEG_TEXT && *sect_name == SECT_TEXT {
                SectionKind::Code
            } else if utils::name_to_string(seg_name) == "__DATA_CONST"
                || utils::name_to_string(seg_name) == "__DATA"
            {
                if utils::name_to_string(sect_name).starts_with("__const") {
                    SectionKind::ConstData
                } else {
                    SectionKind::Other
                }
            } else if utils::name_to_string(seg_name) == "__OBJC"
                || utils::name_to_string(sect_name).starts_with("__objc")
            {
                SectionKind::ObjC
            } else if *seg_name == SEG_LINKEDIT {
                SectionKind::LinkEdit
            } else {
                SectionKind::Unknown
            }
        }
    }
}

pub fn read_section64_from_bytes(data: &[u8], is_be: bool, sect_offset: usize) -> Result<ParsedSection> {
    if sect_offset + size_of::<Section64>() > data.len() {
        return Err(MachoError::Truncated {
            what: "section64",
            offset: sect_offset as u64,
            len: size_of::<Section64>() as u64,
            bound: data.len() as u64,
        });
    }

    let sect_name: [u8; 16] = utils::read_name(data, sect_offset)?;
    let seg_name: [u8; 16] = utils::read_name(data, sect_offset + 16)?;
    let sect_addr: u64 = utils::bytes_to(is_be, &data[sect_offset + 32..])?;
    let sect_size: u64 = utils::bytes_to(is_be, &data[sect_offset + 40..])?;
    let sect_file_offset: u32 = utils::bytes_to(is_be, &data[sect_offset + 48..])?;
    let sect_flags: u32 = utils::bytes_to(is_be, &data[sect_offset + 64..])?;

    let kind = classify(&seg_name, &sect_name, sect_flags);

    Ok(ParsedSection {
        sectname: sect_name,
        segname: seg_name,
        addr: sect_addr,
        size: sect_size,
        offset: sect_file_offset,
        flags: sect_flags,
        kind,
    })
}

pub fn read_section32_from_bytes(data: &[u8], is_be: bool, sect_offset: usize) -> Result<ParsedSection> {
    if sect_offset + size_of::<Section>() > data.len() {
        return Err(MachoError::Truncated {
            what: "section",
            offset: sect_offset as u64,
            len: size_of::<Section>() as u64,
            bound: data.len() as u64,
        });
    }
    let sect_name: [u8; 16] = utils::read_name(data, sect_offset)?;
    let seg_name: [u8; 16] = utils::read_name(data, sect_offset + 16)?;
    let sect_addr_32: u32 = utils::bytes_to(is_be, &data[sect_offset + 32..])?;
    let sect_size_32: u32 = utils::bytes_to(is_be, &data[sect_offset + 36..])?;
    let sect_file_offset: u32 = utils::bytes_to(is_be, &data[sect_offset + 40..])?;
    let sect_flags: u32 = utils::bytes_to(is_be, &data[sect_offset + 56..])?;

    let kind = classify(&seg_name, &sect_name, sect_flags);

    Ok(ParsedSection {
        sectname: sect_name,
        segname: seg_name,
        addr: sect_addr_32 as u64,
        size: sect_size_32 as u64,
        offset: sect_file_offset,
        flags: sect_flags,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sect64_bytes(sectname: &str, segname: &str, addr: u64, size: u64, flags: u32) -> Vec<u8> {
        let mut v = vec![0u8; 80];
        let name_into = |buf: &mut [u8], s: &str| {
            let bytes = s.as_bytes();
            buf[..bytes.len()].copy_from_slice(bytes);
        };
        name_into(&mut v[0..16], sectname);
        name_into(&mut v[16..32], segname);
        v[32..40].copy_from_slice(&addr.to_le_bytes());
        v[40..48].copy_from_slice(&size.to_le_bytes());
        v[48..52].copy_from_slice(&0u32.to_le_bytes()); // offset
        v[52..56].copy_from_slice(&0u32.to_le_bytes()); // align
        v[56..60].copy_from_slice(&0u32.to_le_bytes()); // reloff
        v[60..64].copy_from_slice(&0u32.to_le_bytes()); // nreloc
        v[64..68].copy_from_slice(&flags.to_le_bytes());
        v
    }

    #[test]
    fn classifies_text_section() {
        let data = sect64_bytes("__text", "__TEXT", 0x1000, 0x40, S_REGULAR);
        let section = read_section64_from_bytes(&data, false, 0).unwrap();
        assert_eq!(section.kind, SectionKind::Code);
        assert_eq!(section.name(), "__text");
    }

    #[test]
    fn classifies_cstring_section() {
        let data = sect64_bytes("__cstring", "__TEXT", 0x2000, 0x80, S_CSTRING_LITERALS);
        let section = read_section64_from_bytes(&data, false, 0).unwrap();
        assert_eq!(section.kind, SectionKind::CString);
    }

    #[test]
    fn truncated_section_is_rejected() {
        let data = vec![0u8; 10];
        assert!(matches!(
            read_section64_from_bytes(&data, false, 0),
            Err(MachoError::Truncated { .. })
        ));
    }
}
