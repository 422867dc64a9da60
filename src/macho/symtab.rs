// As per *OS Internals Vol. 1 (UserSpace) - Chapter 6
// LC_SYMTAB specifies the offset and number of entries in the symbol and string tables of the object
// From mach-o/nlist.h
/*
* Format of a symbol table entry of a Mach-O file for 32-bit architectures.
* Modified from the BSD format.  The modifications from the original format
* were changing n_other (an unused field) to n_sect and the addition of the
* N_SECT type.

struct nlist {
    union {
        uint32_t n_strx;	/* index into the string table */
    } n_un;
    uint8_t n_type;		/* type flag, see below */
    uint8_t n_sect;		/* section number or NO_SECT */
    int16_t n_desc;		/* see <mach-o/stab.h> */
    uint32_t n_value;	/* value of this symbol (or stab offset) */
};

* This is the symbol table entry structure for 64-bit architectures.

struct nlist_64 {
    uint32_t  n_strx;
    uint8_t n_type;
    uint8_t n_sect;
    uint16_t n_desc;
    uint64_t n_value;
};
*/

use crate::error::{MachoError, Result};
use crate::macho::constants::*;
use crate::macho::load_commands::LoadCommand;
use crate::macho::sections::ParsedSection;
use crate::macho::utils;
use crate::reporting::symtab::{StringReport, SymbolReport};
use regex::Regex;

const NLIST32_SIZE: usize = 12;
const NLIST64_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Undefined,
    Absolute,
    Defined,
    PreboundUndefined,
    Indirect,
    Stab,
}

/// An `LC_SYMTAB` command: where the symbol table and string table live.
#[derive(Debug, Clone, Copy)]
pub struct ParsedSymtabCommand {
    pub symoff: u32,
    pub nsyms: u32,
    pub stroff: u32,
    pub strsize: u32,
    pub source_lc: LoadCommand,
}

pub fn read_symtab_command(data: &[u8], lc: &LoadCommand, is_be: bool) -> Result<ParsedSymtabCommand> {
    let base = lc.offset as usize;
    if base + 24 > data.len() {
        return Err(MachoError::Truncated {
            what: "symtab_command",
            offset: lc.offset,
            len: 24,
            bound: data.len() as u64,
        });
    }
    Ok(ParsedSymtabCommand {
        symoff: utils::bytes_to(is_be, &data[base + 8..])?,
        nsyms: utils::bytes_to(is_be, &data[base + 12..])?,
        stroff: utils::bytes_to(is_be, &data[base + 16..])?,
        strsize: utils::bytes_to(is_be, &data[base + 20..])?,
        source_lc: *lc,
    })
}

#[derive(Debug, Clone)]
pub struct ParsedSymbol {
    pub name: String,
    pub value: u64,
    pub n_type: u8,
    pub n_sect: u8,
    pub n_desc: u16,
    pub external: bool,
    pub debug: bool,
    pub kind: SymbolKind,
}

impl ParsedSymbol {
    pub fn build_report(&self, _json: bool) -> SymbolReport {
        SymbolReport {
            name: self.name.clone(),
            value: self.value,
            addr: self.value,
            addr_hex: format!("0x{:x}", self.value),
            kind: format!("{:?}", self.kind),
            section: if self.n_sect == 0 { None } else { Some(self.n_sect) },
            sectname: None,
            segname: None,
            external: self.external,
            debug: self.debug,
        }
    }
}

fn read_string(data: &[u8], stroff: u32, strsize: u32, strx: u32) -> Result<String> {
    if strx >= strsize {
        return Err(MachoError::MalformedString {
            what: "symbol name",
            offset: (stroff + strx) as u64,
            max: 0,
        });
    }
    let start = stroff as usize + strx as usize;
    let bound = stroff as usize + strsize as usize;
    if bound > data.len() || start >= bound {
        return Err(MachoError::Truncated {
            what: "string table entry",
            offset: start as u64,
            len: 1,
            bound: data.len() as u64,
        });
    }
    let bytes = &data[start..bound];
    match bytes.iter().position(|&b| b == 0) {
        Some(pos) => Ok(String::from_utf8_lossy(&bytes[..pos]).into_owned()),
        None => Err(MachoError::MalformedString {
            what: "symbol name",
            offset: start as u64,
            max: (bound - start) as u64,
        }),
    }
}

pub fn read_symbols(data: &[u8], is_be: bool, is_64: bool, symtab: &ParsedSymtabCommand) -> Result<Vec<ParsedSymbol>> {
    let entry_size = if is_64 { NLIST64_SIZE } else { NLIST32_SIZE };
    let table_start = symtab.symoff as usize;
    let table_end = table_start + symtab.nsyms as usize * entry_size;
    if table_end > data.len() {
        return Err(MachoError::Truncated {
            what: "symbol table",
            offset: symtab.symoff as u64,
            len: (table_end - table_start) as u64,
            bound: data.len() as u64,
        });
    }

    let mut symbols = Vec::with_capacity(symtab.nsyms as usize);
    for i in 0..symtab.nsyms {
        let base = table_start + i as usize * entry_size;
        let n_strx: u32 = utils::bytes_to(is_be, &data[base..])?;
        let n_type = data[base + 4];
        let n_sect = data[base + 5];
        let n_desc: u16 = utils::bytes_to(is_be, &data[base + 6..])?;
        let value: u64 = if is_64 {
            utils::bytes_to(is_be, &data[base + 8..])?
        } else {
            utils::bytes_to::<u32>(is_be, &data[base + 8..])? as u64
        };

        let name = if n_strx == 0 {
            String::new()
        } else {
            read_string(data, symtab.stroff, symtab.strsize, n_strx)?
        };

        let kind = if n_type & N_STAB != 0 {
            SymbolKind::Stab
        } else {
            match n_type & N_TYPE {
                N_UNDF => SymbolKind::Undefined,
                N_ABS => SymbolKind::Absolute,
                N_SECT => SymbolKind::Defined,
                N_PBUD => SymbolKind::PreboundUndefined,
                N_INDR => SymbolKind::Indirect,
                _ => SymbolKind::Undefined,
            }
        };

        symbols.push(ParsedSymbol {
            name,
            value,
            n_type,
            n_sect,
            n_desc,
            external: n_type & N_EXT != 0,
            debug: n_type & N_STAB != 0,
            kind,
        });
    }

    Ok(symbols)
}

pub fn sort_symbols(symbols: &mut [ParsedSymbol]) {
    symbols.sort_by_key(|s| s.value);
}

pub fn find_symbol<'a>(symbols: &'a [ParsedSymbol], name: &str) -> Option<&'a ParsedSymbol> {
    symbols.iter().find(|s| s.name == name)
}

pub fn symbols_matching<'a>(symbols: &'a [ParsedSymbol], pattern: &Regex) -> Vec<&'a ParsedSymbol> {
    symbols.iter().filter(|s| pattern.is_match(&s.name)).collect()
}

/// A C-string literal recovered from a `__cstring`-classified section, paired with
/// the segment/section it was found in.
#[derive(Debug, Clone)]
pub struct ParsedString {
    pub value: String,
    pub segname: String,
    pub sectname: String,
}

impl ParsedString {
    pub fn build_report(&self, _json: bool) -> StringReport {
        StringReport {
            value: self.value.clone(),
            segname: self.segname.clone(),
            sectname: self.sectname.clone(),
        }
    }
}

/// Scans a `__cstring`-kind section's raw bytes for NUL-terminated runs.
pub fn extract_strings_from_section(section_bytes: &[u8], section: &ParsedSection) -> Vec<ParsedString> {
    section_bytes
        .split(|&b| b == 0)
        .filter(|run| !run.is_empty())
        .map(|run| ParsedString {
            value: String::from_utf8_lossy(run).into_owned(),
            segname: section.segment_name(),
            sectname: section.name(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macho::constants::LC_SYMTAB;

    fn symtab_command_bytes(symoff: u32, nsyms: u32, stroff: u32, strsize: u32) -> (Vec<u8>, LoadCommand) {
        let mut v = LC_SYMTAB.to_le_bytes().to_vec();
        v.extend_from_slice(&24u32.to_le_bytes());
        v.extend_from_slice(&symoff.to_le_bytes());
        v.extend_from_slice(&nsyms.to_le_bytes());
        v.extend_from_slice(&stroff.to_le_bytes());
        v.extend_from_slice(&strsize.to_le_bytes());
        let lc = LoadCommand { cmd: LC_SYMTAB, cmdsize: 24, offset: 0 };
        (v, lc)
    }

    #[test]
    fn reads_symtab_command_and_one_symbol() {
        // string table: "\0_main\0"
        let strtab: &[u8] = b"\0_main\0";
        let symoff = 64u32;
        let stroff = symoff + NLIST64_SIZE as u32;
        let (mut data, lc) = symtab_command_bytes(symoff, 1, stroff, strtab.len() as u32);
        data.resize(symoff as usize, 0);

        // one nlist_64: n_strx=1 ("_main"), n_type=N_EXT|N_SECT, n_sect=1, n_desc=0, n_value=0x100
        data.extend_from_slice(&1u32.to_le_bytes());
        data.push(N_EXT | N_SECT);
        data.push(1);
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(&0x100u64.to_le_bytes());
        data.extend_from_slice(strtab);

        let symtab = read_symtab_command(&data, &lc, false).unwrap();
        let symbols = read_symbols(&data, false, true, &symtab).unwrap();
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].name, "_main");
        assert_eq!(symbols[0].value, 0x100);
        assert!(symbols[0].external);
        assert_eq!(symbols[0].kind, SymbolKind::Defined);
    }

    #[test]
    fn find_symbol_and_regex_filter_work() {
        let symbols = vec![
            ParsedSymbol {
                name: "_main".into(),
                value: 0,
                n_type: 0,
                n_sect: 0,
                n_desc: 0,
                external: true,
                debug: false,
                kind: SymbolKind::Defined,
            },
            ParsedSymbol {
                name: "_helper".into(),
                value: 1,
                n_type: 0,
                n_sect: 0,
                n_desc: 0,
                external: false,
                debug: false,
                kind: SymbolKind::Defined,
            },
        ];
        assert_eq!(find_symbol(&symbols, "_main").unwrap().value, 0);
        let re = Regex::new("^_h").unwrap();
        assert_eq!(symbols_matching(&symbols, &re).len(), 1);
    }

    #[test]
    fn n_strx_zero_yields_empty_name() {
        let strtab: &[u8] = b"\0";
        let symoff = 64u32;
        let stroff = symoff + NLIST64_SIZE as u32;
        let (mut data, lc) = symtab_command_bytes(symoff, 1, stroff, strtab.len() as u32);
        data.resize(symoff as usize, 0);

        data.extend_from_slice(&0u32.to_le_bytes()); // n_strx = 0
        data.push(0);
        data.push(0);
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(&0u64.to_le_bytes());
        data.extend_from_slice(strtab);

        let symtab = read_symtab_command(&data, &lc, false).unwrap();
        let symbols = read_symbols(&data, false, true, &symtab).unwrap();
        assert_eq!(symbols[0].name, "");
    }

    #[test]
    fn out_of_range_n_strx_is_an_error_not_an_empty_name() {
        let strtab: &[u8] = b"\0ok\0";
        let symoff = 64u32;
        let stroff = symoff + NLIST64_SIZE as u32;
        let (mut data, lc) = symtab_command_bytes(symoff, 1, stroff, strtab.len() as u32);
        data.resize(symoff as usize, 0);

        // n_strx points past the string table entirely.
        data.extend_from_slice(&999u32.to_le_bytes());
        data.push(0);
        data.push(0);
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(&0u64.to_le_bytes());
        data.extend_from_slice(strtab);

        let symtab = read_symtab_command(&data, &lc, false).unwrap();
        assert!(read_symbols(&data, false, true, &symtab).is_err());
    }
}
