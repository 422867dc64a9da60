// File Purpose: LC_DYSYMTAB - the index/count view into the symbol table for
// two-level namespace lookups (locals, externs, undefineds, indirect symbols).

use crate::error::{MachoError, Result};
use crate::macho::load_commands::LoadCommand;
use crate::macho::utils;

const DYSYMTAB_COMMAND_SIZE: usize = 80;

#[derive(Debug, Clone, Copy)]
pub struct ParsedDysymtab {
    pub ilocalsym: u32,
    pub nlocalsym: u32,
    pub iextdefsym: u32,
    pub nextdefsym: u32,
    pub iundefsym: u32,
    pub nundefsym: u32,
    pub tocoff: u32,
    pub ntoc: u32,
    pub modtaboff: u32,
    pub nmodtab: u32,
    pub extrefsymoff: u32,
    pub nextrefsyms: u32,
    pub indirectsymoff: u32,
    pub nindirectsyms: u32,
    pub extreloff: u32,
    pub nextrel: u32,
    pub locreloff: u32,
    pub nlocrel: u32,
    pub source_lc: LoadCommand,
}

pub fn read_dysymtab(data: &[u8], lc: &LoadCommand, is_be: bool) -> Result<ParsedDysymtab> {
    let base = lc.offset as usize;
    if base + DYSYMTAB_COMMAND_SIZE > data.len() {
        return Err(MachoError::Truncated {
            what: "dysymtab_command",
            offset: lc.offset,
            len: DYSYMTAB_COMMAND_SIZE as u64,
            bound: data.len() as u64,
        });
    }

    let field = |rel: usize| -> Result<u32> { utils::bytes_to(is_be, &data[base + rel..]) };

    Ok(ParsedDysymtab {
        ilocalsym: field(8)?,
        nlocalsym: field(12)?,
        iextdefsym: field(16)?,
        nextdefsym: field(20)?,
        iundefsym: field(24)?,
        nundefsym: field(28)?,
        tocoff: field(32)?,
        ntoc: field(36)?,
        modtaboff: field(40)?,
        nmodtab: field(44)?,
        extrefsymoff: field(48)?,
        nextrefsyms: field(52)?,
        indirectsymoff: field(56)?,
        nindirectsyms: field(60)?,
        extreloff: field(64)?,
        nextrel: field(68)?,
        locreloff: field(72)?,
        nlocrel: field(76)?,
        source_lc: *lc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macho::constants::LC_DYSYMTAB;

    #[test]
    fn reads_dysymtab_fields() {
        let mut data = LC_DYSYMTAB.to_le_bytes().to_vec();
        data.extend_from_slice(&(DYSYMTAB_COMMAND_SIZE as u32).to_le_bytes());
        for i in 0..18u32 {
            data.extend_from_slice(&i.to_le_bytes());
        }
        let lc = LoadCommand { cmd: LC_DYSYMTAB, cmdsize: DYSYMTAB_COMMAND_SIZE as u32, offset: 0 };
        let dysym = read_dysymtab(&data, &lc, false).unwrap();
        assert_eq!(dysym.ilocalsym, 0);
        assert_eq!(dysym.nindirectsyms, 13);
        assert_eq!(dysym.nlocrel, 17);
    }
}
