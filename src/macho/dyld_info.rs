// File Purpose: Handle LC_DYLD_INFO and LC_DYLD_INFO_ONLY - the opaque byte
// streams dyld consumes to rebase, bind, and export symbols at load time.

use crate::error::{MachoError, Result};
use crate::macho::load_commands::LoadCommand;
use crate::macho::utils;

const DYLD_INFO_COMMAND_SIZE: usize = 48;

// from mach-o/loader.h
#[derive(Debug, Clone, Copy)]
pub struct ParsedDyldInfo {
    // Adjust for ASLR
    pub rebase_off: u32,  // file offset to rebase info
    pub rebase_size: u32, // size of rebase info
    // External symbols from other libraries, primarily __DATA_CONST/__got
    pub bind_off: u32,
    pub bind_size: u32,
    // Handle weak symbols (that may have multiple definitions): __la_symbol_ptr and __got
    pub weak_bind_off: u32,
    pub weak_bind_size: u32,
    // Delay binding symbols until first use: __la_symbol_ptr holds lazy pointers
    pub lazy_bind_off: u32,
    pub lazy_bind_size: u32,
    // Symbols this binary provides to others
    pub export_off: u32,
    pub export_size: u32,
    pub source_lc: LoadCommand,
}

pub fn read_dyld_info(data: &[u8], lc: &LoadCommand, is_be: bool) -> Result<ParsedDyldInfo> {
    let base = lc.offset as usize;
    if base + DYLD_INFO_COMMAND_SIZE > data.len() {
        return Err(MachoError::Truncated {
            what: "dyld_info_command",
            offset: lc.offset,
            len: DYLD_INFO_COMMAND_SIZE as u64,
            bound: data.len() as u64,
        });
    }

    let field = |rel: usize| -> Result<u32> { utils::bytes_to(is_be, &data[base + rel..]) };

    Ok(ParsedDyldInfo {
        rebase_off: field(8)?,
        rebase_size: field(12)?,
        bind_off: field(16)?,
        bind_size: field(20)?,
        weak_bind_off: field(24)?,
        weak_bind_size: field(28)?,
        lazy_bind_off: field(32)?,
        lazy_bind_size: field(36)?,
        export_off: field(40)?,
        export_size: field(44)?,
        source_lc: *lc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macho::constants::LC_DYLD_INFO_ONLY;

    #[test]
    fn reads_dyld_info_offsets() {
        let mut data = LC_DYLD_INFO_ONLY.to_le_bytes().to_vec();
        data.extend_from_slice(&(DYLD_INFO_COMMAND_SIZE as u32).to_le_bytes());
        for i in 0..10u32 {
            data.extend_from_slice(&(i * 16).to_le_bytes());
        }
        let lc = LoadCommand { cmd: LC_DYLD_INFO_ONLY, cmdsize: DYLD_INFO_COMMAND_SIZE as u32, offset: 0 };
        let info = read_dyld_info(&data, &lc, false).unwrap();
        assert_eq!(info.rebase_off, 0);
        assert_eq!(info.export_size, 144);
    }
}
