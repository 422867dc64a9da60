// File Purpose: LC_MAIN - where execution starts, replacing the old LC_UNIXTHREAD
// register-state approach for modern binaries.

use crate::error::{MachoError, Result};
use crate::macho::load_commands::LoadCommand;
use crate::macho::utils;

const ENTRY_POINT_COMMAND_SIZE: usize = 24;

#[derive(Debug, Clone, Copy)]
pub struct ParsedEntryPoint {
    pub entryoff: u64,
    pub stacksize: u64,
    pub source_lc: LoadCommand,
}

pub fn read_entry_point(data: &[u8], lc: &LoadCommand, is_be: bool) -> Result<ParsedEntryPoint> {
    let base = lc.offset as usize;
    if base + ENTRY_POINT_COMMAND_SIZE > data.len() {
        return Err(MachoError::Truncated {
            what: "entry_point_command",
            offset: lc.offset,
            len: ENTRY_POINT_COMMAND_SIZE as u64,
            bound: data.len() as u64,
        });
    }
    Ok(ParsedEntryPoint {
        entryoff: utils::bytes_to(is_be, &data[base + 8..])?,
        stacksize: utils::bytes_to(is_be, &data[base + 16..])?,
        source_lc: *lc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macho::constants::LC_MAIN;

    #[test]
    fn reads_entry_point() {
        let mut data = LC_MAIN.to_le_bytes().to_vec();
        data.extend_from_slice(&24u32.to_le_bytes());
        data.extend_from_slice(&0x4000u64.to_le_bytes());
        data.extend_from_slice(&0u64.to_le_bytes());
        let lc = LoadCommand { cmd: LC_MAIN, cmdsize: 24, offset: 0 };
        let ep = read_entry_point(&data, &lc, false).unwrap();
        assert_eq!(ep.entryoff, 0x4000);
        assert_eq!(ep.stacksize, 0);
    }
}
