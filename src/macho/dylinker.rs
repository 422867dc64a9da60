// File Purpose: which dynamic linker loads this binary (LC_LOAD_DYLINKER), what a
// dylinker identifies itself as (LC_ID_DYLINKER), and DYLD_* env overrides
// (LC_DYLD_ENVIRONMENT). Same `lc_str` layout as a dylib path, one string shorter.

use crate::error::{MachoError, Result};
use crate::macho::constants::{LC_DYLD_ENVIRONMENT, LC_ID_DYLINKER, LC_LOAD_DYLINKER};
use crate::macho::load_commands::LoadCommand;
use crate::macho::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DylinkerKind {
    Load,
    Id,
    Environment,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct ParsedDylinker {
    pub path: String,
    pub kind: DylinkerKind,
    pub source_lc: LoadCommand,
}

pub fn parse_dylinker(data: &[u8], lc: &LoadCommand, is_be: bool) -> Result<ParsedDylinker> {
    let base = lc.offset as usize;
    let end = base + lc.cmdsize as usize;
    if end > data.len() {
        return Err(MachoError::MalformedLoadCommand {
            index: 0,
            reason: "dylinker load command exceeds file bounds".to_string(),
        });
    }

    let name_offset: u32 = utils::bytes_to(is_be, &data[base + 8..])?;
    let path = utils::read_lc_str(data, base, end, name_offset)?;

    let kind = match lc.cmd {
        LC_LOAD_DYLINKER => DylinkerKind::Load,
        LC_ID_DYLINKER => DylinkerKind::Id,
        LC_DYLD_ENVIRONMENT => DylinkerKind::Environment,
        _ => DylinkerKind::Unknown,
    };

    Ok(ParsedDylinker { path, kind, source_lc: *lc })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dylinker_path() {
        let mut data = LC_LOAD_DYLINKER.to_le_bytes().to_vec();
        let path = b"/usr/lib/dyld\0";
        let cmdsize = (12 + path.len()).next_multiple_of(8) as u32;
        data.extend_from_slice(&cmdsize.to_le_bytes());
        data.extend_from_slice(&12u32.to_le_bytes());
        data.extend_from_slice(path);
        data.resize(cmdsize as usize, 0);

        let lc = LoadCommand { cmd: LC_LOAD_DYLINKER, cmdsize, offset: 0 };
        let dl = parse_dylinker(&data, &lc, false).unwrap();
        assert_eq!(dl.path, "/usr/lib/dyld");
        assert_eq!(dl.kind, DylinkerKind::Load);
    }
}
