// File Purpose: the shared `{dataoff, datasize}` load command family - every one
// of these just points at a blob living in `__LINKEDIT`. What differs is what the
// blob means, so this module tags it with a `LinkeditDataKind` instead of
// interpreting the bytes.

use crate::error::{MachoError, Result};
use crate::macho::constants::*;
use crate::macho::load_commands::LoadCommand;
use crate::macho::utils;

const LINKEDIT_DATA_COMMAND_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkeditDataKind {
    CodeSignature,
    SegmentSplitInfo,
    FunctionStarts,
    DataInCode,
    DylibCodeSignDrs,
    LinkerOptimizationHint,
    DyldExportsTrie,
    DyldChainedFixups,
    Unknown,
}

impl LinkeditDataKind {
    pub fn from_cmd(cmd: u32) -> Self {
        match cmd {
            LC_CODE_SIGNATURE => LinkeditDataKind::CodeSignature,
            LC_SEGMENT_SPLIT_INFO => LinkeditDataKind::SegmentSplitInfo,
            LC_FUNCTION_STARTS => LinkeditDataKind::FunctionStarts,
            LC_DATA_IN_CODE => LinkeditDataKind::DataInCode,
            LC_DYLIB_CODE_SIGN_DRS => LinkeditDataKind::DylibCodeSignDrs,
            LC_LINKER_OPTIMIZATION_HINT => LinkeditDataKind::LinkerOptimizationHint,
            LC_DYLD_EXPORTS_TRIE => LinkeditDataKind::DyldExportsTrie,
            LC_DYLD_CHAINED_FIXUPS => LinkeditDataKind::DyldChainedFixups,
            _ => LinkeditDataKind::Unknown,
        }
    }

    pub fn is_member(cmd: u32) -> bool {
        !matches!(Self::from_cmd(cmd), LinkeditDataKind::Unknown)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParsedLinkeditData {
    pub kind: LinkeditDataKind,
    pub dataoff: u32,
    pub datasize: u32,
    pub source_lc: LoadCommand,
}

pub fn read_linkedit_data(data: &[u8], lc: &LoadCommand, is_be: bool) -> Result<ParsedLinkeditData> {
    let base = lc.offset as usize;
    if base + LINKEDIT_DATA_COMMAND_SIZE > data.len() {
        return Err(MachoError::Truncated {
            what: "linkedit_data_command",
            offset: lc.offset,
            len: LINKEDIT_DATA_COMMAND_SIZE as u64,
            bound: data.len() as u64,
        });
    }
    Ok(ParsedLinkeditData {
        kind: LinkeditDataKind::from_cmd(lc.cmd),
        dataoff: utils::bytes_to(is_be, &data[base + 8..])?,
        datasize: utils::bytes_to(is_be, &data[base + 12..])?,
        source_lc: *lc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_code_signature_data() {
        let mut data = LC_CODE_SIGNATURE.to_le_bytes().to_vec();
        data.extend_from_slice(&16u32.to_le_bytes());
        data.extend_from_slice(&0x8000u32.to_le_bytes());
        data.extend_from_slice(&256u32.to_le_bytes());
        let lc = LoadCommand { cmd: LC_CODE_SIGNATURE, cmdsize: 16, offset: 0 };
        let linkedit = read_linkedit_data(&data, &lc, false).unwrap();
        assert_eq!(linkedit.kind, LinkeditDataKind::CodeSignature);
        assert_eq!(linkedit.dataoff, 0x8000);
        assert_eq!(linkedit.datasize, 256);
    }

    #[test]
    fn recognizes_family_membership() {
        assert!(LinkeditDataKind::is_member(LC_FUNCTION_STARTS));
        assert!(!LinkeditDataKind::is_member(LC_UUID));
    }
}
