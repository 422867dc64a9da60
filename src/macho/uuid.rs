// File Purpose: LC_UUID - a 16-byte build identifier used to match a binary with its dSYM.

use crate::error::{MachoError, Result};
use crate::macho::load_commands::LoadCommand;

const UUID_COMMAND_SIZE: usize = 24;

#[derive(Debug, Clone, Copy)]
pub struct ParsedUuid {
    pub bytes: [u8; 16],
    pub source_lc: LoadCommand,
}

impl ParsedUuid {
    /// Renders as the standard hyphenated 8-4-4-4-12 form.
    pub fn to_string_hyphenated(&self) -> String {
        let b = &self.bytes;
        format!(
            "{:02X}{:02X}{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7], b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15]
        )
    }
}

pub fn read_uuid(data: &[u8], lc: &LoadCommand) -> Result<ParsedUuid> {
    let base = lc.offset as usize;
    if base + UUID_COMMAND_SIZE > data.len() {
        return Err(MachoError::Truncated {
            what: "uuid_command",
            offset: lc.offset,
            len: UUID_COMMAND_SIZE as u64,
            bound: data.len() as u64,
        });
    }
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&data[base + 8..base + 24]);
    Ok(ParsedUuid { bytes, source_lc: *lc })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macho::constants::LC_UUID;

    #[test]
    fn formats_uuid_hyphenated() {
        let mut data = LC_UUID.to_le_bytes().to_vec();
        data.extend_from_slice(&24u32.to_le_bytes());
        data.extend_from_slice(&[
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF,
        ]);
        let lc = LoadCommand { cmd: LC_UUID, cmdsize: 24, offset: 0 };
        let uuid = read_uuid(&data, &lc).unwrap();
        assert_eq!(uuid.to_string_hyphenated(), "01234567-89AB-CDEF-0123-456789ABCDEF");
    }
}
