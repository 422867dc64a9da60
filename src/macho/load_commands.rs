// File Purpose: "What load commands are present in a given binary?"
use crate::error::{MachoError, Result};
use crate::macho::constants::*;
use crate::macho::utils;
use crate::reporting::load_commands::LoadCommandReport;
use colored::Colorize;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct LoadCommand {
    pub cmd: u32,     // type of load command
    pub cmdsize: u32, // total size of command in bytes
    pub offset: u64,  // Offset to this load command from start of Mach-O image
    /*
        ^ cmd size's VALUE must be:
            - a multiple of 4 bytes for 32 bit
            - a multiple of 8 bytes for 64 bit
     */
}

impl LoadCommand {
    pub fn build_report(&self, _json: bool) -> LoadCommandReport {
        LoadCommandReport {
            command: load_command_name(self.cmd).to_string(),
            cmd: self.cmd,
            size: self.cmdsize,
        }
    }
}

pub fn load_command_name(cmd: u32) -> &'static str {
    /*
        cmd & LC_REQ_DYLD != 0 // flag
        cmd & !LC_REQ_DYLD // base command
     */

    let base_cmd = cmd & !LC_REQ_DYLD;

    match base_cmd {
        // This should be O(1) so I guess it's not inefficient it's just a hassle to type which is fine.
        LC_SEGMENT => "LC_SEGMENT",
        LC_SYMTAB => "LC_SYMTAB",
        LC_SYMSEG => "LC_SYMSEG",
        LC_THREAD => "LC_THREAD",
        LC_UNIXTHREAD => "LC_UNIXTHREAD",
        LC_LOADFVMLIB => "LC_LOADFVMLIB",
        LC_IDFVMLIB => "LC_IDFVMLIB",
        LC_IDENT => "LC_IDENT",
        LC_FVMFILE => "LC_FVMFILE",
        LC_PREPAGE => "LC_PREPAGE",
        LC_DYSYMTAB => "LC_DYSYMTAB",
        LC_LOAD_DYLIB => "LC_LOAD_DYLIB",
        LC_ID_DYLIB => "LC_ID_DYLIB",
        LC_LOAD_DYLINKER => "LC_LOAD_DYLINKER",
        LC_ID_DYLINKER => "LC_ID_DYLINKER",
        LC_PREBOUND_DYLIB => "LC_PREBOUND_DYLIB",
        LC_ROUTINES => "LC_ROUTINES",
        LC_SUB_FRAMEWORK => "LC_SUB_FRAMEWORK",
        LC_SUB_UMBRELLA => "LC_SUB_UMBRELLA",
        LC_SUB_CLIENT => "LC_SUB_CLIENT",
        LC_SUB_LIBRARY => "LC_SUB_LIBRARY",
        LC_TWOLEVEL_HINTS => "LC_TWOLEVEL_HINTS",
        LC_PREBIND_CKSUM => "LC_PREBIND_CKSUM",
        LC_LOAD_WEAK_DYLIB => "LC_LOAD_WEAK_DYLIB",
        LC_SEGMENT_64 => "LC_SEGMENT_64",
        LC_ROUTINES_64 => "LC_ROUTINES_64",
        LC_UUID => "LC_UUID",
        LC_RPATH => "LC_RPATH",
        LC_CODE_SIGNATURE => "LC_CODE_SIGNATURE",
        LC_SEGMENT_SPLIT_INFO => "LC_SEGMENT_SPLIT_INFO",
        LC_REEXPORT_DYLIB => "LC_REEXPORT_DYLIB",
        LC_LAZY_LOAD_DYLIB => "LC_LAZY_LOAD_DYLIB",
        LC_ENCRYPTION_INFO => "LC_ENCRYPTION_INFO",
        LC_DYLD_INFO => "LC_DYLD_INFO",
        LC_LOAD_UPWARD_DYLIB => "LC_LOAD_UPWARD_DYLIB",
        LC_VERSION_MIN_MACOSX => "LC_VERSION_MIN_MACOSX",
        LC_VERSION_MIN_IPHONEOS => "LC_VERSION_MIN_IPHONEOS",
        LC_FUNCTION_STARTS => "LC_FUNCTION_STARTS",
        LC_DYLD_ENVIRONMENT => "LC_DYLD_ENVIRONMENT",
        LC_MAIN => "LC_MAIN",
        LC_DATA_IN_CODE => "LC_DATA_IN_CODE",
        LC_SOURCE_VERSION => "LC_SOURCE_VERSION",
        LC_DYLIB_CODE_SIGN_DRS => "LC_DYLIB_CODE_SIGN_DRS",
        LC_ENCRYPTION_INFO_64 => "LC_ENCRYPTION_INFO_64",
        LC_LINKER_OPTION => "LC_LINKER_OPTION",
        LC_LINKER_OPTIMIZATION_HINT => "LC_LINKER_OPTIMIZATION_HINT",
        LC_VERSION_MIN_TVOS => "LC_VERSION_MIN_TVOS",
        LC_VERSION_MIN_WATCHOS => "LC_VERSION_MIN_WATCHOS",
        LC_NOTE => "LC_NOTE",
        LC_BUILD_VERSION => "LC_BUILD_VERSION",
        LC_DYLD_EXPORTS_TRIE => "LC_DYLD_EXPORTS_TRIE",
        LC_DYLD_CHAINED_FIXUPS => "LC_DYLD_CHAINED_FIXUPS",
        LC_FILESET_ENTRY => "LC_FILESET_ENTRY",
        LC_ATOM_INFO => "LC_ATOM_INFO",
        LC_FUNCTION_VARIANTS => "LC_FUNCTION_VARIANTS",
        LC_FUNCTION_VARIANT_FIXED => "LC_FUNCTION_VARIANT_FIXED",
        LC_TARGET_TRIPLE => "LC_TARGET_TRIPLE",
        _ => "UNKNOWN_LOAD_COMMAND",
    }
}

pub fn print_load_commands(load_commands: &[LoadCommand]) {
    println!();
    println!("{} {}", "Load Commands Found: ".green().bold(), load_commands.len());
    println!("----------------------------------------");
    for lc in load_commands {
        println!(
            " - {:<30} cmd=0x{:08x} size={}",
            load_command_name(lc.cmd),
            lc.cmd,
            lc.cmdsize
        );
    }
    println!("----------------------------------------");
    println!();
}

pub fn read_load_commands(
    data: &[u8],
    offset: u32,
    num_load_commands: u32,
    sizeofcmds: u32,
    word_size: u32, // 32 or 64,
    big_endian: bool,
) -> Result<Vec<LoadCommand>> {
    let mut load_commands: Vec<LoadCommand> = Vec::new();
    let mut cursor = offset as usize;
    let region_end = offset as usize + sizeofcmds as usize;

    if word_size != 32 && word_size != 64 {
        return Err(MachoError::UnsupportedFormat {
            what: "word size other than 32 or 64",
        });
    }

    let alignment = if word_size == 64 { 8 } else { 4 };

    for i in 0..num_load_commands {
        if cursor + 8 > data.len() {
            return Err(MachoError::MalformedLoadCommand {
                index: i as usize,
                reason: "header exceeds file bounds".to_string(),
            });
        }

        let cmd: u32 = utils::bytes_to(big_endian, &data[cursor..])?;
        let cmd_size: u32 = utils::bytes_to(big_endian, &data[cursor + 4..])?;

        if cmd_size < 8 {
            return Err(MachoError::MalformedLoadCommand {
                index: i as usize,
                reason: format!("invalid cmdsize of {cmd_size}"),
            });
        }

        if cmd_size % alignment != 0 {
            return Err(MachoError::MalformedLoadCommand {
                index: i as usize,
                reason: format!("cmdsize {cmd_size} is not {alignment}-byte aligned"),
            });
        }

        if cursor + cmd_size as usize > data.len() {
            return Err(MachoError::MalformedLoadCommand {
                index: i as usize,
                reason: "exceeds file bounds".to_string(),
            });
        }

        if cursor + cmd_size as usize > region_end {
            return Err(MachoError::MalformedLoadCommand {
                index: i as usize,
                reason: format!("cmdsize {cmd_size} overruns sizeofcmds"),
            });
        }

        load_commands.push(LoadCommand {
            cmd,
            cmdsize: cmd_size,
            offset: cursor as u64,
        });

        cursor += cmd_size as usize;
    }

    if cursor != region_end {
        return Err(MachoError::MalformedLoadCommand {
            index: load_commands.len(),
            reason: format!("commands sum to {} bytes, sizeofcmds declared {sizeofcmds}", cursor - offset as usize),
        });
    }

    Ok(load_commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lc_bytes(cmd: u32, cmdsize: u32, extra: &[u8]) -> Vec<u8> {
        let mut v = cmd.to_le_bytes().to_vec();
        v.extend_from_slice(&cmdsize.to_le_bytes());
        v.extend_from_slice(extra);
        v.resize(cmdsize as usize, 0);
        v
    }

    #[test]
    fn walks_two_commands() {
        let mut data = lc_bytes(LC_UUID, 24, &[]);
        data.extend(lc_bytes(LC_RPATH, 16, &[]));

        let cmds = read_load_commands(&data, 0, 2, 40, 64, false).unwrap();
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0].cmd, LC_UUID);
        assert_eq!(cmds[0].offset, 0);
        assert_eq!(cmds[1].offset, 24);
        assert_eq!(load_command_name(cmds[1].cmd), "LC_RPATH");
    }

    #[test]
    fn rejects_misaligned_cmdsize() {
        let data = lc_bytes(LC_UUID, 17, &[]);
        assert!(matches!(
            read_load_commands(&data, 0, 1, 24, 64, false),
            Err(MachoError::MalformedLoadCommand { .. })
        ));
    }

    #[test]
    fn rejects_command_past_eof() {
        let data = lc_bytes(LC_UUID, 24, &[])[..16].to_vec();
        assert!(matches!(
            read_load_commands(&data, 0, 1, 24, 64, false),
            Err(MachoError::MalformedLoadCommand { .. })
        ));
    }

    #[test]
    fn rejects_cmdsize_overrunning_sizeofcmds() {
        // One LC_SEGMENT_64 declares cmdsize=80 but sizeofcmds only allots 72 bytes,
        // so the command would read 8 bytes past its declared region.
        let mut data = lc_bytes(LC_SEGMENT_64, 80, &[]);
        data.resize(88, 0); // enough actual file bytes that only the sizeofcmds bound catches it
        assert!(matches!(
            read_load_commands(&data, 0, 1, 72, 64, false),
            Err(MachoError::MalformedLoadCommand { .. })
        ));
    }

    #[test]
    fn rejects_commands_summing_short_of_sizeofcmds() {
        let data = lc_bytes(LC_UUID, 24, &[]);
        assert!(matches!(
            read_load_commands(&data, 0, 1, 48, 64, false),
            Err(MachoError::MalformedLoadCommand { .. })
        ));
    }
}
