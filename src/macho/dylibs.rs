// File Purpose: What does the binary depend on?

// From mach-o's loader.h

use crate::error::{MachoError, Result};
use crate::macho::constants::{
    LC_ID_DYLIB, LC_LAZY_LOAD_DYLIB, LC_LOAD_DYLIB, LC_LOAD_UPWARD_DYLIB, LC_LOAD_WEAK_DYLIB, LC_REEXPORT_DYLIB,
};
use crate::macho::load_commands::{load_command_name, LoadCommand};
use crate::macho::utils;
use crate::reporting::dylibs::DylibReport;
use crate::reporting::load_commands::LoadCommandReport;
use colored::Colorize;

/*

dylib_command memory layout
+-----------------------------+
| cmd (u32)                   |
| cmdsize (u32)               |
| dylib.name.offset (u32)     | <-- offset from its respective command
| dylib.timestamp (u32)       |
| dylib.current_version (u32) |
| dylib.compat_version (u32)  |
| "path/to/lib.dylib\0"       | <-- variable length, padded
+-----------------------------+

*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DylibKind {
    Id,
    Load,
    Weak,
    Reexport,
    Lazy,
    Upward,
    Unknown,
}

impl DylibKind {
    pub fn name(self) -> &'static str {
        match self {
            DylibKind::Id => "ID",
            DylibKind::Load => "LOAD",
            DylibKind::Weak => "WEAK",
            DylibKind::Reexport => "REEXPORT",
            DylibKind::Lazy => "LAZY",
            DylibKind::Upward => "UPWARD",
            DylibKind::Unknown => "UNKNOWN",
        }
    }
}

// dylib fields:
/*
    The `name` is an lc_str in loader.h so we gotta look at `lc_str` in loader.h
    union lc_str {
        uint32_t	offset;	/* offset to the string */
    #ifndef __LP64__
        char		*ptr;	/* pointer to the string */
    #endif
    };

    Thus, we make name here a u32 which is the offset from the
    start of the load command its used in

    name: u32, // offset, library's path name
    timestamp: u32, // library's build time stamp
    current_version: u32, //library's current version number
    compatibility_version: u32, // library's compatibility version number
*/
#[derive(Debug, Clone)]
pub struct ParsedDylib {
    pub path: String,
    pub timestamp: u32,
    pub current_version: u32,
    pub compatibility_version: u32,
    pub kind: DylibKind,
    pub source_lc: LoadCommand,
}

impl ParsedDylib {
    pub fn build_report(&self, _json: bool) -> DylibReport {
        DylibReport {
            path: self.path.clone(),
            timestamp: self.timestamp,
            current_version: self.current_version,
            compatibility_version: self.compatibility_version,
            kind: self.kind.name().to_string(),
            load_command: LoadCommandReport {
                command: load_command_name(self.source_lc.cmd).to_string(),
                cmd: self.source_lc.cmd,
                size: self.source_lc.cmdsize,
            },
        }
    }
}

pub fn parse_dylib(data: &[u8], lc: &LoadCommand, is_be: bool) -> Result<ParsedDylib> {
    let base = lc.offset as usize;
    let end = base + lc.cmdsize as usize;

    if end > data.len() {
        return Err(MachoError::MalformedLoadCommand {
            index: 0,
            reason: "dylib load command exceeds file bounds".to_string(),
        });
    }

    let name_offset: u32 = utils::bytes_to(is_be, &data[base + 8..])?;
    let timestamp: u32 = utils::bytes_to(is_be, &data[base + 12..])?;
    let current_version: u32 = utils::bytes_to(is_be, &data[base + 16..])?;
    let compat_version: u32 = utils::bytes_to(is_be, &data[base + 20..])?;

    let path = utils::read_lc_str(data, base, end, name_offset)?;

    let kind = match lc.cmd {
        LC_ID_DYLIB => DylibKind::Id,
        LC_LOAD_DYLIB => DylibKind::Load,
        LC_LOAD_WEAK_DYLIB => DylibKind::Weak,
        LC_REEXPORT_DYLIB => DylibKind::Reexport,
        LC_LAZY_LOAD_DYLIB => DylibKind::Lazy,
        LC_LOAD_UPWARD_DYLIB => DylibKind::Upward,
        _ => DylibKind::Unknown,
    };

    Ok(ParsedDylib {
        path,
        timestamp,
        current_version,
        compatibility_version: compat_version,
        kind,
        source_lc: *lc,
    })
}

pub fn print_dylibs_summary(dylibs: &[ParsedDylib]) {
    println!("{}", "\nDynamic Libraries".green().bold());
    println!("----------------------------------------");

    for dylib in dylibs {
        let kind = match dylib.kind {
            DylibKind::Unknown => dylib.kind.name().red().bold(),
            _ => dylib.kind.name().yellow().bold(),
        };

        println!("[{:<8}] {}", kind, dylib.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_load_dylib_path() {
        let mut data = LC_LOAD_DYLIB.to_le_bytes().to_vec();
        let path = b"/usr/lib/libSystem.B.dylib\0";
        let cmdsize = (24 + path.len()).next_multiple_of(8) as u32;
        data.extend_from_slice(&cmdsize.to_le_bytes());
        data.extend_from_slice(&24u32.to_le_bytes()); // name offset
        data.extend_from_slice(&2u32.to_le_bytes()); // timestamp
        data.extend_from_slice(&1u32.to_le_bytes()); // current_version
        data.extend_from_slice(&1u32.to_le_bytes()); // compat_version
        data.extend_from_slice(path);
        data.resize(cmdsize as usize, 0);

        let lc = LoadCommand { cmd: LC_LOAD_DYLIB, cmdsize, offset: 0 };
        let dylib = parse_dylib(&data, &lc, false).unwrap();
        assert_eq!(dylib.path, "/usr/lib/libSystem.B.dylib");
        assert_eq!(dylib.kind, DylibKind::Load);
    }
}
