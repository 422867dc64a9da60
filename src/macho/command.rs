// File Purpose: tagged dispatch over `LoadCommand.cmd`. Each load command we know
// how to interpret gets its own decoder module; this is the single switch that
// hands a raw `LoadCommand` off to the right one.

use crate::error::Result;
use crate::macho::build_version::{self, ParsedBuildVersion};
use crate::macho::constants::*;
use crate::macho::dyld_info::{self, ParsedDyldInfo};
use crate::macho::dylibs::{self, ParsedDylib};
use crate::macho::dylinker::{self, ParsedDylinker};
use crate::macho::dysymtab::{self, ParsedDysymtab};
use crate::macho::entry_point::{self, ParsedEntryPoint};
use crate::macho::linkedit_data::{self, LinkeditDataKind, ParsedLinkeditData};
use crate::macho::load_commands::LoadCommand;
use crate::macho::rpaths::{self, ParsedRPath};
use crate::macho::segments::{self, ParsedSegment};
use crate::macho::symtab::{self, ParsedSymtabCommand};
use crate::macho::utils;
use crate::macho::uuid::{self, ParsedUuid};
use crate::macho::version::decode_version_u64;

#[derive(Debug, Clone)]
pub enum Command {
    Segment(ParsedSegment),
    Symtab(ParsedSymtabCommand),
    Dysymtab(ParsedDysymtab),
    Dylib(ParsedDylib),
    Dylinker(ParsedDylinker),
    Rpath(ParsedRPath),
    Uuid(ParsedUuid),
    BuildVersion(ParsedBuildVersion),
    SourceVersion { version: String, source_lc: LoadCommand },
    DyldInfo(ParsedDyldInfo),
    EntryPoint(ParsedEntryPoint),
    LinkeditData(ParsedLinkeditData),
    /// Recognized, but not yet given a dedicated decoder (e.g. LC_THREAD, LC_ROUTINES*).
    Unrecognized(LoadCommand),
}

fn read_source_version(data: &[u8], lc: &LoadCommand, is_be: bool) -> Result<String> {
    let base = lc.offset as usize;
    let raw: u64 = utils::bytes_to(is_be, &data[base + 8..])?;
    Ok(decode_version_u64(raw))
}

pub fn decode_command(data: &[u8], lc: &LoadCommand, is_be: bool) -> Result<Command> {
    let cmd = lc.cmd;

    if cmd == LC_SEGMENT || cmd == LC_SEGMENT_64 {
        return Ok(Command::Segment(segments::parse_segment(data, lc, is_be)?));
    }
    if cmd == LC_SYMTAB {
        return Ok(Command::Symtab(symtab::read_symtab_command(data, lc, is_be)?));
    }
    if cmd == LC_DYSYMTAB {
        return Ok(Command::Dysymtab(dysymtab::read_dysymtab(data, lc, is_be)?));
    }
    if matches!(
        cmd,
        LC_LOAD_DYLIB | LC_ID_DYLIB | LC_LOAD_WEAK_DYLIB | LC_REEXPORT_DYLIB | LC_LAZY_LOAD_DYLIB | LC_LOAD_UPWARD_DYLIB
    ) {
        return Ok(Command::Dylib(dylibs::parse_dylib(data, lc, is_be)?));
    }
    if matches!(cmd, LC_LOAD_DYLINKER | LC_ID_DYLINKER | LC_DYLD_ENVIRONMENT) {
        return Ok(Command::Dylinker(dylinker::parse_dylinker(data, lc, is_be)?));
    }
    if cmd == LC_RPATH {
        return Ok(Command::Rpath(rpaths::parse_rpath(data, lc, is_be)?));
    }
    if cmd == LC_UUID {
        return Ok(Command::Uuid(uuid::read_uuid(data, lc)?));
    }
    if cmd == LC_BUILD_VERSION {
        return Ok(Command::BuildVersion(build_version::read_build_version(data, lc, is_be)?));
    }
    if cmd == LC_SOURCE_VERSION {
        return Ok(Command::SourceVersion {
            version: read_source_version(data, lc, is_be)?,
            source_lc: *lc,
        });
    }
    if cmd == LC_DYLD_INFO || cmd == LC_DYLD_INFO_ONLY {
        return Ok(Command::DyldInfo(dyld_info::read_dyld_info(data, lc, is_be)?));
    }
    if cmd == LC_MAIN {
        return Ok(Command::EntryPoint(entry_point::read_entry_point(data, lc, is_be)?));
    }
    if LinkeditDataKind::is_member(cmd) {
        return Ok(Command::LinkeditData(linkedit_data::read_linkedit_data(data, lc, is_be)?));
    }

    Ok(Command::Unrecognized(*lc))
}
