// File Purpose: the parsed, queryable view of a single Mach-O image (one arch
// slice of a fat binary, or the whole file for a thin one).

use regex::Regex;

use crate::error::Result;
use crate::macho::build_version::ParsedBuildVersion;
use crate::macho::command::{decode_command, Command};
use crate::macho::dyld_info::ParsedDyldInfo;
use crate::macho::dylibs::ParsedDylib;
use crate::macho::dysymtab::ParsedDysymtab;
use crate::macho::entry_point::ParsedEntryPoint;
use crate::macho::header::{read_thin_header, MachOHeader, MachOSlice};
use crate::macho::linkedit_data::{LinkeditDataKind, ParsedLinkeditData};
use crate::macho::load_commands::{read_load_commands, LoadCommand};
use crate::macho::rpaths::ParsedRPath;
use crate::macho::sections::ParsedSection;
use crate::macho::segments::ParsedSegment;
use crate::macho::symtab::{self, ParsedSymbol, ParsedSymtabCommand};
use crate::macho::uuid::ParsedUuid;

/// A single parsed Mach-O image. Borrows the bytes it was built from; for a fat
/// binary this is one arch's slice of the whole file.
pub struct Macho<'a> {
    data: &'a [u8],
    slice_offset: u64,
    pub header: MachOHeader,
    pub is_be: bool,
    pub load_commands: Vec<LoadCommand>,
    pub commands: Vec<Command>,
}

impl<'a> Macho<'a> {
    /// Parses a thin Mach-O image starting at offset 0 of `data`.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        Self::parse_at(data, MachOSlice { offset: 0, size: data.len() as u64 })
    }

    /// Parses a thin Mach-O image living at `slice` within a larger buffer (the
    /// arch slice carved out of a fat binary).
    pub fn parse_at(data: &'a [u8], slice: MachOSlice) -> Result<Self> {
        let (header, is_be) = read_thin_header(data, &slice)?;
        let header_size = header.size();
        let word_size = if header.is_64() { 64 } else { 32 };

        let load_commands = read_load_commands(
            data,
            slice.offset as u32 + header_size as u32,
            header.ncmds(),
            header.sizeofcmds(),
            word_size,
            is_be,
        )?;

        let commands = load_commands
            .iter()
            .map(|lc| decode_command(data, lc, is_be))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { data, slice_offset: slice.offset, header, is_be, load_commands, commands })
    }

    /// Offset of this image's own bytes within the buffer it was parsed from
    /// (nonzero for an arch slice carved out of a fat binary).
    pub fn slice_offset(&self) -> u64 {
        self.slice_offset
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn find_command(&self, cmd: u32) -> Option<&Command> {
        self.commands.iter().find(|c| matches!(c, Command::Unrecognized(lc) if lc.cmd == cmd))
            .or_else(|| self.commands.iter().find(|c| self.command_cmd(c) == Some(cmd)))
    }

    fn command_cmd(&self, command: &Command) -> Option<u32> {
        match command {
            Command::Segment(s) => Some(s.source_lc.cmd),
            Command::Symtab(s) => Some(s.source_lc.cmd),
            Command::Dysymtab(s) => Some(s.source_lc.cmd),
            Command::Dylib(s) => Some(s.source_lc.cmd),
            Command::Dylinker(s) => Some(s.source_lc.cmd),
            Command::Rpath(s) => Some(s.source_lc.cmd),
            Command::Uuid(s) => Some(s.source_lc.cmd),
            Command::BuildVersion(s) => Some(s.source_lc.cmd),
            Command::SourceVersion { source_lc, .. } => Some(source_lc.cmd),
            Command::DyldInfo(s) => Some(s.source_lc.cmd),
            Command::EntryPoint(s) => Some(s.source_lc.cmd),
            Command::LinkeditData(s) => Some(s.source_lc.cmd),
            Command::Unrecognized(lc) => Some(lc.cmd),
        }
    }

    pub fn find_all(&self, cmd: u32) -> Vec<&Command> {
        self.commands.iter().filter(|c| self.command_cmd(c) == Some(cmd)).collect()
    }

    pub fn segments(&self) -> Vec<&ParsedSegment> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Segment(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn sections(&self) -> Vec<&ParsedSection> {
        self.segments().into_iter().flat_map(|s| s.sections.iter()).collect()
    }

    pub fn dylibs(&self) -> Vec<&ParsedDylib> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Dylib(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn rpaths(&self) -> Vec<&ParsedRPath> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Rpath(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn uuid(&self) -> Option<&ParsedUuid> {
        self.commands.iter().find_map(|c| match c {
            Command::Uuid(u) => Some(u),
            _ => None,
        })
    }

    pub fn entry_point(&self) -> Option<&ParsedEntryPoint> {
        self.commands.iter().find_map(|c| match c {
            Command::EntryPoint(e) => Some(e),
            _ => None,
        })
    }

    pub fn build_version(&self) -> Option<&ParsedBuildVersion> {
        self.commands.iter().find_map(|c| match c {
            Command::BuildVersion(b) => Some(b),
            _ => None,
        })
    }

    pub fn source_version(&self) -> Option<&str> {
        self.commands.iter().find_map(|c| match c {
            Command::SourceVersion { version, .. } => Some(version.as_str()),
            _ => None,
        })
    }

    pub fn dyld_info(&self) -> Option<&ParsedDyldInfo> {
        self.commands.iter().find_map(|c| match c {
            Command::DyldInfo(d) => Some(d),
            _ => None,
        })
    }

    pub fn dysymtab(&self) -> Option<&ParsedDysymtab> {
        self.commands.iter().find_map(|c| match c {
            Command::Dysymtab(d) => Some(d),
            _ => None,
        })
    }

    pub fn symtab(&self) -> Option<&ParsedSymtabCommand> {
        self.commands.iter().find_map(|c| match c {
            Command::Symtab(s) => Some(s),
            _ => None,
        })
    }

    pub fn linkedit_data(&self, kind: LinkeditDataKind) -> Vec<&ParsedLinkeditData> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::LinkeditData(l) if l.kind == kind => Some(l),
                _ => None,
            })
            .collect()
    }

    /// Decodes the symbol table, if this image carries an `LC_SYMTAB`.
    pub fn symbols(&self) -> Result<Vec<ParsedSymbol>> {
        match self.symtab() {
            Some(symtab) => symtab::read_symbols(self.data, self.is_be, self.header.is_64(), symtab),
            None => Ok(Vec::new()),
        }
    }

    pub fn find_symbol(&self, name: &str) -> Result<Option<ParsedSymbol>> {
        let symbols = self.symbols()?;
        Ok(symtab::find_symbol(&symbols, name).cloned())
    }

    pub fn symbols_matching(&self, pattern: &Regex) -> Result<Vec<ParsedSymbol>> {
        let symbols = self.symbols()?;
        Ok(symtab::symbols_matching(&symbols, pattern).into_iter().cloned().collect())
    }
}
