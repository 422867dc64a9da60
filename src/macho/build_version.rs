// File Purpose: LC_BUILD_VERSION - which platform this binary targets, its min OS /
// SDK version, and the toolchain that produced it.

use crate::error::{MachoError, Result};
use crate::macho::constants::{platform_name, tool_name};
use crate::macho::load_commands::LoadCommand;
use crate::macho::utils;
use crate::macho::version::decode_version_u32;

const BUILD_VERSION_COMMAND_SIZE: usize = 24;
const BUILD_TOOL_VERSION_SIZE: usize = 8;

#[derive(Debug, Clone)]
pub struct ParsedBuildToolVersion {
    pub tool: u32,
    pub version: String,
}

#[derive(Debug, Clone)]
pub struct ParsedBuildVersion {
    pub platform: u32,
    pub minos: String,
    pub sdk: String,
    pub tools: Vec<ParsedBuildToolVersion>,
    pub source_lc: LoadCommand,
}

impl ParsedBuildVersion {
    pub fn platform_name(&self) -> String {
        platform_name(self.platform)
    }
}

pub fn read_build_version(data: &[u8], lc: &LoadCommand, is_be: bool) -> Result<ParsedBuildVersion> {
    let base = lc.offset as usize;
    if base + BUILD_VERSION_COMMAND_SIZE > data.len() {
        return Err(MachoError::Truncated {
            what: "build_version_command",
            offset: lc.offset,
            len: BUILD_VERSION_COMMAND_SIZE as u64,
            bound: data.len() as u64,
        });
    }

    let platform: u32 = utils::bytes_to(is_be, &data[base + 8..])?;
    let minos: u32 = utils::bytes_to(is_be, &data[base + 12..])?;
    let sdk: u32 = utils::bytes_to(is_be, &data[base + 16..])?;
    let ntools: u32 = utils::bytes_to(is_be, &data[base + 20..])?;

    let tools_start = base + BUILD_VERSION_COMMAND_SIZE;
    let end = tools_start + ntools as usize * BUILD_TOOL_VERSION_SIZE;
    let bound = base + lc.cmdsize as usize;
    if end > bound || end > data.len() {
        return Err(MachoError::MalformedLoadCommand {
            index: 0,
            reason: format!("{ntools} build tool versions exceed cmdsize"),
        });
    }

    let mut tools = Vec::with_capacity(ntools as usize);
    for i in 0..ntools {
        let off = tools_start + i as usize * BUILD_TOOL_VERSION_SIZE;
        let tool: u32 = utils::bytes_to(is_be, &data[off..])?;
        let version: u32 = utils::bytes_to(is_be, &data[off + 4..])?;
        tools.push(ParsedBuildToolVersion {
            tool,
            version: decode_version_u32(version),
        });
    }

    Ok(ParsedBuildVersion {
        platform,
        minos: decode_version_u32(minos),
        sdk: decode_version_u32(sdk),
        tools,
        source_lc: *lc,
    })
}

pub fn tool_version_name(tool: &ParsedBuildToolVersion) -> String {
    format!("{} {}", tool_name(tool.tool), tool.version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macho::constants::{LC_BUILD_VERSION, PLATFORM_MACOS, TOOL_LD};

    #[test]
    fn reads_build_version_with_one_tool() {
        let cmdsize = (BUILD_VERSION_COMMAND_SIZE + BUILD_TOOL_VERSION_SIZE) as u32;
        let mut data = LC_BUILD_VERSION.to_le_bytes().to_vec();
        data.extend_from_slice(&cmdsize.to_le_bytes());
        data.extend_from_slice(&PLATFORM_MACOS.to_le_bytes());
        data.extend_from_slice(&((11u32 << 16) | (0 << 8)).to_le_bytes()); // minos 11.0.0
        data.extend_from_slice(&((11u32 << 16) | (1 << 8)).to_le_bytes()); // sdk 11.1.0
        data.extend_from_slice(&1u32.to_le_bytes()); // ntools
        data.extend_from_slice(&TOOL_LD.to_le_bytes());
        data.extend_from_slice(&((820u32 << 16) | (1 << 8)).to_le_bytes());

        let lc = LoadCommand { cmd: LC_BUILD_VERSION, cmdsize, offset: 0 };
        let bv = read_build_version(&data, &lc, false).unwrap();
        assert_eq!(bv.platform_name(), "macOS");
        assert_eq!(bv.minos, "11.0.0");
        assert_eq!(bv.tools.len(), 1);
        assert_eq!(tool_version_name(&bv.tools[0]), "LD 820.1.0");
    }
}
