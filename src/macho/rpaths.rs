// File Purpose: Where is the dynamic loader looking for libraries at runtime?

use crate::error::{MachoError, Result};
use crate::macho::load_commands::{load_command_name, LoadCommand};
use crate::macho::utils;
use crate::reporting::rpaths::RPathsReport;
use colored::Colorize;

#[derive(Debug, Clone)]
pub struct ParsedRPath {
    pub source_lc: LoadCommand,
    pub path: String,
}

impl ParsedRPath {
    pub fn build_report(&self, _is_json: bool) -> RPathsReport {
        RPathsReport {
            source_lc: load_command_name(self.source_lc.cmd).to_string(),
            path: self.path.clone(),
        }
    }
}

pub fn parse_rpath(data: &[u8], lc: &LoadCommand, is_be: bool) -> Result<ParsedRPath> {
    let base = lc.offset as usize;
    let end = base + lc.cmdsize as usize;

    if end > data.len() {
        return Err(MachoError::MalformedLoadCommand {
            index: 0,
            reason: "LC_RPATH exceeds file bounds".to_string(),
        });
    }

    // We can reuse pretty much all of the dylib reading code here
    let path_offset: u32 = utils::bytes_to(is_be, &data[base + 8..])?;
    let rpath = utils::read_lc_str(data, base, end, path_offset)?;

    Ok(ParsedRPath { source_lc: *lc, path: rpath })
}

pub fn print_rpaths_summary(rpaths: &[ParsedRPath]) {
    if rpaths.is_empty() {
        return;
    }

    println!("{}", "\nRPATHs".green().bold());
    println!("----------------------------------------");

    for rpath in rpaths {
        println!("[{}] {}", "RPATH".yellow().bold(), rpath.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macho::constants::LC_RPATH;

    #[test]
    fn parses_rpath_string() {
        let mut data = LC_RPATH.to_le_bytes().to_vec();
        let path = b"@executable_path/../Frameworks\0";
        let cmdsize = (12 + path.len()).next_multiple_of(8) as u32;
        data.extend_from_slice(&cmdsize.to_le_bytes());
        data.extend_from_slice(&12u32.to_le_bytes());
        data.extend_from_slice(path);
        data.resize(cmdsize as usize, 0);

        let lc = LoadCommand { cmd: LC_RPATH, cmdsize, offset: 0 };
        let rpath = parse_rpath(&data, &lc, false).unwrap();
        assert_eq!(rpath.path, "@executable_path/../Frameworks");
    }
}
