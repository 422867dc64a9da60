use std::error::Error;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use regex::Regex;

use moscope::macho::constants;
use moscope::macho::dylibs::print_dylibs_summary;
use moscope::macho::fat::FatArch;
use moscope::macho::load_commands::print_load_commands;
use moscope::macho::memory_image::MachOMemoryImage;
use moscope::macho::rpaths::print_rpaths_summary;
use moscope::macho::sections::SectionKind;
use moscope::macho::symtab::extract_strings_from_section;
use moscope::macho::{Macho, MachOFile, MachOKind};
use moscope::reporting::macho::{build_architecture_report, build_macho_report, ReportOptions};

#[derive(Parser, Debug)]
#[command(name = "moscope", version, about = "Mach-O static analysis and inspection toolkit")]
struct Cli {
    /// Path to the Mach-O binary to inspect
    #[arg(value_name = "BINARY")]
    binary: PathBuf,

    /// Which architecture slice of a fat binary to inspect (e.g. "arm64", "x86_64").
    /// Prompts interactively when omitted and the binary is fat.
    #[arg(long)]
    arch: Option<String>,

    /// Emit a serde_json report instead of colorized terminal output
    #[arg(long)]
    json: bool,

    /// Only show symbols/strings whose name matches this regex
    #[arg(long, value_name = "PATTERN")]
    filter: Option<String>,

    #[arg(long)]
    header: bool,
    #[arg(long = "load-commands")]
    load_commands: bool,
    #[arg(long)]
    segments: bool,
    #[arg(long)]
    dylibs: bool,
    #[arg(long)]
    rpaths: bool,
    #[arg(long)]
    symbols: bool,
    #[arg(long)]
    strings: bool,
}

impl Cli {
    /// No section flag given at all means "show everything".
    fn report_options(&self) -> ReportOptions {
        let any = self.header
            || self.load_commands
            || self.segments
            || self.dylibs
            || self.rpaths
            || self.symbols
            || self.strings;

        ReportOptions {
            include_header: !any || self.header,
            include_loadcmds: !any || self.load_commands,
            include_segments: !any || self.segments,
            include_dylibs: !any || self.dylibs,
            include_rpaths: !any || self.rpaths,
            include_symbols: !any || self.symbols,
            include_strings: !any || self.strings,
        }
    }
}

fn decode_arm64_subtype(cpusubtype: i32) -> &'static str {
    let base = cpusubtype & !constants::CPU_SUBTYPE_MASK;
    let has_ptrauth = (cpusubtype & constants::CPU_SUBTYPE_PTRAUTH_ABI) != 0;

    if has_ptrauth {
        "arm64e"
    } else {
        match base {
            constants::CPU_SUBTYPE_ARM64_ALL | constants::CPU_SUBTYPE_ARM64_V8 => "arm64",
            _ => "arm64 (unknown subtype)",
        }
    }
}

fn display_arch(cputype: i32, cpusubtype: i32) -> (&'static str, &'static str) {
    let cpu = constants::cpu_type_name(cputype);
    let subtype = match cputype {
        constants::CPU_TYPE_ARM64 => decode_arm64_subtype(cpusubtype),
        _ => constants::cpu_subtype_name(cputype, cpusubtype),
    };
    (cpu, subtype)
}

/// Picks which fat_arch entry to inspect: `--arch` matches the cpu type or
/// subtype name case-insensitively; with no flag and a TTY, prompts.
fn select_arch(archs: &[FatArch], requested: Option<&str>) -> Result<usize, Box<dyn Error>> {
    if let Some(name) = requested {
        let name = name.to_lowercase();
        for (i, arch) in archs.iter().enumerate() {
            let (cpu, sub) = display_arch(arch.cputype(), arch.cpusubtype());
            if cpu.to_lowercase() == name || sub.to_lowercase() == name {
                return Ok(i);
            }
        }
        return Err(format!("no architecture matching '{name}' in this fat binary").into());
    }

    println!("{}", "Available architectures:".green());
    for (i, arch) in archs.iter().enumerate() {
        let (cpu, sub) = display_arch(arch.cputype(), arch.cpusubtype());
        println!("{i}: {cpu} ({sub})");
    }

    if !io::stdin().is_terminal() {
        return Ok(0);
    }

    print!("Select architecture index: ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().parse()?)
}

fn collect_strings(macho: &Macho) -> Vec<moscope::macho::symtab::ParsedString> {
    let segments: Vec<_> = macho.segments().into_iter().cloned().collect();
    let image = MachOMemoryImage::new(&segments, macho.data(), macho.slice_offset());
    let mut strings = Vec::new();
    for section in macho.sections() {
        if section.kind != SectionKind::CString {
            continue;
        }
        if let Some(bytes) = image.read_section(section) {
            strings.extend(extract_strings_from_section(bytes, section));
        }
    }
    strings
}

fn print_header_summary(macho: &Macho) {
    println!("{}", "\nHeader".green().bold());
    println!("----------------------------------------");
    println!("File type:    {}", macho.header.filetype_name());
    println!("CPU type:     {}", macho.header.cpu_type_name());
    println!("CPU subtype:  {}", macho.header.cpu_subtype_name());
    println!("Load commands: {} ({} bytes)", macho.header.ncmds(), macho.header.sizeofcmds());
    println!("Flags:        {}", macho.header.flag_names().join(", "));
    if let Some(uuid) = macho.uuid() {
        println!("UUID:         {}", uuid.to_string_hyphenated());
    }
    if let Some(bv) = macho.build_version() {
        println!("Platform:     {} (min {}, sdk {})", bv.platform_name(), bv.minos, bv.sdk);
    }
    if let Some(ep) = macho.entry_point() {
        println!("Entry point:  file offset 0x{:x}", ep.entryoff);
    }
}

fn print_segments_summary(macho: &Macho) {
    use moscope::macho::segments::prot_string;

    println!("{}", "\nSegments".green().bold());
    println!("----------------------------------------");
    for seg in macho.segments() {
        println!(
            "{:<16} vmaddr=0x{:x} vmsize=0x{:x} {}/{}",
            seg.name(),
            seg.vmaddr,
            seg.vmsize,
            prot_string(seg.initprot),
            prot_string(seg.maxprot)
        );
        for section in &seg.sections {
            println!("  {:<16} addr=0x{:x} size=0x{:x} {:?}", section.name(), section.addr, section.size, section.kind);
        }
    }
}

fn print_symbols_summary(macho: &Macho, filter: Option<&Regex>) -> Result<(), Box<dyn Error>> {
    let symbols = macho.symbols()?;
    println!("{}", "\nSymbols".green().bold());
    println!("----------------------------------------");
    for sym in &symbols {
        if let Some(re) = filter {
            if !re.is_match(&sym.name) {
                continue;
            }
        }
        let kind = if sym.external { "T".yellow() } else { "t".normal() };
        println!("[{}] 0x{:016x} {}", kind, sym.value, sym.name);
    }
    Ok(())
}

fn print_strings_summary(strings: &[moscope::macho::symtab::ParsedString], filter: Option<&Regex>) {
    println!("{}", "\nStrings".green().bold());
    println!("----------------------------------------");
    for s in strings {
        if let Some(re) = filter {
            if !re.is_match(&s.value) {
                continue;
            }
        }
        println!("[{}] {}", s.sectname, s.value);
    }
}

fn report_one(macho: &Macho, opts: &ReportOptions, json: bool) -> Result<moscope::reporting::macho::ArchitectureReport, Box<dyn Error>> {
    let symbols = macho.symbols()?;
    let strings = collect_strings(macho);
    let segments = macho.segments().into_iter().cloned().collect::<Vec<_>>();
    let dylibs = macho.dylibs().into_iter().cloned().collect::<Vec<_>>();
    let rpaths = macho.rpaths().into_iter().cloned().collect::<Vec<_>>();

    Ok(build_architecture_report(
        macho.header.cputype(),
        macho.header.cpusubtype(),
        &macho.header,
        &macho.load_commands,
        &segments,
        &dylibs,
        &rpaths,
        &symbols,
        &strings,
        json,
        opts,
    ))
}

fn inspect_macho(macho: &Macho, cli: &Cli) -> Result<(), Box<dyn Error>> {
    let opts = cli.report_options();
    let filter = cli.filter.as_deref().map(Regex::new).transpose()?;

    if cli.json {
        let report = report_one(macho, &opts, true)?;
        let whole = build_macho_report(false, vec![report]);
        println!("{}", serde_json::to_string_pretty(&whole)?);
        return Ok(());
    }

    if opts.include_header {
        print_header_summary(macho);
    }
    if opts.include_loadcmds {
        print_load_commands(&macho.load_commands);
    }
    if opts.include_segments {
        print_segments_summary(macho);
    }
    if opts.include_dylibs {
        let dylibs = macho.dylibs().into_iter().cloned().collect::<Vec<_>>();
        print_dylibs_summary(&dylibs);
    }
    if opts.include_rpaths {
        let rpaths = macho.rpaths().into_iter().cloned().collect::<Vec<_>>();
        print_rpaths_summary(&rpaths);
    }
    if opts.include_symbols {
        print_symbols_summary(macho, filter.as_ref())?;
    }
    if opts.include_strings {
        let strings = collect_strings(macho);
        print_strings_summary(&strings, filter.as_ref());
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let file = MachOFile::open(&cli.binary)
        .map_err(|e| format!("failed to read '{}': {}", cli.binary.display(), e))?;

    match file.parse()? {
        MachOKind::Thin(macho) => {
            println!("{}", "Thin Mach-O binary".green());
            inspect_macho(&macho, &cli)?;
        }
        MachOKind::Fat { header, slices } => {
            println!("{}", "Fat binary detected:".green());
            println!("{} architectures ({})", slices.len(), if header.kind.is_64() { "fat_arch_64" } else { "fat_arch" });

            let archs: Vec<FatArch> = slices.iter().map(|s| s.arch).collect();
            let index = select_arch(&archs, cli.arch.as_deref())?;
            let slice = slices.get(index).ok_or("architecture index out of range")?;
            inspect_macho(&slice.macho, &cli)?;
        }
    }

    Ok(())
}
