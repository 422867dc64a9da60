use moscope::error::MachoError;
use moscope::macho::constants::{
    CPU_SUBTYPE_ARM64_ALL, CPU_SUBTYPE_X86_64_ALL, CPU_TYPE_ARM64, CPU_TYPE_X86_64, LC_BUILD_VERSION, LC_LOAD_DYLIB,
    LC_SEGMENT_64, LC_SYMTAB, LC_UUID, MH_EXECUTE, MH_MAGIC, MH_MAGIC_64, PLATFORM_IOS, TOOL_LD,
};
use moscope::macho::{MachOFile, MachOKind};

/*
===============================
======== Thin Binaries ========
===============================
*/

fn header64_bytes(cputype: i32, cpusubtype: i32, filetype: u32, ncmds: u32, sizeofcmds: u32) -> Vec<u8> {
    let mut v = MH_MAGIC_64.to_vec();
    v.extend_from_slice(&(cputype as u32).to_le_bytes());
    v.extend_from_slice(&(cpusubtype as u32).to_le_bytes());
    v.extend_from_slice(&filetype.to_le_bytes());
    v.extend_from_slice(&ncmds.to_le_bytes());
    v.extend_from_slice(&sizeofcmds.to_le_bytes());
    v.extend_from_slice(&0u32.to_le_bytes()); // flags
    v.extend_from_slice(&0u32.to_le_bytes()); // reserved
    v
}

fn lc_segment64_bytes(name: &str) -> Vec<u8> {
    let mut v = vec![0u8; 72];
    v[0..4].copy_from_slice(&LC_SEGMENT_64.to_le_bytes());
    v[4..8].copy_from_slice(&72u32.to_le_bytes());
    let bytes = name.as_bytes();
    v[8..8 + bytes.len()].copy_from_slice(bytes);
    v[24..32].copy_from_slice(&0x1_0000_0000u64.to_le_bytes()); // vmaddr
    v[32..40].copy_from_slice(&0x4000u64.to_le_bytes()); // vmsize
    // nsects = 0, flags = 0
    v
}

fn lc_uuid_bytes(bytes16: [u8; 16]) -> Vec<u8> {
    let mut v = LC_UUID.to_le_bytes().to_vec();
    v.extend_from_slice(&24u32.to_le_bytes());
    v.extend_from_slice(&bytes16);
    v
}

fn lc_build_version_bytes(platform: u32, minos: u32, sdk: u32, tool: u32, tool_version: u32) -> Vec<u8> {
    let mut v = LC_BUILD_VERSION.to_le_bytes().to_vec();
    v.extend_from_slice(&32u32.to_le_bytes());
    v.extend_from_slice(&platform.to_le_bytes());
    v.extend_from_slice(&minos.to_le_bytes());
    v.extend_from_slice(&sdk.to_le_bytes());
    v.extend_from_slice(&1u32.to_le_bytes()); // ntools
    v.extend_from_slice(&tool.to_le_bytes());
    v.extend_from_slice(&tool_version.to_le_bytes());
    v
}

fn lc_load_dylib_bytes(path: &str) -> Vec<u8> {
    let name = path.as_bytes();
    let cmdsize = (24 + name.len() + 1).next_multiple_of(8) as u32;
    let mut v = LC_LOAD_DYLIB.to_le_bytes().to_vec();
    v.extend_from_slice(&cmdsize.to_le_bytes());
    v.extend_from_slice(&24u32.to_le_bytes()); // name offset
    v.extend_from_slice(&2u32.to_le_bytes()); // timestamp
    v.extend_from_slice(&0x10000u32.to_le_bytes()); // current_version
    v.extend_from_slice(&0x10000u32.to_le_bytes()); // compat_version
    v.extend_from_slice(name);
    v.push(0);
    v.resize(cmdsize as usize, 0);
    v
}

fn lc_symtab_bytes(symoff: u32, nsyms: u32, stroff: u32, strsize: u32) -> Vec<u8> {
    let mut v = LC_SYMTAB.to_le_bytes().to_vec();
    v.extend_from_slice(&24u32.to_le_bytes());
    v.extend_from_slice(&symoff.to_le_bytes());
    v.extend_from_slice(&nsyms.to_le_bytes());
    v.extend_from_slice(&stroff.to_le_bytes());
    v.extend_from_slice(&strsize.to_le_bytes());
    v
}

/// Header + concatenated load commands, with `ncmds`/`sizeofcmds` filled in to match.
fn thin_binary(cputype: i32, cpusubtype: i32, commands: &[Vec<u8>]) -> Vec<u8> {
    let sizeofcmds: u32 = commands.iter().map(|c| c.len() as u32).sum();
    let mut data = header64_bytes(cputype, cpusubtype, MH_EXECUTE, commands.len() as u32, sizeofcmds);
    for cmd in commands {
        data.extend_from_slice(cmd);
    }
    data
}

#[test]
fn minimal_arm64_executable_has_one_segment_and_no_dylibs_or_uuid() {
    let data = thin_binary(CPU_TYPE_ARM64, CPU_SUBTYPE_ARM64_ALL, &[lc_segment64_bytes("__TEXT")]);
    let file = MachOFile::from_bytes(data);

    match file.parse().expect("should parse") {
        MachOKind::Thin(macho) => {
            assert_eq!(macho.header.ncmds(), 1);
            assert_eq!(macho.header.sizeofcmds(), 72);
            assert_eq!(macho.segments().len(), 1);
            assert_eq!(macho.segments()[0].name(), "__TEXT");
            assert!(macho.dylibs().is_empty());
            assert!(macho.uuid().is_none());
        }
        MachOKind::Fat { .. } => panic!("expected a thin binary"),
    }
}

#[test]
fn uuid_round_trips_to_hyphenated_string() {
    let bytes16 = [
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F, 0x10,
    ];
    let data = thin_binary(CPU_TYPE_X86_64, CPU_SUBTYPE_X86_64_ALL, &[lc_uuid_bytes(bytes16)]);
    let file = MachOFile::from_bytes(data);

    match file.parse().unwrap() {
        MachOKind::Thin(macho) => {
            let uuid = macho.uuid().expect("uuid command should be present");
            assert_eq!(uuid.to_string_hyphenated(), "01020304-0506-0708-090A-0B0C0D0E0F10");
        }
        MachOKind::Fat { .. } => unreachable!(),
    }
}

#[test]
fn build_version_decodes_platform_minos_sdk_and_tool() {
    let minos = (14u32 << 16) | (4 << 8); // 14.4.0
    let sdk = 15u32 << 16; // 15.0.0
    let tool_version = 520u32 << 16; // 520.0.0
    let data = thin_binary(
        CPU_TYPE_ARM64,
        CPU_SUBTYPE_ARM64_ALL,
        &[lc_build_version_bytes(PLATFORM_IOS, minos, sdk, TOOL_LD, tool_version)],
    );
    let file = MachOFile::from_bytes(data);

    match file.parse().unwrap() {
        MachOKind::Thin(macho) => {
            let bv = macho.build_version().expect("build version command should be present");
            assert_eq!(bv.platform_name(), "iOS");
            assert_eq!(bv.minos, "14.4.0");
            assert_eq!(bv.sdk, "15.0.0");
            assert_eq!(bv.tools.len(), 1);
        }
        MachOKind::Fat { .. } => unreachable!(),
    }
}

#[test]
fn load_dylib_command_yields_dylib_entry_with_exact_name() {
    let data = thin_binary(
        CPU_TYPE_X86_64,
        CPU_SUBTYPE_X86_64_ALL,
        &[lc_load_dylib_bytes("/usr/lib/libSystem.B.dylib")],
    );
    let file = MachOFile::from_bytes(data);

    match file.parse().unwrap() {
        MachOKind::Thin(macho) => {
            let dylibs = macho.dylibs();
            assert_eq!(dylibs.len(), 1);
            assert_eq!(dylibs[0].path, "/usr/lib/libSystem.B.dylib");
        }
        MachOKind::Fat { .. } => unreachable!(),
    }
}

#[test]
fn zero_load_commands_yields_empty_list_with_no_error() {
    let data = thin_binary(CPU_TYPE_X86_64, CPU_SUBTYPE_X86_64_ALL, &[]);
    let file = MachOFile::from_bytes(data);

    match file.parse().unwrap() {
        MachOKind::Thin(macho) => {
            assert_eq!(macho.header.ncmds(), 0);
            assert_eq!(macho.header.sizeofcmds(), 0);
            assert!(macho.commands.is_empty());
        }
        MachOKind::Fat { .. } => unreachable!(),
    }
}

#[test]
fn symtab_with_zero_symbols_yields_empty_symbol_list() {
    let data = thin_binary(CPU_TYPE_X86_64, CPU_SUBTYPE_X86_64_ALL, &[lc_symtab_bytes(0, 0, 0, 0)]);
    let file = MachOFile::from_bytes(data);

    match file.parse().unwrap() {
        MachOKind::Thin(macho) => {
            assert!(macho.symbols().unwrap().is_empty());
        }
        MachOKind::Fat { .. } => unreachable!(),
    }
}

#[test]
fn oversized_cmdsize_is_rejected_as_malformed() {
    let mut seg = lc_segment64_bytes("__TEXT");
    // Claim a cmdsize far past what's actually in the buffer.
    seg[4..8].copy_from_slice(&4096u32.to_le_bytes());
    let data = thin_binary(CPU_TYPE_ARM64, CPU_SUBTYPE_ARM64_ALL, &[seg]);
    let file = MachOFile::from_bytes(data);

    assert!(matches!(file.parse(), Err(MachoError::MalformedLoadCommand { .. })));
}

#[test]
fn truncated_sizeofcmds_fails_without_a_partial_object_escaping() {
    let mut data = header64_bytes(CPU_TYPE_ARM64, CPU_SUBTYPE_ARM64_ALL, MH_EXECUTE, 1, 72);
    data.extend_from_slice(&lc_segment64_bytes("__TEXT"));
    data.truncate(data.len() - 16); // chop the tail off the segment command

    let file = MachOFile::from_bytes(data);
    assert!(file.parse().is_err());
}

#[test]
fn thin32_magic_is_detected_but_declined_not_decoded() {
    let file = MachOFile::from_bytes(MH_MAGIC.to_vec());
    assert!(matches!(file.parse(), Err(MachoError::UnsupportedFormat { .. })));
}

/*
========================================
======== Fat/Universal Binaries ========
========================================
*/

fn fat_arch32_bytes(cputype: i32, cpusubtype: i32, offset: u32, size: u32) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&(cputype as u32).to_be_bytes());
    v.extend_from_slice(&(cpusubtype as u32).to_be_bytes());
    v.extend_from_slice(&offset.to_be_bytes());
    v.extend_from_slice(&size.to_be_bytes());
    v.extend_from_slice(&0u32.to_be_bytes()); // align
    v
}

#[test]
fn fat_binary_with_two_slices_each_independently_parseable() {
    let arm_slice = thin_binary(CPU_TYPE_ARM64, CPU_SUBTYPE_ARM64_ALL, &[lc_segment64_bytes("__TEXT")]);
    let x86_slice = thin_binary(CPU_TYPE_X86_64, CPU_SUBTYPE_X86_64_ALL, &[lc_segment64_bytes("__TEXT")]);

    // fat_header (8) + two fat_arch (20 each) = 48, then each slice page-aligned at 4096.
    let arm_offset = 4096u32;
    let x86_offset = arm_offset + 4096;

    let mut data = vec![0xCA, 0xFE, 0xBA, 0xBE];
    data.extend_from_slice(&2u32.to_be_bytes()); // nfat_arch
    data.extend_from_slice(&fat_arch32_bytes(CPU_TYPE_ARM64, CPU_SUBTYPE_ARM64_ALL, arm_offset, arm_slice.len() as u32));
    data.extend_from_slice(&fat_arch32_bytes(CPU_TYPE_X86_64, CPU_SUBTYPE_X86_64_ALL, x86_offset, x86_slice.len() as u32));

    data.resize(arm_offset as usize, 0);
    data.extend_from_slice(&arm_slice);
    data.resize(x86_offset as usize, 0);
    data.extend_from_slice(&x86_slice);

    let file = MachOFile::from_bytes(data);
    match file.parse().expect("should parse as fat") {
        MachOKind::Thin(_) => panic!("expected a fat binary"),
        MachOKind::Fat { header, slices } => {
            assert_eq!(header.nfat_arch, 2);
            assert_eq!(slices.len(), 2);

            let arm = slices.iter().find(|s| s.arch.cputype() == CPU_TYPE_ARM64).expect("arm64 slice");
            assert_eq!(arm.macho.segments().len(), 1);

            let x86 = slices.iter().find(|s| s.arch.cputype() == CPU_TYPE_X86_64).expect("x86_64 slice");
            assert_eq!(x86.macho.segments().len(), 1);
        }
    }
}

#[test]
fn big_endian_thin_magic_is_recognized_outside_a_fat_container() {
    let mut data = MH_MAGIC_64.to_vec();
    data.extend_from_slice(&(CPU_TYPE_ARM64 as u32).to_be_bytes());
    data.extend_from_slice(&(CPU_SUBTYPE_ARM64_ALL as u32).to_be_bytes());
    data.extend_from_slice(&MH_EXECUTE.to_be_bytes());
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(&0u32.to_be_bytes());

    let file = MachOFile::from_bytes(data);
    match file.parse().unwrap() {
        MachOKind::Thin(macho) => assert!(macho.is_be),
        MachOKind::Fat { .. } => panic!("expected thin"),
    }
}
