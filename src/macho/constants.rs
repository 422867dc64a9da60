// File Purpose: Mach-O and Fat (Universal) binary constants.
// Constants were taken from the wikipedia page on Dec 16, 2025
// https://web.archive.org/web/20250000000000*/https://en.wikipedia.org/wiki/Mach-O
// and cross-checked against <mach-o/loader.h> / <mach-o/fat.h> / <mach/machine.h>.

//
// ------------------------------------------------------------
// Mach-O magic numbers (on-disk byte order)
// ------------------------------------------------------------
// These are the first 4 bytes as they appear in the file.
//
// "$(xcrun --sdk macosx --show-sdk-path)/usr/include/mach-o/fat.h"

/// 32-bit Mach-O, big-endian (MH_MAGIC = 0xfeedface)
pub const MH_MAGIC: [u8; 4] = [0xFE, 0xED, 0xFA, 0xCE];

/// 32-bit Mach-O, little-endian (MH_CIGAM = 0xcefaedfe)
pub const MH_CIGAM: [u8; 4] = [0xCE, 0xFA, 0xED, 0xFE];

/// 64-bit Mach-O, big-endian (MH_MAGIC_64 = 0xfeedfacf)
pub const MH_MAGIC_64: [u8; 4] = [0xFE, 0xED, 0xFA, 0xCF];

/// 64-bit Mach-O, little-endian (MH_CIGAM_64 = 0xcffaedfe)
pub const MH_CIGAM_64: [u8; 4] = [0xCF, 0xFA, 0xED, 0xFE];

//
// ------------------------------------------------------------
// Fat / Universal binary magic numbers
// ------------------------------------------------------------
//

/// Fat binary (32 bit offsets/sizes in fat arch table), big-endian
pub const FAT_MAGIC: [u8; 4] = [0xCA, 0xFE, 0xBA, 0xBE];

/// Fat binary (32 bit offsets/sizes in fat arch table), little-endian
pub const FAT_CIGAM: [u8; 4] = [0xBE, 0xBA, 0xFE, 0xCA];

/// Fat binary (64 bit offsets/sizes in fat arch table), big-endian
pub const FAT_MAGIC_64: [u8; 4] = [0xCA, 0xFE, 0xBA, 0xBF];

/// Fat binary (64 bit offsets/sizes in fat arch table), little-endian
pub const FAT_CIGAM_64: [u8; 4] = [0xBF, 0xBA, 0xFE, 0xCA];

pub const FAT_HEADER_SIZE: usize = 8;
pub const FAT_ARCH32_SIZE: usize = 20;
pub const FAT_ARCH64_SIZE: usize = 32;
pub const MACH_HEADER64_SIZE: usize = 32;

//
// ------------------------------------------------------------
// CPU architecture ABI flags
// ------------------------------------------------------------

/// CPU uses a 64-bit ABI
pub const CPU_ARCH_ABI64: i32 = 0x0100_0000;

/// CPU uses a 64-bit ABI with 32-bit pointers
pub const CPU_ARCH_ABI64_32: i32 = 0x0200_0000;

//
// ------------------------------------------------------------
// CPU types
// ------------------------------------------------------------

pub const CPU_TYPE_ANY: i32 = -1;
pub const CPU_TYPE_VAX: i32 = 0x0000_0001;
pub const CPU_TYPE_ROMP: i32 = 0x0000_0002;
pub const CPU_TYPE_NS32032: i32 = 0x0000_0004;
pub const CPU_TYPE_NS32332: i32 = 0x0000_0005;
pub const CPU_TYPE_MC680X0: i32 = 0x0000_0006;
pub const CPU_TYPE_X86: i32 = 0x0000_0007;
pub const CPU_TYPE_MIPS: i32 = 0x0000_0008;
pub const CPU_TYPE_NS32352: i32 = 0x0000_0009;
pub const CPU_TYPE_HPPA: i32 = 0x0000_000B;
pub const CPU_TYPE_ARM: i32 = 0x0000_000C;
pub const CPU_TYPE_MC88000: i32 = 0x0000_000D;
pub const CPU_TYPE_SPARC: i32 = 0x0000_000E;
pub const CPU_TYPE_I860_BIG: i32 = 0x0000_000F;
pub const CPU_TYPE_I860_LITTLE: i32 = 0x0000_0010; // or DEC Alpha
pub const CPU_TYPE_RS6000: i32 = 0x0000_0011;
pub const CPU_TYPE_POWERPC: i32 = 0x0000_0012;
pub const CPU_TYPE_RISCV: i32 = 0x0000_0018;

/// Common combined CPU types
pub const CPU_TYPE_X86_64: i32 = CPU_TYPE_X86 | CPU_ARCH_ABI64;
pub const CPU_TYPE_POWERPC64: i32 = CPU_TYPE_POWERPC | CPU_ARCH_ABI64;
pub const CPU_TYPE_ARM64: i32 = CPU_TYPE_ARM | CPU_ARCH_ABI64;
pub const CPU_TYPE_ARM64_32: i32 = CPU_TYPE_ARM | CPU_ARCH_ABI64_32;

//
// ------------------------------------------------------------
// CPU subtype masks
// ------------------------------------------------------------
/// Mask for extracting the subtype capability bits

// pub const CPU_SUBTYPE_MASK: i32 = 0xff00_0000;
// This mask value ^ exceeds i32 value
// so we gotta two's comp. it
pub const CPU_SUBTYPE_MASK: i32 = -0x0100_0000;

//
// ------------------------------------------------------------
// ARM CPU subtypes
// ------------------------------------------------------------

pub const CPU_SUBTYPE_ARM_ALL: i32 = 0x0000_0000;
pub const CPU_SUBTYPE_ARM_A500: i32 = 0x0000_0001;
pub const CPU_SUBTYPE_ARM_A500_2: i32 = 0x0000_0002;
pub const CPU_SUBTYPE_ARM_A440: i32 = 0x0000_0003;
pub const CPU_SUBTYPE_ARM_M4: i32 = 0x0000_0004;
pub const CPU_SUBTYPE_ARM_V4T: i32 = 0x0000_0005;
pub const CPU_SUBTYPE_ARM_V6: i32 = 0x0000_0006;
pub const CPU_SUBTYPE_ARM_V5TEJ: i32 = 0x0000_0007;
pub const CPU_SUBTYPE_ARM_XSCALE: i32 = 0x0000_0008;
pub const CPU_SUBTYPE_ARM_V7: i32 = 0x0000_0009;
pub const CPU_SUBTYPE_ARM_V7F: i32 = 0x0000_000A;
pub const CPU_SUBTYPE_ARM_V7S: i32 = 0x0000_000B;
pub const CPU_SUBTYPE_ARM_V7K: i32 = 0x0000_000C;
pub const CPU_SUBTYPE_ARM_V8: i32 = 0x0000_000D;
pub const CPU_SUBTYPE_ARM_V6M: i32 = 0x0000_000E;
pub const CPU_SUBTYPE_ARM_V7M: i32 = 0x0000_000F;
pub const CPU_SUBTYPE_ARM_V7EM: i32 = 0x0000_0010;

// ------------------------------------------------------------
// ARM64 CPU subtypes (from <mach/machine.h>)
// ------------------------------------------------------------

/// Pointer authentication ABI flag (arm64e)
//pub const CPU_SUBTYPE_PTRAUTH_ABI: i32 = 0x8000_0000;
pub const CPU_SUBTYPE_PTRAUTH_ABI: i32 = i32::MIN;

/// ARM64 subtypes
pub const CPU_SUBTYPE_ARM64_ALL: i32 = 0;
pub const CPU_SUBTYPE_ARM64_V8: i32 = 1;
pub const CPU_SUBTYPE_ARM64E: i32 = 2;

//
// ------------------------------------------------------------
// x86 CPU subtypes
// ------------------------------------------------------------

pub const CPU_SUBTYPE_X86_ALL: i32 = 0x0000_0003;
pub const CPU_SUBTYPE_X86_64_ALL: i32 = 0x0000_0003;
pub const CPU_SUBTYPE_X86_ARCH1: i32 = 0x0000_0004;
pub const CPU_SUBTYPE_X86_64_H: i32 = 0x0000_0008;
pub const CPU_SUBTYPE_X86_486: i32 = 0x0000_0004;
pub const CPU_SUBTYPE_X86_486SX: i32 = 0x0000_0084;
pub const CPU_SUBTYPE_X86_PENTIUM_M5: i32 = 0x0000_0056;
pub const CPU_SUBTYPE_X86_CELERON: i32 = 0x0000_0067;
pub const CPU_SUBTYPE_X86_CELERON_MOBILE: i32 = 0x0000_0077;
pub const CPU_SUBTYPE_X86_PENTIUM_3: i32 = 0x0000_0008;
pub const CPU_SUBTYPE_X86_PENTIUM_3_M: i32 = 0x0000_0018;
pub const CPU_SUBTYPE_X86_PENTIUM_3_XEON: i32 = 0x0000_0028;
pub const CPU_SUBTYPE_X86_PENTIUM_4: i32 = 0x0000_000A;
pub const CPU_SUBTYPE_X86_ITANIUM: i32 = 0x0000_000B;
pub const CPU_SUBTYPE_X86_ITANIUM_2: i32 = 0x0000_001B;
pub const CPU_SUBTYPE_X86_XEON: i32 = 0x0000_000C;
pub const CPU_SUBTYPE_X86_XEON_MP: i32 = 0x0000_001C;

//
// ------------------------------------------------------------
// Mach-O file types
// ------------------------------------------------------------

pub const MH_OBJECT: u32 = 0x0000_0001;
pub const MH_EXECUTE: u32 = 0x0000_0002;
pub const MH_FVMLIB: u32 = 0x0000_0003;
pub const MH_CORE: u32 = 0x0000_0004;
pub const MH_PRELOAD: u32 = 0x0000_0005;
pub const MH_DYLIB: u32 = 0x0000_0006;
pub const MH_DYLINKER: u32 = 0x0000_0007;
pub const MH_BUNDLE: u32 = 0x0000_0008;
pub const MH_DYLIB_STUB: u32 = 0x0000_0009;
pub const MH_DSYM: u32 = 0x0000_000A;
pub const MH_KEXT_BUNDLE: u32 = 0x0000_000B;
pub const MH_FILESET: u32 = 0x0000_000C;

//
// ------------------------------------------------------------
// Mach-O header flags
// ------------------------------------------------------------

pub const MH_NOUNDEFS: u32 = 1 << 0;
pub const MH_INCRLINK: u32 = 1 << 1;
pub const MH_DYLDLINK: u32 = 1 << 2;
pub const MH_BINDATLOAD: u32 = 1 << 3;
pub const MH_PREBOUND: u32 = 1 << 4;
pub const MH_SPLIT_SEGS: u32 = 1 << 5;
pub const MH_LAZY_INIT: u32 = 1 << 6;
pub const MH_TWOLEVEL: u32 = 1 << 7;
pub const MH_FORCE_FLAT: u32 = 1 << 8;
pub const MH_NOMULTIDEFS: u32 = 1 << 9;
pub const MH_NOFIXPREBINDING: u32 = 1 << 10;
pub const MH_PREBINDABLE: u32 = 1 << 11;
pub const MH_ALLMODSBOUND: u32 = 1 << 12;
pub const MH_SUBSECTIONS_VIA_SYMBOLS: u32 = 1 << 13;
pub const MH_CANONICAL: u32 = 1 << 14;
pub const MH_WEAK_DEFINES: u32 = 1 << 15;
pub const MH_BINDS_TO_WEAK: u32 = 1 << 16;
pub const MH_ALLOW_STACK_EXECUTION: u32 = 1 << 17;
pub const MH_ROOT_SAFE: u32 = 1 << 18;
pub const MH_SETUID_SAFE: u32 = 1 << 19;
pub const MH_NO_REEXPORTED_DYLIBS: u32 = 1 << 20;
pub const MH_PIE: u32 = 1 << 21;
pub const MH_DEAD_STRIPPABLE_DYLIB: u32 = 1 << 22;
pub const MH_HAS_TLV_DESCRIPTORS: u32 = 1 << 23;
pub const MH_NO_HEAP_EXECUTION: u32 = 1 << 24;
pub const MH_APP_EXTENSION_SAFE: u32 = 1 << 25;
pub const MH_NLIST_OUTOFSYNC_WITH_DYLDINFO: u32 = 1 << 26;
pub const MH_SIM_SUPPORT: u32 = 1 << 27;
pub const MH_DYLIB_IN_CACHE: u32 = 1 << 31;

pub const ALL_MH_FLAGS: &[(u32, &str)] = &[
    (MH_NOUNDEFS, "MH_NOUNDEFS"),
    (MH_INCRLINK, "MH_INCRLINK"),
    (MH_DYLDLINK, "MH_DYLDLINK"),
    (MH_BINDATLOAD, "MH_BINDATLOAD"),
    (MH_PREBOUND, "MH_PREBOUND"),
    (MH_SPLIT_SEGS, "MH_SPLIT_SEGS"),
    (MH_LAZY_INIT, "MH_LAZY_INIT"),
    (MH_TWOLEVEL, "MH_TWOLEVEL"),
    (MH_FORCE_FLAT, "MH_FORCE_FLAT"),
    (MH_NOMULTIDEFS, "MH_NOMULTIDEFS"),
    (MH_NOFIXPREBINDING, "MH_NOFIXPREBINDING"),
    (MH_PREBINDABLE, "MH_PREBINDABLE"),
    (MH_ALLMODSBOUND, "MH_ALLMODSBOUND"),
    (MH_SUBSECTIONS_VIA_SYMBOLS, "MH_SUBSECTIONS_VIA_SYMBOLS"),
    (MH_CANONICAL, "MH_CANONICAL"),
    (MH_WEAK_DEFINES, "MH_WEAK_DEFINES"),
    (MH_BINDS_TO_WEAK, "MH_BINDS_TO_WEAK"),
    (MH_ALLOW_STACK_EXECUTION, "MH_ALLOW_STACK_EXECUTION"),
    (MH_ROOT_SAFE, "MH_ROOT_SAFE"),
    (MH_SETUID_SAFE, "MH_SETUID_SAFE"),
    (MH_NO_REEXPORTED_DYLIBS, "MH_NO_REEXPORTED_DYLIBS"),
    (MH_PIE, "MH_PIE"),
    (MH_DEAD_STRIPPABLE_DYLIB, "MH_DEAD_STRIPPABLE_DYLIB"),
    (MH_HAS_TLV_DESCRIPTORS, "MH_HAS_TLV_DESCRIPTORS"),
    (MH_NO_HEAP_EXECUTION, "MH_NO_HEAP_EXECUTION"),
    (MH_APP_EXTENSION_SAFE, "MH_APP_EXTENSION_SAFE"),
    (
        MH_NLIST_OUTOFSYNC_WITH_DYLDINFO,
        "MH_NLIST_OUTOFSYNC_WITH_DYLDINFO",
    ),
    (MH_SIM_SUPPORT, "MH_SIM_SUPPORT"),
    (MH_DYLIB_IN_CACHE, "MH_DYLIB_IN_CACHE"),
];

//
// ------------------------------------------------------------
// Load command types
// ------------------------------------------------------------
// The high bit (LC_REQ_DYLD) marks commands dyld must understand to load the
// binary at all; it's masked off before matching on the base command.

pub const LC_REQ_DYLD: u32 = 0x8000_0000;

pub const LC_SEGMENT: u32 = 0x1;
pub const LC_SYMTAB: u32 = 0x2;
pub const LC_SYMSEG: u32 = 0x3;
pub const LC_THREAD: u32 = 0x4;
pub const LC_UNIXTHREAD: u32 = 0x5;
pub const LC_LOADFVMLIB: u32 = 0x6;
pub const LC_IDFVMLIB: u32 = 0x7;
pub const LC_IDENT: u32 = 0x8;
pub const LC_FVMFILE: u32 = 0x9;
pub const LC_PREPAGE: u32 = 0xa;
pub const LC_DYSYMTAB: u32 = 0xb;
pub const LC_LOAD_DYLIB: u32 = 0xc;
pub const LC_ID_DYLIB: u32 = 0xd;
pub const LC_LOAD_DYLINKER: u32 = 0xe;
pub const LC_ID_DYLINKER: u32 = 0xf;
pub const LC_PREBOUND_DYLIB: u32 = 0x10;
pub const LC_ROUTINES: u32 = 0x11;
pub const LC_SUB_FRAMEWORK: u32 = 0x12;
pub const LC_SUB_UMBRELLA: u32 = 0x13;
pub const LC_SUB_CLIENT: u32 = 0x14;
pub const LC_SUB_LIBRARY: u32 = 0x15;
pub const LC_TWOLEVEL_HINTS: u32 = 0x16;
pub const LC_PREBIND_CKSUM: u32 = 0x17;
pub const LC_LOAD_WEAK_DYLIB: u32 = 0x18 | LC_REQ_DYLD;
pub const LC_SEGMENT_64: u32 = 0x19;
pub const LC_ROUTINES_64: u32 = 0x1a;
pub const LC_UUID: u32 = 0x1b;
pub const LC_RPATH: u32 = 0x1c | LC_REQ_DYLD;
pub const LC_CODE_SIGNATURE: u32 = 0x1d;
pub const LC_SEGMENT_SPLIT_INFO: u32 = 0x1e;
pub const LC_REEXPORT_DYLIB: u32 = 0x1f | LC_REQ_DYLD;
pub const LC_LAZY_LOAD_DYLIB: u32 = 0x20;
pub const LC_ENCRYPTION_INFO: u32 = 0x21;
pub const LC_DYLD_INFO: u32 = 0x22;
pub const LC_DYLD_INFO_ONLY: u32 = 0x22 | LC_REQ_DYLD;
pub const LC_LOAD_UPWARD_DYLIB: u32 = 0x23 | LC_REQ_DYLD;
pub const LC_VERSION_MIN_MACOSX: u32 = 0x24;
pub const LC_VERSION_MIN_IPHONEOS: u32 = 0x25;
pub const LC_FUNCTION_STARTS: u32 = 0x26;
pub const LC_DYLD_ENVIRONMENT: u32 = 0x27;
pub const LC_MAIN: u32 = 0x28 | LC_REQ_DYLD;
pub const LC_DATA_IN_CODE: u32 = 0x29;
pub const LC_SOURCE_VERSION: u32 = 0x2A;
pub const LC_DYLIB_CODE_SIGN_DRS: u32 = 0x2B;
pub const LC_ENCRYPTION_INFO_64: u32 = 0x2C;
pub const LC_LINKER_OPTION: u32 = 0x2D;
pub const LC_LINKER_OPTIMIZATION_HINT: u32 = 0x2E;
pub const LC_VERSION_MIN_TVOS: u32 = 0x2F;
pub const LC_VERSION_MIN_WATCHOS: u32 = 0x30;
pub const LC_NOTE: u32 = 0x31;
pub const LC_BUILD_VERSION: u32 = 0x32;
pub const LC_DYLD_EXPORTS_TRIE: u32 = 0x33 | LC_REQ_DYLD;
pub const LC_DYLD_CHAINED_FIXUPS: u32 = 0x34 | LC_REQ_DYLD;
pub const LC_FILESET_ENTRY: u32 = 0x35 | LC_REQ_DYLD;
pub const LC_ATOM_INFO: u32 = 0x36;
pub const LC_FUNCTION_VARIANTS: u32 = 0x37;
pub const LC_FUNCTION_VARIANT_FIXED: u32 = 0x38;
pub const LC_TARGET_TRIPLE: u32 = 0x39;

//
// ------------------------------------------------------------
// Build-version platforms and tools (LC_BUILD_VERSION)
// ------------------------------------------------------------

pub const PLATFORM_MACOS: u32 = 1;
pub const PLATFORM_IOS: u32 = 2;
pub const PLATFORM_TVOS: u32 = 3;
pub const PLATFORM_WATCHOS: u32 = 4;
pub const PLATFORM_BRIDGEOS: u32 = 5;
pub const PLATFORM_MACCATALYST: u32 = 6;
pub const PLATFORM_IOSSIMULATOR: u32 = 7;
pub const PLATFORM_TVOSSIMULATOR: u32 = 8;
pub const PLATFORM_WATCHOSSIMULATOR: u32 = 9;
pub const PLATFORM_DRIVERKIT: u32 = 10;

pub const TOOL_CLANG: u32 = 1;
pub const TOOL_SWIFT: u32 = 2;
pub const TOOL_LD: u32 = 3;

//
// ------------------------------------------------------------
// Section flags (relevant subset)
// ------------------------------------------------------------

pub const SECTION_TYPE: u32 = 0x0000_00ff;
pub const S_REGULAR: u32 = 0x0;
pub const S_ZEROFILL: u32 = 0x1;
pub const S_CSTRING_LITERALS: u32 = 0x2;
pub const S_NON_LAZY_SYMBOL_POINTERS: u32 = 0x6;
pub const S_LAZY_SYMBOL_POINTERS: u32 = 0x7;
pub const S_SYMBOL_STUBS: u32 = 0x8;
pub const S_MOD_INIT_FUNC_POINTERS: u32 = 0x9;
pub const S_MOD_TERM_FUNC_POINTERS: u32 = 0xa;

pub const SEG_TEXT: [u8; 16] = *b"__TEXT\0\0\0\0\0\0\0\0\0\0";
pub const SECT_TEXT: [u8; 16] = *b"__text\0\0\0\0\0\0\0\0\0\0";
pub const SEG_LINKEDIT: [u8; 16] = *b"__LINKEDIT\0\0\0\0\0\0";

//
// ------------------------------------------------------------
// nlist n_type bit groups (<mach-o/nlist.h>)
// ------------------------------------------------------------

pub const N_STAB: u8 = 0xe0;
pub const N_PEXT: u8 = 0x10;
pub const N_TYPE: u8 = 0x0e;
pub const N_EXT: u8 = 0x01;

pub const N_UNDF: u8 = 0x0;
pub const N_ABS: u8 = 0x2;
pub const N_SECT: u8 = 0xe;
pub const N_PBUD: u8 = 0xc;
pub const N_INDR: u8 = 0xa;

//
// ------------------------------------------------------------
// Name tables
// ------------------------------------------------------------

pub fn cpu_type_name(cputype: i32) -> &'static str {
    match cputype & !CPU_ARCH_ABI64 & !CPU_ARCH_ABI64_32 {
        CPU_TYPE_X86 => {
            if cputype & CPU_ARCH_ABI64 != 0 {
                "x86_64"
            } else {
                "x86"
            }
        }
        CPU_TYPE_ARM => {
            if cputype & CPU_ARCH_ABI64 != 0 {
                "ARM64"
            } else if cputype & CPU_ARCH_ABI64_32 != 0 {
                "ARM64_32"
            } else {
                "ARM"
            }
        }
        CPU_TYPE_POWERPC => "PowerPC",
        CPU_TYPE_RISCV => "RISC-V",
        CPU_TYPE_SPARC => "SPARC",
        CPU_TYPE_HPPA => "HP-PA",
        CPU_TYPE_MC680X0 => "MC680x0",
        CPU_TYPE_MC88000 => "MC88000",
        _ if cputype == CPU_TYPE_ANY => "ANY",
        _ => "Unknown",
    }
}

pub fn cpu_subtype_name(cputype: i32, cpusubtype: i32) -> &'static str {
    // cputype: The CPU architecture type from the Mach-O header
    //   - Contains the base CPU type (ARM, x86, etc.) in the lower bits
    //   - May have CPU_ARCH_ABI64 (0x01000000) flag set in upper bits for 64-bit architectures
    //   - Example: CPU_TYPE_ARM64 = 0x0100000C (ARM with 64-bit ABI flag)
    //
    // cpusubtype: The specific CPU variant/generation
    //   - Contains capability flags in the upper bits (masked by CPU_SUBTYPE_MASK)
    //   - Contains the actual subtype value in the lower bits
    //   - Example for arm64e: 0x80000002 = CPU_SUBTYPE_PTRAUTH_ABI | CPU_SUBTYPE_ARM64E

    match cputype {
        // CPU_TYPE_ARM64 = 0x0100000C (CPU_TYPE_ARM | CPU_ARCH_ABI64)
        CPU_TYPE_ARM64 => {
            // CPU_SUBTYPE_PTRAUTH_ABI = 0x80000000 (i32::MIN as signed value)
            // This is the high bit that indicates PAC support (arm64e)
            if (cpusubtype & CPU_SUBTYPE_PTRAUTH_ABI) != 0 {
                "arm64e"
            } else {
                let subtype = cpusubtype & !CPU_SUBTYPE_MASK;
                match subtype {
                    CPU_SUBTYPE_ARM64_V8 => "arm64",
                    CPU_SUBTYPE_ARM64_ALL => "arm64 (generic)",
                    _ => "ARM64 (unknown subtype)",
                }
            }
        }

        // CPU_TYPE_ARM = 0x0000000C
        CPU_TYPE_ARM => {
            let subtype = cpusubtype & !CPU_SUBTYPE_MASK;
            match subtype {
                CPU_SUBTYPE_ARM_V7 => "ARMv7",
                CPU_SUBTYPE_ARM_V7S => "ARMv7s",
                CPU_SUBTYPE_ARM_V7K => "ARMv7k",
                CPU_SUBTYPE_ARM_V8 => "ARMv8",
                CPU_SUBTYPE_ARM_V6 => "ARMv6",
                CPU_SUBTYPE_ARM_ALL => "ARM (generic)",
                _ => "ARM (unknown subtype)",
            }
        }

        // CPU_TYPE_X86_64 = 0x01000007 (CPU_TYPE_X86 | CPU_ARCH_ABI64)
        CPU_TYPE_X86_64 => {
            let subtype = cpusubtype & !CPU_SUBTYPE_MASK;
            match subtype {
                CPU_SUBTYPE_X86_64_H => "x86_64h",
                CPU_SUBTYPE_X86_64_ALL => "x86_64",
                _ => "x86_64 (unknown subtype)",
            }
        }

        // CPU_TYPE_X86 = 0x00000007
        CPU_TYPE_X86 => "x86",

        _ => "Unknown",
    }
}

pub fn filetype_name(filetype: u32) -> &'static str {
    // Pulling these strings from Ghidra's docs
    // Why Ghidra docs and not also Wikipedia you ask? --> Ghidra's entries are more verbose
    // https://web.archive.org/web/20251224153001/https://ghidra.re/ghidra_docs/api/ghidra/app/util/bin/format/macho/MachHeaderFileTypes.html
    match filetype {
        MH_OBJECT => "Relocatable Object File [[MH_OBJECT]]", // Dear reader: don't confuse [[*]] with markdown formatting, I just think it's visually appealing
        MH_EXECUTE => "Demand Paged Executable File [[MH_EXECUTE]]",
        MH_FVMLIB => "Fixed VM Shared Library File [[MH_FVMLIB]]",
        MH_CORE => "Core File [[MH_CORE]]",
        MH_PRELOAD => "Preloaded Executable File [[MH_PRELOAD]]",
        MH_DYLIB => "Dynamically Bound Shared Library [[MH_DYLIB]]",
        MH_DYLINKER => "Dynamic Linker Editor [[MH_DYLINKER]]",
        MH_BUNDLE => "Dynamically Bound Bundle File [[MH_BUNDLE]]",
        MH_DYLIB_STUB => {
            "Shared Library Stub for Static Linking Only, No Section Contents [[MH_DYLIB_STUB]]"
        }
        MH_DSYM => {
            "Linking Only, No Section Contents, Companion File w/ Only Debug Sections [[MH_DSYM]]"
        }
        MH_KEXT_BUNDLE => "x86_64 kext (Kernel Extension) [[MH_KEXT_BUNDLE]]",
        MH_FILESET => "Kernel Cache Fileset [[MH_FILESET]]",
        _ => "Unknown File Type",
    }
}

pub fn platform_name(platform: u32) -> String {
    match platform {
        PLATFORM_MACOS => "macOS".to_string(),
        PLATFORM_IOS => "iOS".to_string(),
        PLATFORM_TVOS => "tvOS".to_string(),
        PLATFORM_WATCHOS => "watchOS".to_string(),
        PLATFORM_BRIDGEOS => "bridgeOS".to_string(),
        PLATFORM_MACCATALYST => "Mac Catalyst".to_string(),
        PLATFORM_IOSSIMULATOR => "iOS Simulator".to_string(),
        PLATFORM_TVOSSIMULATOR => "tvOS Simulator".to_string(),
        PLATFORM_WATCHOSSIMULATOR => "watchOS Simulator".to_string(),
        PLATFORM_DRIVERKIT => "DriverKit".to_string(),
        other => format!("Unknown({other:#x})"),
    }
}

pub fn tool_name(tool: u32) -> String {
    match tool {
        TOOL_CLANG => "CLANG".to_string(),
        TOOL_SWIFT => "SWIFT".to_string(),
        TOOL_LD => "LD".to_string(),
        other => format!("Unknown({other:#x})"),
    }
}

pub fn header_flags(flags: u32) -> Vec<String> {
    ALL_MH_FLAGS
        .iter()
        .filter(|(bit, _)| flags & bit != 0)
        .map(|(_, name)| name.to_string())
        .collect()
}
