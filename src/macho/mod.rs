// File Purpose: module root for everything that understands Mach-O bytes.

pub mod build_version;
pub mod command;
pub mod constants;
pub mod dyld_info;
pub mod dylibs;
pub mod dylinker;
pub mod dysymtab;
pub mod endian;
pub mod entry_point;
pub mod fat;
pub mod file;
pub mod header;
pub mod image;
pub mod linkedit_data;
pub mod load_commands;
pub mod memory_image;
pub mod rpaths;
pub mod sections;
pub mod segments;
pub mod symtab;
pub mod utils;
pub mod uuid;
pub mod version;

pub use file::{MachOFile, MachOKind};
pub use image::Macho;
