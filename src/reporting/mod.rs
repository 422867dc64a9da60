pub mod macho;
pub mod header;
pub mod load_commands;
pub mod segments;
pub mod sections;
pub mod rpaths;
pub mod dylibs;
pub mod symtab;