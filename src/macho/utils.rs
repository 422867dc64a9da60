// File Purpose: Various functions I seem to be using a lot between files

use crate::error::{MachoError, Result};

/*
    Instead of a ton of:

    let cputype_bytes: [u8; 4] = data[offset + 0 .. offset + 4].try_into()?;
    let cputype = if header.kind.is_be() {
        i32::from_be_bytes(cputype_bytes)
    } else {
        i32::from_le_bytes(cputype_bytes)
    };

    For each var and type, we can instead use the trait and implementations to save us the copy and paste hell
*/


pub trait FromEndianBytes: Sized {
    const SIZE: usize;

    fn from_be(bytes: &[u8]) -> Self;
    fn from_le(bytes: &[u8]) -> Self;
}

impl FromEndianBytes for u16 {
    const SIZE: usize = 2;

    fn from_be(bytes: &[u8]) -> Self {
        u16::from_be_bytes(bytes.try_into().unwrap())
    }
    fn from_le(bytes: &[u8]) -> Self {
        u16::from_le_bytes(bytes.try_into().unwrap())
    }
}

impl FromEndianBytes for u32 {
    const SIZE: usize = 4;

    fn from_be(bytes: &[u8]) -> Self {
        u32::from_be_bytes(bytes.try_into().unwrap())
    }
    fn from_le(bytes: &[u8]) -> Self {
        u32::from_le_bytes(bytes.try_into().unwrap())
    }
}

impl FromEndianBytes for i32 {
    const SIZE: usize = 4;

    fn from_be(bytes: &[u8]) -> Self {
        i32::from_be_bytes(bytes.try_into().unwrap())
    }
    fn from_le(bytes: &[u8]) -> Self {
        i32::from_le_bytes(bytes.try_into().unwrap())
    }
}

impl FromEndianBytes for u64 {
    const SIZE: usize = 8;

    fn from_be(bytes: &[u8]) -> Self {
        u64::from_be_bytes(bytes.try_into().unwrap())
    }
    fn from_le(bytes: &[u8]) -> Self {
        u64::from_le_bytes(bytes.try_into().unwrap())
    }
}

pub fn bytes_to<T: FromEndianBytes>(is_be: bool, data: &[u8]) -> Result<T> {
    if data.len() < T::SIZE {
        return Err(MachoError::Truncated {
            what: "fixed-width field",
            offset: 0,
            len: T::SIZE as u64,
            bound: data.len() as u64,
        });
    }
    if is_be {
        Ok(T::from_be(&data[..T::SIZE]))
    } else {
        Ok(T::from_le(&data[..T::SIZE]))
    }
}

/// Reads a fixed `N`-byte name field (segment/section names are always 16 bytes).
pub fn read_name<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N]> {
    if offset + N > data.len() {
        return Err(MachoError::Truncated {
            what: "name field",
            offset: offset as u64,
            len: N as u64,
            bound: data.len() as u64,
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&data[offset..offset + N]);
    Ok(out)
}

/// Renders a fixed-size, NUL-padded name field (segment/section names) as a `String`.
pub fn name_to_string(name: &[u8]) -> String {
    let end = name.iter().position(|&b| b == 0).unwrap_or(name.len());
    String::from_utf8_lossy(&name[..end]).into_owned()
}

/// Reads a NUL-terminated string living inside `data[base..base + bound]`, at `base + rel_offset`.
/// Used for the `lc_str` fields (dylib/rpath/dylinker paths) that are offsets relative to the
/// start of their own load command.
pub fn read_lc_str(data: &[u8], base: usize, bound: usize, rel_offset: u32) -> Result<String> {
    let start = base + rel_offset as usize;
    if start >= bound || bound > data.len() {
        return Err(MachoError::MalformedLoadCommand {
            index: 0,
            reason: "lc_str offset exceeds command bounds".to_string(),
        });
    }
    let bytes = &data[start..bound];
    match bytes.iter().position(|&b| b == 0) {
        Some(pos) => Ok(String::from_utf8_lossy(&bytes[..pos]).into_owned()),
        None => Err(MachoError::MalformedString {
            what: "lc_str",
            offset: start as u64,
            max: (bound - start) as u64,
        }),
    }
}
