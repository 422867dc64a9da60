// File Purpose: the single error taxonomy every decoder in this crate returns through.

use thiserror::Error;

/// Everything that can go wrong while parsing a Mach-O or fat binary.
///
/// Variants are "kinds", not one-off strings: callers can match on them instead of
/// scraping a message. Each variant still carries enough context to render an
/// actionable `Display` message.
#[derive(Debug, Error)]
pub enum MachoError {
    #[error("unrecognized magic 0x{magic:08x} at offset {offset}")]
    BadMagic { offset: u64, magic: u32 },

    #[error("{what} at offset {offset} (len {len}) extends past the available {bound} bytes")]
    Truncated {
        what: &'static str,
        offset: u64,
        len: u64,
        bound: u64,
    },

    #[error("load command {index}: {reason}")]
    MalformedLoadCommand { index: usize, reason: String },

    #[error("{what} at offset {offset}: no NUL terminator within {max} bytes")]
    MalformedString { what: &'static str, offset: u64, max: u64 },

    #[error("{what} is not supported by this parser (detection only)")]
    UnsupportedFormat { what: &'static str },

    #[error("read of {len} bytes at offset {offset} is out of range (file size {size})")]
    IoOutOfRange { offset: u64, len: u64, size: u64 },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MachoError>;
