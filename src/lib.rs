pub mod byte_source;
pub mod error;
pub mod macho;
pub mod reporting;
