#![deny(unsafe_code)]

pub mod dmidecode;
pub mod error;

pub use dmidecode::{parse_file, parse_reader, parse_str};
pub use error::IngestError;
