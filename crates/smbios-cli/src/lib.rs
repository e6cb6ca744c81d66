//! Library half of the SMBIOS compliance checker CLI.

pub mod logging;
pub mod report;
