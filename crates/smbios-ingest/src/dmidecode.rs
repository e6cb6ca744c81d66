//! dmidecode text dump parser.
//!
//! One record per blank-line separated block:
//!
//! ```text
//! Handle 0x0000, DMI type 0, 24 bytes
//! BIOS Information
//! 	Vendor: Acme
//! 	Characteristics:
//! 		PCI is supported
//! 		BIOS is upgradeable
//! ```
//!
//! Field lines are indented once and split at the first colon; list items are
//! indented twice and attach to the most recent field. Unindented lines other
//! than the header (the record title, the dmidecode banner) carry no data.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use smbios_model::{Field, Record, RecordSet};

use crate::error::IngestError;

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Handle (0x[0-9A-Fa-f]+), DMI type ([0-9]+)").expect("valid header regex")
});

/// Parse a dmidecode dump held in memory.
pub fn parse_str(input: &str) -> Result<RecordSet, IngestError> {
    let mut parser = Parser::default();
    for (idx, line) in input.lines().enumerate() {
        parser.feed(idx + 1, line)?;
    }
    parser.finish()
}

/// Parse a dmidecode dump from any buffered reader.
///
/// Bytes that are not valid UTF-8 (firmware strings are printed unfiltered)
/// are replaced rather than rejected.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<RecordSet, IngestError> {
    parse_lines(reader, IngestError::Read)
}

/// Parse a dmidecode dump file.
pub fn parse_file(path: &Path) -> Result<RecordSet, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::io(path, source))?;
    let records = parse_lines(BufReader::new(file), |source| IngestError::io(path, source))?;
    info!(path = %path.display(), records = records.len(), "parsed dmidecode dump");
    Ok(records)
}

fn parse_lines<R, E>(mut reader: R, read_error: E) -> Result<RecordSet, IngestError>
where
    R: BufRead,
    E: Fn(io::Error) -> IngestError,
{
    let mut parser = Parser::default();
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).map_err(&read_error)? == 0 {
            break;
        }
        line_no += 1;
        let line = String::from_utf8_lossy(strip_line_end(&buf));
        parser.feed(line_no, &line)?;
    }
    parser.finish()
}

fn strip_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[derive(Default)]
struct Parser {
    records: RecordSet,
    current: Option<Record>,
    /// Field that level-2 items attach to.
    field: Option<String>,
}

impl Parser {
    fn feed(&mut self, line_no: usize, line: &str) -> Result<(), IngestError> {
        if line.starts_with("Handle") {
            self.close()?;
            let caps = HEADER_RE
                .captures(line)
                .ok_or_else(|| IngestError::InvalidHeader {
                    line: line_no,
                    text: line.to_string(),
                })?;
            let table_type = caps[2].parse::<u8>().map_err(|_| IngestError::InvalidHeader {
                line: line_no,
                text: line.to_string(),
            })?;
            self.current = Some(Record::new(&caps[1], table_type));
            return Ok(());
        }
        if line.trim().is_empty() {
            return self.close();
        }

        let Some(record) = self.current.as_mut() else {
            // Banner lines before the first record.
            return Ok(());
        };
        match indent_level(line) {
            0 => {}
            1 => {
                let (name, value) = line.split_once(':').unwrap_or((line, ""));
                let name = name.trim().to_string();
                record.fields.insert(name.clone(), Field::new(value.trim()));
                self.field = Some(name);
            }
            2 => {
                let text = line.trim_start_matches([' ', '\t']);
                let field = self
                    .field
                    .as_ref()
                    .and_then(|name| record.fields.get_mut(name))
                    .ok_or_else(|| IngestError::ItemWithoutField {
                        line: line_no,
                        text: text.to_string(),
                    })?;
                field.items.push(text.to_string());
            }
            depth => return Err(IngestError::UnexpectedIndent { line: line_no, depth }),
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), IngestError> {
        self.field = None;
        if let Some(record) = self.current.take() {
            debug!(
                handle = %record.handle,
                table_type = record.table_type,
                fields = record.fields.len(),
                "parsed record"
            );
            self.records.insert(record)?;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<RecordSet, IngestError> {
        self.close()?;
        Ok(self.records)
    }
}

fn indent_level(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_counts_leading_whitespace() {
        assert_eq!(indent_level("Handle"), 0);
        assert_eq!(indent_level("\tVendor: Acme"), 1);
        assert_eq!(indent_level("\t\tPCI is supported"), 2);
        assert_eq!(indent_level("  two spaces"), 2);
    }

    #[test]
    fn line_endings_are_stripped() {
        assert_eq!(strip_line_end(b"Vendor: Acme\r\n"), b"Vendor: Acme");
        assert_eq!(strip_line_end(b"Vendor: Acme\n"), b"Vendor: Acme");
        assert_eq!(strip_line_end(b"Vendor: Acme"), b"Vendor: Acme");
    }

    #[test]
    fn header_captures_handle_and_type() {
        let caps = HEADER_RE
            .captures("Handle 0x002A, DMI type 17, 40 bytes")
            .unwrap();
        assert_eq!(&caps[1], "0x002A");
        assert_eq!(&caps[2], "17");
    }
}
