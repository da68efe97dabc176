use std::fmt;
use std::io::{BufRead, Read};
use std::path::Path;

use datjunk_core::{CatalogHeader, Item, ItemKind, Machine, Record};

use crate::error::FormatError;
use crate::fields::Fields;
use crate::{clrmamepro, romcenter, xml};

/// Provenance stamped onto every record read from one input file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTag {
    pub system_id: i32,
    pub system_name: String,
    pub source_id: i32,
    pub source_name: String,
}

impl SourceTag {
    /// Tag for the input at `index`, used both as system and source id.
    pub fn new(index: i32, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            system_id: index,
            system_name: name.clone(),
            source_id: index,
            source_name: name,
        }
    }

    pub(crate) fn machine(&self, name: impl Into<String>) -> Machine {
        let mut machine = Machine::new(name).with_source(self.system_id, self.system_name.clone());
        machine.source_id = self.source_id;
        machine.source_name = self.source_name.clone();
        machine
    }
}

/// Input dialect, detected from content rather than extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Logiqx `<game>` / `<machine>` XML, or SabreDAT `<dir>` / `<file>` XML.
    Xml,
    ClrMamePro,
    RomCenter,
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Xml => "XML",
            Self::ClrMamePro => "ClrMamePro",
            Self::RomCenter => "RomCenter",
        })
    }
}

/// Header and records read from one file, before admission.
#[derive(Debug, Clone, Default)]
pub struct ParsedDat {
    pub header: CatalogHeader,
    pub records: Vec<Record>,
    /// Records dropped because a field could not be parsed.
    pub skipped: usize,
}

impl ParsedDat {
    /// Build one item from `fields` and attach it to `machine`. Malformed
    /// items are logged and counted instead of failing the file.
    pub(crate) fn push_item(&mut self, kind: ItemKind, fields: &Fields, machine: &Machine) {
        match fields.to_item(kind) {
            Ok(item) => self.records.push(Record::new(item, machine.clone())),
            Err(reason) => {
                log::warn!(
                    "Skipping {kind} '{}' in '{}': {reason}",
                    fields.get("name").unwrap_or_default(),
                    machine.name
                );
                self.skipped += 1;
            }
        }
    }

    /// Attach already-built items to the final version of their machine.
    pub(crate) fn push_machine(&mut self, machine: Machine, items: Vec<Item>) {
        self.records
            .extend(items.into_iter().map(|item| Record::new(item, machine.clone())));
    }

    pub(crate) fn ensure_not_empty(self, format: InputFormat) -> Result<Self, FormatError> {
        if self.header.name.is_empty() && self.records.is_empty() {
            return Err(FormatError::invalid_dat(format!(
                "No header or records found in {format} DAT file"
            )));
        }
        Ok(self)
    }
}

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Read past a leading UTF-8 BOM and any whitespace, returning the detected
/// dialect and the consumed bytes that must be replayed to the parser.
fn sniff<R: BufRead>(reader: &mut R) -> Result<(InputFormat, Vec<u8>), FormatError> {
    if reader.fill_buf()?.starts_with(&UTF8_BOM) {
        reader.consume(UTF8_BOM.len());
    }

    let mut first_bytes = Vec::new();
    let mut buf = [0u8; 1];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            return Err(FormatError::invalid_dat("Empty DAT file"));
        }
        first_bytes.push(buf[0]);
        if !buf[0].is_ascii_whitespace() {
            return Ok((detect(buf[0]), first_bytes));
        }
    }
}

/// Parse a DAT, auto-detecting the dialect from its first significant byte.
pub fn parse_dat<R: BufRead>(mut reader: R, tag: &SourceTag) -> Result<ParsedDat, FormatError> {
    let (format, first_bytes) = sniff(&mut reader)?;
    log::debug!("Reading '{}' as {format}", tag.source_name);

    // Build a chained reader with the peeked bytes + remaining data
    let chain = std::io::Cursor::new(first_bytes).chain(reader);
    let buffered = std::io::BufReader::new(chain);

    match format {
        InputFormat::Xml => xml::parse(buffered, tag),
        InputFormat::RomCenter => romcenter::parse(buffered, tag),
        InputFormat::ClrMamePro => clrmamepro::parse(buffered, tag),
    }
}

/// Parse a DAT file from a file path.
pub fn parse_dat_file(path: &Path, tag: &SourceTag) -> Result<ParsedDat, FormatError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    parse_dat(reader, tag)
}

fn detect(first: u8) -> InputFormat {
    match first {
        b'<' => InputFormat::Xml,
        b'[' => InputFormat::RomCenter,
        _ => InputFormat::ClrMamePro,
    }
}

#[cfg(test)]
#[path = "tests/read_tests.rs"]
mod tests;
