//! Flat listings: delimited tables and checksum files.

use std::io::Write;

use datjunk_core::{CatalogHeader, Item, Record};

use crate::error::FormatError;

const COLUMNS: [&str; 13] = [
    "File Name",
    "Internal Name",
    "Description",
    "Game Name",
    "Game Description",
    "Type",
    "Rom Name",
    "Disk Name",
    "Size",
    "CRC",
    "MD5",
    "SHA1",
    "Nodump",
];

/// One row per item, with a fixed header row.
pub(crate) fn write_separated<W: Write>(
    header: &CatalogHeader,
    machines: &[&[Record]],
    delimiter: u8,
    out: W,
) -> Result<(), FormatError> {
    let mut writer = csv::WriterBuilder::new().delimiter(delimiter).from_writer(out);
    writer.write_record(COLUMNS)?;

    for record in machines.iter().flat_map(|records| records.iter()) {
        let item = &record.item;
        let (rom_name, disk_name) = match item {
            Item::Disk(disk) => ("", disk.name.as_str()),
            other => (other.name(), ""),
        };
        let size = match item {
            Item::Rom(rom) if rom.size >= 0 => rom.size.to_string(),
            _ => String::new(),
        };
        writer.write_record([
            header.name.as_str(),
            header.name.as_str(),
            header.description.as_str(),
            record.machine.name.as_str(),
            record.machine.description.as_str(),
            item.kind().as_str(),
            rom_name,
            disk_name,
            size.as_str(),
            item.crc().unwrap_or_default(),
            item.md5().unwrap_or_default(),
            item.sha1().unwrap_or_default(),
            if item.is_nodump() { "yes" } else { "no" },
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Hash carried by a checksum listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Checksum {
    Crc,
    Md5,
    Sha1,
}

/// One line per item carrying the selected hash. SFV puts the hash after
/// the path; the md5sum/sha1sum layout puts it first.
pub(crate) fn write_checksums<W: Write>(
    checksum: Checksum,
    machines: &[&[Record]],
    mut out: W,
) -> Result<(), FormatError> {
    for record in machines.iter().flat_map(|records| records.iter()) {
        let item = &record.item;
        if item.is_nodump() {
            continue;
        }
        let hash = match checksum {
            Checksum::Crc => item.crc(),
            Checksum::Md5 => item.md5(),
            Checksum::Sha1 => item.sha1(),
        };
        let Some(hash) = hash else {
            continue;
        };
        let path = format!("{}/{}", record.machine.name, item.name());
        match checksum {
            Checksum::Crc => writeln!(out, "{path} {hash}")?,
            Checksum::Md5 | Checksum::Sha1 => writeln!(out, "{hash} *{path}")?,
        }
    }
    out.flush()?;
    Ok(())
}
