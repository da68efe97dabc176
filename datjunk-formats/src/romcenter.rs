//! RomCenter INI-style catalogs.
//!
//! Rom lines under `[GAMES]` are `¬`-delimited:
//! `¬parent¬parent description¬game¬game description¬rom¬crc¬size¬romof¬merge¬`

use std::io::{BufRead, Write};

use datjunk_core::{CatalogHeader, ForceMerging, Item, Record, Rom};

use crate::error::FormatError;
use crate::fields::parse_size;
use crate::read::{InputFormat, ParsedDat, SourceTag};

const SEPARATOR: char = '¬';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Credits,
    Dat,
    Emulator,
    Games,
    Other,
}

pub(crate) fn parse<R: BufRead>(reader: R, tag: &SourceTag) -> Result<ParsedDat, FormatError> {
    let mut dat = ParsedDat::default();
    let mut section = Section::Other;

    for line_result in reader.split(b'\n') {
        // Older files are Latin-1, where the separator is not valid UTF-8;
        // the replacement character stands in for it below.
        let raw = line_result?;
        let line = String::from_utf8_lossy(&raw);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(name) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            section = match name.trim().to_ascii_uppercase().as_str() {
                "CREDITS" => Section::Credits,
                "DAT" => Section::Dat,
                "EMULATOR" => Section::Emulator,
                "GAMES" => Section::Games,
                _ => Section::Other,
            };
            continue;
        }

        if section == Section::Games {
            parse_game_line(trimmed, tag, &mut dat);
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim().to_string();
        let header = &mut dat.header;
        match (section, key.as_str()) {
            (Section::Credits, "author") => header.author = value,
            (Section::Credits, "version") => header.version = value,
            (Section::Credits, "email") => header.email = value,
            (Section::Credits, "homepage") => header.homepage = value,
            (Section::Credits, "url") => header.url = value,
            (Section::Credits, "date") => header.date = value,
            (Section::Credits, "comment") => header.comment = value,
            (Section::Dat, "split") if value == "1" => header.force_merging = ForceMerging::Split,
            (Section::Dat, "merge") if value == "1" => header.force_merging = ForceMerging::Full,
            (Section::Emulator, "refname") => header.name = value,
            (Section::Emulator, "version") => header.description = value,
            _ => {}
        }
    }

    dat.ensure_not_empty(InputFormat::RomCenter)
}

fn parse_game_line(line: &str, tag: &SourceTag, dat: &mut ParsedDat) {
    let fields: Vec<&str> = line
        .split(|c| c == SEPARATOR || c == char::REPLACEMENT_CHARACTER)
        .collect();
    // Leading separator yields an empty first field.
    if fields.len() < 8 {
        log::warn!("Skipping malformed RomCenter line: {line}");
        dat.skipped += 1;
        return;
    }
    let text = |i: usize| {
        fields
            .get(i)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let name = text(3).unwrap_or_default();
    let size = match parse_size(fields.get(7).copied()) {
        Ok(size) => size,
        Err(reason) => {
            log::warn!("Skipping rom '{}' in '{name}': {reason}", fields[5]);
            dat.skipped += 1;
            return;
        }
    };

    let mut machine = tag.machine(name.as_str());
    if let Some(description) = text(4) {
        machine.description = description;
    }
    machine.clone_of = text(1).filter(|parent| *parent != name);
    machine.rom_of = text(8);

    let rom = Rom {
        name: text(5).unwrap_or_default(),
        size,
        crc: text(6),
        md5: None,
        sha1: None,
        date: None,
        nodump: false,
    };
    dat.records.push(Record::new(rom, machine));
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

pub(crate) fn write<W: Write>(
    header: &CatalogHeader,
    machines: &[&[Record]],
    mut out: W,
) -> Result<(), FormatError> {
    writeln!(out, "[CREDITS]")?;
    writeln!(out, "author={}", header.author)?;
    writeln!(out, "version={}", header.version)?;
    writeln!(out, "comment={}", header.comment)?;
    writeln!(out, "[DAT]")?;
    writeln!(out, "version=2.50")?;
    writeln!(out, "split={}", flag(header.force_merging == ForceMerging::Split))?;
    writeln!(out, "merge={}", flag(header.force_merging == ForceMerging::Full))?;
    writeln!(out, "[EMULATOR]")?;
    writeln!(out, "refname={}", header.name)?;
    writeln!(out, "version={}", header.description)?;
    writeln!(out, "[GAMES]")?;

    let mut skipped = 0usize;
    for records in machines {
        for record in records.iter() {
            let Item::Rom(rom) = &record.item else {
                skipped += 1;
                continue;
            };
            let machine = &record.machine;
            let parent = machine.clone_of.as_deref().unwrap_or_default();
            let size = if rom.size >= 0 { rom.size.to_string() } else { String::new() };
            writeln!(
                out,
                "{sep}{parent}{sep}{parent}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{size}{sep}{}{sep}{sep}",
                machine.name,
                machine.description,
                rom.name,
                rom.crc.as_deref().unwrap_or_default(),
                machine.rom_of.as_deref().unwrap_or_default(),
                sep = SEPARATOR,
            )?;
        }
    }
    if skipped > 0 {
        log::debug!("RomCenter output omits {skipped} non-rom items");
    }

    out.flush()?;
    Ok(())
}
