//! ClrMamePro text catalogs.
//!
//! Format:
//! ```text
//! clrmamepro (
//!     name "System Name"
//!     forcemerging split
//! )
//!
//! game (
//!     name "Game Name (Region)"
//!     description "Game Name (Region)"
//!     rom ( name "Game Name (Region).ext" size 12345 crc AABBCCDD sha1 ... )
//!     disk ( name "image" sha1 ... )
//!     sample "voice"
//! )
//! ```

use std::io::{BufRead, Write};

use datjunk_core::{CatalogHeader, Item, ItemKind, Machine, Record};

use crate::error::FormatError;
use crate::fields::{Fields, item_fields};
use crate::read::{InputFormat, ParsedDat, SourceTag};
use crate::xml::set_force_fields;

/// Item keys whose value is a parenthesized field list.
const ITEM_BLOCKS: [&str; 5] = ["rom", "disk", "release", "biosset", "archive"];

enum Block {
    Header,
    Machine { machine: Machine, items: Vec<Item> },
    Other,
}

pub(crate) fn parse<R: BufRead>(reader: R, tag: &SourceTag) -> Result<ParsedDat, FormatError> {
    let mut dat = ParsedDat::default();
    let mut block: Option<Block> = None;

    for line_result in reader.lines() {
        let line = line_result?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        // Detect block start: "blocktype ("
        let Some(current) = block.as_mut() else {
            block = detect_block_start(trimmed).map(|block_type| match block_type.as_str() {
                "clrmamepro" | "header" | "romvault" => Block::Header,
                "game" | "machine" | "resource" | "set" => Block::Machine {
                    machine: tag.machine(""),
                    items: Vec::new(),
                },
                _ => Block::Other,
            });
            continue;
        };

        // Detect block end: ")"
        if trimmed == ")" {
            if let Some(Block::Machine { machine, items }) = block.take() {
                dat.push_machine(machine, items);
            }
            continue;
        }

        let Some((key, value)) = parse_kv(trimmed) else {
            continue;
        };
        match current {
            Block::Header => set_header_field(&mut dat.header, &key, value),
            Block::Machine { machine, items } => {
                if ITEM_BLOCKS.contains(&key.as_str()) {
                    let kind = key.parse::<ItemKind>().unwrap_or(ItemKind::Rom);
                    let fields = Fields::from_tokens(tokenize_line(&value));
                    match fields.to_item(kind) {
                        Ok(item) => items.push(item),
                        Err(reason) => {
                            log::warn!(
                                "Skipping {kind} '{}' in '{}': {reason}",
                                fields.get("name").unwrap_or_default(),
                                machine.name
                            );
                            dat.skipped += 1;
                        }
                    }
                } else if key == "sample" {
                    items.push(Item::Sample(datjunk_core::Sample { name: value }));
                } else {
                    set_machine_field(machine, &key, value);
                }
            }
            Block::Other => {}
        }
    }

    // Unterminated final block
    if let Some(Block::Machine { machine, items }) = block.take() {
        dat.push_machine(machine, items);
    }

    dat.ensure_not_empty(InputFormat::ClrMamePro)
}

fn set_header_field(header: &mut CatalogHeader, key: &str, value: String) {
    match key {
        "name" => header.name = value,
        "description" => header.description = value,
        "category" => header.category = value,
        "version" => header.version = value,
        "date" => header.date = value,
        "author" => header.author = value,
        "email" => header.email = value,
        "homepage" => header.homepage = value,
        "url" => header.url = value,
        "comment" => header.comment = value,
        "type" => header.is_superdat = value.eq_ignore_ascii_case("superdat"),
        "forcemerging" | "forcenodump" | "forcepacking" => {
            let mut fields = Fields::default();
            fields.push(key, value);
            set_force_fields(header, &fields);
        }
        _ => {}
    }
}

fn set_machine_field(machine: &mut Machine, key: &str, value: String) {
    match key {
        "name" => {
            if machine.description.is_empty() || machine.description == machine.name {
                machine.description = value.clone();
            }
            machine.name = value;
        }
        "description" => machine.description = value,
        "cloneof" => machine.clone_of = Some(value),
        "romof" => machine.rom_of = Some(value),
        "sampleof" => machine.sample_of = Some(value),
        "year" => machine.year = Some(value),
        "manufacturer" => machine.manufacturer = Some(value),
        "comment" => machine.comment = Some(value),
        "board" => machine.board = Some(value),
        "isbios" => machine.is_bios = value.eq_ignore_ascii_case("yes"),
        _ => {}
    }
}

/// Detect a block start like `clrmamepro (` or `game (`.
fn detect_block_start(line: &str) -> Option<String> {
    let stripped = line.trim_end();
    let block_type = stripped.strip_suffix('(')?.trim();
    if !block_type.is_empty() && block_type.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Some(block_type.to_lowercase());
    }
    None
}

/// Parse a key-value line like `name "Some Value"` or `version 20240101`.
/// For item lines such as `rom ( ... )`, the value is the content inside
/// the outer parens.
fn parse_kv(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();

    // Split on first whitespace
    let mut parts = trimmed.splitn(2, |c: char| c.is_ascii_whitespace());
    let key = parts.next()?.trim().to_ascii_lowercase();
    let raw_value = parts.next()?.trim();

    if ITEM_BLOCKS.contains(&key.as_str()) {
        let inner = raw_value.strip_prefix('(')?.strip_suffix(')')?.trim();
        return Some((key, inner.to_string()));
    }

    // Strip surrounding quotes if present
    let value = if raw_value.starts_with('"') && raw_value.ends_with('"') && raw_value.len() >= 2 {
        raw_value[1..raw_value.len() - 1].to_string()
    } else {
        raw_value.to_string()
    };

    Some((key, value))
}

/// Tokenize an item line, respecting quoted strings.
/// `name "Game (Region).ext" size 12345 crc AB` → ["name", "Game (Region).ext", "size", "12345", "crc", "AB"]
fn tokenize_line(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            chars.next();
        }

        if chars.peek().is_none() {
            break;
        }

        let mut token = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                token.push(c);
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_ascii_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }

    tokens
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "'"))
}

pub(crate) fn write<W: Write>(
    header: &CatalogHeader,
    machines: &[&[Record]],
    mut out: W,
) -> Result<(), FormatError> {
    writeln!(out, "clrmamepro (")?;
    writeln!(out, "\tname {}", quoted(&header.name))?;
    writeln!(out, "\tdescription {}", quoted(&header.description))?;
    for (key, value) in [
        ("category", &header.category),
        ("version", &header.version),
        ("date", &header.date),
        ("author", &header.author),
        ("email", &header.email),
        ("homepage", &header.homepage),
        ("url", &header.url),
        ("comment", &header.comment),
    ] {
        if !value.is_empty() {
            writeln!(out, "\t{key} {}", quoted(value))?;
        }
    }
    if header.is_superdat {
        writeln!(out, "\ttype SuperDAT")?;
    }
    for (key, token) in [
        ("forcemerging", header.force_merging.token()),
        ("forcenodump", header.force_nodump.token()),
        ("forcepacking", header.force_packing.token()),
    ] {
        if let Some(token) = token {
            writeln!(out, "\t{key} {token}")?;
        }
    }
    writeln!(out, ")")?;

    for records in machines {
        let Some(first) = records.first() else {
            continue;
        };
        let machine = &first.machine;
        writeln!(out, "\ngame (")?;
        writeln!(out, "\tname {}", quoted(&machine.name))?;
        writeln!(out, "\tdescription {}", quoted(&machine.description))?;
        for (key, value) in [
            ("cloneof", &machine.clone_of),
            ("romof", &machine.rom_of),
            ("sampleof", &machine.sample_of),
            ("year", &machine.year),
            ("manufacturer", &machine.manufacturer),
            ("comment", &machine.comment),
        ] {
            if let Some(value) = value {
                writeln!(out, "\t{key} {}", quoted(value))?;
            }
        }
        if machine.is_bios {
            writeln!(out, "\tisbios yes")?;
        }

        for record in records.iter() {
            writeln!(out, "\t{}", item_line(&record.item))?;
        }
        writeln!(out, ")")?;
    }

    out.flush()?;
    Ok(())
}

fn item_line(item: &Item) -> String {
    if let Item::Sample(sample) = item {
        return format!("sample {}", quoted(&sample.name));
    }
    let mut line = format!("{} (", item.kind().as_str());
    for (key, value) in item_fields(item) {
        match key {
            "status" => line.push_str(&format!(" flags {value}")),
            "size" | "crc" | "md5" | "sha1" => line.push_str(&format!(" {key} {value}")),
            _ => line.push_str(&format!(" {key} {}", quoted(&value))),
        }
    }
    line.push_str(" )");
    line
}

#[cfg(test)]
#[path = "tests/clrmamepro_tests.rs"]
mod tests;
