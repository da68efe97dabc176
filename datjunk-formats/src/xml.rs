//! Streaming reader for XML catalogs.
//!
//! Logiqx files group items under `<game>` or `<machine>`; SabreDAT files
//! nest `<dir>` elements and list items as `<file type="...">`. Both are read
//! by the same event loop, with the directory stack joined by `/` to form
//! machine names.

use std::io::BufRead;
use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use datjunk_core::{CatalogHeader, ForceMerging, ForceNodump, ForcePacking, Item, ItemKind, Machine};

use crate::error::FormatError;
use crate::fields::Fields;
use crate::read::{InputFormat, ParsedDat, SourceTag};

/// A machine whose items are held back until its closing tag, so that
/// child elements like `<description>` apply to every record.
struct PendingMachine {
    machine: Machine,
    items: Vec<Item>,
}

struct Dir {
    name: String,
    description: Option<String>,
}

pub(crate) fn parse<R: BufRead>(reader: R, tag: &SourceTag) -> Result<ParsedDat, FormatError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut dat = ParsedDat::default();

    let mut in_header = false;
    let mut current_tag = String::new();
    let mut current_machine: Option<PendingMachine> = None;
    let mut dirs: Vec<Dir> = Vec::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag_name = element_name(e);
                match tag_name.as_str() {
                    "header" => in_header = true,
                    "game" | "machine" => {
                        let fields = attributes(e)?;
                        current_machine = Some(PendingMachine {
                            machine: machine_from_fields(&fields, tag),
                            items: Vec::new(),
                        });
                    }
                    "dir" => {
                        let fields = attributes(e)?;
                        dirs.push(Dir {
                            name: fields.get("name").unwrap_or_default().to_string(),
                            description: fields.text("description"),
                        });
                    }
                    _ => {
                        handle_element(e, &tag_name, in_header, &mut current_machine, &dirs, &mut dat, tag)?;
                        current_tag = tag_name;
                    }
                }
            }
            Event::Empty(ref e) => {
                let tag_name = element_name(e);
                handle_element(e, &tag_name, in_header, &mut current_machine, &dirs, &mut dat, tag)?;
            }
            Event::Text(ref e) => {
                let text = e.unescape()?.into_owned();
                if in_header {
                    set_header_field(&mut dat.header, &current_tag, text);
                } else if let Some(pending) = current_machine.as_mut() {
                    set_machine_field(&mut pending.machine, &current_tag, text);
                }
            }
            Event::End(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag_name.as_str() {
                    "header" => in_header = false,
                    "game" | "machine" => {
                        if let Some(pending) = current_machine.take() {
                            dat.push_machine(pending.machine, pending.items);
                        }
                    }
                    "dir" => {
                        dirs.pop();
                    }
                    _ => current_tag.clear(),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    dat.ensure_not_empty(InputFormat::Xml)
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

fn attributes(e: &BytesStart<'_>) -> Result<Fields, FormatError> {
    let mut fields = Fields::default();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
        fields.push(key, attr.unescape_value()?.into_owned());
    }
    Ok(fields)
}

/// Handle an element that may carry attributes of interest: header
/// `force*` settings, Logiqx items, or SabreDAT files.
fn handle_element(
    e: &BytesStart<'_>,
    tag_name: &str,
    in_header: bool,
    current_machine: &mut Option<PendingMachine>,
    dirs: &[Dir],
    dat: &mut ParsedDat,
    tag: &SourceTag,
) -> Result<(), FormatError> {
    if in_header {
        if tag_name == "clrmamepro" {
            set_force_fields(&mut dat.header, &attributes(e)?);
        }
        return Ok(());
    }

    if tag_name == "file" {
        let fields = attributes(e)?;
        let raw_kind = fields.get("type").unwrap_or("rom");
        let Ok(kind) = ItemKind::from_str(raw_kind) else {
            log::warn!("Skipping file of unknown type '{raw_kind}'");
            dat.skipped += 1;
            return Ok(());
        };
        let machine = dir_machine(dirs, tag);
        dat.push_item(kind, &fields, &machine);
        return Ok(());
    }

    let Ok(kind) = ItemKind::from_str(tag_name) else {
        return Ok(());
    };
    let Some(pending) = current_machine.as_mut() else {
        log::debug!("Ignoring <{tag_name}> outside of a machine");
        return Ok(());
    };
    let fields = attributes(e)?;
    match fields.to_item(kind) {
        Ok(item) => pending.items.push(item),
        Err(reason) => {
            log::warn!(
                "Skipping {kind} '{}' in '{}': {reason}",
                fields.get("name").unwrap_or_default(),
                pending.machine.name
            );
            dat.skipped += 1;
        }
    }
    Ok(())
}

fn machine_from_fields(fields: &Fields, tag: &SourceTag) -> Machine {
    let mut machine = tag.machine(fields.get("name").unwrap_or_default());
    machine.clone_of = fields.text("cloneof");
    machine.rom_of = fields.text("romof");
    machine.sample_of = fields.text("sampleof");
    machine.is_bios = fields.flag("isbios").unwrap_or(false);
    machine
}

fn dir_machine(dirs: &[Dir], tag: &SourceTag) -> Machine {
    let name = dirs
        .iter()
        .map(|d| d.name.as_str())
        .collect::<Vec<_>>()
        .join("/");
    let mut machine = tag.machine(name);
    if let Some(description) = dirs.last().and_then(|d| d.description.clone()) {
        machine.description = description;
    }
    machine
}

fn set_header_field(header: &mut CatalogHeader, field: &str, text: String) {
    match field {
        "name" => header.name = text,
        "description" => header.description = text,
        "category" => header.category = text,
        "version" => header.version = text,
        "date" => header.date = text,
        "author" => header.author = text,
        "email" => header.email = text,
        "homepage" => header.homepage = text,
        "url" => header.url = text,
        "comment" => header.comment = text,
        "type" => header.is_superdat = text.eq_ignore_ascii_case("superdat"),
        _ => {}
    }
}

fn set_machine_field(machine: &mut Machine, field: &str, text: String) {
    match field {
        "description" => machine.description = text,
        "year" => machine.year = Some(text),
        "manufacturer" => machine.manufacturer = Some(text),
        "comment" => machine.comment = Some(text),
        "board" => machine.board = Some(text),
        _ => {}
    }
}

/// Apply `forcemerging` / `forcenodump` / `forcepacking` values, ignoring
/// (with a warning) any token outside the known vocabulary.
pub(crate) fn set_force_fields(header: &mut CatalogHeader, fields: &Fields) {
    fn apply<T: FromStr<Err = datjunk_core::CoreError>>(fields: &Fields, key: &str, slot: &mut T) {
        if let Some(raw) = fields.get(key) {
            match raw.parse() {
                Ok(value) => *slot = value,
                Err(e) => log::warn!("Ignoring header value: {e}"),
            }
        }
    }
    apply::<ForceMerging>(fields, "forcemerging", &mut header.force_merging);
    apply::<ForceNodump>(fields, "forcenodump", &mut header.force_nodump);
    apply::<ForcePacking>(fields, "forcepacking", &mut header.force_packing);
}

#[cfg(test)]
#[path = "tests/xml_tests.rs"]
mod tests;
