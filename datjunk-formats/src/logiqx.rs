//! Logiqx XML writer, plus the XML helpers SabreDAT output shares.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use datjunk_core::{CatalogHeader, Machine, Record};

use crate::error::FormatError;
use crate::fields::item_fields;

const DOCTYPE: &str = r#"datafile PUBLIC "-//Logiqx//DTD ROM Management Datafile//EN" "http://www.logiqx.com/Dats/datafile.dtd""#;

pub(crate) fn write<W: Write>(
    header: &CatalogHeader,
    machines: &[&[Record]],
    out: W,
) -> Result<(), FormatError> {
    let mut writer = Writer::new_with_indent(out, b'\t', 1);
    write_prologue(&mut writer, header)?;

    for records in machines {
        let Some(first) = records.first() else {
            continue;
        };
        writer.write_event(Event::Start(machine_start("game", &first.machine)))?;
        write_machine_details(&mut writer, &first.machine)?;
        for record in records.iter() {
            let mut element = BytesStart::new(record.item.kind().as_str());
            for (key, value) in item_fields(&record.item) {
                element.push_attribute((key, value.as_str()));
            }
            writer.write_event(Event::Empty(element))?;
        }
        writer.write_event(Event::End(BytesEnd::new("game")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("datafile")))?;
    writer.get_mut().write_all(b"\n")?;
    writer.get_mut().flush()?;
    Ok(())
}

/// Declaration, doctype, the opening `<datafile>` and the `<header>` block.
pub(crate) fn write_prologue<W: Write>(
    writer: &mut Writer<W>,
    header: &CatalogHeader,
) -> Result<(), FormatError> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))?;
    writer.write_event(Event::Start(BytesStart::new("datafile")))?;
    writer.write_event(Event::Start(BytesStart::new("header")))?;

    text_element(writer, "name", &header.name)?;
    text_element(writer, "description", &header.description)?;
    for (tag, value) in [
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
            text_element(writer, tag, value)?;
        }
    }
    if header.is_superdat {
        text_element(writer, "type", "SuperDAT")?;
    }

    let force = [
        ("forcemerging", header.force_merging.token()),
        ("forcenodump", header.force_nodump.token()),
        ("forcepacking", header.force_packing.token()),
    ];
    if force.iter().any(|(_, token)| token.is_some()) {
        let mut element = BytesStart::new("clrmamepro");
        for (key, token) in force {
            if let Some(token) = token {
                element.push_attribute((key, token));
            }
        }
        writer.write_event(Event::Empty(element))?;
    }

    writer.write_event(Event::End(BytesEnd::new("header")))?;
    Ok(())
}

pub(crate) fn text_element<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), FormatError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn machine_start<'a>(tag: &'a str, machine: &Machine) -> BytesStart<'a> {
    let mut element = BytesStart::new(tag);
    element.push_attribute(("name", machine.name.as_str()));
    for (key, value) in [
        ("cloneof", &machine.clone_of),
        ("romof", &machine.rom_of),
        ("sampleof", &machine.sample_of),
    ] {
        if let Some(value) = value {
            element.push_attribute((key, value.as_str()));
        }
    }
    if machine.is_bios {
        element.push_attribute(("isbios", "yes"));
    }
    element
}

fn write_machine_details<W: Write>(writer: &mut Writer<W>, machine: &Machine) -> Result<(), FormatError> {
    text_element(writer, "description", &machine.description)?;
    for (tag, value) in [
        ("comment", &machine.comment),
        ("year", &machine.year),
        ("manufacturer", &machine.manufacturer),
        ("board", &machine.board),
    ] {
        if let Some(value) = value {
            text_element(writer, tag, value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/logiqx_tests.rs"]
mod tests;
