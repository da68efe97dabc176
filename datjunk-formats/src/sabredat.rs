//! SabreDAT XML writer.
//!
//! Machine names are treated as `/`-separated paths and rendered as nested
//! `<dir>` elements. Between consecutive machines only the directories past
//! their longest common prefix are closed and reopened.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};

use datjunk_core::{CatalogHeader, Record};

use crate::error::FormatError;
use crate::fields::item_fields;
use crate::logiqx::write_prologue;

pub(crate) fn write<W: Write>(
    header: &CatalogHeader,
    machines: &[&[Record]],
    out: W,
) -> Result<(), FormatError> {
    let mut writer = Writer::new_with_indent(out, b'\t', 1);
    write_prologue(&mut writer, header)?;
    writer.write_event(Event::Start(BytesStart::new("data")))?;

    let mut open: Vec<&str> = Vec::new();
    for records in machines {
        let Some(first) = records.first() else {
            continue;
        };
        let path = split_path(&first.machine.name);
        let common = common_prefix(&open, &path);

        for _ in common..open.len() {
            writer.write_event(Event::End(BytesEnd::new("dir")))?;
        }
        open.truncate(common);

        for (depth, segment) in path.iter().enumerate().skip(common) {
            let mut dir = BytesStart::new("dir");
            dir.push_attribute(("name", *segment));
            if depth + 1 == path.len() && first.machine.description != first.machine.name {
                dir.push_attribute(("description", first.machine.description.as_str()));
            }
            writer.write_event(Event::Start(dir))?;
            open.push(*segment);
        }

        for record in records.iter() {
            let mut file = BytesStart::new("file");
            file.push_attribute(("type", record.item.kind().as_str()));
            for (key, value) in item_fields(&record.item) {
                file.push_attribute((key, value.as_str()));
            }
            writer.write_event(Event::Empty(file))?;
        }
    }

    for _ in 0..open.len() {
        writer.write_event(Event::End(BytesEnd::new("dir")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("data")))?;
    writer.write_event(Event::End(BytesEnd::new("datafile")))?;
    writer.get_mut().write_all(b"\n")?;
    writer.get_mut().flush()?;
    Ok(())
}

fn split_path(name: &str) -> Vec<&str> {
    let segments: Vec<&str> = name.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() { vec![name] } else { segments }
}

fn common_prefix(a: &[&str], b: &[&str]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
