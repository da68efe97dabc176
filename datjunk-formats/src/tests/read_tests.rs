use super::*;

#[test]
fn test_empty_input_is_invalid() {
    let result = parse_dat("".as_bytes(), &SourceTag::default());
    assert!(matches!(result, Err(FormatError::InvalidDat(_))));

    let result = parse_dat(" \n\t\n".as_bytes(), &SourceTag::default());
    assert!(matches!(result, Err(FormatError::InvalidDat(_))));
}

#[test]
fn test_detection() {
    assert_eq!(detect(b'<'), InputFormat::Xml);
    assert_eq!(detect(b'['), InputFormat::RomCenter);
    assert_eq!(detect(b'c'), InputFormat::ClrMamePro);
}

#[test]
fn test_leading_bom_and_whitespace_are_skipped() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(b"\n  <datafile><header><name>Bom</name></header></datafile>");
    let dat = parse_dat(&bytes[..], &SourceTag::default()).unwrap();
    assert_eq!(dat.header.name, "Bom");
}

#[test]
fn test_bom_before_clrmamepro_is_skipped() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(b"clrmamepro (\n\tname \"Bom\"\n)\n");
    let dat = parse_dat(&bytes[..], &SourceTag::default()).unwrap();
    assert_eq!(dat.header.name, "Bom");
}

#[test]
fn test_stray_bom_bytes_are_not_skipped() {
    for lead in [0xBF, 0xEF, 0xBB] {
        let mut bytes = vec![lead];
        bytes.extend_from_slice(b"<datafile/>");
        let (format, consumed) = sniff(&mut &bytes[..]).unwrap();
        assert_eq!(format, InputFormat::ClrMamePro);
        assert_eq!(consumed, [lead]);
    }

    // Only the full three-byte sequence counts as a BOM.
    let (format, consumed) = sniff(&mut &[0xEF, 0xBB, b'<'][..]).unwrap();
    assert_eq!(format, InputFormat::ClrMamePro);
    assert_eq!(consumed, [0xEF]);
}

#[test]
fn test_records_carry_source_tag() {
    let xml = r#"<datafile>
    <game name="g"><rom name="a.bin" size="1" crc="12345678"/></game>
</datafile>"#;
    let tag = SourceTag::new(3, "third.dat");
    let dat = parse_dat(xml.as_bytes(), &tag).unwrap();
    let machine = &dat.records[0].machine;
    assert_eq!(machine.source_system_id, 3);
    assert_eq!(machine.source_id, 3);
    assert_eq!(machine.source_system_name, "third.dat");
    assert_eq!(machine.source_name, "third.dat");
}

#[test]
fn test_parse_dat_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("set.dat");
    std::fs::write(
        &path,
        "clrmamepro (\n\tname \"Set\"\n)\n\ngame (\n\tname \"g\"\n\trom ( name a.bin size 1 crc 12345678 )\n)\n",
    )
    .unwrap();
    let dat = parse_dat_file(&path, &SourceTag::new(0, "set")).unwrap();
    assert_eq!(dat.header.name, "Set");
    assert_eq!(dat.records.len(), 1);

    let missing = parse_dat_file(&dir.path().join("missing.dat"), &SourceTag::default());
    assert!(matches!(missing, Err(FormatError::Io(_))));
}
