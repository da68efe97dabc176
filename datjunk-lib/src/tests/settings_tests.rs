use super::*;

#[test]
fn test_parse_full_file() {
    let settings = Settings::parse(
        r#"
[output]
format = "clrmamepro"
directory = "out"
no_rename = true

[load]
threads = 3
"#,
    )
    .unwrap();
    assert_eq!(settings.output.format, Some(OutputFormat::ClrMamePro));
    assert_eq!(settings.output.directory, Some(PathBuf::from("out")));
    assert_eq!(settings.output.no_rename, Some(true));
    assert_eq!(settings.load.threads, Some(3));
}

#[test]
fn test_partial_file_leaves_rest_unset() {
    let settings = Settings::parse("[load]\nthreads = 2\n").unwrap();
    assert_eq!(settings.output, OutputSettings::default());
    assert_eq!(settings.threads(None), 2);
}

#[test]
fn test_malformed_file_is_an_error() {
    assert!(matches!(Settings::parse("[output\n"), Err(LibError::Settings(_))));
    assert!(matches!(
        Settings::parse("[output]\nformat = \"yaml\"\n"),
        Err(LibError::Settings(_))
    ));
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load(&dir.path().join("nope.toml")).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[output]\nformat = \"sabredat\"\n").unwrap();
    let settings = Settings::load_or_default(Some(&path)).unwrap();
    assert_eq!(settings.format(None), OutputFormat::SabreDat);
}

#[test]
fn test_precedence() {
    let settings = Settings {
        output: OutputSettings {
            format: Some(OutputFormat::Csv),
            directory: Some(PathBuf::from("from-file")),
            no_rename: Some(true),
        },
        load: LoadSettings { threads: Some(6) },
    };
    assert_eq!(settings.format(Some(OutputFormat::Md5)), OutputFormat::Md5);
    assert_eq!(settings.format(None), OutputFormat::Csv);
    assert_eq!(settings.directory(Some(PathBuf::from("cli"))), PathBuf::from("cli"));
    assert_eq!(settings.directory(None), PathBuf::from("from-file"));
    assert_eq!(settings.threads(Some(1)), 1);
    assert_eq!(settings.threads(None), 6);
    assert!(settings.no_rename(false));

    let defaults = Settings::default();
    assert_eq!(defaults.format(None), OutputFormat::Logiqx);
    assert_eq!(defaults.directory(None), PathBuf::from("."));
    assert_eq!(defaults.threads(None), default_threads());
    assert!(!defaults.no_rename(false));
}
