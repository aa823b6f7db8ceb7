// tests/config_test.rs
use aver::config::{load_config, Config, CONFIG_FILE_NAME};
use serial_test::serial;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_from_explicit_path() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[scan]
manifest_extension = "nupkgspec"
max_path_length = 260
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.scan.manifest_extension, "nupkgspec");
    assert_eq!(config.scan.max_path_length, 260);
    assert_eq!(config.scan.version_file, "version.txt");
}

#[test]
fn test_load_fixture() {
    let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/custom_conventions.toml");
    let config = load_config(Some(fixture))
        .expect("Failed to load test config");
    assert_eq!(config.scan.version_file, "VERSION");
    assert_eq!(config.scan.descriptor_extension, "fsproj");
    assert_eq!(config.rewrite.banner, "// stamped");
    assert_eq!(config.list.binary_extensions, vec!["so", "dll"]);
}

#[test]
fn test_missing_explicit_path_is_an_error() {
    assert!(load_config(Some("/no/such/aver.toml")).is_err());
}

#[test]
#[serial]
fn test_config_in_working_directory_is_used() {
    let original = std::env::current_dir().unwrap();
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join(CONFIG_FILE_NAME),
        "[rewrite]\nsource_attribute_file = \"AssemblyInfo.cs\"\n",
    )
    .unwrap();

    std::env::set_current_dir(temp.path()).unwrap();
    let loaded = load_config(None);
    std::env::set_current_dir(original).unwrap();

    let config = loaded.unwrap();
    assert_eq!(config.rewrite.source_attribute_file, "AssemblyInfo.cs");
    assert_eq!(config.scan, Config::default().scan);
}
