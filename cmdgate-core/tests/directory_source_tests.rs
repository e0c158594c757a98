// File: cmdgate-core/tests/directory_source_tests.rs

use std::fs;
use cmdgate_common::traits::CommandSource;
use cmdgate_core::discovery::DirectorySource;

#[tokio::test]
async fn reads_json_files_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b_echo.json"), r#"{ "aliases": ["echo"], "unique_id": "echo", "action": "echo" }"#).unwrap();
    fs::write(dir.path().join("a_ping.json"), r#"{ "aliases": "ping", "unique_id": "ping", "action": "ping" }"#).unwrap();
    fs::write(dir.path().join("notes.txt"), "not a command").unwrap();
    fs::create_dir(dir.path().join("nested.json")).unwrap();

    let source = DirectorySource::new(dir.path());
    let definitions = source.discover().await.unwrap();

    assert_eq!(definitions.len(), 2);
    assert!(definitions[0].origin.ends_with("a_ping.json"));
    assert!(definitions[1].origin.ends_with("b_echo.json"));
    assert_eq!(definitions[1].blob["action"], "echo");
}

#[tokio::test]
async fn invalid_json_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), "{ aliases: ").unwrap();
    fs::write(dir.path().join("ok.json"), r#"{ "aliases": ["ok"], "action": "ping" }"#).unwrap();

    let definitions = DirectorySource::new(dir.path()).discover().await.unwrap();
    assert_eq!(definitions.len(), 1);
    assert!(definitions[0].origin.ends_with("ok.json"));
}

#[tokio::test]
async fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirectorySource::new(dir.path().join("does-not-exist"));
    assert!(source.discover().await.is_err());
}
