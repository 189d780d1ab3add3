use std::fs;
use std::path::Path;

use envwriter::{EnvWriter, Error};
use tempfile::TempDir;

fn seed_fixture(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("failed to write fixture file");
    path
}

#[test]
fn set_write_and_reparse_round_trips_values() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = seed_fixture(
        &dir,
        ".env",
        "# deployment config\nAPP_NAME=old\nAPP_ENV=local\n",
    );

    let mut writer = EnvWriter::from_path(&path).expect("load should succeed");
    writer
        .set("APP_NAME", "My App")
        .expect("set should succeed")
        .set("APP_URL", "https://laravel.com")
        .expect("set should succeed");
    assert!(writer.write(false).expect("write should succeed"));

    let reloaded = EnvWriter::from_path(&path).expect("reload should succeed");
    assert_eq!(reloaded.get("APP_NAME"), Some("My App"));
    assert_eq!(reloaded.get("APP_ENV"), Some("local"));
    assert_eq!(reloaded.get("APP_URL"), Some("https://laravel.com"));

    let text = fs::read_to_string(&path).expect("file should be readable");
    assert!(text.starts_with("# deployment config\n"));
}

#[test]
fn delete_then_write_is_gone_after_a_fresh_parse() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = seed_fixture(&dir, ".env", "APP_NAME=demo\nAPP_ENV=local\n");

    let mut writer = EnvWriter::from_path(&path).expect("load should succeed");
    writer.delete("APP_NAME");
    assert!(writer.write(false).expect("write should succeed"));

    let reloaded = EnvWriter::from_path(&path).expect("reload should succeed");
    assert_eq!(reloaded.get("APP_NAME"), None);
    assert_eq!(reloaded.get("APP_ENV"), Some("local"));
}

#[test]
fn unbound_writer_writes_to_an_explicit_destination() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let dest = dir.path().join("out.env");

    let mut writer = EnvWriter::new();
    writer
        .set("APP_URL", "https://x.com")
        .expect("set should succeed");
    assert_eq!(writer.content(), "APP_URL=https://x.com\n");

    let err = writer.write(false).expect_err("expected missing destination");
    assert!(matches!(err, Error::NoDestination));

    assert!(writer.write_to(false, &dest).expect("write should succeed"));
    let reloaded = EnvWriter::from_path(&dest).expect("reload should succeed");
    assert_eq!(reloaded.get("APP_URL"), Some("https://x.com"));
}

#[test]
fn repeated_writes_produce_identical_bytes() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = seed_fixture(&dir, ".env", "A = 1\n# note\nB=\"two words\"\n");

    let mut writer = EnvWriter::from_path(&path).expect("load should succeed");
    writer.set("C", "3").expect("set should succeed");

    assert!(writer.write(false).expect("write should succeed"));
    let first = fs::read_to_string(&path).expect("file should be readable");
    assert!(writer.write(true).expect("write should succeed"));
    let second = fs::read_to_string(&path).expect("file should be readable");

    assert_eq!(first, second);
    assert_eq!(first, "A = 1\n# note\nB=\"two words\"\nC=3\n");
}

#[test]
fn multiline_values_survive_a_rewrite_cycle() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = seed_fixture(
        &dir,
        ".env",
        "KEY=\"first line\nsecond line\nthird line\" # keep me\nNEXT=ok\n",
    );

    let mut writer = EnvWriter::from_path(&path).expect("load should succeed");
    writer.set("NEXT", "changed").expect("set should succeed");
    assert!(writer.write(false).expect("write should succeed"));

    let reloaded = EnvWriter::from_path(&path).expect("reload should succeed");
    assert_eq!(
        reloaded.get("KEY"),
        Some("first line\nsecond line\nthird line")
    );
    assert_eq!(reloaded.get("NEXT"), Some("changed"));

    let text = fs::read_to_string(&path).expect("file should be readable");
    assert!(text.contains("# keep me"));
    assert!(!reloaded.get("KEY").expect("KEY present").contains("keep me"));
}

#[test]
fn missing_source_path_fails_fast() {
    let err = EnvWriter::from_path(Path::new("/definitely/not/here/.env"))
        .expect_err("expected construction failure");
    assert!(matches!(err, Error::SourceUnreadable { .. }));
}

#[test]
fn forced_quoting_is_kept_through_disk() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let dest = dir.path().join("quoted.env");

    let mut writer = EnvWriter::new();
    writer
        .set_quoted("APP_BUCKET", "s3-bucket")
        .expect("set should succeed");
    assert!(writer.write_to(false, &dest).expect("write should succeed"));

    let text = fs::read_to_string(&dest).expect("file should be readable");
    assert_eq!(text, "APP_BUCKET=\"s3-bucket\"\n");
    let reloaded = EnvWriter::from_path(&dest).expect("reload should succeed");
    assert_eq!(reloaded.get("APP_BUCKET"), Some("s3-bucket"));
}
