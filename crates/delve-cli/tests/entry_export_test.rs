mod common;
use common::TestFixture;
use predicates::prelude::*;

#[test]
fn test_entry_add_keeps_source_order() {
    let fixture = TestFixture::new();
    let id = fixture.new_session("Qubits");
    fixture.add_entry(id, "What is qubit?", &["first", "second"]);

    let output = fixture
        .command()
        .args(["--format", "json", "session", "show", &id.to_string()])
        .output()
        .expect("Failed to run session show");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("Parse failed");

    let entries = value["entries"].as_array().expect("Expected entries array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["query"], "What is qubit?");
    assert_eq!(entries[0]["sources"], serde_json::json!(["first", "second"]));
    assert_eq!(entries[0]["tools_used"], serde_json::json!(["search"]));
}

#[test]
fn test_entry_add_to_missing_session() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["entry", "add", "7", "--query", "q", "--result", "r"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✗ Session 7 not found."));

    assert!(fixture.list_json().is_empty());
}

#[test]
fn test_export_all_formats() {
    let fixture = TestFixture::new();
    let id = fixture.new_session("Tidal power");
    fixture.add_entry(id, "How much?", &["https://example.org"]);
    let out_dir = fixture.root().join("reports");

    fixture
        .command()
        .args(["export", &id.to_string(), "--to", "all", "--output-dir"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Exported txt: "))
        .stdout(predicate::str::contains("✓ Exported json: "))
        .stdout(predicate::str::contains("✓ Exported markdown: "))
        .stdout(predicate::str::contains("✓ Exported pdf: "));

    let mut names: Vec<String> = std::fs::read_dir(&out_dir)
        .expect("reports dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names.len(), 4);
    assert!(names.iter().any(|n| n.ends_with(".pdf")));
    assert!(names.iter().all(|n| n.starts_with("Tidal_power_")));
}

#[test]
fn test_export_unsupported_format_is_reported() {
    let fixture = TestFixture::new();
    let id = fixture.new_session("Tidal power");
    fixture.add_entry(id, "How much?", &[]);

    fixture
        .command()
        .args(["export", &id.to_string(), "--to", "docx", "--output-dir"])
        .arg(fixture.root().join("reports"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Unsupported format: docx"));
}

#[test]
fn test_export_requires_an_entry() {
    let fixture = TestFixture::new();
    let id = fixture.new_session("Empty");

    fixture
        .command()
        .args(["export", &id.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no entries to export"));
}

#[test]
fn test_database_path_from_config() {
    let fixture = TestFixture::new();
    let configured = fixture.root().join("from-config.db");
    std::fs::write(
        fixture.config_path(),
        format!("database_path = {:?}\n", configured.display().to_string()),
    )
    .expect("write config");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("delve");
    cmd.current_dir(fixture.root())
        .env_remove("DELVE_DB")
        .arg("--config")
        .arg(fixture.config_path())
        .args(["session", "new", "Configured"])
        .assert()
        .success();

    assert!(configured.exists());
    assert!(!fixture.db_path().exists());
}

#[test]
fn test_guidance_without_command() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .assert()
        .success()
        .stdout(predicate::str::contains("delve session new"));
}
