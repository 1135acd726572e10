mod common;
use common::TestFixture;
use predicates::prelude::*;

#[test]
fn test_shell_session_flow() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["shell", "--model", "model-x"])
        .write_stdin("new Ocean currents\nadd\nWhy do gyres form?\nCoriolis.\nnoaa.gov\nsearch, wikipedia\nlist\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Created session 1: Ocean currents"))
        .stdout(predicate::str::contains("✓ Recorded entry 1"))
        .stdout(predicate::str::contains("Research Sessions"));

    let sessions = fixture.list_json();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["entry_count"].as_u64(), Some(1));
    assert_eq!(sessions[0]["model_used"], "model-x");
}

#[test]
fn test_shell_survives_bad_input() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("shell")
        .write_stdin("delete\nexport\nload 3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: A session id is required"))
        .stdout(predicate::str::contains("Error: No active session"))
        .stdout(predicate::str::contains("✗ Session 3 not found."));
}
