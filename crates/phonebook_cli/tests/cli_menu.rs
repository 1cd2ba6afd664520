use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn phonebook_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("phonebook").unwrap();
    cmd.current_dir(dir)
        .arg("--db")
        .arg(dir.join("book.db"))
        .arg("--log-dir")
        .arg(dir.join("logs"));
    cmd
}

#[test]
fn contacts_survive_between_runs() {
    let dir = tempfile::tempdir().unwrap();

    phonebook_cmd(dir.path())
        .write_stdin("1\nAnn\n555-0142\n8\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved: Ann -> 555-0142"));

    phonebook_cmd(dir.path())
        .write_stdin("7\n8\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1: Ann 555-0142"));
}

#[test]
fn bad_paging_input_does_not_crash() {
    let dir = tempfile::tempdir().unwrap();

    phonebook_cmd(dir.path())
        .write_stdin("5\nfive\n9\n8\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Limit: Please enter whole numbers."))
        .stdout(predicate::str::contains("Offset: ").not())
        .stdout(predicate::str::contains("Invalid choice, try again."));
}

#[test]
fn csv_import_then_show_all() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("people.csv");
    std::fs::write(&csv_path, "A,1\nB,2\n").unwrap();

    phonebook_cmd(dir.path())
        .write_stdin(format!("2\n{}\n7\n8\n", csv_path.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 contacts"))
        .stdout(predicate::str::contains("1: A 1\n2: B 2\n"));
}

#[test]
fn logs_are_written_to_log_dir() {
    let dir = tempfile::tempdir().unwrap();

    phonebook_cmd(dir.path())
        .arg("--log-level")
        .arg("info")
        .write_stdin("8\n")
        .assert()
        .success();

    let log_files: Vec<_> = std::fs::read_dir(dir.path().join("logs"))
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("phonebook"))
        .collect();
    assert!(!log_files.is_empty());

    let contents: String = log_files
        .iter()
        .map(|entry| std::fs::read_to_string(entry.path()).unwrap())
        .collect();
    assert!(contents.contains("event=app_start"));
    assert!(contents.contains(&format!("version={}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn unsupported_log_level_fails_fast() {
    let dir = tempfile::tempdir().unwrap();

    phonebook_cmd(dir.path())
        .arg("--log-level")
        .arg("loud")
        .write_stdin("8\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported log level"));
}

#[test]
fn missing_config_file_fails_fast() {
    let dir = tempfile::tempdir().unwrap();

    phonebook_cmd(dir.path())
        .arg("--config")
        .arg(dir.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.toml"));
}
