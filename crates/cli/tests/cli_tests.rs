use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quotebook(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("quotebook").unwrap();
    cmd.env("QUOTEBOOK_DB_PATH", dir.path().join("quotes.db"))
        .env_remove("DATABASE_URL")
        .env("RUST_LOG", "warn");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("quotebook").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("weighted random selection"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("quotebook").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_random_on_empty_database_prints_null() {
    let dir = TempDir::new().unwrap();
    quotebook(&dir).arg("random").assert().success().stdout(predicate::str::contains("null"));
}

#[test]
fn test_add_source_quote_and_list() {
    let dir = TempDir::new().unwrap();

    let source = stdout_json(quotebook(&dir).args(["add-source", "The Matrix", "--type", "movie", "--year", "1999"]));
    assert_eq!(source["title"], "The Matrix");
    assert_eq!(source["source_type"], "movie");
    let source_id = source["id"].as_i64().unwrap().to_string();

    let quote = stdout_json(quotebook(&dir).args(["add-quote", "There is no spoon.", "--source", &source_id]));
    assert_eq!(quote["weight"], 1);

    let sources = stdout_json(quotebook(&dir).arg("sources"));
    assert_eq!(sources[0]["quote_count"], 1);

    let shown = stdout_json(quotebook(&dir).arg("random"));
    assert_eq!(shown["text"], "There is no spoon.");
    assert_eq!(shown["views"], 1);

    let popular = stdout_json(quotebook(&dir).args(["popular", "--limit", "3"]));
    assert_eq!(popular["by_views"][0]["text"], "There is no spoon.");
    assert_eq!(popular["by_ratio"].as_array().unwrap().len(), 0);
}

#[test]
fn test_duplicate_quote_is_rejected() {
    let dir = TempDir::new().unwrap();
    let source = stdout_json(quotebook(&dir).args(["add-source", "Dune", "--type", "book"]));
    let source_id = source["id"].as_i64().unwrap().to_string();

    quotebook(&dir).args(["add-quote", "Fear is the mind-killer.", "--source", &source_id]).assert().success();
    quotebook(&dir)
        .args(["add-quote", "  FEAR IS THE MIND-KILLER. ", "--source", &source_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists (source: Dune)"));
}

#[test]
fn test_set_weight_and_delete_source() {
    let dir = TempDir::new().unwrap();
    let source = stdout_json(quotebook(&dir).args(["add-source", "Heat", "--type", "movie"]));
    let source_id = source["id"].as_i64().unwrap().to_string();
    let quote = stdout_json(quotebook(&dir).args(["add-quote", "Don't let yourself get attached.", "--source", &source_id]));
    let quote_id = quote["id"].as_i64().unwrap().to_string();

    let updated = stdout_json(quotebook(&dir).args(["set-weight", &quote_id, "0"]));
    assert_eq!(updated["weight"], 0);
    quotebook(&dir).args(["set-weight", &quote_id, "-2"]).assert().failure();

    quotebook(&dir).args(["delete-source", &source_id]).assert().success();
    let quotes = stdout_json(quotebook(&dir).arg("quotes"));
    assert!(quotes.as_array().unwrap().is_empty());
    quotebook(&dir).args(["delete-source", &source_id]).assert().failure();
}
