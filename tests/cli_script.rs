use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn script(home: &TempDir, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("debt_ledger_cli")
        .unwrap()
        .env("DEBT_LEDGER_CLI_SCRIPT", "1")
        .env("DEBT_LEDGER_HOME", home.path())
        .env_remove("RUST_LOG")
        .write_stdin(input.to_string())
        .assert()
}

#[test]
fn script_mode_records_debt_and_payments() {
    let home = TempDir::new().unwrap();
    script(&home, "add \"Ana Souza\" 100 concert tickets\nlist\nexit\n")
        .success()
        .stdout(contains("created for Ana Souza"))
        .stdout(contains("[open]"));

    let stored = std::fs::read_to_string(home.path().join("store/debt-tracker-data.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stored).unwrap();
    let id = value["debts"][0]["id"].as_str().unwrap().to_string();
    let prefix = &id[..8];

    script(
        &home,
        &format!("pay {prefix} 60\npay {prefix} 40 cash\nnote {prefix} \"paid in full\"\nsummary\n"),
    )
    .success()
    .stdout(contains("Remaining $40.00 (open)"))
    .stdout(contains("Remaining $0.00 (paid)"))
    .stdout(contains("1 debts (0 open, 1 paid)"));
}

#[test]
fn errors_are_reported_and_the_shell_continues() {
    let home = TempDir::new().unwrap();
    script(
        &home,
        "add Bob -5\ntoggle 00000000-0000-0000-0000-000000000000\nadd Bob 5\nlist\n",
    )
    .success()
    .stderr(contains("must be greater than zero"))
    .stderr(contains("Debt not found"))
    .stdout(contains("created for Bob"));
}

#[test]
fn corrupt_store_aborts_startup() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join("store")).unwrap();
    std::fs::write(home.path().join("store/debt-tracker-data.json"), "not json").unwrap();

    script(&home, "list\n")
        .failure()
        .stderr(contains("Stored ledger is corrupt"));
}
