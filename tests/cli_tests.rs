use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "deben";
const LEDGER: &str = "# my ledger\n2024/01/05\t+1000.00\tSalary\n2024/01/10\t-250.00\tGroceries\n";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    fn with_ledger(contents: &str) -> Self {
        let workspace = Self::new();
        fs::write(workspace.ledger(), contents).expect("write ledger");
        workspace
    }

    fn ledger(&self) -> PathBuf {
        self.dir.path().join("ledger.txt")
    }

    fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
        cmd.env("DEBEN_CONFIG_DIR", self.config_dir())
            .env_remove("DEBEN_FILE")
            .env_remove("RUST_LOG")
            .arg("--no-color")
            .arg("--path")
            .arg(self.ledger());
        cmd
    }

    fn read_ledger(&self) -> String {
        read(&self.ledger())
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read ledger")
}

#[test]
fn cli_default_prints_totals() {
    let workspace = Workspace::with_ledger(LEDGER);

    workspace
        .command()
        .assert()
        .success()
        .stdout(contains("| In:    1000.00 |"))
        .stdout(contains("| Out:   -250.00 |"))
        .stdout(contains("| Total:  750.00 |"));
}

#[test]
fn cli_read_only_commands_leave_file_untouched() {
    let workspace = Workspace::with_ledger("2024/01/10\t-250\tGroceries\n# late comment\n");

    workspace.command().arg("list").assert().success();
    workspace.command().arg("graph").assert().success();

    assert_eq!(
        workspace.read_ledger(),
        "2024/01/10\t-250\tGroceries\n# late comment\n"
    );
}

#[test]
fn cli_add_writes_sorted_record() {
    let workspace = Workspace::with_ledger(LEDGER);

    workspace
        .command()
        .args(["add", "+20", "Gift", "from", "Ana", "07/01/2024"])
        .assert()
        .success()
        .stdout(contains("Total:  770.00"));

    assert_eq!(
        workspace.read_ledger(),
        "# my ledger\n\
         2024/01/05\t+1000.00\tSalary\n\
         2024/01/07\t+20.00\tGift from Ana\n\
         2024/01/10\t-250.00\tGroceries\n"
    );
}

#[test]
fn cli_bare_amount_is_an_expense() {
    let workspace = Workspace::with_ledger(LEDGER);

    workspace
        .command()
        .args(["12.5", "coffee", "20/01/2024"])
        .assert()
        .success()
        .stdout(contains("Out:   -262.50"));

    assert!(workspace
        .read_ledger()
        .ends_with("2024/01/20\t-12.50\tcoffee\n"));
}

#[test]
fn cli_bare_negative_amount_is_added() {
    let workspace = Workspace::with_ledger(LEDGER);

    workspace
        .command()
        .args(["-5", "lunch", "20/01/2024"])
        .assert()
        .success()
        .stdout(contains("Out:   -255.00"));

    assert!(workspace
        .read_ledger()
        .ends_with("2024/01/20\t-5.00\tlunch\n"));
}

#[test]
fn cli_unknown_command_fails() {
    let workspace = Workspace::with_ledger(LEDGER);

    workspace
        .command()
        .arg("lsit")
        .assert()
        .failure()
        .stderr(contains("Unknown command"));

    assert_eq!(workspace.read_ledger(), LEDGER);
}

#[test]
fn cli_delete_defaults_to_last() {
    let workspace = Workspace::with_ledger(LEDGER);

    workspace
        .command()
        .arg("delete")
        .assert()
        .success()
        .stdout(contains("Total: 1000.00"));

    assert_eq!(
        workspace.read_ledger(),
        "# my ledger\n2024/01/05\t+1000.00\tSalary\n"
    );
}

#[test]
fn cli_delete_out_of_range_warns() {
    let workspace = Workspace::with_ledger(LEDGER);

    workspace
        .command()
        .args(["delete", "5"])
        .assert()
        .success()
        .stderr(contains("doesn't exist"));

    assert_eq!(workspace.read_ledger(), LEDGER);
}

#[test]
fn cli_list_shows_months_and_indices() {
    let workspace = Workspace::with_ledger(LEDGER);

    workspace
        .command()
        .args(["list", "1"])
        .assert()
        .success()
        .stdout(contains("Operations: 1/2 entries."))
        .stdout(contains("|1|"))
        .stdout(contains("Groceries"))
        .stdout(contains("Salary").not());
}

#[test]
fn cli_graph_prints_legend() {
    let workspace = Workspace::with_ledger(LEDGER);

    workspace
        .command()
        .args(["graph", "3", "6"])
        .assert()
        .success()
        .stdout(contains("#: total"))
        .stdout(contains("+: in"))
        .stdout(contains("x: out"));
}

#[test]
fn cli_invalid_utf8_is_reported() {
    let workspace = Workspace::new();
    fs::write(
        workspace.ledger(),
        b"# caf\xe9\n2024/01/05\t+10.00\tSalary\n",
    )
    .expect("write ledger");

    workspace
        .command()
        .assert()
        .success()
        .stdout(contains("In:    10.00"))
        .stderr(contains("invalid UTF-8"));
}

#[test]
fn cli_missing_ledger_is_empty() {
    let workspace = Workspace::new();

    workspace
        .command()
        .assert()
        .success()
        .stdout(contains("Total:"));

    assert!(!workspace.ledger().exists());
}

#[test]
fn cli_settings_pick_default_ledger() {
    let workspace = Workspace::new();
    fs::create_dir_all(workspace.config_dir()).expect("config dir");

    Command::cargo_bin(BIN_NAME)
        .expect("binary exists")
        .env("DEBEN_CONFIG_DIR", workspace.config_dir())
        .env_remove("DEBEN_FILE")
        .args(["add", "+5", "Found"])
        .assert()
        .success();

    let default_ledger = workspace.config_dir().join("ledger.txt");
    assert!(read(&default_ledger).contains("\t+5.00\tFound"));
}

#[test]
fn cli_env_file_is_used() {
    let workspace = Workspace::with_ledger(LEDGER);

    Command::cargo_bin(BIN_NAME)
        .expect("binary exists")
        .env("DEBEN_CONFIG_DIR", workspace.config_dir())
        .env("DEBEN_FILE", workspace.ledger())
        .assert()
        .success()
        .stdout(contains("Total:  750.00"));
}

#[test]
fn cli_config_command_reports_paths() {
    let workspace = Workspace::new();

    workspace
        .command()
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Config directory:"))
        .stdout(contains("ledger.txt (0 operations)"));
}

#[test]
fn cli_license_and_version() {
    let workspace = Workspace::new();

    workspace
        .command()
        .arg("--license")
        .assert()
        .success()
        .stdout(contains("MIT License"));

    workspace
        .command()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("deben").or(contains(env!("CARGO_PKG_VERSION"))));
}
