#![allow(dead_code)]
use assert_cmd::{cargo_bin_cmd, Command};
use tempfile::TempDir;

/// `village` command pointed at an isolated data directory
pub fn village(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("village");
    cmd.env("VILLAGE_DATA_DIR", dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Initialize a ledger with Alice (u1) and Bob (u2)
pub fn init_with_members() -> TempDir {
    let dir = TempDir::new().unwrap();

    village(&dir).arg("init").assert().success();
    village(&dir)
        .args(["member", "add", "Alice", "--id", "u1"])
        .assert()
        .success();
    village(&dir)
        .args(["member", "add", "Bob", "--id", "u2"])
        .assert()
        .success();

    dir
}
