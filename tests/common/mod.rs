use assert_cmd::Command;
use std::path::Path;

pub fn hiitfit_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hiitfit").unwrap();
    cmd.env_remove("HIITFIT_HOME");
    cmd.env_remove("RUST_LOG");
    cmd.arg("--dir").arg(dir);
    cmd
}
