use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI binary with arguments against an isolated data directory.
pub fn run_cli(args: &[&str], data_dir: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_paddock"));
    cmd.arg("--data-dir");
    cmd.arg(data_dir);
    cmd.args(args);
    // Keep the runtime URL pointed somewhere unreachable so a stray
    // `--runtime` call fails fast instead of touching a real runtime.
    cmd.env("PADDOCK_RUNTIME_URL", "http://127.0.0.1:1");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_success(args: &[&str], data_dir: &Path) -> String {
    let output = run_cli(args, data_dir);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}
