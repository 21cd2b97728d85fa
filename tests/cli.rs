use std::path::PathBuf;
use std::process::{Command, Output};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_je-analyzer"))
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

#[test]
fn missing_input_exits_nonzero_without_creating_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("does_not_exist.xlsx");
    let output = dir.path().join("reports");

    let result = run(&[
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("input error"), "stderr = {}", stderr);
    assert!(!output.exists(), "output directory must not be created on input failure");
}

#[test]
fn missing_required_args_fail_with_usage() {
    let result = run(&[]);
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("--input"), "stderr = {}", stderr);
}
