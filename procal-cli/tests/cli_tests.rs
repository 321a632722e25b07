//! Integration tests for the procal CLI.
//!
//! These tests invoke the `procal` binary as a subprocess and check
//! exit codes, stdout, and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn procal() -> Command {
    Command::cargo_bin("procal").unwrap()
}

/// Return the workspace root (parent of procal-cli/).
fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .to_path_buf()
}

/// Return the absolute path to a sample program file.
fn test_program(name: &str) -> String {
    workspace_root()
        .join("tests/programs")
        .join(name)
        .to_str()
        .unwrap()
        .to_string()
}

/// Helper: write program text into a temp dir and return its path.
fn write_temp(dir: &TempDir, text: &str) -> String {
    let path = dir.path().join("test.pcl");
    fs::write(&path, text).unwrap();
    path.to_str().unwrap().to_string()
}

// ---- No-args / help ----

#[test]
fn no_args_prints_usage_and_exits_1() {
    procal()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: procal"));
}

#[test]
fn help_flag_exits_0() {
    procal()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn unknown_command_exits_1() {
    procal()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("frobnicate"));
}

// ---- Run ----

#[test]
fn run_arithmetic() {
    procal()
        .args(["run", &test_program("arithmetic.pcl")])
        .assert()
        .success()
        .stdout("4\n");
}

#[test]
fn run_reads_input_values() {
    procal()
        .args(["run", &test_program("sum_of_squares.pcl")])
        .write_stdin("3\n4\n")
        .assert()
        .success()
        .stdout("25\n")
        .stderr(predicate::str::contains("a?").and(predicate::str::contains("b?")));
}

#[test]
fn run_with_step_over_gives_same_result() {
    procal()
        .args(["run", "--step-over", &test_program("sum_of_squares.pcl")])
        .write_stdin("3\n4\n")
        .assert()
        .success()
        .stdout("25\n");
}

#[test]
fn run_reprompts_on_invalid_number() {
    procal()
        .args(["run", &test_program("sum_of_squares.pcl")])
        .write_stdin("three\n3\n4\n")
        .assert()
        .success()
        .stdout("25\n")
        .stderr(predicate::str::contains("invalid number 'three'"));
}

#[test]
fn run_input_ends_early_exits_1() {
    procal()
        .args(["run", &test_program("sum_of_squares.pcl")])
        .write_stdin("3\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("input ended"));
}

#[test]
fn run_prints_stack_bottom_first() {
    let dir = TempDir::new().unwrap();
    let path = write_temp(&dir, "FUNC main\n  PUSH 1\n  PUSH 2.5\n  PUSH -3\n");
    procal()
        .args(["run", &path])
        .assert()
        .success()
        .stdout("1\n2.5\n-3\n");
}

#[test]
fn run_empty_stack_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let path = write_temp(&dir, "FUNC main\n");
    procal()
        .args(["run", &path])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn run_division_by_zero_exits_3() {
    procal()
        .args(["run", &test_program("divide_by_zero.pcl")])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("division by zero at main:2"));
}

#[test]
fn run_without_main_exits_3() {
    procal()
        .args(["run", &test_program("no_main.pcl")])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("no 'main' function found"));
}

#[test]
fn run_unknown_label_exits_3() {
    let dir = TempDir::new().unwrap();
    let path = write_temp(&dir, "FUNC main\n  GOTO nowhere\n");
    procal()
        .args(["run", &path])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("label not found: 'nowhere'"));
}

#[test]
fn run_step_limit_exits_4() {
    procal()
        .args(["run", "--max-steps", "50", &test_program("forever.pcl")])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("step limit of 50 exceeded"));
}

#[test]
fn run_missing_file_exits_1() {
    procal()
        .args(["run", "nonexistent.pcl"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn run_assembly_error_exits_1() {
    let dir = TempDir::new().unwrap();
    let path = write_temp(&dir, "FUNC main\n  SQRT\n");
    procal()
        .args(["run", &path])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error:").and(predicate::str::contains("line 2")));
}

// ---- List ----

#[test]
fn list_prints_canonical_text() {
    let dir = TempDir::new().unwrap();
    let path = write_temp(&dir, "func main ; entry\npush 1.50\ncall sq\nfunc sq\ndup\nmul\n");
    procal()
        .args(["list", &path])
        .assert()
        .success()
        .stdout("FUNC main\n  PUSH 1.5\n  CALL sq\n\nFUNC sq\n  DUP\n  MUL\n");
}

// ---- Debug ----

#[test]
fn debug_steps_and_shows_state() {
    procal()
        .args(["debug", &test_program("arithmetic.pcl")])
        .write_stdin("s\ns\nstack\nq\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("main:0  PUSH 5")
                .and(predicate::str::contains("main:2  SUB"))
                .and(predicate::str::contains("stack: [5, 3]")),
        );
}

#[test]
fn debug_answers_input() {
    procal()
        .args(["debug", &test_program("sum_of_squares.pcl")])
        .write_stdin("s\ni 3\nn\nwhere\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("waiting for input: a?")
                .and(predicate::str::contains("square:0  DUP"))
                .and(predicate::str::contains("called from main:1")),
        );
}

#[test]
fn debug_without_main_exits_3() {
    procal()
        .args(["debug", &test_program("no_main.pcl")])
        .assert()
        .failure()
        .code(3);
}
