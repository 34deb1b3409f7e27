//! End-to-end tests of the `kitec` binary.

use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn kitec_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_kitec"))
}

/// Writes `source` to a tempfile and returns it (the file is deleted on
/// drop).
fn source_file(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(source.as_bytes())
        .expect("failed to write source");
    file
}

#[test]
fn test_prints_to_stdout_and_exits_zero() {
    let file = source_file("print 5;");

    Command::new(kitec_bin())
        .arg(file.path())
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn test_runs_a_program_with_every_scalar_type() {
    let file = source_file(
        "bool b = not false or 1 == 1 and true != true;\n\
         int i = 3 + 2 * 4.89 as int;\n\
         float f = (2 as float) * (2.0 / 2 as float);\n\
         print i;\n\
         print f;\n\
         print b;\n",
    );

    Command::new(kitec_bin())
        .arg(file.path())
        .assert()
        .success()
        .stdout("11\n2\ntrue\n");
}

#[test]
fn test_runtime_errors_land_on_stderr_with_their_position() {
    let file = source_file("const float pi = 3.14;\npi = 3;");

    Command::new(kitec_bin())
        .arg(file.path())
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("assignment to const at 2:1"));
}

#[test]
fn test_lexical_errors_name_the_offending_character() {
    let file = source_file("int i = &3;");

    Command::new(kitec_bin())
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown token starting with '&'"));
}

#[test]
fn test_syntax_errors_abort_before_any_output() {
    let file = source_file("print 1;\nint x 5;");

    Command::new(kitec_bin())
        .arg(file.path())
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("syntax error at 2:7"));
}

#[test]
fn test_missing_argument_is_a_usage_error() {
    Command::new(kitec_bin())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("usage: kitec"));
}

#[test]
fn test_extra_arguments_are_a_usage_error() {
    Command::new(kitec_bin())
        .args(["a.kite", "b.kite"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("usage: kitec"));
}

#[test]
fn test_unreadable_files_are_reported() {
    Command::new(kitec_bin())
        .arg("definitely/not/here.kite")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read source file"));
}

#[test]
fn test_output_streams_before_a_late_error() {
    // The first print executes; the failure happens afterwards.
    let file = source_file("print 1;\nprint missing;");

    Command::new(kitec_bin())
        .arg(file.path())
        .assert()
        .failure()
        .stdout("1\n")
        .stderr(predicate::str::contains("variable missing not found"));
}
