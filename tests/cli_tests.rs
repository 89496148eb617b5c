//! # CLI Integration Tests / 命令行集成测试
//!
//! Runs the `zpp-regress` binary end to end: configuration errors,
//! the init wizard in non-interactive mode, and full suite runs
//! against a stub compiler.
//!
//! 端到端运行 `zpp-regress` 二进制：配置错误、非交互模式的 init 向导，
//! 以及针对桩编译器的完整套件运行。
#![cfg(unix)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

use zpp_regress::config::HarnessConfig;

mod common;

/// A working directory with a corpus, a stub compiler and a config file
/// pointing the harness at both.
fn setup_workdir(stub_body: &str) -> tempfile::TempDir {
    let workdir = tempdir().unwrap();
    let corpus = workdir.path().join("corpus");
    common::write_test_source(&corpus, "basic/hello.cpp");
    common::write_test_source(&corpus, "failing/bad_syntax.cpp");

    let stub = common::write_stub_compiler(workdir.path(), "zpp-stub", stub_body);

    let config = format!(
        "compiler = \"{} -d\"\ntestbase = \"{}\"\ntimeout_secs = 30\n",
        stub.display(),
        corpus.display()
    );
    fs::write(workdir.path().join("ZppRegress.toml"), config).unwrap();

    workdir
}

#[test]
fn run_without_any_testbase_is_a_fatal_configuration_error() {
    let workdir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("zpp-regress").unwrap();
    cmd.arg("run")
        .current_dir(workdir.path())
        .env_remove("ZPP_TESTBASE");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("ZPP_TESTBASE"))
        .stderr(predicate::str::contains("--testbase"));
}

#[test]
fn a_green_suite_exits_zero_and_archives_results() {
    let workdir = setup_workdir(common::FULL_STUB);

    let mut cmd = Command::cargo_bin("zpp-regress").unwrap();
    cmd.arg("run").current_dir(workdir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("REGRESSION SUITE PASSED SUCCESSFULLY"))
        .stdout(predicate::str::contains("Rejected as expected"));

    let results = workdir.path().join("results/cpp_testbase");
    assert!(results.join("basic/hello.out").exists());
    assert_eq!(
        fs::read_to_string(results.join("basic/hello-compile.status")).unwrap(),
        "0"
    );
    assert_eq!(
        fs::read_to_string(results.join("failing/bad_syntax-compile.status")).unwrap(),
        "1"
    );
}

#[test]
fn an_unexpected_success_fails_the_suite() {
    let workdir = setup_workdir(common::ACCEPT_ALL_STUB);

    let mut cmd = Command::cargo_bin("zpp-regress").unwrap();
    cmd.arg("run").current_dir(workdir.path());

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("UNEXPECTED FAILURE DETECTED"))
        .stdout(predicate::str::contains("Unexpected Exit Code"));
}

#[test]
fn the_testbase_can_come_from_the_environment() {
    let workdir = tempdir().unwrap();
    let corpus = workdir.path().join("corpus");
    common::write_test_source(&corpus, "basic/hello.cpp");
    let stub = common::write_stub_compiler(workdir.path(), "zpp-stub", common::FULL_STUB);

    // Config without a testbase; only the compiler command.
    fs::write(
        workdir.path().join("ZppRegress.toml"),
        format!("compiler = \"{} -d\"\n", stub.display()),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("zpp-regress").unwrap();
    cmd.arg("run")
        .current_dir(workdir.path())
        .env("ZPP_TESTBASE", &corpus);

    cmd.assert().success();
}

#[test]
fn reports_are_written_when_requested() {
    let workdir = setup_workdir(common::FULL_STUB);

    let mut cmd = Command::cargo_bin("zpp-regress").unwrap();
    cmd.arg("run")
        .arg("--html")
        .arg("report.html")
        .arg("--json")
        .arg("summary.json")
        .current_dir(workdir.path());

    cmd.assert().success();

    let html = fs::read_to_string(workdir.path().join("report.html")).unwrap();
    assert!(html.contains("z++ Regression Report"));
    assert!(html.contains("basic/hello.cpp"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(workdir.path().join("summary.json")).unwrap())
            .unwrap();
    assert_eq!(json["total"], 2);
    assert_eq!(json["failed"], 0);
}

#[test]
fn sharded_runners_split_the_corpus() {
    let workdir = setup_workdir(common::FULL_STUB);

    let mut cmd = Command::cargo_bin("zpp-regress").unwrap();
    cmd.args(["run", "--total-runners", "2", "--runner-index", "0"])
        .current_dir(workdir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Running as runner 1/2 with 1 tests"));
}

#[test]
fn init_non_interactive_writes_a_parseable_default_config() {
    let workdir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("zpp-regress").unwrap();
    cmd.args(["init", "--non-interactive"])
        .current_dir(workdir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Created ZppRegress.toml"));

    let content = fs::read_to_string(workdir.path().join("ZppRegress.toml")).unwrap();
    let config: HarnessConfig = toml::from_str(&content).unwrap();
    assert_eq!(config.compiler, "z++ -d");
}
