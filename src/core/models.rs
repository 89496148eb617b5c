//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the harness.
//! It includes the discovered test inputs, the path-based expectation tag,
//! captured subprocess results and the final per-test outcome.
//!
//! 此模块定义了整个测试工具中使用的核心数据结构。
//! 它包括发现的测试输入、基于路径的预期标签、
//! 捕获的子进程结果和最终的单测试结果。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Base name the external compiler uses for everything it writes into
/// the working directory (`a.asm`, `a.o`, `a.out`).
/// 外部编译器写入工作目录的所有文件使用的基本名称（`a.asm`、`a.o`、`a.out`）。
pub const ARTIFACT_STEM: &str = "a";

/// Recognized artifact extensions, in relocation order.
/// 识别的产物扩展名，按归档顺序排列。
pub const ARTIFACT_EXTS: [&str; 3] = ["asm", "o", "out"];

/// Extension of the runnable artifact produced by a successful compile.
/// 成功编译产生的可运行产物的扩展名。
pub const EXEC_EXT: &str = "out";

/// Compiler exit codes tolerated for tests that are expected to pass.
/// 对预期通过的测试可容忍的编译器退出码。
pub const PASS_CODES: [i32; 3] = [0, 1, 3];

/// Compiler exit codes accepted for tests that are expected to fail.
/// A clean exit (0) on such a test is an unexpected success.
/// 对预期失败的测试可接受的编译器退出码。
/// 此类测试干净退出（0）属于意外成功。
pub const FAIL_CODES: [i32; 2] = [1, 3];

/// Per-test expectation, derived once at discovery time from whether the
/// test's path contains the configured failing marker.
/// 每个测试的预期，在发现时根据测试路径是否包含配置的失败标记派生一次。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Expectation {
    /// The compiler is expected to succeed, or fail only in tolerated ways.
    /// 预期编译器成功，或仅以可容忍的方式失败。
    Pass,
    /// The compiler is expected to reject the input.
    /// 预期编译器拒绝该输入。
    Fail,
}

impl Expectation {
    /// Derives the expectation from a test path and the failing marker substring.
    pub fn from_path(path: &Path, failing_marker: &str) -> Self {
        if path.to_string_lossy().contains(failing_marker) {
            Expectation::Fail
        } else {
            Expectation::Pass
        }
    }

    /// The set of compiler exit codes that classify as acceptable for this expectation.
    pub fn acceptable_codes(&self) -> &'static [i32] {
        match self {
            Expectation::Pass => &PASS_CODES,
            Expectation::Fail => &FAIL_CODES,
        }
    }

    /// Whether the observed compiler exit code is acceptable.
    pub fn accepts(&self, code: i32) -> bool {
        self.acceptable_codes().contains(&code)
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Pass => write!(f, "expect-pass"),
            Expectation::Fail => write!(f, "expect-fail"),
        }
    }
}

/// A single discovered test source file. Immutable after discovery.
/// 单个发现的测试源文件。发现后不可变。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestInput {
    /// Absolute path to the source file, handed to the compiler verbatim.
    /// 源文件的绝对路径，原样交给编译器。
    pub path: PathBuf,
    /// Path relative to the test-base root; identifies the test and mirrors
    /// the directory layout inside the results tree.
    /// 相对于测试根目录的路径；标识测试并在结果树中镜像目录布局。
    pub rel_path: PathBuf,
    /// File name without the source extension; artifact and companion files
    /// are renamed to this stem.
    /// 不带源扩展名的文件名；产物和伴随文件重命名为此名称。
    pub stem: String,
    /// Whether this input is expected to compile or to be rejected.
    /// 该输入预期能编译还是预期被拒绝。
    pub expectation: Expectation,
}

impl TestInput {
    /// Builds a `TestInput` from an absolute source path and the test-base root.
    ///
    /// 从绝对源路径和测试根目录构建 `TestInput`。
    pub fn new(path: PathBuf, testbase: &Path, failing_marker: &str) -> Result<Self> {
        let rel_path = path
            .strip_prefix(testbase)
            .with_context(|| {
                format!(
                    "Test file {} is not under the test base {}",
                    path.display(),
                    testbase.display()
                )
            })?
            .to_path_buf();
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .with_context(|| format!("Test file {} has no usable stem", path.display()))?
            .to_string();
        let expectation = Expectation::from_path(&path, failing_marker);
        Ok(Self {
            path,
            rel_path,
            stem,
            expectation,
        })
    }

    /// Human-readable test identifier: the path relative to the test base.
    pub fn id(&self) -> String {
        self.rel_path.display().to_string()
    }

    /// Directory under the results root that mirrors this test's location.
    pub fn results_subdir(&self) -> &Path {
        self.rel_path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Captured outcome of one subprocess invocation. Never mutated after creation.
/// 一次子进程调用的捕获结果。创建后从不修改。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResult {
    /// Captured standard output, text mode.
    /// 捕获的标准输出，文本模式。
    pub stdout: String,
    /// Captured standard error, text mode.
    /// 捕获的标准错误，文本模式。
    pub stderr: String,
    /// OS exit code; `-1` when the process was terminated by a signal.
    /// 操作系统退出码；进程被信号终止时为 `-1`。
    pub code: i32,
}

impl ProcessResult {
    pub fn new(status: std::process::ExitStatus, stdout: String, stderr: String) -> Self {
        Self {
            stdout,
            stderr,
            code: status.code().unwrap_or(-1),
        }
    }
}

/// Enumerates the possible reasons for a test failure.
/// This helps in categorizing errors for reporting and handling.
/// 枚举测试失败的可能原因。
/// 这有助于对错误进行分类，以便报告和处理。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum FailureReason {
    /// The compiler exited with a code outside the acceptable set for the
    /// test's expectation.
    /// 编译器以超出该测试预期可接受集合的退出码退出。
    UnexpectedExit,
    /// An artifact the harness detected could not be relocated into the
    /// results tree, or artifacts were left behind in the scratch directory.
    /// 测试工具检测到的产物无法归档到结果树中，或产物遗留在临时目录中。
    Relocation,
    /// The test exceeded its configured timeout.
    /// 测试超出了其配置的超时时间。
    Timeout,
    /// The harness could not set the test up or launch an external process.
    /// 测试工具无法准备该测试或无法启动外部进程。
    Spawn,
}

impl FailureReason {
    pub fn describe(&self) -> &'static str {
        match self {
            FailureReason::UnexpectedExit => "Unexpected Exit Code",
            FailureReason::Relocation => "Artifact Relocation Failure",
            FailureReason::Timeout => "Timeout",
            FailureReason::Spawn => "Process Launch Failure",
        }
    }
}

/// Represents the final result of a single regression test.
/// 表示单个回归测试的最终结果。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TestResult {
    /// The compiler exit code was acceptable for the test's expectation.
    /// Note that for expect-fail inputs this means the compiler *failed*
    /// in a tolerated way.
    /// 编译器退出码对该测试的预期而言可以接受。
    /// 注意对预期失败的输入，这表示编译器以可容忍的方式*失败*了。
    Passed {
        /// The discovered input that was tested / 被测试的发现输入
        test: TestInput,
        /// The compiler's exit code / 编译器的退出码
        compile_code: i32,
        /// Exit code of the compiled program, when it was run / 编译产物程序运行时的退出码
        exec_code: Option<i32>,
        /// Artifacts relocated into the results tree / 归档到结果树中的产物
        artifacts: Vec<PathBuf>,
        /// Wall-clock time for the whole pipeline / 整个流水线的实际耗时
        duration: Duration,
    },
    /// The test failed: unacceptable exit code, relocation violation,
    /// timeout, or a process that could not be launched.
    /// 测试失败：不可接受的退出码、归档违规、超时或无法启动的进程。
    Failed {
        /// The discovered input that was tested / 被测试的发现输入
        test: TestInput,
        /// Diagnostic output describing the failure / 描述失败的诊断输出
        output: String,
        /// The specific reason for the failure / 失败的具体原因
        reason: FailureReason,
        /// Time spent before the failure surfaced / 失败出现前的耗时
        duration: Duration,
    },
    /// The test never ran because the run was cancelled.
    /// 由于运行被取消，该测试从未执行。
    Skipped,
}

impl TestResult {
    /// Checks if the test result is any kind of failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, TestResult::Failed { .. })
    }

    /// Whether this is a passing result for an expect-fail input, i.e. the
    /// compiler rejected the file as the corpus layout said it would.
    pub fn is_expected_compile_failure(&self) -> bool {
        matches!(
            self,
            TestResult::Passed { test, .. } if test.expectation == Expectation::Fail
        )
    }

    /// Gets the identifier of the test. Returns "Skipped" for skipped tests.
    /// 获取测试的标识符。对于跳过的测试，返回 "Skipped"。
    pub fn case_name(&self) -> String {
        match self {
            TestResult::Passed { test, .. } => test.id(),
            TestResult::Failed { test, .. } => test.id(),
            TestResult::Skipped => "Skipped".to_string(),
        }
    }

    /// Gets the status of the test result as a string for display.
    /// 以字符串形式获取测试结果的状态以供显示。
    pub fn get_status_str(&self) -> String {
        match self {
            TestResult::Passed { .. } => {
                if self.is_expected_compile_failure() {
                    "Failed as Expected".to_string()
                } else {
                    "Passed".to_string()
                }
            }
            TestResult::Failed { reason, .. } => {
                if *reason == FailureReason::Timeout {
                    "Timeout".to_string()
                } else {
                    "Failed".to_string()
                }
            }
            TestResult::Skipped => "Skipped".to_string(),
        }
    }

    /// Gets the appropriate CSS class for the test status.
    pub fn get_status_class(&self) -> &str {
        match self {
            TestResult::Passed { .. } => {
                if self.is_expected_compile_failure() {
                    "status-Expected-Failure"
                } else {
                    "status-Passed"
                }
            }
            TestResult::Failed { reason, .. } => {
                if *reason == FailureReason::Timeout {
                    "status-Timeout"
                } else {
                    "status-Failed"
                }
            }
            TestResult::Skipped => "status-Skipped",
        }
    }

    /// Gets the diagnostic output of the test. Empty for non-failures.
    pub fn get_output(&self) -> String {
        match self {
            TestResult::Failed { output, .. } => output.clone(),
            _ => String::new(),
        }
    }

    /// Gets the duration of the test. Returns None if not applicable.
    /// 获取测试的持续时间。如果不适用，则返回 None。
    pub fn get_duration(&self) -> Option<Duration> {
        match self {
            TestResult::Passed { duration, .. } => Some(*duration),
            TestResult::Failed { duration, .. } => Some(*duration),
            TestResult::Skipped => None,
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.case_name(), self.get_status_str())
    }
}
