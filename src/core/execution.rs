//! # Test Execution Engine Module / 测试执行引擎模块
//!
//! This module drives a single regression test through its full lifecycle:
//! compile the input in a private scratch directory, optionally run the
//! produced program, relocate artifacts into the results tree, persist the
//! captured streams and classify the compiler's exit code against the
//! test's expectation.
//!
//! 此模块驱动单个回归测试完成其完整生命周期：
//! 在私有临时目录中编译输入，可选地运行产生的程序，
//! 将产物归档到结果树中，持久化捕获的流，
//! 并根据测试的预期对编译器的退出码进行分类。

use anyhow::{bail, Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::Duration;

use crate::core::config::{HarnessConfig, HarnessMode};
use crate::core::models::{
    FailureReason, ProcessResult, TestInput, TestResult, ARTIFACT_EXTS, ARTIFACT_STEM, EXEC_EXT,
};
use crate::infra::{command, fs as harness_fs};

/// Shared, immutable context for one harness run: the parsed compiler
/// command, the results root and the execution policy.
/// 一次测试工具运行的共享不可变上下文：已解析的编译器命令、
/// 结果根目录和执行策略。
#[derive(Debug)]
pub struct RunContext {
    /// Compiler argv, split once at startup; the test path is appended.
    /// 编译器 argv，在启动时拆分一次；测试路径附加在末尾。
    pub compiler_argv: Vec<String>,
    /// Absolute root of the mirrored results tree.
    /// 镜像结果树的绝对根目录。
    pub results_root: PathBuf,
    /// Compile-only or compile-and-run.
    /// 仅编译或编译并运行。
    pub mode: HarnessMode,
    /// Per-test deadline for the whole pipeline, if configured.
    /// 如果配置了，整个流水线的单测试截止时间。
    pub timeout: Option<Duration>,
}

impl RunContext {
    pub fn new(config: &HarnessConfig, results_root: PathBuf) -> Result<Self> {
        let compiler_argv = command::split_command_line(&config.compiler)
            .with_context(|| format!("Invalid compiler command: {}", config.compiler))?;
        Ok(Self {
            compiler_argv,
            results_root,
            mode: config.mode,
            timeout: (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs)),
        })
    }
}

/// The main entry point for running a single test. Wraps the pipeline in
/// the configured timeout; a test that does not produce a verdict in time
/// is a `Timeout` failure, and dropping the pipeline future kills any
/// still-running child process.
///
/// # Arguments
/// * `test` - The discovered test input to execute
/// * `ctx` - The shared run context
///
/// # Returns
/// A `TestResult` describing the outcome. `Err` is reserved for harness
/// defects that prevented the pipeline from starting at all.
pub async fn run_test_case(test: TestInput, ctx: Arc<RunContext>) -> Result<TestResult> {
    let test_id = test.id();

    let pipeline = run_test_case_inner(test.clone(), &ctx);

    if let Some(deadline) = ctx.timeout {
        match tokio::time::timeout(deadline, pipeline).await {
            Ok(res) => res,
            Err(_) => {
                println!(
                    "{}",
                    format!(
                        "⏱ Test '{}' produced no verdict within {}s",
                        test_id,
                        deadline.as_secs()
                    )
                    .red()
                );
                Ok(TestResult::Failed {
                    test,
                    output: format!("No verdict within {}s", deadline.as_secs()),
                    reason: FailureReason::Timeout,
                    duration: deadline,
                })
            }
        }
    } else {
        pipeline.await
    }
}

/// The pipeline proper: compile, optionally execute, relocate, classify.
async fn run_test_case_inner(test: TestInput, ctx: &RunContext) -> Result<TestResult> {
    let start_time = Instant::now();
    println!("{}", format!("▶ Testing '{}'", test.id()).blue());

    let scratch = harness_fs::create_scratch_dir()?;

    // Compile. A spawn failure (compiler not on PATH, scratch dir vanished)
    // is a per-test failure, not a harness abort.
    // 编译。启动失败（编译器不在 PATH 上、临时目录消失）
    // 是单测试失败，而不是整个工具中止。
    let compile = match invoke_compiler(&test, ctx, scratch.path()).await {
        Ok(result) => result,
        Err(e) => {
            println!(
                "{}",
                format!("✗ Could not launch compiler for '{}'", test.id()).red()
            );
            return Ok(TestResult::Failed {
                test,
                output: format!("{:#}", e),
                reason: FailureReason::Spawn,
                duration: start_time.elapsed(),
            });
        }
    };

    // Run the produced program only on a clean compile, and only in
    // compile-and-run mode. A rejected input never reaches execution.
    // 仅在干净编译且处于编译并运行模式时运行产生的程序。
    // 被拒绝的输入永远不会进入执行阶段。
    let execution = if ctx.mode == HarnessMode::CompileAndRun && compile.code == 0 {
        match run_program(&test, scratch.path()).await {
            Ok(result) => Some(result),
            Err(e) => {
                println!(
                    "{}",
                    format!("✗ Could not launch compiled program for '{}'", test.id()).red()
                );
                return Ok(TestResult::Failed {
                    test,
                    output: format!("{:#}", e),
                    reason: FailureReason::Spawn,
                    duration: start_time.elapsed(),
                });
            }
        }
    } else {
        None
    };

    // Relocate artifacts and persist the captured streams. Any violation of
    // the "nothing left behind" invariant is a hard per-test failure.
    let artifacts = match persist_results(&test, &compile, execution.as_ref(), ctx, scratch.path())
    {
        Ok(artifacts) => artifacts,
        Err(e) => {
            println!(
                "{}",
                format!("✗ Artifact relocation failed for '{}'", test.id()).red()
            );
            return Ok(TestResult::Failed {
                test,
                output: format!("{:#}", e),
                reason: FailureReason::Relocation,
                duration: start_time.elapsed(),
            });
        }
    };

    let duration = start_time.elapsed();
    classify(test, compile, execution, artifacts, duration)
}

/// Invokes the external compiler on the test input with the scratch
/// directory as its working directory, so fixed-named outputs land there.
async fn invoke_compiler(
    test: &TestInput,
    ctx: &RunContext,
    scratch: &Path,
) -> Result<ProcessResult> {
    let (program, args) = ctx
        .compiler_argv
        .split_first()
        .context("Compiler command is empty")?;

    let mut cmd = tokio::process::Command::new(program);
    cmd.args(args)
        .arg(&test.path)
        .kill_on_drop(true)
        .current_dir(scratch);

    let (status_res, stdout, stderr) = command::spawn_and_capture(cmd).await;
    let status = status_res
        .with_context(|| format!("Failed to run compiler '{}' on {}", program, test.id()))?;

    Ok(ProcessResult::new(status, stdout, stderr))
}

/// Runs the compiled program (`a.out` in the scratch directory) with no
/// arguments.
async fn run_program(test: &TestInput, scratch: &Path) -> Result<ProcessResult> {
    let executable = scratch.join(format!("{}.{}", ARTIFACT_STEM, EXEC_EXT));

    let mut cmd = tokio::process::Command::new(&executable);
    cmd.kill_on_drop(true).current_dir(scratch);

    let (status_res, stdout, stderr) = command::spawn_and_capture(cmd).await;
    let status = status_res.with_context(|| {
        format!(
            "Failed to run compiled program {} for {}",
            executable.display(),
            test.id()
        )
    })?;

    Ok(ProcessResult::new(status, stdout, stderr))
}

/// Relocates every recognized `a.<ext>` artifact from the scratch directory
/// into the mirrored results tree as `<stem>.<ext>`, then writes the
/// companion stream files. Enforces the post-condition that no recognized
/// artifact remains in the scratch directory.
///
/// 将临时目录中每个识别的 `a.<ext>` 产物作为 `<stem>.<ext>` 归档到
/// 镜像结果树中，然后写入伴随的流文件。
/// 强制执行临时目录中不留下任何识别产物的后置条件。
fn persist_results(
    test: &TestInput,
    compile: &ProcessResult,
    execution: Option<&ProcessResult>,
    ctx: &RunContext,
    scratch: &Path,
) -> Result<Vec<PathBuf>> {
    let results_dir = ctx.results_root.join(test.results_subdir());
    harness_fs::ensure_dir(&results_dir)?;

    let mut relocated = Vec::new();
    for ext in ARTIFACT_EXTS {
        let src = scratch.join(format!("{}.{}", ARTIFACT_STEM, ext));
        if !src.exists() {
            continue;
        }
        let dst = results_dir.join(format!("{}.{}", test.stem, ext));
        harness_fs::move_file(&src, &dst)?;
        if !dst.exists() {
            bail!("Relocated artifact {} does not exist", dst.display());
        }
        relocated.push(dst);
    }

    // Post-condition: the scratch directory holds no recognized artifact.
    // Either it was relocated above or it was never produced.
    // 后置条件：临时目录中不含任何识别的产物。
    // 要么已在上面归档，要么从未产生。
    for ext in ARTIFACT_EXTS {
        let leftover = scratch.join(format!("{}.{}", ARTIFACT_STEM, ext));
        if leftover.exists() {
            bail!(
                "Artifact {} still present in the scratch directory after relocation",
                leftover.display()
            );
        }
    }

    // The first line of the compiler's stdout echoes the input file name,
    // which the results layout already encodes; drop it. Execution output
    // is persisted verbatim.
    // 编译器 stdout 的第一行回显输入文件名，结果目录布局已包含该信息；
    // 因此丢弃它。执行输出原样持久化。
    let compile_stdout = strip_first_line(&compile.stdout);

    write_stream(&results_dir, &test.stem, "compile.stdout", compile_stdout)?;
    write_stream(&results_dir, &test.stem, "compile.stderr", &compile.stderr)?;
    write_stream(
        &results_dir,
        &test.stem,
        "compile.status",
        &compile.code.to_string(),
    )?;

    if let Some(execution) = execution {
        write_stream(&results_dir, &test.stem, "exec.stdout", &execution.stdout)?;
        write_stream(&results_dir, &test.stem, "exec.stderr", &execution.stderr)?;
        write_stream(
            &results_dir,
            &test.stem,
            "exec.status",
            &execution.code.to_string(),
        )?;
    }

    Ok(relocated)
}

/// Writes one companion file: `<stem>-<suffix>` under the results directory.
fn write_stream(results_dir: &Path, stem: &str, suffix: &str, content: &str) -> Result<()> {
    let path = results_dir.join(format!("{}-{}", stem, suffix));
    fs::write(&path, content)
        .with_context(|| format!("Failed to write companion file {}", path.display()))
}

/// Drops everything up to and including the first newline. Empty when the
/// input has a single line, matching how the original harness persisted
/// compiler stdout.
fn strip_first_line(text: &str) -> &str {
    match text.split_once('\n') {
        Some((_, rest)) => rest,
        None => "",
    }
}

/// Classifies the compiler's exit code against the test's expectation.
/// 根据测试的预期对编译器的退出码进行分类。
fn classify(
    test: TestInput,
    compile: ProcessResult,
    execution: Option<ProcessResult>,
    artifacts: Vec<PathBuf>,
    duration: std::time::Duration,
) -> Result<TestResult> {
    if test.expectation.accepts(compile.code) {
        println!(
            "{}",
            format!(
                "✓ Test '{}' passed [compiler exit {}] in {:.2}s",
                test.id(),
                compile.code,
                duration.as_secs_f64()
            )
            .green()
        );
        Ok(TestResult::Passed {
            test,
            compile_code: compile.code,
            exec_code: execution.map(|e| e.code),
            artifacts,
            duration,
        })
    } else {
        println!(
            "{}",
            format!(
                "✗ Test '{}' failed [compiler exit {}] in {:.2}s",
                test.id(),
                compile.code,
                duration.as_secs_f64()
            )
            .red()
        );
        let output = format!(
            "Unexpected compiler exit code [{}]; acceptable codes for {} are {:?}\n\
             --- compiler stderr ---\n{}",
            compile.code,
            test.expectation,
            test.expectation.acceptable_codes(),
            compile.stderr
        );
        Ok(TestResult::Failed {
            test,
            output,
            reason: FailureReason::UnexpectedExit,
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_first_line_drops_the_echoed_file_name() {
        assert_eq!(strip_first_line("hello.cpp\nrest\nmore\n"), "rest\nmore\n");
    }

    #[test]
    fn strip_first_line_of_single_line_output_is_empty() {
        assert_eq!(strip_first_line("hello.cpp"), "");
        assert_eq!(strip_first_line(""), "");
    }
}
