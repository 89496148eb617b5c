//! # Run Command Module / 运行命令模块
//!
//! Orchestrates a full regression run: resolve configuration, discover and
//! plan the corpus, execute the tests over a bounded parallel stream and
//! emit the configured reports.
//!
//! 编排一次完整的回归运行：解析配置、发现并计划语料库、
//! 在有界并行流上执行测试并输出配置的报告。

use anyhow::Result;
use colored::*;
use futures::{stream, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::{self, HarnessConfig},
        discovery,
        execution::{run_test_case, RunContext},
        models::{FailureReason, TestInput, TestResult},
        planner,
    },
    infra::fs as harness_fs,
    reporting::{
        console::{print_summary, print_unexpected_failure_details},
        html, json,
    },
};

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    jobs: Option<usize>,
    config_path: PathBuf,
    testbase: Option<PathBuf>,
    total_runners: Option<usize>,
    runner_index: Option<usize>,
    html_path: Option<PathBuf>,
    json_path: Option<PathBuf>,
) -> Result<()> {
    let config = HarnessConfig::load_or_default(&config_path)?;
    let testbase = config::resolve_testbase(testbase, &config)?;

    println!("Using test base directory: {}", testbase.display().to_string().yellow());

    harness_fs::ensure_dir(&config.results_dir)?;
    let results_root = harness_fs::absolute_path(&config.results_dir)?;
    println!("Results will be stored in: {}", results_root.display());
    println!("Compiler command: {}", config.compiler.yellow());

    let tests = discovery::discover_tests(&testbase, &config)?;
    let plan = planner::plan_execution(tests, total_runners, runner_index)?;

    if plan.expected_fail_count > 0 {
        println!(
            "{}",
            format!(
                "{} of {} test inputs are marked expected-to-fail",
                plan.expected_fail_count,
                plan.tests_to_run.len()
            )
            .cyan()
        );
    }

    if let (Some(total), Some(index)) = (total_runners, runner_index) {
        println!(
            "{}",
            format!(
                "Running as runner {}/{} with {} tests",
                index + 1,
                total,
                plan.tests_to_run.len()
            )
            .bold()
        );
    } else {
        println!(
            "{}",
            format!("Running {} tests", plan.tests_to_run.len()).bold()
        );
    }

    if plan.tests_to_run.is_empty() {
        println!(
            "{}",
            format!("No {} test inputs found under the test base.", config.source_ext).green()
        );
        return Ok(());
    }

    let overall_stop_token = setup_signal_handler()?;
    let ctx = Arc::new(RunContext::new(&config, results_root)?);

    let final_results = run_tests(
        plan.tests_to_run,
        jobs.unwrap_or(num_cpus::get() / 2 + 1),
        ctx,
        overall_stop_token,
    )
    .await;

    let run_failed = print_summary(&final_results);

    if let Some(report_path) = &html_path {
        println!("\nGenerating HTML report at: {}", report_path.display());
        if let Err(e) = html::generate_html_report(&final_results, report_path) {
            eprintln!("{} {}", "Failed to generate HTML report:".red(), e);
        }
    }
    if let Some(summary_path) = &json_path {
        println!("Writing JSON summary to: {}", summary_path.display());
        if let Err(e) = json::write_json_summary(&final_results, summary_path) {
            eprintln!("{} {}", "Failed to write JSON summary:".red(), e);
        }
    }

    if run_failed {
        let unexpected_failures: Vec<_> = final_results
            .iter()
            .filter(|r| r.is_failure())
            .collect();
        if !unexpected_failures.is_empty() {
            print_unexpected_failure_details(&unexpected_failures);
            anyhow::bail!("Regression suite finished with unexpected outcomes.");
        }
        anyhow::bail!("Regression run was cancelled before all tests completed.");
    }
    Ok(())
}

fn setup_signal_handler() -> Result<CancellationToken> {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!(
                "\n{}",
                "Shutdown requested; pending tests will be skipped.".yellow()
            );
            token_clone.cancel();
        }
    });

    Ok(token)
}

/// Runs the planned tests over a bounded parallel stream. Per-test scratch
/// directories make parallel execution safe. Cancellation is checked only
/// when a test is about to start: pipelines already in flight run to
/// completion so their verdicts and companion files stay whole, while
/// not-yet-started tests report `Skipped`.
///
/// 在有界并行流上运行计划的测试。
/// 取消仅在测试即将开始时检查：已在执行的流水线会运行到完成，
/// 其结论和伴随文件保持完整，而尚未开始的测试报告为 `Skipped`。
pub async fn run_tests(
    tests: Vec<TestInput>,
    jobs: usize,
    ctx: Arc<RunContext>,
    overall_stop_token: CancellationToken,
) -> Vec<TestResult> {
    let stream = stream::iter(tests.into_iter().map(|test| {
        let ctx = ctx.clone();
        let stop_token = overall_stop_token.clone();
        let test_for_error = test.clone();

        tokio::spawn(async move {
            if stop_token.is_cancelled() {
                return TestResult::Skipped;
            }
            match run_test_case(test, ctx).await {
                Ok(res) => res,
                Err(e) => TestResult::Failed {
                    test: test_for_error,
                    output: format!("{:#}", e),
                    reason: FailureReason::Spawn,
                    duration: Duration::default(),
                },
            }
        })
    }));

    let mut results: Vec<TestResult> = stream
        .buffer_unordered(jobs.max(1))
        .map(|res| res.unwrap_or(TestResult::Skipped))
        .collect()
        .await;

    results.sort_by_key(|r| r.case_name());
    results
}
