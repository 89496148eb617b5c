//! # Console Reporting Module / 控制台报告模块
//!
//! This module handles the generation and display of run reports in the
//! console, with color coding for the different outcome categories.
//!
//! 此模块处理控制台中运行报告的生成和显示，
//! 对不同的结果类别使用颜色编码。

use colored::*;

use crate::core::models::{FailureReason, TestResult};

/// Prints the final summary of all test results after the run completes.
/// It categorizes results into passes, expected compiler failures,
/// unexpected failures, and skipped tests, then prints each category in a
/// formatted list.
///
/// # Arguments
/// * `results` - A slice of `TestResult` from all completed tests.
///
/// # Returns
/// `true` if there were any unexpected failures or skipped tests, which is
/// used to set the process exit code. Otherwise, `false`.
///
/// 在运行完成后打印所有测试结果的最终摘要。
/// 它将结果分为通过、预期的编译器失败、意外失败和跳过的测试，
/// 然后以格式化列表的形式打印每个类别。
///
/// # Arguments
/// * `results` - 所有已完成测试的 `TestResult` 切片。
///
/// # Returns
/// 如果存在任何意外失败或跳过的测试，则返回 `true`，用于设置进程退出码。
/// 否则返回 `false`。
pub fn print_summary(results: &[TestResult]) -> bool {
    let mut passes = Vec::new();
    let mut expected_failures = Vec::new();
    let mut unexpected_failures = Vec::new();
    let mut skipped_count = 0usize;

    for result in results {
        match result {
            TestResult::Passed { .. } => {
                if result.is_expected_compile_failure() {
                    expected_failures.push(result);
                } else {
                    passes.push(result);
                }
            }
            TestResult::Failed { .. } => unexpected_failures.push(result),
            TestResult::Skipped => skipped_count += 1,
        }
    }

    println!("\n{}", "--- REGRESSION RUN SUMMARY ---".cyan());

    if !passes.is_empty() {
        println!("\n{}", "Passed tests:".green());
        for result in &passes {
            println!("  - {}", result.case_name().green());
        }
    }

    if !expected_failures.is_empty() {
        println!("\n{}", "Rejected as expected:".yellow());
        for result in &expected_failures {
            if let TestResult::Passed { compile_code, .. } = result {
                println!(
                    "  - {} (compiler exit {})",
                    result.case_name().yellow(),
                    compile_code
                );
            }
        }
    }

    if skipped_count > 0 {
        println!(
            "\n{}",
            format!("Skipped (run cancelled): {}", skipped_count).yellow()
        );
    }

    if !unexpected_failures.is_empty() {
        println!("\n{}", "Unexpected failures:".red().bold());
        for result in &unexpected_failures {
            let failure_type = match result {
                TestResult::Failed { reason, .. } => reason.describe(),
                _ => "Unhandled Error",
            };
            println!("  - {} ({})", result.case_name().red(), failure_type);
        }
    }

    println!();

    if !unexpected_failures.is_empty() {
        println!("{}", "REGRESSION SUITE FAILED".red().bold());
        true
    } else if skipped_count > 0 {
        println!("{}", "REGRESSION RUN CANCELLED".yellow().bold());
        true
    } else {
        println!("{}", "REGRESSION SUITE PASSED SUCCESSFULLY".green().bold());
        false
    }
}

/// Prints a detailed, formatted report for every unexpected failure: the
/// observed exit code, the expectation, and the captured compiler output.
///
/// 为每个意外失败打印详细的格式化报告：观察到的退出码、预期以及捕获的编译器输出。
pub fn print_unexpected_failure_details(failures: &[&TestResult]) {
    for result in failures {
        println!(
            "{}",
            "=================================================================".cyan()
        );
        println!("{}", "UNEXPECTED FAILURE DETECTED".red().bold());
        println!(
            "{}",
            format!("Details for test '{}':", result.case_name()).cyan()
        );
        println!(
            "{}",
            "-----------------------------------------------------------------".cyan()
        );

        if let TestResult::Failed { reason, output, .. } = result {
            println!("Reason: {}", reason.describe());
            if *reason == FailureReason::Timeout {
                println!("{}", "The external process never returned.".yellow());
            }
            println!("{}", output);
        }

        println!(
            "{}",
            "-----------------------------------------------------------------".cyan()
        );
    }
}
