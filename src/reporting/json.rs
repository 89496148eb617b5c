//! # JSON Summary Module / JSON 摘要模块
//!
//! Writes a machine-readable summary of a regression run, for CI systems
//! that archive or diff results between revisions.
//!
//! 写入回归运行的机器可读摘要，供在修订之间归档或对比结果的 CI 系统使用。

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::models::{FailureReason, TestResult};

/// One test entry inside the JSON summary.
#[derive(Debug, Serialize)]
struct TestEntry {
    id: String,
    status: String,
    expectation: Option<String>,
    compile_code: Option<i32>,
    exec_code: Option<i32>,
    failure_reason: Option<FailureReason>,
    artifacts: Vec<PathBuf>,
    duration_secs: Option<f64>,
    output: Option<String>,
}

/// Top-level JSON document for one run.
/// 一次运行的顶层 JSON 文档。
#[derive(Debug, Serialize)]
struct RunSummary {
    generated_at: DateTime<Utc>,
    total: usize,
    passed: usize,
    failed: usize,
    skipped: usize,
    tests: Vec<TestEntry>,
}

/// Serializes the run's results to `output_path` as pretty-printed JSON.
///
/// 将运行结果作为格式化的 JSON 序列化到 `output_path`。
pub fn write_json_summary(results: &[TestResult], output_path: &Path) -> Result<()> {
    let tests: Vec<TestEntry> = results.iter().map(entry_for).collect();

    let summary = RunSummary {
        generated_at: Utc::now(),
        total: results.len(),
        passed: results
            .iter()
            .filter(|r| matches!(r, TestResult::Passed { .. }))
            .count(),
        failed: results.iter().filter(|r| r.is_failure()).count(),
        skipped: results
            .iter()
            .filter(|r| matches!(r, TestResult::Skipped))
            .count(),
        tests,
    };

    let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON summary {}", output_path.display()))
}

fn entry_for(result: &TestResult) -> TestEntry {
    match result {
        TestResult::Passed {
            test,
            compile_code,
            exec_code,
            artifacts,
            duration,
        } => TestEntry {
            id: test.id(),
            status: result.get_status_str(),
            expectation: Some(test.expectation.to_string()),
            compile_code: Some(*compile_code),
            exec_code: *exec_code,
            failure_reason: None,
            artifacts: artifacts.clone(),
            duration_secs: Some(duration.as_secs_f64()),
            output: None,
        },
        TestResult::Failed {
            test,
            output,
            reason,
            duration,
        } => TestEntry {
            id: test.id(),
            status: result.get_status_str(),
            expectation: Some(test.expectation.to_string()),
            compile_code: None,
            exec_code: None,
            failure_reason: Some(*reason),
            artifacts: Vec::new(),
            duration_secs: Some(duration.as_secs_f64()),
            output: Some(output.clone()),
        },
        TestResult::Skipped => TestEntry {
            id: "Skipped".to_string(),
            status: "Skipped".to_string(),
            expectation: None,
            compile_code: None,
            exec_code: None,
            failure_reason: None,
            artifacts: Vec::new(),
            duration_secs: None,
            output: None,
        },
    }
}
