//! # HTML Reporting Module / HTML 报告模块
//!
//! Generates a standalone HTML report of a regression run: summary
//! statistics plus a detailed per-test table with expandable failure
//! output.
//!
//! 生成回归运行的独立 HTML 报告：摘要统计加上带有可展开失败输出的
//! 每测试详细表格。

use anyhow::Result;
use chrono::Local;
use maud::{html, PreEscaped, DOCTYPE};
use std::fs;
use std::path::Path;

use crate::core::models::TestResult;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = r#"
body { font-family: -apple-system, 'Segoe UI', sans-serif; margin: 2rem auto; max-width: 70rem; color: #222; }
h1 { border-bottom: 2px solid #ddd; padding-bottom: .5rem; }
.summary-container { display: flex; gap: 1.5rem; margin: 1.5rem 0; }
.summary-item { background: #f6f8fa; border-radius: 8px; padding: 1rem 1.5rem; text-align: center; }
.summary-item .count { display: block; font-size: 1.8rem; font-weight: 700; }
.passed-text { color: #1a7f37; }
.failed-text { color: #cf222e; }
.skipped-text { color: #9a6700; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #d8dee4; padding: .5rem .75rem; text-align: left; }
th { background: #f6f8fa; }
.status-cell { font-weight: 600; border-radius: 4px; padding: .1rem .5rem; display: inline-block; }
.status-Passed { color: #1a7f37; }
.status-Expected-Failure { color: #9a6700; }
.status-Failed, .status-Timeout { color: #cf222e; }
.status-Skipped { color: #57606a; }
.output-content { background: #0d1117; color: #e6edf3; padding: .75rem; overflow-x: auto; }
.output-toggle { color: #0969da; cursor: pointer; font-size: .85rem; }
footer { margin-top: 2rem; color: #57606a; font-size: .85rem; }
"#;

/// Embedded JavaScript for the expandable failure rows.
const HTML_SCRIPT: &str = r#"
function toggleOutput(id) {
  const row = document.getElementById(id);
  row.style.display = row.style.display === 'none' ? '' : 'none';
}
"#;

/// Generates a comprehensive HTML report from the run's results.
///
/// 从运行结果生成综合的 HTML 报告。
pub fn generate_html_report(results: &[TestResult], output_path: &Path) -> Result<()> {
    let total = results.len();
    let passed = results
        .iter()
        .filter(|r| matches!(r, TestResult::Passed { .. }))
        .count();
    let failed = results.iter().filter(|r| r.is_failure()).count();
    let skipped = results
        .iter()
        .filter(|r| matches!(r, TestResult::Skipped))
        .count();

    let markup = html! {
        (DOCTYPE)
        html {
            head {
                title { "z++ Regression Report" }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { "z++ Regression Report" }
                div class="summary-container" {
                    div class="summary-item" {
                        span class="count" { (total) }
                        span class="label" { "Total" }
                    }
                    div class="summary-item" {
                        span class="count passed-text" { (passed) }
                        span class="label" { "Passed" }
                    }
                    div class="summary-item" {
                        span class="count failed-text" { (failed) }
                        span class="label" { "Failed" }
                    }
                    div class="summary-item" {
                        span class="count skipped-text" { (skipped) }
                        span class="label" { "Skipped" }
                    }
                }
                table {
                    thead {
                        tr {
                            th { "Test" }
                            th { "Status" }
                            th { "Duration" }
                        }
                    }
                    tbody {
                        @for (i, result) in results.iter().enumerate() {
                            @let output_id = format!("output-{}", i);
                            tr {
                                td { (result.case_name()) }
                                td {
                                    div class={ "status-cell " (result.get_status_class()) } {
                                        (result.get_status_str())
                                    }
                                    @if result.is_failure() {
                                        div class="output-toggle"
                                            onclick={ "toggleOutput('" (output_id) "')" } {
                                            "show output"
                                        }
                                    }
                                }
                                td {
                                    @match result.get_duration() {
                                        Some(d) => { (format!("{:.2}s", d.as_secs_f64())) }
                                        None => { "N/A" }
                                    }
                                }
                            }
                            @if result.is_failure() {
                                tr id=(output_id) style="display:none;" {
                                    td colspan="3" {
                                        pre class="output-content" { (result.get_output()) }
                                    }
                                }
                            }
                        }
                    }
                }
                footer {
                    "Generated " (Local::now().format("%Y-%m-%d %H:%M:%S"))
                }
                script { (PreEscaped(HTML_SCRIPT)) }
            }
        }
    };

    fs::write(output_path, markup.into_string())?;
    Ok(())
}
