//! # Execution Planner Module / 执行计划模块
//!
//! Orders discovered tests deterministically and, in CI, shards them
//! across multiple runners.
//!
//! 对发现的测试进行确定性排序，并在 CI 中将它们分片到多个运行器上。

use anyhow::{bail, Result};

use crate::core::models::{Expectation, TestInput};

/// A complete execution plan for one harness run.
/// 一次测试工具运行的完整执行计划。
#[derive(Debug)]
pub struct ExecutionPlan {
    /// Tests to execute, sorted by relative path and possibly sharded.
    /// 要执行的测试，按相对路径排序并可能被分片。
    pub tests_to_run: Vec<TestInput>,
    /// How many of those tests carry the failing marker in their path.
    /// 其中有多少测试的路径带有失败标记。
    pub expected_fail_count: usize,
    /// Whether the tests are sharded across multiple runners (CI environment).
    /// 测试是否分片到多个运行器上（CI 环境）。
    pub is_distributed: bool,
}

/// Creates an execution plan from the discovered tests.
///
/// Sorting by relative path makes the run order (and any sharding) stable
/// across machines; sharding takes every `total`-th test starting at `index`.
///
/// 从发现的测试创建执行计划。
/// 按相对路径排序使运行顺序（以及任何分片）在机器之间保持稳定；
/// 分片从 `index` 开始每隔 `total` 个取一个测试。
pub fn plan_execution(
    mut tests: Vec<TestInput>,
    total_runners: Option<usize>,
    runner_index: Option<usize>,
) -> Result<ExecutionPlan> {
    tests.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));

    let (tests_to_run, is_distributed) =
        if let (Some(total), Some(index)) = (total_runners, runner_index) {
            if total == 0 {
                bail!("Total runners must be at least 1.");
            }
            if index >= total {
                bail!("Runner index must be less than total runners.");
            }
            let sharded: Vec<_> = tests
                .into_iter()
                .enumerate()
                .filter(|(i, _)| i % total == index)
                .map(|(_, test)| test)
                .collect();
            (sharded, true)
        } else {
            if total_runners.is_some() || runner_index.is_some() {
                bail!("Both --total-runners and --runner-index must be provided.");
            }
            (tests, false)
        };

    let expected_fail_count = tests_to_run
        .iter()
        .filter(|t| t.expectation == Expectation::Fail)
        .count();

    Ok(ExecutionPlan {
        tests_to_run,
        expected_fail_count,
        is_distributed,
    })
}
