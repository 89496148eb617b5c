//! # Test Discovery Module / 测试发现模块
//!
//! Recursively enumerates test source files under the test-base root and
//! tags each one with its expectation at discovery time.
//!
//! 递归枚举测试根目录下的测试源文件，并在发现时为每个文件标记其预期。

use anyhow::{Context, Result};
use std::path::Path;
use walkdir::WalkDir;

use crate::core::config::HarnessConfig;
use crate::core::models::TestInput;

/// Walks `testbase` and returns every file whose extension matches the
/// configured source extension, as `TestInput`s with relative path, stem and
/// expectation filled in. Walk errors (unreadable directories, broken links)
/// abort discovery rather than silently dropping tests.
///
/// 遍历 `testbase`，返回扩展名与配置的源扩展名匹配的每个文件，
/// 作为填好相对路径、文件名和预期的 `TestInput`。
/// 遍历错误（不可读目录、损坏的链接）会中止发现，而不是静默丢弃测试。
pub fn discover_tests(testbase: &Path, config: &HarnessConfig) -> Result<Vec<TestInput>> {
    let mut tests = Vec::new();

    for entry in WalkDir::new(testbase).follow_links(true) {
        let entry = entry
            .with_context(|| format!("Failed to walk test base {}", testbase.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == config.source_ext);
        if !matches_ext {
            continue;
        }
        tests.push(TestInput::new(
            path.to_path_buf(),
            testbase,
            &config.failing_marker,
        )?);
    }

    Ok(tests)
}
