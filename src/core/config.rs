//! # Harness Configuration Module / 测试工具配置模块
//!
//! Typed configuration for the regression harness, loaded from a TOML file
//! (`ZppRegress.toml` by default) and validated once at startup. The
//! test-base root may also arrive through the CLI or the `ZPP_TESTBASE`
//! environment variable.
//!
//! 回归测试工具的类型化配置，从 TOML 文件（默认 `ZppRegress.toml`）加载，
//! 并在启动时验证一次。测试根目录也可以通过命令行或 `ZPP_TESTBASE` 环境变量提供。

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the test-base root, usually exported by the
/// compiler workspace's `setenv.sh`.
/// 指定测试根目录的环境变量，通常由编译器工作区的 `setenv.sh` 导出。
pub const TESTBASE_ENV: &str = "ZPP_TESTBASE";

/// Default name of the configuration file in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "ZppRegress.toml";

/// What the harness does after a successful compile.
/// 成功编译后测试工具的行为。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarnessMode {
    /// Compile each input, then run the produced `a.out` when the compiler
    /// exited with code 0.
    /// 编译每个输入，当编译器以退出码 0 退出时运行产生的 `a.out`。
    CompileAndRun,
    /// Compile only; never run the produced executable.
    /// 仅编译；从不运行产生的可执行文件。
    CompileOnly,
}

/// The complete harness configuration, with sensible defaults for every field
/// so an empty file (or no file at all) yields a working setup.
///
/// 完整的测试工具配置，每个字段都有合理的默认值，
/// 因此空文件（或根本没有文件）也能得到可用的设置。
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// The compiler command line. Expanded (`~`, `$VARS`) and split with
    /// shell-style quoting; the test's absolute path is appended.
    /// 编译器命令行。经过展开（`~`、`$VARS`）并按 shell 引用规则分词；
    /// 测试的绝对路径会附加在末尾。
    pub compiler: String,
    /// Extension of test source files under the test base.
    /// 测试根目录下测试源文件的扩展名。
    pub source_ext: String,
    /// Substring of a test path marking it as expected-to-fail.
    /// 测试路径中将其标记为预期失败的子字符串。
    pub failing_marker: String,
    /// Root of the mirrored results tree, relative to the working directory.
    /// 镜像结果树的根目录，相对于工作目录。
    pub results_dir: PathBuf,
    /// Compile-only or compile-and-run.
    /// 仅编译或编译并运行。
    pub mode: HarnessMode,
    /// Per-test timeout in seconds covering the whole
    /// compile/execute/relocate pipeline. `0` waits indefinitely.
    /// 单测试超时时间（秒），覆盖整个编译/执行/归档流水线。
    /// `0` 表示无限等待。
    pub timeout_secs: u64,
    /// Optional test-base root; the CLI flag and `ZPP_TESTBASE` can supply
    /// it instead.
    /// 可选的测试根目录；也可由命令行标志和 `ZPP_TESTBASE` 提供。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub testbase: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            compiler: "z++ -d".to_string(),
            source_ext: "cpp".to_string(),
            failing_marker: "failing".to_string(),
            results_dir: PathBuf::from("results/cpp_testbase"),
            mode: HarnessMode::CompileAndRun,
            timeout_secs: 60,
            testbase: None,
        }
    }
}

impl HarnessConfig {
    /// Loads the configuration from `path`. The file must exist and parse.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Loads the configuration from `path`, falling back to defaults when the
    /// file does not exist. A present-but-broken file is still an error.
    ///
    /// 从 `path` 加载配置，文件不存在时回退到默认值。
    /// 文件存在但损坏仍然是错误。
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Resolves the test-base root: CLI flag first, then the config file, then
/// the `ZPP_TESTBASE` environment variable. Absence is a fatal configuration
/// error reported before any test executes.
///
/// 解析测试根目录：命令行标志优先，其次是配置文件，再次是 `ZPP_TESTBASE`
/// 环境变量。缺失是致命的配置错误，在任何测试执行之前报告。
pub fn resolve_testbase(cli_testbase: Option<PathBuf>, config: &HarnessConfig) -> Result<PathBuf> {
    let candidate = cli_testbase
        .or_else(|| config.testbase.clone())
        .or_else(|| env::var(TESTBASE_ENV).ok().map(PathBuf::from));

    let Some(candidate) = candidate else {
        bail!(
            "No test base directory configured. Pass --testbase, set `testbase` in {}, \
             or export {} (usually by sourcing setenv.sh first).",
            DEFAULT_CONFIG_FILE,
            TESTBASE_ENV
        );
    };

    let testbase = fs::canonicalize(&candidate).with_context(|| {
        format!(
            "Test base directory {} does not exist or is not accessible",
            candidate.display()
        )
    })?;
    if !testbase.is_dir() {
        bail!("Test base {} is not a directory", testbase.display());
    }
    Ok(testbase)
}
