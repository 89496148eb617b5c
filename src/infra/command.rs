//! # Process Capture Module / 进程捕获模块
//!
//! Spawns external processes and captures their stdout and stderr as
//! separate text streams, plus helpers for turning a configured command
//! line string into an argument vector.
//!
//! 启动外部进程并将其 stdout 和 stderr 作为独立的文本流捕获，
//! 以及将配置的命令行字符串转换为参数向量的辅助函数。

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Expands and splits a configured command line into an argument vector.
/// `~` and environment variables are expanded first, then the line is split
/// with shell-style quoting rules.
///
/// 展开并拆分配置的命令行为参数向量。
/// 先展开 `~` 和环境变量，然后按 shell 引用规则拆分该行。
pub fn split_command_line(line: &str) -> Result<Vec<String>> {
    let expanded = shellexpand::full(line)
        .with_context(|| format!("Failed to expand command: {line}"))?
        .to_string();

    let parts = shlex::split(&expanded)
        .ok_or_else(|| anyhow::anyhow!("Failed to parse command: {}", expanded))?;

    if parts.is_empty() {
        bail!("Empty command after parsing.");
    }
    Ok(parts)
}

/// Spawns a command and captures stdout and stderr into separate strings.
/// The two streams are read concurrently while waiting for the process to
/// exit, so neither pipe can fill up and deadlock the child.
///
/// # Returns
/// A tuple containing:
/// - The `ExitStatus` of the process wrapped in an `io::Result`.
/// - The captured stdout as a `String`.
/// - The captured stderr as a `String`.
///
/// 启动一个命令并将 stdout 和 stderr 捕获到独立的字符串中。
/// 在等待进程退出时并发读取两个流，因此任何管道都不会被填满而使子进程死锁。
///
/// # Returns
/// 一个元组，包含：
/// - 进程的 `ExitStatus`（包装在 `io::Result` 中）。
/// - 捕获的 stdout，为一个 `String`。
/// - 捕获的 stderr，为一个 `String`。
pub async fn spawn_and_capture(
    mut cmd: tokio::process::Command,
) -> (std::io::Result<std::process::ExitStatus>, String, String) {
    let mut child = match cmd
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            // If spawning fails, we return the error and empty streams.
            return (Err(e), String::new(), String::new());
        }
    };

    let stdout = match child.stdout.take() {
        Some(stdout) => stdout,
        None => {
            return (
                Err(std::io::Error::other("Failed to capture child stdout")),
                String::new(),
                String::new(),
            );
        }
    };
    let stderr = match child.stderr.take() {
        Some(stderr) => stderr,
        None => {
            return (
                Err(std::io::Error::other("Failed to capture child stderr")),
                String::new(),
                String::new(),
            );
        }
    };

    // Each stream gets its own reader task and its own buffer; the harness
    // persists stdout and stderr as separate companion files.
    // 每个流都有自己的读取任务和缓冲区；
    // 测试工具将 stdout 和 stderr 作为独立的伴随文件持久化。
    let stdout_handle = tokio::spawn(drain_stream(stdout));
    let stderr_handle = tokio::spawn(drain_stream(stderr));

    // Wait for the process to exit.
    let status = child.wait().await;

    // Join the reader tasks to ensure all output is captured.
    let stdout_text = match stdout_handle.await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            eprintln!("Failed to read child stdout: {}", e);
            String::new()
        }
        Err(e) => {
            eprintln!("Failed to join stdout task: {}", e);
            String::new()
        }
    };
    let stderr_text = match stderr_handle.await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            eprintln!("Failed to read child stderr: {}", e);
            String::new()
        }
        Err(e) => {
            eprintln!("Failed to join stderr task: {}", e);
            String::new()
        }
    };

    (status, stdout_text, stderr_text)
}

/// Reads a stream to the end, keeping the bytes exactly as the process
/// wrote them (no newline normalization). Non-UTF-8 sequences are replaced
/// rather than failing the capture.
///
/// 将流读到末尾，保持进程写入的字节原样（不做换行规范化）。
/// 非 UTF-8 序列会被替换而不是使捕获失败。
async fn drain_stream<R: AsyncRead + Unpin>(mut stream: R) -> std::io::Result<String> {
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
