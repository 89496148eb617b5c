//! # Command Module Unit Tests / Command 模块单元测试
//!
//! This module contains unit tests for `infra::command`, covering command
//! line splitting and the separate-stream subprocess capture.
//!
//! 此模块包含 `infra::command` 的单元测试，
//! 覆盖命令行拆分和独立流的子进程捕获。

use tokio::process::Command;
use zpp_regress::infra::command::{spawn_and_capture, split_command_line};

mod split_command_line_tests {
    use super::*;

    #[test]
    fn splits_a_plain_command() {
        let parts = split_command_line("z++ -d").unwrap();
        assert_eq!(parts, vec!["z++".to_string(), "-d".to_string()]);
    }

    #[test]
    fn respects_shell_quoting() {
        let parts = split_command_line(r#"/opt/my tools/z++ -d"#);
        // Unquoted spaces split; the quoted form keeps the path whole.
        assert_eq!(parts.unwrap().len(), 3);

        let parts = split_command_line(r#""/opt/my tools/z++" -d"#).unwrap();
        assert_eq!(parts, vec!["/opt/my tools/z++".to_string(), "-d".to_string()]);
    }

    #[test]
    fn expands_environment_variables() {
        // HOME is always present in the test environment on unix.
        #[cfg(unix)]
        {
            let parts = split_command_line("$HOME/bin/z++ -d").unwrap();
            assert!(parts[0].ends_with("/bin/z++"));
            assert!(!parts[0].contains('$'));
        }
    }

    #[test]
    fn an_empty_command_is_an_error() {
        assert!(split_command_line("").is_err());
        assert!(split_command_line("   ").is_err());
    }
}

#[cfg(unix)]
mod spawn_and_capture_tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout_and_stderr_separately() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo 'to stdout'; echo 'to stderr' >&2"]);

        let (status_result, stdout, stderr) = spawn_and_capture(cmd).await;

        let status = status_result.unwrap();
        assert!(status.success());
        assert!(stdout.contains("to stdout"));
        assert!(!stdout.contains("to stderr"));
        assert!(stderr.contains("to stderr"));
        assert!(!stderr.contains("to stdout"));
    }

    #[tokio::test]
    async fn reports_the_exit_code_of_a_failing_command() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "exit 3"]);

        let (status_result, _stdout, _stderr) = spawn_and_capture(cmd).await;

        let status = status_result.unwrap();
        assert!(!status.success());
        assert_eq!(status.code(), Some(3));
    }

    #[tokio::test]
    async fn a_nonexistent_command_returns_the_spawn_error() {
        let cmd = Command::new("this_command_does_not_exist_12345");

        let (status_result, stdout, stderr) = spawn_and_capture(cmd).await;

        assert!(status_result.is_err());
        assert!(stdout.is_empty());
        assert!(stderr.is_empty());
    }

    #[tokio::test]
    async fn a_silent_command_yields_empty_streams() {
        let cmd = Command::new("true");

        let (status_result, stdout, stderr) = spawn_and_capture(cmd).await;

        assert!(status_result.unwrap().success());
        assert!(stdout.is_empty());
        assert!(stderr.is_empty());
    }

    #[tokio::test]
    async fn output_bytes_are_preserved_exactly() {
        // No trailing newline added, carriage returns kept: the companion
        // files must hold what the process actually wrote.
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "printf 'no trailing newline'; printf 'cr\\r\\nkept' >&2"]);

        let (status_result, stdout, stderr) = spawn_and_capture(cmd).await;

        assert!(status_result.unwrap().success());
        assert_eq!(stdout, "no trailing newline");
        assert_eq!(stderr, "cr\r\nkept");
    }

    #[tokio::test]
    async fn multi_line_output_is_captured_in_order() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo first; echo second; echo third"]);

        let (status_result, stdout, _stderr) = spawn_and_capture(cmd).await;

        assert!(status_result.unwrap().success());
        assert_eq!(stdout, "first\nsecond\nthird\n");
    }
}
