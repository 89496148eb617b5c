//! # Harness Initialization Module / 测试工具初始化模块
//!
//! This module creates a starter `ZppRegress.toml` through an interactive
//! command-line wizard (or non-interactively with defaults), covering the
//! compiler command, the execution mode, the per-test timeout and the
//! test-base root.
//!
//! 此模块通过交互式命令行向导（或使用默认值的非交互方式）创建初始的
//! `ZppRegress.toml`，涵盖编译器命令、执行模式、单测试超时和测试根目录。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::{HarnessConfig, HarnessMode, DEFAULT_CONFIG_FILE, TESTBASE_ENV};

/// Runs the wizard to generate a harness configuration file.
///
/// 运行向导以生成测试工具配置文件。
pub fn run_init_wizard(non_interactive: bool) -> Result<()> {
    let config_path = Path::new(DEFAULT_CONFIG_FILE);
    let theme = ColorfulTheme::default();

    if !non_interactive {
        println!(
            "\n{}",
            "Welcome to the zpp-regress configuration wizard.".cyan().bold()
        );
        println!("This will create a {} in the current directory.", DEFAULT_CONFIG_FILE);
    }

    if config_path.exists() && !non_interactive {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(format!("{} already exists. Overwrite?", config_path.display()))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmation {
            println!("Aborted; existing configuration left untouched.");
            return Ok(());
        }
    }

    if non_interactive {
        return write_config(config_path, &HarnessConfig::default());
    }

    let compiler: String = Input::with_theme(&theme)
        .with_prompt("Compiler command (the test path is appended)")
        .default("z++ -d".to_string())
        .interact_text()?;

    let mode_labels = ["compile-and-run", "compile-only"];
    let mode_choice = Select::with_theme(&theme)
        .with_prompt("What should happen after a clean compile?")
        .items(&mode_labels)
        .default(0)
        .interact()?;
    let mode = if mode_choice == 0 {
        HarnessMode::CompileAndRun
    } else {
        HarnessMode::CompileOnly
    };

    let timeout_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Per-test timeout in seconds (0 waits forever)")
        .default(60)
        .interact_text()?;

    let testbase: String = Input::with_theme(&theme)
        .with_prompt(format!(
            "Test base directory (empty to rely on --testbase or {})",
            TESTBASE_ENV
        ))
        .allow_empty(true)
        .interact_text()?;

    let config = HarnessConfig {
        compiler,
        mode,
        timeout_secs,
        testbase: if testbase.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(testbase.trim()))
        },
        ..HarnessConfig::default()
    };

    write_config(config_path, &config)
}

fn write_config(path: &Path, config: &HarnessConfig) -> Result<()> {
    let toml_string =
        toml::to_string_pretty(config).context("Failed to serialize harness configuration")?;

    fs::write(path, toml_string)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "\n{} {}",
        "✔".green(),
        format!("Created {}", path.display()).bold()
    );
    println!("Run the suite with: zpp-regress run");

    Ok(())
}
