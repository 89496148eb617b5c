//! # Command-Line Interface / 命令行接口
//!
//! Builds the `zpp-regress` CLI and dispatches to the subcommands.
//!
//! 构建 `zpp-regress` 命令行并分发到子命令。

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use crate::core::config;

pub mod commands;

fn build_cli() -> Command {
    Command::new("zpp-regress")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Regression harness for the z++ compiler")
        .subcommand(
            Command::new("run")
                .about("Discover test sources and run the regression suite")
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .help("Number of tests to run in parallel")
                        .value_name("JOBS")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to the harness configuration file")
                        .value_name("CONFIG")
                        .default_value(config::DEFAULT_CONFIG_FILE)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("testbase")
                        .long("testbase")
                        .help("Root directory of the test corpus (overrides config and ZPP_TESTBASE)")
                        .value_name("TESTBASE")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("total-runners")
                        .long("total-runners")
                        .help("Total number of CI runners sharding this suite")
                        .value_name("TOTAL_RUNNERS")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set)
                        .requires("runner-index"),
                )
                .arg(
                    Arg::new("runner-index")
                        .long("runner-index")
                        .help("Zero-based index of this runner within the shard set")
                        .value_name("RUNNER_INDEX")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set)
                        .requires("total-runners"),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help("Write an HTML report to the given path")
                        .value_name("HTML")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Write a machine-readable JSON summary to the given path")
                        .value_name("JSON")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("init")
                .about("Create a starter harness configuration file")
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help("Write a default config file without launching the interactive wizard.")
                        .action(ArgAction::SetTrue),
                ),
        )
}

pub async fn run() -> Result<()> {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let jobs = run_matches.get_one::<usize>("jobs").copied();
            let config = run_matches
                .get_one::<PathBuf>("config")
                .unwrap() // Has default
                .clone();
            let testbase = run_matches.get_one::<PathBuf>("testbase").cloned();
            let total_runners = run_matches.get_one::<usize>("total-runners").copied();
            let runner_index = run_matches.get_one::<usize>("runner-index").copied();
            let html = run_matches.get_one::<PathBuf>("html").cloned();
            let json = run_matches.get_one::<PathBuf>("json").cloned();

            commands::run::execute(
                jobs,
                config,
                testbase,
                total_runners,
                runner_index,
                html,
                json,
            )
            .await?;
        }
        Some(("init", init_matches)) => {
            let non_interactive = init_matches.get_flag("non-interactive");
            commands::init::run_init_wizard(non_interactive)?;
        }
        _ => {
            // No subcommand given; clap has already printed the help text.
        }
    }
    Ok(())
}
