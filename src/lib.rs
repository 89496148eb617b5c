//! # zpp-regress Library / zpp-regress 库
//!
//! This library provides the core functionality for zpp-regress,
//! a regression harness for the external `z++` compiler. It discovers
//! test sources under a test-base root, drives the compiler (and,
//! optionally, the compiled program) in isolated scratch directories,
//! archives output artifacts into a mirrored results tree and classifies
//! each test against a path-based expectation convention.
//!
//! 此库为 zpp-regress 提供核心功能，
//! 这是外部 `z++` 编译器的回归测试工具。它在测试根目录下发现测试源文件，
//! 在隔离的临时目录中驱动编译器（以及可选的编译产物程序），
//! 将输出产物归档到镜像的结果目录树中，并根据基于路径的预期约定对每个测试进行分类。
//!
//! ## Modules / 模块
//!
//! - `core` - Data models, configuration, discovery, planning and the test pipeline
//! - `infra` - Infrastructure services like process capture and file system operations
//! - `reporting` - Console, HTML and JSON result reporting
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 数据模型、配置、发现、计划和测试流水线
//! - `infra` - 基础设施服务，如进程捕获和文件系统操作
//! - `reporting` - 控制台、HTML 和 JSON 结果报告
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use self::core::config;
pub use self::core::execution;
pub use self::core::models;
