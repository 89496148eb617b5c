//! # Core Module / 核心模块
//!
//! This module contains the core functionality of zpp-regress,
//! including data models, configuration, test discovery and the
//! compile/execute/relocate/classify pipeline.
//!
//! 此模块包含 zpp-regress 的核心功能，
//! 包括数据模型、配置、测试发现以及编译/执行/归档/分类流水线。

pub mod config;
pub mod discovery;
pub mod execution;
pub mod models;
pub mod planner;

// Re-exports
pub use self::config::HarnessConfig;
pub use self::execution::run_test_case;
pub use self::models::TestResult;
