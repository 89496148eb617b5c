//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for zpp-regress,
//! including subprocess capture and file system operations.
//!
//! 此模块为 zpp-regress 提供基础设施服务，
//! 包括子进程捕获和文件系统操作。

pub mod command;
pub mod fs;
