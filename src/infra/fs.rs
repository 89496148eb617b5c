//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for file system operations,
//! such as creating per-test scratch directories and relocating
//! compiler artifacts into the results tree.
//!
//! 此模块提供文件系统操作的实用功能，
//! 如创建每个测试的临时目录以及将编译器产物归档到结果树中。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a private scratch directory for one test. The external compiler
/// runs with this directory as its working directory, so its fixed-named
/// `a.*` outputs cannot collide across concurrently running tests. The
/// directory is deleted when the returned guard is dropped.
///
/// 为一个测试创建私有临时目录。外部编译器以该目录作为工作目录运行，
/// 因此其固定名称的 `a.*` 输出不会在并发运行的测试之间冲突。
/// 返回的 guard 被丢弃时目录会被删除。
pub fn create_scratch_dir() -> Result<TempDir> {
    tempfile::Builder::new()
        .prefix("zpp-regress-")
        .tempdir()
        .context("Failed to create scratch directory for test")
}

/// Creates a directory and all of its parents. Never an error if the
/// directory already exists.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create results directory {}", path.display()))
}

/// Moves a file, falling back to copy-and-remove when rename fails (the
/// scratch directory and the results tree may live on different
/// filesystems).
///
/// 移动一个文件，当重命名失败时回退到复制再删除
/// （临时目录和结果树可能位于不同的文件系统上）。
pub fn move_file(src: &Path, dst: &Path) -> Result<()> {
    if fs::rename(src, dst).is_ok() {
        return Ok(());
    }
    let options = fs_extra::file::CopyOptions::new().overwrite(true);
    fs_extra::file::move_file(src, dst, &options)
        .with_context(|| format!("Could not move {} to {}", src.display(), dst.display()))?;
    Ok(())
}

/// Gets the absolute path from a potentially relative path.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}
