//! # Reporting Module / 报告模块
//!
//! Console, HTML and JSON presentation of regression run results.
//!
//! 回归运行结果的控制台、HTML 和 JSON 展示。

pub mod console;
pub mod html;
pub mod json;
