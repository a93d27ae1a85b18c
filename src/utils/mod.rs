//! # 工具函数模块
//!
//! 提供数值格式化、美化输出、进度条和日志初始化等工具。
//!
//! ## 依赖关系
//! - 被 `script/`, `commands/`, `batch/` 使用
//! - 子模块: format, logging, output, progress

pub mod format;
pub mod logging;
pub mod output;
pub mod progress;
