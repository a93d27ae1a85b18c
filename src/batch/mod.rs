//! # 批量处理模块
//!
//! 从 CSV 源列表批量运行 PIMMS。
//!
//! ## 功能
//! - 读取源列表并转换为模拟请求
//! - 并行处理
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod input;
pub mod runner;

pub use input::{read_sources, SourceEntry, SourceRequest};
pub use runner::{BatchResult, BatchRunner, ProcessResult};
