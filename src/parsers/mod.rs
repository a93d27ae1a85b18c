//! # 解析器模块
//!
//! 解析外部程序 PIMMS 的文本输出。
//!
//! ## 依赖关系
//! - 被 `runner.rs` 使用
//! - 子模块: pimms_out

pub mod pimms_out;

pub use pimms_out::{parse_output, PREDICTION_MARKER};
