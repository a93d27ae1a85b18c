//! # 数据模型模块
//!
//! 定义光谱模型、能量区间和模拟选项等数据模型。
//!
//! ## 依赖关系
//! - 被 `script/`, `runner.rs` 和 `commands/` 使用
//! - 子模块: spectrum, options

pub mod options;
pub mod spectrum;

pub use options::{EnergyRange, PimmsOptions, KNOWN_MISSIONS};
pub use spectrum::{ModelKind, SpectralModel};
