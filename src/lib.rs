//! # pimms-rs - PIMMS 命令行封装
//!
//! 为 PIMMS (Portable, Interactive Multi-Mission Simulator) 生成命令脚本、
//! 调用外部程序并解析预测的计数率或流量。
//!
//! ```no_run
//! use pimms_rs::{pimms, PimmsOptions};
//!
//! let options = PimmsOptions {
//!     phoindex: Some(1.7),
//!     mission: Some("XMM".to_string()),
//!     detector: Some("PN".to_string()),
//!     filter: Some("THIN".to_string()),
//!     ..PimmsOptions::new("powerlaw")
//! };
//! let rate = pimms(1e-13, &options)?;
//! # Ok::<(), pimms_rs::PimmsError>(())
//! ```
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── models/    (光谱模型、模拟选项)
//!   ├── script/    (指令格式化与脚本组装)
//!   ├── runner.rs  (临时脚本文件 + 调用 pimms)
//!   ├── parsers/   (PIMMS 输出解析)
//!   ├── cli/       (命令行参数定义)
//!   ├── commands/  (命令执行逻辑)
//!   ├── batch/     (CSV 批量模拟)
//!   ├── utils/     (工具函数)
//!   └── error.rs   (错误处理)
//! ```

pub mod batch;
pub mod cli;
pub mod commands;
pub mod error;
pub mod models;
pub mod parsers;
pub mod runner;
pub mod script;
pub mod utils;

pub use error::{PimmsError, Result};
pub use models::{EnergyRange, ModelKind, PimmsOptions, SpectralModel};
pub use parsers::parse_output;
pub use runner::PimmsRunner;
pub use script::{build_script, Script};

/// 运行一次 PIMMS 模拟
///
/// 使用 `PATH` 中的 `pimms`。返回计数率 (cps)；未指定任务时返回
/// 输出能段内的模型流量 (ergs/s/cm2)。PIMMS 没有给出预测时返回 `None`。
///
/// 每次调用使用独立的临时脚本文件；并发调用是否安全取决于 PIMMS 本身。
pub fn pimms(flux: f64, options: &PimmsOptions) -> Result<Option<f64>> {
    PimmsRunner::default().simulate(flux, options)
}
