//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `predict`: 运行一次 PIMMS 模拟
//! - `script`: 只打印生成的 PIMMS 脚本
//! - `batch`: 从 CSV 批量模拟
//! - `models`: 列出支持的模型和任务
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: simulate, batch

pub mod batch;
pub mod simulate;

use crate::runner::{PimmsRunner, DEFAULT_PROGRAM};

use clap::{Args, Parser, Subcommand};

/// pimms-rs - PIMMS 命令行封装
#[derive(Parser)]
#[command(name = "pimms-rs")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Run PIMMS (Portable, Interactive Multi-Mission Simulator) count-rate and flux predictions",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// 全局参数
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// PIMMS executable
    #[arg(long, global = true, env = "PIMMS_BIN", default_value = DEFAULT_PROGRAM)]
    pub pimms_bin: String,

    /// Extra argument passed to PIMMS before the script file (repeatable)
    #[arg(long = "pimms-arg", global = true, allow_hyphen_values = true)]
    pub pimms_args: Vec<String>,

    /// Enable debug logging (overridden by PIMMS_LOG)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// 构建 PIMMS 执行器
    pub fn runner(&self) -> PimmsRunner {
        PimmsRunner::new(self.pimms_bin.as_str()).with_args(self.pimms_args.iter().cloned())
    }
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Predict a count rate (or output flux) for one source
    Predict(simulate::SimulateArgs),

    /// Print the PIMMS script for one source without running PIMMS
    Script(simulate::SimulateArgs),

    /// Run predictions for every source in a CSV file
    Batch(batch::BatchArgs),

    /// List supported spectral models and documented missions
    Models,
}
