//! # batch 子命令 CLI 定义
//!
//! 从 CSV 读取源列表并批量运行 PIMMS
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use clap::Args;
use std::path::PathBuf;

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// CSV file with one source per row (columns: name, flux, model, mission, detector,
    /// filter, unabsorbed, nh, phoindex, cutoff, efold, kT, abund, z, galnh,
    /// input_elo, input_ehi, output_elo, output_ehi)
    pub input: PathBuf,

    /// Write results to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of parallel PIMMS processes (0 = number of CPUs)
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,
}
