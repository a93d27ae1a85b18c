//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `script/`, `runner.rs`, `batch/`, `utils/`
//! - 子模块: predict, script, batch, models

pub mod batch;
pub mod models;
pub mod predict;
pub mod script;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use crate::models::PimmsOptions;

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    let runner = cli.global.runner();

    match cli.command {
        Commands::Predict(args) => predict::execute(args, &runner),
        Commands::Script(args) => script::execute(args),
        Commands::Batch(args) => batch::execute(args, &runner),
        Commands::Models => models::execute(),
    }
}

/// 结果单位：指定任务时为计数率，否则为流量
pub(crate) fn result_unit(options: &PimmsOptions) -> &'static str {
    match (options.mission(), options.unabsorbed) {
        (Some(_), _) => "cps",
        (None, true) => "ergs/s/cm2 (unabsorbed)",
        (None, false) => "ergs/s/cm2",
    }
}
