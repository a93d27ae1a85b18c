//! # pimms-rs - PIMMS 命令行封装
//!
//! ## 子命令
//! - `predict` - 预测单个源的计数率/流量
//! - `script`  - 打印 PIMMS 脚本（不运行）
//! - `batch`   - 从 CSV 批量预测
//! - `models`  - 列出支持的模型和任务
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── script/   (脚本生成)
//!   │     ├── runner    (调用 pimms)
//!   │     └── parsers/  (输出解析)
//!   └── utils/      (输出、日志)
//! ```

use clap::Parser;
use pimms_rs::cli::Cli;
use pimms_rs::{commands, utils};

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    utils::logging::init_logging(cli.global.verbose);

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
