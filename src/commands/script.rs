//! # script 命令实现
//!
//! 只生成并打印 PIMMS 脚本，不调用 PIMMS（dry run）。
//!
//! ## 依赖关系
//! - 使用 `cli/simulate.rs` 定义的参数
//! - 使用 `script/`

use crate::cli::simulate::SimulateArgs;
use crate::error::Result;
use crate::models::PimmsOptions;
use crate::script::build_script;

/// 执行 script 命令
pub fn execute(args: SimulateArgs) -> Result<()> {
    let options = PimmsOptions::from(&args.options);
    let script = build_script(args.flux, &options)?;

    // 原样输出，可直接重定向为 .xco 文件
    print!("{}", script);

    Ok(())
}
