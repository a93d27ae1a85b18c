//! # predict 命令实现
//!
//! 运行一次 PIMMS 模拟并打印预测值。
//!
//! ## 依赖关系
//! - 使用 `cli/simulate.rs` 定义的参数
//! - 使用 `runner.rs`, `utils/output.rs`

use crate::cli::simulate::SimulateArgs;
use crate::error::Result;
use crate::models::PimmsOptions;
use crate::runner::PimmsRunner;
use crate::utils::format::fmt_num;
use crate::utils::output;

use tracing::info;

/// 执行 predict 命令
pub fn execute(args: SimulateArgs, runner: &PimmsRunner) -> Result<()> {
    let options = PimmsOptions::from(&args.options);

    output::print_info(&format!(
        "Model '{}', input flux {} ergs/s/cm2, output {}",
        options.model,
        fmt_num(args.flux),
        options.mission().unwrap_or("model flux")
    ));
    info!(flux = args.flux, model = %options.model, "running PIMMS");

    match runner.simulate(args.flux, &options)? {
        Some(value) => output::print_prediction(value, super::result_unit(&options)),
        None => output::print_warning("PIMMS did not report a prediction"),
    }

    Ok(())
}
