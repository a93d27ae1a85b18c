//! # PIMMS 命令脚本
//!
//! 将各指令按固定顺序组装成 PIMMS 可执行的脚本：
//! 模型、输出端、输入流量、`go <flux>`、`q`。
//!
//! ## 依赖关系
//! - 被 `runner.rs`, `commands/` 使用
//! - 子模块: directives

pub mod directives;

use crate::error::Result;
use crate::models::PimmsOptions;
use crate::utils::format::fmt_num;

/// PIMMS 退出命令
const QUIT: &str = "q";

/// PIMMS 命令脚本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    lines: Vec<String>,
}

impl Script {
    /// 按固定顺序组装脚本
    pub fn assemble(model: String, mission: String, input_flux: String, flux: f64) -> Self {
        Script {
            lines: vec![
                model,
                mission,
                input_flux,
                format!("go {}", fmt_num(flux)),
                QUIT.to_string(),
            ],
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// 根据模拟选项构建脚本
///
/// 所有参数校验都在这里完成，出错时不会启动 PIMMS。
pub fn build_script(flux: f64, options: &PimmsOptions) -> Result<Script> {
    let model = directives::model_directive(options)?;
    let mission = directives::mission_directive(options)?;
    let input_flux = directives::input_flux_directive(options);

    Ok(Script::assemble(model, mission, input_flux, flux))
}
