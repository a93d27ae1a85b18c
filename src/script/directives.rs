//! # PIMMS 指令格式化
//!
//! 生成 PIMMS 命令脚本中的单行指令：
//! - `mo ...`   光谱模型（含吸收和红移）
//! - `inst ...` 输出端（任务/探测器/滤光片，或模型流量）
//! - `from ...` 输入流量
//!
//! ## 依赖关系
//! - 被 `script/mod.rs` 使用
//! - 使用 `models/`, `utils/format.rs`

use crate::error::{PimmsError, Result};
use crate::models::{EnergyRange, PimmsOptions, SpectralModel};
use crate::utils::format::fmt_num;

use tracing::warn;

/// 默认氢柱密度 (cm-2)
pub const DEFAULT_NH: f64 = 1e19;

/// 默认银河系氢柱密度 (cm-2)
pub const DEFAULT_GALNH: f64 = 1e19;

/// 未指定任务时的输出端指令
const FLUX_OUTPUT: &str = "inst flux ergs";

/// 输入流量指令前缀
const FLUX_INPUT: &str = "from flux ergs";

/// 生成光谱模型指令
pub fn model_directive(options: &PimmsOptions) -> Result<String> {
    let model = SpectralModel::resolve(options)?;

    let mut directive = format!("mo {}", model.kind().keyword());
    for value in model.parameters() {
        directive.push(' ');
        directive.push_str(&fmt_num(value));
    }

    let directive = add_absorption(directive, options.nh);
    Ok(add_redshift(directive, options.z, options.galnh))
}

/// 追加吸收柱密度
pub fn add_absorption(mut directive: String, nh: Option<f64>) -> String {
    directive.push(' ');
    directive.push_str(&fmt_num(nh.unwrap_or(DEFAULT_NH)));
    directive
}

/// 追加红移子句 `z <z> <galnh>`，z 为 None 或 0 时不追加
pub fn add_redshift(mut directive: String, z: Option<f64>, galnh: Option<f64>) -> String {
    if let Some(z) = z.filter(|z| *z != 0.0) {
        directive.push_str(&format!(
            " z {} {}",
            fmt_num(z),
            fmt_num(galnh.unwrap_or(DEFAULT_GALNH))
        ));
    }
    directive
}

/// 追加能量区间 `lo-hi`，可选 `unabsorbed`
pub fn add_energy_range(
    mut directive: String,
    range: Option<EnergyRange>,
    unabsorbed: bool,
) -> String {
    directive.push(' ');
    directive.push_str(&range.unwrap_or_default().to_string());

    if unabsorbed {
        directive.push_str(" unabsorbed");
    }

    directive
}

/// 生成输出端指令
///
/// 指定任务时输出总是被吸收的计数率，`unabsorbed` 被忽略。
pub fn mission_directive(options: &PimmsOptions) -> Result<String> {
    let (directive, unabsorbed) = match options.mission() {
        Some(mission) => {
            if !PimmsOptions::is_known_mission(mission) {
                warn!(mission, "mission is not in the documented PIMMS mission list");
            }

            let mut directive = format!("inst {}", mission);
            for (key, value) in [("detector", &options.detector), ("filter", &options.filter)] {
                let value = value.as_deref().ok_or_else(|| PimmsError::MissingParameter {
                    parameter: key.to_string(),
                    model: format!("instrument {}", mission),
                })?;
                directive.push(' ');
                directive.push_str(value);
            }
            (directive, false)
        }
        None => (FLUX_OUTPUT.to_string(), options.unabsorbed),
    };

    Ok(add_energy_range(
        directive,
        options.output_energy_range,
        unabsorbed,
    ))
}

/// 生成输入流量指令（输入流量从不标记为 unabsorbed）
pub fn input_flux_directive(options: &PimmsOptions) -> String {
    add_energy_range(FLUX_INPUT.to_string(), options.input_energy_range, false)
}
