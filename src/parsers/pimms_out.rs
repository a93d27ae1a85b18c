//! # PIMMS 输出解析器
//!
//! 从 PIMMS 的文本输出中提取预测值（计数率或流量）。
//!
//! 预测行有两种布局：
//! ```text
//! * PIMMS predicts 2.345E-02 cps with XMM PN THIN
//! * PIMMS predicts a flux of 1.234E-13 ergs/cm/cm/s
//! ```
//! 先尝试第 4 个字段，失败时取倒数第 2 个字段。
//!
//! ## 依赖关系
//! - 被 `runner.rs` 使用
//! - 无外部模块依赖

use crate::error::{PimmsError, Result};

/// 预测行标记
pub const PREDICTION_MARKER: &str = "* PIMMS predicts";

/// 解析 PIMMS 输出
///
/// 多个预测行时以最后一行为准；没有预测行时返回 `Ok(None)`。
pub fn parse_output(output: &str) -> Result<Option<f64>> {
    let mut result = None;

    for line in output.split('\n') {
        if line.starts_with(PREDICTION_MARKER) {
            result = Some(parse_prediction_line(line)?);
        }
    }

    Ok(result)
}

/// 解析单个预测行
fn parse_prediction_line(line: &str) -> Result<f64> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    let primary = fields.get(3).and_then(|s| s.parse::<f64>().ok());
    let fallback = || {
        fields
            .len()
            .checked_sub(2)
            .and_then(|i| fields.get(i))
            .and_then(|s| s.parse::<f64>().ok())
    };

    primary
        .or_else(fallback)
        .ok_or_else(|| PimmsError::MalformedPrediction {
            line: line.trim_end().to_string(),
        })
}
