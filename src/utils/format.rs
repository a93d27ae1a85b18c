//! # 数值格式化
//!
//! PIMMS 脚本中的数值写法：最短往返表示，量级超出 [1e-4, 1e16) 时
//! 使用带符号、至少两位指数的科学计数法（`1e+19`, `1e-13`）。
//!
//! ## 依赖关系
//! - 被 `models/options.rs`, `script/` 使用
//! - 无外部模块依赖

/// 格式化脚本数值
pub fn fmt_num(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // `{:e}` 给出最短往返尾数，例如 "1.5e-13"
    let sci = format!("{:e}", value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return value.to_string();
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return value.to_string();
    };

    if (-4..16).contains(&exp) {
        value.to_string()
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    }
}
