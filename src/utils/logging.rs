//! # 日志初始化
//!
//! 基于 `tracing-subscriber`，日志写到 stderr，stdout 只输出结果。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `tracing-subscriber` crate

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// 日志过滤环境变量
pub const LOG_ENV: &str = "PIMMS_LOG";

static INIT: Once = Once::new();

/// 初始化日志
///
/// 优先读取 `PIMMS_LOG`（如 `PIMMS_LOG=pimms_rs=debug`），否则默认 `warn`，
/// `verbose` 时为 `debug`。重复调用无副作用。
pub fn init_logging(verbose: bool) {
    INIT.call_once(|| {
        let default = if verbose { "debug" } else { "warn" };
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    });
}
