//! # 统一错误处理模块
//!
//! 定义 pimms-rs 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// pimms-rs 统一错误类型
#[derive(Error, Debug)]
pub enum PimmsError {
    // ─────────────────────────────────────────────────────────────
    // 模型/参数错误（在启动 PIMMS 之前抛出）
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown model: '{0}'")]
    UnknownModel(String),

    #[error("Model '{0}' is registered but not supported yet")]
    UnsupportedModel(String),

    #[error("Parameter '{parameter}' missing for {model}")]
    MissingParameter { parameter: String, model: String },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("PIMMS simulation failed: {command} ({status})\n{stderr}")]
    SimulationExecution {
        command: String,
        status: String,
        stderr: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 输出解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Cannot extract a value from PIMMS prediction: '{line}'")]
    MalformedPrediction { line: String },

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range format: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, PimmsError>;
