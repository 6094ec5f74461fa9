//! # 统一错误处理模块
//!
//! 定义 labsol 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// labsol 统一错误类型
#[derive(Error, Debug)]
pub enum LabsolError {
    // ─────────────────────────────────────────────────────────────
    // 输入域错误（计算被拒绝）
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown reagent '{name}'. Known reagents: {known}")]
    UnknownReagent { name: String, known: String },

    #[error("Unknown buffer '{name}'. Known buffers: {known}")]
    UnknownBuffer { name: String, known: String },

    #[error("Invalid concentration list '{0}'. Use comma-separated numbers, e.g. '0.01,0.1,1,3,10'")]
    InvalidConcentrationList(String),

    // ─────────────────────────────────────────────────────────────
    // 账户 / 订阅错误
    // ─────────────────────────────────────────────────────────────
    #[error("Authentication failed: {reason}")]
    AuthFailed { reason: String },

    #[error("Not logged in. Run `labsol account login` first")]
    SessionMissing,

    #[error("Your plan is '{plan}'. Calculator modes require a 'pro' subscription")]
    PlanRequired { plan: String },

    // ─────────────────────────────────────────────────────────────
    // 后端错误
    // ─────────────────────────────────────────────────────────────
    #[error("Backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

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

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, LabsolError>;
