//! 全局错误处理机制

use thiserror::Error;

/// NOVA 统一错误类型
#[derive(Error, Debug)]
pub enum NovaError {
    #[error("Invalid signal: {0}")]
    Signal(String),

    #[error("Predictive network error: {0}")]
    Predictor(String),

    #[error("Cognition layer error: {0}")]
    Cognition(String),

    #[error("History error: {0}")]
    History(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Bus error: {0}")]
    Bus(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// 统一 Result 类型别名
pub type Result<T> = std::result::Result<T, NovaError>;
