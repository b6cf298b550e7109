//! 统一错误处理模块
//!
//! 提供桥接层范围内的统一错误类型定义
//!
//! ## 错误类型分层
//!
//! - **可恢复错误**: 语法错误、运行时错误、脚本文件读取失败。这些错误在本地处理，
//!   通过诊断接口/日志报告，并以 `Ok(false)` 等返回值体现，不会出现在这里。
//! - **致命错误** (`BridgeError`): 解释器创建失败、解释器内部 panic、
//!   表达式返回函数等误用，以及栈操作前置条件被破坏。

use thiserror::Error;

use crate::config::ConfigError;

/// 桥接层致命错误类型
#[derive(Error, Debug)]
pub enum BridgeError {
    /// 解释器实例创建或标准库安装失败
    #[error("Lua initialization error: {0}")]
    Init(String),

    /// 原生函数或解释器内部发生的 panic，携带原始错误文本
    #[error("Lua panic: {0}")]
    Panic(String),

    /// 解释器内部不变量被破坏（内存错误、安全性错误等）
    #[error("Lua fatal error: {0}")]
    Fatal(String),

    /// 表达式的结果是一个函数而不是值
    #[error("result is a function; did you forget \"()\"?")]
    FunctionResult,

    /// 操作数栈的前置条件不满足
    #[error("Lua stack precondition violated: {0}")]
    StackPrecondition(String),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// 桥接层结果类型别名
pub type BridgeResult<T> = Result<T, BridgeError>;
