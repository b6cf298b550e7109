/// 统一配置系统
///
/// 提供TOML/JSON配置文件和环境变量覆盖
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub mod libraries;

pub use libraries::LibraryConfig;

use crate::impl_default;

/// 默认的代码块名称，出现在Lua错误消息中
pub const DEFAULT_CHUNK_NAME: &str = "in";

/// 默认的诊断标签
pub const DEFAULT_ERROR_TAG: &str = "LUA_ERROR";

/// 桥接配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 桥接主配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// 加载代码块时使用的名称
    #[serde(default = "default_chunk_name")]
    pub chunk_name: String,

    /// 报告脚本错误时使用的诊断标签
    #[serde(default = "default_error_tag")]
    pub error_tag: String,

    /// 标准库配置
    #[serde(default)]
    pub libraries: LibraryConfig,

    /// 是否在求值前对表达式执行 `prepare_expression`
    #[serde(default)]
    pub prepare_expressions: bool,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_chunk_name() -> String {
    DEFAULT_CHUNK_NAME.to_string()
}

fn default_error_tag() -> String {
    DEFAULT_ERROR_TAG.to_string()
}

impl_default!(BridgeConfig {
    chunk_name: default_chunk_name(),
    error_tag: default_error_tag(),
    libraries: LibraryConfig::default(),
    prepare_expressions: false,
    logging: LoggingConfig::default(),
});

impl BridgeConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("LUA_BRIDGE_CHUNK_NAME") {
            self.chunk_name = val;
        }
        if let Ok(val) = env::var("LUA_BRIDGE_ERROR_TAG") {
            self.error_tag = val;
        }
        if let Ok(val) = env::var("LUA_BRIDGE_PREPARE_EXPRESSIONS") {
            self.prepare_expressions = val.parse().unwrap_or(self.prepare_expressions);
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.chunk_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "chunk_name must not be empty".to_string(),
            ));
        }
        if self.error_tag.is_empty() {
            return Err(ConfigError::ValidationError(
                "error_tag must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: LogLevel,
}

impl_default!(LoggingConfig {
    level: LogLevel::Info,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}
