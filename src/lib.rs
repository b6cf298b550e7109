//! # Lua Bridge
//!
//! 宿主程序与嵌入式 Lua 解释器之间的桥接层。
//!
//! ## Features
//!
//! - **解释器生命周期**: 创建、安装标准库、绑定原生函数、重新初始化
//! - **值封送**: 整数、浮点数、布尔值、不透明指针和文本在操作数栈上的 push/pop
//! - **脚本加载与求值**: 语法/运行时错误经诊断接口报告，解释器保持可用
//! - **致命错误桥接**: 原生函数中的 panic 被转换为 `BridgeError`
//!
//! ### Example
//!
//! ```no_run
//! use lua_bridge::scripting::LuaManager;
//!
//! let mut lua = LuaManager::with_defaults()?;
//! lua.run_script("speed = 4")?;
//! let doubled = lua.run_expression_float("speed * 2")?;
//! assert_eq!(doubled, 8.0);
//! # Ok::<(), lua_bridge::BridgeError>(())
//! ```
//!
//! ## Modules
//!
//! - [`core`]: 错误类型与日志
//! - [`config`]: 配置
//! - [`scripting`]: 嵌入桥接
//! - [`platform`]: 脚本文件访问
//! - [`services`]: 诊断报告

/// Core functionality: errors, logging and shared macros
pub mod core;
/// Configuration system
pub mod config;
/// Platform abstraction for script file access
pub mod platform;
/// Embedding bridge to the Lua interpreter
pub mod scripting;
/// External collaborators
pub mod services;

pub use crate::config::BridgeConfig;
pub use crate::core::{init_logging, BridgeError, BridgeResult};
pub use crate::scripting::{builtin_functions, prepare_expression, FunctionRegistry, LuaManager};
