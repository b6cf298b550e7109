//! Lua 嵌入桥接
//!
//! - `registry` - 原生函数注册表
//! - `marshal` - 宿主值与操作数栈之间的封送
//! - `loader` - 脚本加载与求值
//! - `manager` - 解释器生命周期
//! - `panic` - 致命错误桥接
//! - `natives` - 内置原生函数

pub mod loader;
pub mod manager;
pub mod marshal;
pub mod natives;
mod panic;
pub mod registry;

pub use loader::{prepare_expression, ChunkReader};
pub use manager::LuaManager;
pub use natives::builtin_functions;
pub use registry::{FunctionRegistry, NativeFn, NativeFunction};
