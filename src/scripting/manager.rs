use mlua::{Lua, LuaOptions, Value};

use super::natives::builtin_functions;
use super::panic::{self, escalate};
use super::registry::FunctionRegistry;
use crate::config::BridgeConfig;
use crate::core::{BridgeError, BridgeResult};
use crate::platform::{Filesystem, NativeFilesystem};
use crate::services::{DiagnosticSink, TracingDiagnostics};

/// Lua 解释器管理器
///
/// 独占一个解释器实例及其操作数栈。所有操作都在调用线程上同步完成，
/// 不支持跨线程共享。
pub struct LuaManager {
    // 栈中的值引用解释器，必须先于解释器释放
    pub(crate) stack: Vec<Value>,
    pub(crate) lua: Option<Lua>,
    registry: FunctionRegistry,
    pub(crate) config: BridgeConfig,
    pub(crate) diagnostics: Box<dyn DiagnosticSink>,
    pub(crate) filesystem: Box<dyn Filesystem>,
    generation: u64,
}

impl LuaManager {
    /// 创建管理器并初始化解释器
    pub fn new(registry: FunctionRegistry, config: BridgeConfig) -> BridgeResult<Self> {
        config.validate()?;

        let mut manager = Self {
            stack: Vec::new(),
            lua: None,
            registry,
            config,
            diagnostics: Box::new(TracingDiagnostics),
            filesystem: Box::new(NativeFilesystem::new()),
            generation: 0,
        };
        manager.init()?;
        Ok(manager)
    }

    /// 使用内置原生函数和默认配置创建管理器
    pub fn with_defaults() -> BridgeResult<Self> {
        Self::new(builtin_functions(), BridgeConfig::default())
    }

    /// 替换诊断报告接口
    pub fn with_diagnostics(mut self, diagnostics: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    /// 替换脚本文件访问接口
    pub fn with_filesystem(mut self, filesystem: impl Filesystem + 'static) -> Self {
        self.filesystem = Box::new(filesystem);
        self
    }

    /// (重新)初始化解释器
    ///
    /// 已有的实例会先被销毁。新实例安装基础库和配置的标准库，操作数栈清空，
    /// 然后按列表顺序绑定注册表中的全部原生函数。初始化期间的 panic 会被转换为
    /// `BridgeError::Panic`，此时管理器没有可用实例，需要再次 `init`。
    pub fn init(&mut self) -> BridgeResult<()> {
        panic::guard(|| self.create_instance())
    }

    fn create_instance(&mut self) -> BridgeResult<()> {
        if let Some(previous) = self.lua.take() {
            self.stack.clear();
            drop(previous);
            tracing::debug!(target: "lua", generation = self.generation, "Closed Lua instance");
        }

        let lua = Lua::new_with(self.config.libraries.std_libs(), LuaOptions::new())
            .map_err(|e| BridgeError::Init(e.to_string()))?;

        // 安装标准库不应在宿主栈上留下任何值
        self.stack.clear();

        let bound = self.registry.bind_into(&lua).map_err(|e| {
            if panic::is_fatal(&e) {
                escalate(e)
            } else {
                BridgeError::Init(e.to_string())
            }
        })?;

        self.lua = Some(lua);
        self.generation += 1;
        tracing::info!(
            target: "lua",
            generation = self.generation,
            natives = bound,
            "Lua instance initialized"
        );
        Ok(())
    }

    /// 当前解释器实例
    pub fn lua(&self) -> Option<&Lua> {
        self.lua.as_ref()
    }

    pub(crate) fn interpreter(&self) -> BridgeResult<&Lua> {
        self.lua
            .as_ref()
            .ok_or_else(|| BridgeError::Init("Lua instance is not initialized".to_string()))
    }

    /// 成功初始化的次数
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}

impl Drop for LuaManager {
    fn drop(&mut self) {
        self.stack.clear();
        if self.lua.take().is_some() {
            tracing::debug!(target: "lua", generation = self.generation, "Released Lua instance");
        }
    }
}
