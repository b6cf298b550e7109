//! 原生函数注册表
//!
//! 注册表是显式构建的有序列表，在解释器构造时被重放到每个新实例中。
//! 列表顺序为最近注册者在前。

use std::fmt;

use mlua::{Lua, MultiValue, Value};

/// 暴露给脚本的原生函数签名
pub type NativeFn = fn(&Lua, MultiValue) -> mlua::Result<Value>;

/// 注册表条目，构造后不可变
#[derive(Clone)]
pub struct NativeFunction {
    name: String,
    func: NativeFn,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl NativeFunction {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn func(&self) -> NativeFn {
        self.func
    }
}

/// 原生函数注册表
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    // 按注册顺序存放，迭代时反向
    entries: Vec<NativeFunction>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个原生函数
    ///
    /// 名称重复不会被拒绝：绑定时按列表顺序依次覆盖，最早注册的条目最后生效。
    pub fn register(&mut self, name: impl Into<String>, func: NativeFn) -> &mut Self {
        self.entries.push(NativeFunction {
            name: name.into(),
            func,
        });
        self
    }

    /// 构建器风格的注册
    pub fn with(mut self, name: impl Into<String>, func: NativeFn) -> Self {
        self.register(name, func);
        self
    }

    /// 按列表顺序迭代（最近注册者在前）
    pub fn iter(&self) -> impl Iterator<Item = &NativeFunction> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// 将注册表重放到解释器实例中，返回执行的绑定次数
    ///
    /// 按列表顺序逐个绑定，同名条目由后绑定者覆盖。
    pub fn bind_into(&self, lua: &Lua) -> mlua::Result<usize> {
        let globals = lua.globals();
        let mut bound = 0;

        for entry in self.iter() {
            let function = lua.create_function(entry.func)?;
            globals.set(entry.name.as_str(), function)?;
            bound += 1;
        }

        Ok(bound)
    }
}
