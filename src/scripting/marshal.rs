//! 值封送
//!
//! 宿主类型与解释器操作数栈之间的 push/pop 原语。封送范围刻意保持狭窄：
//! 整数、浮点数、布尔值、不透明指针和文本。

use std::ffi::c_void;
use std::ptr::NonNull;

use mlua::{LightUserData, Value};

use super::manager::LuaManager;
use crate::core::{BridgeError, BridgeResult};

impl LuaManager {
    /// 操作数栈深度
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push_integer(&mut self, value: i64) {
        self.stack.push(Value::Integer(value));
    }

    pub fn push_number(&mut self, value: f64) {
        self.stack.push(Value::Number(value));
    }

    pub fn push_boolean(&mut self, value: bool) {
        self.stack.push(Value::Boolean(value));
    }

    /// 压入不透明指针；`None` 压入 nil
    pub fn push_pointer(&mut self, pointer: Option<NonNull<c_void>>) {
        let value = match pointer {
            Some(pointer) => Value::LightUserData(LightUserData(pointer.as_ptr())),
            None => Value::Nil,
        };
        self.stack.push(value);
    }

    pub fn push_string(&mut self, value: &str) -> BridgeResult<()> {
        let string = self
            .interpreter()?
            .create_string(value)
            .map_err(super::panic::escalate)?;
        self.stack.push(Value::String(string));
        Ok(())
    }

    /// 弹出栈顶文本
    ///
    /// 栈不能为空，且栈顶必须是文本（数字有规范的文本形式，同样接受）。
    pub fn pop_string(&mut self) -> BridgeResult<String> {
        let text = match self.stack.last() {
            None => {
                return Err(BridgeError::StackPrecondition(
                    "pop_string on an empty stack".to_string(),
                ))
            }
            Some(value @ (Value::String(_) | Value::Integer(_) | Value::Number(_))) => {
                self.coerce_string(value)
            }
            Some(other) => {
                return Err(BridgeError::StackPrecondition(format!(
                    "pop_string expected text on top of the stack, found {}",
                    other.type_name()
                )))
            }
        };
        self.stack.pop();
        text.ok_or_else(|| {
            BridgeError::StackPrecondition("top of the stack is not convertible to text".to_string())
        })
    }

    /// 读取指定位置的值并强制转换为整数，不移除
    ///
    /// 负数位置从栈顶计数（-1 为栈顶），正数位置从栈底计数（1 为栈底）。
    /// 位置超出有效范围时返回 `None`；非数字的值转换为 0。
    pub fn peek_integer(&self, position: i32) -> Option<i64> {
        let top = self.stack.len() as i64;
        let index = if position < 0 {
            top + i64::from(position) + 1
        } else {
            i64::from(position)
        };
        if index < 1 || index > top {
            return None;
        }

        let value = &self.stack[(index - 1) as usize];
        Some(self.coerce_number(value).map_or(0, |n| n as i64))
    }

    /// 弹出栈顶值并绑定为全局变量
    pub fn bind_global(&mut self, name: &str) -> BridgeResult<()> {
        let value = self.pop_value()?;
        self.interpreter()?
            .globals()
            .set(name, value)
            .map_err(super::panic::escalate)?;
        tracing::trace!(target: "lua", name, "Bound global");
        Ok(())
    }

    /// 构造让正在运行的脚本以运行时错误中止的错误值
    ///
    /// 原生函数返回 `Err(LuaManager::fail(..))` 即可。
    pub fn fail(message: impl Into<String>) -> mlua::Error {
        mlua::Error::RuntimeError(message.into())
    }

    pub(crate) fn pop_value(&mut self) -> BridgeResult<Value> {
        self.stack.pop().ok_or_else(|| {
            BridgeError::StackPrecondition("pop on an empty stack".to_string())
        })
    }

    /// Lua 的数字强制转换规则：数字原样返回，数字文本被解析，其它为 `None`
    pub(crate) fn coerce_number(&self, value: &Value) -> Option<f64> {
        match value {
            Value::Integer(i) => Some(*i as f64),
            Value::Number(n) => Some(*n),
            Value::String(_) => self
                .lua
                .as_ref()
                .and_then(|lua| lua.coerce_number(value.clone()).ok().flatten()),
            _ => None,
        }
    }

    /// Lua 的文本强制转换规则：文本和数字可转换，其它为 `None`
    pub(crate) fn coerce_string(&self, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(String::from_utf8_lossy(&s.as_bytes()).into_owned()),
            Value::Integer(_) | Value::Number(_) => self
                .lua
                .as_ref()
                .and_then(|lua| lua.coerce_string(value.clone()).ok().flatten())
                .map(|s| String::from_utf8_lossy(&s.as_bytes()).into_owned()),
            _ => None,
        }
    }
}

/// Lua 的真值规则：只有 nil 和 false 为假
pub(crate) fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Nil | Value::Boolean(false))
}
