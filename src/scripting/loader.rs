//! 脚本加载与求值
//!
//! 每次调用分两个阶段：加载（编译为代码块并压栈）和求值（以零参数调用代码块）。
//! 语法错误和运行时错误经诊断接口报告后返回 `Ok(false)`，解释器保持可用。

use std::path::Path;

use mlua::{MultiValue, Value};

use super::manager::LuaManager;
use super::marshal::is_truthy;
use super::panic::{self, escalate, is_fatal};
use crate::core::{BridgeError, BridgeResult};
use crate::platform::FsError;

/// 一次性代码块读取器：第一次返回完整源码，之后表示输入结束
///
/// 加载阶段会一直读取到输入结束，再把读到的片段交给解释器编译。
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    source: &'a [u8],
    delivered: bool,
}

impl<'a> ChunkReader<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            delivered: false,
        }
    }

    /// 读取到输入结束，返回完整的代码块
    pub fn drain(self) -> Vec<u8> {
        self.collect::<Vec<&[u8]>>().concat()
    }
}

impl<'a> Iterator for ChunkReader<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.delivered {
            return None;
        }
        self.delivered = true;
        Some(self.source)
    }
}

/// 将配置文件风格的表达式改写为Lua能解析的形式
///
/// - `//` 注释改为 `--`
/// - HTML 颜色值前的 `#` 改为 `--`
/// - 去掉开头的一个 `+`（Lua 不支持一元加号）
pub fn prepare_expression(expression: &str) -> String {
    let rewritten = expression.replace("//", "--").replace('#', "--");
    match rewritten.strip_prefix('+') {
        Some(stripped) => stripped.to_string(),
        None => rewritten,
    }
}

impl LuaManager {
    /// 加载并执行脚本文件
    ///
    /// 打开或读取失败时记录警告并返回 `Ok(false)`，不会调用解释器。
    pub fn run_script_file(&mut self, path: impl AsRef<Path>) -> BridgeResult<bool> {
        let path = path.as_ref();
        let script = match self.filesystem.read_sync(path) {
            Ok(script) => script,
            Err(err @ (FsError::NotFound | FsError::PermissionDenied)) => {
                tracing::warn!(
                    target: "lua",
                    "Couldn't open Lua script \"{}\": {}",
                    path.display(),
                    err
                );
                return Ok(false);
            }
            Err(err) => {
                tracing::warn!(
                    target: "lua",
                    "Error reading Lua script \"{}\": {}",
                    path.display(),
                    err
                );
                return Ok(false);
            }
        };

        // Lua 代码块是字节串，不要求文件是 UTF-8
        let display = String::from_utf8_lossy(&script);
        if !self.load_chunk(&script, &display)? {
            return Ok(false);
        }
        self.evaluate(false, &display)
    }

    /// 加载并执行脚本，不期望返回值
    pub fn run_script(&mut self, script: &str) -> BridgeResult<bool> {
        if !self.load_chunk(script.as_bytes(), script)? {
            return Ok(false);
        }
        self.evaluate(false, script)
    }

    /// 将文本作为 `return` 语句求值，成功时栈顶恰好留下一个结果
    ///
    /// 结果为函数时返回 `BridgeError::FunctionResult`；需要把函数当作布尔值使用时，
    /// 应在返回前自行转换。
    pub fn run_expression(&mut self, expression: &str) -> BridgeResult<bool> {
        let expression = if self.config.prepare_expressions {
            prepare_expression(expression)
        } else {
            expression.to_string()
        };
        let statement = format!("return {}", expression);

        if !self.load_chunk(statement.as_bytes(), &expression)? {
            return Ok(false);
        }
        if !self.evaluate(true, &expression)? {
            return Ok(false);
        }

        if matches!(self.stack.last(), Some(Value::Function(_))) {
            self.stack.pop();
            return Err(BridgeError::FunctionResult);
        }
        Ok(true)
    }

    /// 求值并转换为布尔值；求值失败时为 `false`
    pub fn run_expression_bool(&mut self, expression: &str) -> BridgeResult<bool> {
        if !self.run_expression(expression)? {
            return Ok(false);
        }
        let value = self.pop_value()?;
        Ok(is_truthy(&value))
    }

    /// 求值并转换为浮点数；求值失败或结果不是数字时为 `0`
    pub fn run_expression_float(&mut self, expression: &str) -> BridgeResult<f64> {
        if !self.run_expression(expression)? {
            return Ok(0.0);
        }
        let value = self.pop_value()?;
        Ok(self.coerce_number(&value).unwrap_or(0.0))
    }

    /// 求值并转换为文本；求值失败或结果无法转换为文本时为 `None`
    pub fn run_expression_string(&mut self, expression: &str) -> BridgeResult<Option<String>> {
        if !self.run_expression(expression)? {
            return Ok(None);
        }
        let value = self.pop_value()?;
        let text = self.coerce_string(&value);
        if text.is_none() {
            tracing::warn!(
                target: "lua",
                "Expression \"{}\" returned a {}, expected text",
                expression,
                value.type_name()
            );
        }
        Ok(text)
    }

    /// 加载阶段：成功时栈上多出恰好一个代码块
    fn load_chunk(&mut self, source: &[u8], display: &str) -> BridgeResult<bool> {
        let base = self.stack.len();
        let loaded = {
            let lua = self.interpreter()?;
            let chunk = ChunkReader::new(source).drain();
            lua.load(chunk)
                .set_name(self.config.chunk_name.as_str())
                .into_function()
        };

        match loaded {
            Ok(function) => {
                self.stack.push(Value::Function(function));
                debug_assert_eq!(self.stack.len(), base + 1);
                Ok(true)
            }
            Err(err) if is_fatal(&err) => Err(escalate(err)),
            Err(err) => {
                self.report("parsing", display, &err);
                Ok(false)
            }
        }
    }

    /// 求值阶段：以零参数调用栈顶的代码块
    ///
    /// `want_result` 为真时，结果被调整为恰好一个值留在栈顶。
    fn evaluate(&mut self, want_result: bool, display: &str) -> BridgeResult<bool> {
        let function = match self.stack.pop() {
            Some(Value::Function(function)) => function,
            Some(other) => {
                let kind = other.type_name();
                self.stack.push(other);
                return Err(BridgeError::StackPrecondition(format!(
                    "expected a compiled chunk on top of the stack, found {}",
                    kind
                )));
            }
            None => {
                return Err(BridgeError::StackPrecondition(
                    "expected a compiled chunk on top of the stack, found nothing".to_string(),
                ))
            }
        };
        let base = self.stack.len();

        let outcome = panic::guard(|| Ok(function.call::<MultiValue>(())));
        let values = match outcome {
            Ok(Ok(values)) => values,
            Ok(Err(err)) if is_fatal(&err) => {
                self.stack.truncate(base);
                return Err(escalate(err));
            }
            Ok(Err(err)) => {
                self.stack.truncate(base);
                self.report("evaluating", display, &err);
                return Ok(false);
            }
            Err(err) => {
                self.stack.truncate(base);
                return Err(err);
            }
        };

        if want_result {
            let result = values.into_iter().next().unwrap_or(Value::Nil);
            self.stack.push(result);
            debug_assert_eq!(self.stack.len(), base + 1);
        }
        Ok(true)
    }

    fn report(&self, phase: &str, display: &str, err: &mlua::Error) {
        let message = format!("Lua runtime error {} \"{}\": {}", phase, display, err);
        self.diagnostics.show_error(&message, &self.config.error_tag);
    }
}
