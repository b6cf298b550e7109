//! 内置原生函数
//!
//! 日期/时间函数只是本地时钟的薄封装；`Trace` 把脚本文本写入日志。

use chrono::{Datelike, Local, Timelike};
use mlua::{Lua, MultiValue, Value};

use super::manager::LuaManager;
use super::registry::FunctionRegistry;

/// 返回预先填充了内置函数的注册表
pub fn builtin_functions() -> FunctionRegistry {
    FunctionRegistry::new()
        .with("MonthOfYear", month_of_year)
        .with("DayOfMonth", day_of_month)
        .with("Hour", hour)
        .with("Minute", minute)
        .with("Second", second)
        .with("Year", year)
        .with("Weekday", weekday)
        .with("DayOfYear", day_of_year)
        .with("Trace", trace)
}

fn month_of_year(_: &Lua, _: MultiValue) -> mlua::Result<Value> {
    Ok(Value::Integer(i64::from(Local::now().month())))
}

fn day_of_month(_: &Lua, _: MultiValue) -> mlua::Result<Value> {
    Ok(Value::Integer(i64::from(Local::now().day())))
}

fn hour(_: &Lua, _: MultiValue) -> mlua::Result<Value> {
    Ok(Value::Integer(i64::from(Local::now().hour())))
}

fn minute(_: &Lua, _: MultiValue) -> mlua::Result<Value> {
    Ok(Value::Integer(i64::from(Local::now().minute())))
}

fn second(_: &Lua, _: MultiValue) -> mlua::Result<Value> {
    Ok(Value::Integer(i64::from(Local::now().second())))
}

fn year(_: &Lua, _: MultiValue) -> mlua::Result<Value> {
    Ok(Value::Integer(i64::from(Local::now().year())))
}

/// 0 = 星期日
fn weekday(_: &Lua, _: MultiValue) -> mlua::Result<Value> {
    Ok(Value::Integer(i64::from(
        Local::now().weekday().num_days_from_sunday(),
    )))
}

/// 从 0 开始
fn day_of_year(_: &Lua, _: MultiValue) -> mlua::Result<Value> {
    Ok(Value::Integer(i64::from(Local::now().ordinal0())))
}

fn trace(lua: &Lua, args: MultiValue) -> mlua::Result<Value> {
    let text = string_arg(lua, args, "Trace")?;
    tracing::trace!(target: "script", "{}", text);
    Ok(Value::Boolean(true))
}

/// 读取第一个参数并按 Lua 规则转换为文本
fn string_arg(lua: &Lua, args: MultiValue, function: &str) -> mlua::Result<String> {
    let value = args.into_iter().next().unwrap_or(Value::Nil);
    let type_name = value.type_name();
    match value {
        Value::String(_) | Value::Integer(_) | Value::Number(_) => lua
            .coerce_string(value)?
            .map(|s| String::from_utf8_lossy(&s.as_bytes()).into_owned())
            .ok_or_else(|| bad_argument(function, type_name)),
        _ => Err(bad_argument(function, type_name)),
    }
}

fn bad_argument(function: &str, found: &str) -> mlua::Error {
    LuaManager::fail(format!(
        "bad argument #1 to '{}' (string expected, got {})",
        function, found
    ))
}
