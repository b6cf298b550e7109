//! 致命错误桥接
//!
//! 原生函数中的 Rust panic 会被 mlua 在宿主一侧恢复抛出；这里在每次进入解释器时
//! 用 `catch_unwind` 截获它并转换为 `BridgeError`。内存不足和安全模式拒绝
//! 属于可恢复错误，走诊断报告路径。捕获状态只存在于单次调用的栈帧中。

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::core::{BridgeError, BridgeResult};

/// 在 panic 保护下执行一次解释器调用
pub(crate) fn guard<T>(f: impl FnOnce() -> BridgeResult<T>) -> BridgeResult<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(target: "lua", "Captured Lua panic: {}", message);
            Err(BridgeError::Panic(message))
        }
    }
}

/// 提取 panic 负载中的文本
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// 判断 mlua 错误是否意味着解释器状态不可信
///
/// 只有已恢复过的 panic 再次被触发时才算；其余错误都按普通加载/运行错误报告。
pub(crate) fn is_fatal(err: &mlua::Error) -> bool {
    match err {
        mlua::Error::PreviouslyResumedPanic => true,
        mlua::Error::CallbackError { cause, .. } => is_fatal(cause),
        mlua::Error::WithContext { cause, .. } => is_fatal(cause),
        _ => false,
    }
}

/// 将致命的 mlua 错误升级为 `BridgeError::Fatal`
pub(crate) fn escalate(err: mlua::Error) -> BridgeError {
    tracing::error!(target: "lua", "Fatal Lua error: {}", err);
    BridgeError::Fatal(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_guard_passes_through() {
        let result = guard(|| Ok(7));
        assert_eq!(result.unwrap(), 7);
    }

    #[test]
    fn test_guard_captures_panic() {
        let result: BridgeResult<()> = guard(|| panic!("stack overflow in bytecode"));
        match result {
            Err(BridgeError::Panic(message)) => assert_eq!(message, "stack overflow in bytecode"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_guard_captures_formatted_panic() {
        let code = 3;
        let result: BridgeResult<()> = guard(|| panic!("bad opcode {}", code));
        assert!(matches!(result, Err(BridgeError::Panic(ref m)) if m == "bad opcode 3"));
    }

    #[test]
    fn test_guard_is_not_left_engaged() {
        let _ = guard::<()>(|| panic!("first"));
        assert_eq!(guard(|| Ok("second")).unwrap(), "second");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(is_fatal(&mlua::Error::PreviouslyResumedPanic));
        assert!(!is_fatal(&mlua::Error::RuntimeError("oops".into())));
        assert!(!is_fatal(&mlua::Error::MemoryError("out of memory".into())));
        assert!(!is_fatal(&mlua::Error::SafetyError("binary chunks".into())));

        let wrapped = mlua::Error::CallbackError {
            traceback: String::new(),
            cause: Arc::new(mlua::Error::PreviouslyResumedPanic),
        };
        assert!(is_fatal(&wrapped));

        let recoverable = mlua::Error::CallbackError {
            traceback: String::new(),
            cause: Arc::new(mlua::Error::MemoryError("out of memory".into())),
        };
        assert!(!is_fatal(&recoverable));
    }
}
