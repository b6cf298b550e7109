use std::cell::RefCell;
use std::rc::Rc;

/// 面向用户的诊断接口
///
/// 脚本的语法错误和运行时错误通过此接口报告，每次失败恰好调用一次。
pub trait DiagnosticSink {
    fn show_error(&self, message: &str, tag: &str);
}

/// 通过 tracing 输出诊断信息的默认实现
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn show_error(&self, message: &str, tag: &str) {
        tracing::error!(target: "lua", tag, "{}", message);
    }
}

/// 一条已报告的诊断
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub tag: String,
}

/// 记录所有诊断的实现，克隆后共享同一份记录
#[derive(Debug, Default, Clone)]
pub struct RecordingDiagnostics {
    entries: Rc<RefCell<Vec<Diagnostic>>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// 已记录诊断的快照
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    pub fn last(&self) -> Option<Diagnostic> {
        self.entries.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn show_error(&self, message: &str, tag: &str) {
        tracing::debug!(target: "lua", tag, "{}", message);
        self.entries.borrow_mut().push(Diagnostic {
            message: message.to_string(),
            tag: tag.to_string(),
        });
    }
}
