//! 外部协作者服务
//!
//! - `diagnostics` - 面向用户的脚本错误报告

pub mod diagnostics;

pub use diagnostics::{Diagnostic, DiagnosticSink, RecordingDiagnostics, TracingDiagnostics};
