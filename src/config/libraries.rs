/// 标准库安装配置

use mlua::StdLib;
use serde::{Deserialize, Serialize};

use crate::impl_default;

/// 新解释器实例需要安装的Lua标准库
///
/// 基础库 (`_G`) 总是安装，不在此处配置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// 数学库 (`math`)
    #[serde(default = "enabled")]
    pub math: bool,

    /// 字符串库 (`string`)
    #[serde(default = "enabled")]
    pub string: bool,

    /// 表操作库 (`table`)
    #[serde(default)]
    pub table: bool,

    /// UTF-8 库 (`utf8`)
    #[serde(default)]
    pub utf8: bool,
}

fn enabled() -> bool {
    true
}

impl_default!(LibraryConfig {
    math: true,
    string: true,
    table: false,
    utf8: false,
});

impl LibraryConfig {
    /// 转换为 mlua 的标准库标志
    pub fn std_libs(&self) -> StdLib {
        let mut libs = StdLib::NONE;
        if self.math {
            libs |= StdLib::MATH;
        }
        if self.string {
            libs |= StdLib::STRING;
        }
        if self.table {
            libs |= StdLib::TABLE;
        }
        if self.utf8 {
            libs |= StdLib::UTF8;
        }
        libs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_libs() {
        let libs = LibraryConfig::default().std_libs();
        assert!(libs.contains(StdLib::MATH));
        assert!(libs.contains(StdLib::STRING));
        assert!(!libs.contains(StdLib::TABLE));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: LibraryConfig = toml::from_str("table = true").unwrap();
        assert!(config.math);
        assert!(config.string);
        assert!(config.table);
        assert!(!config.utf8);
    }
}
