//! 平台抽象层
//!
//! 脚本文件的读取通过 `Filesystem` trait 完成，桥接层本身不直接访问磁盘。

use std::io;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Filesystem Abstraction
// ============================================================================

#[derive(Error, Debug)]
pub enum FsError {
    #[error("File not found")]
    NotFound,
    #[error("Permission denied")]
    PermissionDenied,
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<io::Error> for FsError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound,
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied,
            _ => FsError::IoError(err.to_string()),
        }
    }
}

pub trait Filesystem {
    /// 读取文件的全部字节
    fn read_sync(&self, path: &Path) -> Result<Vec<u8>, FsError>;
}

// ============================================================================
// Native Filesystem Implementation
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct NativeFilesystem;

impl Default for NativeFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for NativeFilesystem {
    fn read_sync(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        std::fs::read(path).map_err(FsError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.lua");
        std::fs::write(&path, "x = 1").unwrap();

        let fs = NativeFilesystem::new();
        assert_eq!(fs.read_sync(&path).unwrap(), b"x = 1".to_vec());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let fs = NativeFilesystem::new();
        let result = fs.read_sync(&dir.path().join("missing.lua"));
        assert!(matches!(result, Err(FsError::NotFound)));
    }

    #[test]
    fn test_reads_raw_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.lua");
        std::fs::write(&path, [b'-', b'-', 0xe9, 0xff]).unwrap();

        let fs = NativeFilesystem::new();
        assert_eq!(fs.read_sync(&path).unwrap(), vec![b'-', b'-', 0xe9, 0xff]);
    }

    #[test]
    fn test_io_error_kinds() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert!(matches!(FsError::from(denied), FsError::PermissionDenied));

        let other = io::Error::new(io::ErrorKind::InvalidData, "bad sector");
        assert!(matches!(FsError::from(other), FsError::IoError(_)));
    }
}
