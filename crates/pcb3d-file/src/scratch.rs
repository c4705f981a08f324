//! 临时工作目录
//!
//! 每次导出开始时整体删除并重建，同一时间只能有一个导出使用。

use crate::error::FileError;
use std::path::{Path, PathBuf};

const DEFAULT_DIR_NAME: &str = "pcb3d_tmp";

#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 系统临时目录下的默认位置
    pub fn system_default() -> Self {
        Self::new(std::env::temp_dir().join(DEFAULT_DIR_NAME))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// 清空目录（不存在时创建）
    pub fn reset(&self) -> Result<(), FileError> {
        if self.root.exists() {
            std::fs::remove_dir_all(&self.root)?;
        }
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }
}

impl Default for ScratchDir {
    fn default() -> Self {
        Self::system_default()
    }
}
