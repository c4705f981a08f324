//! 文件操作错误定义

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Missing archive entry: {0}")]
    MissingEntry(String),
}
