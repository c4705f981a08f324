//! PCB3D 文件格式处理
//!
//! 支持：
//! - `.pcb3d` 归档写入（ZIP + 大端 f32 二进制记录）
//! - `.pcb3d` 归档读取
//! - 从主机（PCB设计工具）导出的完整流程

pub mod archive;
pub mod error;
pub mod export;
pub mod host;
pub mod layout;
pub mod record;
pub mod scratch;
pub mod svg;

pub use archive::{ArchiveSources, ArchiveStats, Pcb3dArchive};
pub use error::FileError;
pub use export::{collect_boards, ExportSummary, Exporter};
pub use host::BoardHost;
pub use layout::PcbLayer;
pub use scratch::ScratchDir;
