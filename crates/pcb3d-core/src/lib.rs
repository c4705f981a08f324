//! PCB3D 核心模型
//!
//! 从PCB设计中的文字标注恢复多板拼版与Z向堆叠信息。
//!
//! # 架构设计
//!
//! - `Annotation`: 原始标注（文字 + 位置）
//! - `Marker`: 标注文字的语法分类（左上角 / 右下角 / 堆叠）
//! - `AnnotationParser`: 两遍匹配，生成 `BoardDef` 映射与被忽略的标注列表
//!
//! # 示例
//!
//! ```rust
//! use pcb3d_core::prelude::*;
//!
//! let annotations = vec![
//!     Annotation::new("PCB3D_TL_Main", Point2::new(0.0, 0.0)),
//!     Annotation::new("PCB3D_BR_Main", Point2::new(100.0, 50.0)),
//! ];
//! let parsed = AnnotationParser::parse(&annotations);
//! assert_eq!(parsed.boards["Main"].bounds.width, 100.0);
//! ```

pub mod board;
pub mod marker;
pub mod math;
pub mod parser;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::board::{Annotation, BoardDef, BoardDefs, StackedBoard};
    pub use crate::marker::{sanitized, Marker, MarkerError, StackMarker, PANEL_FRONT};
    pub use crate::math::{BoundingBox, Bounds, Offset3, Point2};
    pub use crate::parser::{AnnotationParser, ParsedBoards};
}
