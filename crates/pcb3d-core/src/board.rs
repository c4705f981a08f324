//! 板定义与堆叠关系

use crate::math::{Bounds, Offset3, Point2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 按名称索引的板定义（名称已规范化）
pub type BoardDefs = BTreeMap<String, BoardDef>;

/// 用户在板上放置的文字标注
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub position: Point2,
}

impl Annotation {
    pub fn new(text: impl Into<String>, position: Point2) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }
}

/// 堆叠在目标板上方的另一块板（或面板元素）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBoard {
    /// 被堆叠对象的名称
    pub name: String,
    /// 相对目标板左上角的偏移 (dx, dy, z)
    pub offset: Offset3,
}

impl StackedBoard {
    pub fn new(name: impl Into<String>, offset: Offset3) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }
}

/// 拼版中的一块逻辑板
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardDef {
    pub name: String,
    pub bounds: Bounds,
    #[serde(default)]
    pub stacked_boards: Vec<StackedBoard>,
}

impl BoardDef {
    pub fn new(name: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            name: name.into(),
            bounds,
            stacked_boards: Vec::new(),
        }
    }

    /// 计算某个位置相对本板左上角的偏移
    pub fn local_offset(&self, position: Point2, z: f64) -> Offset3 {
        let delta = position - self.bounds.origin();
        Offset3::new(delta.x, delta.y, z)
    }
}
