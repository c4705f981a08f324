//! 数学基础类型
//!
//! 所有长度单位均为毫米。

use serde::{Deserialize, Serialize};

/// 2D点（毫米）
pub type Point2 = nalgebra::Point2<f64>;

/// 3D偏移（毫米）
pub type Offset3 = nalgebra::Vector3<f64>;

/// 矩形范围：(top, left, width, height)
///
/// 字段顺序即二进制记录中的顺序。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// 由左上角和右下角标注位置构造
    pub fn from_corners(top_left: Point2, bottom_right: Point2) -> Self {
        Self::new(
            top_left.x,
            top_left.y,
            bottom_right.x - top_left.x,
            bottom_right.y - top_left.y,
        )
    }

    /// 左上角位置
    pub fn origin(&self) -> Point2 {
        Point2::new(self.top, self.left)
    }

    /// 四边各向外扩展 `margin`
    pub fn expanded(&self, margin: f64) -> Self {
        Self::new(
            self.top - margin,
            self.left - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.top, self.left, self.width, self.height]
    }

    pub fn from_array(values: [f64; 4]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }
}

/// 主机返回的板边包围盒：(top, left, bottom, right)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl BoundingBox {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn to_bounds(&self) -> Bounds {
        Bounds::new(
            self.top,
            self.left,
            self.right - self.left,
            self.bottom - self.top,
        )
    }
}
