//! 标注文字语法
//!
//! 所有板标注均以 `PCB3D_` 开头，第二级前缀区分类型：
//! - `PCB3D_TL_<name>`: 板的左上角
//! - `PCB3D_BR_<name>`: 板的右下角
//! - `PCB3D_STACK_<other>_ONTO_<target>_<z>`: 将 `other` 堆叠到 `target` 上方 `z` 毫米处

use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// 保留前缀
pub const PREFIX: &str = "PCB3D_";
pub const TOP_LEFT: &str = "PCB3D_TL_";
pub const BOTTOM_RIGHT: &str = "PCB3D_BR_";
pub const STACK: &str = "PCB3D_STACK_";

/// 堆叠标注中的关键字
pub const ONTO: &str = "ONTO";

/// 前面板（非板的堆叠元素）
pub const PANEL_FRONT: &str = "FPNL";

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").expect("valid regex"));

/// 将连续的非单词字符替换为单个下划线
pub fn sanitized(name: &str) -> String {
    NON_WORD.replace_all(name, "_").into_owned()
}

/// 标注分类结果（后缀为原始文字中前缀之后的部分）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker<'a> {
    TopLeft(&'a str),
    BottomRight(&'a str),
    Stack(&'a str),
    /// 有 `PCB3D_` 前缀但类型未知
    Unknown,
}

impl<'a> Marker<'a> {
    /// 分类标注文字，非板标注返回 `None`
    pub fn classify(text: &'a str) -> Option<Self> {
        if !text.starts_with(PREFIX) {
            return None;
        }

        let marker = if let Some(name) = text.strip_prefix(TOP_LEFT) {
            Marker::TopLeft(name)
        } else if let Some(name) = text.strip_prefix(BOTTOM_RIGHT) {
            Marker::BottomRight(name)
        } else if let Some(spec) = text.strip_prefix(STACK) {
            Marker::Stack(spec)
        } else {
            Marker::Unknown
        };
        Some(marker)
    }
}

/// 与左上角标注配对的右下角标注文字
pub fn bottom_right_for(name: &str) -> String {
    format!("{BOTTOM_RIGHT}{name}")
}

/// 堆叠标注解析错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarkerError {
    #[error("expected 4 fields separated by '_', found {0}")]
    FieldCount(usize),

    #[error("expected keyword ONTO, found {0:?}")]
    Keyword(String),

    #[error("invalid z offset: {0:?}")]
    ZOffset(String),
}

/// 解析后的堆叠标注（名称已规范化）
#[derive(Debug, Clone, PartialEq)]
pub struct StackMarker {
    pub other: String,
    pub target: String,
    pub z_offset: f64,
}

impl FromStr for StackMarker {
    type Err = MarkerError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = spec.split('_').collect();
        let [other, onto, target, z_offset] = fields.as_slice() else {
            return Err(MarkerError::FieldCount(fields.len()));
        };

        let z_offset = z_offset
            .trim()
            .parse::<f64>()
            .map_err(|_| MarkerError::ZOffset(z_offset.to_string()))?;

        if *onto != ONTO {
            return Err(MarkerError::Keyword(onto.to_string()));
        }

        Ok(Self {
            other: sanitized(other),
            target: sanitized(target),
            z_offset,
        })
    }
}
