//! `.pcb3d` 归档目录结构
//!
//! ```text
//! pcb.wrl
//! components/<component>.wrl
//! layers/<LAYER>.svg
//! layers/bounds
//! boards/<name>/bounds
//! boards/<name>/stacked_<other>
//! ```

use std::fmt;

/// 整板模型
pub const PCB: &str = "pcb.wrl";
/// 元件模型扩展名
pub const MODEL_EXTENSION: &str = "wrl";
pub const COMPONENTS: &str = "components";
pub const LAYERS: &str = "layers";
pub const LAYERS_BOUNDS: &str = "bounds";
pub const BOARDS: &str = "boards";
pub const BOUNDS: &str = "bounds";
pub const STACKED: &str = "stacked_";

/// 图层SVG四周的留白（毫米）
pub const SVG_MARGIN: f64 = 1.0;

/// 目录条目名称（带结尾斜杠）
pub fn dir_entry(dir: &str) -> String {
    format!("{dir}/")
}

pub fn component_entry(file_name: &str) -> String {
    format!("{COMPONENTS}/{file_name}")
}

pub fn layer_entry(layer: PcbLayer) -> String {
    format!("{LAYERS}/{}", layer.file_name())
}

pub fn layers_bounds_entry() -> String {
    format!("{LAYERS}/{LAYERS_BOUNDS}")
}

pub fn board_bounds_entry(board: &str) -> String {
    format!("{BOARDS}/{board}/{BOUNDS}")
}

pub fn stacked_entry(board: &str, other: &str) -> String {
    format!("{BOARDS}/{board}/{STACKED}{other}")
}

/// 归档中包含的图层
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PcbLayer {
    FrontCopper,
    BackCopper,
    FrontPaste,
    BackPaste,
    FrontSilkscreen,
    BackSilkscreen,
    FrontMask,
    BackMask,
}

impl PcbLayer {
    pub const ALL: [PcbLayer; 8] = [
        PcbLayer::FrontCopper,
        PcbLayer::BackCopper,
        PcbLayer::FrontPaste,
        PcbLayer::BackPaste,
        PcbLayer::FrontSilkscreen,
        PcbLayer::BackSilkscreen,
        PcbLayer::FrontMask,
        PcbLayer::BackMask,
    ];

    /// 图层标识（与设计工具中的名称一致）
    pub fn name(&self) -> &'static str {
        match self {
            PcbLayer::FrontCopper => "F_Cu",
            PcbLayer::BackCopper => "B_Cu",
            PcbLayer::FrontPaste => "F_Paste",
            PcbLayer::BackPaste => "B_Paste",
            PcbLayer::FrontSilkscreen => "F_SilkS",
            PcbLayer::BackSilkscreen => "B_SilkS",
            PcbLayer::FrontMask => "F_Mask",
            PcbLayer::BackMask => "B_Mask",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.name() == name)
    }

    pub fn file_name(&self) -> String {
        format!("{}.svg", self.name())
    }
}

impl fmt::Display for PcbLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_names() {
        assert_eq!(dir_entry(COMPONENTS), "components/");
        assert_eq!(layer_entry(PcbLayer::FrontSilkscreen), "layers/F_SilkS.svg");
        assert_eq!(layers_bounds_entry(), "layers/bounds");
        assert_eq!(board_bounds_entry("Main"), "boards/Main/bounds");
        assert_eq!(stacked_entry("Main", "FPNL"), "boards/Main/stacked_FPNL");
    }

    #[test]
    fn test_layer_names() {
        for layer in PcbLayer::ALL {
            assert_eq!(PcbLayer::from_name(layer.name()), Some(layer));
        }
        assert_eq!(PcbLayer::from_name("Edge_Cuts"), None);
    }
}
