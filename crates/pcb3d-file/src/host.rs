//! 主机接口
//!
//! 网格导出与图层渲染由PCB设计工具完成，这里只定义调用方式。

use crate::error::FileError;
use crate::layout::PcbLayer;
use pcb3d_core::board::Annotation;
use pcb3d_core::math::BoundingBox;
use std::path::{Path, PathBuf};

pub trait BoardHost {
    /// 板上所有文字标注
    fn annotations(&self) -> Vec<Annotation>;

    /// 板边包围盒（毫米）
    fn bounding_box(&self) -> BoundingBox;

    /// 导出整板模型到 `model`，元件模型写入 `components_dir`
    fn export_model(&self, model: &Path, components_dir: &Path) -> Result<(), FileError>;

    /// 将图层渲染为SVG，返回生成的文件路径
    fn plot_layer(&self, layer: PcbLayer, output_dir: &Path) -> Result<PathBuf, FileError>;
}
