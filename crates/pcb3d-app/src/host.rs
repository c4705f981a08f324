//! 基于目录的主机实现
//!
//! 板描述（JSON）提供包围盒与标注，资源目录提供预先渲染好的文件：
//!
//! ```text
//! assets/
//!   pcb.wrl
//!   components/**/*.wrl
//!   F_Cu.svg, B_Cu.svg, ...
//! ```

use pcb3d_core::board::Annotation;
use pcb3d_core::math::BoundingBox;
use pcb3d_file::layout;
use pcb3d_file::{BoardHost, FileError, PcbLayer};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const EMPTY_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="0cm" height="0cm" viewBox="0 0 0 0">
</svg>
"#;

/// 板描述文件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardDescription {
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl BoardDescription {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

pub struct DirectoryHost {
    description: BoardDescription,
    assets: PathBuf,
}

impl DirectoryHost {
    pub fn new(description: BoardDescription, assets: impl Into<PathBuf>) -> Self {
        Self {
            description,
            assets: assets.into(),
        }
    }
}

impl BoardHost for DirectoryHost {
    fn annotations(&self) -> Vec<Annotation> {
        self.description.annotations.clone()
    }

    fn bounding_box(&self) -> BoundingBox {
        self.description.bounding_box
    }

    fn export_model(&self, model: &Path, components_dir: &Path) -> Result<(), FileError> {
        let source = self.assets.join(layout::PCB);
        if !source.is_file() {
            return Err(FileError::Render(format!(
                "board model not found: {}",
                source.display()
            )));
        }
        std::fs::copy(&source, model)?;

        let components = self.assets.join(layout::COMPONENTS);
        if !components.is_dir() {
            return Ok(());
        }
        for entry in WalkDir::new(&components).sort_by_file_name() {
            let entry = entry?;
            let is_model = entry
                .path()
                .extension()
                .is_some_and(|ext| ext == layout::MODEL_EXTENSION);
            if !entry.file_type().is_file() || !is_model {
                continue;
            }

            // 保留库子目录，同名文件由归档写入时去重
            let Ok(relative) = entry.path().strip_prefix(&components) else {
                continue;
            };
            let target = components_dir.join(relative);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), target)?;
        }
        Ok(())
    }

    fn plot_layer(&self, layer: PcbLayer, output_dir: &Path) -> Result<PathBuf, FileError> {
        let target = output_dir.join(layer.file_name());
        let source = self.assets.join(layer.file_name());
        if source.is_file() {
            std::fs::copy(&source, &target)?;
        } else {
            tracing::warn!("No artwork for layer {}, writing an empty image", layer);
            std::fs::write(&target, EMPTY_SVG)?;
        }
        Ok(target)
    }
}
