//! 导出流程
//!
//! 单次导出是一个线性过程：
//! 清空临时目录 → 导出模型 → 渲染图层并改写SVG头部 → 写入归档。

use crate::archive::{self, ArchiveSources, ArchiveStats};
use crate::error::FileError;
use crate::host::BoardHost;
use crate::layout::{self, PcbLayer};
use crate::scratch::ScratchDir;
use crate::svg;
use pcb3d_core::board::BoardDefs;
use pcb3d_core::math::Bounds;
use pcb3d_core::parser::{AnnotationParser, ParsedBoards};
use std::path::{Path, PathBuf};

/// 从主机标注解析板定义，无法解析的标注记录为警告
pub fn collect_boards<H: BoardHost + ?Sized>(host: &H) -> ParsedBoards {
    let parsed = AnnotationParser::parse(&host.annotations());
    if !parsed.ignored.is_empty() {
        tracing::warn!(
            "Ignored {} board annotation(s): {}",
            parsed.ignored.len(),
            parsed.ignored.join(", ")
        );
    }
    parsed
}

/// 导出结果
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub path: PathBuf,
    /// 整板范围（已含留白）
    pub layer_bounds: Bounds,
    pub stats: ArchiveStats,
}

#[derive(Debug, Clone, Default)]
pub struct Exporter {
    scratch: ScratchDir,
}

impl Exporter {
    pub fn new(scratch: ScratchDir) -> Self {
        Self { scratch }
    }

    pub fn scratch(&self) -> &ScratchDir {
        &self.scratch
    }

    /// 导出 `.pcb3d` 归档
    ///
    /// 失败时不清理已写出的部分文件。
    pub fn export<H: BoardHost + ?Sized>(
        &self,
        host: &H,
        boards: &BoardDefs,
        output: &Path,
    ) -> Result<ExportSummary, FileError> {
        self.scratch.reset()?;

        let model = self.scratch.path(layout::PCB);
        let components_dir = self.scratch.path(layout::COMPONENTS);
        std::fs::create_dir_all(&components_dir)?;
        host.export_model(&model, &components_dir)?;
        if !model.is_file() {
            return Err(FileError::Render(format!(
                "board model was not written to {}",
                model.display()
            )));
        }

        let layer_bounds = host.bounding_box().to_bounds().expanded(layout::SVG_MARGIN);
        let layers_dir = self.scratch.path(layout::LAYERS);
        std::fs::create_dir_all(&layers_dir)?;
        for layer in PcbLayer::ALL {
            self.plot_layer(host, layer, &layers_dir, &layer_bounds)?;
        }

        let stats = archive::save(
            output,
            &ArchiveSources {
                model: &model,
                components_dir: &components_dir,
                layers_dir: &layers_dir,
                layer_bounds,
                boards,
            },
        )?;

        Ok(ExportSummary {
            path: output.to_path_buf(),
            layer_bounds,
            stats,
        })
    }

    fn plot_layer<H: BoardHost + ?Sized>(
        &self,
        host: &H,
        layer: PcbLayer,
        layers_dir: &Path,
        bounds: &Bounds,
    ) -> Result<(), FileError> {
        let plotted = host.plot_layer(layer, layers_dir)?;
        let target = layers_dir.join(layer.file_name());
        if plotted != target {
            std::fs::rename(&plotted, &target)?;
        }
        svg::rewrite_file(&target, bounds)?;
        tracing::debug!("Plotted layer {} to {}", layer, target.display());
        Ok(())
    }
}
