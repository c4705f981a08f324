//! 图层SVG头部改写
//!
//! 渲染器输出的 `width`/`height`/`viewBox` 与板尺寸无关，
//! 统一替换为整板范围，使所有图层与3D模型共用同一坐标系。

use crate::error::FileError;
use pcb3d_core::math::Bounds;
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

static SVG_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<svg([^>]*)width="[^"]*"[^>]*height="[^"]*"[^>]*viewBox="[^"]*"[^>]*>"#)
        .expect("valid regex")
});

/// 物理尺寸（厘米）
fn physical_size(mm: f64) -> String {
    format!("{:.6}cm", mm * 0.1)
}

/// viewBox 使用纳米整数
fn view_box(bounds: &Bounds) -> String {
    bounds
        .to_array()
        .iter()
        .map(|v| ((v * 1e6).round_ties_even() as i64).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 改写SVG头部，返回新内容；没有可识别的头部时返回 `None`
pub fn rewrite_header(content: &str, bounds: &Bounds) -> Option<String> {
    if !SVG_HEADER.is_match(content) {
        return None;
    }

    let width = physical_size(bounds.width);
    let height = physical_size(bounds.height);
    let view_box = view_box(bounds);

    let rewritten = SVG_HEADER.replace_all(content, |caps: &Captures| {
        format!(
            r#"<svg{}width="{}" height="{}" viewBox="{}">"#,
            &caps[1], width, height, view_box
        )
    });
    Some(rewritten.into_owned())
}

/// 就地改写SVG文件
pub fn rewrite_file(path: &Path, bounds: &Bounds) -> Result<(), FileError> {
    let content = std::fs::read_to_string(path)?;
    match rewrite_header(&content, bounds) {
        Some(rewritten) => std::fs::write(path, rewritten)?,
        None => tracing::warn!("No SVG header to rewrite in {}", path.display()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLOTTED: &str = r#"<?xml version="1.0" standalone="no"?>
<svg
  xmlns="http://www.w3.org/2000/svg" version="1.1"
  width="29.7002cm" height="21.0007cm" viewBox="0 0 297002 210007">
<title>SVG Picture created as board-F_Cu.svg</title>
</svg>
"#;

    #[test]
    fn test_rewrite_header() {
        let bounds = Bounds::new(-1.0, -1.0, 102.0, 52.5);
        let rewritten = rewrite_header(PLOTTED, &bounds).unwrap();

        assert!(rewritten.contains(
            r#"width="10.200000cm" height="5.250000cm" viewBox="-1000000 -1000000 102000000 52500000">"#
        ));
        assert!(rewritten.contains(r#"xmlns="http://www.w3.org/2000/svg" version="1.1""#));
        assert!(rewritten.contains("<title>SVG Picture created as board-F_Cu.svg</title>"));
        assert!(!rewritten.contains("29.7002cm"));
    }

    #[test]
    fn test_view_box_rounding() {
        let bounds = Bounds::new(-1.25, 0.0000004, 10.0000006, 3.0);
        assert_eq!(view_box(&bounds), "-1250000 0 10000001 3000000");
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(rewrite_header("<svg></svg>", &Bounds::new(0.0, 0.0, 1.0, 1.0)), None);
    }
}
