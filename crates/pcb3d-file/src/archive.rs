//! `.pcb3d` 归档读写
//!
//! 基于 ZIP（每个条目单独 deflate 压缩）：
//! - 三个顶层目录 `components/`、`layers/`、`boards/` 总是存在
//! - 二进制记录格式见 [`crate::record`]

use crate::error::FileError;
use crate::layout::{self, PcbLayer};
use crate::record;
use pcb3d_core::board::{BoardDef, BoardDefs, StackedBoard};
use pcb3d_core::math::Bounds;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// 写入归档所需的输入
#[derive(Debug, Clone)]
pub struct ArchiveSources<'a> {
    /// 整板模型文件
    pub model: &'a Path,
    /// 元件模型目录（递归查找 `*.wrl`）
    pub components_dir: &'a Path,
    /// 图层SVG目录
    pub layers_dir: &'a Path,
    /// 整板范围（已含留白）
    pub layer_bounds: Bounds,
    pub boards: &'a BoardDefs,
}

/// 写入统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveStats {
    pub components: usize,
    pub layers: usize,
    pub boards: usize,
    pub stacked: usize,
}

fn file_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

/// 按文件名排序的元件模型
fn component_files(dir: &Path) -> Result<Vec<PathBuf>, FileError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let is_model = entry
            .path()
            .extension()
            .is_some_and(|ext| ext == layout::MODEL_EXTENSION);
        if entry.file_type().is_file() && is_model {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// 目录中存在的已包含图层
fn layer_files(dir: &Path) -> Vec<(PcbLayer, PathBuf)> {
    PcbLayer::ALL
        .into_iter()
        .map(|layer| (layer, dir.join(layer.file_name())))
        .filter(|(_, path)| path.is_file())
        .collect()
}

fn copy_file<W: Write + std::io::Seek>(
    writer: &mut ZipWriter<W>,
    source: &Path,
    entry: String,
) -> Result<(), FileError> {
    writer.start_file(entry, file_options())?;
    let mut reader = BufReader::new(File::open(source)?);
    std::io::copy(&mut reader, writer)?;
    Ok(())
}

fn write_record<W: Write + std::io::Seek>(
    writer: &mut ZipWriter<W>,
    entry: String,
    bytes: &[u8],
) -> Result<(), FileError> {
    writer.start_file(entry, file_options())?;
    writer.write_all(bytes)?;
    Ok(())
}

/// 写入归档
pub fn save(path: &Path, sources: &ArchiveSources<'_>) -> Result<ArchiveStats, FileError> {
    let file = File::create(path)?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let mut stats = ArchiveStats::default();
    // ZIP 不允许重名条目，重复的只写第一个
    let mut written: HashSet<String> = HashSet::new();

    for dir in [layout::COMPONENTS, layout::LAYERS, layout::BOARDS] {
        writer.add_directory(layout::dir_entry(dir), file_options())?;
    }

    copy_file(&mut writer, sources.model, layout::PCB.to_string())?;

    for component in component_files(sources.components_dir)? {
        let Some(name) = component.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let entry = layout::component_entry(name);
        if !written.insert(entry.clone()) {
            tracing::warn!("Skipping duplicate component model {}", component.display());
            continue;
        }
        copy_file(&mut writer, &component, entry)?;
        stats.components += 1;
    }

    for (layer, svg) in layer_files(sources.layers_dir) {
        copy_file(&mut writer, &svg, layout::layer_entry(layer))?;
        stats.layers += 1;
    }
    write_record(
        &mut writer,
        layout::layers_bounds_entry(),
        &record::encode_bounds(&sources.layer_bounds),
    )?;

    for board in sources.boards.values() {
        write_record(
            &mut writer,
            layout::board_bounds_entry(&board.name),
            &record::encode_bounds(&board.bounds),
        )?;

        for stacked in &board.stacked_boards {
            let entry = layout::stacked_entry(&board.name, &stacked.name);
            if !written.insert(entry.clone()) {
                tracing::warn!("Skipping duplicate stacking of {} onto {}", stacked.name, board.name);
                continue;
            }
            write_record(&mut writer, entry, &record::encode_offset(&stacked.offset))?;
            stats.stacked += 1;
        }
        stats.boards += 1;
    }

    let mut inner = writer.finish()?;
    inner.flush()?;

    tracing::info!(
        "Saved {} components, {} layers, {} boards to {}",
        stats.components,
        stats.layers,
        stats.boards,
        path.display()
    );

    Ok(stats)
}

/// 读取后的归档内容
#[derive(Debug, Clone, PartialEq)]
pub struct Pcb3dArchive {
    pub layer_bounds: Bounds,
    /// 元件模型文件名
    pub components: Vec<String>,
    pub layers: Vec<PcbLayer>,
    pub boards: BoardDefs,
}

fn read_entry<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Vec<u8>, FileError> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(FileError::MissingEntry(name.to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    Ok(bytes)
}

#[derive(Default)]
struct PartialBoard {
    bounds: Option<Bounds>,
    stacked_boards: Vec<StackedBoard>,
}

/// 读取归档
pub fn load(path: &Path) -> Result<Pcb3dArchive, FileError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    for required in [
        layout::dir_entry(layout::COMPONENTS),
        layout::dir_entry(layout::LAYERS),
        layout::dir_entry(layout::BOARDS),
        layout::PCB.to_string(),
    ] {
        if !names.contains(&required) {
            return Err(FileError::MissingEntry(required));
        }
    }

    let layer_bounds = record::decode_bounds(&read_entry(&mut archive, &layout::layers_bounds_entry())?)?;

    let mut components = Vec::new();
    let mut layers = Vec::new();
    let mut partial: BTreeMap<String, PartialBoard> = BTreeMap::new();

    // 按条目顺序遍历，保证堆叠列表顺序与写入一致
    for index in 0..archive.len() {
        let name = archive.by_index(index)?.name().to_string();
        let Some((dir, rest)) = name.split_once('/') else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }

        match dir {
            layout::COMPONENTS => components.push(rest.to_string()),
            layout::LAYERS => {
                if let Some(layer) = rest.strip_suffix(".svg").and_then(PcbLayer::from_name) {
                    layers.push(layer);
                }
            }
            layout::BOARDS => {
                let Some((board, file)) = rest.split_once('/') else {
                    continue;
                };
                if file == layout::BOUNDS {
                    let bounds = record::decode_bounds(&read_entry(&mut archive, &name)?)?;
                    partial.entry(board.to_string()).or_default().bounds = Some(bounds);
                } else if let Some(other) = file.strip_prefix(layout::STACKED) {
                    let offset = record::decode_offset(&read_entry(&mut archive, &name)?)?;
                    partial
                        .entry(board.to_string())
                        .or_default()
                        .stacked_boards
                        .push(StackedBoard::new(other, offset));
                }
            }
            _ => {}
        }
    }

    let mut boards = BoardDefs::new();
    for (name, board) in partial {
        let bounds = board
            .bounds
            .ok_or_else(|| FileError::MissingEntry(layout::board_bounds_entry(&name)))?;
        let mut def = BoardDef::new(name.clone(), bounds);
        def.stacked_boards = board.stacked_boards;
        boards.insert(name, def);
    }

    tracing::info!(
        "Loaded {} components, {} layers, {} boards from {}",
        components.len(),
        layers.len(),
        boards.len(),
        path.display()
    );

    Ok(Pcb3dArchive {
        layer_bounds,
        components,
        layers,
        boards,
    })
}

impl Pcb3dArchive {
    pub fn open(path: &Path) -> Result<Self, FileError> {
        load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcb3d_core::math::Offset3;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        model: PathBuf,
        components: PathBuf,
        layers: PathBuf,
        output: PathBuf,
    }

    fn fixture() -> Fixture {
        let temp = tempfile::tempdir().unwrap();
        let model = temp.path().join("pcb.wrl");
        let components = temp.path().join("components");
        let layers = temp.path().join("layers");
        std::fs::write(&model, "#VRML V2.0 utf8\n").unwrap();
        std::fs::create_dir(&components).unwrap();
        std::fs::create_dir(&layers).unwrap();
        let output = temp.path().join("board.pcb3d");
        Fixture {
            model,
            components,
            layers,
            output,
            _temp: temp,
        }
    }

    fn sources<'a>(fixture: &'a Fixture, boards: &'a BoardDefs) -> ArchiveSources<'a> {
        ArchiveSources {
            model: &fixture.model,
            components_dir: &fixture.components,
            layers_dir: &fixture.layers,
            layer_bounds: Bounds::new(-1.0, -1.0, 102.0, 52.0),
            boards,
        }
    }

    fn entry_names(path: &Path) -> Vec<String> {
        let archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        archive.file_names().map(str::to_string).collect()
    }

    #[test]
    fn test_empty_archive_has_directories() {
        let fixture = fixture();
        let boards = BoardDefs::new();
        let stats = save(&fixture.output, &sources(&fixture, &boards)).unwrap();
        assert_eq!(stats, ArchiveStats::default());

        let names = entry_names(&fixture.output);
        for dir in ["components/", "layers/", "boards/", "pcb.wrl", "layers/bounds"] {
            assert!(names.iter().any(|n| n == dir), "missing {dir}");
        }

        let loaded = load(&fixture.output).unwrap();
        assert!(loaded.boards.is_empty());
        assert!(loaded.components.is_empty());
        assert!(loaded.layers.is_empty());
    }

    #[test]
    fn test_roundtrip_boards() {
        let fixture = fixture();
        let mut main = BoardDef::new("Main", Bounds::new(0.0, 0.0, 100.0, 50.0));
        main.stacked_boards
            .push(StackedBoard::new("Daughter", Offset3::new(10.0, 10.0, 5.0)));
        main.stacked_boards
            .push(StackedBoard::new("FPNL", Offset3::new(-2.5, 0.25, -12.75)));
        let daughter = BoardDef::new("Daughter", Bounds::new(120.0, 0.0, 40.0, 30.0));

        let mut boards = BoardDefs::new();
        boards.insert(main.name.clone(), main);
        boards.insert(daughter.name.clone(), daughter);

        let stats = save(&fixture.output, &sources(&fixture, &boards)).unwrap();
        assert_eq!(stats.boards, 2);
        assert_eq!(stats.stacked, 2);

        let loaded = load(&fixture.output).unwrap();
        assert_eq!(loaded.boards, boards);
        assert_eq!(loaded.layer_bounds, Bounds::new(-1.0, -1.0, 102.0, 52.0));
    }

    #[test]
    fn test_stacked_record_bytes() {
        let fixture = fixture();
        let mut main = BoardDef::new("Main", Bounds::new(0.0, 0.0, 100.0, 50.0));
        main.stacked_boards
            .push(StackedBoard::new("Daughter", Offset3::new(10.0, 10.0, 5.0)));
        let mut boards = BoardDefs::new();
        boards.insert(main.name.clone(), main);
        save(&fixture.output, &sources(&fixture, &boards)).unwrap();

        let mut archive = ZipArchive::new(File::open(&fixture.output).unwrap()).unwrap();
        let bytes = read_entry(&mut archive, "boards/Main/stacked_Daughter").unwrap();
        assert_eq!(
            bytes,
            [10.0f32, 10.0, 5.0]
                .iter()
                .flat_map(|v| v.to_be_bytes())
                .collect::<Vec<u8>>()
        );
        let entry = archive.by_name("boards/Main/bounds").unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
    }

    #[test]
    fn test_components_and_layers() {
        let fixture = fixture();
        let nested = fixture.components.join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(fixture.components.join("R1.wrl"), "r1").unwrap();
        std::fs::write(nested.join("C1.wrl"), "c1").unwrap();
        std::fs::write(fixture.components.join("notes.txt"), "skip").unwrap();

        std::fs::write(fixture.layers.join("F_Cu.svg"), "<svg/>").unwrap();
        std::fs::write(fixture.layers.join("B_Mask.svg"), "<svg/>").unwrap();
        std::fs::write(fixture.layers.join("Edge_Cuts.svg"), "<svg/>").unwrap();

        let boards = BoardDefs::new();
        let stats = save(&fixture.output, &sources(&fixture, &boards)).unwrap();
        assert_eq!(stats.components, 2);
        assert_eq!(stats.layers, 2);

        let names = entry_names(&fixture.output);
        assert!(names.contains(&"components/C1.wrl".to_string()));
        assert!(!names.iter().any(|n| n.contains("Edge_Cuts")));

        let loaded = load(&fixture.output).unwrap();
        let mut components = loaded.components.clone();
        components.sort();
        assert_eq!(components, vec!["C1.wrl", "R1.wrl"]);
        assert_eq!(loaded.layers, vec![PcbLayer::FrontCopper, PcbLayer::BackMask]);
    }

    #[test]
    fn test_same_component_name_in_two_libraries() {
        let fixture = fixture();
        let lib_a = fixture.components.join("lib_a");
        let lib_b = fixture.components.join("lib_b");
        std::fs::create_dir(&lib_a).unwrap();
        std::fs::create_dir(&lib_b).unwrap();
        std::fs::write(lib_a.join("R_0603.wrl"), "from lib_a").unwrap();
        std::fs::write(lib_b.join("R_0603.wrl"), "from lib_b").unwrap();

        let boards = BoardDefs::new();
        let stats = save(&fixture.output, &sources(&fixture, &boards)).unwrap();
        assert_eq!(stats.components, 1);

        let mut archive = ZipArchive::new(File::open(&fixture.output).unwrap()).unwrap();
        let bytes = read_entry(&mut archive, "components/R_0603.wrl").unwrap();
        assert_eq!(bytes, b"from lib_a");
    }

    #[test]
    fn test_repeated_stacking_written_once() {
        let fixture = fixture();
        let mut main = BoardDef::new("Main", Bounds::new(0.0, 0.0, 100.0, 50.0));
        main.stacked_boards
            .push(StackedBoard::new("FPNL", Offset3::new(10.0, 10.0, 5.0)));
        main.stacked_boards
            .push(StackedBoard::new("FPNL", Offset3::new(20.0, 20.0, -5.0)));
        let mut boards = BoardDefs::new();
        boards.insert(main.name.clone(), main);

        let stats = save(&fixture.output, &sources(&fixture, &boards)).unwrap();
        assert_eq!(stats.stacked, 1);

        let loaded = load(&fixture.output).unwrap();
        assert_eq!(
            loaded.boards["Main"].stacked_boards,
            vec![StackedBoard::new("FPNL", Offset3::new(10.0, 10.0, 5.0))]
        );
    }

    #[test]
    fn test_load_rejects_non_pcb3d_zip() {
        let fixture = fixture();
        let file = File::create(&fixture.output).unwrap();
        let mut writer = ZipWriter::new(file);
        writer.start_file("readme.txt", file_options()).unwrap();
        writer.write_all(b"hello").unwrap();
        writer.finish().unwrap();

        assert!(matches!(
            load(&fixture.output),
            Err(FileError::MissingEntry(_))
        ));
    }
}
