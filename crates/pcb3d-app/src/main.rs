//! PCB3D 命令行工具
//!
//! - `pcb3d export`: 从板描述与预渲染资源生成 `.pcb3d` 归档
//! - `pcb3d inspect`: 列出归档内容

mod host;

use anyhow::Result;
use clap::{Parser, Subcommand};
use host::{BoardDescription, DirectoryHost};
use pcb3d_file::{collect_boards, Exporter, Pcb3dArchive, ScratchDir};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "pcb3d", about = "Export PCB designs to .pcb3d archives")]
struct Cli {
    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 生成归档
    Export {
        /// 板描述 JSON
        #[arg(long)]
        board: PathBuf,
        /// 预渲染资源目录
        #[arg(long)]
        assets: PathBuf,
        /// 输出文件
        #[arg(short, long)]
        output: PathBuf,
        /// 临时目录（默认位于系统临时目录）
        #[arg(long)]
        scratch: Option<PathBuf>,
    },
    /// 查看归档内容
    Inspect { archive: PathBuf },
}

fn export(board: PathBuf, assets: PathBuf, output: PathBuf, scratch: Option<PathBuf>) -> Result<()> {
    let description = BoardDescription::load(&board)?;
    let host = DirectoryHost::new(description, assets);

    let parsed = collect_boards(&host);

    let scratch = scratch.map(ScratchDir::new).unwrap_or_default();
    let summary = Exporter::new(scratch).export(&host, &parsed.boards, &output)?;

    info!(
        "Exported {} boards, {} components, {} layers to {}",
        summary.stats.boards,
        summary.stats.components,
        summary.stats.layers,
        summary.path.display()
    );
    Ok(())
}

fn inspect(path: PathBuf) -> Result<()> {
    let archive = Pcb3dArchive::open(&path)?;
    let bounds = archive.layer_bounds;

    println!("{}", path.display());
    println!(
        "  bounds: top={} left={} width={} height={}",
        bounds.top, bounds.left, bounds.width, bounds.height
    );
    println!("  components: {}", archive.components.len());
    let layers: Vec<&str> = archive.layers.iter().map(|l| l.name()).collect();
    println!("  layers: {}", layers.join(" "));
    for board in archive.boards.values() {
        println!(
            "  board {}: top={} left={} width={} height={}",
            board.name, board.bounds.top, board.bounds.left, board.bounds.width, board.bounds.height
        );
        for stacked in &board.stacked_boards {
            println!(
                "    stacked {} at ({}, {}, {})",
                stacked.name, stacked.offset.x, stacked.offset.y, stacked.offset.z
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing::subscriber::set_global_default(FmtSubscriber::builder().with_max_level(level).finish())?;

    match cli.command {
        Command::Export {
            board,
            assets,
            output,
            scratch,
        } => export(board, assets, output, scratch),
        Command::Inspect { archive } => inspect(archive),
    }
}
