//! RoomScan 演示程序
//!
//! 跑一次完整的采集→导出流程：模拟扫描器按时间顺序投递
//! 4m × 4m 方形房间的角点，闭合轮廓后在前两面墙上各附加
//! 一个门/窗开口，最后把模型导出为 OBJ 和 DXF 并保存会话文件。
//!
//! 用法：`roomscan [输出目录]`，默认当前目录。

use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use roomscan_core::capture::{run_capture, simulate_scan};
use roomscan_core::model::OpeningKind;
use roomscan_file::{export_dxf, export_obj, session};

/// 模拟扫描中角点事件的间隔
const SCAN_INTERVAL: Duration = Duration::from_millis(200);

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)?;

    info!("Starting simulated room scan");
    let events = simulate_scan(SCAN_INTERVAL);
    let mut room = run_capture("Living Room", events).await;

    // 演示开口：第一面墙开门，第二面墙开窗
    if let Some(wall) = room.walls().first().map(|w| w.id) {
        room.add_opening(wall, OpeningKind::Door, 2.0, 0.9, 2.1, 0.0)?;
    }
    if let Some(wall) = room.walls().get(1).map(|w| w.id) {
        room.add_opening(wall, OpeningKind::Window, 2.0, 1.2, 1.2, 1.0)?;
    }

    info!(
        "Room \"{}\": {} nodes, {} walls, wall surface ~{:.2} m2",
        room.name,
        room.node_count(),
        room.wall_count(),
        room.wall_surface_area()
    );

    let stem = room.name.replace(' ', "_");

    let obj_path = out_dir.join(format!("{stem}.obj"));
    std::fs::write(&obj_path, export_obj(&room))?;
    info!("Exported mesh to {}", obj_path.display());

    let dxf_path = out_dir.join(format!("{stem}.dxf"));
    std::fs::write(&dxf_path, export_dxf(&room))?;
    info!("Exported plan to {}", dxf_path.display());

    let session_path = out_dir.join(format!("{stem}.roomscan"));
    session::save(&room, &session_path)?;

    Ok(())
}
