//! RoomScan 导出与序列化
//!
//! 支持：
//! - OBJ 网格导出（每面墙一个实心盒体）
//! - DXF 平面图导出（每面墙4条偏移轮廓线）
//! - 结构化交换形式（JSON，跨进程/会话边界）
//! - `.roomscan` 会话文件（MessagePack + Zstd）
//!
//! 导出器都是对只读房间快照的纯函数，互不依赖，
//! 可以安全地对同一不可变房间并发运行。

pub mod dxf;
pub mod error;
pub mod obj;
pub mod session;
pub mod transfer;

pub use dxf::{export_dxf, DxfWriter, WALL_LAYER};
pub use error::FileError;
pub use obj::{export_obj, ObjWriter};
pub use transfer::RoomData;
