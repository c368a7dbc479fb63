//! RoomScan 核心几何模型
//!
//! 提供房间轮廓采集的几何模型：节点/墙体/开口实体、
//! 由采集顺序隐式推导的墙体拓扑，以及有序采集事件通道。
//!
//! # 架构设计
//!
//! - `Room` 是唯一的聚合根：节点存放在按稳定 id 寻址的节点表中，
//!   墙体只持有节点 id，通过 Room 解析
//! - 采集阶段结束后模型只读，导出器是纯读取函数
//!
//! # 示例
//!
//! ```rust
//! use roomscan_core::prelude::*;
//!
//! let mut room = Room::new("Living Room");
//! room.add_node(Point3::new(0.0, 0.0, 0.0));
//! room.add_node(Point3::new(4.0, 0.0, 0.0));
//! room.add_node(Point3::new(4.0, 0.0, 4.0));
//! room.close_loop();
//!
//! assert_eq!(room.wall_count(), 3);
//! ```

pub mod capture;
pub mod error;
pub mod math;
pub mod model;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::capture::{run_capture, simulate_scan, CaptureEvent};
    pub use crate::error::ModelError;
    pub use crate::math::{Coord3, Point2, Point3, Vector2, Vector3, EPSILON};
    pub use crate::model::{
        Node, NodeId, Opening, OpeningId, OpeningInset, OpeningKind, Room, RoomId, Wall, WallId,
    };
}
