//! 结构化交换形式
//!
//! 把 Room 及其嵌套的节点/墙体/开口转换为只含数据字段的
//! 普通结构值（及其 JSON 文本编码），用于跨进程/会话边界
//! 传递采集结果，并能校验着转换回活的 Room。
//!
//! 重建必须保留所有 id。墙体引用了节点表中不存在的节点 id 时
//! 大声失败（错误同时指出墙体 id 和缺失的节点 id），而不是
//! 静默跳过——数据损坏必须对调用方可见。

use crate::error::FileError;
use roomscan_core::math::Coord3;
use roomscan_core::model::{Node, NodeId, Opening, Room, RoomId, Wall, WallId};
use serde::{Deserialize, Serialize};

/// 节点的结构化形式
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    pub id: NodeId,
    pub position: Coord3,
}

/// 墙体的结构化形式；端点以节点 id 表示
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallData {
    pub id: WallId,
    pub start_node: NodeId,
    pub end_node: NodeId,
    pub thickness: f64,
    pub height: f64,
    #[serde(default)]
    pub openings: Vec<Opening>,
}

/// 房间的结构化形式
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomData {
    pub id: RoomId,
    pub name: String,
    pub nodes: Vec<NodeData>,
    pub walls: Vec<WallData>,
}

impl RoomData {
    /// 对房间做无损快照
    pub fn from_room(room: &Room) -> Self {
        Self {
            id: room.id,
            name: room.name.clone(),
            nodes: room
                .nodes()
                .iter()
                .map(|n| NodeData {
                    id: n.id,
                    position: n.position.into(),
                })
                .collect(),
            walls: room
                .walls()
                .iter()
                .map(|w| WallData {
                    id: w.id,
                    start_node: w.start,
                    end_node: w.end,
                    thickness: w.thickness,
                    height: w.height,
                    openings: w.openings.clone(),
                })
                .collect(),
        }
    }

    /// 校验着重建活的 Room
    ///
    /// 先重建全部节点（保留原 id），再针对重建后的节点表解析
    /// 每面墙；开口按原样保留，包括所属墙体 id。
    pub fn into_room(self) -> Result<Room, FileError> {
        let mut room = Room::with_id(self.id, self.name);

        for node in self.nodes {
            room.insert_node(Node::with_id(node.id, node.position.into()))?;
        }

        for wall in self.walls {
            let rebuilt = Wall {
                id: wall.id,
                start: wall.start_node,
                end: wall.end_node,
                thickness: wall.thickness,
                height: wall.height,
                openings: wall.openings,
            };
            let wall_id = rebuilt.id;
            room.insert_wall(rebuilt)
                .map_err(|source| FileError::UnresolvedWall {
                    wall: wall_id,
                    source,
                })?;
        }

        Ok(room)
    }

    /// 编码为 JSON 文本
    pub fn to_json(&self) -> Result<String, FileError> {
        Ok(serde_json::to_string(self)?)
    }

    /// 从 JSON 文本解码
    pub fn from_json(json: &str) -> Result<Self, FileError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomscan_core::math::Point3;
    use roomscan_core::model::OpeningKind;

    fn captured_room() -> Room {
        let mut room = Room::new("Living Room");
        room.add_node(Point3::new(0.0, 0.0, 0.0));
        room.add_node(Point3::new(4.0, 0.0, 0.0));
        room.add_node(Point3::new(4.0, 0.0, 4.0));
        room.add_node(Point3::new(0.0, 0.0, 4.0));
        room.close_loop();

        let wall_id = room.walls()[0].id;
        room.add_opening(wall_id, OpeningKind::Door, 2.0, 0.9, 2.1, 0.0)
            .unwrap();
        room
    }

    #[test]
    fn test_roundtrip_preserves_everything() {
        let original = captured_room();
        let rebuilt = RoomData::from_room(&original).into_room().unwrap();

        assert_eq!(rebuilt.id, original.id);
        assert_eq!(rebuilt.name, original.name);
        assert_eq!(rebuilt.node_count(), 4);
        assert_eq!(rebuilt.wall_count(), 4);

        for (a, b) in original.nodes().iter().zip(rebuilt.nodes()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.position, b.position);
        }
        for (a, b) in original.walls().iter().zip(rebuilt.walls()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.start, b.start);
            assert_eq!(a.end, b.end);
            assert_eq!(a.thickness, b.thickness);
            assert_eq!(a.height, b.height);
            assert_eq!(a.openings, b.openings);
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let original = captured_room();
        let json = RoomData::from_room(&original).to_json().unwrap();

        let rebuilt = RoomData::from_json(&json).unwrap().into_room().unwrap();
        assert_eq!(rebuilt.node_count(), original.node_count());
        assert_eq!(rebuilt.wall_count(), original.wall_count());
        assert_eq!(rebuilt.walls()[0].openings.len(), 1);
        assert_eq!(rebuilt.walls()[0].openings[0].kind, OpeningKind::Door);
    }

    #[test]
    fn test_json_shape() {
        let json = RoomData::from_room(&captured_room()).to_json().unwrap();

        // 交换形式的字段名是稳定契约
        assert!(json.contains("\"nodes\""));
        assert!(json.contains("\"walls\""));
        assert!(json.contains("\"start_node\""));
        assert!(json.contains("\"position\":{\"x\":"));
        assert!(json.contains("\"door\""));
    }

    #[test]
    fn test_missing_node_fails_loudly() {
        let mut data = RoomData::from_room(&captured_room());
        // 破坏第一面墙的起点引用
        data.walls[0].start_node = NodeId::new();
        let broken_wall = data.walls[0].id;

        let err = data.into_room().unwrap_err();
        match err {
            FileError::UnresolvedWall { wall, .. } => assert_eq!(wall, broken_wall),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_openings_preserved_verbatim() {
        let original = captured_room();
        let opening = original.walls()[0].openings[0].clone();

        let rebuilt = RoomData::from_room(&original).into_room().unwrap();
        let restored = &rebuilt.walls()[0].openings[0];

        assert_eq!(restored.id, opening.id);
        assert_eq!(restored.wall_id, opening.wall_id);
        assert_eq!(restored.distance_from_start, opening.distance_from_start);
        assert_eq!(restored.sill_height, opening.sill_height);
    }
}
