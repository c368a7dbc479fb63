//! 房间几何模型
//!
//! 实体定义：
//! - 节点 (Node) - 采集到的楼面轮廓点
//! - 墙体 (Wall) - 相邻两节点之间的线段，带厚度/高度/开口
//! - 开口 (Opening) - 门或窗
//! - 房间 (Room) - 聚合根，节点按采集顺序、墙体按创建顺序存储
//!
//! 墙体拓扑由采集顺序隐式推导：外部采集者只追加点，
//! 模型自动把相邻点连成墙。仅支持顺序折线，不支持分叉。
//!
//! 节点以稳定 id 存放在 Room 的节点表中，墙体只持有 id，
//! 通过 Room 解析，避免所有权纠缠和悬空引用。

use crate::error::ModelError;
use crate::math::{planar_distance, Point2, Point3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// 默认墙体厚度（米）
pub const DEFAULT_WALL_THICKNESS: f64 = 0.15;

/// 默认墙体高度（米）
pub const DEFAULT_WALL_HEIGHT: f64 = 2.8;

/// 节点标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 墙体标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallId(Uuid);

impl WallId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 开口标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpeningId(Uuid);

impl OpeningId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OpeningId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OpeningId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 房间标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(Uuid);

impl RoomId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 开口类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

/// 门窗开口
///
/// `wall_id` 是指回所属墙体的普通 id 字段，不是活引用，
/// 保证开口可以直接序列化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub id: OpeningId,
    pub kind: OpeningKind,
    pub wall_id: WallId,
    /// 距墙体起点的偏移（米）
    pub distance_from_start: f64,
    pub width: f64,
    pub height: f64,
    /// 下沿距地面高度；门约定为 0
    pub sill_height: f64,
}

/// 节点：采集到的三维楼面轮廓点
///
/// 位置创建后不可变；当前范围内节点不会被删除。
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: Point3,
}

impl Node {
    pub fn new(position: Point3) -> Self {
        Self {
            id: NodeId::new(),
            position,
        }
    }

    /// 以给定 id 重建节点（用于反序列化路径）
    pub fn with_id(id: NodeId, position: Point3) -> Self {
        Self { id, position }
    }
}

/// 墙体
///
/// 端点以 id 引用 Room 节点表中的节点；同一节点可以同时是
/// 前后两面墙的端点。
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    pub id: WallId,
    pub start: NodeId,
    pub end: NodeId,
    /// 厚度（米），> 0
    pub thickness: f64,
    /// 高度（米），> 0
    pub height: f64,
    /// 开口，按附加顺序
    pub openings: Vec<Opening>,
}

impl Wall {
    pub fn new(start: NodeId, end: NodeId) -> Self {
        Self::with_dimensions(start, end, DEFAULT_WALL_THICKNESS, DEFAULT_WALL_HEIGHT)
    }

    pub fn with_dimensions(start: NodeId, end: NodeId, thickness: f64, height: f64) -> Self {
        Self {
            id: WallId::new(),
            start,
            end,
            thickness,
            height,
            openings: Vec::new(),
        }
    }
}

/// 开口在墙体局部坐标系中的放置信息
///
/// 供查看器使用：along 是沿墙方向相对墙体中点的偏移，
/// lift 是竖直方向相对墙体中心的偏移，depth 略大于墙厚
/// 以避免共面闪烁。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningInset {
    pub along: f64,
    pub lift: f64,
    pub depth: f64,
}

/// 房间：长生命周期的聚合根
///
/// 节点顺序 = 采集顺序，语义上有意义；墙体顺序 = 创建顺序。
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    nodes: Vec<Node>,
    /// 节点表：id → 序号
    node_index: HashMap<NodeId, usize>,
    walls: Vec<Wall>,
}

impl Default for Room {
    fn default() -> Self {
        Self::new("New Room")
    }
}

impl Room {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(RoomId::new(), name)
    }

    /// 以给定 id 重建房间（用于反序列化路径）
    pub fn with_id(id: RoomId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            nodes: Vec::new(),
            node_index: HashMap::new(),
            walls: Vec::new(),
        }
    }

    /// 追加一个轮廓点
    ///
    /// 如果已有前驱节点，自动创建一面从前驱到新节点的墙
    /// （默认厚度/高度）。总是成功。
    pub fn add_node(&mut self, position: Point3) -> NodeId {
        let node = Node::new(position);
        let id = node.id;

        if let Some(prev) = self.nodes.last() {
            self.walls.push(Wall::new(prev.id, id));
        }

        self.node_index.insert(id, self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// 闭合轮廓：从最后一个节点连回第一个节点
    ///
    /// 节点数 ≤ 2 时不做任何事。幂等：轮廓已闭合时重复调用
    /// 不会追加重复的闭合墙，返回 None。
    pub fn close_loop(&mut self) -> Option<WallId> {
        if self.nodes.len() <= 2 || self.is_closed() {
            return None;
        }

        let first = self.nodes.first()?.id;
        let last = self.nodes.last()?.id;
        let wall = Wall::new(last, first);
        let id = wall.id;
        self.walls.push(wall);
        Some(id)
    }

    /// 轮廓是否已闭合（存在从末节点回到首节点的墙）
    pub fn is_closed(&self) -> bool {
        match (self.nodes.first(), self.nodes.last()) {
            (Some(first), Some(last)) => self
                .walls
                .iter()
                .any(|w| w.start == last.id && w.end == first.id),
            _ => false,
        }
    }

    /// 在墙体上附加开口
    ///
    /// 附加时校验位置：偏移必须落在 [0, 墙长] 内，开口的
    /// 终点不得超出墙长，宽/高必须为正，下沿高度不得为负。
    pub fn add_opening(
        &mut self,
        wall_id: WallId,
        kind: OpeningKind,
        distance_from_start: f64,
        width: f64,
        height: f64,
        sill_height: f64,
    ) -> Result<OpeningId, ModelError> {
        let length = self.wall_length(wall_id)?;

        if width <= 0.0 {
            return Err(ModelError::NonPositiveDimension {
                name: "width",
                value: width,
            });
        }
        if height <= 0.0 {
            return Err(ModelError::NonPositiveDimension {
                name: "height",
                value: height,
            });
        }
        if sill_height < 0.0 {
            return Err(ModelError::NegativeSillHeight(sill_height));
        }
        if distance_from_start < 0.0 || distance_from_start > length {
            return Err(ModelError::OffsetOutOfRange {
                offset: distance_from_start,
                length,
            });
        }
        if distance_from_start + width > length {
            return Err(ModelError::ExtentExceedsWall {
                extent: distance_from_start + width,
                length,
            });
        }

        let opening = Opening {
            id: OpeningId::new(),
            kind,
            wall_id,
            distance_from_start,
            width,
            height,
            sill_height,
        };
        let id = opening.id;

        let wall = self
            .walls
            .iter_mut()
            .find(|w| w.id == wall_id)
            .ok_or(ModelError::WallNotFound(wall_id))?;
        wall.openings.push(opening);

        Ok(id)
    }

    /// 插入带既有 id 的节点（重建路径）；不自动创建墙
    pub fn insert_node(&mut self, node: Node) -> Result<(), ModelError> {
        if self.node_index.contains_key(&node.id) {
            return Err(ModelError::DuplicateNode(node.id));
        }
        self.node_index.insert(node.id, self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// 插入带既有 id 的墙体（重建路径）
    ///
    /// 两个端点都必须已在节点表中，否则报错指出缺失的节点 id。
    pub fn insert_wall(&mut self, wall: Wall) -> Result<(), ModelError> {
        if !self.node_index.contains_key(&wall.start) {
            return Err(ModelError::NodeNotFound(wall.start));
        }
        if !self.node_index.contains_key(&wall.end) {
            return Err(ModelError::NodeNotFound(wall.end));
        }
        self.walls.push(wall);
        Ok(())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_index.get(&id).and_then(|i| self.nodes.get(*i))
    }

    pub fn wall(&self, id: WallId) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id == id)
    }

    /// 按 id 查找开口（Room 维护查找，开口自身不持有活引用）
    pub fn opening(&self, id: OpeningId) -> Option<&Opening> {
        self.walls
            .iter()
            .flat_map(|w| w.openings.iter())
            .find(|o| o.id == id)
    }

    /// 开口所属的墙体
    pub fn opening_wall(&self, id: OpeningId) -> Option<&Wall> {
        self.walls
            .iter()
            .find(|w| w.openings.iter().any(|o| o.id == id))
    }

    /// 解析墙体两端点的位置
    pub fn wall_endpoints(&self, wall: &Wall) -> Result<(Point3, Point3), ModelError> {
        let start = self
            .node(wall.start)
            .ok_or(ModelError::NodeNotFound(wall.start))?;
        let end = self
            .node(wall.end)
            .ok_or(ModelError::NodeNotFound(wall.end))?;
        Ok((start.position, end.position))
    }

    /// 墙体长度：两端点在楼面内（忽略Y轴）的欧氏距离
    pub fn wall_length(&self, id: WallId) -> Result<f64, ModelError> {
        let wall = self.wall(id).ok_or(ModelError::WallNotFound(id))?;
        let (start, end) = self.wall_endpoints(wall)?;
        Ok(planar_distance(&start, &end))
    }

    /// 墙体中点（查看器用；Y 取墙高的一半）
    pub fn wall_midpoint(&self, id: WallId) -> Result<Point3, ModelError> {
        let wall = self.wall(id).ok_or(ModelError::WallNotFound(id))?;
        let (start, end) = self.wall_endpoints(wall)?;
        Ok(Point3::new(
            (start.x + end.x) / 2.0,
            wall.height / 2.0,
            (start.z + end.z) / 2.0,
        ))
    }

    /// 墙体在楼面内的朝向角（查看器用）
    pub fn wall_angle(&self, id: WallId) -> Result<f64, ModelError> {
        let wall = self.wall(id).ok_or(ModelError::WallNotFound(id))?;
        let (start, end) = self.wall_endpoints(wall)?;
        Ok((end.z - start.z).atan2(end.x - start.x))
    }

    /// 开口在墙体局部坐标系中的放置（查看器用）
    pub fn opening_inset(&self, id: OpeningId) -> Result<OpeningInset, ModelError> {
        let wall = self
            .opening_wall(id)
            .ok_or(ModelError::OpeningNotFound(id))?;
        let opening = self.opening(id).ok_or(ModelError::OpeningNotFound(id))?;
        let length = self.wall_length(wall.id)?;

        Ok(OpeningInset {
            along: opening.distance_from_start - length / 2.0 + opening.width / 2.0,
            lift: opening.sill_height + opening.height / 2.0 - wall.height / 2.0,
            depth: wall.thickness * 1.1,
        })
    }

    /// 楼面轮廓多边形（x,z 平面），节点数 < 3 时无楼面
    pub fn floor_outline(&self) -> Option<Vec<Point2>> {
        if self.nodes.len() < 3 {
            return None;
        }
        Some(
            self.nodes
                .iter()
                .map(|n| Point2::new(n.position.x, n.position.z))
                .collect(),
        )
    }

    /// 墙面面积近似值：Σ 长度 × 高度
    ///
    /// 端点无法解析的墙体跳过不计。
    pub fn wall_surface_area(&self) -> f64 {
        self.walls
            .iter()
            .filter_map(|w| {
                let (start, end) = self.wall_endpoints(w).ok()?;
                Some(planar_distance(&start, &end) * w.height)
            })
            .sum()
    }
}
