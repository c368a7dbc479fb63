//! DXF 平面图导出
//!
//! 自己写 DXF 文本格式，把每面墙的厚度包络渲染为4条独立的
//! LINE 实体：两条平行于中线的偏移长边 + 两条端点处的短封口边。
//!
//! # DXF 文件结构
//!
//! ```text
//! 0
//! SECTION
//! 2
//! TABLES          ← 线型表 + 图层表
//! ...
//! 0
//! ENDSEC
//! 0
//! SECTION
//! 2
//! ENTITIES        ← LINE 实体
//! ...
//! 0
//! ENDSEC
//! 0
//! EOF
//! ```
//!
//! # 组码 (Group Code)
//!
//! 每个数据项由两行组成：第一行组码，第二行值。
//! 常用组码：
//! - 0: 实体/表项类型
//! - 2: 名称
//! - 8: 图层名
//! - 10, 20: 起点 X, Y
//! - 11, 21: 终点 X, Y
//! - 62: 颜色索引
//! - 6: 线型名
//!
//! 坐标映射：房间的 (x, z) 楼面平面映射到图纸的 (x, y) 平面。
//!
//! 开口目前不出现在平面图中：墙线不做裁剪，对每个开口只记录
//! 一条诊断。这是有名字的已知限制，不是疏漏。

use roomscan_core::math::thickness_offset;
use roomscan_core::model::Room;

/// 墙体图层名
pub const WALL_LAYER: &str = "Walls";

/// AutoCAD 颜色索引：红
pub const ACI_RED: u8 = 1;

/// 实线线型名
pub const LINE_TYPE_CONTINUOUS: &str = "CONTINUOUS";

/// DXF 写入器
///
/// 持有活动图层；所有 LINE 实体写到活动图层上。
pub struct DxfWriter {
    output: Vec<String>,
    active_layer: String,
}

impl DxfWriter {
    pub fn new() -> Self {
        Self {
            output: Vec::new(),
            active_layer: "0".to_string(),
        }
    }

    /// 写入组码-值对
    pub fn write_pair(&mut self, code: i32, value: impl std::fmt::Display) {
        self.output.push(format!("{:>3}", code));
        self.output.push(value.to_string());
    }

    /// 写入 SECTION 开始
    pub fn begin_section(&mut self, name: &str) {
        self.write_pair(0, "SECTION");
        self.write_pair(2, name);
    }

    /// 写入 SECTION 结束
    pub fn end_section(&mut self) {
        self.write_pair(0, "ENDSEC");
    }

    /// 写入 TABLE 开始
    pub fn begin_table(&mut self, name: &str, entry_count: i32) {
        self.write_pair(0, "TABLE");
        self.write_pair(2, name);
        self.write_pair(70, entry_count);
    }

    /// 写入 TABLE 结束
    pub fn end_table(&mut self) {
        self.write_pair(0, "ENDTAB");
    }

    /// 写入线型表项
    pub fn line_type(&mut self, name: &str, description: &str) {
        self.write_pair(0, "LTYPE");
        self.write_pair(2, name);
        self.write_pair(70, 64);
        self.write_pair(3, description);
        self.write_pair(72, 65);
        self.write_pair(73, 0);
        self.write_pair(40, 0.0);
    }

    /// 写入图层表项（名称、颜色索引、线型名）
    pub fn layer(&mut self, name: &str, color: u8, line_type: &str) {
        self.write_pair(0, "LAYER");
        self.write_pair(2, name);
        self.write_pair(70, 64);
        self.write_pair(62, color);
        self.write_pair(6, line_type);
    }

    /// 设置活动图层，之后的实体都写到该图层
    pub fn set_active_layer(&mut self, name: &str) {
        self.active_layer = name.to_string();
    }

    /// 在活动图层上写入 LINE 实体
    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let layer = self.active_layer.clone();
        self.write_pair(0, "LINE");
        self.write_pair(8, layer);
        self.write_pair(10, x1);
        self.write_pair(20, y1);
        self.write_pair(11, x2);
        self.write_pair(21, y2);
    }

    /// 获取输出
    pub fn finish(mut self) -> String {
        self.write_pair(0, "EOF");
        self.output.join("\n")
    }
}

impl Default for DxfWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// 把房间导出为 DXF 平面图文本
///
/// 纯读取函数：不修改房间。退化墙体跳过并记录诊断；节点数
/// 不足 2 的房间产生 ENTITIES 段为空的合法文档。
pub fn export_dxf(room: &Room) -> String {
    let mut writer = DxfWriter::new();

    writer.begin_section("TABLES");
    writer.begin_table("LTYPE", 1);
    writer.line_type(LINE_TYPE_CONTINUOUS, "Solid line");
    writer.end_table();
    writer.begin_table("LAYER", 1);
    writer.layer(WALL_LAYER, ACI_RED, LINE_TYPE_CONTINUOUS);
    writer.end_table();
    writer.end_section();

    writer.set_active_layer(WALL_LAYER);
    writer.begin_section("ENTITIES");

    for wall in room.walls() {
        let (start, end) = match room.wall_endpoints(wall) {
            Ok(points) => points,
            Err(e) => {
                tracing::warn!(wall = %wall.id, error = %e, "skipping unresolvable wall");
                continue;
            }
        };

        let Some(n) = thickness_offset(&start, &end, wall.thickness) else {
            tracing::warn!(wall = %wall.id, "skipping zero-length wall");
            continue;
        };

        // 房间 (x, z) → 图纸 (x, y)
        let (x1, y1) = (start.x, start.z);
        let (x2, y2) = (end.x, end.z);

        // 两条偏移长边
        writer.draw_line(x1 + n.x, y1 + n.y, x2 + n.x, y2 + n.y);
        writer.draw_line(x1 - n.x, y1 - n.y, x2 - n.x, y2 - n.y);

        // 两条端点封口边
        writer.draw_line(x1 + n.x, y1 + n.y, x1 - n.x, y1 - n.y);
        writer.draw_line(x2 + n.x, y2 + n.y, x2 - n.x, y2 - n.y);

        for opening in &wall.openings {
            // 已知限制：墙线不按开口裁剪，平面图中不出现开口
            tracing::debug!(opening = %opening.id, wall = %wall.id, "opening not rendered in plan export");
        }
    }

    writer.end_section();
    writer.finish()
}
