//! OBJ 网格导出
//!
//! 把房间的每面墙渲染为一个轴无关的长方体实体。
//!
//! # 文档结构
//!
//! ```text
//! # Room Export: <房间名>     ← 注释头
//! v x y z                     ← 顶点，固定4位小数
//! ...（每面墙8个顶点）
//! f i j k l                   ← 四边形面，1起始的顶点序号
//! ...（每面墙6个面：底、顶、四侧）
//! g Wall_<墙体id>             ← 分组标记，跟在该墙的面之后
//! ```
//!
//! 顶点序号在整个文档内单调递增，从不按墙重置；每面墙占用
//! 连续的8个序号。不输出法线和纹理坐标，也不输出楼面
//! （楼面属于交互查看器，不属于文件导出）。
//!
//! 开口不会从导出的实体中剖除：导出的墙永远是未穿孔的实心体，
//! 开口只在交互查看器中可见。这是有意的范围限制，不是疏漏。
//!
//! 每面墙的长方体：
//! 1. 计算楼面内方向向量并按墙长归一化
//! 2. 方向旋转90°、缩放到厚度一半，得到垂直偏移
//! 3. 两端点各按 ±偏移 生成4个底面角点（y=0），
//!    再在 y=墙高 处复制出4个顶面角点
//! 4. 以一致的绕向输出6个四边形面，构成闭合盒体

use roomscan_core::math::thickness_offset;
use roomscan_core::model::Room;

/// OBJ 文本写入器
///
/// 维护全文档单调递增的顶点计数。
pub struct ObjWriter {
    lines: Vec<String>,
    vertex_count: usize,
}

impl ObjWriter {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            vertex_count: 0,
        }
    }

    /// 写入注释行
    pub fn comment(&mut self, text: &str) {
        self.lines.push(format!("# {}", text));
    }

    /// 写入顶点，返回分配到的1起始序号
    pub fn vertex(&mut self, x: f64, y: f64, z: f64) -> usize {
        self.lines.push(format!("v {:.4} {:.4} {:.4}", x, y, z));
        self.vertex_count += 1;
        self.vertex_count
    }

    /// 写入四边形面
    pub fn quad(&mut self, v1: usize, v2: usize, v3: usize, v4: usize) {
        self.lines.push(format!("f {} {} {} {}", v1, v2, v3, v4));
    }

    /// 写入分组标记
    pub fn group(&mut self, name: impl std::fmt::Display) {
        self.lines.push(format!("g {}", name));
    }

    /// 已分配的最大顶点序号
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// 获取输出
    pub fn finish(self) -> String {
        let mut output = self.lines.join("\n");
        output.push('\n');
        output
    }
}

impl Default for ObjWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// 把房间导出为 OBJ 文本
///
/// 纯读取函数：不修改房间。零长度的退化墙体跳过并记录诊断，
/// 文档其余部分照常输出。节点数 0 或 1 的房间产生只含注释头的
/// 合法文档。
pub fn export_obj(room: &Room) -> String {
    let mut writer = ObjWriter::new();
    writer.comment(&format!("Room Export: {}", room.name));

    let opening_count: usize = room.walls().iter().map(|w| w.openings.len()).sum();
    if opening_count > 0 {
        // 开口只在查看器中呈现，导出实体不剖洞
        tracing::debug!(
            openings = opening_count,
            "openings are visual-only; exported walls stay solid"
        );
    }

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

        // 底面4角：起点+n、终点+n、终点-n、起点-n
        let corners = [
            (start.x + n.x, start.z + n.y),
            (end.x + n.x, end.z + n.y),
            (end.x - n.x, end.z - n.y),
            (start.x - n.x, start.z - n.y),
        ];

        let base = writer.vertex_count() + 1;
        for (x, z) in corners {
            writer.vertex(x, 0.0, z);
        }
        for (x, z) in corners {
            writer.vertex(x, wall.height, z);
        }

        // 底、顶、四侧，绕向一致
        writer.quad(base, base + 3, base + 2, base + 1);
        writer.quad(base + 4, base + 5, base + 6, base + 7);
        writer.quad(base, base + 1, base + 5, base + 4);
        writer.quad(base + 1, base + 2, base + 6, base + 5);
        writer.quad(base + 2, base + 3, base + 7, base + 6);
        writer.quad(base + 3, base, base + 4, base + 7);

        writer.group(format_args!("Wall_{}", wall.id));
    }

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomscan_core::math::Point3;
    use roomscan_core::model::OpeningKind;

    fn square_room() -> Room {
        let mut room = Room::new("Test Room");
        room.add_node(Point3::new(0.0, 0.0, 0.0));
        room.add_node(Point3::new(4.0, 0.0, 0.0));
        room.add_node(Point3::new(4.0, 0.0, 4.0));
        room.add_node(Point3::new(0.0, 0.0, 4.0));
        room.close_loop();
        room
    }

    fn count_prefixed(output: &str, prefix: &str) -> usize {
        output.lines().filter(|l| l.starts_with(prefix)).count()
    }

    #[test]
    fn test_square_room_counts() {
        let output = export_obj(&square_room());

        assert_eq!(count_prefixed(&output, "v "), 32);
        assert_eq!(count_prefixed(&output, "f "), 24);
        assert_eq!(count_prefixed(&output, "g "), 4);
    }

    #[test]
    fn test_header_carries_room_name() {
        let output = export_obj(&square_room());
        assert!(output.starts_with("# Room Export: Test Room\n"));
    }

    #[test]
    fn test_face_indices_stay_bounded() {
        let output = export_obj(&square_room());

        let mut max_vertex = 0usize;
        for line in output.lines() {
            if line.starts_with("v ") {
                max_vertex += 1;
            } else if let Some(rest) = line.strip_prefix("f ") {
                for index in rest.split_whitespace() {
                    let index: usize = index.parse().unwrap();
                    assert!(index >= 1);
                    assert!(index <= max_vertex);
                }
            }
        }
        assert_eq!(max_vertex, 32);
    }

    #[test]
    fn test_vertex_formatting() {
        let output = export_obj(&square_room());
        // 第一面墙沿X轴，偏移落在Z上：厚度0.15 → ±0.075
        assert!(output.contains("v 0.0000 0.0000 0.0750"));
        assert!(output.contains("v 4.0000 2.8000 -0.0750"));
    }

    #[test]
    fn test_empty_room_is_valid() {
        let room = Room::new("Empty");
        let output = export_obj(&room);

        assert_eq!(output, "# Room Export: Empty\n");
    }

    #[test]
    fn test_single_node_room_is_valid() {
        let mut room = Room::new("Dot");
        room.add_node(Point3::new(1.0, 0.0, 1.0));
        let output = export_obj(&room);

        assert_eq!(count_prefixed(&output, "v "), 0);
        assert_eq!(count_prefixed(&output, "f "), 0);
    }

    #[test]
    fn test_degenerate_wall_is_skipped() {
        let mut room = Room::new("Degenerate");
        room.add_node(Point3::new(0.0, 0.0, 0.0));
        room.add_node(Point3::new(0.0, 0.0, 0.0));
        room.add_node(Point3::new(4.0, 0.0, 0.0));

        let output = export_obj(&room);

        // 第一面墙长度为零被跳过，第二面照常输出
        assert_eq!(count_prefixed(&output, "v "), 8);
        assert_eq!(count_prefixed(&output, "f "), 6);
        assert_eq!(count_prefixed(&output, "g "), 1);
    }

    #[test]
    fn test_openings_do_not_change_mesh() {
        let mut room = square_room();
        let wall_id = room.walls()[0].id;
        room.add_opening(wall_id, OpeningKind::Door, 2.0, 0.9, 2.1, 0.0)
            .unwrap();

        let with_opening = export_obj(&room);
        let without_opening = export_obj(&square_room());

        // 开口不剖洞，网格结构不变（id不同，只比行数）
        assert_eq!(
            with_opening.lines().count(),
            without_opening.lines().count()
        );
    }
}
