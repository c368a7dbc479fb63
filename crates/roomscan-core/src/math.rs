//! 数学基础类型
//!
//! 基于 nalgebra 的类型别名。坐标约定：
//! - Y 轴竖直向上
//! - X/Z 构成楼面平面

use serde::{Deserialize, Serialize};

pub type Point2 = nalgebra::Point2<f64>;
pub type Vector2 = nalgebra::Vector2<f64>;
pub type Point3 = nalgebra::Point3<f64>;
pub type Vector3 = nalgebra::Vector3<f64>;

/// 几何容差
pub const EPSILON: f64 = 1e-9;

/// 计算两点在楼面内（忽略Y轴）的距离
pub fn planar_distance(a: &Point3, b: &Point3) -> f64 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    (dx * dx + dz * dz).sqrt()
}

/// 墙体厚度偏移向量
///
/// 将楼面内的方向向量旋转90°（(dx,dz) → (-dz,dx)），缩放到厚度的一半。
/// 两端点重合（长度小于容差）时偏移无定义，返回 None。
pub fn thickness_offset(start: &Point3, end: &Point3, thickness: f64) -> Option<Vector2> {
    let dx = end.x - start.x;
    let dz = end.z - start.z;
    let len = (dx * dx + dz * dz).sqrt();

    if len < EPSILON {
        return None;
    }

    Some(Vector2::new(
        -dz / len * thickness / 2.0,
        dx / len * thickness / 2.0,
    ))
}

/// 交换用三维坐标（结构化形式中字段展开为 x/y/z）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Point3> for Coord3 {
    fn from(p: Point3) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

impl From<Coord3> for Point3 {
    fn from(c: Coord3) -> Self {
        Point3::new(c.x, c.y, c.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_distance_ignores_y() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 7.5, 4.0);
        assert!((planar_distance(&a, &b) - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_thickness_offset_perpendicular() {
        // 沿X轴的墙，偏移应落在Z轴上
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(4.0, 0.0, 0.0);
        let n = thickness_offset(&a, &b, 0.15).unwrap();
        assert!(n.x.abs() < EPSILON);
        assert!((n.y - 0.075).abs() < EPSILON);
    }

    #[test]
    fn test_thickness_offset_degenerate() {
        let a = Point3::new(1.0, 0.0, 1.0);
        assert!(thickness_offset(&a, &a, 0.15).is_none());
    }
}
