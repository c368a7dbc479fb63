//! 采集通道
//!
//! 外部采集者（真实传感器或模拟器）把轮廓点作为严格有序的
//! 离散事件投递到 mpsc 通道；模型本身保持同步，逐个消费事件，
//! 单写者约束由通道的顺序保证。
//!
//! 通道在没有 Finish 事件的情况下关闭视为采集中止：
//! 返回已有节点构成的部分房间，下游操作必须照常接受。

use crate::math::Point3;
use crate::model::Room;
use std::time::Duration;
use tokio::sync::mpsc;

/// 采集事件
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    /// 检测到一个轮廓角点
    Corner(Point3),
    /// 采集结束，闭合轮廓
    Finish,
}

/// 消费采集事件流，构建房间
///
/// 事件按到达顺序同步应用；Finish 闭合轮廓并结束采集。
pub async fn run_capture(
    name: impl Into<String>,
    mut events: mpsc::Receiver<CaptureEvent>,
) -> Room {
    let mut room = Room::new(name);

    while let Some(event) = events.recv().await {
        match event {
            CaptureEvent::Corner(position) => {
                let id = room.add_node(position);
                tracing::debug!(node = %id, x = position.x, z = position.z, "corner captured");
            }
            CaptureEvent::Finish => {
                if let Some(wall) = room.close_loop() {
                    tracing::debug!(wall = %wall, "loop closed");
                }
                break;
            }
        }
    }

    tracing::info!(
        "Capture finished: {} nodes, {} walls",
        room.node_count(),
        room.wall_count()
    );

    room
}

/// 模拟扫描演示序列：4m × 4m 方形房间的四个角点
const DEMO_CORNERS: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [4.0, 0.0, 0.0],
    [4.0, 0.0, 4.0],
    [0.0, 0.0, 4.0],
];

/// 启动模拟扫描，按固定间隔投递演示角点，最后发送 Finish
pub fn simulate_scan(interval: Duration) -> mpsc::Receiver<CaptureEvent> {
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        for [x, y, z] in DEMO_CORNERS {
            tokio::time::sleep(interval).await;
            if tx
                .send(CaptureEvent::Corner(Point3::new(x, y, z)))
                .await
                .is_err()
            {
                return;
            }
        }
        tokio::time::sleep(interval).await;
        let _ = tx.send(CaptureEvent::Finish).await;
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_capture_sequence() {
        let (tx, rx) = mpsc::channel(16);

        for [x, y, z] in DEMO_CORNERS {
            tx.send(CaptureEvent::Corner(Point3::new(x, y, z)))
                .await
                .unwrap();
        }
        tx.send(CaptureEvent::Finish).await.unwrap();

        let room = run_capture("Living Room", rx).await;
        assert_eq!(room.node_count(), 4);
        assert_eq!(room.wall_count(), 4);
        assert!(room.is_closed());
    }

    #[tokio::test]
    async fn test_aborted_capture_keeps_partial_room() {
        let (tx, rx) = mpsc::channel(16);

        tx.send(CaptureEvent::Corner(Point3::new(0.0, 0.0, 0.0)))
            .await
            .unwrap();
        tx.send(CaptureEvent::Corner(Point3::new(4.0, 0.0, 0.0)))
            .await
            .unwrap();
        drop(tx);

        let room = run_capture("Aborted", rx).await;
        assert_eq!(room.node_count(), 2);
        assert_eq!(room.wall_count(), 1);
        assert!(!room.is_closed());
    }

    #[tokio::test]
    async fn test_simulate_scan_produces_square() {
        let rx = simulate_scan(Duration::from_millis(1));
        let room = run_capture("Simulated", rx).await;

        assert_eq!(room.node_count(), 4);
        assert_eq!(room.wall_count(), 4);
    }
}
