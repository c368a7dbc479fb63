//! RoomScan 会话文件格式（.roomscan）
//!
//! 基于 MessagePack + Zstd 的紧凑二进制格式：
//! - 体积小：MessagePack 比 JSON 小 30-50%，Zstd 再压缩
//! - 速度快：直接序列化/反序列化
//! - 简单可靠：无外部数据库依赖
//!
//! 用于把采集到的房间保存到磁盘、在下次会话中恢复。

use crate::error::FileError;
use crate::transfer::RoomData;
use chrono::{DateTime, Utc};
use roomscan_core::model::Room;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// 文件魔数 "ROOM"
const MAGIC: &[u8; 4] = b"ROOM";

/// 当前文件格式版本
const FORMAT_VERSION: u32 = 1;

/// Zstd 压缩级别（1-22，3 是默认值，平衡速度和压缩比）
const COMPRESSION_LEVEL: i32 = 3;

/// 文件头（16 字节）
#[derive(Debug)]
struct FileHeader {
    /// 魔数 "ROOM"
    magic: [u8; 4],
    /// 格式版本
    version: u32,
    /// 标志位（预留）
    flags: u32,
    /// 压缩后数据长度
    compressed_size: u32,
}

impl FileHeader {
    fn new(compressed_size: u32) -> Self {
        Self {
            magic: *MAGIC,
            version: FORMAT_VERSION,
            flags: 0,
            compressed_size,
        }
    }

    fn write(&self, writer: &mut impl Write) -> Result<(), std::io::Error> {
        writer.write_all(&self.magic)?;
        writer.write_all(&self.version.to_le_bytes())?;
        writer.write_all(&self.flags.to_le_bytes())?;
        writer.write_all(&self.compressed_size.to_le_bytes())?;
        Ok(())
    }

    fn read(reader: &mut impl Read) -> Result<Self, FileError> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;

        if &magic != MAGIC {
            return Err(FileError::InvalidFormat(
                "Invalid magic number, not a RoomScan session file".to_string(),
            ));
        }

        let mut buf = [0u8; 4];

        reader.read_exact(&mut buf)?;
        let version = u32::from_le_bytes(buf);

        reader.read_exact(&mut buf)?;
        let flags = u32::from_le_bytes(buf);

        reader.read_exact(&mut buf)?;
        let compressed_size = u32::from_le_bytes(buf);

        Ok(Self {
            magic,
            version,
            flags,
            compressed_size,
        })
    }
}

/// 可序列化的文件内容
#[derive(Debug, Serialize, Deserialize)]
struct SessionContent {
    /// 采集完成时间
    captured_at: DateTime<Utc>,
    /// 房间快照
    room: RoomData,
}

/// 保存房间到会话文件
pub fn save(room: &Room, path: &Path) -> Result<(), FileError> {
    let content = SessionContent {
        captured_at: Utc::now(),
        room: RoomData::from_room(room),
    };

    // 序列化为 MessagePack，再用 Zstd 压缩
    let msgpack_data = rmp_serde::to_vec(&content)?;
    let compressed_data = zstd::encode_all(msgpack_data.as_slice(), COMPRESSION_LEVEL)?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let header = FileHeader::new(compressed_data.len() as u32);
    header.write(&mut writer)?;
    writer.write_all(&compressed_data)?;
    writer.flush()?;

    tracing::info!(
        "Saved {} nodes, {} walls to {} ({} bytes compressed)",
        content.room.nodes.len(),
        content.room.walls.len(),
        path.display(),
        compressed_data.len()
    );

    Ok(())
}

/// 从会话文件加载房间
pub fn load(path: &Path) -> Result<Room, FileError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let header = FileHeader::read(&mut reader)?;

    // 版本检查
    if header.version > FORMAT_VERSION {
        return Err(FileError::UnsupportedVersion(format!(
            "File version {} is newer than supported version {}",
            header.version, FORMAT_VERSION
        )));
    }

    let mut compressed_data = vec![0u8; header.compressed_size as usize];
    reader.read_exact(&mut compressed_data)?;

    let msgpack_data = zstd::decode_all(compressed_data.as_slice())?;
    let content: SessionContent = rmp_serde::from_slice(&msgpack_data)?;

    let room = content.room.into_room()?;

    tracing::info!(
        "Loaded {} nodes, {} walls from {}",
        room.node_count(),
        room.wall_count(),
        path.display()
    );

    Ok(room)
}
