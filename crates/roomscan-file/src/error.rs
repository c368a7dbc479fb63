//! 文件操作错误定义

use roomscan_core::error::ModelError;
use roomscan_core::model::WallId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("MessagePack encode error: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    #[error("MessagePack decode error: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported version: {0}")]
    UnsupportedVersion(String),

    #[error("Wall {wall} cannot be rebuilt: {source}")]
    UnresolvedWall {
        wall: WallId,
        #[source]
        source: ModelError,
    },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}
