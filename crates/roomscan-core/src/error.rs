//! 几何模型错误定义

use crate::model::{NodeId, OpeningId, WallId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Wall not found: {0}")]
    WallNotFound(WallId),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Opening not found: {0}")]
    OpeningNotFound(OpeningId),

    #[error("Duplicate node id: {0}")]
    DuplicateNode(NodeId),

    #[error("Opening {name} must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: f64 },

    #[error("Opening offset {offset} lies outside wall length {length}")]
    OffsetOutOfRange { offset: f64, length: f64 },

    #[error("Opening ends at {extent}, beyond wall length {length}")]
    ExtentExceedsWall { extent: f64, length: f64 },

    #[error("Sill height must not be negative, got {0}")]
    NegativeSillHeight(f64),
}
