use thiserror::Error;

use super::types::FrameAxis;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PairingError {
    #[error("invalid frame: {axis} basis vector has length {length:e}, below tolerance {tolerance:e}")]
    InvalidFrame {
        axis: FrameAxis,
        length: f64,
        tolerance: f64,
    },
}

pub type Result<T> = std::result::Result<T, PairingError>;
