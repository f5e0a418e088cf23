use tracing::debug;

use super::error::{PairingError, Result};
use super::types::{Frame, FrameAxis, Vec3};
use super::vector::{is_near_zero, length, normalize};

/// Frame with a unit-length basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitFrame {
    pub origin: Vec3,
    pub x: Vec3,
    pub y: Vec3,
    pub z: Vec3,
}

impl UnitFrame {
    pub fn basis(&self, axis: FrameAxis) -> Vec3 {
        match axis {
            FrameAxis::X => self.x,
            FrameAxis::Y => self.y,
            FrameAxis::Z => self.z,
        }
    }
}

pub fn normalize_frame(frame: &Frame, tolerance: f64) -> Result<UnitFrame> {
    let x = unit_basis(frame.x, FrameAxis::X, tolerance)?;
    let y = unit_basis(frame.y, FrameAxis::Y, tolerance)?;
    let z = unit_basis(frame.z, FrameAxis::Z, tolerance)?;
    debug!(
        origin = ?frame.origin,
        x = ?x,
        y = ?y,
        z = ?z,
        "normalized device frame"
    );
    Ok(UnitFrame {
        origin: frame.origin,
        x,
        y,
        z,
    })
}

fn unit_basis(v: Vec3, axis: FrameAxis, tolerance: f64) -> Result<Vec3> {
    let unit = normalize(v, tolerance);
    // NaN components fail the length comparison in normalize, so check the result too.
    if is_near_zero(unit, tolerance) || !unit.is_finite() {
        return Err(PairingError::InvalidFrame {
            axis,
            length: length(v),
            tolerance,
        });
    }
    Ok(unit)
}
