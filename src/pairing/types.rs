use serde::{Deserialize, Serialize};

/// A position or direction in the device's reference units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

pub type Point3 = Vec3;
pub type Vector3 = Vec3;

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const X: Vec3 = Vec3 { x: 1.0, y: 0.0, z: 0.0 };
    pub const Y: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };
    pub const Z: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

/// Local coordinate system of the distribution device.
///
/// The basis need not be unit length; it is normalized at the start of every
/// pairing call. Orthogonality and handedness are assumed, not checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub origin: Point3,
    pub x: Vector3,
    pub y: Vector3,
    pub z: Vector3,
}

impl Frame {
    pub fn new(origin: Point3, x: Vector3, y: Vector3, z: Vector3) -> Self {
        Self { origin, x, y, z }
    }

    /// World-aligned frame placed at `origin`.
    pub fn world(origin: Point3) -> Self {
        Self::new(origin, Vec3::X, Vec3::Y, Vec3::Z)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::world(Vec3::ZERO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameAxis {
    X,
    Y,
    Z,
}

impl std::fmt::Display for FrameAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FrameAxis::X => "X",
            FrameAxis::Y => "Y",
            FrameAxis::Z => "Z",
        };
        f.write_str(name)
    }
}

/// An attachment point as seen by the engine: the caller's handle plus where it sits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: usize,
    pub position: Point3,
}

impl Connector {
    pub fn new(id: usize, position: Point3) -> Self {
        Self { id, position }
    }
}

/// Connectors on either side of one splitting plane, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub upper: Vec<Connector>,
    pub lower: Vec<Connector>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.upper.len() + self.lower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upper.is_empty() && self.lower.is_empty()
    }
}

/// Which plane divided the device into halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SplitAxis {
    /// Plane spanned by the Z and X basis; normal is the Y basis.
    Zx,
    /// Plane spanned by the Z and Y basis; normal is the X basis.
    Zy,
}

impl SplitAxis {
    pub fn normal_axis(self) -> FrameAxis {
        match self {
            SplitAxis::Zx => FrameAxis::Y,
            SplitAxis::Zy => FrameAxis::X,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub outlet: Connector,
    pub target: Connector,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub pairs: Vec<Pair>,
    pub split: SplitAxis,
}

impl Pairing {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn is_outlet_paired(&self, id: usize) -> bool {
        self.pairs.iter().any(|pair| pair.outlet.id == id)
    }

    pub fn is_target_paired(&self, id: usize) -> bool {
        self.pairs.iter().any(|pair| pair.target.id == id)
    }
}
