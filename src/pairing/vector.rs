use super::types::Vec3;

/// Above this length the reciprocal loses precision.
const LARGE_LENGTH: f64 = 1e300;

pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(a.x - b.x, a.y - b.y, a.z - b.z)
}

pub fn scale(v: Vec3, s: f64) -> Vec3 {
    Vec3::new(v.x * s, v.y * s, v.z * s)
}

pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

/// Euclidean length. Finite vectors whose squared length overflows are
/// rescaled by their largest component first.
pub fn length(v: Vec3) -> f64 {
    let len = dot(v, v).sqrt();
    if len.is_finite() || !v.is_finite() {
        return len;
    }
    let max = max_abs(v);
    let reduced = divide(v, max);
    max * dot(reduced, reduced).sqrt()
}

fn max_abs(v: Vec3) -> f64 {
    v.x.abs().max(v.y.abs()).max(v.z.abs())
}

fn divide(v: Vec3, d: f64) -> Vec3 {
    Vec3::new(v.x / d, v.y / d, v.z / d)
}

pub fn distance(a: Vec3, b: Vec3) -> f64 {
    length(sub(a, b))
}

/// Unit vector along `v`, or the zero vector when `v` is shorter than `tolerance`.
pub fn normalize(v: Vec3, tolerance: f64) -> Vec3 {
    let len = length(v);
    if len < tolerance {
        Vec3::ZERO
    } else if len <= LARGE_LENGTH {
        scale(v, 1.0 / len)
    } else {
        // 1/len would be subnormal or zero; reduce to unit scale before dividing.
        let reduced = divide(v, max_abs(v));
        divide(reduced, length(reduced))
    }
}

pub fn is_near_zero(v: Vec3, tolerance: f64) -> bool {
    length(v) < tolerance
}

/// Angle in degrees between two unit vectors. A zero vector yields 90.
pub fn angle_deg(a: Vec3, b: Vec3) -> f64 {
    dot(a, b).clamp(-1.0, 1.0).acos().to_degrees()
}
