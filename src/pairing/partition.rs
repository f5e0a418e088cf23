use super::types::{Connector, Partition, Vec3};
use super::vector::{dot, sub};

/// Splits `connectors` by the plane through `origin` with unit `normal`.
///
/// Points within `tolerance` of the plane, including points exactly on it,
/// land in `upper`. Input order is kept on both sides.
pub(super) fn partition_by_plane(
    connectors: &[Connector],
    origin: Vec3,
    normal: Vec3,
    tolerance: f64,
) -> Partition {
    let mut partition = Partition::default();
    for connector in connectors {
        let offset = sub(connector.position, origin);
        if dot(offset, normal) >= -tolerance {
            partition.upper.push(*connector);
        } else {
            partition.lower.push(*connector);
        }
    }
    partition
}
