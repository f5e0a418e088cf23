use std::cmp::Ordering;

use super::frame::UnitFrame;
use super::types::Connector;
use super::vector::{angle_deg, distance, normalize, sub};

/// Sort key of a connector as seen from the frame origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct AngularKey {
    /// Degrees between the origin-to-connector direction and the Z basis.
    pub(super) angle: f64,
    pub(super) distance: f64,
}

impl AngularKey {
    pub(super) fn of(connector: &Connector, frame: &UnitFrame, tolerance: f64) -> Self {
        let offset = sub(connector.position, frame.origin);
        // Connectors sitting on the origin get a zero direction, which reads as 90 degrees.
        let direction = normalize(offset, tolerance);
        Self {
            angle: angle_deg(direction, frame.z),
            distance: distance(connector.position, frame.origin),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.angle
            .total_cmp(&other.angle)
            .then_with(|| self.distance.total_cmp(&other.distance))
    }
}

/// Orders connectors by angle to the Z basis, nearest first on ties.
/// Equal keys keep their input order.
pub(super) fn sort_by_angle(connectors: &[Connector], frame: &UnitFrame, tolerance: f64) -> Vec<Connector> {
    let mut keyed: Vec<(AngularKey, Connector)> = connectors
        .iter()
        .map(|connector| (AngularKey::of(connector, frame, tolerance), *connector))
        .collect();
    keyed.sort_by(|a, b| a.0.compare(&b.0));
    keyed.into_iter().map(|(_, connector)| connector).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::frame::normalize_frame;
    use crate::pairing::types::{Frame, Vec3};

    const EPS: f64 = 1e-9;

    fn world() -> UnitFrame {
        normalize_frame(&Frame::default(), EPS).unwrap()
    }

    fn ids(items: &[Connector]) -> Vec<usize> {
        items.iter().map(|c| c.id).collect()
    }

    #[test]
    fn orders_by_angle_to_z() {
        let items = vec![
            Connector::new(0, Vec3::new(1.0, 0.0, -1.0)),
            Connector::new(1, Vec3::new(0.0, 0.0, 5.0)),
            Connector::new(2, Vec3::new(1.0, 0.0, 1.0)),
            Connector::new(3, Vec3::new(1.0, 0.0, 0.0)),
        ];
        assert_eq!(ids(&sort_by_angle(&items, &world(), EPS)), vec![1, 2, 3, 0]);
    }

    #[test]
    fn equal_angles_sort_nearest_first() {
        let items = vec![
            Connector::new(0, Vec3::new(3.0, 0.0, 0.0)),
            Connector::new(1, Vec3::new(0.0, 1.0, 0.0)),
            Connector::new(2, Vec3::new(-2.0, 0.0, 0.0)),
        ];
        // All square to Z, so distance decides.
        assert_eq!(ids(&sort_by_angle(&items, &world(), EPS)), vec![1, 2, 0]);
    }

    #[test]
    fn identical_keys_keep_input_order() {
        let items = vec![
            Connector::new(7, Vec3::new(1.0, 0.0, 1.0)),
            Connector::new(3, Vec3::new(1.0, 0.0, 1.0)),
        ];
        assert_eq!(ids(&sort_by_angle(&items, &world(), EPS)), vec![7, 3]);
    }

    #[test]
    fn connector_at_origin_counts_as_right_angle() {
        let key = AngularKey::of(&Connector::new(0, Vec3::ZERO), &world(), EPS);
        assert!((key.angle - 90.0).abs() < 1e-12);
        assert_eq!(key.distance, 0.0);

        let items = vec![
            Connector::new(0, Vec3::new(1.0, 0.0, -0.1)),
            Connector::new(1, Vec3::ZERO),
            Connector::new(2, Vec3::new(1.0, 0.0, 0.1)),
        ];
        assert_eq!(ids(&sort_by_angle(&items, &world(), EPS)), vec![2, 1, 0]);
    }

    #[test]
    fn angles_are_measured_in_the_device_frame() {
        let frame = normalize_frame(
            &Frame::new(Vec3::new(10.0, 0.0, 0.0), Vec3::Y, Vec3::Z, Vec3::X),
            EPS,
        )
        .unwrap();
        let items = vec![
            Connector::new(0, Vec3::new(10.0, 0.0, 4.0)),
            Connector::new(1, Vec3::new(14.0, 0.0, 0.0)),
        ];
        assert_eq!(ids(&sort_by_angle(&items, &frame, EPS)), vec![1, 0]);
    }
}
