use tracing::debug;

use super::frame::UnitFrame;
use super::partition::partition_by_plane;
use super::types::{Connector, Partition, SplitAxis};

/// Outlet and target halves for one candidate split.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SplitCandidate {
    pub(super) axis: SplitAxis,
    pub(super) outlets: Partition,
    pub(super) targets: Partition,
}

impl SplitCandidate {
    fn build(
        axis: SplitAxis,
        frame: &UnitFrame,
        outlets: &[Connector],
        targets: &[Connector],
        tolerance: f64,
    ) -> Self {
        let normal = frame.basis(axis.normal_axis());
        Self {
            axis,
            outlets: partition_by_plane(outlets, frame.origin, normal, tolerance),
            targets: partition_by_plane(targets, frame.origin, normal, tolerance),
        }
    }

    /// Pairs that same-side matching alone could produce.
    pub(super) fn score(&self) -> usize {
        self.outlets.upper.len().min(self.targets.upper.len())
            + self.outlets.lower.len().min(self.targets.lower.len())
    }
}

/// Picks the split whose halves line outlets and targets up best.
/// Equal scores keep the Zx split (Y-basis normal).
pub(super) fn select_split(
    frame: &UnitFrame,
    outlets: &[Connector],
    targets: &[Connector],
    tolerance: f64,
) -> SplitCandidate {
    let zx = SplitCandidate::build(SplitAxis::Zx, frame, outlets, targets, tolerance);
    let zy = SplitCandidate::build(SplitAxis::Zy, frame, outlets, targets, tolerance);
    let (zx_score, zy_score) = (zx.score(), zy.score());
    let chosen = if zy_score > zx_score { zy } else { zx };
    debug!(
        zx_score,
        zy_score,
        chosen = ?chosen.axis,
        "selected split axis"
    );
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::frame::normalize_frame;
    use crate::pairing::types::{Frame, Vec3};

    const EPS: f64 = 1e-9;

    fn unit_world() -> UnitFrame {
        normalize_frame(&Frame::default(), EPS).unwrap()
    }

    fn at(points: &[(f64, f64, f64)]) -> Vec<Connector> {
        points
            .iter()
            .enumerate()
            .map(|(idx, &(x, y, z))| Connector::new(idx, Vec3::new(x, y, z)))
            .collect()
    }

    #[test]
    fn score_counts_same_side_capacity() {
        let outlets = at(&[(0.0, 1.0, 0.0), (0.0, 2.0, 0.0), (0.0, -1.0, 0.0)]);
        let targets = at(&[(0.0, 3.0, 0.0), (0.0, -2.0, 0.0), (0.0, -3.0, 0.0)]);
        let candidate = SplitCandidate::build(SplitAxis::Zx, &unit_world(), &outlets, &targets, EPS);
        assert_eq!(candidate.score(), 2);
    }

    #[test]
    fn prefers_axis_that_separates_both_sets() {
        // Outlets sit behind the inlet and targets in front, so only left/right lines up.
        let outlets = at(&[(1.0, 1.0, 0.0), (-1.0, 1.0, 0.0)]);
        let targets = at(&[(2.0, -1.0, 0.0), (-2.0, -1.0, 0.0)]);
        let chosen = select_split(&unit_world(), &outlets, &targets, EPS);
        assert_eq!(chosen.axis, SplitAxis::Zy);
        assert_eq!(chosen.score(), 2);
    }

    #[test]
    fn tie_keeps_zx_split() {
        let outlets = at(&[(1.0, 1.0, 0.0), (-1.0, -1.0, 0.0)]);
        let targets = at(&[(2.0, 2.0, 0.0), (-2.0, -2.0, 0.0)]);
        let chosen = select_split(&unit_world(), &outlets, &targets, EPS);
        assert_eq!(chosen.axis, SplitAxis::Zx);
    }

    #[test]
    fn empty_sets_tie_on_zero() {
        let chosen = select_split(&unit_world(), &[], &[], EPS);
        assert_eq!(chosen.axis, SplitAxis::Zx);
        assert_eq!(chosen.score(), 0);
    }
}
