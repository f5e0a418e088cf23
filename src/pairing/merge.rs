use super::types::{Connector, Pair};

/// Angularly sorted halves of the outlet and target sets under the chosen split.
#[derive(Debug, Clone, Default)]
pub(super) struct SortedHalves {
    pub(super) upper_outlets: Vec<Connector>,
    pub(super) lower_outlets: Vec<Connector>,
    pub(super) upper_targets: Vec<Connector>,
    pub(super) lower_targets: Vec<Connector>,
}

/// Greedy assembly: same-side pairs first (upper, then lower), then whatever
/// is left on either side is paired across the split in upper-then-lower order.
pub(super) fn merge_halves(halves: SortedHalves) -> Vec<Pair> {
    let SortedHalves {
        upper_outlets,
        lower_outlets,
        upper_targets,
        lower_targets,
    } = halves;

    let mut pairs = Vec::with_capacity(
        (upper_outlets.len() + lower_outlets.len()).min(upper_targets.len() + lower_targets.len()),
    );
    let mut leftover_outlets = Vec::new();
    let mut leftover_targets = Vec::new();

    zip_side(upper_outlets, upper_targets, &mut pairs, &mut leftover_outlets, &mut leftover_targets);
    zip_side(lower_outlets, lower_targets, &mut pairs, &mut leftover_outlets, &mut leftover_targets);

    pairs.extend(
        leftover_outlets
            .into_iter()
            .zip(leftover_targets)
            .map(|(outlet, target)| Pair { outlet, target }),
    );
    pairs
}

fn zip_side(
    outlets: Vec<Connector>,
    targets: Vec<Connector>,
    pairs: &mut Vec<Pair>,
    leftover_outlets: &mut Vec<Connector>,
    leftover_targets: &mut Vec<Connector>,
) {
    let matched = outlets.len().min(targets.len());
    let mut outlets = outlets.into_iter();
    let mut targets = targets.into_iter();
    pairs.extend(
        outlets
            .by_ref()
            .take(matched)
            .zip(targets.by_ref().take(matched))
            .map(|(outlet, target)| Pair { outlet, target }),
    );
    leftover_outlets.extend(outlets);
    leftover_targets.extend(targets);
}
