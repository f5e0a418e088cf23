mod axis;
mod error;
mod frame;
mod merge;
mod partition;
mod sort;
pub(crate) mod types;
pub mod vector;

pub use error::{PairingError, Result};
pub use frame::{UnitFrame, normalize_frame};
pub use types::*;

use axis::select_split;
use merge::{SortedHalves, merge_halves};
use sort::sort_by_angle;
use tracing::{debug, info};

use crate::config::PairingConfig;

/// Length below which a vector counts as zero.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Pairs outlets with targets using the default tolerance.
pub fn pair_connectors(frame: &Frame, outlets: &[Connector], targets: &[Connector]) -> Result<Pairing> {
    pair_connectors_with(frame, outlets, targets, &PairingConfig::default())
}

/// Pairs each outlet with at most one target and each target with at most one outlet.
///
/// Both sets are split into halves by the plane (through the frame origin) that best
/// lines them up, each half is ordered by angle to the frame's Z basis, and halves are
/// zipped greedily. The result depends only on the input geometry and order.
///
/// Fails only when a basis vector of `frame` is shorter than the tolerance.
pub fn pair_connectors_with(
    frame: &Frame,
    outlets: &[Connector],
    targets: &[Connector],
    config: &PairingConfig,
) -> Result<Pairing> {
    let tolerance = config.tolerance;
    let frame = normalize_frame(frame, tolerance)?;

    let split = select_split(&frame, outlets, targets, tolerance);
    let halves = SortedHalves {
        upper_outlets: sort_by_angle(&split.outlets.upper, &frame, tolerance),
        lower_outlets: sort_by_angle(&split.outlets.lower, &frame, tolerance),
        upper_targets: sort_by_angle(&split.targets.upper, &frame, tolerance),
        lower_targets: sort_by_angle(&split.targets.lower, &frame, tolerance),
    };
    debug!(
        upper_outlets = halves.upper_outlets.len(),
        lower_outlets = halves.lower_outlets.len(),
        upper_targets = halves.upper_targets.len(),
        lower_targets = halves.lower_targets.len(),
        "partitioned connectors"
    );

    let pairs = merge_halves(halves);
    info!(
        outlets = outlets.len(),
        targets = targets.len(),
        pairs = pairs.len(),
        split = ?split.axis,
        "paired connectors"
    );
    Ok(Pairing {
        pairs,
        split: split.axis,
    })
}
