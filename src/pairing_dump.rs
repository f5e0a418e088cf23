use crate::config::PairingConfig;
use crate::ir::{EngineInputs, Scenario};
use crate::pairing::vector::{angle_deg, distance, normalize, sub};
use crate::pairing::{Frame, Pairing, SplitAxis, Vec3, normalize_frame};
use serde::Serialize;

/// Segment name prefix when the device carries no system classification.
const FALLBACK_SEGMENT_PREFIX: &str = "Route";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingDump {
    pub scenario: String,
    pub system: Option<String>,
    pub split_axis: SplitAxis,
    pub frame: Frame,
    pub pairs: Vec<PairDump>,
    pub segments: Vec<SegmentDump>,
    pub unmatched_outlets: Vec<String>,
    pub unmatched_targets: Vec<String>,
    pub total_length: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairDump {
    pub outlet: String,
    pub target: String,
    pub outlet_position: [f64; 3],
    pub target_position: [f64; 3],
    /// Degrees from the frame's Z basis, as seen from the frame origin.
    pub outlet_angle: f64,
    pub target_angle: f64,
    pub length: f64,
}

/// Straight run from an outlet to its grill, ready to hand to the router.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDump {
    pub name: String,
    pub from: String,
    pub to: String,
    pub start: [f64; 3],
    pub end: [f64; 3],
    pub length: f64,
}

impl PairingDump {
    /// Angles are measured with the same tolerance the engine sorted with.
    pub fn from_pairing(
        scenario: &Scenario,
        inputs: &EngineInputs<'_>,
        pairing: &Pairing,
        config: &PairingConfig,
    ) -> Self {
        let frame = inputs.frame;
        let tolerance = config.tolerance;
        let z_axis = normalize_frame(&frame, tolerance)
            .map(|unit| unit.z)
            .unwrap_or(Vec3::Z);
        let angle_of = |p: Vec3| angle_deg(normalize(sub(p, frame.origin), tolerance), z_axis);
        let prefix = scenario.system().unwrap_or(FALLBACK_SEGMENT_PREFIX);

        let mut pairs = Vec::with_capacity(pairing.len());
        let mut segments = Vec::with_capacity(pairing.len());
        for (idx, pair) in pairing.pairs.iter().enumerate() {
            let outlet_id = spec_id(inputs.outlet(pair.outlet.id));
            let target_id = spec_id(inputs.target(pair.target.id));
            let length = distance(pair.outlet.position, pair.target.position);
            pairs.push(PairDump {
                outlet: outlet_id.clone(),
                target: target_id.clone(),
                outlet_position: pair.outlet.position.into(),
                target_position: pair.target.position.into(),
                outlet_angle: angle_of(pair.outlet.position),
                target_angle: angle_of(pair.target.position),
                length,
            });
            segments.push(SegmentDump {
                name: format!("{} {}", prefix, idx + 1),
                from: outlet_id,
                to: target_id,
                start: pair.outlet.position.into(),
                end: pair.target.position.into(),
                length,
            });
        }

        let unmatched_outlets = inputs
            .outlets
            .iter()
            .filter(|c| !pairing.is_outlet_paired(c.id))
            .map(|c| spec_id(inputs.outlet(c.id)))
            .collect();
        let unmatched_targets = inputs
            .targets
            .iter()
            .filter(|c| !pairing.is_target_paired(c.id))
            .map(|c| spec_id(inputs.target(c.id)))
            .collect();
        let total_length: f64 = segments.iter().map(|s| s.length).sum();

        PairingDump {
            scenario: scenario.name.clone(),
            system: scenario.system().map(str::to_string),
            split_axis: pairing.split,
            frame,
            pairs,
            segments,
            unmatched_outlets,
            unmatched_targets,
            total_length,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn spec_id(spec: Option<&crate::ir::ConnectorSpec>) -> String {
    spec.map(|s| s.id.clone()).unwrap_or_else(|| "?".to_string())
}
