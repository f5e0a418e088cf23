use crate::pairing::{Connector, Frame, Vec3};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    In,
    Out,
    #[serde(alias = "bi")]
    Bidirectional,
}

impl FlowDirection {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "in" => Some(Self::In),
            "out" => Some(Self::Out),
            "bi" | "bidirectional" => Some(Self::Bidirectional),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorSpec {
    pub id: String,
    pub position: [f64; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<FlowDirection>,
}

impl ConnectorSpec {
    pub fn new(id: impl Into<String>, position: [f64; 3]) -> Self {
        Self {
            id: id.into(),
            position,
            system: None,
            flow: None,
        }
    }

    pub fn point(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    fn same_system(&self, system: &str) -> bool {
        self.system
            .as_deref()
            .map(|own| own.eq_ignore_ascii_case(system))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSpec {
    pub origin: [f64; 3],
    #[serde(default = "unit_x")]
    pub x: [f64; 3],
    #[serde(default = "unit_y")]
    pub y: [f64; 3],
    #[serde(default = "unit_z")]
    pub z: [f64; 3],
}

fn unit_x() -> [f64; 3] {
    [1.0, 0.0, 0.0]
}

fn unit_y() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

fn unit_z() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}

impl From<&FrameSpec> for Frame {
    fn from(spec: &FrameSpec) -> Self {
        Frame::new(
            Vec3::from(spec.origin),
            Vec3::from(spec.x),
            Vec3::from(spec.y),
            Vec3::from(spec.z),
        )
    }
}

/// One distribution device and the grills it could feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<FrameSpec>,
    pub inlet: ConnectorSpec,
    #[serde(default)]
    pub outlets: Vec<ConnectorSpec>,
    #[serde(default)]
    pub targets: Vec<ConnectorSpec>,
}

fn default_name() -> String {
    "scenario".to_string()
}

/// Engine inputs plus the specs each connector handle points back to.
#[derive(Debug, Clone)]
pub struct EngineInputs<'a> {
    pub frame: Frame,
    pub outlets: Vec<Connector>,
    pub targets: Vec<Connector>,
    pub outlet_specs: Vec<&'a ConnectorSpec>,
    pub target_specs: Vec<&'a ConnectorSpec>,
}

impl EngineInputs<'_> {
    pub fn outlet(&self, handle: usize) -> Option<&ConnectorSpec> {
        self.outlet_specs.get(handle).copied()
    }

    pub fn target(&self, handle: usize) -> Option<&ConnectorSpec> {
        self.target_specs.get(handle).copied()
    }
}

impl Scenario {
    pub fn new(name: impl Into<String>, inlet: ConnectorSpec) -> Self {
        Self {
            name: name.into(),
            frame: None,
            inlet,
            outlets: Vec::new(),
            targets: Vec::new(),
        }
    }

    /// The explicit frame, or a world-aligned frame at the inlet.
    pub fn frame(&self) -> Frame {
        match &self.frame {
            Some(spec) => Frame::from(spec),
            None => Frame::world(self.inlet.point()),
        }
    }

    /// Flow-system classification of the device, taken from its inlet.
    pub fn system(&self) -> Option<&str> {
        self.inlet.system.as_deref()
    }

    pub fn candidate_outlets(&self) -> Vec<&ConnectorSpec> {
        self.outlets
            .iter()
            .filter(|outlet| {
                let keep = outlet.flow != Some(FlowDirection::In);
                if !keep {
                    debug!(id = %outlet.id, "skipping inward-flow connector on device");
                }
                keep
            })
            .collect()
    }

    /// Targets on the same flow system as the inlet. Without an inlet system every target qualifies.
    pub fn candidate_targets(&self) -> Vec<&ConnectorSpec> {
        let Some(system) = self.system() else {
            return self.targets.iter().collect();
        };
        self.targets
            .iter()
            .filter(|target| {
                let keep = target.same_system(system);
                if !keep {
                    debug!(
                        id = %target.id,
                        system = target.system.as_deref().unwrap_or("<none>"),
                        expected = system,
                        "skipping target on another system"
                    );
                }
                keep
            })
            .collect()
    }

    pub fn engine_inputs(&self) -> EngineInputs<'_> {
        let outlet_specs = self.candidate_outlets();
        let target_specs = self.candidate_targets();
        let outlets = to_connectors(&outlet_specs);
        let targets = to_connectors(&target_specs);
        EngineInputs {
            frame: self.frame(),
            outlets,
            targets,
            outlet_specs,
            target_specs,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let all = std::iter::once(&self.inlet)
            .chain(self.outlets.iter())
            .chain(self.targets.iter());
        for connector in all {
            if connector.id.trim().is_empty() {
                return Err(anyhow::anyhow!("connector with empty id"));
            }
            if !seen.insert(connector.id.as_str()) {
                return Err(anyhow::anyhow!("duplicate connector id '{}'", connector.id));
            }
            if !connector.point().is_finite() {
                return Err(anyhow::anyhow!(
                    "connector '{}' has a non-finite position",
                    connector.id
                ));
            }
        }
        if let Some(frame) = &self.frame {
            let frame = Frame::from(frame);
            let finite = [frame.origin, frame.x, frame.y, frame.z]
                .iter()
                .all(|v| v.is_finite());
            if !finite {
                return Err(anyhow::anyhow!("frame has non-finite components"));
            }
        }
        Ok(())
    }
}

fn to_connectors(specs: &[&ConnectorSpec]) -> Vec<Connector> {
    specs
        .iter()
        .enumerate()
        .map(|(idx, spec)| Connector::new(idx, spec.point()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(id: &str, position: [f64; 3], system: Option<&str>) -> ConnectorSpec {
        ConnectorSpec {
            system: system.map(str::to_string),
            ..ConnectorSpec::new(id, position)
        }
    }

    fn sample() -> Scenario {
        let mut scenario = Scenario::new("box", spec("IN", [0.0, 0.0, 0.0], Some("Supply Air")));
        scenario.outlets = vec![
            spec("O1", [1.0, 0.0, 1.0], None),
            ConnectorSpec {
                flow: Some(FlowDirection::In),
                ..spec("O2", [1.0, 0.0, -1.0], None)
            },
            spec("O3", [-1.0, 0.0, 1.0], None),
        ];
        scenario.targets = vec![
            spec("G1", [2.0, 0.0, 1.0], Some("supply air")),
            spec("G2", [2.0, 0.0, -1.0], Some("Return Air")),
            spec("G3", [-2.0, 0.0, 1.0], None),
            spec("G4", [-2.0, 0.0, -1.0], Some("SUPPLY AIR")),
        ];
        scenario
    }

    #[test]
    fn targets_filter_on_inlet_system_ignoring_case() {
        let scenario = sample();
        let ids: Vec<&str> = scenario.candidate_targets().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["G1", "G4"]);
    }

    #[test]
    fn inlet_without_system_accepts_every_target() {
        let mut scenario = sample();
        scenario.inlet.system = None;
        assert_eq!(scenario.candidate_targets().len(), 4);
    }

    #[test]
    fn inward_connectors_are_not_outlets() {
        let scenario = sample();
        let ids: Vec<&str> = scenario.candidate_outlets().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["O1", "O3"]);
    }

    #[test]
    fn engine_handles_index_candidate_lists() {
        let scenario = sample();
        let inputs = scenario.engine_inputs();
        assert_eq!(inputs.outlets.len(), 2);
        assert_eq!(inputs.outlets[1].id, 1);
        assert_eq!(inputs.outlet(1).map(|s| s.id.as_str()), Some("O3"));
        assert_eq!(inputs.target(1).map(|s| s.id.as_str()), Some("G4"));
        assert_eq!(inputs.targets[1].position, Vec3::new(-2.0, 0.0, -1.0));
        assert!(inputs.target(2).is_none());
    }

    #[test]
    fn frame_defaults_to_world_axes_at_inlet() {
        let mut scenario = sample();
        scenario.inlet.position = [5.0, 6.0, 7.0];
        assert_eq!(scenario.frame(), Frame::world(Vec3::new(5.0, 6.0, 7.0)));

        scenario.frame = Some(FrameSpec {
            origin: [1.0, 1.0, 1.0],
            x: unit_y(),
            y: unit_z(),
            z: unit_x(),
        });
        assert_eq!(scenario.frame().z, Vec3::X);
    }

    #[test]
    fn validate_rejects_duplicates_and_nan() {
        let mut scenario = sample();
        assert!(scenario.validate().is_ok());

        scenario.targets.push(spec("O1", [0.0, 0.0, 0.0], None));
        let err = scenario.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate"));

        let mut scenario = sample();
        scenario.outlets[0].position[2] = f64::NAN;
        assert!(scenario.validate().is_err());
    }
}
