use std::collections::HashSet;
use std::path::Path;

use connector_pairing::{
    Config, PairingDump, PairingError, Scenario, SplitAxis, pair_connectors_with, parse_scenario,
    render_svg, render_text,
};

struct Expected {
    fixture: &'static str,
    split: SplitAxis,
    pairs: &'static [(&'static str, &'static str)],
    unmatched_outlets: &'static [&'static str],
    unmatched_targets: &'static [&'static str],
}

fn load_fixture(rel: &str) -> Scenario {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel);
    assert!(path.exists(), "fixture missing: {}", rel);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    parse_scenario(&input).expect("parse failed")
}

fn run_fixture(scenario: &Scenario) -> Result<PairingDump, PairingError> {
    let config = Config::default();
    let inputs = scenario.engine_inputs();
    let pairing = pair_connectors_with(&inputs.frame, &inputs.outlets, &inputs.targets, &config.pairing)?;
    Ok(PairingDump::from_pairing(scenario, &inputs, &pairing, &config.pairing))
}

#[test]
fn pair_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let cases = [
        Expected {
            fixture: "balanced.pair",
            split: SplitAxis::Zx,
            pairs: &[("O1", "G1"), ("O2", "G2")],
            unmatched_outlets: &[],
            unmatched_targets: &[],
        },
        Expected {
            fixture: "unbalanced.pair",
            split: SplitAxis::Zx,
            pairs: &[("O2", "G1")],
            unmatched_outlets: &["O1", "O3"],
            unmatched_targets: &[],
        },
        Expected {
            fixture: "empty_targets.json5",
            split: SplitAxis::Zx,
            pairs: &[],
            unmatched_outlets: &["O1", "O2"],
            unmatched_targets: &[],
        },
        Expected {
            fixture: "vav_box.json5",
            split: SplitAxis::Zx,
            pairs: &[("O1", "G2"), ("O2", "G1"), ("O4", "G5"), ("O3", "G3")],
            unmatched_outlets: &[],
            unmatched_targets: &[],
        },
        Expected {
            fixture: "side_by_side.pair",
            split: SplitAxis::Zy,
            pairs: &[("O1", "G1"), ("O2", "G2")],
            unmatched_outlets: &[],
            unmatched_targets: &["G3"],
        },
    ];

    for case in cases {
        let scenario = load_fixture(case.fixture);
        let dump = run_fixture(&scenario).unwrap_or_else(|err| panic!("{}: {err}", case.fixture));
        let pairs: Vec<(&str, &str)> = dump
            .pairs
            .iter()
            .map(|p| (p.outlet.as_str(), p.target.as_str()))
            .collect();
        assert_eq!(pairs, case.pairs, "{}: pairs", case.fixture);
        assert_eq!(dump.split_axis, case.split, "{}: split", case.fixture);
        assert_eq!(dump.unmatched_outlets, case.unmatched_outlets, "{}: unmatched outlets", case.fixture);
        assert_eq!(dump.unmatched_targets, case.unmatched_targets, "{}: unmatched targets", case.fixture);
    }
}

#[test]
fn fixtures_pair_injectively_and_repeatably() {
    for rel in ["balanced.pair", "unbalanced.pair", "vav_box.json5", "side_by_side.pair"] {
        let scenario = load_fixture(rel);
        let first = run_fixture(&scenario).unwrap();
        let second = run_fixture(&scenario).unwrap();
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap(), "{rel}: not deterministic");

        let outlets: HashSet<&str> = first.pairs.iter().map(|p| p.outlet.as_str()).collect();
        let targets: HashSet<&str> = first.pairs.iter().map(|p| p.target.as_str()).collect();
        assert_eq!(outlets.len(), first.pairs.len(), "{rel}: outlet reused");
        assert_eq!(targets.len(), first.pairs.len(), "{rel}: target reused");

        let inputs = scenario.engine_inputs();
        assert!(first.pairs.len() <= inputs.outlets.len().min(inputs.targets.len()));
    }
}

#[test]
fn degenerate_frame_fixture_is_rejected() {
    let scenario = load_fixture("degenerate_frame.pair");
    let err = run_fixture(&scenario).unwrap_err();
    assert!(matches!(err, PairingError::InvalidFrame { .. }));
}

#[test]
fn previews_render_for_every_fixture() {
    let config = Config::default();
    for rel in ["balanced.pair", "unbalanced.pair", "empty_targets.json5", "vav_box.json5", "side_by_side.pair"] {
        let scenario = load_fixture(rel);
        let dump = run_fixture(&scenario).unwrap();
        let svg = render_svg(&scenario, &dump, &config.theme, &config.render);
        assert!(svg.contains("<svg"), "{rel}: missing <svg tag");
        assert!(svg.contains("</svg>"), "{rel}: missing </svg tag");
        assert!(!svg.contains("NaN"), "{rel}: NaN coordinate");
        let text = render_text(&dump);
        assert!(text.contains(&scenario.name), "{rel}: text summary lacks name");
    }
}
