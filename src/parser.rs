use crate::ir::{ConnectorSpec, FlowDirection, FrameSpec, Scenario};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static SCENARIO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^scenario\s+(?P<name>.+)$").unwrap());
static FRAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^frame\s+(?P<rest>.+)$").unwrap());
static CONNECTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<kind>inlet|outlet|target)\s+(?P<id>\S+)\s+(?P<x>\S+)\s+(?P<y>\S+)\s+(?P<z>\S+)(?P<rest>.*)$",
    )
    .unwrap()
});
static OPTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*(?P<key>system|flow)\s+(?:"(?P<quoted>[^"]*)"|(?P<bare>[^"\s]\S*))"#).unwrap());

/// Reads a scenario from either a JSON5 document or the line format.
///
/// Line format, one statement per line (`#` and `%%` start comments):
///
/// ```text
/// scenario Level 2 VAV box
/// frame origin 0 0 0 x 1 0 0 y 0 1 0 z 0 0 1
/// inlet IN 0 0 0 system "Supply Air"
/// outlet O1 1 0 1
/// target G1 2 0 1 system "Supply Air"
/// ```
pub fn parse_scenario(input: &str) -> Result<Scenario> {
    let scenario = if looks_like_json(input) {
        json5::from_str::<Scenario>(input).context("invalid scenario document")?
    } else {
        parse_line_format(input)?
    };
    scenario.validate()?;
    Ok(scenario)
}

fn looks_like_json(input: &str) -> bool {
    input
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with("//"))
        .map(|line| line.starts_with('{'))
        .unwrap_or(false)
}

fn preprocess_input(input: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    for (idx, raw_line) in input.lines().enumerate() {
        let trimmed_line = raw_line.trim();
        if trimmed_line.is_empty() || trimmed_line.starts_with('#') || trimmed_line.starts_with("%%") {
            continue;
        }
        let without_comment = strip_trailing_comment(trimmed_line);
        if without_comment.is_empty() {
            continue;
        }
        lines.push((idx + 1, without_comment.to_string()));
    }
    lines
}

/// Cuts a `%%` comment unless it sits inside a quoted value.
fn strip_trailing_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (pos, ch) in line.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '%' if !in_quotes && line[pos..].starts_with("%%") => return line[..pos].trim_end(),
            _ => {}
        }
    }
    line
}

fn parse_line_format(input: &str) -> Result<Scenario> {
    let mut name: Option<String> = None;
    let mut frame: Option<FrameSpec> = None;
    let mut inlet: Option<ConnectorSpec> = None;
    let mut outlets = Vec::new();
    let mut targets = Vec::new();

    for (line_no, line) in preprocess_input(input) {
        if let Some(caps) = SCENARIO_RE.captures(&line) {
            name = Some(caps["name"].trim().to_string());
            continue;
        }
        if let Some(caps) = FRAME_RE.captures(&line) {
            if frame.is_some() {
                return Err(anyhow::anyhow!("line {}: frame given twice", line_no));
            }
            frame = Some(parse_frame(&caps["rest"], line_no)?);
            continue;
        }
        if let Some(caps) = CONNECTOR_RE.captures(&line) {
            let position = [
                parse_number(&caps["x"], line_no)?,
                parse_number(&caps["y"], line_no)?,
                parse_number(&caps["z"], line_no)?,
            ];
            let mut connector = ConnectorSpec::new(&caps["id"], position);
            parse_options(&caps["rest"], &mut connector, line_no)?;
            match &caps["kind"] {
                "inlet" => {
                    if inlet.is_some() {
                        return Err(anyhow::anyhow!("line {}: device has more than one inlet", line_no));
                    }
                    inlet = Some(connector);
                }
                "outlet" => outlets.push(connector),
                _ => targets.push(connector),
            }
            continue;
        }
        return Err(anyhow::anyhow!("line {}: unrecognized statement '{}'", line_no, line));
    }

    let inlet = inlet.ok_or_else(|| anyhow::anyhow!("scenario has no inlet"))?;
    let mut scenario = Scenario::new(name.unwrap_or_else(|| "scenario".to_string()), inlet);
    scenario.frame = frame;
    scenario.outlets = outlets;
    scenario.targets = targets;
    Ok(scenario)
}

fn parse_frame(rest: &str, line_no: usize) -> Result<FrameSpec> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let mut origin = None;
    let mut frame = FrameSpec {
        origin: [0.0; 3],
        x: [1.0, 0.0, 0.0],
        y: [0.0, 1.0, 0.0],
        z: [0.0, 0.0, 1.0],
    };
    for chunk in tokens.chunks(4) {
        let [key, a, b, c] = chunk else {
            return Err(anyhow::anyhow!(
                "line {}: frame entries take a name and three numbers",
                line_no
            ));
        };
        let value = [
            parse_number(a, line_no)?,
            parse_number(b, line_no)?,
            parse_number(c, line_no)?,
        ];
        match *key {
            "origin" => origin = Some(value),
            "x" => frame.x = value,
            "y" => frame.y = value,
            "z" => frame.z = value,
            other => {
                return Err(anyhow::anyhow!("line {}: unknown frame entry '{}'", line_no, other));
            }
        }
    }
    frame.origin = origin.ok_or_else(|| anyhow::anyhow!("line {}: frame needs an origin", line_no))?;
    Ok(frame)
}

fn parse_options(mut rest: &str, connector: &mut ConnectorSpec, line_no: usize) -> Result<()> {
    while !rest.trim().is_empty() {
        let caps = OPTION_RE
            .captures(rest)
            .ok_or_else(|| anyhow::anyhow!("line {}: unexpected '{}'", line_no, rest.trim()))?;
        let value = caps
            .name("quoted")
            .or_else(|| caps.name("bare"))
            .map(|m| m.as_str())
            .unwrap_or_default();
        match &caps["key"] {
            "system" => connector.system = Some(value.to_string()),
            _ => {
                let flow = FlowDirection::from_token(value)
                    .ok_or_else(|| anyhow::anyhow!("line {}: unknown flow direction '{}'", line_no, value))?;
                connector.flow = Some(flow);
            }
        }
        rest = &rest[caps.get(0).map(|m| m.end()).unwrap_or(rest.len())..];
    }
    Ok(())
}

fn parse_number(token: &str, line_no: usize) -> Result<f64> {
    let value: f64 = token
        .parse()
        .map_err(|_| anyhow::anyhow!("line {}: '{}' is not a number", line_no, token))?;
    if !value.is_finite() {
        return Err(anyhow::anyhow!("line {}: '{}' is not finite", line_no, token));
    }
    Ok(value)
}
